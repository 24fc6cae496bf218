pub mod adversaries;
pub mod event;
pub mod level;
pub mod power_up;
pub mod step;
pub mod world;
