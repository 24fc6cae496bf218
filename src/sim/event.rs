/// Events emitted during a tick.
/// The loop consumes these for the death pause, the final frame and logging.

use crate::domain::entity::Status;
use crate::domain::grid::Position;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Outcome {
    /// Every dot eaten.
    Cleared,
    /// Lives exhausted (including a quit).
    Defeated,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[allow(dead_code)]
pub enum GameEvent {
    DotEaten { at: Position },
    PillEaten { at: Position },
    /// `at` is where the player was caught, before any respawn.
    PlayerCaught { at: Position, status: Status, lives_left: i32 },
    Quit,
    GameOver(Outcome),
}
