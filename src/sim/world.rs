/// GameState: the complete state of a running game.
///
/// Built once from the loaded maze and owned by the game loop. Grid,
/// player, score and lives are touched by the loop only. The adversaries
/// and the power-up coordinator are behind `Arc` because power-up threads
/// hold them too.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::entity::Player;
use crate::domain::grid::Grid;
use super::adversaries::AdversaryState;
use super::event::Outcome;
use super::level::Maze;
use super::power_up::PowerUp;

pub const STARTING_LIVES: i32 = 3;
pub const DOT_SCORE: u32 = 1;
pub const PILL_SCORE: u32 = 10;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Running,
    GameOver(Outcome),
}

#[derive(Debug)]
pub struct GameState {
    pub grid: Grid,
    pub player: Player,
    pub adversaries: Arc<AdversaryState>,
    pub power_up: Arc<PowerUp>,
    pub score: u32,
    pub lives: i32,
    pub dots_remaining: usize,
    pub phase: Phase,
    pub tick: u64,
}

impl GameState {
    pub fn new(maze: Maze, pill_duration: Duration) -> Self {
        let adversaries = Arc::new(AdversaryState::new(maze.adversaries));
        let power_up = Arc::new(PowerUp::new(Arc::clone(&adversaries), pill_duration));
        GameState {
            grid: maze.grid,
            player: maze.player,
            adversaries,
            power_up,
            score: 0,
            lives: STARTING_LIVES,
            dots_remaining: maze.dots,
            phase: Phase::Running,
            tick: 0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            Phase::Running => None,
            Phase::GameOver(outcome) => Some(outcome),
        }
    }
}
