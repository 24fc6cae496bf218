/// Entities: the player and the adversaries.

use super::grid::Position;
use super::motion::Direction;

/// One decoded input, handed from the input pump to the game loop.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
    Move(Direction),
    Escape,
}

/// Adversary status. Flipped in bulk by the power-up coordinator.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Status {
    #[default]
    Normal,
    Empowered,
}

/// Owned by the game loop only.
#[derive(Clone, Debug)]
pub struct Player {
    pub pos: Position,
    pub spawn: Position,
}

impl Player {
    pub fn new(spawn: Position) -> Self {
        Player { pos: spawn, spawn }
    }

    /// Back to the spawn cell after being caught.
    pub fn respawn(&mut self) {
        self.pos = self.spawn;
    }
}

#[derive(Clone, Debug)]
pub struct Adversary {
    pub pos: Position,
    /// Where the adversary started. Kept as part of the maze data;
    /// adversaries never respawn, so only tests read it.
    #[allow(dead_code)]
    pub spawn: Position,
    pub status: Status,
}

impl Adversary {
    pub fn new(spawn: Position) -> Self {
        Adversary { pos: spawn, spawn, status: Status::Normal }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn respawn_returns_to_spawn() {
        let mut p = Player::new(Position::new(3, 4));
        p.pos = Position::new(1, 1);
        p.respawn();
        assert_eq!(p.pos, Position::new(3, 4));
        assert_eq!(p.spawn, Position::new(3, 4));
    }

    #[test]
    fn adversaries_start_normal_on_spawn() {
        let a = Adversary::new(Position::new(2, 2));
        assert_eq!(a.status, Status::Normal);
        assert_eq!(a.pos, a.spawn);
    }
}
