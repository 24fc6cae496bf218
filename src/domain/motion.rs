/// Motion resolver: (position, direction) → new position.
///
/// Shared by the player and the adversaries. Both axes wrap around
/// independently; a move that lands on a wall is rejected and the
/// entity stays where it was.

use rand::Rng;

use super::grid::{Grid, Position};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Uniform draw over the four directions.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

/// Pure and deterministic.
pub fn resolve_move(grid: &Grid, from: Position, dir: Direction) -> Position {
    let (h, w) = (grid.height(), grid.width());
    let to = match dir {
        Direction::Up => Position::new((from.row + h - 1) % h, from.col),
        Direction::Down => Position::new((from.row + 1) % h, from.col),
        Direction::Left => Position::new(from.row, (from.col + w - 1) % w),
        Direction::Right => Position::new(from.row, (from.col + 1) % w),
    };

    if grid.cell_at(to).is_wall() {
        from
    } else {
        to
    }
}
