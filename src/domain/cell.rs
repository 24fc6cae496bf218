/// Cell types and their properties.
/// Properties are queried via methods, not stored as flags,
/// so cell semantics are centralized here.

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Cell {
    Wall,
    /// Walkable, nothing drawn. Spawn markers and unknown characters land here.
    #[default]
    Empty,
    Dot,       // +1, counts toward the clear condition
    PowerPill, // +10, empowers adversaries
    Space,     // what a consumed pickup leaves behind
}

impl Cell {
    /// Map a maze character to its cell.
    pub fn from_char(ch: char) -> Self {
        match ch {
            '#' => Cell::Wall,
            '.' => Cell::Dot,
            'X' => Cell::PowerPill,
            ' ' => Cell::Space,
            _ => Cell::Empty,
        }
    }

    pub fn is_wall(self) -> bool {
        matches!(self, Cell::Wall)
    }

    /// Can this cell be consumed by the player?
    pub fn is_pickup(self) -> bool {
        matches!(self, Cell::Dot | Cell::PowerPill)
    }
}
