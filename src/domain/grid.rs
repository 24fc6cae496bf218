/// The maze cell matrix.
///
/// Rectangular for its whole lifetime: built once from the maze rows,
/// never resized. The only mutation is pickup removal.

use super::cell::Cell;

/// A (row, column) pair inside the grid bounds.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }
}

#[derive(Clone, Debug)]
pub struct Grid {
    cells: Vec<Vec<Cell>>,
    width: usize,
    height: usize,
}

impl Grid {
    /// Build a grid from rows of cells.
    /// Returns `None` when there are no rows, the rows are empty, or
    /// the rows differ in length.
    pub fn new(cells: Vec<Vec<Cell>>) -> Option<Self> {
        let height = cells.len();
        let width = cells.first()?.len();
        if width == 0 || cells.iter().any(|row| row.len() != width) {
            return None;
        }
        Some(Grid { cells, width, height })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Callers pass positions already normalized by the motion resolver.
    pub fn cell_at(&self, pos: Position) -> Cell {
        self.cells[pos.row][pos.col]
    }

    /// Consume the pickup at `pos`. Returns the cell that was removed,
    /// or `None` if there was nothing to pick up.
    pub fn remove_dot(&mut self, pos: Position) -> Option<Cell> {
        let cell = &mut self.cells[pos.row][pos.col];
        if !cell.is_pickup() {
            return None;
        }
        let removed = *cell;
        *cell = Cell::Space;
        Some(removed)
    }

    pub fn count(&self, kind: Cell) -> usize {
        self.cells.iter().flatten().filter(|&&c| c == kind).count()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.iter().map(Vec::as_slice)
    }
}
