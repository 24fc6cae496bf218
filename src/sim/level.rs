/// Maze loader.
///
/// ## Format
///   One text line per maze row, all rows the same length (in chars).
///
/// ## Legend
///   '#' = Wall           '.' = Dot
///   'X' = Power pill     'P' = Player spawn (exactly one)
///   'G' = Adversary spawn (any number)
///   ' ' = Space          anything else = Empty (walkable)

use std::fs;
use std::path::Path;

use crate::domain::cell::Cell;
use crate::domain::entity::{Adversary, Player};
use crate::domain::grid::{Grid, Position};
use crate::error::{GameError, Result};

/// Everything the maze file provides, consumed once at startup.
#[derive(Clone, Debug)]
pub struct Maze {
    pub grid: Grid,
    pub player: Player,
    pub adversaries: Vec<Adversary>,
    /// Initial remaining-dot count (power pills are not counted).
    pub dots: usize,
}

pub fn load_maze(path: &Path) -> Result<Maze> {
    let text = fs::read_to_string(path).map_err(|source| GameError::Maze {
        path: path.to_path_buf(),
        source,
    })?;
    let maze = parse_maze(&text)?;
    log::info!(
        "loaded maze {} ({}x{}, {} adversaries, {} dots)",
        path.display(),
        maze.grid.width(),
        maze.grid.height(),
        maze.adversaries.len(),
        maze.dots,
    );
    Ok(maze)
}

pub fn parse_maze(text: &str) -> Result<Maze> {
    let mut cells: Vec<Vec<Cell>> = Vec::new();
    let mut player_spawns = Vec::new();
    let mut adversaries = Vec::new();

    for (row, line) in text.lines().enumerate() {
        let mut cell_row = Vec::with_capacity(line.len());
        for (col, ch) in line.chars().enumerate() {
            match ch {
                'P' => player_spawns.push(Position::new(row, col)),
                'G' => adversaries.push(Adversary::new(Position::new(row, col))),
                _ => {}
            }
            cell_row.push(Cell::from_char(ch));
        }
        cells.push(cell_row);
    }

    // Trailing blank lines are not rows.
    while cells.last().is_some_and(|r| r.is_empty()) {
        cells.pop();
    }

    if cells.is_empty() {
        return Err(GameError::InvalidMaze("maze has no rows".into()));
    }
    if let Some((row, r)) = cells.iter().enumerate().find(|(_, r)| r.len() != cells[0].len()) {
        return Err(GameError::InvalidMaze(format!(
            "row {row} is {} cells wide, expected {}",
            r.len(),
            cells[0].len()
        )));
    }

    let player = match player_spawns.as_slice() {
        [spawn] => Player::new(*spawn),
        [] => return Err(GameError::InvalidMaze("no player spawn 'P'".into())),
        many => {
            return Err(GameError::InvalidMaze(format!(
                "expected one player spawn 'P', found {}",
                many.len()
            )))
        }
    };

    let grid = Grid::new(cells).ok_or_else(|| GameError::InvalidMaze("maze rows are empty".into()))?;
    let dots = grid.count(Cell::Dot);

    Ok(Maze { grid, player, adversaries, dots })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_spawns_and_counts_dots() {
        let maze = parse_maze("#####\n#P.G#\n#.X.#\n#####\n").unwrap();
        assert_eq!(maze.grid.width(), 5);
        assert_eq!(maze.grid.height(), 4);
        assert_eq!(maze.player.spawn, Position::new(1, 1));
        assert_eq!(maze.player.pos, maze.player.spawn);
        assert_eq!(maze.adversaries.len(), 1);
        assert_eq!(maze.adversaries[0].spawn, Position::new(1, 3));
        assert_eq!(maze.dots, 3);
    }

    #[test]
    fn spawn_cells_are_walkable() {
        let maze = parse_maze("PG").unwrap();
        assert_eq!(maze.grid.cell_at(Position::new(0, 0)), Cell::Empty);
        assert_eq!(maze.grid.cell_at(Position::new(0, 1)), Cell::Empty);
    }

    #[test]
    fn pills_do_not_count_as_dots() {
        let maze = parse_maze("PXX.").unwrap();
        assert_eq!(maze.dots, 1);
    }

    #[test]
    fn crlf_and_trailing_blank_lines_are_tolerated() {
        let maze = parse_maze("#P#\r\n#.#\r\n\n\n").unwrap();
        assert_eq!(maze.grid.height(), 2);
        assert_eq!(maze.grid.width(), 3);
    }

    #[test]
    fn ragged_maze_is_rejected() {
        let err = parse_maze("#P#\n##\n").unwrap_err();
        assert!(matches!(err, GameError::InvalidMaze(_)));
    }

    #[test]
    fn missing_player_is_rejected() {
        assert!(matches!(parse_maze("#.#\n").unwrap_err(), GameError::InvalidMaze(_)));
    }

    #[test]
    fn two_players_are_rejected() {
        assert!(matches!(parse_maze("PP\n").unwrap_err(), GameError::InvalidMaze(_)));
    }

    #[test]
    fn empty_text_is_rejected() {
        assert!(matches!(parse_maze("").unwrap_err(), GameError::InvalidMaze(_)));
    }

    #[test]
    fn bundled_maze_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("maze01.txt");
        let maze = load_maze(&path).unwrap();
        assert_eq!(maze.grid.width(), 28);
        assert_eq!(maze.adversaries.len(), 3);
        assert!(maze.dots > 0);
    }

    #[test]
    fn missing_file_is_a_maze_error() {
        let err = load_maze(Path::new("/definitely/not/here/maze.txt")).unwrap_err();
        assert!(matches!(err, GameError::Maze { .. }));
    }
}
