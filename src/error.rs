/// Error taxonomy for the whole run.
///
/// Everything here is fatal: load failures stop the process before the
/// game starts, terminal and render failures end the run. A failed input
/// read is not an error at this level, the input pump turns it into an
/// Escape command instead.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("failed to read maze file [{}]: {source}", path.display())]
    Maze { path: PathBuf, source: io::Error },

    #[error("invalid maze: {0}")]
    InvalidMaze(String),

    #[error("failed to read configuration file [{}]: {source}", path.display())]
    Config { path: PathBuf, source: io::Error },

    #[error("malformed configuration file [{}]: {reason}", path.display())]
    ConfigFormat { path: PathBuf, reason: String },

    #[error("unable to change terminal mode: {0}")]
    Terminal(io::Error),

    #[error("failed to draw frame: {0}")]
    Render(io::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
