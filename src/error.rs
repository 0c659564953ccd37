use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Reasons a configuration cannot drive a game.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid must have at least one row and one column (got {rows}x{columns})")]
    EmptyGrid { rows: u16, columns: u16 },

    #[error("cell width must be at least one terminal column")]
    ZeroCellWidth,

    #[error("tick interval must be greater than zero")]
    ZeroTickInterval,

    #[error("initial snake length {length} must be between 1 and the column count {columns}")]
    InvalidInitialLength { length: u16, columns: u16 },

    #[error("a snake of length {length} leaves no free cell for food on a {cells}-cell board")]
    NoRoomForFood { length: u16, cells: usize },

    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
