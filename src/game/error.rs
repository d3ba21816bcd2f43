use std::path::PathBuf;

use thiserror::Error;

use super::state::Cell;

/// Reasons a [`GameConfig`](super::GameConfig) is rejected
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cell size must be positive, got {0}")]
    InvalidCellSize(i32),

    #[error("grid {width}x{height} must be positive multiples of the cell size {cell_size}")]
    InvalidGrid {
        width: i32,
        height: i32,
        cell_size: i32,
    },

    #[error("tick interval must be non-zero")]
    ZeroTickInterval,

    #[error("initial body must contain at least one cell")]
    EmptyBody,

    #[error("initial body cell ({}, {}) is off the grid or not cell-aligned", .0.x, .0.y)]
    MisplacedCell(Cell),

    #[error("initial body cell ({}, {}) appears more than once", .0.x, .0.y)]
    DuplicateCell(Cell),

    #[error("initial body cells ({}, {}) and ({}, {}) are not adjacent", .0.x, .0.y, .1.x, .1.y)]
    DetachedBody(Cell, Cell),

    #[error("failed to read config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Food could not be placed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlacementError {
    /// Every cell of the grid is covered by the snake
    #[error("no free cell left on the grid")]
    GridFull,
}
