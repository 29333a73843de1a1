// error.rs - Error types for the Life engine

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A coordinate outside `[0, size)`. Always a caller bug.
    #[error("cell ({x}, {y}) is outside the {size}x{size} board")]
    OutOfBounds { x: usize, y: usize, size: usize },

    /// Edits are only accepted while the simulation is paused.
    #[error("the simulation is running; pause it before editing cells")]
    SimulationRunning,

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("row {row} contains {ch:?}; only '#' and '.' are allowed")]
    InvalidCell { row: usize, ch: char },

    /// Random fill probability that is NaN or infinite.
    #[error("fill density {density} is not a finite number")]
    InvalidDensity { density: f64 },

    #[error("row task for row {row} was cancelled before finishing")]
    RowTaskFailed { row: usize },
}
