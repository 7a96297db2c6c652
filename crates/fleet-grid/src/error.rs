//! Grid-subsystem error type.

use thiserror::Error;

use fleet_core::Cell;

/// Errors produced by `fleet-grid`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GridError {
    /// No path exists.  This is a routine outcome of a query, not a fault:
    /// out-of-bounds or blocked endpoints are reported the same way.
    #[error("no path from {from} to {to}")]
    Unreachable { from: Cell, to: Cell },

    #[error("invalid grid dimensions {rows}x{cols}")]
    InvalidDimensions { rows: u32, cols: u32 },

    #[error("cell {cell} is outside the {rows}x{cols} grid")]
    OutOfBounds { cell: Cell, rows: u32, cols: u32 },

    #[error("map parse error: {0}")]
    Parse(String),
}

pub type GridResult<T> = Result<T, GridError>;
