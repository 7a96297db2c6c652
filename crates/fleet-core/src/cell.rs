//! Grid coordinate type.
//!
//! A `Cell` is a `(row, col)` pair on a rectangular grid.  It knows nothing
//! about grid bounds; `fleet_grid::Grid` owns dimensions and validates
//! coordinates against them.

use std::fmt;

/// A grid coordinate.  Ordering is row-major (row first, then column).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub row: u32,
    pub col: u32,
}

impl Cell {
    #[inline]
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Manhattan (L1) distance, the obstacle-free lower bound on path steps.
    #[inline]
    pub fn manhattan(self, other: Cell) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// `true` if `other` is one orthogonal step away.
    #[inline]
    pub fn is_adjacent(self, other: Cell) -> bool {
        self.manhattan(other) == 1
    }

    /// The cell displaced by `(d_row, d_col)`, or `None` if either coordinate
    /// would underflow.  Upper bounds are the grid's concern.
    #[inline]
    pub fn offset(self, d_row: i32, d_col: i32) -> Option<Cell> {
        let row = self.row.checked_add_signed(d_row)?;
        let col = self.col.checked_add_signed(d_col)?;
        Some(Cell { row, col })
    }
}

impl From<(u32, u32)> for Cell {
    #[inline]
    fn from((row, col): (u32, u32)) -> Self {
        Cell { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
