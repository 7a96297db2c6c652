//! The persistent occupancy grid.
//!
//! A `Grid` is built once at setup (via [`GridBuilder`], [`Grid::from_ascii`],
//! or [`random_grid`](crate::random_grid)) and is read-only for the rest of
//! the run.  Cells are stored row-major, so `CellId(row * cols + col)` indexes
//! `cells` directly.

use std::fmt;

use fleet_core::{Cell, CellId};

use crate::{GridError, GridResult};

// ── CellKind ──────────────────────────────────────────────────────────────────

/// Classification of one grid cell.
///
/// Only `Blocked` affects routing; `Start` and `Goal` are markers for the
/// presentation layer and are traversable like `Free`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellKind {
    #[default]
    Free,
    Blocked,
    Start,
    Goal,
}

impl CellKind {
    #[inline]
    pub fn is_blocked(self) -> bool {
        matches!(self, CellKind::Blocked)
    }

    /// Map glyph used by [`Grid::from_ascii`] and the text renderer.
    pub fn as_char(self) -> char {
        match self {
            CellKind::Free    => '.',
            CellKind::Blocked => '#',
            CellKind::Start   => 'S',
            CellKind::Goal    => 'G',
        }
    }

    pub fn from_char(c: char) -> Option<CellKind> {
        match c {
            '.' => Some(CellKind::Free),
            '#' => Some(CellKind::Blocked),
            'S' => Some(CellKind::Start),
            'G' => Some(CellKind::Goal),
            _   => None,
        }
    }
}

// ── Grid ──────────────────────────────────────────────────────────────────────

/// Immutable rectangular occupancy grid.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawGrid"))]
pub struct Grid {
    rows:  u32,
    cols:  u32,
    cells: Vec<CellKind>,
}

/// Decoded grid fields before [`Grid::from_cells`] has checked them.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawGrid {
    rows:  u32,
    cols:  u32,
    cells: Vec<CellKind>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawGrid> for Grid {
    type Error = GridError;

    fn try_from(raw: RawGrid) -> GridResult<Grid> {
        Grid::from_cells(raw.rows, raw.cols, raw.cells)
    }
}

impl Grid {
    /// A `rows × cols` grid with every cell `Free`.
    pub fn open(rows: u32, cols: u32) -> GridResult<Grid> {
        GridBuilder::new(rows, cols).map(GridBuilder::build)
    }

    /// Assemble a grid from row-major cell kinds.  The dimensions follow the
    /// [`GridBuilder::new`] rules and `cells` must hold exactly
    /// `rows * cols` entries.
    pub fn from_cells(rows: u32, cols: u32, cells: Vec<CellKind>) -> GridResult<Grid> {
        let expected = checked_cell_count(rows, cols)?;
        if cells.len() != expected {
            return Err(GridError::Parse(format!(
                "{rows}x{cols} grid needs {expected} cells, found {}",
                cells.len()
            )));
        }
        Ok(Grid { rows, cols, cells })
    }

    /// Parse a map drawn with `.` (free), `#` (blocked), `S` (start) and
    /// `G` (goal).  Blank lines and surrounding whitespace are ignored; every
    /// remaining line must have the same width.
    ///
    /// ```
    /// use fleet_grid::Grid;
    ///
    /// let grid = Grid::from_ascii("
    ///     S.#
    ///     ..G
    /// ").unwrap();
    /// assert_eq!((grid.rows(), grid.cols()), (2, 3));
    /// ```
    pub fn from_ascii(map: &str) -> GridResult<Grid> {
        let lines: Vec<&str> = map
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();

        let rows = u32::try_from(lines.len())
            .map_err(|_| GridError::Parse("too many rows".into()))?;
        let width = lines.first().map_or(0, |l| l.chars().count());
        let cols = u32::try_from(width)
            .map_err(|_| GridError::Parse("too many columns".into()))?;

        let mut builder = GridBuilder::new(rows, cols)?;
        for (r, line) in lines.iter().enumerate() {
            if line.chars().count() != width {
                return Err(GridError::Parse(format!(
                    "row {r} has width {}, expected {width}",
                    line.chars().count()
                )));
            }
            for (c, ch) in line.chars().enumerate() {
                let kind = CellKind::from_char(ch).ok_or_else(|| {
                    GridError::Parse(format!("unknown map glyph {ch:?} at row {r}, col {c}"))
                })?;
                builder.set(Cell::new(r as u32, c as u32), kind)?;
            }
        }
        Ok(builder.build())
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    #[inline]
    pub fn rows(&self) -> u32 {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> u32 {
        self.cols
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    // ── Coordinates ───────────────────────────────────────────────────────

    #[inline]
    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    /// Row-major id of `cell`, or `None` if it lies outside the grid.
    #[inline]
    pub fn cell_id(&self, cell: Cell) -> Option<CellId> {
        self.in_bounds(cell)
            .then(|| CellId(cell.row * self.cols + cell.col))
    }

    /// Inverse of [`cell_id`](Self::cell_id).
    #[inline]
    pub fn cell_at(&self, id: CellId) -> Cell {
        Cell::new(id.0 / self.cols, id.0 % self.cols)
    }

    /// Classification of `cell`, or `None` if out of bounds.
    #[inline]
    pub fn kind(&self, cell: Cell) -> Option<CellKind> {
        self.cell_id(cell).map(|id| self.cells[id.index()])
    }

    /// `true` if `cell` is out of bounds or persistently blocked.
    #[inline]
    pub fn is_blocked(&self, cell: Cell) -> bool {
        self.kind(cell).is_none_or(CellKind::is_blocked)
    }

    /// All cells with their classification, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (Cell, CellKind)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &kind)| (self.cell_at(CellId(i as u32)), kind))
    }

    pub fn blocked_count(&self) -> usize {
        self.cells.iter().filter(|k| k.is_blocked()).count()
    }
}

impl fmt::Display for Grid {
    /// Draws the grid in the same glyphs [`Grid::from_ascii`] accepts.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.cols as usize) {
            for kind in row {
                write!(f, "{}", kind.as_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn checked_cell_count(rows: u32, cols: u32) -> GridResult<usize> {
    let count = (rows as u64) * (cols as u64);
    if rows == 0 || cols == 0 || count >= u32::MAX as u64 {
        return Err(GridError::InvalidDimensions { rows, cols });
    }
    Ok(count as usize)
}

// ── GridBuilder ───────────────────────────────────────────────────────────────

/// Construct a [`Grid`] cell by cell, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use fleet_core::Cell;
/// use fleet_grid::{CellKind, GridBuilder};
///
/// let mut b = GridBuilder::new(3, 3).unwrap();
/// b.block(Cell::new(1, 1)).unwrap();
/// b.mark_start(Cell::new(0, 0)).unwrap();
/// b.mark_goal(Cell::new(2, 2)).unwrap();
/// let grid = b.build();
/// assert_eq!(grid.kind(Cell::new(1, 1)), Some(CellKind::Blocked));
/// ```
#[derive(Clone, Debug)]
pub struct GridBuilder {
    rows:  u32,
    cols:  u32,
    cells: Vec<CellKind>,
}

impl GridBuilder {
    /// Start from an all-free grid.  Both dimensions must be positive and the
    /// cell count must fit a `CellId`.
    pub fn new(rows: u32, cols: u32) -> GridResult<Self> {
        let count = checked_cell_count(rows, cols)?;
        Ok(Self {
            rows,
            cols,
            cells: vec![CellKind::Free; count],
        })
    }

    /// Start from an existing grid, e.g. to mark agent endpoints on a
    /// generated map.
    pub fn from_grid(grid: Grid) -> Self {
        Self {
            rows:  grid.rows,
            cols:  grid.cols,
            cells: grid.cells,
        }
    }

    /// Overwrite the classification of `cell`.
    pub fn set(&mut self, cell: Cell, kind: CellKind) -> GridResult<()> {
        if cell.row >= self.rows || cell.col >= self.cols {
            return Err(GridError::OutOfBounds { cell, rows: self.rows, cols: self.cols });
        }
        let idx = (cell.row * self.cols + cell.col) as usize;
        self.cells[idx] = kind;
        Ok(())
    }

    pub fn block(&mut self, cell: Cell) -> GridResult<()> {
        self.set(cell, CellKind::Blocked)
    }

    /// Mark an agent's start cell.  Overrides any previous classification,
    /// including `Blocked`.
    pub fn mark_start(&mut self, cell: Cell) -> GridResult<()> {
        self.set(cell, CellKind::Start)
    }

    /// Mark an agent's goal cell.  Overrides any previous classification,
    /// including `Blocked`.
    pub fn mark_goal(&mut self, cell: Cell) -> GridResult<()> {
        self.set(cell, CellKind::Goal)
    }

    pub fn kind(&self, cell: Cell) -> Option<CellKind> {
        (cell.row < self.rows && cell.col < self.cols)
            .then(|| self.cells[(cell.row * self.cols + cell.col) as usize])
    }

    pub fn build(self) -> Grid {
        Grid {
            rows:  self.rows,
            cols:  self.cols,
            cells: self.cells,
        }
    }
}
