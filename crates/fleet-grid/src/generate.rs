//! Seeded random obstacle placement.

use fleet_core::{Cell, SimRng};

use crate::grid::{CellKind, Grid, GridBuilder};
use crate::GridResult;

/// Fraction of cells that receive an obstacle draw: one in five.
pub const DEFAULT_OBSTACLE_DENSITY: f64 = 0.2;

/// Generate a `rows × cols` grid with randomly placed obstacles.
///
/// `floor(rows * cols * density)` cells are drawn uniformly **with
/// replacement**; a draw that lands on an already blocked cell adds nothing,
/// so the blocked count may fall short of the draw count.  `density` is
/// clamped to `[0, 1]`.
///
/// The result depends only on the dimensions, the density, and the state of
/// `rng`.  Agent endpoints are marked afterwards via
/// [`GridBuilder::from_grid`], which overrides any obstacle under them.
pub fn random_grid(rows: u32, cols: u32, density: f64, rng: &mut SimRng) -> GridResult<Grid> {
    let mut builder = GridBuilder::new(rows, cols)?;

    let draws = ((rows as f64) * (cols as f64) * density.clamp(0.0, 1.0)).floor() as u64;
    for _ in 0..draws {
        let cell = Cell::new(rng.gen_range(0..rows), rng.gen_range(0..cols));
        if builder.kind(cell) == Some(CellKind::Free) {
            builder.block(cell)?;
        }
    }

    Ok(builder.build())
}
