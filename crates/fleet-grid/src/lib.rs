//! `fleet-grid`: occupancy grid, adjacency graph, and routing.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                   |
//! |----------------|------------------------------------------------------------|
//! | [`grid`]       | `Grid`, `CellKind`, `GridBuilder`, ASCII map parsing       |
//! | [`graph`]      | `GridGraph` (CSR adjacency over open cells)                |
//! | [`pathfinder`] | `PathFinder` trait, `Path`, `DijkstraPathFinder`           |
//! | [`generate`]   | `random_grid`: seeded obstacle placement                  |
//! | [`error`]      | `GridError`, `GridResult<T>`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod generate;
pub mod graph;
pub mod grid;
pub mod pathfinder;

#[cfg(test)]
mod tests;

pub use error::{GridError, GridResult};
pub use generate::{DEFAULT_OBSTACLE_DENSITY, random_grid};
pub use graph::GridGraph;
pub use grid::{CellKind, Grid, GridBuilder};
pub use pathfinder::{DijkstraPathFinder, Path, PathFinder};
