//! `fleet-core`: foundational types for the `rust_fleet` routing engine.
//!
//! This crate is a dependency of every other `fleet-*` crate.  It has no
//! `fleet-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `CellId`                                   |
//! | [`cell`]        | `Cell` (row, col), Manhattan distance, adjacency      |
//! | [`time`]        | `Tick`, `SimClock`, `FleetConfig`                     |
//! | [`rng`]         | `SimRng` (explicitly seeded)                          |
//! | [`error`]       | `FleetError`, `FleetResult`                           |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod cell;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use cell::Cell;
pub use error::{FleetError, FleetResult};
pub use ids::{AgentId, CellId};
pub use rng::SimRng;
pub use time::{FleetConfig, SimClock, Tick};
