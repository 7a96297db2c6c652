//! `fleet-sim`: tick loop orchestrator for the rust_fleet engine.
//!
//! # Seven-phase tick
//!
//! ```text
//! tick += 1
//!   ① Replan      Replanning agents search from their position
//!                 (parallel with the `parallel` feature).
//!   ② Wait        Waiting agents count down; at zero they resume.
//!   ③ Intents     next path cell for Moving agents, current cell otherwise.
//!   ④ Arbitrate   ConflictArbiter rules on every intent (ascending id).
//!   ⑤ Apply       allowed agents advance; denied agents wait.
//!   ⑥ Arrive      agents on their goal become Reached.
//!   ⑦ Settle      settled = every agent Reached.
//! ```
//!
//! At the end of every tick no two agents share a cell and no two agents
//! have exchanged cells.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the replanning searches on Rayon's thread pool.   |
//! | `fx-hash`  | FxHash for the per-tick reservation table.             |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use fleet_core::FleetConfig;
//! use fleet_grid::Grid;
//! use fleet_sim::{NoopObserver, SimBuilder};
//!
//! let grid = Grid::from_ascii(MAP)?;
//! let specs = fleet_agent::load_agents_csv(path)?;
//! let mut sim = SimBuilder::new(FleetConfig::default(), grid)
//!     .agents(specs)
//!     .build()?;
//! let ticks = sim.run(&mut NoopObserver)?;
//! ```

pub mod arbiter;
pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;


pub use arbiter::{
    ArbitrationOrder, ConflictArbiter, DenyReason, Intent, ReservationArbiter, ReservationTable,
    Ruling, Verdict,
};
pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::{Simulation, TickOutcome};
