//! `fleet-agent`: agent state and storage for the `rust_fleet` engine.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                    |
//! |---------------|-------------------------------------------------------------|
//! | [`state`]     | `AgentState` (moving / waiting / replanning / reached)      |
//! | [`store`]     | `AgentStore` (SoA arrays + state transitions), `AgentView`  |
//! | [`builder`]   | `AgentSpec`, `AgentStoreBuilder` (validation, initial paths)|
//! | [`loader`]    | `load_agents_csv`, `load_agents_reader`                     |
//! | [`error`]     | `AgentError`, `AgentResult<T>`                              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                      |
//! |---------|-------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.          |

pub mod builder;
pub mod error;
pub mod loader;
pub mod state;
pub mod store;

#[cfg(test)]
mod tests;

pub use builder::{AgentSpec, AgentStoreBuilder, default_symbol, mark_endpoints};
pub use error::{AgentError, AgentResult};
pub use loader::{load_agents_csv, load_agents_reader};
pub use state::AgentState;
pub use store::{AgentStore, AgentView};
