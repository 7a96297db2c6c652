use fleet_agent::AgentError;
use fleet_core::{AgentId, FleetError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Core(#[from] FleetError),

    /// Fleet setup failed; the whole run is rejected.
    #[error("fleet setup failed: {0}")]
    Setup(#[from] AgentError),

    #[error("agent {0} has already reached its goal")]
    AlreadyReached(AgentId),

    /// The driver's `max_ticks` guard fired before every agent arrived.
    #[error("fleet did not settle within {ticks} ticks")]
    Stalled { ticks: u64 },
}

pub type SimResult<T> = Result<T, SimError>;
