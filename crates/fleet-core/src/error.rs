//! Framework error type.
//!
//! Sub-crates define their own error enums (`GridError`, `AgentError`,
//! `SimError`, …) and wrap `FleetError` where a core failure can surface.

use thiserror::Error;

use crate::AgentId;

/// The top-level error type for `fleet-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum FleetError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `fleet-core`.
pub type FleetResult<T> = Result<T, FleetError>;
