use thiserror::Error;

use fleet_core::{AgentId, Cell};
use fleet_grid::GridError;

/// Setup and loading errors for `fleet-agent`.
///
/// All variants are fatal for fleet setup; nothing here is raised once the
/// simulation is running.
#[derive(Debug, Error)]
pub enum AgentError {
    /// An agent's goal cannot be reached from its start on the static grid.
    #[error("agent {symbol} ({agent}): no initial path from {start} to {goal}")]
    NoInitialPath { agent: AgentId, symbol: char, start: Cell, goal: Cell },

    #[error("agent {agent}: endpoint {cell} is outside the grid")]
    OutOfBounds { agent: AgentId, cell: Cell },

    #[error("agent {agent}: endpoint {cell} is blocked")]
    BlockedEndpoint { agent: AgentId, cell: Cell },

    #[error("agent {agent}: start and goal are both {cell}")]
    StartIsGoal { agent: AgentId, cell: Cell },

    #[error("agents {first} and {second} share start cell {cell}")]
    SharedStart { first: AgentId, second: AgentId, cell: Cell },

    #[error("agents {first} and {second} share goal cell {cell}")]
    SharedGoal { first: AgentId, second: AgentId, cell: Cell },

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error("agent parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AgentResult<T> = Result<T, AgentError>;
