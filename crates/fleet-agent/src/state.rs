//! The per-agent state machine's states.
//!
//! | From         | To           | Trigger                                         |
//! |--------------|--------------|-------------------------------------------------|
//! | `Moving`     | `Reached`    | position equals goal after a move               |
//! | `Moving`     | `Waiting`    | arbiter denial (short budget)                   |
//! | `Waiting`    | `Moving`     | budget reaches zero, path present               |
//! | `Waiting`    | `Replanning` | budget reaches zero, no path (failed replan)    |
//! | `Replanning` | `Moving`     | path found from current position                |
//! | `Replanning` | `Waiting`    | goal unreachable (long budget)                  |
//! | any but `Reached` | `Replanning` | external `request_replan`                  |
//!
//! `Reached` is terminal.

use std::fmt;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AgentState {
    #[default]
    Moving,
    Waiting,
    Replanning,
    Reached,
}

impl AgentState {
    /// Lower-case label used in status lines and output rows.
    pub fn as_str(self) -> &'static str {
        match self {
            AgentState::Moving     => "moving",
            AgentState::Waiting    => "waiting",
            AgentState::Replanning => "replanning",
            AgentState::Reached    => "reached",
        }
    }

    #[inline]
    pub fn is_terminal(self) -> bool {
        self == AgentState::Reached
    }
}

impl fmt::Display for AgentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
