//! Fleet setup: endpoint validation and initial paths.
//!
//! # Usage
//!
//! ```rust
//! use fleet_core::Cell;
//! use fleet_grid::{DijkstraPathFinder, Grid, GridGraph};
//! use fleet_agent::AgentStoreBuilder;
//!
//! let grid  = Grid::open(5, 5).unwrap();
//! let graph = GridGraph::from_grid(&grid);
//!
//! let store = AgentStoreBuilder::new()
//!     .add_agent(Cell::new(0, 0), Cell::new(4, 4))
//!     .add_agent(Cell::new(0, 4), Cell::new(4, 0))
//!     .build(&graph, &DijkstraPathFinder)
//!     .unwrap();
//!
//! assert_eq!(store.count, 2);
//! assert_eq!(store.symbol, vec!['A', 'B']);
//! ```

use std::collections::HashMap;

use fleet_core::{AgentId, Cell};
use fleet_grid::{Grid, GridBuilder, GridError, GridGraph, PathFinder};

use crate::{AgentError, AgentResult, AgentStore};

// ── AgentSpec ─────────────────────────────────────────────────────────────────

/// One agent's setup request.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentSpec {
    /// Display symbol; `None` assigns [`default_symbol`] for the agent's id.
    pub symbol: Option<char>,
    pub start:  Cell,
    pub goal:   Cell,
}

impl AgentSpec {
    pub fn new(start: Cell, goal: Cell) -> Self {
        Self { symbol: None, start, goal }
    }

    pub fn with_symbol(mut self, symbol: char) -> Self {
        self.symbol = Some(symbol);
        self
    }
}

/// Symbol for the `index`-th agent: `A`–`Z`, then `a`–`z`, then `0`–`9`,
/// then `?` for everything beyond.
pub fn default_symbol(index: usize) -> char {
    const SYMBOLS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    SYMBOLS.get(index).map_or('?', |&b| b as char)
}

/// Mark every spec's start and goal on `grid` as `Start` / `Goal`.
///
/// Markers override obstacles, so this also clears any obstacle a random
/// generator dropped on an endpoint.
pub fn mark_endpoints(grid: Grid, specs: &[AgentSpec]) -> AgentResult<Grid> {
    let mut builder = GridBuilder::from_grid(grid);
    for (i, spec) in specs.iter().enumerate() {
        let agent = AgentId(i as u32);
        builder
            .mark_start(spec.start)
            .map_err(|_| AgentError::OutOfBounds { agent, cell: spec.start })?;
        builder
            .mark_goal(spec.goal)
            .map_err(|_| AgentError::OutOfBounds { agent, cell: spec.goal })?;
    }
    Ok(builder.build())
}

// ── AgentStoreBuilder ─────────────────────────────────────────────────────────

/// Fluent builder for [`AgentStore`].
///
/// Agents receive ids `0, 1, 2, …` in the order they are added.
#[derive(Clone, Debug, Default)]
pub struct AgentStoreBuilder {
    specs: Vec<AgentSpec>,
}

impl AgentStoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, spec: AgentSpec) -> Self {
        self.specs.push(spec);
        self
    }

    pub fn add_agent(self, start: Cell, goal: Cell) -> Self {
        self.add(AgentSpec::new(start, goal))
    }

    pub fn extend(mut self, specs: impl IntoIterator<Item = AgentSpec>) -> Self {
        self.specs.extend(specs);
        self
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Validate every spec against `graph` and compute initial paths.
    ///
    /// Checks run per agent in id order and the first failure is returned:
    /// endpoints in bounds, endpoints open, start ≠ goal, no start or goal
    /// shared with an earlier agent, then a path from start to goal.  An
    /// unreachable goal is [`AgentError::NoInitialPath`].
    pub fn build(self, graph: &GridGraph, finder: &dyn PathFinder) -> AgentResult<AgentStore> {
        let mut starts: HashMap<Cell, AgentId> = HashMap::with_capacity(self.specs.len());
        let mut goals:  HashMap<Cell, AgentId> = HashMap::with_capacity(self.specs.len());
        let mut symbols = Vec::with_capacity(self.specs.len());
        let mut paths   = Vec::with_capacity(self.specs.len());

        for (i, spec) in self.specs.iter().enumerate() {
            let agent = AgentId(i as u32);
            check_endpoint(graph, agent, spec.start)?;
            check_endpoint(graph, agent, spec.goal)?;
            if spec.start == spec.goal {
                return Err(AgentError::StartIsGoal { agent, cell: spec.start });
            }
            if let Some(&first) = starts.get(&spec.start) {
                return Err(AgentError::SharedStart { first, second: agent, cell: spec.start });
            }
            if let Some(&first) = goals.get(&spec.goal) {
                return Err(AgentError::SharedGoal { first, second: agent, cell: spec.goal });
            }
            starts.insert(spec.start, agent);
            goals.insert(spec.goal, agent);

            let symbol = spec.symbol.unwrap_or_else(|| default_symbol(i));
            let path = finder
                .shortest_path(graph, spec.start, spec.goal)
                .map_err(|e| match e {
                    GridError::Unreachable { from, to } => AgentError::NoInitialPath {
                        agent,
                        symbol,
                        start: from,
                        goal: to,
                    },
                    other => AgentError::Grid(other),
                })?;

            symbols.push(symbol);
            paths.push(path);
        }

        Ok(AgentStore::new(symbols, paths))
    }
}

fn check_endpoint(graph: &GridGraph, agent: AgentId, cell: Cell) -> AgentResult<()> {
    if graph.cell_id(cell).is_none() {
        Err(AgentError::OutOfBounds { agent, cell })
    } else if !graph.is_open(cell) {
        Err(AgentError::BlockedEndpoint { agent, cell })
    } else {
        Ok(())
    }
}
