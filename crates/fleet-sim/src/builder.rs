//! Fluent builder for constructing a [`Simulation`].

use fleet_agent::{AgentSpec, AgentStoreBuilder, mark_endpoints};
use fleet_core::{Cell, FleetConfig, SimClock};
use fleet_grid::{DijkstraPathFinder, Grid, GridGraph, PathFinder};

use crate::arbiter::{ConflictArbiter, ReservationArbiter};
use crate::{SimResult, Simulation};

/// Fluent builder for [`Simulation<P, A>`].
///
/// # Required inputs
///
/// - [`FleetConfig`]: wait budgets, seed, driver guard
/// - [`Grid`]: the static map
///
/// # Optional inputs (have defaults)
///
/// | Method             | Default                              |
/// |--------------------|--------------------------------------|
/// | `.agent(spec)`     | no agents                            |
/// | `.path_finder(p)`  | [`DijkstraPathFinder`]               |
/// | `.arbiter(a)`      | [`ReservationArbiter`] (ascending id)|
///
/// # Example
///
/// ```rust
/// use fleet_core::{Cell, FleetConfig};
/// use fleet_grid::Grid;
/// use fleet_sim::{NoopObserver, SimBuilder};
///
/// let mut sim = SimBuilder::new(FleetConfig::default(), Grid::open(5, 5).unwrap())
///     .agent_at(Cell::new(0, 0), Cell::new(4, 4))
///     .agent_at(Cell::new(0, 4), Cell::new(4, 0))
///     .build()
///     .unwrap();
/// let ticks = sim.run(&mut NoopObserver).unwrap();
/// assert!(ticks.0 >= 8);
/// ```
pub struct SimBuilder<P: PathFinder, A: ConflictArbiter> {
    config:  FleetConfig,
    grid:    Grid,
    specs:   Vec<AgentSpec>,
    finder:  P,
    arbiter: A,
}

impl SimBuilder<DijkstraPathFinder, ReservationArbiter> {
    /// Create a builder with the default path finder and arbiter.
    pub fn new(config: FleetConfig, grid: Grid) -> Self {
        Self {
            config,
            grid,
            specs:   Vec::new(),
            finder:  DijkstraPathFinder,
            arbiter: ReservationArbiter::default(),
        }
    }
}

impl<P: PathFinder, A: ConflictArbiter> SimBuilder<P, A> {
    /// Add one agent.  Ids are assigned in the order agents are added.
    pub fn agent(mut self, spec: AgentSpec) -> Self {
        self.specs.push(spec);
        self
    }

    /// Add one agent with the default symbol.
    pub fn agent_at(self, start: Cell, goal: Cell) -> Self {
        self.agent(AgentSpec::new(start, goal))
    }

    /// Add agents, e.g. from [`fleet_agent::load_agents_csv`].
    pub fn agents(mut self, specs: impl IntoIterator<Item = AgentSpec>) -> Self {
        self.specs.extend(specs);
        self
    }

    /// Replace the path finder.
    pub fn path_finder<P2: PathFinder>(self, finder: P2) -> SimBuilder<P2, A> {
        SimBuilder {
            config:  self.config,
            grid:    self.grid,
            specs:   self.specs,
            finder,
            arbiter: self.arbiter,
        }
    }

    /// Replace the conflict arbiter.
    pub fn arbiter<A2: ConflictArbiter>(self, arbiter: A2) -> SimBuilder<P, A2> {
        SimBuilder {
            config:  self.config,
            grid:    self.grid,
            specs:   self.specs,
            finder:  self.finder,
            arbiter,
        }
    }

    /// Validate the configuration and the fleet, compute every initial path,
    /// and return a ready-to-run [`Simulation`].
    ///
    /// Any agent whose goal is unreachable fails the whole setup with
    /// [`AgentError::NoInitialPath`](fleet_agent::AgentError::NoInitialPath).
    pub fn build(self) -> SimResult<Simulation<P, A>> {
        self.config.validate()?;

        let graph = GridGraph::from_grid(&self.grid);
        let agents = AgentStoreBuilder::new()
            .extend(self.specs.iter().copied())
            .build(&graph, &self.finder)?;

        // Endpoints are open cells, so marking them leaves `graph` valid.
        let grid = mark_endpoints(self.grid, &self.specs)?;

        tracing::debug!(
            rows = grid.rows(),
            cols = grid.cols(),
            blocked = grid.blocked_count(),
            agents = agents.count,
            "simulation built"
        );

        Ok(Simulation {
            config:  self.config,
            clock:   SimClock::new(),
            grid,
            graph,
            agents,
            finder:  self.finder,
            arbiter: self.arbiter,
        })
    }
}
