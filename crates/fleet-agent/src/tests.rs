//! Unit tests for fleet-agent.

#[cfg(test)]
mod helpers {
    use fleet_core::Cell;
    use fleet_grid::{DijkstraPathFinder, Grid, GridGraph};

    use crate::{AgentStore, AgentStoreBuilder};

    /// Two agents on an open 5×5 grid: A (0,0)→(4,4), B (0,4)→(4,0).
    pub fn two_agents() -> AgentStore {
        let grid = Grid::open(5, 5).unwrap();
        let graph = GridGraph::from_grid(&grid);
        AgentStoreBuilder::new()
            .add_agent(Cell::new(0, 0), Cell::new(4, 4))
            .add_agent(Cell::new(0, 4), Cell::new(4, 0))
            .build(&graph, &DijkstraPathFinder)
            .unwrap()
    }
}

// ── Builder & validation ──────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use fleet_core::{AgentId, Cell};
    use fleet_grid::{DijkstraPathFinder, Grid, GridGraph};

    use crate::{AgentError, AgentSpec, AgentState, AgentStoreBuilder, default_symbol};

    fn graph(map: &str) -> GridGraph {
        GridGraph::from_grid(&Grid::from_ascii(map).unwrap())
    }

    #[test]
    fn initial_state() {
        let store = super::helpers::two_agents();
        assert_eq!(store.count, 2);
        assert_eq!(store.symbol, vec!['A', 'B']);
        assert_eq!(store.position, vec![Cell::new(0, 0), Cell::new(0, 4)]);
        assert!(store.state.iter().all(|&s| s == AgentState::Moving));
        assert_eq!(store.path[0].as_ref().unwrap().steps(), 8);
        assert_eq!(store.step, vec![0, 0]);
    }

    #[test]
    fn explicit_symbol_kept() {
        let g = graph("...\n");
        let store = AgentStoreBuilder::new()
            .add(AgentSpec::new(Cell::new(0, 0), Cell::new(0, 2)).with_symbol('x'))
            .build(&g, &DijkstraPathFinder)
            .unwrap();
        assert_eq!(store.symbol, vec!['x']);
    }

    #[test]
    fn default_symbols() {
        assert_eq!(default_symbol(0), 'A');
        assert_eq!(default_symbol(25), 'Z');
        assert_eq!(default_symbol(26), 'a');
        assert_eq!(default_symbol(52), '0');
        assert_eq!(default_symbol(1_000), '?');
    }

    #[test]
    fn walled_in_agent_has_no_initial_path() {
        let g = graph(
            "
            .#..
            #...
            ....
            ",
        );
        let err = AgentStoreBuilder::new()
            .add_agent(Cell::new(0, 0), Cell::new(2, 3))
            .build(&g, &DijkstraPathFinder)
            .unwrap_err();
        match err {
            AgentError::NoInitialPath { agent, symbol, start, goal } => {
                assert_eq!(agent, AgentId(0));
                assert_eq!(symbol, 'A');
                assert_eq!(start, Cell::new(0, 0));
                assert_eq!(goal, Cell::new(2, 3));
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert!(
            AgentStoreBuilder::new()
                .add_agent(Cell::new(0, 0), Cell::new(2, 3))
                .build(&g, &DijkstraPathFinder)
                .unwrap_err()
                .to_string()
                .contains("no initial path")
        );
    }

    #[test]
    fn endpoint_checks() {
        let g = graph("..#\n...\n");
        let build = |start, goal| {
            AgentStoreBuilder::new()
                .add_agent(start, goal)
                .build(&g, &DijkstraPathFinder)
                .unwrap_err()
        };
        assert!(matches!(build(Cell::new(0, 0), Cell::new(9, 9)), AgentError::OutOfBounds { .. }));
        assert!(matches!(build(Cell::new(0, 0), Cell::new(0, 2)), AgentError::BlockedEndpoint { .. }));
        assert!(matches!(build(Cell::new(1, 1), Cell::new(1, 1)), AgentError::StartIsGoal { .. }));
    }

    #[test]
    fn shared_endpoints_rejected() {
        let g = graph("....\n....\n");
        let err = AgentStoreBuilder::new()
            .add_agent(Cell::new(0, 0), Cell::new(1, 3))
            .add_agent(Cell::new(0, 0), Cell::new(1, 2))
            .build(&g, &DijkstraPathFinder)
            .unwrap_err();
        assert!(matches!(
            err,
            AgentError::SharedStart { first: AgentId(0), second: AgentId(1), .. }
        ));

        let err = AgentStoreBuilder::new()
            .add_agent(Cell::new(0, 0), Cell::new(1, 3))
            .add_agent(Cell::new(0, 1), Cell::new(1, 3))
            .build(&g, &DijkstraPathFinder)
            .unwrap_err();
        assert!(matches!(err, AgentError::SharedGoal { .. }));
    }

    #[test]
    fn empty_fleet_builds() {
        let g = graph("..\n");
        let store = AgentStoreBuilder::new().build(&g, &DijkstraPathFinder).unwrap();
        assert!(store.is_empty());
        assert!(store.all_reached());
    }

    #[test]
    fn mark_endpoints_clears_obstacles() {
        let grid = Grid::from_ascii("#.#\n").unwrap();
        let specs = [AgentSpec::new(Cell::new(0, 0), Cell::new(0, 2))];
        let marked = crate::mark_endpoints(grid, &specs).unwrap();
        assert_eq!(marked.to_string(), "S.G\n");

        let bad = [AgentSpec::new(Cell::new(0, 0), Cell::new(4, 4))];
        let grid = Grid::open(1, 3).unwrap();
        assert!(matches!(
            crate::mark_endpoints(grid, &bad),
            Err(AgentError::OutOfBounds { .. })
        ));
    }
}

// ── State transitions ─────────────────────────────────────────────────────────

#[cfg(test)]
mod transitions {
    use fleet_core::{AgentId, Cell};
    use fleet_grid::{GridError, Path};

    use crate::AgentState;

    const A: AgentId = AgentId(0);
    const B: AgentId = AgentId(1);

    #[test]
    fn intent_and_advance() {
        let mut store = super::helpers::two_agents();
        assert_eq!(store.intent(A), Cell::new(0, 1));
        store.advance(A);
        assert_eq!(store.position[0], Cell::new(0, 1));
        assert_eq!(store.step[0], 1);
        assert_eq!(store.intent(A), Cell::new(0, 2));
    }

    #[test]
    fn non_moving_intent_is_current_cell() {
        let mut store = super::helpers::two_agents();
        store.deny(B, 1);
        assert_eq!(store.intent(B), Cell::new(0, 4));
    }

    #[test]
    fn denial_waits_then_resumes() {
        let mut store = super::helpers::two_agents();
        store.deny(A, 2);
        assert_eq!(store.state_of(A), AgentState::Waiting);
        assert_eq!(store.remaining_wait(A), 2);
        assert_eq!(store.tick_wait(A), None);
        assert_eq!(store.remaining_wait(A), 1);
        assert_eq!(store.tick_wait(A), Some(AgentState::Moving));
        assert_eq!(store.remaining_wait(A), 0);
    }

    #[test]
    fn tick_wait_ignores_other_states() {
        let mut store = super::helpers::two_agents();
        assert_eq!(store.tick_wait(A), None);
        assert_eq!(store.state_of(A), AgentState::Moving);
    }

    #[test]
    fn failed_replan_waits_then_replans() {
        let mut store = super::helpers::two_agents();
        assert!(store.begin_replan(A));
        let unreachable = Err(GridError::Unreachable { from: Cell::new(0, 0), to: Cell::new(4, 4) });
        assert!(!store.apply_route(A, unreachable, 3));
        assert_eq!(store.state_of(A), AgentState::Waiting);
        assert!(store.path[0].is_none());
        assert_eq!(store.intent(A), Cell::new(0, 0));

        store.tick_wait(A);
        store.tick_wait(A);
        assert_eq!(store.tick_wait(A), Some(AgentState::Replanning));
    }

    #[test]
    fn successful_replan_replaces_path() {
        let mut store = super::helpers::two_agents();
        store.advance(A);
        store.begin_replan(A);
        let path = Path::from_cells(vec![Cell::new(0, 1), Cell::new(1, 1)]).unwrap();
        assert!(store.apply_route(A, Ok(path.clone()), 10));
        assert_eq!(store.state_of(A), AgentState::Moving);
        assert_eq!(store.step[0], 0);
        assert_eq!(store.path[0].as_ref(), Some(&path));
        assert_eq!(store.intent(A), Cell::new(1, 1));
    }

    #[test]
    fn reached_is_terminal() {
        let mut store = super::helpers::two_agents();
        assert!(!store.mark_reached(A), "not at goal yet");
        for _ in 0..8 {
            store.advance(A);
        }
        assert_eq!(store.position[0], Cell::new(4, 4));
        assert!(store.mark_reached(A));
        assert!(!store.mark_reached(A), "only transitions once");
        assert!(!store.begin_replan(A));
        assert_eq!(store.state_of(A), AgentState::Reached);
        // Path exhausted: intent stays put even if state were Moving.
        assert_eq!(store.intent(A), Cell::new(4, 4));
        assert!(!store.all_reached());
        assert_eq!(store.count_in(AgentState::Reached), 1);
    }

    #[test]
    fn view_reports_wait_only_while_waiting() {
        let mut store = super::helpers::two_agents();
        store.deny(B, 4);
        let v = store.view(B);
        assert_eq!(v.symbol, 'B');
        assert_eq!(v.state, AgentState::Waiting);
        assert_eq!(v.wait_budget, 4);
        assert_eq!(store.view(A).wait_budget, 0);
        assert_eq!(store.views().count(), 2);
    }

    #[test]
    fn state_labels() {
        assert_eq!(AgentState::Moving.to_string(), "moving");
        assert_eq!(AgentState::Replanning.as_str(), "replanning");
        assert!(AgentState::Reached.is_terminal());
    }
}

// ── CSV loader ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::Cursor;

    use fleet_core::Cell;

    use crate::{AgentError, load_agents_reader};

    #[test]
    fn parse_rows() {
        let csv = "symbol,start_row,start_col,goal_row,goal_col\n\
                   A,0,0,4,4\n\
                   ,2, 0,2,4\n";
        let specs = load_agents_reader(Cursor::new(csv)).unwrap();
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].symbol, Some('A'));
        assert_eq!(specs[0].goal, Cell::new(4, 4));
        assert_eq!(specs[1].symbol, None);
        assert_eq!(specs[1].start, Cell::new(2, 0));
    }

    #[test]
    fn multi_char_symbol_rejected() {
        let csv = "symbol,start_row,start_col,goal_row,goal_col\nAB,0,0,1,1\n";
        assert!(matches!(load_agents_reader(Cursor::new(csv)), Err(AgentError::Parse(_))));
    }

    #[test]
    fn negative_coordinate_rejected() {
        let csv = "symbol,start_row,start_col,goal_row,goal_col\nA,-1,0,1,1\n";
        assert!(matches!(load_agents_reader(Cursor::new(csv)), Err(AgentError::Parse(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let res = crate::load_agents_csv(std::path::Path::new("/nonexistent/agents.csv"));
        assert!(matches!(res, Err(AgentError::Io(_))));
    }
}
