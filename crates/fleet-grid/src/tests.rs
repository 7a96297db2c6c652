//! Unit tests for fleet-grid.
//!
//! All fixtures are hand-drawn ASCII maps or open grids.

#[cfg(test)]
mod helpers {
    use std::collections::VecDeque;

    use fleet_core::Cell;

    use crate::GridGraph;

    /// Reference breadth-first distance, independent of the CSR traversal
    /// order used by the path finder.
    pub fn bfs_distance(graph: &GridGraph, start: Cell, goal: Cell) -> Option<usize> {
        if !graph.is_open(start) || !graph.is_open(goal) {
            return None;
        }
        let mut dist = vec![usize::MAX; graph.node_count()];
        let s = graph.cell_id(start)?;
        dist[s.index()] = 0;
        let mut queue = VecDeque::from([s]);
        while let Some(n) = queue.pop_front() {
            for &m in graph.neighbors(n) {
                if dist[m.index()] == usize::MAX {
                    dist[m.index()] = dist[n.index()] + 1;
                    queue.push_back(m);
                }
            }
        }
        let d = dist[graph.cell_id(goal)?.index()];
        (d != usize::MAX).then_some(d)
    }

    pub fn assert_well_formed(path: &crate::Path, start: Cell, goal: Cell) {
        assert_eq!(path.start(), start);
        assert_eq!(path.goal(), goal);
        for w in path.cells().windows(2) {
            assert!(w[0].is_adjacent(w[1]), "{} -> {} is not a single step", w[0], w[1]);
        }
    }
}

// ── Grid & builder ────────────────────────────────────────────────────────────

#[cfg(test)]
mod grid {
    use fleet_core::{Cell, CellId};

    use crate::{CellKind, Grid, GridBuilder, GridError};

    #[test]
    fn from_cells_checks_shape() {
        let kinds = vec![CellKind::Free, CellKind::Blocked, CellKind::Free, CellKind::Goal];
        let grid = Grid::from_cells(2, 2, kinds).unwrap();
        assert_eq!(grid.kind(Cell::new(0, 1)), Some(CellKind::Blocked));
        assert_eq!(grid.kind(Cell::new(1, 1)), Some(CellKind::Goal));

        let short = Grid::from_cells(2, 2, vec![CellKind::Free; 3]);
        assert!(matches!(short, Err(GridError::Parse(_))));
        assert_eq!(
            Grid::from_cells(0, 2, Vec::new()).unwrap_err(),
            GridError::InvalidDimensions { rows: 0, cols: 2 }
        );
    }

    #[test]
    fn zero_dimensions_rejected() {
        assert_eq!(
            GridBuilder::new(0, 5).unwrap_err(),
            GridError::InvalidDimensions { rows: 0, cols: 5 }
        );
        assert!(Grid::open(5, 0).is_err());
    }

    #[test]
    fn cell_id_is_row_major() {
        let grid = Grid::open(3, 4).unwrap();
        assert_eq!(grid.cell_id(Cell::new(0, 0)), Some(CellId(0)));
        assert_eq!(grid.cell_id(Cell::new(1, 2)), Some(CellId(6)));
        assert_eq!(grid.cell_id(Cell::new(3, 0)), None);
        assert_eq!(grid.cell_at(CellId(11)), Cell::new(2, 3));
    }

    #[test]
    fn out_of_bounds_counts_as_blocked() {
        let grid = Grid::open(2, 2).unwrap();
        assert!(!grid.is_blocked(Cell::new(1, 1)));
        assert!(grid.is_blocked(Cell::new(2, 0)));
        assert_eq!(grid.kind(Cell::new(0, 9)), None);
    }

    #[test]
    fn builder_rejects_out_of_bounds() {
        let mut b = GridBuilder::new(2, 2).unwrap();
        let err = b.block(Cell::new(2, 2)).unwrap_err();
        assert!(matches!(err, GridError::OutOfBounds { rows: 2, cols: 2, .. }));
    }

    #[test]
    fn markers_override_obstacles() {
        let mut b = GridBuilder::new(1, 3).unwrap();
        b.block(Cell::new(0, 0)).unwrap();
        b.block(Cell::new(0, 2)).unwrap();
        b.mark_start(Cell::new(0, 0)).unwrap();
        b.mark_goal(Cell::new(0, 2)).unwrap();
        let grid = b.build();
        assert_eq!(grid.kind(Cell::new(0, 0)), Some(CellKind::Start));
        assert_eq!(grid.kind(Cell::new(0, 2)), Some(CellKind::Goal));
        assert_eq!(grid.blocked_count(), 0);
    }

    #[test]
    fn ascii_parse() {
        let grid = Grid::from_ascii(
            "
            S.#.
            .##G
            ",
        )
        .unwrap();
        assert_eq!((grid.rows(), grid.cols()), (2, 4));
        assert_eq!(grid.kind(Cell::new(0, 0)), Some(CellKind::Start));
        assert_eq!(grid.kind(Cell::new(1, 3)), Some(CellKind::Goal));
        assert_eq!(grid.blocked_count(), 3);
    }

    #[test]
    fn ascii_display_matches_input() {
        let map = "S.#.\n.##G\n";
        assert_eq!(Grid::from_ascii(map).unwrap().to_string(), map);
    }

    #[test]
    fn ascii_ragged_rows_rejected() {
        let err = Grid::from_ascii("...\n..\n").unwrap_err();
        assert!(matches!(err, GridError::Parse(_)));
    }

    #[test]
    fn ascii_unknown_glyph_rejected() {
        assert!(matches!(Grid::from_ascii("..x\n"), Err(GridError::Parse(_))));
    }

    #[test]
    fn ascii_empty_map_rejected() {
        assert!(matches!(
            Grid::from_ascii("\n  \n"),
            Err(GridError::InvalidDimensions { rows: 0, cols: 0 })
        ));
    }
}

// ── GridGraph ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod graph {
    use std::collections::HashSet;

    use fleet_core::Cell;

    use crate::{Grid, GridGraph};

    #[test]
    fn open_grid_degrees() {
        let grid = Grid::open(3, 3).unwrap();
        let g = GridGraph::from_grid(&grid);
        let id = |r, c| g.cell_id(Cell::new(r, c)).unwrap();
        assert_eq!(g.out_degree(id(0, 0)), 2, "corner");
        assert_eq!(g.out_degree(id(0, 1)), 3, "edge");
        assert_eq!(g.out_degree(id(1, 1)), 4, "centre");
        // 12 undirected adjacencies in a 3x3 grid.
        assert_eq!(g.edge_count(), 24);
    }

    #[test]
    fn neighbor_order_is_east_south_west_north() {
        let grid = Grid::open(3, 3).unwrap();
        let g = GridGraph::from_grid(&grid);
        let centre = g.cell_id(Cell::new(1, 1)).unwrap();
        let cells: Vec<Cell> = g.neighbors(centre).iter().map(|&n| g.cell_at(n)).collect();
        assert_eq!(
            cells,
            vec![Cell::new(1, 2), Cell::new(2, 1), Cell::new(1, 0), Cell::new(0, 1)]
        );
    }

    #[test]
    fn blocked_cells_are_isolated() {
        let grid = Grid::from_ascii(".#.\n...\n").unwrap();
        let g = GridGraph::from_grid(&grid);
        let wall = g.cell_id(Cell::new(0, 1)).unwrap();
        assert!(!g.is_open(Cell::new(0, 1)));
        assert_eq!(g.out_degree(wall), 0);
        for n in 0..g.node_count() {
            let node = fleet_core::CellId(n as u32);
            assert!(!g.neighbors(node).contains(&wall), "edge into a wall");
        }
    }

    #[test]
    fn transient_obstacles_remove_edges() {
        let grid = Grid::open(2, 2).unwrap();
        let transient = HashSet::from([Cell::new(0, 1)]);
        let g = GridGraph::build(&grid, &transient);
        assert!(!g.is_open(Cell::new(0, 1)));
        assert_eq!(g.edge_count(), 4);
        // The grid itself is untouched.
        assert!(!grid.is_blocked(Cell::new(0, 1)));
    }

    #[test]
    fn transient_out_of_bounds_ignored() {
        let grid = Grid::open(2, 2).unwrap();
        let transient = HashSet::from([Cell::new(7, 7)]);
        assert_eq!(GridGraph::build(&grid, &transient), GridGraph::from_grid(&grid));
    }

    #[test]
    fn build_is_idempotent() {
        let grid = Grid::from_ascii(
            "
            ..#..
            .#...
            ...#.
            ",
        )
        .unwrap();
        let transient = HashSet::from([Cell::new(2, 0)]);
        assert_eq!(GridGraph::build(&grid, &transient), GridGraph::build(&grid, &transient));
    }
}

// ── PathFinder ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod pathfinder {
    use std::collections::HashSet;

    use fleet_core::{Cell, SimRng};

    use super::helpers::{assert_well_formed, bfs_distance};
    use crate::{random_grid, DijkstraPathFinder, Grid, GridError, GridGraph, Path, PathFinder};

    #[test]
    fn trivial_path() {
        let grid = Grid::open(3, 3).unwrap();
        let g = GridGraph::from_grid(&grid);
        let p = DijkstraPathFinder.shortest_path(&g, Cell::new(1, 1), Cell::new(1, 1)).unwrap();
        assert!(p.is_trivial());
        assert_eq!(p.steps(), 0);
    }

    #[test]
    fn open_grid_prefers_east_then_south() {
        let grid = Grid::open(5, 5).unwrap();
        let g = GridGraph::from_grid(&grid);
        let p = DijkstraPathFinder.shortest_path(&g, Cell::new(0, 0), Cell::new(4, 4)).unwrap();
        let expected: Vec<Cell> = (0..5)
            .map(|c| Cell::new(0, c))
            .chain((1..5).map(|r| Cell::new(r, 4)))
            .collect();
        assert_eq!(p.cells(), expected.as_slice());

        let p = DijkstraPathFinder.shortest_path(&g, Cell::new(0, 4), Cell::new(4, 0)).unwrap();
        let expected: Vec<Cell> = (0..5)
            .map(|r| Cell::new(r, 4))
            .chain((0..4).rev().map(|c| Cell::new(4, c)))
            .collect();
        assert_eq!(p.cells(), expected.as_slice());
    }

    #[test]
    fn detours_around_wall() {
        let grid = Grid::from_ascii(
            "
            ...
            .#.
            ...
            ",
        )
        .unwrap();
        let g = GridGraph::from_grid(&grid);
        let p = DijkstraPathFinder.shortest_path(&g, Cell::new(0, 0), Cell::new(2, 2)).unwrap();
        assert_eq!(
            p.cells(),
            &[Cell::new(0, 0), Cell::new(0, 1), Cell::new(0, 2), Cell::new(1, 2), Cell::new(2, 2)]
        );
    }

    #[test]
    fn walled_in_is_unreachable() {
        let grid = Grid::from_ascii(
            "
            .#..
            #...
            ....
            ",
        )
        .unwrap();
        let g = GridGraph::from_grid(&grid);
        let err = DijkstraPathFinder
            .shortest_path(&g, Cell::new(0, 0), Cell::new(2, 3))
            .unwrap_err();
        assert_eq!(err, GridError::Unreachable { from: Cell::new(0, 0), to: Cell::new(2, 3) });
    }

    #[test]
    fn invalid_endpoints_are_unreachable() {
        let grid = Grid::from_ascii("..#\n").unwrap();
        let g = GridGraph::from_grid(&grid);
        let pf = DijkstraPathFinder;
        assert!(pf.shortest_path(&g, Cell::new(0, 0), Cell::new(0, 2)).is_err(), "blocked goal");
        assert!(pf.shortest_path(&g, Cell::new(0, 2), Cell::new(0, 0)).is_err(), "blocked start");
        assert!(pf.shortest_path(&g, Cell::new(0, 0), Cell::new(5, 5)).is_err(), "out of bounds");
        assert!(pf.shortest_path(&g, Cell::new(0, 2), Cell::new(0, 2)).is_err(), "blocked self");
    }

    #[test]
    fn transient_obstacles_force_detour() {
        let grid = Grid::open(3, 3).unwrap();
        let base = GridGraph::from_grid(&grid);
        let pf = DijkstraPathFinder;

        let direct = pf
            .shortest_path_avoiding(&grid, &base, Cell::new(0, 0), Cell::new(0, 2), &HashSet::new())
            .unwrap();
        assert_eq!(direct.steps(), 2);

        let transient = HashSet::from([Cell::new(0, 1)]);
        let detour = pf
            .shortest_path_avoiding(&grid, &base, Cell::new(0, 0), Cell::new(0, 2), &transient)
            .unwrap();
        assert_eq!(detour.steps(), 4);
        assert!(!detour.cells().contains(&Cell::new(0, 1)));
    }

    #[test]
    fn transient_goal_is_unreachable() {
        let grid = Grid::open(3, 3).unwrap();
        let base = GridGraph::from_grid(&grid);
        let transient = HashSet::from([Cell::new(2, 2)]);
        let res = DijkstraPathFinder.shortest_path_avoiding(
            &grid,
            &base,
            Cell::new(0, 0),
            Cell::new(2, 2),
            &transient,
        );
        assert!(matches!(res, Err(GridError::Unreachable { .. })));
    }

    #[test]
    fn matches_bfs_on_random_maps() {
        let mut rng = SimRng::new(7);
        let pf = DijkstraPathFinder;
        for _ in 0..20 {
            let grid = random_grid(9, 11, 0.3, &mut rng).unwrap();
            let g = GridGraph::from_grid(&grid);
            for _ in 0..10 {
                let s = Cell::new(rng.gen_range(0..9), rng.gen_range(0..11));
                let t = Cell::new(rng.gen_range(0..9), rng.gen_range(0..11));
                match (pf.shortest_path(&g, s, t), bfs_distance(&g, s, t)) {
                    (Ok(p), Some(d)) => {
                        assert_eq!(p.steps(), d, "{s} -> {t}");
                        assert_well_formed(&p, s, t);
                        assert!(p.cells().iter().all(|&c| g.is_open(c)));
                    }
                    (Err(GridError::Unreachable { .. }), None) => {}
                    (res, d) => panic!("{s} -> {t}: finder {res:?}, bfs {d:?}"),
                }
            }
        }
    }

    #[test]
    fn repeated_queries_agree() {
        let grid = random_grid(12, 12, 0.2, &mut SimRng::new(3)).unwrap();
        let g = GridGraph::from_grid(&grid);
        let a = DijkstraPathFinder.shortest_path(&g, Cell::new(0, 0), Cell::new(11, 11));
        let b = DijkstraPathFinder.shortest_path(&g, Cell::new(0, 0), Cell::new(11, 11));
        assert_eq!(a, b);
    }

    #[test]
    fn path_try_from_reports_the_broken_step() {
        assert_eq!(Path::try_from(Vec::new()).unwrap_err(), GridError::Parse("empty path".into()));
        let err = Path::try_from(vec![Cell::new(0, 0), Cell::new(0, 1), Cell::new(2, 1)]).unwrap_err();
        assert!(matches!(err, GridError::Parse(msg) if msg.contains("(0, 1)") && msg.contains("(2, 1)")));
        let cells = vec![Cell::new(0, 0), Cell::new(1, 0)];
        assert_eq!(Vec::<Cell>::from(Path::try_from(cells.clone()).unwrap()), cells);
    }

    #[test]
    fn path_from_cells_validates_adjacency() {
        assert!(Path::from_cells(vec![]).is_none());
        assert!(Path::from_cells(vec![Cell::new(0, 0), Cell::new(1, 1)]).is_none());
        let p = Path::from_cells(vec![Cell::new(0, 0), Cell::new(0, 1)]).unwrap();
        assert_eq!(p.get(1), Some(Cell::new(0, 1)));
        assert_eq!(p.get(2), None);
    }
}

// ── Generator ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod generate {
    use fleet_core::SimRng;

    use crate::{random_grid, DEFAULT_OBSTACLE_DENSITY};

    #[test]
    fn same_seed_same_map() {
        let a = random_grid(10, 10, DEFAULT_OBSTACLE_DENSITY, &mut SimRng::new(42)).unwrap();
        let b = random_grid(10, 10, DEFAULT_OBSTACLE_DENSITY, &mut SimRng::new(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn blocked_count_bounded_by_draws() {
        let grid = random_grid(10, 10, DEFAULT_OBSTACLE_DENSITY, &mut SimRng::new(1)).unwrap();
        assert!(grid.blocked_count() <= 20);
        assert!(grid.blocked_count() > 0);
    }

    #[test]
    fn zero_density_is_open() {
        let grid = random_grid(4, 6, 0.0, &mut SimRng::new(9)).unwrap();
        assert_eq!(grid.blocked_count(), 0);
    }

    #[test]
    fn invalid_dimensions_propagate() {
        assert!(random_grid(0, 3, 0.5, &mut SimRng::new(0)).is_err());
    }
}

// ── Serde decoding ────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "serde"))]
mod serde_decoding {
    use fleet_core::Cell;

    use crate::{CellKind, Grid, Path};

    #[test]
    fn grid_survives_json() {
        let grid = Grid::from_ascii("S.#\n..G").unwrap();
        let json = serde_json::to_string(&grid).unwrap();
        assert_eq!(serde_json::from_str::<Grid>(&json).unwrap(), grid);
    }

    #[test]
    fn grid_with_wrong_cell_count_is_rejected() {
        let json = r#"{"rows":2,"cols":2,"cells":["Free","Free","Blocked"]}"#;
        let err = serde_json::from_str::<Grid>(json).unwrap_err();
        assert!(err.to_string().contains("needs 4 cells"), "{err}");
    }

    #[test]
    fn grid_with_zero_rows_is_rejected() {
        let json = r#"{"rows":0,"cols":3,"cells":[]}"#;
        assert!(serde_json::from_str::<Grid>(json).is_err());
    }

    #[test]
    fn path_is_a_bare_cell_list() {
        let path = Path::from_cells(vec![Cell::new(0, 0), Cell::new(0, 1)]).unwrap();
        let json = serde_json::to_string(&path).unwrap();
        assert!(json.starts_with('['), "{json}");
        assert_eq!(serde_json::from_str::<Path>(&json).unwrap(), path);
    }

    #[test]
    fn path_with_a_gap_is_rejected() {
        let json = r#"[{"row":0,"col":0},{"row":0,"col":2}]"#;
        let err = serde_json::from_str::<Path>(json).unwrap_err();
        assert!(err.to_string().contains("not adjacent"), "{err}");
        assert!(serde_json::from_str::<Path>("[]").is_err());
    }

    #[test]
    fn cell_kinds_keep_their_names() {
        let json = serde_json::to_string(&CellKind::Blocked).unwrap();
        assert_eq!(json, r#""Blocked""#);
    }
}
