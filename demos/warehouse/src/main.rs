//! warehouse: smallest example for the rust_fleet grid router.
//!
//! Six robots leave a staging area on the west side of a shelved warehouse
//! floor and drive to loading bays along the south wall.  Every bay is a
//! dead-end pocket, so a robot parked on its goal never blocks another
//! robot's route.
//!
//! ```text
//! warehouse                      embedded map + embedded fleet
//! warehouse agents.csv           embedded map + fleet loaded from CSV
//! warehouse --random ROWS COLS   seeded random obstacles + embedded fleet
//! ```
//!
//! Set `RUST_LOG=debug` to see every denial and replan.

use std::io::Cursor;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use tracing::info;
use tracing_subscriber::EnvFilter;

use fleet_agent::{AgentSpec, AgentStore, load_agents_csv, load_agents_reader, mark_endpoints};
use fleet_core::{FleetConfig, SimRng, Tick};
use fleet_grid::{DEFAULT_OBSTACLE_DENSITY, Grid, random_grid};
use fleet_output::{CsvWriter, OutputWriter, SimOutputObserver, render_frame};
use fleet_sim::{SimBuilder, SimObserver, TickOutcome};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:                  u64 = 42;
const MAX_TICKS:             u64 = 500;
const OUTPUT_INTERVAL_TICKS: u64 = 1;   // snapshot every tick
const OUTPUT_DIR:            &str = "output/warehouse";

// ── Floor plan ────────────────────────────────────────────────────────────────

// Rows 0, 3 and 6 are cross aisles; row 7 holds the loading bays.
const WAREHOUSE_MAP: &str = "\
................
.###.###.###.##.
.###.###.###.##.
................
.###.###.###.##.
.###.###.###.##.
................
#.#.#.#.#.#.#.#.
";

const AGENTS_CSV: &str = "\
symbol,start_row,start_col,goal_row,goal_col
A,0,0,7,15
B,3,0,7,11
C,0,4,7,7
D,6,0,7,3
E,0,8,7,13
F,3,4,7,9
";

// ── Observer wrapper that prints frames ──────────────────────────────────────

struct FrameObserver<W: OutputWriter> {
    inner:         SimOutputObserver<W>,
    denied:        usize,
    snapshot_rows: usize,
    summary_rows:  usize,
}

impl<W: OutputWriter> FrameObserver<W> {
    fn new(inner: SimOutputObserver<W>) -> Self {
        Self { inner, denied: 0, snapshot_rows: 0, summary_rows: 0 }
    }
}

impl<W: OutputWriter> SimObserver for FrameObserver<W> {
    fn on_tick_end(&mut self, tick: Tick, outcome: &TickOutcome) {
        self.denied += outcome.denied;
        self.summary_rows += 1;
        self.inner.on_tick_end(tick, outcome);
    }

    fn on_snapshot(&mut self, tick: Tick, grid: &Grid, agents: &AgentStore) {
        println!("{}", render_frame(grid, agents, tick));
        self.snapshot_rows += agents.count;
        self.inner.on_snapshot(tick, grid, agents);
    }

    fn on_settled(&mut self, final_tick: Tick) {
        self.inner.on_settled(final_tick);
    }
}

// ── Command line ──────────────────────────────────────────────────────────────

enum Floor {
    Embedded,
    Random { rows: u32, cols: u32 },
}

struct Args {
    floor:      Floor,
    agents_csv: Option<String>,
}

fn parse_args() -> Result<Args> {
    let mut args = std::env::args().skip(1);
    let mut parsed = Args { floor: Floor::Embedded, agents_csv: None };

    while let Some(arg) = args.next() {
        if arg == "--random" {
            let rows = args.next().context("--random needs ROWS COLS")?;
            let cols = args.next().context("--random needs ROWS COLS")?;
            parsed.floor = Floor::Random {
                rows: rows.parse().with_context(|| format!("bad row count {rows:?}"))?,
                cols: cols.parse().with_context(|| format!("bad column count {cols:?}"))?,
            };
        } else if arg.starts_with("--") {
            bail!("unknown flag {arg}");
        } else {
            parsed.agents_csv = Some(arg);
        }
    }
    Ok(parsed)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = parse_args()?;

    println!("=== warehouse: rust_fleet grid router ===");
    println!("Seed: {SEED}  |  Tick guard: {MAX_TICKS}");
    println!();

    // 1. Fleet.
    let specs: Vec<AgentSpec> = match &args.agents_csv {
        Some(path) => load_agents_csv(Path::new(path))
            .with_context(|| format!("loading agents from {path}"))?,
        None => load_agents_reader(Cursor::new(AGENTS_CSV))?,
    };
    println!("Loaded {} agents", specs.len());

    // 2. Floor.
    let config = FleetConfig {
        seed:                  SEED,
        max_ticks:             Some(MAX_TICKS),
        output_interval_ticks: OUTPUT_INTERVAL_TICKS,
        ..FleetConfig::default()
    };
    let grid = match args.floor {
        Floor::Embedded => Grid::from_ascii(WAREHOUSE_MAP)?,
        Floor::Random { rows, cols } => {
            let mut rng = SimRng::new(config.seed);
            let grid = random_grid(rows, cols, DEFAULT_OBSTACLE_DENSITY, &mut rng)?;
            // Clear any obstacle dropped on an endpoint.
            mark_endpoints(grid, &specs)?
        }
    };
    println!(
        "Floor: {}x{} cells, {} blocked",
        grid.rows(),
        grid.cols(),
        grid.blocked_count()
    );
    println!();

    // 3. Build sim.
    let mut sim = SimBuilder::new(config, grid)
        .agents(specs)
        .build()?;
    println!("{}", render_frame(&sim.grid, &sim.agents, sim.clock.current_tick));

    // 4. Set up output.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    let mut obs = FrameObserver::new(SimOutputObserver::new(writer));

    // 5. Run.
    let t0 = Instant::now();
    let result = sim.run(&mut obs);
    let elapsed = t0.elapsed();

    obs.inner.finish();
    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }
    let final_tick = result?;
    info!(ticks = final_tick.0, denied = obs.denied, "run complete");

    // 6. Summary.
    println!("all agents reached their goals in {} ticks", final_tick.0);
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  denied moves        : {}", obs.denied);
    println!("  agent_snapshots.csv : {} rows", obs.snapshot_rows);
    println!("  tick_summaries.csv  : {} rows", obs.summary_rows);
    println!();

    // 7. Final agent table.
    println!("{:<8} {:<10} {:<10}", "Agent", "Cell", "State");
    println!("{}", "-".repeat(28));
    for view in sim.agents.views() {
        println!(
            "{:<8} {:<10} {:<10}",
            view.symbol,
            view.position.to_string(),
            view.state.as_str(),
        );
    }

    Ok(())
}
