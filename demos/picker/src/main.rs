//! picker — a single picker working orders on a warehouse floor.
//!
//! Runs an order on the stored layout (or the stock one), blocks part of the
//! middle cross aisle in edit mode, commits the edited layout to disk, and
//! runs a second order on it.
//!
//! ```text
//! picker [CONFIG_JSON]
//! RUST_LOG=debug picker      # per-step tracing
//! ```

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use wh_core::{Coord, SimConfig, Tick};
use wh_output::{CsvWriter, OutputWriter, TraceObserver};
use wh_route::Route;
use wh_sim::{Metrics, Mode, SimBuilder, SimObserver, SimulationEngine, Snapshot, Status};
use wh_spatial::{AStarFinder, Grid, SpatialError};

// ── Constants ─────────────────────────────────────────────────────────────────

const OUTPUT_DIR:  &str = "output/picker";
const LAYOUT_FILE: &str = "layout.json";

// ── Observer: trace output + layout persistence ───────────────────────────────

/// Forwards everything to the CSV trace and saves committed layouts.
struct DemoObserver<W: OutputWriter> {
    trace:          TraceObserver<W>,
    layout_path:    PathBuf,
    status_changes: usize,
    save_error:     Option<anyhow::Error>,
}

impl<W: OutputWriter> DemoObserver<W> {
    fn new(trace: TraceObserver<W>, layout_path: PathBuf) -> Self {
        Self { trace, layout_path, status_changes: 0, save_error: None }
    }

    fn save_layout(&self, grid: &Grid) -> Result<()> {
        let file = File::create(&self.layout_path)
            .with_context(|| format!("creating {}", self.layout_path.display()))?;
        grid.write_layout_json(BufWriter::new(file))?;
        Ok(())
    }
}

impl<W: OutputWriter> SimObserver for DemoObserver<W> {
    fn on_order_generated(&mut self, tick: Tick, route: &Route, requested: usize) {
        self.trace.on_order_generated(tick, route, requested);
    }

    fn on_status_change(&mut self, tick: Tick, from: Status, to: Status) {
        self.status_changes += 1;
        self.trace.on_status_change(tick, from, to);
    }

    fn on_step(&mut self, tick: Tick, status: Status, agent: Coord, metrics: &Metrics) {
        self.trace.on_step(tick, status, agent, metrics);
    }

    fn on_pick(&mut self, tick: Tick, target: Coord, metrics: &Metrics) {
        self.trace.on_pick(tick, target, metrics);
    }

    fn on_target_skipped(&mut self, tick: Tick, target: Coord) {
        self.trace.on_target_skipped(tick, target);
    }

    fn on_heartbeat(&mut self, tick: Tick, metrics: &Metrics) {
        self.trace.on_heartbeat(tick, metrics);
    }

    fn on_run_complete(&mut self, tick: Tick, metrics: &Metrics) {
        self.trace.on_run_complete(tick, metrics);
    }

    fn on_cancelled(&mut self, tick: Tick, snapshot: &Snapshot) {
        self.trace.on_cancelled(tick, snapshot);
    }

    fn on_layout_committed(&mut self, grid: &Grid) {
        if let Err(e) = self.save_layout(grid) {
            self.save_error.get_or_insert(e);
        }
    }

    fn on_layout_reset(&mut self, _grid: &Grid) {
        if let Err(e) = std::fs::remove_file(&self.layout_path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                self.save_error.get_or_insert(e.into());
            }
        }
    }
}

type Engine = SimulationEngine<AStarFinder, DemoObserver<CsvWriter>>;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn load_config(path: Option<&str>) -> Result<SimConfig> {
    let Some(path) = path else {
        return Ok(SimConfig::default());
    };
    let file = File::open(path).with_context(|| format!("opening config {path}"))?;
    let config: SimConfig =
        serde_json::from_reader(file).with_context(|| format!("parsing config {path}"))?;
    Ok(config)
}

/// The stored layout if one exists and matches the configuration, else the
/// stock pattern.
fn load_layout(path: &Path, config: &SimConfig) -> Result<Grid> {
    if !path.exists() {
        return Ok(Grid::generate_default(config.grid_size, config.start));
    }
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let grid = match Grid::load_layout_json(file, config.grid_size, config.start) {
        Ok(grid) => grid,
        Err(SpatialError::LayoutSize { stored, expected }) => {
            warn!(stored, configured = expected, "stored layout has the wrong size; using the stock layout");
            return Ok(Grid::generate_default(config.grid_size, config.start));
        }
        Err(e) => return Err(e.into()),
    };
    info!(path = %path.display(), shelves = grid.shelf_count(), "loaded stored layout");
    Ok(grid)
}

fn run_order(engine: &mut Engine, label: &str) -> Result<Metrics> {
    engine.generate_default_order()?;
    println!("{label}: {} targets", engine.ordered_targets().len());
    for (i, t) in engine.ordered_targets().iter().enumerate() {
        println!("  {:>2}. {t}", i + 1);
    }
    println!("  planned route: {} steps", engine.route_preview().len().saturating_sub(1));

    engine.start_simulation();
    let status = engine.run_to_completion();
    println!("  finished {status} at {}", engine.clock());
    Ok(*engine.metrics())
}

fn print_metrics(label: &str, m: &Metrics) {
    println!(
        "{:<10} {:>6}/{:<6} {:>9} {:>9}",
        label, m.items_picked, m.total_items, m.distance_walked, m.time_elapsed
    );
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== picker — warehouse picking simulation ===");

    // 1. Configuration and layout.
    let config_arg = std::env::args().nth(1);
    let config = load_config(config_arg.as_deref())?;
    config.validate()?;

    let out_dir = Path::new(OUTPUT_DIR);
    std::fs::create_dir_all(out_dir)?;
    let layout_path = out_dir.join(LAYOUT_FILE);
    let grid = load_layout(&layout_path, &config)?;
    println!(
        "Grid: {0}x{0}, {1} shelves, start {2}, seed {3}",
        config.grid_size,
        grid.shelf_count(),
        config.start,
        config.seed
    );
    println!("{grid}");

    // 2. Engine with CSV trace.
    let writer = CsvWriter::new(out_dir)?;
    let observer = DemoObserver::new(TraceObserver::new(writer), layout_path);
    let mut engine = SimBuilder::new(config.clone(), AStarFinder)
        .grid(grid)
        .observer(observer)
        .build()?;

    let t0 = Instant::now();

    // 3. First order on the loaded layout.
    let first = run_order(&mut engine, "Order 1")?;

    // 4. Edit: close the left end of the middle cross aisle, then commit.
    engine.toggle_mode();
    let mid = (config.grid_size - 2) / 2;
    let blocked = (2..config.grid_size / 2)
        .filter(|&x| engine.update_cell(x, mid, true))
        .count();
    let mode = engine.toggle_mode();
    debug_assert_eq!(mode, Mode::Simulate);
    println!("Edited layout: {blocked} cross-aisle cells shelved");
    println!("{}", engine.grid());

    // 5. Second order on the edited layout.
    let second = run_order(&mut engine, "Order 2")?;
    let elapsed = t0.elapsed();

    // 6. Flush output and summarize.
    let mut observer = engine.into_observer();
    if let Some(e) = observer.save_error.take() {
        eprintln!("layout save error: {e:#}");
    }
    observer.trace.finish()?;

    println!();
    println!("Simulated in {:.3} s ({} status changes)", elapsed.as_secs_f64(), observer.status_changes);
    println!("{:<10} {:>13} {:>9} {:>9}", "Run", "Picked", "Distance", "Heartbeat");
    println!("{}", "-".repeat(44));
    print_metrics("order 1", &first);
    print_metrics("order 2", &second);
    println!();
    println!("Trace written to {}/steps.csv and {}/runs.csv", OUTPUT_DIR, OUTPUT_DIR);

    Ok(())
}
