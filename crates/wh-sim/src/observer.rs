//! Simulation observer trait for displays, persistence, and trace output.

use wh_core::{Coord, Tick};
use wh_route::Route;
use wh_spatial::Grid;

use crate::{Metrics, Mode, Snapshot, Status};

/// Callbacks invoked by [`SimulationEngine`][crate::SimulationEngine] as
/// state changes.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  Callbacks run synchronously inside the
/// engine operation that caused them and must not assume any particular
/// wall-clock timing.
///
/// # Example — status logger
///
/// ```rust,ignore
/// struct StatusPrinter;
///
/// impl SimObserver for StatusPrinter {
///     fn on_status_change(&mut self, tick: Tick, from: Status, to: Status) {
///         println!("{tick}: {from} -> {to}");
///     }
/// }
/// ```
pub trait SimObserver {
    /// A new order was generated.  `requested` is the item count asked for;
    /// `route` may hold fewer targets if sampling or solving failed.
    fn on_order_generated(&mut self, _tick: Tick, _route: &Route, _requested: usize) {}

    /// Status moved from `from` to `to`.  Not called when unchanged.
    fn on_status_change(&mut self, _tick: Tick, _from: Status, _to: Status) {}

    /// The agent moved one cell.
    fn on_step(&mut self, _tick: Tick, _status: Status, _agent: Coord, _metrics: &Metrics) {}

    /// A pick at `target` finished.
    fn on_pick(&mut self, _tick: Tick, _target: Coord, _metrics: &Metrics) {}

    /// `target` could not be reached from the agent's position and was
    /// dropped from the run without a pick.
    fn on_target_skipped(&mut self, _tick: Tick, _target: Coord) {}

    /// One heartbeat elapsed.
    fn on_heartbeat(&mut self, _tick: Tick, _metrics: &Metrics) {}

    /// The agent is back at the start and the run is over.
    fn on_run_complete(&mut self, _tick: Tick, _metrics: &Metrics) {}

    /// An in-flight run (Moving, Picking or Returning) was discarded by
    /// switching to edit mode.  Not called when the toggle finds the agent
    /// Idle or Completed.  `snapshot` is the state right after cancellation.
    fn on_cancelled(&mut self, _tick: Tick, _snapshot: &Snapshot) {}

    fn on_mode_change(&mut self, _tick: Tick, _mode: Mode) {}

    /// Edit mode ended; `grid` is the layout the next runs will use.  Hosts
    /// that persist layouts save it here.
    fn on_layout_committed(&mut self, _grid: &Grid) {}

    /// The layout was reset to the stock pattern.  Hosts that persist
    /// layouts drop their stored copy here.
    fn on_layout_reset(&mut self, _grid: &Grid) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
