//! The `SimulationEngine` struct and its timer handlers.

use tracing::{debug, info, warn};
use wh_core::{Coord, SimClock, SimConfig, SimRng, Tick};
use wh_route::{Route, RouteOptimizer};
use wh_schedule::{TimerId, TimerQueue};
use wh_spatial::{Grid, Path, PathFinder};

use crate::{Metrics, Mode, NoopObserver, SimError, SimObserver, SimResult, Snapshot, Status};

// ── Timers ────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum TimerKind {
    Step,
    PickComplete,
    Heartbeat,
}

/// A scheduled timer, tagged with the run epoch it was armed in.
#[derive(Copy, Clone, Debug)]
struct Timer {
    kind:  TimerKind,
    epoch: u64,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum LegKind {
    /// Toward the next pick face; ends in a pick.
    Outbound,
    /// Back to the start; ends the run.
    Return,
}

/// The leg currently being walked.
struct Walk {
    path:  Path,
    /// Index of the agent's cell within `path`.
    index: usize,
    kind:  LegKind,
}

// ── SimulationEngine ──────────────────────────────────────────────────────────

/// The picking simulation: owns the grid, the agent, the current order, the
/// metrics, and every pending timer.
///
/// All mutation goes through the engine's operations.  Timers fire only
/// inside [`advance`][Self::advance], [`advance_to`][Self::advance_to], and
/// [`run_to_completion`][Self::run_to_completion], one at a time in
/// `(due tick, schedule order)`.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct SimulationEngine<P: PathFinder, O: SimObserver = NoopObserver> {
    config:   SimConfig,
    clock:    SimClock,
    grid:     Grid,
    finder:   P,
    observer: O,
    rng:      SimRng,

    mode:    Mode,
    status:  Status,
    agent:   Coord,
    metrics: Metrics,

    /// The current order.  `full_path` is the preview; cleared on completion.
    route:       Route,
    /// Index into `route.ordered_targets` of the target being walked to or
    /// picked.  Equal to the target count once every target is handled.
    next_target: usize,
    walk:        Option<Walk>,

    timers:    TimerQueue<Timer>,
    /// The pending heartbeat, cancelled when the run completes.
    heartbeat: Option<TimerId>,
    /// Bumped on every cancellation; timers from older epochs are dropped
    /// unhandled if they ever surface.
    epoch:     u64,
}

impl<P: PathFinder, O: SimObserver> SimulationEngine<P, O> {
    pub(crate) fn new(config: SimConfig, grid: Grid, finder: P, observer: O) -> Self {
        let rng = SimRng::new(config.seed);
        let agent = config.start;
        Self {
            config,
            clock: SimClock::new(),
            grid,
            finder,
            observer,
            rng,
            mode: Mode::Simulate,
            status: Status::Idle,
            agent,
            metrics: Metrics::default(),
            route: Route::empty(),
            next_target: 0,
            walk: None,
            timers: TimerQueue::new(),
            heartbeat: None,
            epoch: 0,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn now(&self) -> Tick {
        self.clock.current_tick
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn agent(&self) -> Coord {
        self.agent
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// The whole order in visiting sequence.
    pub fn ordered_targets(&self) -> &[Coord] {
        &self.route.ordered_targets
    }

    /// Targets not yet picked or skipped.
    pub fn remaining_targets(&self) -> &[Coord] {
        let from = self.next_target.min(self.route.ordered_targets.len());
        &self.route.ordered_targets[from..]
    }

    /// The leg being walked, or empty between legs.
    pub fn current_leg(&self) -> &[Coord] {
        self.walk.as_ref().map(|w| w.path.as_slice()).unwrap_or_default()
    }

    /// The optimizer's stitched route for the current order.
    pub fn route_preview(&self) -> &[Coord] {
        &self.route.full_path
    }

    /// Timers still pending, including any heartbeat.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tick:              self.now(),
            mode:              self.mode,
            status:            self.status,
            agent:             self.agent,
            metrics:           self.metrics,
            ordered_targets:   self.route.ordered_targets.clone(),
            remaining_targets: self.remaining_targets().to_vec(),
            current_leg:       self.current_leg().to_vec(),
            route_preview:     self.route.full_path.clone(),
        }
    }

    // ── Orders and runs ───────────────────────────────────────────────────

    /// Replace the current order with `count` random pick faces and solve
    /// the shortest round trip through them.
    ///
    /// Any run in flight is discarded.  Metrics reset with
    /// `total_items = count`, the agent returns to the start, and status is
    /// `Idle`.  `count == 0` yields an empty order.
    ///
    /// # Errors
    /// - `WrongMode` outside simulate mode (nothing changes).
    /// - `Spatial(EmptyAisleCandidatePool)` if the layout has no pick faces.
    /// - `Route(NoFeasibleRoute)` if no ordering can reach every target.
    ///
    /// On the last two the engine is left `Idle` with an empty order, so
    /// `start_simulation` is a no-op until a new order succeeds.
    pub fn generate_order(&mut self, count: usize) -> SimResult<()> {
        if self.mode != Mode::Simulate {
            return Err(SimError::WrongMode { expected: Mode::Simulate, actual: self.mode });
        }
        self.halt_timers();
        self.walk = None;
        self.route = Route::empty();
        self.next_target = 0;
        self.agent = self.config.start;
        self.metrics = Metrics::for_order(count.try_into().unwrap_or(u32::MAX));
        self.set_status(Status::Idle);

        let outcome = self.solve_order(count);
        let tick = self.now();
        self.observer.on_order_generated(tick, &self.route, count);
        outcome
    }

    /// [`generate_order`][Self::generate_order] with the configured default
    /// item count.
    pub fn generate_default_order(&mut self) -> SimResult<()> {
        self.generate_order(self.config.default_item_count)
    }

    fn solve_order(&mut self, count: usize) -> SimResult<()> {
        let targets = match self.grid.sample_targets(count, &mut self.rng) {
            Ok(targets) => targets,
            Err(e) => {
                warn!(error = %e, requested = count, "order left empty");
                return Err(e.into());
            }
        };
        let start = self.config.start;
        let route = match RouteOptimizer::new(&self.finder).solve(&self.grid, start, &targets, start) {
            Ok(route) => route,
            Err(e) => {
                warn!(error = %e, requested = count, "order has no feasible route");
                return Err(e.into());
            }
        };
        info!(
            requested = count,
            targets = route.ordered_targets.len(),
            total_steps = route.total_steps,
            "order generated"
        );
        self.route = route;
        Ok(())
    }

    /// Begin walking the current order.
    ///
    /// Returns `false` and does nothing unless the engine is in simulate
    /// mode, `Idle`, and holding a non-empty order.  The first leg is
    /// re-pathed from the agent's actual position rather than read from the
    /// preview.
    pub fn start_simulation(&mut self) -> bool {
        if self.mode != Mode::Simulate
            || self.status != Status::Idle
            || self.route.ordered_targets.is_empty()
        {
            debug!(mode = %self.mode, status = %self.status, "start_simulation ignored");
            return false;
        }
        info!(targets = self.route.ordered_targets.len(), "run started");
        self.next_target = 0;
        self.set_status(Status::Moving);
        self.arm_heartbeat();
        self.dispatch_next_leg();
        true
    }

    // ── Mode and layout edits ─────────────────────────────────────────────

    /// Switch between simulate and edit mode.  Returns the new mode.
    ///
    /// Entering edit mode cancels every pending timer before touching any
    /// other state, then drops the order and preview and puts the agent back
    /// at the start with status `Idle`.  Metrics keep their values.
    ///
    /// Leaving edit mode commits the edited layout: observers get
    /// `on_layout_committed`.
    pub fn toggle_mode(&mut self) -> Mode {
        let tick = self.now();
        match self.mode {
            Mode::Simulate => {
                let in_flight = self.status.is_active();
                let dropped = self.halt_timers();
                self.walk = None;
                self.route = Route::empty();
                self.next_target = 0;
                self.agent = self.config.start;
                self.mode = Mode::Edit;
                self.set_status(Status::Idle);
                if in_flight {
                    info!(dropped, "entered edit mode; run cancelled");
                    let snap = self.snapshot();
                    self.observer.on_cancelled(tick, &snap);
                } else {
                    info!("entered edit mode");
                }
            }
            Mode::Edit => {
                self.mode = Mode::Simulate;
                info!(shelves = self.grid.shelf_count(), "layout committed");
                self.observer.on_layout_committed(&self.grid);
            }
        }
        self.observer.on_mode_change(tick, self.mode);
        self.mode
    }

    /// Set or clear the shelf flag at `(x, y)`.
    ///
    /// Returns `false` with no change outside edit mode, for the start cell,
    /// or for out-of-range coordinates.
    pub fn update_cell(&mut self, x: i32, y: i32, is_shelf: bool) -> bool {
        if self.mode != Mode::Edit {
            return false;
        }
        match self.grid.set_shelf(Coord::new(x, y), is_shelf) {
            Ok(()) => true,
            Err(e) => {
                debug!(error = %e, "cell edit rejected");
                false
            }
        }
    }

    /// Remove every shelf.  Edit mode only.
    pub fn clear_grid(&mut self) -> bool {
        if self.mode != Mode::Edit {
            return false;
        }
        self.grid.clear_shelves();
        true
    }

    /// Restore the stock shelf pattern.  Edit mode only.
    pub fn reset_to_default(&mut self) -> bool {
        if self.mode != Mode::Edit {
            return false;
        }
        self.grid = Grid::generate_default(self.config.grid_size, self.config.start);
        self.observer.on_layout_reset(&self.grid);
        true
    }

    /// Swap in a whole layout, e.g. one loaded from disk.  Edit mode only.
    ///
    /// # Errors
    /// `WrongMode` outside edit mode; `Config` if the grid's size or start
    /// differs from the engine's configuration.
    pub fn replace_grid(&mut self, grid: Grid) -> SimResult<()> {
        if self.mode != Mode::Edit {
            return Err(SimError::WrongMode { expected: Mode::Edit, actual: self.mode });
        }
        check_grid(&self.config, &grid)?;
        self.grid = grid;
        Ok(())
    }

    // ── Virtual time ──────────────────────────────────────────────────────

    /// Advance virtual time by `ms`, firing every timer that falls due.
    /// Returns the number of timers fired.
    pub fn advance(&mut self, ms: u64) -> usize {
        let until = self.now().offset(ms);
        self.advance_to(until)
    }

    /// Advance virtual time to `until`, firing every timer due at or before
    /// it.  The clock never moves backwards.
    pub fn advance_to(&mut self, until: Tick) -> usize {
        let mut fired = 0;
        while let Some((tick, _id, timer)) = self.timers.pop_due(until) {
            self.clock.advance_to(tick);
            self.fire(timer);
            fired += 1;
        }
        self.clock.advance_to(until);
        fired
    }

    /// Fire timers until none are left.  A run always drains: the heartbeat
    /// stops at `Completed`.  Returns the final status.
    pub fn run_to_completion(&mut self) -> Status {
        while let Some(next) = self.timers.next_tick() {
            self.advance_to(next);
        }
        self.status
    }

    // ── Timer handlers ────────────────────────────────────────────────────

    fn fire(&mut self, timer: Timer) {
        if timer.epoch != self.epoch || self.mode != Mode::Simulate {
            debug!(kind = ?timer.kind, epoch = timer.epoch, "stale timer dropped");
            return;
        }
        match timer.kind {
            TimerKind::Step         => self.on_step(),
            TimerKind::PickComplete => self.on_pick_complete(),
            TimerKind::Heartbeat => {
                self.heartbeat = None;
                self.on_heartbeat();
            }
        }
    }

    fn on_step(&mut self) {
        let Some(walk) = self.walk.as_mut() else {
            return;
        };
        walk.index += 1;
        if walk.index >= walk.path.len() {
            let kind = walk.kind;
            self.walk = None;
            self.finish_leg(kind);
            return;
        }
        self.agent = walk.path[walk.index];
        self.metrics.distance_walked += 1;
        let tick = self.now();
        debug!(agent = %self.agent, distance = self.metrics.distance_walked, "step");
        self.observer.on_step(tick, self.status, self.agent, &self.metrics);
        self.arm(TimerKind::Step, self.config.step_interval_ms);
    }

    fn on_pick_complete(&mut self) {
        let target = self.route.ordered_targets.get(self.next_target).copied();
        self.metrics.items_picked += 1;
        self.next_target += 1;
        if let Some(target) = target {
            let tick = self.now();
            info!(
                target = %target,
                picked = self.metrics.items_picked,
                total = self.metrics.total_items,
                "pick complete"
            );
            self.observer.on_pick(tick, target, &self.metrics);
        }
        self.set_status(Status::Moving);
        self.dispatch_next_leg();
    }

    fn on_heartbeat(&mut self) {
        if !self.status.is_active() {
            return;
        }
        self.metrics.time_elapsed += 1;
        let tick = self.now();
        self.observer.on_heartbeat(tick, &self.metrics);
        self.arm_heartbeat();
    }

    // ── Leg control ───────────────────────────────────────────────────────

    /// Path from the agent to the next reachable target, or home when none
    /// remain.  Unreachable targets are skipped in place.
    fn dispatch_next_leg(&mut self) {
        while let Some(&target) = self.route.ordered_targets.get(self.next_target) {
            match RouteOptimizer::new(&self.finder).leg(&self.grid, self.agent, target) {
                Ok(path) => {
                    self.set_status(Status::Moving);
                    self.begin_walk(path, LegKind::Outbound);
                    return;
                }
                Err(e) => {
                    warn!(error = %e, "skipping unreachable target");
                    self.next_target += 1;
                    let tick = self.now();
                    self.observer.on_target_skipped(tick, target);
                }
            }
        }

        let home = self.config.start;
        let path = match RouteOptimizer::new(&self.finder).leg(&self.grid, self.agent, home) {
            Ok(path) => path,
            Err(e) => {
                warn!(error = %e, "no path home; ending run in place");
                Vec::new()
            }
        };
        self.set_status(Status::Returning);
        self.begin_walk(path, LegKind::Return);
    }

    /// Start walking `path`.  A path of at most one cell finishes at once.
    fn begin_walk(&mut self, path: Path, kind: LegKind) {
        if path.len() <= 1 {
            if let Some(&only) = path.first() {
                self.agent = only;
            }
            self.finish_leg(kind);
            return;
        }
        debug!(from = %path[0], to = %path[path.len() - 1], cells = path.len(), ?kind, "leg started");
        self.walk = Some(Walk { path, index: 0, kind });
        self.arm(TimerKind::Step, self.config.step_interval_ms);
    }

    fn finish_leg(&mut self, kind: LegKind) {
        match kind {
            LegKind::Outbound => {
                self.set_status(Status::Picking);
                self.arm(TimerKind::PickComplete, self.config.pick_duration_ms);
            }
            LegKind::Return => {
                if let Some(id) = self.heartbeat.take() {
                    self.timers.cancel(id);
                }
                self.route.full_path.clear();
                self.set_status(Status::Completed);
                let tick = self.now();
                info!(
                    distance = self.metrics.distance_walked,
                    picked = self.metrics.items_picked,
                    total = self.metrics.total_items,
                    elapsed = self.metrics.time_elapsed,
                    "run complete"
                );
                self.observer.on_run_complete(tick, &self.metrics);
            }
        }
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn set_status(&mut self, to: Status) {
        let from = self.status;
        if from == to {
            return;
        }
        self.status = to;
        let tick = self.now();
        debug!(%from, %to, "status");
        self.observer.on_status_change(tick, from, to);
    }

    fn arm(&mut self, kind: TimerKind, delay_ms: u64) -> TimerId {
        let at = self.now().offset(delay_ms);
        self.timers.push(at, Timer { kind, epoch: self.epoch })
    }

    fn arm_heartbeat(&mut self) {
        if self.heartbeat.is_none() {
            self.heartbeat = Some(self.arm(TimerKind::Heartbeat, self.config.heartbeat_interval_ms));
        }
    }

    /// Cancel every pending timer and retire the current epoch.
    fn halt_timers(&mut self) -> usize {
        self.heartbeat = None;
        self.epoch += 1;
        self.timers.clear()
    }
}

/// A grid is usable by an engine only if it matches the configured size and
/// start cell.
pub(crate) fn check_grid(config: &SimConfig, grid: &Grid) -> SimResult<()> {
    if grid.size() != config.grid_size {
        return Err(SimError::Config(format!(
            "grid is {0}x{0}, configuration expects {1}x{1}",
            grid.size(),
            config.grid_size
        )));
    }
    if grid.start() != config.start {
        return Err(SimError::Config(format!(
            "grid start is {}, configuration expects {}",
            grid.start(),
            config.start
        )));
    }
    Ok(())
}
