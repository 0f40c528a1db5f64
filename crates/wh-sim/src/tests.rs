//! Unit tests for wh-sim.

#[cfg(test)]
mod helpers {
    use std::sync::{Arc, Mutex};

    use wh_core::{Coord, SimConfig, Tick};
    use wh_route::Route;
    use wh_spatial::{AStarFinder, Grid, Path, PathFinder};

    use crate::{Metrics, Mode, SimBuilder, SimObserver, SimulationEngine, Snapshot, Status};

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub enum Event {
        Order { targets: usize, requested: usize },
        Status(Status, Status),
        Step(Coord),
        Pick(Coord),
        Skipped(Coord),
        Heartbeat(u64),
        Complete(Metrics),
        Cancelled,
        Mode(Mode),
        Committed,
        Reset,
    }

    /// Records every callback with the tick it arrived at.
    #[derive(Default)]
    pub struct Recorder {
        pub events: Vec<(Tick, Event)>,
    }

    impl Recorder {
        pub fn statuses(&self) -> Vec<(Status, Status)> {
            self.events
                .iter()
                .filter_map(|(_, e)| match e {
                    Event::Status(a, b) => Some((*a, *b)),
                    _ => None,
                })
                .collect()
        }

        pub fn count(&self, f: impl Fn(&Event) -> bool) -> usize {
            self.events.iter().filter(|(_, e)| f(e)).count()
        }
    }

    impl SimObserver for Recorder {
        fn on_order_generated(&mut self, tick: Tick, route: &Route, requested: usize) {
            let targets = route.ordered_targets.len();
            self.events.push((tick, Event::Order { targets, requested }));
        }
        fn on_status_change(&mut self, tick: Tick, from: Status, to: Status) {
            self.events.push((tick, Event::Status(from, to)));
        }
        fn on_step(&mut self, tick: Tick, _status: Status, agent: Coord, _m: &Metrics) {
            self.events.push((tick, Event::Step(agent)));
        }
        fn on_pick(&mut self, tick: Tick, target: Coord, _m: &Metrics) {
            self.events.push((tick, Event::Pick(target)));
        }
        fn on_target_skipped(&mut self, tick: Tick, target: Coord) {
            self.events.push((tick, Event::Skipped(target)));
        }
        fn on_heartbeat(&mut self, tick: Tick, m: &Metrics) {
            self.events.push((tick, Event::Heartbeat(m.time_elapsed)));
        }
        fn on_run_complete(&mut self, tick: Tick, m: &Metrics) {
            self.events.push((tick, Event::Complete(*m)));
        }
        fn on_cancelled(&mut self, tick: Tick, _snapshot: &Snapshot) {
            self.events.push((tick, Event::Cancelled));
        }
        fn on_mode_change(&mut self, tick: Tick, mode: Mode) {
            self.events.push((tick, Event::Mode(mode)));
        }
        fn on_layout_committed(&mut self, _grid: &Grid) {
            self.events.push((Tick::ZERO, Event::Committed));
        }
        fn on_layout_reset(&mut self, _grid: &Grid) {
            self.events.push((Tick::ZERO, Event::Reset));
        }
    }

    /// `n × n` grid, start bottom-left, shelves at `shelves`.
    pub fn grid_with(n: i32, shelves: &[(i32, i32)]) -> Grid {
        let mut g = Grid::empty(n, Coord::new(0, n - 1));
        for &(x, y) in shelves {
            g.set_shelf(Coord::new(x, y), true).unwrap();
        }
        g
    }

    /// 5×5 floor with one shelf in the top-right corner.  Its two pick
    /// faces, (3,0) and (4,1), are both 7 steps from the start.
    pub fn corner_engine() -> SimulationEngine<AStarFinder, Recorder> {
        SimBuilder::new(SimConfig::with_grid_size(5), AStarFinder)
            .grid(grid_with(5, &[(4, 0)]))
            .observer(Recorder::default())
            .build()
            .unwrap()
    }

    /// A* that refuses to reach one chosen cell once armed.
    pub struct GatedFinder {
        pub blocked: Arc<Mutex<Option<Coord>>>,
    }

    impl PathFinder for GatedFinder {
        fn find_path(&self, grid: &Grid, start: Coord, goal: Coord) -> Path {
            if *self.blocked.lock().unwrap() == Some(goal) {
                return Vec::new();
            }
            AStarFinder.find_path(grid, start, goal)
        }
    }

    /// A finder for which nothing is ever reachable.
    pub struct NoPaths;

    impl PathFinder for NoPaths {
        fn find_path(&self, _grid: &Grid, _start: Coord, _goal: Coord) -> Path {
            Vec::new()
        }
    }

    pub fn c(x: i32, y: i32) -> Coord {
        Coord::new(x, y)
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use wh_core::{SimConfig, WhError};
    use wh_spatial::{AStarFinder, Grid};

    use super::helpers::{c, grid_with};
    use crate::{Mode, SimBuilder, SimError, Status};

    #[test]
    fn defaults_to_stock_layout() {
        let engine = SimBuilder::new(SimConfig::default(), AStarFinder).build().unwrap();
        let stock = Grid::generate_default(20, c(0, 19));
        assert_eq!(engine.grid(), &stock);
        assert_eq!(engine.agent(), c(0, 19));
        assert_eq!(engine.status(), Status::Idle);
        assert_eq!(engine.mode(), Mode::Simulate);
        assert_eq!(engine.pending_timers(), 0);
    }

    #[test]
    fn rejects_mismatched_grid() {
        let err = SimBuilder::new(SimConfig::default(), AStarFinder)
            .grid(grid_with(5, &[]))
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, SimError::Config(_)));

        let err = SimBuilder::new(SimConfig::with_grid_size(5), AStarFinder)
            .grid(Grid::empty(5, c(0, 0)))
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, SimError::Config(_)));
    }

    #[test]
    fn rejects_invalid_config() {
        let mut config = SimConfig::default();
        config.step_interval_ms = 0;
        let err = SimBuilder::new(config, AStarFinder).build().err().unwrap();
        assert!(matches!(err, SimError::Core(WhError::Config(_))));
    }
}

// ── Orders ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod orders {
    use wh_core::SimConfig;
    use wh_route::RouteError;
    use wh_spatial::{AStarFinder, SpatialError};

    use super::helpers::{corner_engine, grid_with, Event, NoPaths};
    use crate::{Metrics, SimBuilder, SimError, Status};

    #[test]
    fn zero_items_is_an_empty_idle_order() {
        let mut engine = corner_engine();
        engine.generate_order(0).unwrap();
        assert!(engine.ordered_targets().is_empty());
        assert!(engine.route_preview().is_empty());
        assert_eq!(engine.status(), Status::Idle);
        assert_eq!(*engine.metrics(), Metrics::for_order(0));
        assert!(!engine.start_simulation());
    }

    #[test]
    fn order_resets_metrics_and_previews_route() {
        let mut engine = corner_engine();
        engine.generate_order(3).unwrap();
        assert_eq!(engine.ordered_targets().len(), 3);
        assert_eq!(engine.metrics().total_items, 3);
        assert_eq!(engine.route_preview().first(), Some(&engine.config().start));
        assert_eq!(engine.route_preview().last(), Some(&engine.config().start));
        for t in engine.ordered_targets() {
            assert!(engine.grid().is_pick_face(*t));
        }
        assert_eq!(
            engine.observer().events.last().map(|(_, e)| e.clone()),
            Some(Event::Order { targets: 3, requested: 3 })
        );
    }

    #[test]
    fn same_seed_same_order() {
        let build = || SimBuilder::new(SimConfig::default(), AStarFinder).build().unwrap();
        let (mut a, mut b) = (build(), build());
        a.generate_order(5).unwrap();
        b.generate_order(5).unwrap();
        assert_eq!(a.ordered_targets(), b.ordered_targets());
        assert_eq!(a.route_preview(), b.route_preview());
    }

    #[test]
    fn no_pick_faces_is_an_error() {
        let mut engine = SimBuilder::new(SimConfig::with_grid_size(5), AStarFinder)
            .grid(grid_with(5, &[]))
            .build()
            .unwrap();
        let err = engine.generate_order(3).unwrap_err();
        assert!(matches!(err, SimError::Spatial(SpatialError::EmptyAisleCandidatePool)));
        assert_eq!(engine.status(), Status::Idle);
        assert_eq!(engine.metrics().total_items, 3);
        assert!(!engine.start_simulation());
    }

    #[test]
    fn infeasible_route_leaves_engine_idle() {
        let mut engine = SimBuilder::new(SimConfig::with_grid_size(5), NoPaths)
            .grid(grid_with(5, &[(2, 2)]))
            .build()
            .unwrap();
        let err = engine.generate_order(2).unwrap_err();
        assert!(matches!(err, SimError::Route(RouteError::NoFeasibleRoute { targets: 2 })));
        assert!(engine.ordered_targets().is_empty());
        assert!(engine.route_preview().is_empty());
        assert_eq!(engine.status(), Status::Idle);
        assert!(!engine.start_simulation());
        assert_eq!(engine.pending_timers(), 0);
    }

    #[test]
    fn new_order_discards_run_in_flight() {
        let mut engine = corner_engine();
        engine.generate_order(1).unwrap();
        assert!(engine.start_simulation());
        engine.advance(600);
        assert!(engine.metrics().distance_walked > 0);

        engine.generate_order(2).unwrap();
        assert_eq!(engine.status(), Status::Idle);
        assert_eq!(engine.agent(), engine.config().start);
        assert_eq!(engine.metrics().distance_walked, 0);
        // Only the order's own timers could be pending, and there are none.
        assert_eq!(engine.pending_timers(), 0);
        engine.advance(10_000);
        assert_eq!(engine.metrics().distance_walked, 0);
    }

    #[test]
    fn orders_need_simulate_mode() {
        let mut engine = corner_engine();
        engine.toggle_mode();
        assert!(matches!(engine.generate_order(1), Err(SimError::WrongMode { .. })));
    }
}

// ── Runs ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod runs {
    use std::sync::{Arc, Mutex};

    use wh_core::{SimConfig, Tick};
    use wh_spatial::AStarFinder;

    use super::helpers::{c, corner_engine, grid_with, Event, GatedFinder};
    use crate::{SimBuilder, Status};

    #[test]
    fn single_item_timeline() {
        let mut engine = corner_engine();
        engine.generate_order(1).unwrap();
        let target = engine.ordered_targets()[0];
        assert!(engine.start_simulation());
        assert!(!engine.start_simulation(), "second start must be refused");
        assert_eq!(engine.status(), Status::Moving);
        assert_eq!(engine.current_leg().first(), Some(&engine.config().start));
        assert_eq!(engine.current_leg().last(), Some(&target));

        // Seven steps out, the leg ends one interval after the last step.
        engine.advance_to(Tick(1_750));
        assert_eq!(engine.agent(), target);
        assert_eq!(engine.metrics().distance_walked, 7);
        assert_eq!(engine.status(), Status::Moving);
        engine.advance_to(Tick(2_000));
        assert_eq!(engine.status(), Status::Picking);
        assert!(engine.current_leg().is_empty());

        engine.advance_to(Tick(3_999));
        assert_eq!(engine.metrics().items_picked, 0);
        engine.advance_to(Tick(4_000));
        assert_eq!(engine.metrics().items_picked, 1);
        assert_eq!(engine.status(), Status::Returning);
        assert!(engine.remaining_targets().is_empty());

        assert_eq!(engine.run_to_completion(), Status::Completed);
        assert_eq!(engine.now(), Tick(6_000));

        let m = engine.metrics();
        assert_eq!(m.distance_walked, 14);
        assert_eq!(m.items_picked, 1);
        assert_eq!(m.total_items, 1);
        assert_eq!(m.time_elapsed, 6);
        assert_eq!(engine.agent(), engine.config().start);
        assert!(engine.route_preview().is_empty());
        assert_eq!(engine.pending_timers(), 0);

        use Status::*;
        assert_eq!(
            engine.observer().statuses(),
            [
                (Idle, Moving),
                (Moving, Picking),
                (Picking, Moving),
                (Moving, Returning),
                (Returning, Completed),
            ]
        );
        let steps = engine.observer().count(|e| matches!(e, Event::Step(_)));
        assert_eq!(steps, 14);
        assert_eq!(engine.observer().count(|e| *e == Event::Pick(target)), 1);
    }

    #[test]
    fn centre_shelf_single_pick() {
        // 5×5 floor, one shelf at (2,2), start (0,4); order the face above it.
        let engine_for = |seed: u64| {
            let mut config = SimConfig::with_grid_size(5);
            config.seed = seed;
            SimBuilder::new(config, AStarFinder)
                .grid(grid_with(5, &[(2, 2)]))
                .observer(super::helpers::Recorder::default())
                .build()
                .unwrap()
        };
        let mut engine = (0..256)
            .map(engine_for)
            .find_map(|mut e| {
                e.generate_order(1).unwrap();
                (e.ordered_targets() == [c(2, 1)]).then_some(e)
            })
            .expect("some seed orders (2,1)");
        assert_eq!(engine.config().start, c(0, 4));
        assert_eq!(engine.route_preview().len(), 11);

        assert!(engine.start_simulation());
        assert_eq!(engine.run_to_completion(), Status::Completed);
        let m = engine.metrics();
        assert_eq!(m.distance_walked, 10);
        assert_eq!(m.items_picked, 1);
        assert_eq!(m.total_items, 1);
        assert_eq!(engine.agent(), c(0, 4));
        assert_eq!(engine.observer().count(|e| *e == Event::Pick(c(2, 1))), 1);

        use Status::*;
        assert_eq!(
            engine.observer().statuses(),
            [
                (Idle, Moving),
                (Moving, Picking),
                (Picking, Moving),
                (Moving, Returning),
                (Returning, Completed),
            ]
        );
    }

    #[test]
    fn metrics_frozen_after_completion() {
        let mut engine = corner_engine();
        engine.generate_order(2).unwrap();
        engine.start_simulation();
        engine.run_to_completion();
        let done = *engine.metrics();
        engine.advance(60_000);
        assert_eq!(*engine.metrics(), done);
        assert_eq!(engine.status(), Status::Completed);
        assert!(!engine.start_simulation());
    }

    #[test]
    fn stock_layout_run_walks_the_previewed_route() {
        let mut engine = SimBuilder::new(SimConfig::default(), AStarFinder).build().unwrap();
        engine.generate_order(5).unwrap();
        let planned = engine.route_preview().len() as u64 - 1;

        engine.start_simulation();
        assert_eq!(engine.run_to_completion(), Status::Completed);
        let m = engine.metrics();
        assert_eq!(m.items_picked, 5);
        assert_eq!(m.distance_walked, planned);
        assert!(m.time_elapsed > 0);
        assert_eq!(engine.agent(), engine.config().start);
    }

    #[test]
    fn picks_never_exceed_order() {
        let mut engine = SimBuilder::new(SimConfig::default(), AStarFinder).build().unwrap();
        engine.generate_order(4).unwrap();
        engine.start_simulation();
        while engine.status() != Status::Completed {
            engine.advance(250);
            let m = engine.metrics();
            assert!(m.items_picked <= m.total_items);
            assert_eq!(engine.remaining_targets().len() + m.items_picked as usize, 4);
        }
    }

    #[test]
    fn duplicate_targets_pick_twice_in_place() {
        // A 2×2 floor with two shelves has exactly one pick face: (1,1).
        let mut engine = SimBuilder::new(SimConfig::with_grid_size(2), AStarFinder)
            .grid(grid_with(2, &[(0, 0), (1, 0)]))
            .build()
            .unwrap();
        engine.generate_order(2).unwrap();
        assert_eq!(engine.ordered_targets(), [c(1, 1), c(1, 1)]);

        engine.start_simulation();
        engine.run_to_completion();
        let m = engine.metrics();
        assert_eq!(m.items_picked, 2);
        assert_eq!(m.distance_walked, 2);
        // 1 step + leg end, two picks, 1 step + leg end.
        assert_eq!(engine.now(), Tick(250 * 2 + 2_000 * 2 + 250 * 2));
    }

    #[test]
    fn unreachable_target_is_skipped_at_walk_time() {
        let blocked = Arc::new(Mutex::new(None));
        let mut engine = SimBuilder::new(
            SimConfig::with_grid_size(5),
            GatedFinder { blocked: Arc::clone(&blocked) },
        )
        .grid(grid_with(5, &[(4, 0)]))
        .observer(super::helpers::Recorder::default())
        .build()
        .unwrap();

        engine.generate_order(2).unwrap();
        let order = engine.ordered_targets().to_vec();
        *blocked.lock().unwrap() = Some(order[0]);
        let reachable = order.iter().filter(|&&t| t != order[0]).count();

        engine.start_simulation();
        assert_eq!(engine.run_to_completion(), Status::Completed);
        assert_eq!(engine.metrics().items_picked as usize, reachable);
        assert_eq!(engine.metrics().total_items, 2);
        let skipped = engine.observer().count(|e| matches!(e, Event::Skipped(_)));
        assert_eq!(skipped, order.len() - reachable);
    }

    #[test]
    fn heartbeat_counts_only_active_time() {
        let mut engine = corner_engine();
        engine.generate_order(1).unwrap();
        engine.advance(5_000);
        assert_eq!(engine.metrics().time_elapsed, 0, "idle time is not counted");

        engine.start_simulation();
        engine.advance(3_500);
        assert_eq!(engine.metrics().time_elapsed, 3);
        let beats: Vec<_> = engine
            .observer()
            .events
            .iter()
            .filter_map(|(t, e)| matches!(e, Event::Heartbeat(_)).then_some(t.0))
            .collect();
        assert_eq!(beats, [6_000, 7_000, 8_000]);
    }

    #[test]
    fn run_complete_reports_final_metrics() {
        let mut engine = corner_engine();
        engine.generate_order(1).unwrap();
        engine.start_simulation();
        engine.run_to_completion();
        let (tick, last) = engine.observer().events.last().cloned().unwrap();
        assert_eq!(tick, engine.now());
        assert_eq!(last, Event::Complete(*engine.metrics()));
    }

    #[test]
    fn snapshot_mirrors_accessors() {
        let mut engine = SimBuilder::new(SimConfig::default(), AStarFinder).build().unwrap();
        engine.generate_order(3).unwrap();
        engine.start_simulation();
        engine.advance(1_000);
        let snap = engine.snapshot();
        assert_eq!(snap.tick, engine.now());
        assert_eq!(snap.status, engine.status());
        assert_eq!(snap.agent, engine.agent());
        assert_eq!(snap.ordered_targets, engine.ordered_targets());
        assert_eq!(snap.current_leg, engine.current_leg());
        assert_eq!(snap.route_preview, engine.route_preview());
        assert_eq!(snap.metrics, *engine.metrics());
    }
}

// ── Mode and layout edits ─────────────────────────────────────────────────────

#[cfg(test)]
mod editing {
    use wh_core::{SimConfig, Tick};
    use wh_spatial::{AStarFinder, Grid};

    use super::helpers::{c, corner_engine, grid_with, Event};
    use crate::{Mode, SimBuilder, SimError, Status};

    #[test]
    fn edit_mode_freezes_the_run() {
        let mut engine = corner_engine();
        engine.generate_order(1).unwrap();
        engine.start_simulation();
        engine.advance(600);
        let walked = engine.metrics().distance_walked;
        assert_eq!(walked, 2);

        assert_eq!(engine.toggle_mode(), Mode::Edit);
        assert_eq!(engine.pending_timers(), 0);
        assert_eq!(engine.status(), Status::Idle);
        assert_eq!(engine.agent(), engine.config().start);
        assert!(engine.ordered_targets().is_empty());
        assert!(engine.route_preview().is_empty());
        assert!(engine.current_leg().is_empty());

        engine.advance(30_000);
        assert_eq!(engine.metrics().distance_walked, walked);
        assert_eq!(engine.metrics().time_elapsed, 0);
        assert_eq!(engine.agent(), engine.config().start);
        assert_eq!(engine.observer().count(|e| *e == Event::Cancelled), 1);
    }

    #[test]
    fn edit_mode_during_pick_drops_the_pick() {
        let mut engine = corner_engine();
        engine.generate_order(1).unwrap();
        engine.start_simulation();
        engine.advance_to(Tick(2_500));
        assert_eq!(engine.status(), Status::Picking);

        engine.toggle_mode();
        assert_eq!(engine.pending_timers(), 0);
        engine.advance(10_000);
        assert_eq!(engine.metrics().items_picked, 0);
        assert_eq!(engine.metrics().distance_walked, 7);
        assert_eq!(engine.status(), Status::Idle);
        assert_eq!(engine.observer().count(|e| matches!(e, Event::Pick(_))), 0);
        assert_eq!(engine.observer().count(|e| *e == Event::Cancelled), 1);
    }

    #[test]
    fn toggle_without_a_run_cancels_nothing() {
        let mut engine = corner_engine();
        engine.toggle_mode();
        engine.toggle_mode();

        engine.generate_order(1).unwrap();
        engine.toggle_mode();
        engine.toggle_mode();

        engine.generate_order(1).unwrap();
        engine.start_simulation();
        engine.run_to_completion();
        engine.toggle_mode();

        assert_eq!(engine.observer().count(|e| *e == Event::Cancelled), 0);
        assert_eq!(engine.observer().count(|e| matches!(e, Event::Mode(_))), 5);
    }

    #[test]
    fn edits_only_in_edit_mode() {
        let mut engine = corner_engine();
        let before = engine.grid().clone();
        assert!(!engine.update_cell(2, 2, true));
        assert!(!engine.clear_grid());
        assert!(!engine.reset_to_default());
        assert_eq!(engine.grid(), &before);

        engine.toggle_mode();
        assert!(engine.update_cell(2, 2, true));
        assert!(engine.grid().is_shelf(c(2, 2)));
        assert!(engine.update_cell(2, 2, false));
        assert!(!engine.grid().is_shelf(c(2, 2)));
    }

    #[test]
    fn start_cell_and_out_of_range_are_rejected() {
        let mut engine = corner_engine();
        engine.toggle_mode();
        let before = engine.grid().clone();
        assert!(!engine.update_cell(0, 4, true));
        assert!(!engine.update_cell(-1, 0, true));
        assert!(!engine.update_cell(5, 5, true));
        assert_eq!(engine.grid(), &before);
    }

    #[test]
    fn clear_and_reset_layout() {
        let mut engine = corner_engine();
        engine.toggle_mode();
        assert!(engine.clear_grid());
        assert_eq!(engine.grid().shelf_count(), 0);

        assert!(engine.reset_to_default());
        assert_eq!(engine.grid(), &Grid::generate_default(5, c(0, 4)));
        assert_eq!(engine.observer().count(|e| *e == Event::Reset), 1);
    }

    #[test]
    fn leaving_edit_mode_commits_layout() {
        let mut engine = corner_engine();
        engine.toggle_mode();
        engine.update_cell(1, 1, true);
        assert_eq!(engine.toggle_mode(), Mode::Simulate);
        assert_eq!(engine.observer().count(|e| *e == Event::Committed), 1);
        assert_eq!(
            engine.observer().count(|e| matches!(e, Event::Mode(_))),
            2
        );

        // Runs after the edit use the edited layout.
        engine.generate_order(3).unwrap();
        for t in engine.ordered_targets() {
            assert_ne!(*t, c(1, 1));
        }
    }

    #[test]
    fn toggle_keeps_metrics() {
        let mut engine = corner_engine();
        engine.generate_order(1).unwrap();
        engine.start_simulation();
        engine.run_to_completion();
        let done = *engine.metrics();
        engine.toggle_mode();
        engine.toggle_mode();
        assert_eq!(*engine.metrics(), done);
        assert!(!engine.start_simulation(), "the order was discarded");
    }

    #[test]
    fn replace_grid_checks_mode_and_shape() {
        let mut engine = SimBuilder::new(SimConfig::with_grid_size(5), AStarFinder)
            .build()
            .unwrap();
        let layout = grid_with(5, &[(3, 3)]);
        assert!(matches!(
            engine.replace_grid(layout.clone()),
            Err(SimError::WrongMode { .. })
        ));

        engine.toggle_mode();
        assert!(matches!(
            engine.replace_grid(grid_with(6, &[])),
            Err(SimError::Config(_))
        ));
        engine.replace_grid(layout.clone()).unwrap();
        assert_eq!(engine.grid(), &layout);
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "serde"))]
mod serde_snapshot {
    use wh_core::SimConfig;
    use wh_spatial::AStarFinder;

    use crate::{SimBuilder, Snapshot};

    #[test]
    fn snapshot_serializes_with_upper_case_status() {
        let mut engine = SimBuilder::new(SimConfig::default(), AStarFinder).build().unwrap();
        engine.generate_order(2).unwrap();
        engine.start_simulation();
        let json = serde_json::to_string(&engine.snapshot()).unwrap();
        assert!(json.contains("\"status\":\"MOVING\""));
        assert!(json.contains("\"mode\":\"SIMULATE\""));
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, engine.snapshot());
    }
}
