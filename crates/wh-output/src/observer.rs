//! `TraceObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use wh_core::{Coord, Tick};
use wh_route::Route;
use wh_sim::{Metrics, SimObserver, Status};

use crate::row::{RunOutcome, RunRow, StepRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes every step and every run summary to an
/// [`OutputWriter`].
///
/// A run opens when status leaves `Idle` for `Moving` and closes at
/// `on_run_complete`, or as cancelled if status drops back to `Idle` first
/// (edit mode, or a new order mid-run).
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  Check with [`take_error`][Self::take_error].
pub struct TraceObserver<W: OutputWriter> {
    writer:     W,
    run:        u32,
    in_run:     bool,
    skipped:    u32,
    /// Latest metrics seen during the open run.
    last:       Metrics,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> TraceObserver<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            run:        0,
            in_run:     false,
            skipped:    0,
            last:       Metrics::default(),
            last_error: None,
        }
    }

    /// Number of runs started so far.
    pub fn runs_started(&self) -> u32 {
        self.run
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Flush the writer.  Returns the first stored error ahead of any flush
    /// error.
    pub fn finish(&mut self) -> OutputResult<()> {
        let flushed = self.writer.finish();
        match self.last_error.take() {
            Some(e) => Err(e),
            None => flushed,
        }
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn close_run(&mut self, tick: Tick, outcome: RunOutcome, metrics: Metrics) {
        if !self.in_run {
            return;
        }
        self.in_run = false;
        let row = RunRow {
            run:             self.run,
            outcome,
            end_tick:        tick.0,
            total_items:     metrics.total_items,
            items_picked:    metrics.items_picked,
            skipped:         self.skipped,
            distance_walked: metrics.distance_walked,
            time_elapsed:    metrics.time_elapsed,
        };
        let result = self.writer.write_run(&row);
        self.store_err(result);
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for TraceObserver<W> {
    fn on_status_change(&mut self, tick: Tick, from: Status, to: Status) {
        match (from, to) {
            (Status::Idle, Status::Moving) => {
                self.run += 1;
                self.in_run = true;
                self.skipped = 0;
            }
            (_, Status::Idle) => {
                let last = self.last;
                self.close_run(tick, RunOutcome::Cancelled, last);
            }
            _ => {}
        }
    }

    fn on_order_generated(&mut self, _tick: Tick, _route: &Route, requested: usize) {
        self.last = Metrics::for_order(requested.try_into().unwrap_or(u32::MAX));
    }

    fn on_step(&mut self, tick: Tick, status: Status, agent: Coord, metrics: &Metrics) {
        self.last = *metrics;
        if !self.in_run {
            return;
        }
        let row = StepRow {
            run:             self.run,
            tick:            tick.0,
            x:               agent.x,
            y:               agent.y,
            status,
            distance_walked: metrics.distance_walked,
            items_picked:    metrics.items_picked,
        };
        let result = self.writer.write_step(&row);
        self.store_err(result);
    }

    fn on_pick(&mut self, _tick: Tick, _target: Coord, metrics: &Metrics) {
        self.last = *metrics;
    }

    fn on_target_skipped(&mut self, _tick: Tick, _target: Coord) {
        self.skipped += 1;
    }

    fn on_heartbeat(&mut self, _tick: Tick, metrics: &Metrics) {
        self.last = *metrics;
    }

    fn on_run_complete(&mut self, tick: Tick, metrics: &Metrics) {
        self.last = *metrics;
        self.close_run(tick, RunOutcome::Completed, *metrics);
    }
}
