//! Plain data row types written by output backends.

use std::fmt;

use wh_sim::Status;

/// The agent's position and totals right after one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepRow {
    /// 1-based run number within this trace.
    pub run:             u32,
    pub tick:            u64,
    pub x:               i32,
    pub y:               i32,
    pub status:          Status,
    pub distance_walked: u64,
    pub items_picked:    u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    /// Discarded by a mode switch or a new order.
    Cancelled,
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RunOutcome::Completed => "completed",
            RunOutcome::Cancelled => "cancelled",
        })
    }
}

/// Final metrics of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunRow {
    pub run:             u32,
    pub outcome:         RunOutcome,
    pub end_tick:        u64,
    pub total_items:     u32,
    pub items_picked:    u32,
    /// Targets dropped as unreachable during the walk.
    pub skipped:         u32,
    pub distance_walked: u64,
    pub time_elapsed:    u64,
}
