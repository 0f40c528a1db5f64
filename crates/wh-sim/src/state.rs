//! Engine-owned state types: status, mode, metrics, and snapshots.

use std::fmt;

use wh_core::{Coord, Tick};

// ── Status ────────────────────────────────────────────────────────────────────

/// What the agent is doing.  Owned by the engine; nothing else writes it.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum Status {
    #[default]
    Idle,
    Moving,
    Picking,
    Returning,
    Completed,
}

impl Status {
    /// `true` while a run is in flight (the heartbeat counts these).
    #[inline]
    pub fn is_active(self) -> bool {
        matches!(self, Status::Moving | Status::Picking | Status::Returning)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Status::Idle      => "IDLE",
            Status::Moving    => "MOVING",
            Status::Picking   => "PICKING",
            Status::Returning => "RETURNING",
            Status::Completed => "COMPLETED",
        })
    }
}

// ── Mode ──────────────────────────────────────────────────────────────────────

/// Whether the host is running orders or editing the layout.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum Mode {
    #[default]
    Simulate,
    Edit,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Simulate => "SIMULATE",
            Mode::Edit     => "EDIT",
        })
    }
}

// ── Metrics ───────────────────────────────────────────────────────────────────

/// Run counters.  Reset by `generate_order`, frozen at `Completed`.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metrics {
    /// Cells moved, one per step.
    pub distance_walked: u64,
    /// Heartbeats counted while the run was active.
    pub time_elapsed:    u64,
    pub items_picked:    u32,
    /// Items requested by the order (not necessarily reachable).
    pub total_items:     u32,
}

impl Metrics {
    pub fn for_order(total_items: u32) -> Self {
        Self { total_items, ..Self::default() }
    }
}

// ── Snapshot ──────────────────────────────────────────────────────────────────

/// Everything a display needs to draw one frame.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    pub tick:              Tick,
    pub mode:              Mode,
    pub status:            Status,
    pub agent:             Coord,
    pub metrics:           Metrics,
    /// The whole order in visiting sequence.
    pub ordered_targets:   Vec<Coord>,
    /// Targets not yet reached or skipped.
    pub remaining_targets: Vec<Coord>,
    /// The leg being walked, for highlighting.  Empty between legs.
    pub current_leg:       Vec<Coord>,
    /// The optimizer's stitched route.  Cleared on completion.
    pub route_preview:     Vec<Coord>,
}
