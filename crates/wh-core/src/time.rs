//! Virtual time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter where one tick is one
//! virtual millisecond.  The engine never reads a wall clock: a host (UI
//! loop, test, demo binary) decides how fast virtual time advances.  Integer
//! ticks keep timer arithmetic exact, so two timers due at the same instant
//! really are due at the same instant.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute virtual-time instant in milliseconds since engine creation.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `ms` milliseconds after `self`.
    #[inline]
    pub fn offset(self, ms: u64) -> Tick {
        Tick(self.0.saturating_add(ms))
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}ms", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// The engine's notion of "now".
///
/// Only moves forward.  `advance_to` with an earlier tick is ignored rather
/// than rewinding, so a timer that fires at `now` can never move time back.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward to `tick` (no-op if `tick` is in the past).
    #[inline]
    pub fn advance_to(&mut self, tick: Tick) {
        if tick > self.current_tick {
            self.current_tick = tick;
        }
    }

    /// Elapsed virtual milliseconds since tick 0.
    #[inline]
    pub fn elapsed_ms(&self) -> u64 {
        self.current_tick.0
    }

    /// Break elapsed time into `(minutes, seconds, millis)` for logging.
    pub fn elapsed_msm(&self) -> (u64, u32, u32) {
        let ms = self.current_tick.0;
        let minutes = ms / 60_000;
        let seconds = ((ms % 60_000) / 1_000) as u32;
        let millis = (ms % 1_000) as u32;
        (minutes, seconds, millis)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (m, s, ms) = self.elapsed_msm();
        write!(f, "{} ({:02}:{:02}.{:03})", self.current_tick, m, s, ms)
    }
}
