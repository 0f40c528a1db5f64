//! Top-level simulation configuration.

use crate::{Coord, WhError, WhResult};

/// Default edge length of the square warehouse grid.
pub const DEFAULT_GRID_SIZE: i32 = 20;

/// Largest accepted grid edge.  Cell indices are computed in `i32`.
pub const MAX_GRID_SIZE: i32 = 1_000;

/// Simulation configuration.
///
/// Typically built with `SimConfig::default()` and tweaked, or loaded from a
/// JSON file by the application (requires the `serde` feature).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Edge length of the square grid.  Default: 20.
    pub grid_size: i32,

    /// The agent's home cell.  Never a shelf and immune to edits.
    /// Default: bottom-left corner `(0, grid_size - 1)`.
    pub start: Coord,

    /// Virtual milliseconds between two agent steps.  Default: 250.
    pub step_interval_ms: u64,

    /// Virtual milliseconds the agent spends picking at a target.  Default: 2000.
    pub pick_duration_ms: u64,

    /// Virtual milliseconds per `time_elapsed` increment.  Default: 1000.
    pub heartbeat_interval_ms: u64,

    /// Item count used when the host does not specify one.  Default: 5.
    pub default_item_count: usize,

    /// Master RNG seed for target sampling.  The same seed and grid always
    /// produce the same orders.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::with_grid_size(DEFAULT_GRID_SIZE)
    }
}

impl SimConfig {
    /// Defaults for an `n × n` grid with the start in the bottom-left corner.
    pub fn with_grid_size(n: i32) -> Self {
        Self {
            grid_size:             n,
            start:                 Coord::new(0, n - 1),
            step_interval_ms:      250,
            pick_duration_ms:      2_000,
            heartbeat_interval_ms: 1_000,
            default_item_count:    5,
            seed:                  0,
        }
    }

    /// `true` if `c` lies on the configured grid.
    #[inline]
    pub fn in_bounds(&self, c: Coord) -> bool {
        c.x >= 0 && c.y >= 0 && c.x < self.grid_size && c.y < self.grid_size
    }

    /// Reject configurations the engine cannot run.
    pub fn validate(&self) -> WhResult<()> {
        if self.grid_size <= 0 {
            return Err(WhError::Config(format!(
                "grid_size must be positive, got {}",
                self.grid_size
            )));
        }
        if self.grid_size > MAX_GRID_SIZE {
            return Err(WhError::Config(format!(
                "grid_size must be at most {MAX_GRID_SIZE}, got {}",
                self.grid_size
            )));
        }
        if !self.in_bounds(self.start) {
            return Err(WhError::InvalidCoordinate(self.start));
        }
        if self.step_interval_ms == 0 || self.heartbeat_interval_ms == 0 {
            return Err(WhError::Config(
                "step and heartbeat intervals must be non-zero".into(),
            ));
        }
        Ok(())
    }
}
