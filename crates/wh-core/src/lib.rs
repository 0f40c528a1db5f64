//! `wh-core` — foundational types for the warehouse picking simulator.
//!
//! Every other `wh-*` crate depends on this one.  It has no `wh-*`
//! dependencies and only `rand` and `thiserror` externally (plus optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                |
//! |-------------|---------------------------------------------------------|
//! | [`coord`]   | `Coord`, `Direction`, Manhattan distance                |
//! | [`time`]    | `Tick` (virtual milliseconds), `SimClock`               |
//! | [`config`]  | `SimConfig` — grid size, start cell, timer intervals    |
//! | [`rng`]     | `SimRng` — seeded RNG for order generation              |
//! | [`error`]   | `WhError`, `WhResult`                                   |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod coord;
pub mod error;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{SimConfig, MAX_GRID_SIZE};
pub use coord::{Coord, Direction};
pub use error::{WhError, WhResult};
pub use rng::SimRng;
pub use time::{SimClock, Tick};
