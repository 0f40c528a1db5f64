//! `wh-spatial` — warehouse grid, layout snapshots, and path finding.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                     |
//! |------------|--------------------------------------------------------------|
//! | [`grid`]   | `Cell`, `Grid` (default layout, edits, target sampling)      |
//! | [`layout`] | `CellRecord`, JSON snapshot load/save                        |
//! | [`router`] | `PathFinder` trait, `Path`, `AStarFinder`                    |
//! | [`error`]  | `SpatialError`, `SpatialResult<T>`                           |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `wh-core` types.        |

pub mod error;
pub mod grid;
pub mod layout;
pub mod router;


pub use error::{SpatialError, SpatialResult};
pub use grid::{Cell, Grid};
pub use layout::CellRecord;
pub use router::{step_count, AStarFinder, Path, PathFinder};
