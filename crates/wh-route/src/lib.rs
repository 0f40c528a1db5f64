//! `wh-route` — exact visiting-order optimization for one picking order.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                 |
//! |---------------|----------------------------------------------------------|
//! | [`permute`]   | `HeapPermutations` — iterative Heap's algorithm          |
//! | [`optimizer`] | `RouteOptimizer`, `LegTable`, `Route`                    |
//! | [`error`]     | `RouteError`, `RouteResult<T>`                           |
//!
//! # Exactness and its price
//!
//! The optimizer evaluates every ordering of the targets, so the route it
//! returns is globally shortest under the supplied [`PathFinder`]'s
//! distances.  Cost grows as N!: 8 targets is 40 320 orderings, 10 is already
//! 3.6 M.  [`PRACTICAL_TARGET_LIMIT`] marks where solves stop feeling
//! instantaneous.  There is no heuristic fallback here; a host that needs
//! larger orders must bring its own solver and give up the optimality
//! guarantee.
//!
//! [`PathFinder`]: wh_spatial::PathFinder

pub mod error;
pub mod optimizer;
pub mod permute;


pub use error::{RouteError, RouteResult};
pub use optimizer::{LegTable, Route, RouteOptimizer, PRACTICAL_TARGET_LIMIT};
pub use permute::{factorial, HeapPermutations};
