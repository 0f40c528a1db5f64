//! `wh-sim` — the picking simulation engine.
//!
//! # Run lifecycle
//!
//! ```text
//! generate_order(n)   sample n pick faces, solve the exact route, reset
//!                     metrics, agent to start, status IDLE
//! start_simulation()  IDLE → MOVING, first leg re-pathed from the agent
//!   ① Step timer      one cell per step interval; leg end →
//!                       outbound leg : PICKING, arm pick timer
//!                       return leg   : COMPLETED
//!   ② Pick timer      items_picked += 1, MOVING, next leg
//!                     (no targets left → RETURNING, walk home)
//!   ③ Heartbeat       time_elapsed += 1 while MOVING/PICKING/RETURNING
//! toggle_mode()       SIMULATE → EDIT clears every timer first, then drops
//!                     the order and returns the agent to start (IDLE)
//! ```
//!
//! Time is virtual: the host calls [`SimulationEngine::advance`] (or
//! [`run_to_completion`][SimulationEngine::run_to_completion]) and the engine
//! fires whatever timers fall due, one at a time, in order.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use wh_core::SimConfig;
//! use wh_sim::SimBuilder;
//! use wh_spatial::AStarFinder;
//!
//! let mut engine = SimBuilder::new(SimConfig::default(), AStarFinder).build()?;
//! engine.generate_order(5)?;
//! engine.start_simulation();
//! engine.run_to_completion();
//! println!("{:?}", engine.metrics());
//! ```

pub mod builder;
pub mod engine;
pub mod error;
pub mod observer;
pub mod state;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use engine::SimulationEngine;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use state::{Metrics, Mode, Snapshot, Status};
