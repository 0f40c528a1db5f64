//! `wh-output` — CSV trace output for picking runs.
//!
//! | File        | One row per                                   |
//! |-------------|-----------------------------------------------|
//! | `steps.csv` | agent step (position, status, running totals) |
//! | `runs.csv`  | finished or cancelled run                     |
//!
//! Writers implement [`OutputWriter`] and are driven by [`TraceObserver`],
//! which implements `wh_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use wh_output::{CsvWriter, TraceObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut engine = SimBuilder::new(config, AStarFinder)
//!     .observer(TraceObserver::new(writer))
//!     .build()?;
//! // ... generate, start, run ...
//! let mut trace = engine.into_observer();
//! trace.finish()?;
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::TraceObserver;
pub use row::{RunOutcome, RunRow, StepRow};
pub use writer::OutputWriter;
