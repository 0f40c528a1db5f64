//! The `OutputWriter` trait implemented by trace backends.

use crate::{OutputResult, RunRow, StepRow};

/// Trait implemented by trace writers.
///
/// Errors surface through [`TraceObserver::take_error`][crate::TraceObserver::take_error]
/// when the writer is driven by the observer.
pub trait OutputWriter {
    fn write_step(&mut self, row: &StepRow) -> OutputResult<()>;

    fn write_run(&mut self, row: &RunRow) -> OutputResult<()>;

    /// Flush all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
