//! CSV output backend.
//!
//! Creates `steps.csv` and `runs.csv` in the configured output directory.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{OutputResult, RunRow, StepRow};

pub struct CsvWriter {
    steps:    Writer<File>,
    runs:     Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Create the two CSV files in `dir` (which must exist) and write the
    /// header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut steps = Writer::from_path(dir.join("steps.csv"))?;
        steps.write_record(["run", "tick", "x", "y", "status", "distance_walked", "items_picked"])?;

        let mut runs = Writer::from_path(dir.join("runs.csv"))?;
        runs.write_record([
            "run",
            "outcome",
            "end_tick",
            "total_items",
            "items_picked",
            "skipped",
            "distance_walked",
            "time_elapsed",
        ])?;

        Ok(Self { steps, runs, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_step(&mut self, row: &StepRow) -> OutputResult<()> {
        self.steps.write_record(&[
            row.run.to_string(),
            row.tick.to_string(),
            row.x.to_string(),
            row.y.to_string(),
            row.status.to_string(),
            row.distance_walked.to_string(),
            row.items_picked.to_string(),
        ])?;
        Ok(())
    }

    fn write_run(&mut self, row: &RunRow) -> OutputResult<()> {
        self.runs.write_record(&[
            row.run.to_string(),
            row.outcome.to_string(),
            row.end_tick.to_string(),
            row.total_items.to_string(),
            row.items_picked.to_string(),
            row.skipped.to_string(),
            row.distance_walked.to_string(),
            row.time_elapsed.to_string(),
        ])?;
        self.runs.flush()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.steps.flush()?;
        self.runs.flush()?;
        Ok(())
    }
}
