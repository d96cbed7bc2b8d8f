//! The cleaning engine, one module per pipeline stage

pub mod classify;
mod garbage;
mod impute;
mod optimize;
mod outliers;
mod standardize;
pub mod stats;

use serde::Serialize;
use tabled::Tabled;

pub use garbage::{remove_garbage, GarbageOutcome};
pub use impute::{impute_missing, ImputeOutcome};
pub use optimize::{optimize, OptimizeOutcome};
pub use outliers::{handle_outliers, OutlierMethod, OutlierOutcome};
pub use standardize::{normalize_name, standardize, StandardizeOutcome};

/// Record of one applied stage
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct StageRecord {
    /// Stage name
    pub stage: String,
    /// Rows going in
    pub rows_before: usize,
    /// Rows coming out
    pub rows_after: usize,
    /// What the stage changed
    pub detail: String,
}

/// Summary of a cleaning run
#[derive(Debug, Clone, Default, Serialize)]
pub struct CleanReport {
    pub initial_rows: usize,
    pub initial_columns: usize,
    pub stages: Vec<StageRecord>,
}

impl CleanReport {
    /// Start a report from the freshly loaded table shape
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            initial_rows: rows,
            initial_columns: columns,
            stages: Vec::new(),
        }
    }

    /// Append a stage record
    pub fn record(
        &mut self,
        stage: impl Into<String>,
        rows_before: usize,
        rows_after: usize,
        detail: impl Into<String>,
    ) {
        self.stages.push(StageRecord {
            stage: stage.into(),
            rows_before,
            rows_after,
            detail: detail.into(),
        });
    }
}
