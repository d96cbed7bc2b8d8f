//! Chainable cleaning pipeline owning the table

use std::path::Path;

use anyhow::Result;
use tracing::info;

use crate::clean::{
    handle_outliers, impute_missing, optimize, remove_garbage, standardize, CleanReport,
    OutlierMethod,
};
use crate::config::{Config, ExportFormat};
use crate::model::Table;
use crate::parser;
use crate::writer;

/// Default IQR multiplier for outlier bounds
pub const DEFAULT_OUTLIER_THRESHOLD: f64 = 1.5;

/// The pipeline owns one table for its lifetime and mutates it in place
///
/// Stages are owned-`self` methods returning the pipeline, so cleaning runs
/// read as a chain:
///
/// ```no_run
/// use datascrub::config::{Config, ExportFormat};
/// use datascrub::clean::OutlierMethod;
/// use datascrub::pipeline::Pipeline;
///
/// # fn main() -> anyhow::Result<()> {
/// Pipeline::load(&Config::from_file("raw.csv"))?
///     .standardize()
///     .handle_garbage()
///     .impute_missing()
///     .handle_outliers(1.5, OutlierMethod::Cap)
///     .optimize()
///     .export("clean.csv", ExportFormat::Csv)?;
/// # Ok(())
/// # }
/// ```
///
/// Stage order is the caller's choice; the order above is the conventional
/// one, since later stages assume earlier cleanup (imputing before outlier
/// handling keeps missing cells out of the bound comparisons).
#[derive(Debug)]
pub struct Pipeline {
    table: Table,
    report: CleanReport,
}

impl Pipeline {
    /// Wrap an already-loaded table
    pub fn new(table: Table) -> Self {
        let report = CleanReport::new(table.row_count(), table.column_count());
        info!(
            rows = table.row_count(),
            columns = table.column_count(),
            "table loaded"
        );
        Self { table, report }
    }

    /// Load the raw table described by the config
    pub fn load(config: &Config) -> Result<Self> {
        let table = parser::load(config)?;
        Ok(Self::new(table))
    }

    /// Normalize column names and trim text cells
    pub fn standardize(mut self) -> Self {
        let rows = self.table.row_count();
        let outcome = standardize(&mut self.table);
        info!(
            renamed = outcome.renamed,
            trimmed = outcome.trimmed,
            "standardized"
        );
        self.report.record(
            "standardize",
            rows,
            rows,
            format!("{} columns renamed, {} cells trimmed", outcome.renamed, outcome.trimmed),
        );
        self
    }

    /// Drop exact-duplicate and all-null rows
    pub fn handle_garbage(mut self) -> Self {
        let before = self.table.row_count();
        let outcome = remove_garbage(&mut self.table);
        info!(
            duplicates = outcome.duplicate_rows,
            null_rows = outcome.null_rows,
            "garbage removed"
        );
        self.report.record(
            "handle_garbage",
            before,
            self.table.row_count(),
            format!("{} duplicates, {} all-null rows", outcome.duplicate_rows, outcome.null_rows),
        );
        self
    }

    /// Fill missing cells with the column median or mode
    pub fn impute_missing(mut self) -> Self {
        let rows = self.table.row_count();
        let outcome = impute_missing(&mut self.table);
        info!(
            columns = outcome.columns_imputed,
            cells = outcome.cells_filled,
            "missing values imputed"
        );
        self.report.record(
            "impute_missing",
            rows,
            rows,
            format!("{} cells filled across {} columns", outcome.cells_filled, outcome.columns_imputed),
        );
        self
    }

    /// Cap or remove IQR outliers in numeric columns
    ///
    /// `threshold` is the IQR multiplier ([`DEFAULT_OUTLIER_THRESHOLD`] is the
    /// usual 1.5). An unknown method never reaches this point: method strings
    /// are validated when parsed into [`OutlierMethod`], before the table is
    /// touched.
    pub fn handle_outliers(mut self, threshold: f64, method: OutlierMethod) -> Self {
        let before = self.table.row_count();
        let outcome = handle_outliers(&mut self.table, threshold, method);
        info!(
            ?method,
            threshold,
            capped = outcome.cells_capped,
            removed = outcome.rows_removed,
            "outliers handled"
        );
        let detail = match method {
            OutlierMethod::Cap => format!(
                "{} cells capped across {} columns",
                outcome.cells_capped, outcome.columns_affected
            ),
            OutlierMethod::Remove => format!("{} rows removed", outcome.rows_removed),
        };
        self.report
            .record("handle_outliers", before, self.table.row_count(), detail);
        self
    }

    /// Promote datetime columns and compact low-cardinality text
    pub fn optimize(mut self) -> Self {
        let rows = self.table.row_count();
        let outcome = optimize(&mut self.table);
        info!(
            datetime = outcome.datetime_columns,
            categorical = outcome.categorical_columns,
            "schema optimized"
        );
        self.report.record(
            "optimize",
            rows,
            rows,
            format!(
                "{} datetime, {} categorical columns",
                outcome.datetime_columns, outcome.categorical_columns
            ),
        );
        self
    }

    /// Serialize the cleaned table
    pub fn export(&self, path: impl AsRef<Path>, format: ExportFormat) -> Result<()> {
        writer::write(&self.table, path.as_ref(), format)?;
        info!(path = %path.as_ref().display(), ?format, "table exported");
        Ok(())
    }

    /// The current table
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// What each applied stage did
    pub fn report(&self) -> &CleanReport {
        &self.report
    }

    /// Give up the table
    pub fn into_table(self) -> Table {
        self.table
    }
}
