//! Configuration error taxonomy

use thiserror::Error;

/// Errors in the caller-supplied configuration
///
/// These surface synchronously, before any table mutation, so a failed call
/// leaves the table in its pre-call state.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScrubError {
    #[error("unknown outlier method '{0}', expected 'cap' or 'remove'")]
    UnknownOutlierMethod(String),

    #[error("unknown export format '{0}', expected 'csv', 'json', 'parquet' or 'sql'")]
    UnknownExportFormat(String),

    #[error("unsupported source file format: {0}")]
    UnsupportedSource(String),
}
