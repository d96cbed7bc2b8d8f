//! Configuration handling for datascrub

use std::path::PathBuf;

use crate::error::ScrubError;

/// Where the raw table comes from
#[derive(Debug, Clone)]
pub enum Source {
    /// A file on disk; the format is chosen by extension or content sniffing
    File(PathBuf),
    /// A SQLite database plus the query producing the table
    Sql { url: String, query: String },
}

/// Export format for the cleaned table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
    Parquet,
    Sql,
}

impl std::str::FromStr for ExportFormat {
    type Err = ScrubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            "parquet" => Ok(ExportFormat::Parquet),
            "sql" | "sqlite" => Ok(ExportFormat::Sql),
            _ => Err(ScrubError::UnknownExportFormat(s.to_string())),
        }
    }
}

/// Configuration for loading the raw table
#[derive(Debug, Clone)]
pub struct Config {
    /// Source of the raw table
    pub source: Source,
    /// For Excel files: which sheet to read
    pub sheet_name: Option<String>,
}

impl Config {
    /// Create a config reading from a file
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            source: Source::File(path.into()),
            sheet_name: None,
        }
    }

    /// Create a config reading the result of a query against a SQLite database
    pub fn from_sql(url: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            source: Source::Sql {
                url: url.into(),
                query: query.into(),
            },
            sheet_name: None,
        }
    }

    /// Set the Excel sheet to read
    pub fn with_sheet_name(mut self, name: impl Into<String>) -> Self {
        self.sheet_name = Some(name.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_format_from_str() {
        assert_eq!("csv".parse::<ExportFormat>(), Ok(ExportFormat::Csv));
        assert_eq!("Parquet".parse::<ExportFormat>(), Ok(ExportFormat::Parquet));
        assert_eq!(
            "excel".parse::<ExportFormat>(),
            Err(ScrubError::UnknownExportFormat("excel".to_string()))
        );
    }
}
