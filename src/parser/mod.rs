//! Ingestion connectors producing the in-memory table

mod csv;
mod excel;
mod json;
mod parquet;
mod sql;

use std::path::Path;

use anyhow::Result;

use crate::config::{Config, Source};
use crate::error::ScrubError;
use crate::model::Table;

pub use self::csv::CsvReader;
pub use self::excel::ExcelReader;
pub use self::json::JsonReader;
pub use self::parquet::ParquetReader;
pub use self::sql::SqlReader;

/// Trait for reading tabular data files
pub trait Reader: Send + Sync {
    /// Read a file into a table
    fn read(&self, path: &Path, config: &Config) -> Result<Table>;

    /// Check if this reader can handle the given file extension
    fn supports_extension(&self, ext: &str) -> bool;
}

/// Factory choosing a reader by file extension
pub struct ReaderFactory {
    readers: Vec<Box<dyn Reader>>,
}

impl Default for ReaderFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ReaderFactory {
    /// Create a factory holding all supported readers
    pub fn new() -> Self {
        Self {
            readers: vec![
                Box::new(CsvReader),
                Box::new(ExcelReader),
                Box::new(ParquetReader),
                Box::new(JsonReader),
            ],
        }
    }

    /// Get a reader for the given file path
    pub fn get_reader(&self, path: &Path) -> Result<&dyn Reader> {
        let mut ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        // No extension: sniff the content
        if ext.is_empty() {
            ext = detect_format(path).unwrap_or("").to_string();
        }

        for reader in &self.readers {
            if reader.supports_extension(&ext) {
                return Ok(reader.as_ref());
            }
        }

        Err(ScrubError::UnsupportedSource(ext).into())
    }

    /// Read a file using the appropriate reader
    pub fn read(&self, path: &Path, config: &Config) -> Result<Table> {
        let reader = self.get_reader(path)?;
        reader.read(path, config)
    }
}

/// Load the raw table described by the config
pub fn load(config: &Config) -> Result<Table> {
    match &config.source {
        Source::File(path) => ReaderFactory::new().read(path, config),
        Source::Sql { url, query } => SqlReader.read_query(url, query),
    }
}

/// Detect file format from content (for files without extension)
pub fn detect_format(path: &Path) -> Option<&'static str> {
    use std::fs::File;
    use std::io::{BufRead, BufReader};

    let file = File::open(path).ok()?;
    let mut reader = BufReader::new(file);
    let mut buffer = [0u8; 8];
    let bytes_read = std::io::Read::read(&mut reader, &mut buffer).ok()?;

    if bytes_read < 4 {
        return None;
    }

    // Check for Parquet magic bytes
    if &buffer[0..4] == b"PAR1" {
        return Some("parquet");
    }

    // Check for Excel ZIP format (xlsx)
    if &buffer[0..4] == b"PK\x03\x04" {
        return Some("xlsx");
    }

    // Check for old Excel format (xls)
    if &buffer[0..4] == b"\xD0\xCF\x11\xE0" {
        return Some("xls");
    }

    // Try to detect JSON
    reader.seek_relative(-(bytes_read as i64)).ok()?;
    let mut line = String::new();
    reader.read_line(&mut line).ok()?;
    let trimmed = line.trim_start();
    if trimmed.starts_with('[') || trimmed.starts_with('{') {
        return Some("json");
    }

    // Default to CSV
    Some("csv")
}
