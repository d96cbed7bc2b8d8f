//! Export connectors serializing the cleaned table

mod csv;
mod json;
mod parquet;
mod sql;

use std::path::Path;

use anyhow::Result;

use crate::config::ExportFormat;
use crate::model::{Column, ColumnKind, Table};

pub use self::csv::CsvWriter;
pub use self::json::JsonWriter;
pub use self::parquet::ParquetWriter;
pub use self::sql::SqlWriter;

/// Trait for table writers
pub trait Writer {
    /// Serialize the table to the target path
    fn write(&self, table: &Table, path: &Path) -> Result<()>;
}

/// Factory for creating writers based on format
pub struct WriterFactory;

impl WriterFactory {
    /// Create a writer for the format
    pub fn create(format: ExportFormat) -> Box<dyn Writer> {
        match format {
            ExportFormat::Csv => Box::new(CsvWriter),
            ExportFormat::Json => Box::new(JsonWriter::new()),
            ExportFormat::Parquet => Box::new(ParquetWriter),
            ExportFormat::Sql => Box::new(SqlWriter::default()),
        }
    }
}

/// Serialize a table in the given format
pub fn write(table: &Table, path: &Path, format: ExportFormat) -> Result<()> {
    WriterFactory::create(format).write(table, path)
}

/// Kind the column's cells actually widen to, for schema-carrying sinks
pub(crate) fn effective_kind(column: &Column) -> ColumnKind {
    let mut kind = ColumnKind::Unknown;
    for value in column.non_null() {
        kind = kind.widen(value.kind());
    }
    kind
}
