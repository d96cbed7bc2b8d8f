//! SQLite query reader

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use rusqlite::types::ValueRef;
use rusqlite::Connection;

use crate::config::Config;
use crate::model::{CellValue, Column, Table};

use super::Reader;

/// Reader for the result set of a query against a SQLite database
pub struct SqlReader;

impl SqlReader {
    /// Run the query and collect its result set into a table
    pub fn read_query(&self, url: &str, query: &str) -> Result<Table> {
        let connection = Connection::open(url)
            .with_context(|| format!("Failed to open SQLite database: {}", url))?;

        let mut statement = connection
            .prepare(query)
            .with_context(|| format!("Failed to prepare query: {}", query))?;

        let columns: Vec<Column> = statement
            .column_names()
            .into_iter()
            .map(Column::new)
            .collect();
        let column_count = columns.len();
        let mut table = Table::new(columns);

        let mut rows = statement.query([]).context("Failed to run query")?;
        while let Some(row) = rows.next().context("Failed to fetch row")? {
            let mut cells = Vec::with_capacity(column_count);
            for index in 0..column_count {
                let value = row.get_ref(index).context("Failed to read column")?;
                cells.push(convert_value(value));
            }
            table.add_row(cells);
        }

        table.infer_kinds();
        Ok(table)
    }
}

impl Reader for SqlReader {
    fn read(&self, path: &Path, _config: &Config) -> Result<Table> {
        anyhow::bail!(
            "SQLite sources need a query; got bare path {}",
            path.display()
        )
    }

    fn supports_extension(&self, ext: &str) -> bool {
        matches!(ext.to_lowercase().as_str(), "db" | "sqlite" | "sqlite3")
    }
}

fn convert_value(value: ValueRef<'_>) -> CellValue {
    match value {
        ValueRef::Null => CellValue::Null,
        ValueRef::Integer(i) => CellValue::Int(i),
        ValueRef::Real(f) => CellValue::Float(f),
        ValueRef::Text(bytes) => match std::str::from_utf8(bytes) {
            // SQLite stores dates as text
            Ok(s) if s.trim().is_empty() => CellValue::Null,
            Ok(s) => CellValue::parse_temporal(s).unwrap_or_else(|| CellValue::Str(Arc::from(s))),
            Err(_) => CellValue::Null,
        },
        ValueRef::Blob(_) => CellValue::Null,
    }
}
