//! SQLite export

use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::types::Value as SqlValue;
use rusqlite::Connection;

use crate::model::{CellValue, ColumnKind, Table};

use super::{effective_kind, Writer};

/// Writer replacing a table in a SQLite database
pub struct SqlWriter {
    table_name: String,
}

impl SqlWriter {
    /// Write into a specific table
    pub fn with_table_name(name: impl Into<String>) -> Self {
        Self {
            table_name: name.into(),
        }
    }
}

impl Default for SqlWriter {
    fn default() -> Self {
        Self::with_table_name("cleaned_data")
    }
}

impl Writer for SqlWriter {
    fn write(&self, table: &Table, path: &Path) -> Result<()> {
        let mut connection = Connection::open(path)
            .with_context(|| format!("Failed to open SQLite database: {}", path.display()))?;

        let column_defs: Vec<String> = table
            .columns
            .iter()
            .map(|c| format!("\"{}\" {}", c.name, sql_type(effective_kind(c))))
            .collect();

        // Replace semantics: the target table is rebuilt from scratch
        let transaction = connection.transaction().context("Failed to start transaction")?;
        transaction
            .execute_batch(&format!(
                "DROP TABLE IF EXISTS \"{name}\"; CREATE TABLE \"{name}\" ({defs});",
                name = self.table_name,
                defs = column_defs.join(", ")
            ))
            .context("Failed to create table")?;

        let placeholders = vec!["?"; table.column_count()].join(", ");
        let insert = format!(
            "INSERT INTO \"{}\" VALUES ({})",
            self.table_name, placeholders
        );
        {
            let mut statement = transaction
                .prepare(&insert)
                .context("Failed to prepare insert")?;
            for row in 0..table.row_count() {
                let params: Vec<SqlValue> = table
                    .columns
                    .iter()
                    .map(|column| convert_value(&column.values[row]))
                    .collect();
                statement
                    .execute(rusqlite::params_from_iter(params))
                    .with_context(|| format!("Failed to insert row {}", row + 1))?;
            }
        }
        transaction.commit().context("Failed to commit")?;
        Ok(())
    }
}

fn sql_type(kind: ColumnKind) -> &'static str {
    match kind {
        ColumnKind::Bool => "INTEGER",
        ColumnKind::Numeric => "REAL",
        _ => "TEXT",
    }
}

fn convert_value(value: &CellValue) -> SqlValue {
    match value {
        CellValue::Null => SqlValue::Null,
        CellValue::Bool(b) => SqlValue::Integer(i64::from(*b)),
        CellValue::Int(i) => SqlValue::Integer(*i),
        CellValue::Float(f) => SqlValue::Real(*f),
        CellValue::Str(s) => SqlValue::Text(s.to_string()),
        CellValue::Date(d) => SqlValue::Text(d.to_string()),
        CellValue::DateTime(dt) => SqlValue::Text(dt.format("%Y-%m-%d %H:%M:%S").to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Column;
    use crate::parser::SqlReader;

    #[test]
    fn test_written_table_reads_back() {
        let mut name = Column::new("name");
        name.values = vec![CellValue::from("Juan"), CellValue::from("Ana")];
        let mut age = Column::new("age");
        age.values = vec![CellValue::Int(25), CellValue::Null];
        let table = Table::new(vec![name, age]);

        let file = tempfile::NamedTempFile::with_suffix(".db").unwrap();
        SqlWriter::default().write(&table, file.path()).unwrap();

        let url = file.path().to_string_lossy().into_owned();
        let read_back = SqlReader
            .read_query(&url, "SELECT * FROM cleaned_data ORDER BY name")
            .unwrap();
        assert_eq!(read_back.row_count(), 2);
        assert_eq!(read_back.columns[0].values[1], CellValue::from("Juan"));
        assert_eq!(read_back.columns[1].values[0], CellValue::Null);
    }
}
