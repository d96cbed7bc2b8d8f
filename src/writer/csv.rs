//! CSV export

use std::path::Path;

use anyhow::{Context, Result};

use crate::model::{CellValue, Table};

use super::Writer;

/// Writer for CSV files
pub struct CsvWriter;

impl Writer for CsvWriter {
    fn write(&self, table: &Table, path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;

        writer
            .write_record(table.columns.iter().map(|c| c.name.as_str()))
            .context("Failed to write CSV header")?;

        for row in 0..table.row_count() {
            let record: Vec<String> = table
                .columns
                .iter()
                .map(|column| field(&column.values[row]))
                .collect();
            writer
                .write_record(&record)
                .with_context(|| format!("Failed to write CSV row {}", row + 2))?;
        }

        writer.flush().context("Failed to flush CSV file")?;
        Ok(())
    }
}

/// Null cells become empty fields
fn field(value: &CellValue) -> String {
    match value {
        CellValue::Null => String::new(),
        other => other.display().into_owned(),
    }
}
