//! JSON export

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::{Map, Value};

use crate::model::{CellValue, Table};

use super::Writer;

/// Writer for JSON array files
pub struct JsonWriter {
    pretty: bool,
}

impl JsonWriter {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

impl Default for JsonWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl Writer for JsonWriter {
    fn write(&self, table: &Table, path: &Path) -> Result<()> {
        let rows: Vec<Value> = (0..table.row_count())
            .map(|row| {
                let mut object = Map::with_capacity(table.column_count());
                for column in &table.columns {
                    object.insert(column.name.clone(), cell_to_json(&column.values[row]));
                }
                Value::Object(object)
            })
            .collect();

        let file = File::create(path)
            .with_context(|| format!("Failed to create JSON file: {}", path.display()))?;
        let writer = BufWriter::new(file);
        if self.pretty {
            serde_json::to_writer_pretty(writer, &rows).context("Failed to write JSON")?;
        } else {
            serde_json::to_writer(writer, &rows).context("Failed to write JSON")?;
        }
        Ok(())
    }
}

fn cell_to_json(value: &CellValue) -> Value {
    match value {
        CellValue::Null => Value::Null,
        CellValue::Bool(b) => Value::Bool(*b),
        CellValue::Int(i) => Value::from(*i),
        CellValue::Float(f) => serde_json::Number::from_f64(*f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        CellValue::Str(s) => Value::String(s.to_string()),
        CellValue::Date(d) => Value::String(d.to_string()),
        CellValue::DateTime(dt) => Value::String(dt.format("%Y-%m-%dT%H:%M:%S").to_string()),
    }
}
