//! Excel file reader (xlsx, xls, ods)

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use calamine::{open_workbook_auto, Data, Range, Reader as _};

use crate::config::Config;
use crate::model::{CellValue, Column, Table};

use super::Reader;

/// Reader for Excel files
pub struct ExcelReader;

impl Reader for ExcelReader {
    fn read(&self, path: &Path, config: &Config) -> Result<Table> {
        let mut workbook = open_workbook_auto(path)
            .with_context(|| format!("Failed to open Excel file: {}", path.display()))?;

        let sheet_name = if let Some(ref name) = config.sheet_name {
            name.clone()
        } else {
            // Use first sheet
            let sheets = workbook.sheet_names();
            if sheets.is_empty() {
                bail!("No sheets found in workbook");
            }
            sheets[0].clone()
        };

        let range: Range<Data> = workbook
            .worksheet_range(&sheet_name)
            .with_context(|| format!("Failed to read sheet: {}", sheet_name))?;

        parse_range(range)
    }

    fn supports_extension(&self, ext: &str) -> bool {
        matches!(ext.to_lowercase().as_str(), "xlsx" | "xls" | "ods" | "xlsm")
    }
}

fn parse_range(range: Range<Data>) -> Result<Table> {
    if range.get_size().0 == 0 {
        bail!("Empty sheet");
    }

    // First row is the header
    let header_row = range.rows().next().context("No header row found")?;
    let columns: Vec<Column> = header_row
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            let name = cell_to_string(cell);
            Column::new(if name.is_empty() {
                format!("Column{}", i + 1)
            } else {
                name
            })
        })
        .collect();

    let mut table = Table::new(columns);

    for row in range.rows().skip(1) {
        let cells: Vec<CellValue> = row.iter().map(convert_cell).collect();
        table.add_row(cells);
    }

    table.infer_kinds();
    Ok(table)
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => format!("{}", dt),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("#{:?}", e),
    }
}

fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Null,
        Data::String(s) => {
            if s.trim().is_empty() {
                CellValue::Null
            } else {
                CellValue::Str(Arc::from(s.as_str()))
            }
        }
        Data::Float(f) => {
            // Check if it's actually an integer
            if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                CellValue::Int(*f as i64)
            } else {
                CellValue::Float(*f)
            }
        }
        Data::Int(i) => CellValue::Int(*i),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => {
            // calamine ExcelDateTime: render and reparse
            let s = format!("{}", dt);
            match chrono::NaiveDateTime::parse_from_str(&s, "%Y-%m-%d %H:%M:%S%.f")
                .or_else(|_| chrono::NaiveDateTime::parse_from_str(&s, "%Y-%m-%dT%H:%M:%S%.f"))
            {
                Ok(datetime) => CellValue::DateTime(datetime),
                Err(_) => match chrono::NaiveDate::parse_from_str(&s, "%Y-%m-%d") {
                    Ok(date) => CellValue::Date(date),
                    Err(_) => CellValue::Str(Arc::from(s.as_str())),
                },
            }
        }
        Data::DateTimeIso(s) => {
            CellValue::parse_temporal(s).unwrap_or_else(|| CellValue::Str(Arc::from(s.as_str())))
        }
        Data::DurationIso(s) => CellValue::Str(Arc::from(s.as_str())),
        Data::Error(e) => CellValue::Str(Arc::from(format!("#{:?}", e).as_str())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_cell() {
        assert_eq!(convert_cell(&Data::Empty), CellValue::Null);
        assert_eq!(convert_cell(&Data::String("  ".into())), CellValue::Null);
        assert_eq!(convert_cell(&Data::Float(3.0)), CellValue::Int(3));
        assert_eq!(convert_cell(&Data::Float(3.5)), CellValue::Float(3.5));
        assert_eq!(convert_cell(&Data::Bool(true)), CellValue::Bool(true));
    }
}
