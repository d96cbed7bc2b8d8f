//! CSV file reader

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::model::{CellValue, Column, Table};

use super::Reader;

/// Reader for CSV files
pub struct CsvReader;

impl Reader for CsvReader {
    fn read(&self, path: &Path, _config: &Config) -> Result<Table> {
        let file =
            File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
        let reader = BufReader::new(file);
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader
            .headers()
            .context("Failed to read CSV headers")?
            .clone();

        let columns: Vec<Column> = headers.iter().map(Column::new).collect();
        let mut table = Table::new(columns);

        for (line_num, result) in csv_reader.records().enumerate() {
            // +2 for 1-indexing and the header line
            let record =
                result.with_context(|| format!("Failed to read CSV row {}", line_num + 2))?;
            let cells: Vec<CellValue> = record.iter().map(CellValue::parse).collect();
            table.add_row(cells);
        }

        table.infer_kinds();
        Ok(table)
    }

    fn supports_extension(&self, ext: &str) -> bool {
        matches!(ext.to_lowercase().as_str(), "csv" | "tsv" | "txt")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ColumnKind;
    use std::io::Write;

    #[test]
    fn test_read_and_infer() {
        let mut file = tempfile::NamedTempFile::with_suffix(".csv").unwrap();
        writeln!(file, "Nombre,Edad,Score").unwrap();
        writeln!(file, "Juan,25,10.5").unwrap();
        writeln!(file, "Ana,,9.0").unwrap();
        writeln!(file, "Pedro,30,").unwrap();

        let config = Config::from_file(file.path());
        let table = CsvReader.read(file.path(), &config).unwrap();

        assert_eq!(table.column_count(), 3);
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.columns[1].values[0], CellValue::Int(25));
        assert_eq!(table.columns[1].values[1], CellValue::Null);
        assert_eq!(table.columns[1].kind, ColumnKind::Numeric);
        assert_eq!(table.columns[0].kind, ColumnKind::Text);
    }

    #[test]
    fn test_short_rows_are_padded() {
        let mut file = tempfile::NamedTempFile::with_suffix(".csv").unwrap();
        writeln!(file, "a,b,c").unwrap();
        writeln!(file, "1,2").unwrap();

        let config = Config::from_file(file.path());
        let table = CsvReader.read(file.path(), &config).unwrap();
        assert_eq!(table.columns[2].values[0], CellValue::Null);
    }
}
