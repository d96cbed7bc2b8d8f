//! Parquet export

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{
    ArrayRef, BooleanArray, Date32Array, Float64Array, Int64Array, StringArray,
    TimestampMicrosecondArray,
};
use arrow::datatypes::{DataType as ArrowType, Field, Schema, TimeUnit};
use arrow::record_batch::RecordBatch;
use chrono::{Datelike, NaiveDate};
use parquet::arrow::ArrowWriter;

use crate::model::{CellValue, Column, ColumnKind, Table};

use super::{effective_kind, Writer};

/// Writer for Parquet files
pub struct ParquetWriter;

impl Writer for ParquetWriter {
    fn write(&self, table: &Table, path: &Path) -> Result<()> {
        let mut fields = Vec::with_capacity(table.column_count());
        let mut arrays: Vec<ArrayRef> = Vec::with_capacity(table.column_count());

        for column in &table.columns {
            let (data_type, array) = column_to_array(column);
            fields.push(Field::new(column.name.as_str(), data_type, true));
            arrays.push(array);
        }

        let schema = Arc::new(Schema::new(fields));
        let batch = RecordBatch::try_new(schema.clone(), arrays)
            .context("Failed to assemble record batch")?;

        let file = File::create(path)
            .with_context(|| format!("Failed to create Parquet file: {}", path.display()))?;
        let mut writer = ArrowWriter::try_new(file, schema, None)
            .context("Failed to create Parquet writer")?;
        writer.write(&batch).context("Failed to write Parquet batch")?;
        writer.close().context("Failed to finish Parquet file")?;
        Ok(())
    }
}

/// Pick an arrow representation from what the cells widen to
fn column_to_array(column: &Column) -> (ArrowType, ArrayRef) {
    match effective_kind(column) {
        ColumnKind::Bool => {
            let values: Vec<Option<bool>> = column
                .values
                .iter()
                .map(|v| match v {
                    CellValue::Bool(b) => Some(*b),
                    _ => None,
                })
                .collect();
            (ArrowType::Boolean, Arc::new(BooleanArray::from(values)))
        }
        ColumnKind::Numeric => {
            if column.non_null().all(|v| matches!(v, CellValue::Int(_))) {
                let values: Vec<Option<i64>> = column
                    .values
                    .iter()
                    .map(|v| match v {
                        CellValue::Int(i) => Some(*i),
                        _ => None,
                    })
                    .collect();
                (ArrowType::Int64, Arc::new(Int64Array::from(values)))
            } else {
                let values: Vec<Option<f64>> = column.values.iter().map(CellValue::as_f64).collect();
                (ArrowType::Float64, Arc::new(Float64Array::from(values)))
            }
        }
        ColumnKind::Date => {
            let values: Vec<Option<i32>> = column
                .values
                .iter()
                .map(|v| match v {
                    CellValue::Date(d) => Some(days_since_epoch(*d)),
                    _ => None,
                })
                .collect();
            (ArrowType::Date32, Arc::new(Date32Array::from(values)))
        }
        ColumnKind::DateTime => {
            let values: Vec<Option<i64>> = column
                .values
                .iter()
                .map(|v| match v {
                    CellValue::DateTime(dt) => Some(dt.and_utc().timestamp_micros()),
                    CellValue::Date(d) => {
                        Some(d.and_time(chrono::NaiveTime::MIN).and_utc().timestamp_micros())
                    }
                    _ => None,
                })
                .collect();
            (
                ArrowType::Timestamp(TimeUnit::Microsecond, None),
                Arc::new(TimestampMicrosecondArray::from(values)),
            )
        }
        // Text, categorical, unknown and mixed content all travel as strings
        _ => {
            let values: Vec<Option<String>> = column
                .values
                .iter()
                .map(|v| match v {
                    CellValue::Null => None,
                    other => Some(other.display().into_owned()),
                })
                .collect();
            (ArrowType::Utf8, Arc::new(StringArray::from(values)))
        }
    }
}

fn days_since_epoch(date: NaiveDate) -> i32 {
    // chrono counts days from CE; Date32 counts from the unix epoch
    date.num_days_from_ce() - 719_163
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::parser::{ParquetReader, Reader};

    #[test]
    fn test_written_file_reads_back() {
        let mut name = Column::new("name");
        name.values = vec![CellValue::from("Juan"), CellValue::from("Ana")];
        let mut age = Column::new("age");
        age.values = vec![CellValue::Int(25), CellValue::Null];
        let mut joined = Column::new("joined");
        joined.values = vec![
            CellValue::Date(NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()),
            CellValue::Null,
        ];
        let table = Table::new(vec![name, age, joined]);

        let file = tempfile::NamedTempFile::with_suffix(".parquet").unwrap();
        ParquetWriter.write(&table, file.path()).unwrap();

        let config = Config::from_file(file.path());
        let read_back = ParquetReader.read(file.path(), &config).unwrap();
        assert_eq!(read_back.row_count(), 2);
        assert_eq!(read_back.columns[1].values[0], CellValue::Int(25));
        assert_eq!(read_back.columns[1].values[1], CellValue::Null);
        assert_eq!(
            read_back.columns[2].values[0],
            CellValue::Date(NaiveDate::from_ymd_opt(2023, 1, 1).unwrap())
        );
    }
}
