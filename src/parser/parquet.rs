//! Parquet file reader

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{
    Array, ArrayRef, BooleanArray, Date32Array, Float32Array, Float64Array, Int16Array,
    Int32Array, Int64Array, Int8Array, StringArray, TimestampMicrosecondArray,
    TimestampMillisecondArray, TimestampNanosecondArray, TimestampSecondArray, UInt16Array,
    UInt32Array, UInt64Array, UInt8Array,
};
use arrow::datatypes::DataType as ArrowType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::config::Config;
use crate::model::{CellValue, Column, ColumnKind, Table};

use super::Reader;

/// Reader for Parquet files
pub struct ParquetReader;

impl Reader for ParquetReader {
    fn read(&self, path: &Path, _config: &Config) -> Result<Table> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open Parquet file: {}", path.display()))?;

        let builder = ParquetRecordBatchReaderBuilder::try_new(file)
            .context("Failed to create Parquet reader")?;

        let schema = builder.schema().clone();
        let reader = builder.build().context("Failed to build Parquet reader")?;

        // Parquet carries its own schema, so kinds come from it directly
        let columns: Vec<Column> = schema
            .fields()
            .iter()
            .map(|field| Column::with_kind(field.name().clone(), arrow_type_to_kind(field.data_type())))
            .collect();

        let mut table = Table::new(columns);

        for batch_result in reader {
            let batch = batch_result.context("Failed to read Parquet batch")?;
            for row_idx in 0..batch.num_rows() {
                let cells: Vec<CellValue> = batch
                    .columns()
                    .iter()
                    .map(|col| extract_cell_value(col, row_idx))
                    .collect();
                table.add_row(cells);
            }
        }

        Ok(table)
    }

    fn supports_extension(&self, ext: &str) -> bool {
        matches!(ext.to_lowercase().as_str(), "parquet" | "pq")
    }
}

fn arrow_type_to_kind(arrow_type: &ArrowType) -> ColumnKind {
    match arrow_type {
        ArrowType::Null => ColumnKind::Unknown,
        ArrowType::Boolean => ColumnKind::Bool,
        ArrowType::Int8
        | ArrowType::Int16
        | ArrowType::Int32
        | ArrowType::Int64
        | ArrowType::UInt8
        | ArrowType::UInt16
        | ArrowType::UInt32
        | ArrowType::UInt64
        | ArrowType::Float16
        | ArrowType::Float32
        | ArrowType::Float64 => ColumnKind::Numeric,
        ArrowType::Date32 | ArrowType::Date64 => ColumnKind::Date,
        ArrowType::Timestamp(_, _) => ColumnKind::DateTime,
        // Complex types land as text
        _ => ColumnKind::Text,
    }
}

fn extract_cell_value(array: &ArrayRef, row_idx: usize) -> CellValue {
    if array.is_null(row_idx) {
        return CellValue::Null;
    }

    match array.data_type() {
        ArrowType::Boolean => downcast::<BooleanArray>(array)
            .map_or(CellValue::Null, |arr| CellValue::Bool(arr.value(row_idx))),
        ArrowType::Int8 => downcast::<Int8Array>(array)
            .map_or(CellValue::Null, |arr| CellValue::Int(arr.value(row_idx) as i64)),
        ArrowType::Int16 => downcast::<Int16Array>(array)
            .map_or(CellValue::Null, |arr| CellValue::Int(arr.value(row_idx) as i64)),
        ArrowType::Int32 => downcast::<Int32Array>(array)
            .map_or(CellValue::Null, |arr| CellValue::Int(arr.value(row_idx) as i64)),
        ArrowType::Int64 => downcast::<Int64Array>(array)
            .map_or(CellValue::Null, |arr| CellValue::Int(arr.value(row_idx))),
        ArrowType::UInt8 => downcast::<UInt8Array>(array)
            .map_or(CellValue::Null, |arr| CellValue::Int(arr.value(row_idx) as i64)),
        ArrowType::UInt16 => downcast::<UInt16Array>(array)
            .map_or(CellValue::Null, |arr| CellValue::Int(arr.value(row_idx) as i64)),
        ArrowType::UInt32 => downcast::<UInt32Array>(array)
            .map_or(CellValue::Null, |arr| CellValue::Int(arr.value(row_idx) as i64)),
        ArrowType::UInt64 => downcast::<UInt64Array>(array)
            .map_or(CellValue::Null, |arr| CellValue::Int(arr.value(row_idx) as i64)),
        ArrowType::Float32 => downcast::<Float32Array>(array)
            .map_or(CellValue::Null, |arr| CellValue::Float(arr.value(row_idx) as f64)),
        ArrowType::Float64 => downcast::<Float64Array>(array)
            .map_or(CellValue::Null, |arr| CellValue::Float(arr.value(row_idx))),
        ArrowType::Utf8 => downcast::<StringArray>(array)
            .map_or(CellValue::Null, |arr| CellValue::Str(Arc::from(arr.value(row_idx)))),
        ArrowType::Date32 => {
            let Some(arr) = downcast::<Date32Array>(array) else {
                return CellValue::Null;
            };
            let days = arr.value(row_idx);
            // Date32 is days since the unix epoch; chrono counts from CE
            match chrono::NaiveDate::from_num_days_from_ce_opt(days + 719_163) {
                Some(date) => CellValue::Date(date),
                None => CellValue::Int(days as i64),
            }
        }
        ArrowType::Timestamp(unit, _) => {
            use arrow::datatypes::TimeUnit;
            let nanos = match unit {
                TimeUnit::Second => downcast::<TimestampSecondArray>(array)
                    .map(|arr| arr.value(row_idx) * 1_000_000_000),
                TimeUnit::Millisecond => downcast::<TimestampMillisecondArray>(array)
                    .map(|arr| arr.value(row_idx) * 1_000_000),
                TimeUnit::Microsecond => downcast::<TimestampMicrosecondArray>(array)
                    .map(|arr| arr.value(row_idx) * 1_000),
                TimeUnit::Nanosecond => {
                    downcast::<TimestampNanosecondArray>(array).map(|arr| arr.value(row_idx))
                }
            };
            match nanos {
                Some(nanos) => {
                    CellValue::DateTime(chrono::DateTime::from_timestamp_nanos(nanos).naive_utc())
                }
                None => CellValue::Null,
            }
        }
        _ => {
            // Fallback: render complex values as text
            let formatter = arrow::util::display::ArrayFormatter::try_new(
                array.as_ref(),
                &arrow::util::display::FormatOptions::default(),
            );
            match formatter {
                Ok(fmt) => CellValue::Str(Arc::from(fmt.value(row_idx).to_string().as_str())),
                Err(_) => CellValue::Null,
            }
        }
    }
}

fn downcast<T: 'static>(array: &ArrayRef) -> Option<&T> {
    array.as_any().downcast_ref::<T>()
}
