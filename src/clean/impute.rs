//! Statistical null imputation

use crate::clean::{classify, stats};
use crate::model::{CellValue, Column, ColumnKind, Table};

/// Outcome of the imputation stage
#[derive(Debug, Default, Clone, Copy)]
pub struct ImputeOutcome {
    /// Columns that received fills
    pub columns_imputed: usize,
    /// Individual cells filled
    pub cells_filled: usize,
}

/// Fill missing cells: median for numeric columns, mode for everything else
///
/// A column with no non-null values has no statistic to fill from and is
/// deliberately left fully missing. Row and column counts never change.
pub fn impute_missing(table: &mut Table) -> ImputeOutcome {
    let mut outcome = ImputeOutcome::default();

    for column in &mut table.columns {
        let nulls = column.null_count();
        if nulls == 0 || nulls == column.values.len() {
            continue;
        }

        let fill = match classify::classify(column) {
            ColumnKind::Numeric => median_fill(column),
            _ => stats::mode(&column.values),
        };
        let Some(fill) = fill else { continue };

        for value in &mut column.values {
            if value.is_null() {
                *value = fill.clone();
                outcome.cells_filled += 1;
            }
        }
        outcome.columns_imputed += 1;
    }

    outcome
}

/// Median fill value; an all-integer column with an integral median stays
/// integer, otherwise the fill is a float
fn median_fill(column: &Column) -> Option<CellValue> {
    let mut sample: Vec<f64> = column.non_null().filter_map(classify::numeric_value).collect();
    if sample.is_empty() {
        return None;
    }
    sample.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let median = stats::median(&sample);
    let all_int = column.non_null().all(|v| matches!(v, CellValue::Int(_)));
    if all_int && median.fract() == 0.0 {
        Some(CellValue::Int(median as i64))
    } else {
        Some(CellValue::Float(median))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column_of(name: &str, values: Vec<CellValue>) -> Column {
        let mut column = Column::new(name);
        column.values = values;
        column
    }

    #[test]
    fn test_numeric_median_fill() {
        let mut table = Table::new(vec![column_of(
            "score",
            vec![
                CellValue::Float(10.5),
                CellValue::Null,
                CellValue::Float(10.5),
                CellValue::Float(5.0),
            ],
        )]);

        let outcome = impute_missing(&mut table);
        assert_eq!(outcome.cells_filled, 1);
        assert_eq!(table.columns[0].values[1], CellValue::Float(10.5));
        assert_eq!(table.columns[0].null_count(), 0);
    }

    #[test]
    fn test_integer_column_keeps_integer_fill() {
        let mut table = Table::new(vec![column_of(
            "edad",
            vec![
                CellValue::Int(25),
                CellValue::Int(30),
                CellValue::Int(35),
                CellValue::Null,
            ],
        )]);

        impute_missing(&mut table);
        assert_eq!(table.columns[0].values[3], CellValue::Int(30));
    }

    #[test]
    fn test_even_integer_column_gets_float_fill() {
        let mut table = Table::new(vec![column_of(
            "edad",
            vec![CellValue::Int(25), CellValue::Int(30), CellValue::Null, CellValue::Null],
        )]);

        impute_missing(&mut table);
        assert_eq!(table.columns[0].values[2], CellValue::Float(27.5));
    }

    #[test]
    fn test_text_mode_fill() {
        let mut table = Table::new(vec![column_of(
            "ciudad",
            vec![
                CellValue::from("lima"),
                CellValue::from("quito"),
                CellValue::from("lima"),
                CellValue::Null,
            ],
        )]);

        let outcome = impute_missing(&mut table);
        assert_eq!(outcome.columns_imputed, 1);
        assert_eq!(table.columns[0].values[3], CellValue::from("lima"));
    }

    #[test]
    fn test_all_null_column_left_alone() {
        let mut table = Table::new(vec![
            column_of("vacia", vec![CellValue::Null, CellValue::Null]),
            column_of("x", vec![CellValue::Int(1), CellValue::Null]),
        ]);

        let outcome = impute_missing(&mut table);
        assert_eq!(outcome.columns_imputed, 1);
        assert_eq!(table.columns[0].null_count(), 2);
        assert_eq!(table.columns[1].null_count(), 0);
    }

    #[test]
    fn test_shape_unchanged() {
        let mut table = Table::new(vec![
            column_of("a", vec![CellValue::Int(1), CellValue::Null, CellValue::Int(3)]),
            column_of("b", vec![CellValue::Null, CellValue::from("x"), CellValue::from("x")]),
        ]);

        impute_missing(&mut table);
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.column_count(), 2);
        assert!(table.columns.iter().all(|c| c.null_count() == 0));
    }
}
