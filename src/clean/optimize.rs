//! Schema and memory optimization

use std::sync::Arc;

use chrono::NaiveTime;
use indexmap::IndexSet;
use rustc_hash::FxHashSet;

use crate::clean::classify;
use crate::model::{CellValue, Column, ColumnKind, Table};

/// Cardinality ratio below which a text column is compacted
const CATEGORICAL_MAX_RATIO: f64 = 0.10;

/// Outcome of the optimize stage
#[derive(Debug, Default, Clone, Copy)]
pub struct OptimizeOutcome {
    /// Columns promoted to a temporal kind
    pub datetime_columns: usize,
    /// Text columns compacted to categorical
    pub categorical_columns: usize,
}

/// Promote date-named columns and compact low-cardinality text
///
/// Two independent passes. Datetime promotion commits the classifier's
/// temporal verdict and reparses every cell, turning unparseable cells into
/// nulls. Categorical compaction interns the string cells of any text column
/// whose distinct/row-count ratio is under 0.10, so equal values share one
/// allocation; observable values do not change.
pub fn optimize(table: &mut Table) -> OptimizeOutcome {
    let mut outcome = OptimizeOutcome::default();
    let rows = table.row_count();

    for column in &mut table.columns {
        match classify::classify(column) {
            kind @ (ColumnKind::Date | ColumnKind::DateTime) => {
                promote_datetime(column, kind);
                outcome.datetime_columns += 1;
            }
            ColumnKind::Text => {
                if rows > 0 && cardinality_ratio(column, rows) < CATEGORICAL_MAX_RATIO {
                    compact_categorical(column);
                    outcome.categorical_columns += 1;
                }
            }
            _ => {}
        }
    }

    outcome
}

fn cardinality_ratio(column: &Column, rows: usize) -> f64 {
    let distinct: FxHashSet<&CellValue> = column.non_null().collect();
    distinct.len() as f64 / rows as f64
}

fn promote_datetime(column: &mut Column, kind: ColumnKind) {
    column.kind = kind;
    for value in &mut column.values {
        let parsed = match &*value {
            CellValue::Null => continue,
            CellValue::Date(d) => Some(CellValue::Date(*d)),
            CellValue::DateTime(dt) => Some(CellValue::DateTime(*dt)),
            CellValue::Str(s) => CellValue::parse_temporal(s),
            _ => None,
        };
        *value = match parsed {
            // Midnight-extend dates so a DateTime column stays uniform
            Some(CellValue::Date(d)) if kind == ColumnKind::DateTime => {
                CellValue::DateTime(d.and_time(NaiveTime::MIN))
            }
            Some(cell) => cell,
            None => CellValue::Null,
        };
    }
}

fn compact_categorical(column: &mut Column) {
    column.kind = ColumnKind::Categorical;
    let mut dictionary: IndexSet<Arc<str>> = IndexSet::new();
    for value in &mut column.values {
        if let CellValue::Str(s) = value {
            if let Some(interned) = dictionary.get(&**s).cloned() {
                *s = interned;
            } else {
                dictionary.insert(Arc::clone(s));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_column(name: &str, distinct: usize, rows: usize) -> Column {
        let mut column = Column::new(name);
        column.values = (0..rows)
            .map(|i| CellValue::from(format!("v{}", i % distinct)))
            .collect();
        column
    }

    #[test]
    fn test_low_cardinality_becomes_categorical() {
        let mut table = Table::new(vec![text_column("segment", 50, 1000)]);
        let outcome = optimize(&mut table);

        assert_eq!(outcome.categorical_columns, 1);
        assert_eq!(table.columns[0].kind, ColumnKind::Categorical);
        // Values are observably unchanged
        assert_eq!(table.columns[0].values[0], CellValue::from("v0"));
        assert_eq!(table.columns[0].values[50], CellValue::from("v0"));
    }

    #[test]
    fn test_interned_cells_share_storage() {
        let mut table = Table::new(vec![text_column("segment", 2, 100)]);
        optimize(&mut table);

        let (CellValue::Str(a), CellValue::Str(b)) =
            (&table.columns[0].values[0], &table.columns[0].values[2])
        else {
            panic!("expected string cells");
        };
        assert!(Arc::ptr_eq(a, b));
    }

    #[test]
    fn test_high_cardinality_stays_text() {
        let mut table = Table::new(vec![text_column("id", 200, 1000)]);
        let outcome = optimize(&mut table);

        assert_eq!(outcome.categorical_columns, 0);
        assert_eq!(table.columns[0].kind, ColumnKind::Unknown);
    }

    #[test]
    fn test_datetime_promotion() {
        let mut column = Column::new("fecha_registro");
        column.values = vec![
            CellValue::from("2023-01-01"),
            CellValue::from("2023-02-01"),
            CellValue::from("not a date"),
            CellValue::Null,
        ];
        let mut table = Table::new(vec![column]);

        let outcome = optimize(&mut table);
        assert_eq!(outcome.datetime_columns, 1);
        assert_eq!(table.columns[0].kind, ColumnKind::Date);
        assert!(matches!(table.columns[0].values[0], CellValue::Date(_)));
        // Unparseable cell became the missing marker
        assert_eq!(table.columns[0].values[2], CellValue::Null);
        assert_eq!(table.columns[0].values[3], CellValue::Null);
    }

    #[test]
    fn test_mixed_temporal_column_widens_to_datetime() {
        let mut column = Column::new("event_date");
        column.values = vec![
            CellValue::from("2023-01-01 10:30:00"),
            CellValue::from("2023-02-01"),
        ];
        let mut table = Table::new(vec![column]);

        optimize(&mut table);
        assert_eq!(table.columns[0].kind, ColumnKind::DateTime);
        assert!(table
            .columns[0]
            .values
            .iter()
            .all(|v| matches!(v, CellValue::DateTime(_))));
    }

    #[test]
    fn test_date_named_numeric_column_untouched() {
        let mut column = Column::new("date_code");
        column.values = vec![CellValue::Int(20230101), CellValue::Int(20230102)];
        let mut table = Table::new(vec![column]);

        let outcome = optimize(&mut table);
        assert_eq!(outcome.datetime_columns, 0);
        assert_eq!(table.columns[0].values[0], CellValue::Int(20230101));
    }
}
