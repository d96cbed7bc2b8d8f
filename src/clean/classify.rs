//! On-demand column classification

use crate::model::{CellValue, Column, ColumnKind};

/// Name substrings suggesting datetime content
const DATETIME_NAME_HINTS: &[&str] = &["date", "fecha"];

/// Check whether a column name hints at datetime content
pub fn name_suggests_datetime(name: &str) -> bool {
    let lower = name.to_lowercase();
    DATETIME_NAME_HINTS.iter().any(|hint| lower.contains(hint))
}

/// Numeric view of a cell, accepting numeric-looking text
pub fn numeric_value(value: &CellValue) -> Option<f64> {
    match value {
        CellValue::Int(i) => Some(*i as f64),
        CellValue::Float(f) => Some(*f),
        CellValue::Str(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Temporal kind of a cell, accepting date-looking text
fn temporal_kind(value: &CellValue) -> Option<ColumnKind> {
    match value {
        CellValue::Date(_) => Some(ColumnKind::Date),
        CellValue::DateTime(_) => Some(ColumnKind::DateTime),
        CellValue::Str(s) => CellValue::parse_temporal(s).map(|parsed| match parsed {
            CellValue::DateTime(_) => ColumnKind::DateTime,
            _ => ColumnKind::Date,
        }),
        _ => None,
    }
}

/// Classify a column from its non-null values and its name
///
/// Deterministic and side-effect-free; consuming stages call this on demand
/// instead of trusting the declared kind, and only the optimizer commits a
/// verdict back to the column.
///
/// A column is `Date`/`DateTime` only when its name carries a datetime hint
/// AND a majority of its values parse as dates; numeric-looking date columns
/// without the name hint stay `Numeric`. A numeric majority wins next, and
/// everything else is `Text`.
pub fn classify(column: &Column) -> ColumnKind {
    let total = column.values.len() - column.null_count();
    if total == 0 {
        return ColumnKind::Unknown;
    }

    if name_suggests_datetime(&column.name) {
        let mut kind = ColumnKind::Unknown;
        let mut temporal = 0;
        for value in column.non_null() {
            if let Some(cell_kind) = temporal_kind(value) {
                temporal += 1;
                kind = kind.widen(cell_kind);
            }
        }
        if temporal * 2 > total {
            return kind;
        }
    }

    let numeric = column.non_null().filter(|v| numeric_value(v).is_some()).count();
    if numeric * 2 > total {
        return ColumnKind::Numeric;
    }

    ColumnKind::Text
}
