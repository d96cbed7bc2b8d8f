//! Cell values and the column-major table

use std::borrow::Cow;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use rustc_hash::FxHasher;

use super::schema::{Column, ColumnKind};

/// A cell value with type information
///
/// `Null` is the missing marker: distinct from zero, the empty string, and
/// every other domain value. Two `Null`s compare equal.
#[derive(Debug, Clone)]
pub enum CellValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Arc<str>),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CellValue::Null, CellValue::Null) => true,
            (CellValue::Bool(a), CellValue::Bool(b)) => a == b,
            (CellValue::Int(a), CellValue::Int(b)) => a == b,
            (CellValue::Float(a), CellValue::Float(b)) => {
                // Handle NaN comparison
                if a.is_nan() && b.is_nan() {
                    true
                } else {
                    a == b
                }
            }
            (CellValue::Str(a), CellValue::Str(b)) => a == b,
            (CellValue::Date(a), CellValue::Date(b)) => a == b,
            (CellValue::DateTime(a), CellValue::DateTime(b)) => a == b,
            // Cross-type numeric comparison
            (CellValue::Int(a), CellValue::Float(b)) => (*a as f64) == *b,
            (CellValue::Float(a), CellValue::Int(b)) => *a == (*b as f64),
            _ => false,
        }
    }
}

impl Eq for CellValue {}

impl Hash for CellValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::Null => {}
            CellValue::Bool(b) => b.hash(state),
            CellValue::Int(i) => i.hash(state),
            CellValue::Float(f) => f.to_bits().hash(state),
            CellValue::Str(s) => s.hash(state),
            CellValue::Date(d) => d.hash(state),
            CellValue::DateTime(dt) => dt.hash(state),
        }
    }
}

impl CellValue {
    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Numeric view of the cell, if it has one
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Int(i) => Some(*i as f64),
            CellValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// String view of the cell, if it is text
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Str(s) => Some(s.as_ref()),
            _ => None,
        }
    }

    /// Kind of this single cell, for widening into a column kind
    pub fn kind(&self) -> ColumnKind {
        match self {
            CellValue::Null => ColumnKind::Unknown,
            CellValue::Bool(_) => ColumnKind::Bool,
            CellValue::Int(_) | CellValue::Float(_) => ColumnKind::Numeric,
            CellValue::Str(_) => ColumnKind::Text,
            CellValue::Date(_) => ColumnKind::Date,
            CellValue::DateTime(_) => ColumnKind::DateTime,
        }
    }

    /// Convert to a display string
    pub fn display(&self) -> Cow<'_, str> {
        match self {
            CellValue::Null => Cow::Borrowed("NULL"),
            CellValue::Bool(b) => Cow::Owned(b.to_string()),
            CellValue::Int(i) => Cow::Owned(i.to_string()),
            CellValue::Float(f) => Cow::Owned(f.to_string()),
            CellValue::Str(s) => Cow::Borrowed(s.as_ref()),
            CellValue::Date(d) => Cow::Owned(d.to_string()),
            CellValue::DateTime(dt) => Cow::Owned(dt.to_string()),
        }
    }

    /// Parse a raw string into a typed cell
    pub fn parse(s: &str) -> CellValue {
        let trimmed = s.trim();

        // Check for empty/null
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("null") || trimmed == "NA" {
            return CellValue::Null;
        }

        // Try parsing as boolean
        if trimmed.eq_ignore_ascii_case("true") || trimmed.eq_ignore_ascii_case("yes") {
            return CellValue::Bool(true);
        }
        if trimmed.eq_ignore_ascii_case("false") || trimmed.eq_ignore_ascii_case("no") {
            return CellValue::Bool(false);
        }

        // Try parsing as integer
        if let Ok(i) = trimmed.parse::<i64>() {
            return CellValue::Int(i);
        }

        // Try parsing as float
        if let Ok(f) = trimmed.parse::<f64>() {
            return CellValue::Float(f);
        }

        if let Some(temporal) = Self::parse_temporal(trimmed) {
            return temporal;
        }

        CellValue::Str(Arc::from(trimmed))
    }

    /// Parse a string as a date or datetime cell
    pub fn parse_temporal(s: &str) -> Option<CellValue> {
        let trimmed = s.trim();

        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            return Some(CellValue::Date(date));
        }
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%d/%m/%Y") {
            return Some(CellValue::Date(date));
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
            return Some(CellValue::DateTime(dt));
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
            return Some(CellValue::DateTime(dt));
        }

        None
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Str(Arc::from(s))
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Str(Arc::from(s.as_str()))
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Int(i)
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        CellValue::Float(f)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl<T> From<Option<T>> for CellValue
where
    T: Into<CellValue>,
{
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => CellValue::Null,
        }
    }
}

/// A table of equal-length named columns
///
/// Row identity is positional; after a row-removing stage the indices are
/// renumbered. The equal-length invariant is maintained by `add_row` and
/// `retain_rows`; callers never resize individual columns.
#[derive(Debug, Clone, Default)]
pub struct Table {
    /// Columns in order
    pub columns: Vec<Column>,
}

impl Table {
    /// Create a table from column definitions
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |c| c.values.len())
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// True when the table has no columns or no rows
    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    /// Get column index by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Get column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Append one row; short rows are padded with nulls, long rows truncated
    pub fn add_row(&mut self, mut cells: Vec<CellValue>) {
        cells.resize(self.column_count(), CellValue::Null);
        for (column, cell) in self.columns.iter_mut().zip(cells) {
            column.values.push(cell);
        }
    }

    /// Hash all cells of a row with `FxHasher`
    pub fn row_hash(&self, row: usize) -> u64 {
        let mut hasher = FxHasher::default();
        for column in &self.columns {
            column.values[row].hash(&mut hasher);
        }
        hasher.finish()
    }

    /// Cell-by-cell equality of two rows (nulls compare equal)
    pub fn rows_equal(&self, a: usize, b: usize) -> bool {
        self.columns.iter().all(|c| c.values[a] == c.values[b])
    }

    /// True when every cell of the row is null
    pub fn row_is_null(&self, row: usize) -> bool {
        self.columns.iter().all(|c| c.values[row].is_null())
    }

    /// Keep only the rows whose mask entry is true, preserving order
    pub fn retain_rows(&mut self, keep: &[bool]) {
        for column in &mut self.columns {
            let mut row = 0;
            column.values.retain(|_| {
                let kept = keep[row];
                row += 1;
                kept
            });
        }
    }

    /// Seed every column's declared kind from its cells
    pub fn infer_kinds(&mut self) {
        for column in &mut self.columns {
            column.infer_kind();
        }
    }
}
