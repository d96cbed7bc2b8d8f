//! Column metadata and kind information

use super::table::CellValue;

/// Declared kind of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColumnKind {
    #[default]
    Unknown,
    Bool,
    Numeric,
    Text,
    /// Low-cardinality text whose string cells share interned storage
    Categorical,
    Date,
    DateTime,
}

impl ColumnKind {
    /// Widen the kind to accommodate a cell of another kind
    pub fn widen(self, other: ColumnKind) -> ColumnKind {
        if self == other {
            return self;
        }

        match (self, other) {
            (ColumnKind::Unknown, k) | (k, ColumnKind::Unknown) => k,
            (ColumnKind::Date, ColumnKind::DateTime) | (ColumnKind::DateTime, ColumnKind::Date) => {
                ColumnKind::DateTime
            }
            (ColumnKind::Categorical, ColumnKind::Text)
            | (ColumnKind::Text, ColumnKind::Categorical) => ColumnKind::Text,
            // Mixed content degrades to text
            _ => ColumnKind::Text,
        }
    }
}

impl std::fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnKind::Unknown => write!(f, "unknown"),
            ColumnKind::Bool => write!(f, "bool"),
            ColumnKind::Numeric => write!(f, "numeric"),
            ColumnKind::Text => write!(f, "text"),
            ColumnKind::Categorical => write!(f, "categorical"),
            ColumnKind::Date => write!(f, "date"),
            ColumnKind::DateTime => write!(f, "datetime"),
        }
    }
}

/// A named, typed column holding one cell per row
#[derive(Debug, Clone)]
pub struct Column {
    /// Column name (unique within a table)
    pub name: String,
    /// Declared kind, seeded at ingestion and committed by the optimizer
    pub kind: ColumnKind,
    /// Cell values, one per row
    pub values: Vec<CellValue>,
}

impl Column {
    /// Create an empty column with a name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ColumnKind::Unknown,
            values: Vec::new(),
        }
    }

    /// Create an empty column with a declared kind
    pub fn with_kind(name: impl Into<String>, kind: ColumnKind) -> Self {
        Self {
            name: name.into(),
            kind,
            values: Vec::new(),
        }
    }

    /// Number of null cells
    pub fn null_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_null()).count()
    }

    /// Iterate over non-null cells
    pub fn non_null(&self) -> impl Iterator<Item = &CellValue> {
        self.values.iter().filter(|v| !v.is_null())
    }

    /// Seed the declared kind by widening over the cells present
    pub fn infer_kind(&mut self) {
        let mut kind = ColumnKind::Unknown;
        for value in &self.values {
            if !value.is_null() {
                kind = kind.widen(value.kind());
            }
        }
        self.kind = kind;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widen() {
        assert_eq!(
            ColumnKind::Unknown.widen(ColumnKind::Numeric),
            ColumnKind::Numeric
        );
        assert_eq!(
            ColumnKind::Date.widen(ColumnKind::DateTime),
            ColumnKind::DateTime
        );
        assert_eq!(ColumnKind::Numeric.widen(ColumnKind::Text), ColumnKind::Text);
        assert_eq!(ColumnKind::Bool.widen(ColumnKind::Bool), ColumnKind::Bool);
    }

    #[test]
    fn test_infer_kind_ignores_nulls() {
        let mut col = Column::new("x");
        col.values = vec![CellValue::Null, CellValue::Int(1), CellValue::Float(2.5)];
        col.infer_kind();
        assert_eq!(col.kind, ColumnKind::Numeric);
    }
}
