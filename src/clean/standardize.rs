//! Column-name and text-cell standardization

use std::sync::Arc;

use indexmap::IndexSet;

use crate::model::{CellValue, Table};

/// Outcome of the standardize stage
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardizeOutcome {
    /// Columns whose name changed
    pub renamed: usize,
    /// Text cells that lost surrounding whitespace
    pub trimmed: usize,
}

/// Normalize a single column name
///
/// Lowercase, whitespace runs become one underscore, anything outside
/// `[a-z0-9_]` is dropped, repeated underscores collapse.
pub fn normalize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_underscore = false;

    for ch in name.trim().to_lowercase().chars() {
        if ch.is_whitespace() || ch == '_' {
            if !last_underscore {
                out.push('_');
                last_underscore = true;
            }
        } else if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            out.push(ch);
            last_underscore = false;
        }
    }

    out
}

/// Standardize every column name and trim every text cell in place
///
/// Names colliding after normalization get a numeric suffix: the first
/// claimant keeps the bare name, later ones become `name_2`, `name_3`, …
/// (re-checked against all assigned names). A name normalizing to nothing
/// falls back to its position, `column_1` style.
pub fn standardize(table: &mut Table) -> StandardizeOutcome {
    let mut outcome = StandardizeOutcome::default();
    let mut assigned: IndexSet<String> = IndexSet::new();

    for index in 0..table.columns.len() {
        let mut normalized = normalize_name(&table.columns[index].name);
        if normalized.is_empty() {
            normalized = format!("column_{}", index + 1);
        }

        let mut unique = normalized.clone();
        let mut suffix = 2;
        while !assigned.insert(unique.clone()) {
            unique = format!("{}_{}", normalized, suffix);
            suffix += 1;
        }

        if table.columns[index].name != unique {
            table.columns[index].name = unique;
            outcome.renamed += 1;
        }
    }

    for column in &mut table.columns {
        for value in &mut column.values {
            if let CellValue::Str(s) = value {
                if s.trim().len() != s.len() {
                    let trimmed: Arc<str> = Arc::from(s.trim());
                    *value = CellValue::Str(trimmed);
                    outcome.trimmed += 1;
                }
            }
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Column;

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name(" Fecha Registro "), "fecha_registro");
        assert_eq!(normalize_name("Total ($)"), "total_");
        assert_eq!(normalize_name("a  -  b"), "a_b");
        assert_eq!(normalize_name("Already_ok_2"), "already_ok_2");
    }

    #[test]
    fn test_normalize_name_idempotent() {
        for name in ["Nombre ", " Edad", "Fecha Registro", "Score%"] {
            let once = normalize_name(name);
            assert_eq!(normalize_name(&once), once);
        }
    }

    #[test]
    fn test_collision_gets_suffix() {
        let mut table = Table::new(vec![
            Column::new("a b"),
            Column::new("A_B"),
            Column::new("a  b"),
        ]);
        standardize(&mut table);
        let names: Vec<&str> = table.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["a_b", "a_b_2", "a_b_3"]);
    }

    #[test]
    fn test_empty_name_falls_back_to_position() {
        let mut table = Table::new(vec![Column::new("$$$"), Column::new("ok")]);
        standardize(&mut table);
        assert_eq!(table.columns[0].name, "column_1");
    }

    #[test]
    fn test_cells_trimmed_and_idempotent() {
        let mut table = Table::new(vec![Column::new("Nombre")]);
        table.add_row(vec![CellValue::from(" Pedro ")]);
        table.add_row(vec![CellValue::Int(3)]);

        let first = standardize(&mut table);
        assert_eq!(first.trimmed, 1);
        assert_eq!(table.columns[0].values[0], CellValue::from("Pedro"));

        let second = standardize(&mut table);
        assert_eq!(second.renamed, 0);
        assert_eq!(second.trimmed, 0);
        assert_eq!(table.columns[0].name, "nombre");
    }

    #[test]
    fn test_zero_columns_is_noop() {
        let mut table = Table::default();
        let outcome = standardize(&mut table);
        assert_eq!(outcome.renamed, 0);
        assert_eq!(outcome.trimmed, 0);
    }
}
