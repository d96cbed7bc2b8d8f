//! Duplicate-row and all-null-row removal

use rustc_hash::FxHashMap;

use crate::model::Table;

/// Outcome of the garbage stage
#[derive(Debug, Default, Clone, Copy)]
pub struct GarbageOutcome {
    /// Later rows equal to an earlier row
    pub duplicate_rows: usize,
    /// Rows whose every cell was null
    pub null_rows: usize,
}

/// Remove exact-duplicate rows (first occurrence wins) and all-null rows
///
/// Equality is cell-by-cell with nulls comparing equal. Surviving rows keep
/// their relative order. Duplicates are found by hashing each row and
/// verifying candidates against the earlier occurrence, so a hash collision
/// can never drop a distinct row.
pub fn remove_garbage(table: &mut Table) -> GarbageOutcome {
    let rows = table.row_count();
    let mut outcome = GarbageOutcome::default();
    if rows == 0 {
        return outcome;
    }

    let mut keep = vec![true; rows];
    let mut seen: FxHashMap<u64, Vec<usize>> = FxHashMap::default();

    for row in 0..rows {
        if table.row_is_null(row) {
            keep[row] = false;
            outcome.null_rows += 1;
            continue;
        }

        let earlier = seen.entry(table.row_hash(row)).or_default();
        if earlier.iter().any(|&e| table.rows_equal(e, row)) {
            keep[row] = false;
            outcome.duplicate_rows += 1;
        } else {
            earlier.push(row);
        }
    }

    if outcome.duplicate_rows + outcome.null_rows > 0 {
        table.retain_rows(&keep);
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CellValue, Column};

    fn table_with_rows(rows: Vec<Vec<CellValue>>) -> Table {
        let mut table = Table::new(vec![Column::new("a"), Column::new("b")]);
        for row in rows {
            table.add_row(row);
        }
        table
    }

    #[test]
    fn test_removes_duplicates_keeping_first() {
        let mut table = table_with_rows(vec![
            vec![CellValue::Int(1), CellValue::from("x")],
            vec![CellValue::Int(2), CellValue::from("y")],
            vec![CellValue::Int(1), CellValue::from("x")],
            vec![CellValue::Int(3), CellValue::from("z")],
        ]);

        let outcome = remove_garbage(&mut table);
        assert_eq!(outcome.duplicate_rows, 1);
        assert_eq!(table.row_count(), 3);
        // Order-preserving subsequence of the input
        assert_eq!(table.columns[0].values[0], CellValue::Int(1));
        assert_eq!(table.columns[0].values[1], CellValue::Int(2));
        assert_eq!(table.columns[0].values[2], CellValue::Int(3));
    }

    #[test]
    fn test_nulls_compare_equal_in_duplicates() {
        let mut table = table_with_rows(vec![
            vec![CellValue::Int(1), CellValue::Null],
            vec![CellValue::Int(1), CellValue::Null],
        ]);

        let outcome = remove_garbage(&mut table);
        assert_eq!(outcome.duplicate_rows, 1);
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn test_removes_all_null_rows() {
        let mut table = table_with_rows(vec![
            vec![CellValue::Null, CellValue::Null],
            vec![CellValue::Int(1), CellValue::Null],
            vec![CellValue::Null, CellValue::Null],
        ]);

        let outcome = remove_garbage(&mut table);
        assert_eq!(outcome.null_rows, 2);
        assert_eq!(outcome.duplicate_rows, 0);
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn test_clean_table_untouched() {
        let mut table = table_with_rows(vec![
            vec![CellValue::Int(1), CellValue::from("x")],
            vec![CellValue::Int(2), CellValue::from("y")],
        ]);

        let outcome = remove_garbage(&mut table);
        assert_eq!(outcome.duplicate_rows + outcome.null_rows, 0);
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_empty_table() {
        let mut table = Table::default();
        let outcome = remove_garbage(&mut table);
        assert_eq!(outcome.duplicate_rows + outcome.null_rows, 0);
    }
}
