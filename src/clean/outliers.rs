//! IQR-based outlier handling

use std::cmp::Ordering;
use std::str::FromStr;

use crate::clean::{classify, stats};
use crate::error::ScrubError;
use crate::model::{CellValue, Column, ColumnKind, Table};

/// Policy for values outside the IQR fence
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutlierMethod {
    /// Winsorize: clamp each outlier to the nearer bound
    #[default]
    Cap,
    /// Drop every row holding an outlier in any numeric column
    Remove,
}

impl FromStr for OutlierMethod {
    type Err = ScrubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cap" => Ok(OutlierMethod::Cap),
            "remove" => Ok(OutlierMethod::Remove),
            _ => Err(ScrubError::UnknownOutlierMethod(s.to_string())),
        }
    }
}

/// Outcome of the outlier stage
#[derive(Debug, Default, Clone, Copy)]
pub struct OutlierOutcome {
    /// Numeric columns holding at least one outlier
    pub columns_affected: usize,
    /// Cells clamped under `Cap`
    pub cells_capped: usize,
    /// Rows dropped under `Remove`
    pub rows_removed: usize,
}

/// IQR fence for one column
#[derive(Debug, Clone, Copy)]
struct Fence {
    lower: f64,
    upper: f64,
}

impl Fence {
    fn is_outlier(&self, v: f64) -> bool {
        v < self.lower || v > self.upper
    }
}

/// Compute the fence from a column's non-missing numeric values
///
/// A zero IQR is not special-cased: the fence collapses onto Q1 and every
/// non-equal value counts as an outlier. Values exactly on a bound are kept.
fn fence(column: &Column, threshold: f64) -> Option<Fence> {
    let mut sample: Vec<f64> = column.values.iter().filter_map(classify::numeric_value).collect();
    if sample.is_empty() {
        return None;
    }
    sample.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let q1 = stats::quantile(&sample, 0.25);
    let q3 = stats::quantile(&sample, 0.75);
    let iqr = q3 - q1;

    Some(Fence {
        lower: q1 - threshold * iqr,
        upper: q3 + threshold * iqr,
    })
}

/// Apply the IQR policy to every numeric column
///
/// Every column's fence is computed against the table as passed in; under
/// `Remove` the fences are never recomputed as rows drop out. Null cells are
/// never outliers.
pub fn handle_outliers(table: &mut Table, threshold: f64, method: OutlierMethod) -> OutlierOutcome {
    let mut outcome = OutlierOutcome::default();
    let numeric: Vec<usize> = table
        .columns
        .iter()
        .enumerate()
        .filter(|(_, c)| classify::classify(c) == ColumnKind::Numeric)
        .map(|(i, _)| i)
        .collect();

    match method {
        OutlierMethod::Cap => {
            for &index in &numeric {
                let Some(fence) = fence(&table.columns[index], threshold) else {
                    continue;
                };
                let mut capped = 0;
                for value in &mut table.columns[index].values {
                    let Some(v) = classify::numeric_value(value) else {
                        continue;
                    };
                    if v < fence.lower {
                        *value = CellValue::Float(fence.lower);
                        capped += 1;
                    } else if v > fence.upper {
                        *value = CellValue::Float(fence.upper);
                        capped += 1;
                    }
                }
                if capped > 0 {
                    outcome.columns_affected += 1;
                    outcome.cells_capped += capped;
                }
            }
        }
        OutlierMethod::Remove => {
            let mut keep = vec![true; table.row_count()];
            for &index in &numeric {
                let column = &table.columns[index];
                let Some(fence) = fence(column, threshold) else {
                    continue;
                };
                let mut hit = false;
                for (row, value) in column.values.iter().enumerate() {
                    if let Some(v) = classify::numeric_value(value) {
                        if fence.is_outlier(v) {
                            keep[row] = false;
                            hit = true;
                        }
                    }
                }
                if hit {
                    outcome.columns_affected += 1;
                }
            }
            outcome.rows_removed = keep.iter().filter(|k| !**k).count();
            if outcome.rows_removed > 0 {
                table.retain_rows(&keep);
            }
        }
    }

    outcome
}
