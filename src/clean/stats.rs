//! Order statistics over column samples

use rustc_hash::FxHashMap;

use crate::model::CellValue;

/// Linear-interpolation quantile of an ascending sample
///
/// The quantile sits at rank `q * (n - 1)` and interpolates between the two
/// nearest order statistics (the pandas/numpy default). `sorted` must be
/// non-empty and ascending.
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    if sorted.len() == 1 {
        return sorted[0];
    }

    let rank = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Median of an ascending sample
pub fn median(sorted: &[f64]) -> f64 {
    quantile(sorted, 0.5)
}

/// Most frequent non-null value
///
/// Values are scanned in row order; the winner is the first value to reach
/// the maximum frequency, so ties resolve deterministically.
pub fn mode(values: &[CellValue]) -> Option<CellValue> {
    let mut counts: FxHashMap<&CellValue, usize> = FxHashMap::default();
    let mut best: Option<&CellValue> = None;
    let mut best_count = 0;

    for value in values {
        if value.is_null() {
            continue;
        }
        let count = counts.entry(value).or_insert(0);
        *count += 1;
        if *count > best_count {
            best_count = *count;
            best = Some(value);
        }
    }

    best.cloned()
}
