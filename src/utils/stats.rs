//! Order statistics over plain `f64` slices
//!
//! Percentiles use linear interpolation between closest ranks: for `n`
//! sorted values the `p`-th percentile sits at rank `p / 100 * (n - 1)`,
//! and fractional ranks interpolate between the two neighbouring values.
//! This is the common "linear" percentile method (R type 7).

use std::cmp::Ordering;

/// Sort a copy of `values` ascending
///
/// Callers are expected to have dropped NaN already; any NaN left compares
/// as equal and keeps its relative position.
pub fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    sorted
}

/// Percentile of already-sorted values using linear interpolation
///
/// Returns `None` for an empty slice. `pct` is clamped to `[0, 100]`.
pub fn percentile_sorted(sorted: &[f64], pct: f64) -> Option<f64> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }
    if n == 1 {
        return Some(sorted[0]);
    }

    let rank = pct.clamp(0.0, 100.0) / 100.0 * (n - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let fraction = rank - lo as f64;

    Some(sorted[lo] + fraction * (sorted[hi] - sorted[lo]))
}

/// Percentile of unsorted values
pub fn percentile(values: &[f64], pct: f64) -> Option<f64> {
    percentile_sorted(&sorted_copy(values), pct)
}

/// Median (50th percentile); even counts average the two middle values
pub fn median(values: &[f64]) -> Option<f64> {
    percentile(values, 50.0)
}
