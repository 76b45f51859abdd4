//! Order statistics and decay curves used by the aggregator and palette

use num_traits::Float;

/// Rank index of percentile `p` in a sample of `len` values
///
/// Uses the nearest-rank-below rule `floor(p * len)`, clamped to the last
/// element so that `p = 1.0` is still a valid lookup.
pub fn percentile_index(len: usize, p: f64) -> usize {
    if len == 0 {
        return 0;
    }
    ((p * len as f64).floor() as usize).min(len - 1)
}

/// Value at percentile `p` of an ascending slice
pub fn percentile<T: Float>(sorted: &[T], p: f64) -> Option<T> {
    sorted.get(percentile_index(sorted.len(), p)).copied()
}

/// Sort floating-point values ascending, treating incomparable pairs as equal
pub fn sort_ascending<T: Float>(values: &mut [T]) {
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
}

/// Exponential approach from `ceiling` (at zero) down to `floor`
///
/// `floor + (ceiling - floor) * e^(-decay * x)`
pub fn exponential_decay(floor: f64, ceiling: f64, decay: f64, x: f64) -> f64 {
    floor + (ceiling - floor) * (-decay * x).exp()
}
