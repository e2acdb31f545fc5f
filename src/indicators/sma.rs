// =============================================================================
// Simple Moving Average (SMA) and first differences
// =============================================================================
//
// SMA over the most recent `period` closes:
//   SMA = (close_{n-period} + ... + close_{n-1}) / period
//
// First differences of a window of length k produce k - 1 values:
//   diff_i = close_{i+1} - close_i
// =============================================================================

/// Mean of the last `period` values of `closes`.
///
/// Returns `None` when `period == 0` or the series is shorter than `period`.
pub fn sma_tail(closes: &[f64], period: usize) -> Option<f64> {
    if period == 0 || closes.len() < period {
        return None;
    }
    let window = &closes[closes.len() - period..];
    Some(window.iter().sum::<f64>() / period as f64)
}

/// Consecutive differences of `values`. Empty for fewer than two values.
pub fn first_differences(values: &[f64]) -> Vec<f64> {
    values.windows(2).map(|w| w[1] - w[0]).collect()
}

/// Three-valued sign: `1.0`, `-1.0`, or `0.0` for zero (and NaN).
///
/// Unlike `f64::signum`, zero maps to zero so that a flat move compares equal
/// to a flat trend.
pub fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}
