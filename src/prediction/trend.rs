// =============================================================================
// Trend Estimator — moving-average crossover with move-consistency confidence
// =============================================================================
//
// Given closes (oldest first):
//
//   short_ma   = SMA(last 5)
//   long_ma    = SMA(last 20)
//   trend      = short_ma - long_ma
//   normalized = clamp(trend / (last_price * 0.1), -1, 1)
//
// Confidence measures how many of the recent moves agree with the trend:
//
//   diffs       = first differences of the last 5 closes (4 values)
//   consistency = |{ d : sign(d) == sign(trend) }| / |diffs|
//   confidence  = 0.5 + (consistency - 0.5) * 0.5
//
// `sign` is three-valued, so a flat trend matches flat moves.  A perfectly
// flat series therefore scores consistency 1.0 and confidence 0.75.
//
// Fewer than `long_window` closes, a zero last price, or any non-finite close
// in the long window yields the degenerate result {0.0, 0.5}.  So do scales
// f64 cannot represent: a move threshold that underflows to zero, or moving
// averages that overflow.
// =============================================================================

use thiserror::Error;
use tracing::{debug, trace};

use crate::indicators::{first_differences, sign, sma_tail};
use crate::runtime_config::TrendParams;
use crate::types::PredictionResult;

/// Reasons the heuristic cannot produce a meaningful trend.
#[derive(Debug, Error, PartialEq)]
pub enum TrendError {
    #[error("need {required} closes, got {provided}")]
    InsufficientHistory { required: usize, provided: usize },

    #[error("last price is zero")]
    ZeroLastPrice,

    #[error("non-finite close at index {0}")]
    NonFinitePrice(usize),

    #[error("short window {short} must be at least 2 and at most long window {long}")]
    InvalidWindows { short: usize, long: usize },

    #[error("move threshold {0} is not a usable scale")]
    DegenerateScale(f64),

    #[error("moving-average spread is not finite")]
    NonFiniteTrend,
}

/// Heuristic moving-average trend estimator.
#[derive(Debug, Clone, Default)]
pub struct TrendEstimator {
    params: TrendParams,
}

impl TrendEstimator {
    pub fn new(params: TrendParams) -> Self {
        Self { params }
    }

    /// Estimate trend and confidence. Never fails; unusable input yields
    /// [`PredictionResult::DEGENERATE`].
    pub fn estimate(&self, prices: &[f64]) -> PredictionResult {
        match self.try_estimate(prices) {
            Ok(result) => result,
            Err(e @ TrendError::InsufficientHistory { .. }) => {
                trace!(error = %e, "trend: insufficient data");
                PredictionResult::DEGENERATE
            }
            Err(e) => {
                debug!(error = %e, "trend: degenerate input");
                PredictionResult::DEGENERATE
            }
        }
    }

    /// Same as [`estimate`](Self::estimate) but reports why the degenerate
    /// result would have been used.
    pub fn try_estimate(&self, prices: &[f64]) -> Result<PredictionResult, TrendError> {
        let long = self.params.long_window;
        let short = self.params.short_window;

        if short < 2 || short > long {
            return Err(TrendError::InvalidWindows { short, long });
        }

        if prices.len() < long {
            return Err(TrendError::InsufficientHistory {
                required: long,
                provided: prices.len(),
            });
        }

        let start = prices.len() - long;
        if let Some(offset) = prices[start..].iter().position(|p| !p.is_finite()) {
            return Err(TrendError::NonFinitePrice(start + offset));
        }

        let last_price = prices[prices.len() - 1];
        if last_price == 0.0 {
            return Err(TrendError::ZeroLastPrice);
        }

        let max_trend = last_price * self.params.significant_move;
        if !(max_trend.abs() > 0.0) {
            return Err(TrendError::DegenerateScale(max_trend));
        }

        let provided = prices.len();
        let insufficient = || TrendError::InsufficientHistory {
            required: long,
            provided,
        };
        let short_ma = sma_tail(prices, short).ok_or_else(insufficient)?;
        let long_ma = sma_tail(prices, long).ok_or_else(insufficient)?;

        let trend = short_ma - long_ma;
        if !trend.is_finite() {
            return Err(TrendError::NonFiniteTrend);
        }
        let normalized = (trend / max_trend).clamp(-1.0, 1.0);

        let recent = first_differences(&prices[prices.len() - short..]);
        let trend_sign = sign(trend);
        let agreeing = recent.iter().filter(|&&d| sign(d) == trend_sign).count();
        let consistency = agreeing as f64 / recent.len() as f64;
        let confidence = 0.5 + (consistency - 0.5) * 0.5;

        trace!(short_ma, long_ma, trend, normalized, consistency, "trend estimated");

        Ok(PredictionResult {
            prediction: normalized,
            confidence,
        })
    }
}

/// Heuristic estimate with the default 5/20 windows.
pub fn estimate(prices: &[f64]) -> PredictionResult {
    TrendEstimator::default().estimate(prices)
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    fn ascending(n: usize) -> Vec<f64> {
        (1..=n).map(|i| 100.0 + i as f64).collect()
    }

    #[test]
    fn short_history_is_degenerate() {
        for n in 0..20 {
            let prices = ascending(n);
            assert_eq!(estimate(&prices), PredictionResult::DEGENERATE);
        }
        assert_eq!(
            TrendEstimator::default().try_estimate(&ascending(19)),
            Err(TrendError::InsufficientHistory {
                required: 20,
                provided: 19
            })
        );
    }

    #[test]
    fn flat_series_has_zero_trend_and_full_consistency() {
        let prices = vec![100.0; 20];
        let r = estimate(&prices);
        assert_eq!(r.prediction, 0.0);
        assert!((r.confidence - 0.75).abs() < 1e-12);
    }

    #[test]
    fn ascending_series_known_values() {
        // Closes 101..=120: short_ma = 118, long_ma = 110.5, trend = 7.5,
        // max_trend = 12.0, normalized = 0.625. Every move is up.
        let r = estimate(&ascending(20));
        assert!((r.prediction - 0.625).abs() < 1e-12);
        assert!((r.confidence - 0.75).abs() < 1e-12);
    }

    #[test]
    fn descending_series_is_negative() {
        let prices: Vec<f64> = ascending(30).into_iter().rev().collect();
        let r = estimate(&prices);
        assert!(r.prediction < 0.0);
        assert!((r.confidence - 0.75).abs() < 1e-12);
    }

    #[test]
    fn mixed_moves_lower_confidence() {
        // Rising overall, last 5 closes: 120, 121, 119, 122, 121
        // diffs: +1, -2, +3, -1 => 2 of 4 agree with an up-trend.
        let mut prices = vec![100.0; 15];
        prices.extend_from_slice(&[120.0, 121.0, 119.0, 122.0, 121.0]);
        let r = estimate(&prices);
        assert!(r.prediction > 0.0);
        assert!((r.confidence - 0.5).abs() < 1e-12);
    }

    #[test]
    fn counter_trend_moves_bottom_out_confidence() {
        // Short MA above long MA, but each of the last 4 moves is down.
        let mut prices = vec![100.0; 15];
        prices.extend_from_slice(&[140.0, 135.0, 130.0, 125.0, 120.0]);
        let r = estimate(&prices);
        assert!(r.prediction > 0.0);
        assert!((r.confidence - 0.25).abs() < 1e-12);
    }

    #[test]
    fn prediction_is_clamped() {
        let mut prices = vec![1.0; 15];
        prices.extend_from_slice(&[50.0, 60.0, 70.0, 80.0, 90.0]);
        assert_eq!(estimate(&prices).prediction, 1.0);

        let mut prices = vec![100.0; 15];
        prices.extend_from_slice(&[5.0, 4.0, 3.0, 2.0, 1.0]);
        assert_eq!(estimate(&prices).prediction, -1.0);
    }

    #[test]
    fn zero_last_price_is_degenerate() {
        let mut prices = vec![10.0; 19];
        prices.push(0.0);
        assert_eq!(
            TrendEstimator::default().try_estimate(&prices),
            Err(TrendError::ZeroLastPrice)
        );
        assert_eq!(estimate(&prices), PredictionResult::DEGENERATE);
    }

    #[test]
    fn non_finite_price_is_degenerate() {
        let mut prices = vec![10.0; 20];
        prices[7] = f64::NAN;
        assert_eq!(
            TrendEstimator::default().try_estimate(&prices),
            Err(TrendError::NonFinitePrice(7))
        );
        assert_eq!(estimate(&prices), PredictionResult::DEGENERATE);
    }

    #[test]
    fn non_finite_outside_long_window_is_ignored() {
        let mut prices = vec![f64::NAN];
        prices.extend(vec![10.0; 20]);
        let r = estimate(&prices);
        assert_eq!(r.prediction, 0.0);
        assert!((r.confidence - 0.75).abs() < 1e-12);
    }

    #[test]
    fn raising_short_window_never_lowers_trend() {
        // Bump closes inside the short window (but not the last close, which
        // sets the scale) and check the normalized trend is non-decreasing.
        let base: Vec<f64> = (0..25).map(|i| 100.0 + ((i * 7) % 5) as f64).collect();
        let mut prev = estimate(&base).prediction;
        for bump in 1..=20 {
            let mut prices = base.clone();
            for p in &mut prices[20..24] {
                *p += bump as f64;
            }
            let next = estimate(&prices).prediction;
            assert!(next >= prev, "bump {bump}: {next} < {prev}");
            prev = next;
        }
    }

    #[test]
    fn extreme_magnitudes_are_degenerate() {
        // Twenty closes of 1e308 overflow the moving-average sums.
        let prices = vec![1e308; 20];
        assert_eq!(
            TrendEstimator::default().try_estimate(&prices),
            Err(TrendError::NonFiniteTrend)
        );
        assert_eq!(estimate(&prices), PredictionResult::DEGENERATE);
    }

    #[test]
    fn subnormal_prices_are_degenerate() {
        // 10% of the smallest subnormal rounds to zero.
        let prices = vec![5e-324; 20];
        assert!(matches!(
            TrendEstimator::default().try_estimate(&prices),
            Err(TrendError::DegenerateScale(_))
        ));
        assert_eq!(estimate(&prices), PredictionResult::DEGENERATE);
    }

    #[test]
    fn invalid_windows_are_degenerate() {
        let prices = ascending(40);
        for (short, long) in [(0, 20), (1, 20), (30, 20)] {
            let est = TrendEstimator::new(TrendParams {
                short_window: short,
                long_window: long,
                significant_move: 0.1,
            });
            assert_eq!(
                est.try_estimate(&prices),
                Err(TrendError::InvalidWindows { short, long })
            );
            assert_eq!(est.estimate(&prices), PredictionResult::DEGENERATE);
        }
    }

    #[test]
    fn outputs_stay_in_range() {
        let wave = |i: usize| ((i as f64) * 0.37).sin();
        let all_series: Vec<Vec<f64>> = vec![
            (0..200).map(|i| 50.0 + 30.0 * wave(i)).collect(),
            (0..200).map(|i| f64::MAX / 4.0 * (1.0 + 0.5 * wave(i))).collect(),
            (0..200).map(|i| 1e-300 * (1.0 + 0.5 * wave(i))).collect(),
            (0..200).map(|i| 5e-324 * (1 + i % 3) as f64).collect(),
            (0..200).map(|i| if i % 2 == 0 { 1e-3 } else { 1e300 }).collect(),
            vec![1e308; 200],
        ];
        let windows = [(2, 2), (2, 20), (5, 20), (20, 20)];

        for (short, long) in windows {
            let est = TrendEstimator::new(TrendParams {
                short_window: short,
                long_window: long,
                significant_move: 0.1,
            });
            for series in &all_series {
                for end in 0..series.len() {
                    let r = est.estimate(&series[..end]);
                    assert!(
                        (-1.0..=1.0).contains(&r.prediction),
                        "{short}/{long} end {end}: {r:?}"
                    );
                    assert!(
                        (0.0..=1.0).contains(&r.confidence),
                        "{short}/{long} end {end}: {r:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn custom_windows() {
        let est = TrendEstimator::new(TrendParams {
            short_window: 2,
            long_window: 4,
            significant_move: 0.1,
        });
        // short_ma = 3.5, long_ma = 2.5, trend = 1.0, max_trend = 0.4 => clamp 1
        let r = est.estimate(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(r.prediction, 1.0);
        assert!((r.confidence - 0.75).abs() < 1e-12);
    }
}
