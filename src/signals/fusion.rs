// =============================================================================
// Signal Fusion — Weighted blend of price prediction and news sentiment
// =============================================================================
//
//   combined  = prediction * 0.7 + sentiment_score * 0.3
//   threshold = 0.15 * risk_multiplier     (Low 0.5, Medium 1.0, High 2.0)
//
//   combined >  threshold  => BUY
//   combined < -threshold  => SELL
//   otherwise              => HOLD
//
// The decision is advisory; nothing here places orders.
// =============================================================================

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::runtime_config::FusionParams;
use crate::types::{PredictionResult, RiskLevel, SentimentResult, TradeAction};

/// Outcome of blending one prediction with one sentiment reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FusedSignal {
    pub combined: f64,
    pub threshold: f64,
    pub action: TradeAction,
    /// Scale factor for the position size, equal to the risk multiplier.
    pub position_scale: f64,
}

/// Blends prediction and sentiment into a BUY/SELL/HOLD decision.
#[derive(Debug, Clone, Default)]
pub struct SignalFusion {
    params: FusionParams,
}

impl SignalFusion {
    pub fn new(params: FusionParams) -> Self {
        Self { params }
    }

    /// Fuse using the configured risk level.
    pub fn fuse(&self, prediction: &PredictionResult, sentiment: &SentimentResult) -> FusedSignal {
        self.fuse_with_risk(prediction, sentiment, self.params.risk_level)
    }

    pub fn fuse_with_risk(
        &self,
        prediction: &PredictionResult,
        sentiment: &SentimentResult,
        risk: RiskLevel,
    ) -> FusedSignal {
        let combined = prediction.prediction * self.params.prediction_weight
            + sentiment.score * self.params.sentiment_weight;

        let multiplier = risk.multiplier();
        let threshold = self.params.entry_threshold * multiplier;

        let action = if combined > threshold {
            TradeAction::Buy
        } else if combined < -threshold {
            TradeAction::Sell
        } else {
            TradeAction::Hold
        };

        debug!(combined, threshold, risk = %risk, action = %action, "signals fused");

        FusedSignal {
            combined,
            threshold,
            action,
            position_scale: multiplier,
        }
    }
}
