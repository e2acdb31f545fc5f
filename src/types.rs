// =============================================================================
// Shared types used across the market-pulse scorers
// =============================================================================

use serde::{Deserialize, Serialize};

/// Output of the price-movement predictor.
///
/// `prediction` lies in [-1, 1] on the heuristic path and in [-0.2, 0.2] when a
/// trained model produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub prediction: f64,
    pub confidence: f64,
}

impl PredictionResult {
    /// Result returned for insufficient or unusable price history.
    pub const DEGENERATE: Self = Self {
        prediction: 0.0,
        confidence: 0.5,
    };
}

impl Default for PredictionResult {
    fn default() -> Self {
        Self::DEGENERATE
    }
}

/// Categorical sentiment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl Default for SentimentLabel {
    fn default() -> Self {
        Self::Neutral
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Positive => write!(f, "positive"),
            Self::Negative => write!(f, "negative"),
            Self::Neutral => write!(f, "neutral"),
        }
    }
}

/// Output of the lexicon sentiment scorer. `score` lies in [-1, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SentimentResult {
    pub score: f64,
    pub label: SentimentLabel,
}

impl SentimentResult {
    pub const NEUTRAL: Self = Self {
        score: 0.0,
        label: SentimentLabel::Neutral,
    };
}

/// User risk appetite; scales the fusion entry threshold.
///
/// Serialised as `LOW` / `MEDIUM` / `HIGH`; lowercase and capitalised
/// spellings are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    #[serde(alias = "low", alias = "Low")]
    Low,
    #[serde(alias = "medium", alias = "Medium")]
    Medium,
    #[serde(alias = "high", alias = "High")]
    High,
}

impl RiskLevel {
    pub fn multiplier(&self) -> f64 {
        match self {
            Self::Low => 0.5,
            Self::Medium => 1.0,
            Self::High => 2.0,
        }
    }
}

impl Default for RiskLevel {
    fn default() -> Self {
        Self::Medium
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::High => write!(f, "HIGH"),
        }
    }
}

/// Decision derived from the fused signal. Advisory only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeAction {
    Buy,
    Sell,
    Hold,
}

impl std::fmt::Display for TradeAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
            Self::Hold => write!(f, "HOLD"),
        }
    }
}
