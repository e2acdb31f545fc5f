// =============================================================================
// Analysis Report — one request in, one auditable record out
// =============================================================================
//
// Wraps both scorers and the fusion step for the runner binary.  A request
// carries raw kline rows, optional news items and optional free text; the
// report records every intermediate result together with a timestamp.
// =============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::prediction::PricePredictor;
use crate::runtime_config::AnalyticsConfig;
use crate::sentiment::{NewsItem, SentimentAnalyzer};
use crate::signals::{FusedSignal, SignalFusion};
use crate::types::{PredictionResult, RiskLevel, SentimentResult};

/// Input accepted by the runner.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisRequest {
    pub symbol: String,

    /// Raw kline rows, oldest first, close at index 4.
    #[serde(default)]
    pub candles: Vec<Value>,

    #[serde(default)]
    pub news: Vec<NewsItem>,

    /// Free text scored in addition to the news. Any JSON value is accepted,
    /// `null` included; anything but a string scores neutral. `None` only
    /// when the field is absent.
    #[serde(default, deserialize_with = "present_value")]
    pub text: Option<Value>,

    /// Overrides the configured risk level for this request.
    #[serde(default)]
    pub risk_level: Option<RiskLevel>,
}

/// Keeps an explicit `null` as `Some(Value::Null)` instead of `None`.
fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Everything computed for one request.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub symbol: String,
    pub generated_at: DateTime<Utc>,
    pub prediction: PredictionResult,
    pub sentiment: SentimentResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_sentiment: Option<SentimentResult>,
    pub signal: FusedSignal,
}

/// Holds the configured scorers; build once, analyze many requests.
pub struct ReportBuilder {
    predictor: PricePredictor,
    fusion: SignalFusion,
    risk_level: RiskLevel,
}

impl ReportBuilder {
    pub fn new(config: &AnalyticsConfig) -> Self {
        Self::with_predictor(config, PricePredictor::from_config(config))
    }

    pub fn with_predictor(config: &AnalyticsConfig, predictor: PricePredictor) -> Self {
        Self {
            predictor,
            fusion: SignalFusion::new(config.fusion.clone()),
            risk_level: config.fusion.risk_level,
        }
    }

    /// News sentiment drives the fusion; free text is reported alongside.
    pub fn analyze(&self, request: &AnalysisRequest) -> AnalysisReport {
        let analyzer = SentimentAnalyzer::default();

        let prediction = self.predictor.predict_rows(&request.symbol, &request.candles);
        let sentiment = analyzer.analyze_news(&request.news);
        let text_sentiment = request.text.as_ref().map(|t| analyzer.analyze_value(t));

        let risk = request.risk_level.unwrap_or(self.risk_level);
        let signal = self.fusion.fuse_with_risk(&prediction, &sentiment, risk);

        AnalysisReport {
            symbol: request.symbol.clone(),
            generated_at: Utc::now(),
            prediction,
            sentiment,
            text_sentiment,
            signal,
        }
    }
}
