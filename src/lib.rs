// =============================================================================
// market-pulse — price-movement and news-sentiment scoring
// =============================================================================
//
// Two independent, stateless scorers:
// - `prediction`: moving-average trend + confidence, with an optional
//   trained-model override that falls back silently on any failure
// - `sentiment`:  negation-aware lexicon scoring of news text
//
// `signals` blends both into an advisory BUY/SELL/HOLD decision.  Every public
// scoring entry point is total: degraded cases return documented defaults and
// are logged through `tracing`.
// =============================================================================

pub mod indicators;
pub mod market_data;
pub mod prediction;
pub mod report;
pub mod runtime_config;
pub mod sentiment;
pub mod signals;
pub mod types;

pub use prediction::{estimate, predict_price_movement, PricePredictor, TrendEstimator};
pub use runtime_config::AnalyticsConfig;
pub use sentiment::{analyze_sentiment, NewsItem, SentimentAnalyzer};
pub use signals::{FusedSignal, SignalFusion};
pub use types::{PredictionResult, RiskLevel, SentimentLabel, SentimentResult, TradeAction};
