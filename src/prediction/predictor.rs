// =============================================================================
// Price Predictor — trained-model override with heuristic fallback
// =============================================================================
//
// Resolution order for a symbol:
//
//   1. If model loading is enabled, at least `model.window` closes exist, and
//      `{dir}/{symbol}_model.{ext}` loads, normalise the series with a min-max
//      scaler fitted on the full history, feed the trailing window to the
//      model, restore the forecast to price units and report
//        prediction = clamp((forecast - last) / last, ±max_abs_prediction)
//      with the configured fixed confidence.
//   2. Otherwise (or on any model failure) use the moving-average heuristic.
//
// Model failures never reach the caller.  A missing artifact is logged at
// debug level, anything else at warn level.
// =============================================================================

use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::indicators::MinMaxScaler;
use crate::market_data::{closes_from_rows, closes_of, Candle, CandleError};
use crate::prediction::model::{JsonModelLoader, ModelError, ModelLoader};
use crate::prediction::trend::TrendEstimator;
use crate::runtime_config::{AnalyticsConfig, ModelParams};
use crate::types::PredictionResult;

/// Price-movement predictor combining an optional trained model with the
/// moving-average heuristic.
pub struct PricePredictor {
    trend: TrendEstimator,
    model: ModelParams,
    loader: Box<dyn ModelLoader>,
}

impl Default for PricePredictor {
    fn default() -> Self {
        Self::from_config(&AnalyticsConfig::default())
    }
}

impl PricePredictor {
    /// Build a predictor that loads JSON artifacts per the config.
    pub fn from_config(config: &AnalyticsConfig) -> Self {
        Self::with_loader(config, Box::new(JsonModelLoader))
    }

    /// Build a predictor with a custom model loader.
    pub fn with_loader(config: &AnalyticsConfig, loader: Box<dyn ModelLoader>) -> Self {
        Self {
            trend: TrendEstimator::new(config.trend.clone()),
            model: config.model.clone(),
            loader,
        }
    }

    /// Predict from closing prices. Always returns a result.
    pub fn predict(&self, symbol: &str, closes: &[f64]) -> PredictionResult {
        match self.try_model(symbol, closes) {
            Ok(Some(result)) => return result,
            Ok(None) => {}
            Err(e) if e.is_absent() => {
                debug!(symbol, error = %e, "no trained model, using heuristic");
            }
            Err(e) => {
                warn!(symbol, error = %e, "trained model failed, using heuristic");
            }
        }
        self.trend.estimate(closes)
    }

    /// Predict from typed candles.
    pub fn predict_candles(&self, symbol: &str, candles: &[Candle]) -> PredictionResult {
        self.predict(symbol, &closes_of(candles))
    }

    /// Predict from raw kline rows (close at index 4). A malformed row yields
    /// the degenerate result.
    pub fn predict_rows(&self, symbol: &str, rows: &[Value]) -> PredictionResult {
        match self.try_predict_rows(symbol, rows) {
            Ok(result) => result,
            Err(e) => {
                warn!(symbol, error = %e, "malformed price history");
                PredictionResult::DEGENERATE
            }
        }
    }

    pub fn try_predict_rows(
        &self,
        symbol: &str,
        rows: &[Value],
    ) -> Result<PredictionResult, CandleError> {
        let closes = closes_from_rows(rows)?;
        Ok(self.predict(symbol, &closes))
    }

    /// Model-based prediction. `Ok(None)` means the model path does not apply
    /// (disabled or too little history).
    pub fn try_model(
        &self,
        symbol: &str,
        closes: &[f64],
    ) -> Result<Option<PredictionResult>, ModelError> {
        if !self.model.enabled {
            return Ok(None);
        }
        let cap = self.model.max_abs_prediction;
        let confidence = self.model.confidence;
        if !(cap.is_finite() && cap > 0.0) {
            return Err(ModelError::InvalidParams(format!("max_abs_prediction {cap}")));
        }
        if !(0.0..=1.0).contains(&confidence) {
            return Err(ModelError::InvalidParams(format!("confidence {confidence}")));
        }
        let window = self.model.window;
        if closes.len() < window {
            trace!(symbol, len = closes.len(), window, "too little history for model");
            return Ok(None);
        }

        let path = self.model.artifact_path(symbol);
        let model = self.loader.load(&path)?;

        let scaler = MinMaxScaler::fit(closes).ok_or(ModelError::NonFiniteInput)?;
        let input = scaler.transform_all(&closes[closes.len() - window..]);
        let forecast = scaler.inverse(model.infer(&input)?);
        if !forecast.is_finite() {
            return Err(ModelError::NonFiniteOutput);
        }

        let last_price = closes[closes.len() - 1];
        if last_price == 0.0 {
            return Err(ModelError::ZeroReferencePrice);
        }

        let change = ((forecast - last_price) / last_price).clamp(-cap, cap);

        debug!(symbol, forecast, last_price, change, "model prediction");

        Ok(Some(PredictionResult {
            prediction: change,
            confidence,
        }))
    }
}

/// Predict price movement for `symbol` from raw kline rows using the default
/// configuration.
pub fn predict_price_movement(symbol: &str, historical_data: &[Value]) -> PredictionResult {
    PricePredictor::default().predict_rows(symbol, historical_data)
}
