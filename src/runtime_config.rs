// =============================================================================
// Runtime Configuration — Tunables for the predictor, model adapter and fusion
// =============================================================================
//
// Every tunable parameter of the scorers lives here.  All fields carry
// `#[serde(default)]` so that a partial (or empty) config file still loads with
// the documented constants filled in.
//
// The sentiment lexicon is a process-wide constant and has no entry here.
// =============================================================================

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::types::RiskLevel;

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_true() -> bool {
    true
}

fn default_short_window() -> usize {
    5
}

fn default_long_window() -> usize {
    20
}

fn default_significant_move() -> f64 {
    0.1
}

fn default_model_dir() -> PathBuf {
    PathBuf::from("models/saved")
}

fn default_model_extension() -> String {
    "json".to_string()
}

fn default_model_window() -> usize {
    60
}

fn default_max_abs_prediction() -> f64 {
    0.2
}

fn default_model_confidence() -> f64 {
    0.8
}

fn default_prediction_weight() -> f64 {
    0.7
}

fn default_sentiment_weight() -> f64 {
    0.3
}

fn default_entry_threshold() -> f64 {
    0.15
}

// =============================================================================
// TrendParams
// =============================================================================

/// Moving-average windows for the heuristic trend estimator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendParams {
    /// Look-back of the fast moving average.
    #[serde(default = "default_short_window")]
    pub short_window: usize,

    /// Look-back of the slow moving average; also the minimum history.
    #[serde(default = "default_long_window")]
    pub long_window: usize,

    /// Fraction of the last price treated as a full-scale move.
    #[serde(default = "default_significant_move")]
    pub significant_move: f64,
}

impl Default for TrendParams {
    fn default() -> Self {
        Self {
            short_window: default_short_window(),
            long_window: default_long_window(),
            significant_move: default_significant_move(),
        }
    }
}

// =============================================================================
// ModelParams
// =============================================================================

/// Settings for the optional trained-model override.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelParams {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Directory holding `{symbol}_model.{extension}` artifacts.
    #[serde(default = "default_model_dir")]
    pub dir: PathBuf,

    #[serde(default = "default_model_extension")]
    pub extension: String,

    /// Number of trailing normalized closes fed to the model.
    #[serde(default = "default_model_window")]
    pub window: usize,

    /// Cap on the absolute percentage change reported from a model forecast.
    #[serde(default = "default_max_abs_prediction")]
    pub max_abs_prediction: f64,

    /// Fixed confidence attached to model-based predictions.
    #[serde(default = "default_model_confidence")]
    pub confidence: f64,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: default_model_dir(),
            extension: default_model_extension(),
            window: default_model_window(),
            max_abs_prediction: default_max_abs_prediction(),
            confidence: default_model_confidence(),
        }
    }
}

impl ModelParams {
    /// Artifact location for `symbol`, e.g. `models/saved/btc_model.json`.
    pub fn artifact_path(&self, symbol: &str) -> PathBuf {
        self.dir.join(format!(
            "{}_model.{}",
            symbol.to_lowercase(),
            self.extension
        ))
    }
}

// =============================================================================
// FusionParams
// =============================================================================

/// Weights and threshold used when combining prediction and sentiment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FusionParams {
    #[serde(default = "default_prediction_weight")]
    pub prediction_weight: f64,

    #[serde(default = "default_sentiment_weight")]
    pub sentiment_weight: f64,

    /// Base threshold before the risk-level multiplier is applied.
    #[serde(default = "default_entry_threshold")]
    pub entry_threshold: f64,

    #[serde(default)]
    pub risk_level: RiskLevel,
}

impl Default for FusionParams {
    fn default() -> Self {
        Self {
            prediction_weight: default_prediction_weight(),
            sentiment_weight: default_sentiment_weight(),
            entry_threshold: default_entry_threshold(),
            risk_level: RiskLevel::default(),
        }
    }
}

// =============================================================================
// AnalyticsConfig
// =============================================================================

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    #[serde(default)]
    pub trend: TrendParams,

    #[serde(default)]
    pub model: ModelParams,

    #[serde(default)]
    pub fusion: FusionParams,
}

impl AnalyticsConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// A missing or invalid file is an error so the caller can fall back to
    /// defaults with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config from {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("invalid config in {}", path.display()))?;

        info!(
            path = %path.display(),
            short_window = config.trend.short_window,
            long_window = config.trend.long_window,
            model_dir = %config.model.dir.display(),
            "config loaded"
        );

        Ok(config)
    }

    /// Reject parameter combinations the estimator cannot work with.
    pub fn validate(&self) -> Result<()> {
        let t = &self.trend;
        if t.short_window < 2 {
            bail!("short_window must be at least 2, got {}", t.short_window);
        }
        if t.short_window > t.long_window {
            bail!(
                "short_window ({}) exceeds long_window ({})",
                t.short_window,
                t.long_window
            );
        }
        if !(t.significant_move > 0.0) {
            bail!("significant_move must be positive, got {}", t.significant_move);
        }
        let m = &self.model;
        if m.window == 0 {
            bail!("model window must be non-zero");
        }
        if !(m.max_abs_prediction.is_finite() && m.max_abs_prediction > 0.0) {
            bail!(
                "max_abs_prediction must be finite and positive, got {}",
                m.max_abs_prediction
            );
        }
        if !(0.0..=1.0).contains(&m.confidence) {
            bail!("model confidence must lie in [0, 1], got {}", m.confidence);
        }
        Ok(())
    }
}
