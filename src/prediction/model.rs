// =============================================================================
// Trained-Model Adapter — load/infer capability for sequence models
// =============================================================================
//
// The predictor only needs two operations from a trained model:
//
//   load(path)     -> model          (may fail: missing, unreadable, corrupt)
//   infer(window)  -> scalar forecast on the normalized scale
//
// Any modelling framework can sit behind these traits.  The crate ships a
// framework-free `LinearWindowModel` stored as JSON, plus `NoModelLoader` for
// deployments that never consult a model.
// =============================================================================

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::trace;

/// Every way the trained-model path can fail.  All of them are recovered by
/// falling back to the heuristic estimator.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("no model artifact at {0}")]
    Missing(PathBuf),

    #[error("model loading is disabled")]
    Unavailable,

    #[error("failed to read model artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse model artifact {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("model expects a window of {expected} points, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("model artifact is invalid: {0}")]
    InvalidArtifact(String),

    #[error("price history contains non-finite values")]
    NonFiniteInput,

    #[error("model produced a non-finite forecast")]
    NonFiniteOutput,

    #[error("last price is zero, percentage change is undefined")]
    ZeroReferencePrice,

    #[error("unusable model parameters: {0}")]
    InvalidParams(String),
}

impl ModelError {
    /// Whether this failure is the ordinary "no model for this symbol" case,
    /// which is not worth a warning.
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Missing(_) | Self::Unavailable)
    }
}

/// A trained sequence model that maps a window of normalized closes to a
/// normalized next-step forecast.
pub trait SequenceModel: Send + Sync {
    fn infer(&self, window: &[f64]) -> Result<f64, ModelError>;
}

/// Loads a [`SequenceModel`] from an artifact path.
pub trait ModelLoader: Send + Sync {
    fn load(&self, path: &Path) -> Result<Box<dyn SequenceModel>, ModelError>;
}

// =============================================================================
// LinearWindowModel
// =============================================================================

/// Linear autoregressive model: `forecast = bias + Σ weights[i] * window[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearWindowModel {
    pub weights: Vec<f64>,
    #[serde(default)]
    pub bias: f64,
}

impl LinearWindowModel {
    fn check(&self) -> Result<(), ModelError> {
        if self.weights.is_empty() {
            return Err(ModelError::InvalidArtifact("no weights".into()));
        }
        if !self.bias.is_finite() || self.weights.iter().any(|w| !w.is_finite()) {
            return Err(ModelError::InvalidArtifact("non-finite coefficient".into()));
        }
        Ok(())
    }
}

impl SequenceModel for LinearWindowModel {
    fn infer(&self, window: &[f64]) -> Result<f64, ModelError> {
        if window.len() != self.weights.len() {
            return Err(ModelError::ShapeMismatch {
                expected: self.weights.len(),
                actual: window.len(),
            });
        }
        let dot: f64 = self
            .weights
            .iter()
            .zip(window)
            .map(|(w, x)| w * x)
            .sum();
        Ok(self.bias + dot)
    }
}

// =============================================================================
// Loaders
// =============================================================================

/// Reads a [`LinearWindowModel`] serialised as JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonModelLoader;

impl ModelLoader for JsonModelLoader {
    fn load(&self, path: &Path) -> Result<Box<dyn SequenceModel>, ModelError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ModelError::Missing(path.to_path_buf()));
            }
            Err(source) => {
                return Err(ModelError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let model: LinearWindowModel =
            serde_json::from_str(&content).map_err(|source| ModelError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        model.check()?;

        trace!(path = %path.display(), window = model.weights.len(), "model artifact loaded");
        Ok(Box::new(model))
    }
}

/// Loader for deployments without trained models.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoModelLoader;

impl ModelLoader for NoModelLoader {
    fn load(&self, _path: &Path) -> Result<Box<dyn SequenceModel>, ModelError> {
        Err(ModelError::Unavailable)
    }
}
