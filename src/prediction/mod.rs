// =============================================================================
// Prediction Module
// =============================================================================
//
// Price-movement prediction:
// - Moving-average trend estimator (heuristic, always available)
// - Trained-model adapter (optional override, falls back on any failure)

pub mod model;
pub mod predictor;
pub mod trend;

pub use model::{JsonModelLoader, LinearWindowModel, ModelError, ModelLoader, NoModelLoader, SequenceModel};
pub use predictor::{predict_price_movement, PricePredictor};
pub use trend::{estimate, TrendError, TrendEstimator};
