// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free helpers used by the price predictor.  Functions that
// can fail on short input return `Option<T>` so callers are forced to handle
// insufficient-data scenarios.

pub mod scaler;
pub mod sma;

pub use scaler::MinMaxScaler;
pub use sma::{first_differences, sign, sma_tail};
