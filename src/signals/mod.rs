// =============================================================================
// Signals Module
// =============================================================================
//
// Combines the price prediction and news sentiment into an advisory decision.

pub mod fusion;

pub use fusion::{FusedSignal, SignalFusion};
