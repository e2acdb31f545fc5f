// =============================================================================
// Candles — OHLCV records and close-price extraction
// =============================================================================
//
// Exchange kline endpoints return each candle as a positional array:
//
//   [open_time, open, high, low, close, volume, ...]
//
// with prices encoded either as JSON numbers or as numeric strings.  Only the
// close (index 4) feeds the predictor.
// =============================================================================

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Field position of the close price in a raw kline row.
pub const CLOSE_INDEX: usize = 4;

/// A single OHLCV candle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub open_time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub volume: f64,
}

/// Why a raw kline row could not be decoded.
#[derive(Debug, Error, PartialEq)]
pub enum CandleError {
    #[error("row {row} is not an array")]
    NotAnArray { row: usize },

    #[error("row {row} has {len} fields, close is at index 4")]
    TooShort { row: usize, len: usize },

    #[error("row {row} close is not numeric: {value}")]
    NotNumeric { row: usize, value: String },
}

/// Closing prices of typed candles, oldest first.
pub fn closes_of(candles: &[Candle]) -> Vec<f64> {
    candles.iter().map(|c| c.close).collect()
}

/// Decode the close of every raw kline row, preserving order.
pub fn closes_from_rows(rows: &[Value]) -> Result<Vec<f64>, CandleError> {
    rows.iter()
        .enumerate()
        .map(|(row, value)| close_of_row(row, value))
        .collect()
}

fn close_of_row(row: usize, value: &Value) -> Result<f64, CandleError> {
    let fields = value.as_array().ok_or(CandleError::NotAnArray { row })?;
    let field = fields.get(CLOSE_INDEX).ok_or(CandleError::TooShort {
        row,
        len: fields.len(),
    })?;

    let parsed = match field {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    parsed.ok_or_else(|| CandleError::NotNumeric {
        row,
        value: field.to_string(),
    })
}
