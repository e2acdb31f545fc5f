pub mod candle;

pub use candle::{closes_from_rows, closes_of, Candle, CandleError, CLOSE_INDEX};
