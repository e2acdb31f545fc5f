// =============================================================================
// Sentiment Module
// =============================================================================
//
// Lexicon-based sentiment scoring for crypto news and free text.

pub mod analyzer;
pub mod lexicon;

pub use analyzer::{analyze_sentiment, combine_news, NewsItem, SentimentAnalyzer, SentimentError};
pub use lexicon::{Lexicon, TokenClass, CRYPTO_LEXICON};
