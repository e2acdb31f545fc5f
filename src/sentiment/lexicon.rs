// =============================================================================
// Crypto news lexicon — polarity word lists and negation markers
// =============================================================================

use std::collections::HashSet;
use std::sync::LazyLock;

const POSITIVE_WORDS: &[&str] = &[
    "bullish", "surge", "soar", "gain", "rally", "rise", "up", "high", "growth",
    "positive", "profit", "success", "breakthrough", "adoption", "partnership",
    "launch", "upgrade", "improve", "innovation", "opportunity", "potential",
    "strong", "support", "confidence", "momentum", "outperform", "beat", "exceed",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bearish", "crash", "plunge", "drop", "fall", "down", "low", "decline",
    "negative", "loss", "fail", "risk", "threat", "ban", "regulation", "concern",
    "fear", "uncertainty", "volatility", "sell", "dump", "weak", "resistance",
    "underperform", "miss", "below", "warning", "trouble", "problem", "hack", "scam",
];

const NEGATION_WORDS: &[&str] = &[
    "not", "no", "never", "none", "neither", "nor", "hardly", "barely",
];

/// Process-wide lexicon, built on first use and never mutated.
pub static CRYPTO_LEXICON: LazyLock<Lexicon> =
    LazyLock::new(|| Lexicon::new(POSITIVE_WORDS, NEGATIVE_WORDS, NEGATION_WORDS));

/// How a single (lowercased) token is treated by the scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenClass {
    Negation,
    Positive,
    Negative,
    Other,
}

/// Immutable word sets. Words are expected in lowercase.
#[derive(Debug, Clone)]
pub struct Lexicon {
    positive: HashSet<&'static str>,
    negative: HashSet<&'static str>,
    negations: HashSet<&'static str>,
}

impl Lexicon {
    pub fn new(
        positive: &[&'static str],
        negative: &[&'static str],
        negations: &[&'static str],
    ) -> Self {
        Self {
            positive: positive.iter().copied().collect(),
            negative: negative.iter().copied().collect(),
            negations: negations.iter().copied().collect(),
        }
    }

    /// Negation markers take precedence, then positive, then negative.
    pub fn classify(&self, token: &str) -> TokenClass {
        if self.negations.contains(token) {
            TokenClass::Negation
        } else if self.positive.contains(token) {
            TokenClass::Positive
        } else if self.negative.contains(token) {
            TokenClass::Negative
        } else {
            TokenClass::Other
        }
    }

    pub fn positive_words(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.positive.iter().copied()
    }

    pub fn negative_words(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.negative.iter().copied()
    }
}
