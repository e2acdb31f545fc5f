// =============================================================================
// Sentiment Analyzer — negation-aware lexicon scoring
// =============================================================================
//
// Preprocessing: lowercase, keep only ASCII letters and whitespace, split on
// whitespace.
//
// Scan (index i over all tokens, left to right):
//   negation marker  -> negated = true; skip the reset check below
//   positive word    -> negated ? neg += 1 : pos += 1; negated = false
//   negative word    -> negated ? pos += 1 : neg += 1; negated = false
//   anything else    -> if i > 0 && i % 3 == 0 { negated = false }
//
// The reset uses the absolute token index, not the distance from the marker.
//
//   score = (pos - neg) / (pos + neg), or 0 with no hits
//   label = positive if score > 0.2, negative if score < -0.2, else neutral
// =============================================================================

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{trace, warn};

use crate::sentiment::lexicon::{Lexicon, TokenClass, CRYPTO_LEXICON};
use crate::types::{SentimentLabel, SentimentResult};

/// Score above which text is labelled positive (and below the negation of
/// which it is labelled negative).
pub const LABEL_THRESHOLD: f64 = 0.2;

/// Negation is cleared on unrecognised tokens whose index is a multiple of this.
const NEGATION_RESET_INTERVAL: usize = 3;

#[derive(Debug, Error, PartialEq)]
pub enum SentimentError {
    #[error("expected text, got {0}")]
    NotText(&'static str),
}

/// A news headline with its summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Lowercase, strip everything but ASCII letters and whitespace, tokenize.
pub fn preprocess(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphabetic() || c.is_whitespace())
        .collect();
    cleaned.split_whitespace().map(str::to_owned).collect()
}

/// Lexicon scorer. Cheap to construct; the default borrows the process-wide
/// crypto lexicon.
#[derive(Debug, Clone, Copy)]
pub struct SentimentAnalyzer<'a> {
    lexicon: &'a Lexicon,
}

impl Default for SentimentAnalyzer<'static> {
    fn default() -> Self {
        Self {
            lexicon: &CRYPTO_LEXICON,
        }
    }
}

impl<'a> SentimentAnalyzer<'a> {
    pub fn with_lexicon(lexicon: &'a Lexicon) -> Self {
        Self { lexicon }
    }

    pub fn analyze(&self, text: &str) -> SentimentResult {
        let tokens = preprocess(text);

        let mut pos_count: u32 = 0;
        let mut neg_count: u32 = 0;
        let mut negation = false;

        for (i, token) in tokens.iter().enumerate() {
            match self.lexicon.classify(token) {
                TokenClass::Negation => {
                    negation = true;
                    continue;
                }
                TokenClass::Positive => {
                    if negation {
                        neg_count += 1;
                    } else {
                        pos_count += 1;
                    }
                    negation = false;
                }
                TokenClass::Negative => {
                    if negation {
                        pos_count += 1;
                    } else {
                        neg_count += 1;
                    }
                    negation = false;
                }
                TokenClass::Other => {
                    if i > 0 && i % NEGATION_RESET_INTERVAL == 0 {
                        negation = false;
                    }
                }
            }
        }

        let total = pos_count + neg_count;
        let score = if total == 0 {
            0.0
        } else {
            (f64::from(pos_count) - f64::from(neg_count)) / f64::from(total)
        };

        trace!(tokens = tokens.len(), pos_count, neg_count, score, "sentiment scored");

        SentimentResult {
            score,
            label: label_for(score),
        }
    }

    /// Join news items as `title description` separated by spaces and score
    /// the result. An empty list scores as empty text.
    pub fn analyze_news(&self, items: &[NewsItem]) -> SentimentResult {
        self.analyze(&combine_news(items))
    }

    /// Score an arbitrary JSON value; only strings are text.
    pub fn try_analyze_value(&self, value: &Value) -> Result<SentimentResult, SentimentError> {
        match value {
            Value::String(text) => Ok(self.analyze(text)),
            Value::Null => Err(SentimentError::NotText("null")),
            Value::Bool(_) => Err(SentimentError::NotText("boolean")),
            Value::Number(_) => Err(SentimentError::NotText("number")),
            Value::Array(_) => Err(SentimentError::NotText("array")),
            Value::Object(_) => Err(SentimentError::NotText("object")),
        }
    }

    /// Like [`try_analyze_value`](Self::try_analyze_value), but non-text input
    /// scores neutral.
    pub fn analyze_value(&self, value: &Value) -> SentimentResult {
        self.try_analyze_value(value).unwrap_or_else(|e| {
            warn!(error = %e, "sentiment input rejected");
            SentimentResult::NEUTRAL
        })
    }
}

pub fn label_for(score: f64) -> SentimentLabel {
    if score > LABEL_THRESHOLD {
        SentimentLabel::Positive
    } else if score < -LABEL_THRESHOLD {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    }
}

pub fn combine_news(items: &[NewsItem]) -> String {
    items
        .iter()
        .map(|item| format!("{} {}", item.title, item.description))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Score `text` against the crypto lexicon.
pub fn analyze_sentiment(text: &str) -> SentimentResult {
    SentimentAnalyzer::default().analyze(text)
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn analyze(text: &str) -> SentimentResult {
        analyze_sentiment(text)
    }

    #[test]
    fn empty_text_is_neutral() {
        assert_eq!(analyze(""), SentimentResult::NEUTRAL);
        assert_eq!(analyze("   \n\t "), SentimentResult::NEUTRAL);
    }

    #[test]
    fn all_positive_words() {
        let r = analyze("bullish rally surge");
        assert_eq!(r.score, 1.0);
        assert_eq!(r.label, SentimentLabel::Positive);
    }

    #[test]
    fn negation_flips_positive_word() {
        let r = analyze("not bullish");
        assert_eq!(r.score, -1.0);
        assert_eq!(r.label, SentimentLabel::Negative);
    }

    #[test]
    fn negation_flips_negative_word() {
        let r = analyze("no crash");
        assert_eq!(r.score, 1.0);
        assert_eq!(r.label, SentimentLabel::Positive);
    }

    #[test]
    fn negation_applies_to_one_word_only() {
        // "not" flips "bullish", then clears; "rally" counts positive.
        let r = analyze("not bullish rally");
        assert_eq!(r.score, 0.0);
        assert_eq!(r.label, SentimentLabel::Neutral);
    }

    #[test]
    fn preprocessing_strips_punctuation_digits_and_case() {
        assert_eq!(
            preprocess("BTC's 10% SURGE!! Up-trend, café"),
            vec!["btcs", "surge", "uptrend", "caf"]
        );
        let r = analyze("BULLISH!!! Rally...");
        assert_eq!(r.score, 1.0);
    }

    #[test]
    fn negation_reset_uses_absolute_index() {
        // tokens: not(0) the(1) market(2) is(3) bullish(4)
        // index 3 is a filler at a multiple of 3 => negation cleared.
        let r = analyze("not the market is bullish");
        assert_eq!(r.score, 1.0);

        // tokens: the(0) not(1) market(2) bullish(3)
        // no filler at index 3 before "bullish" => still negated.
        let r = analyze("the not market bullish");
        assert_eq!(r.score, -1.0);

        // tokens: a(0) b(1) not(2) c(3) bullish(4)
        // filler at index 3 resets right after the marker.
        let r = analyze("a b not c bullish");
        assert_eq!(r.score, 1.0);

        // tokens: not(0) a(1) b(2) bullish(3)
        // only fillers at 1 and 2 => negation carries across two words.
        let r = analyze("not a b bullish");
        assert_eq!(r.score, -1.0);
    }

    #[test]
    fn negation_marker_at_reset_index_is_not_cleared() {
        // tokens: a(0) b(1) c(2) not(3) bullish(4)
        let r = analyze("a b c not bullish");
        assert_eq!(r.score, -1.0);
    }

    #[test]
    fn consecutive_negations_do_not_cancel() {
        let r = analyze("not never bullish");
        assert_eq!(r.score, -1.0);
    }

    #[test]
    fn mixed_text_scores_ratio() {
        // pos: surge, adoption, strong; neg: risk
        let r = analyze("Surge in adoption despite regulatory risk, strong demand");
        assert!((r.score - 0.5).abs() < 1e-12);
        assert_eq!(r.label, SentimentLabel::Positive);
    }

    #[test]
    fn label_thresholds_are_strict() {
        assert_eq!(label_for(0.2), SentimentLabel::Neutral);
        assert_eq!(label_for(0.2001), SentimentLabel::Positive);
        assert_eq!(label_for(-0.2), SentimentLabel::Neutral);
        assert_eq!(label_for(-0.2001), SentimentLabel::Negative);
    }

    #[test]
    fn swapping_polarity_negates_score() {
        let text = "bullish surge but fear of a crash and not strong";
        let swapped = "bearish crash but gain of a surge and not weak";
        let a = analyze(text).score;
        let b = analyze(swapped).score;
        assert!((a + 0.2).abs() < 1e-12);
        assert!((a + b).abs() < 1e-12, "{a} vs {b}");
    }

    #[test]
    fn score_is_bounded() {
        let samples = [
            "crash crash crash",
            "not not not",
            "rally rally drop",
            "hardly a problem, never a loss, barely any risk",
        ];
        for s in samples {
            let r = analyze(s);
            assert!((-1.0..=1.0).contains(&r.score), "{s}: {}", r.score);
        }
    }

    #[test]
    fn news_items_are_joined() {
        let items = vec![
            NewsItem {
                title: "ETF launch".into(),
                description: "strong inflows".into(),
            },
            NewsItem {
                title: "Exchange hack".into(),
                description: String::new(),
            },
        ];
        assert_eq!(combine_news(&items), "ETF launch strong inflows Exchange hack ");
        let r = SentimentAnalyzer::default().analyze_news(&items);
        // pos: launch, strong; neg: hack
        assert!((r.score - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(r.label, SentimentLabel::Positive);
        assert_eq!(
            SentimentAnalyzer::default().analyze_news(&[]),
            SentimentResult::NEUTRAL
        );
    }

    #[test]
    fn non_text_values_score_neutral() {
        let analyzer = SentimentAnalyzer::default();
        for value in [json!(null), json!(42), json!(["bullish"]), json!({"t": 1}), json!(true)] {
            assert!(analyzer.try_analyze_value(&value).is_err());
            assert_eq!(analyzer.analyze_value(&value), SentimentResult::NEUTRAL);
        }
        assert_eq!(
            analyzer.try_analyze_value(&json!(42)),
            Err(SentimentError::NotText("number"))
        );
        assert_eq!(analyzer.analyze_value(&json!("bullish")).score, 1.0);
    }

    #[test]
    fn custom_lexicon() {
        let lex = Lexicon::new(&["moon"], &["rekt"], &["not"]);
        let analyzer = SentimentAnalyzer::with_lexicon(&lex);
        assert_eq!(analyzer.analyze("moon moon rekt bullish").score, 1.0 / 3.0);
    }
}
