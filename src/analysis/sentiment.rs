//! Wordlist sentiment scoring.

use serde::{Deserialize, Serialize};

const POSITIVE_WORDS: &[&str] = &[
    "good",
    "great",
    "excellent",
    "amazing",
    "wonderful",
    "best",
    "positive",
    "success",
    "successful",
    "achieve",
    "achievement",
    "benefit",
    "beneficial",
    "better",
    "collaborative",
    "confident",
    "effective",
    "efficient",
    "enjoy",
    "exceptional",
    "excited",
    "fantastic",
    "favorable",
    "glad",
    "happy",
    "impressive",
    "improved",
    "outstanding",
    "perfect",
    "pleased",
    "pleasure",
    "productive",
    "progress",
    "satisfied",
    "smooth",
    "superior",
    "valuable",
    "delighted",
    "enthusiastic",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad",
    "poor",
    "terrible",
    "awful",
    "horrible",
    "worst",
    "negative",
    "fail",
    "failure",
    "problem",
    "difficult",
    "challenge",
    "hard",
    "trouble",
    "worry",
    "concerned",
    "concern",
    "unfortunately",
    "unsuccessful",
    "disappointing",
    "disappointed",
    "struggle",
    "painful",
    "severe",
    "serious",
    "unhappy",
    "unpleasant",
    "unsatisfactory",
];

/// Default confidence attached to the wordlist heuristic; it has no real
/// probability model behind it.
const HEURISTIC_CONFIDENCE: f64 = 0.7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentReport {
    pub sentiment: String,
    pub confidence: f64,
}

/// Positive-hit share in [0, 1]; exactly 0.5 when no sentiment words appear.
pub fn sentiment_ratio(text: &str) -> f64 {
    let lower = text.to_lowercase();
    let mut positive = 0usize;
    let mut negative = 0usize;
    for word in lower.split(|c: char| !c.is_alphanumeric()) {
        if word.is_empty() {
            continue;
        }
        if POSITIVE_WORDS.contains(&word) {
            positive += 1;
        }
        if NEGATIVE_WORDS.contains(&word) {
            negative += 1;
        }
    }
    let total = positive + negative;
    if total == 0 {
        return 0.5;
    }
    positive as f64 / total as f64
}

pub fn sentiment_report(ratio: f64) -> SentimentReport {
    let sentiment = if ratio > 0.6 {
        "positive"
    } else if ratio > 0.4 {
        "neutral"
    } else {
        "negative"
    };
    SentimentReport {
        sentiment: sentiment.to_string(),
        confidence: HEURISTIC_CONFIDENCE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_sentiment_words_is_exactly_neutral() {
        assert_eq!(sentiment_ratio("the cat sat on the mat"), 0.5);
        assert_eq!(sentiment_ratio(""), 0.5);
    }

    #[test]
    fn ratio_stays_in_unit_interval() {
        for text in [
            "great great great",
            "terrible awful bad",
            "good bad good bad",
            "success and failure in equal measure",
        ] {
            let ratio = sentiment_ratio(text);
            assert!((0.0..=1.0).contains(&ratio), "ratio {ratio} for {text:?}");
        }
    }

    #[test]
    fn positive_only_text_scores_one() {
        assert_eq!(sentiment_ratio("great excellent success"), 1.0);
    }

    #[test]
    fn mixed_text_scores_fraction() {
        // Two positive hits, one negative.
        let ratio = sentiment_ratio("a great and effective fix for a bad outage");
        assert!((ratio - 2.0 / 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn labels_follow_band_edges() {
        assert_eq!(sentiment_report(0.9).sentiment, "positive");
        assert_eq!(sentiment_report(0.5).sentiment, "neutral");
        assert_eq!(sentiment_report(0.2).sentiment, "negative");
        assert_eq!(sentiment_report(0.5).confidence, HEURISTIC_CONFIDENCE);
    }
}
