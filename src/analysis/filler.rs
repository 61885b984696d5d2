//! Filler-word counting.

use super::text::normalized;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Disfluency tokens counted for feedback. Multi-word entries match as whole
/// phrases, so "likely" never counts as "like".
const FILLER_WORDS: &[&str] = &[
    "um",
    "uh",
    "like",
    "you know",
    "sort of",
    "kind of",
    "basically",
    "actually",
    "literally",
    "i mean",
];

fn filler_patterns() -> &'static Vec<(&'static str, Regex)> {
    static PATTERNS: OnceLock<Vec<(&'static str, Regex)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        FILLER_WORDS
            .iter()
            .map(|word| {
                let pattern = format!(r"\b{}\b", regex::escape(word));
                let regex = Regex::new(&pattern).expect("filler pattern should compile");
                (*word, regex)
            })
            .collect()
    })
}

/// Case-insensitive whole-word counts for each filler that appears at least
/// once. BTreeMap keeps the report order stable.
pub fn count_filler_words(transcript: &str) -> BTreeMap<String, usize> {
    let text = normalized(transcript);
    let mut counts = BTreeMap::new();
    for (word, regex) in filler_patterns() {
        let hits = regex.find_iter(&text).count();
        if hits > 0 {
            counts.insert((*word).to_string(), hits);
        }
    }
    counts
}

pub fn total_fillers(counts: &BTreeMap<String, usize>) -> usize {
    counts.values().sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_repeated_fillers() {
        let counts =
            count_filler_words("Um, I think, um, we should, uh, do it. Um yes, uh indeed.");
        assert_eq!(counts.get("um"), Some(&3));
        assert_eq!(counts.get("uh"), Some(&2));
        assert_eq!(total_fillers(&counts), 5);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let counts = count_filler_words("UM... Actually, BASICALLY fine.");
        assert_eq!(counts.get("um"), Some(&1));
        assert_eq!(counts.get("actually"), Some(&1));
        assert_eq!(counts.get("basically"), Some(&1));
    }

    #[test]
    fn whole_words_only() {
        let counts = count_filler_words("The umbrella is likely fine.");
        assert!(counts.is_empty());
    }

    #[test]
    fn phrases_match_across_spacing() {
        let counts = count_filler_words("you  know, it was, you know, fine");
        assert_eq!(counts.get("you know"), Some(&2));
    }

    #[test]
    fn empty_transcript_has_no_fillers() {
        let counts = count_filler_words("");
        assert!(counts.is_empty());
        assert_eq!(total_fillers(&counts), 0);
    }
}
