//! Tokenization helpers shared by the scoring passes.

/// Whitespace-delimited word count. Empty or blank input counts zero words.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Split on sentence terminators, dropping blank fragments.
pub fn sentences(text: &str) -> Vec<&str> {
    text.split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Mean sentence length in words; zero for empty input.
pub fn average_words_per_sentence(text: &str) -> f64 {
    let sentences = sentences(text);
    if sentences.is_empty() {
        return 0.0;
    }
    let total: usize = sentences.iter().map(|s| word_count(s)).sum();
    total as f64 / sentences.len() as f64
}

/// Lowercase with runs of whitespace collapsed to single spaces, the shape
/// the phrase-matching regexes expect.
pub fn normalized(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_has_zero_words() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   "), 0);
    }

    #[test]
    fn sentences_drop_blanks() {
        assert_eq!(
            sentences("One. Two!  Three?  "),
            vec!["One", "Two", "Three"]
        );
        assert!(sentences("").is_empty());
        assert!(sentences("...").is_empty());
    }

    #[test]
    fn average_handles_empty_input() {
        assert_eq!(average_words_per_sentence(""), 0.0);
    }

    #[test]
    fn average_counts_words_per_sentence() {
        let avg = average_words_per_sentence("one two three. four five.");
        assert!((avg - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn normalized_collapses_case_and_spacing() {
        assert_eq!(normalized("  Um,  YOU  Know "), "um, you know");
    }
}
