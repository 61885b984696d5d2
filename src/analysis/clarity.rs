//! Clarity scoring from sentence-structure statistics.

use super::text::{average_words_per_sentence, sentences, word_count};
use crate::config::ScoringTuning;

#[derive(Debug, Clone, PartialEq)]
pub struct ClarityReport {
    pub score: u32,
    pub feedback: String,
}

/// Score sentence structure: very short sentences read as choppy, very long
/// ones as hard to follow, and a high share of outliers costs a flat penalty.
/// The result is clamped to [0, 100] and never divides by zero.
pub fn score_clarity(transcript: &str, tuning: &ScoringTuning) -> ClarityReport {
    let avg = average_words_per_sentence(transcript);
    let sentences = sentences(transcript);

    let short = sentences
        .iter()
        .filter(|s| word_count(s) < tuning.short_sentence_words)
        .count();
    let long = sentences
        .iter()
        .filter(|s| word_count(s) > tuning.long_sentence_words)
        .count();
    let problem_share = (short + long) as f64 / sentences.len().max(1) as f64;

    let (mut score, mut feedback): (i32, String) = if avg < tuning.choppy_avg_words {
        (60, "Your responses use very short sentences, which may make your answer seem choppy or incomplete. Try connecting ideas with more detail.".to_string())
    } else if avg > tuning.rambling_avg_words {
        (65, "Your responses contain several long sentences that may be difficult to follow. Consider breaking them into shorter, clearer statements.".to_string())
    } else if avg >= tuning.ideal_avg_words_min && avg <= tuning.ideal_avg_words_max {
        (90, "Your sentence structure is excellent, with a good mix of lengths that makes your response easy to follow.".to_string())
    } else {
        (80, "Your sentence structure is generally good. Your ideas flow well from one to the next.".to_string())
    };

    if problem_share > tuning.problem_sentence_share {
        score -= tuning.problem_sentence_penalty;
        feedback.push_str(
            " There's a significant variation in your sentence lengths, which can affect clarity.",
        );
    }

    ClarityReport {
        score: score.clamp(0, 100) as u32,
        feedback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tuning() -> ScoringTuning {
        ScoringTuning::default()
    }

    #[test]
    fn empty_transcript_scores_baseline() {
        let report = score_clarity("", &tuning());
        assert_eq!(report.score, 60);
    }

    #[test]
    fn ideal_sentence_length_scores_ninety() {
        // Each sentence has 14 words, inside the 12-18 band.
        let sentence = "one two three four five six seven eight nine ten eleven twelve thirteen fourteen.";
        let transcript = [sentence; 3].join(" ");
        let report = score_clarity(&transcript, &tuning());
        assert_eq!(report.score, 90);
    }

    #[test]
    fn rambling_sentences_score_sixty_five() {
        let long_sentence = ["word"; 30].join(" ") + ".";
        let report = score_clarity(&long_sentence, &tuning());
        // avg > 20 gives 65, and 100% outliers costs the penalty.
        assert_eq!(report.score, 50);
    }

    #[test]
    fn outlier_penalty_is_monotonic() {
        // Both transcripts average 14 words per sentence; the second swaps a
        // balanced pair for one very short and one very long sentence.
        let fourteen = ["w"; 14].join(" ") + ".";
        let short = ["w"; 3].join(" ") + ".";
        let long = ["w"; 26].join(" ") + "." + " " + &["w"; 13].join(" ") + ".";

        let balanced = [fourteen.as_str(); 4].join(" ");
        let skewed = format!("{fourteen} {short} {long}");

        let balanced_report = score_clarity(&balanced, &tuning());
        let skewed_report = score_clarity(&skewed, &tuning());
        assert!(skewed_report.score <= balanced_report.score);
    }

    #[test]
    fn score_stays_in_range() {
        let mut tuning = tuning();
        tuning.problem_sentence_penalty = 100;
        let report = score_clarity("Short one. Short two.", &tuning);
        assert!(report.score <= 100);
    }
}
