//! Speaking-pace scoring from word count and answer duration.

use crate::config::ScoringTuning;

/// Duration guessed from word count when the recorder measured nothing,
/// assuming the tuned speaking rate (150 wpm by default).
pub fn estimated_duration_secs(word_count: usize, tuning: &ScoringTuning) -> f64 {
    word_count as f64 / tuning.pace_wpm * 60.0
}

/// Words per minute, rounded; zero when the duration is degenerate.
pub fn words_per_minute(word_count: usize, duration_secs: f64) -> u32 {
    if duration_secs <= 0.0 {
        return 0;
    }
    (word_count as f64 / (duration_secs / 60.0)).round() as u32
}

/// Map words-per-second onto a 0-100 score.
///
/// The ideal band scores 90; speaking outside it scales linearly toward the
/// 60-80 range rather than cliff-dropping, so small pacing misses read as
/// "good with room to improve".
pub fn pace_score(word_count: usize, duration_secs: f64, tuning: &ScoringTuning) -> u32 {
    let wps = word_count as f64 / duration_secs.max(1.0);

    if wps < tuning.slow_wps {
        60 + ((wps / tuning.slow_wps) * 20.0).round() as u32
    } else if wps > tuning.fast_wps {
        80 - (((wps - tuning.fast_wps) * 10.0).round() as u32).min(20)
    } else if wps >= tuning.ideal_wps_min && wps <= tuning.ideal_wps_max {
        90
    } else {
        80
    }
}

pub fn pace_feedback(score: u32, word_count: usize) -> String {
    if score >= 85 {
        "Your speaking pace was excellent - neither too fast nor too slow, making it easy for the interviewer to follow your response.".to_string()
    } else if score >= 70 {
        "Your speaking pace was generally good, though there were moments where you could adjust slightly for optimal delivery.".to_string()
    } else if word_count < 100 {
        "Your response was quite brief. Consider elaborating more to fully address the question.".to_string()
    } else {
        "Try to maintain a more consistent pace throughout your response - some portions were either too quick or too slow.".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tuning() -> ScoringTuning {
        ScoringTuning::default()
    }

    #[test]
    fn zero_words_score_baseline() {
        assert_eq!(pace_score(0, 0.0, &tuning()), 60);
    }

    #[test]
    fn ideal_band_scores_ninety() {
        // 150 words over 60 seconds = 2.5 wps.
        assert_eq!(pace_score(150, 60.0, &tuning()), 90);
    }

    #[test]
    fn slow_pace_scales_from_sixty() {
        // 0.75 wps is half of the slow threshold.
        let score = pace_score(45, 60.0, &tuning());
        assert_eq!(score, 70);
    }

    #[test]
    fn fast_pace_loses_at_most_twenty() {
        // 10 wps is absurdly fast; the deduction saturates.
        assert_eq!(pace_score(600, 60.0, &tuning()), 60);
    }

    #[test]
    fn near_band_pace_scores_eighty() {
        // 1.8 wps: above slow threshold, below the ideal band.
        assert_eq!(pace_score(108, 60.0, &tuning()), 80);
    }

    #[test]
    fn wpm_guards_zero_duration() {
        assert_eq!(words_per_minute(100, 0.0), 0);
        assert_eq!(words_per_minute(150, 60.0), 150);
    }

    #[test]
    fn estimated_duration_tracks_word_count() {
        let secs = estimated_duration_secs(150, &tuning());
        assert!((secs - 60.0).abs() < f64::EPSILON);
        assert_eq!(estimated_duration_secs(0, &tuning()), 0.0);
    }

    #[test]
    fn brief_answer_feedback_mentions_brevity() {
        let feedback = pace_feedback(60, 20);
        assert!(feedback.contains("brief"));
    }
}
