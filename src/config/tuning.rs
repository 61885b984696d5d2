//! Scoring thresholds for the transcript analyzer.
//!
//! These are hand-tuned constants, not empirically derived. They are grouped
//! here so a practice coach can adjust them through `--tuning-file` without
//! touching the scoring code.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Tunable thresholds for pace, clarity, and feedback generation.
///
/// Every field has a default matching the shipped behavior; a YAML tuning
/// file may override any subset.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoringTuning {
    /// Assumed speaking rate used to estimate duration from word count.
    pub pace_wpm: f64,
    /// Below this words-per-second the answer reads as too slow.
    pub slow_wps: f64,
    /// Above this words-per-second the answer reads as rushed.
    pub fast_wps: f64,
    pub ideal_wps_min: f64,
    pub ideal_wps_max: f64,

    /// Sentences shorter than this count as choppy outliers.
    pub short_sentence_words: usize,
    /// Sentences longer than this count as run-on outliers.
    pub long_sentence_words: usize,
    pub choppy_avg_words: f64,
    pub rambling_avg_words: f64,
    pub ideal_avg_words_min: f64,
    pub ideal_avg_words_max: f64,
    /// Share of outlier sentences that triggers the clarity penalty.
    pub problem_sentence_share: f64,
    pub problem_sentence_penalty: i32,

    /// Filler count above which feedback calls it out.
    pub heavy_filler_count: usize,
    pub detailed_word_count: usize,
    pub brief_word_count: usize,
    pub strong_keyword_count: usize,
    pub weak_keyword_count: usize,

    pub max_strengths: usize,
    pub max_improvement_areas: usize,
    pub max_suggestions: usize,
    pub max_missing_keywords: usize,
    pub max_key_phrases: usize,
}

impl Default for ScoringTuning {
    fn default() -> Self {
        Self {
            pace_wpm: 150.0,
            slow_wps: 1.5,
            fast_wps: 3.5,
            ideal_wps_min: 2.0,
            ideal_wps_max: 3.0,
            short_sentence_words: 5,
            long_sentence_words: 25,
            choppy_avg_words: 8.0,
            rambling_avg_words: 20.0,
            ideal_avg_words_min: 12.0,
            ideal_avg_words_max: 18.0,
            problem_sentence_share: 0.3,
            problem_sentence_penalty: 15,
            heavy_filler_count: 10,
            detailed_word_count: 200,
            brief_word_count: 50,
            strong_keyword_count: 6,
            weak_keyword_count: 3,
            max_strengths: 4,
            max_improvement_areas: 4,
            max_suggestions: 5,
            max_missing_keywords: 5,
            max_key_phrases: 10,
        }
    }
}

impl ScoringTuning {
    /// Load thresholds from a YAML file and validate them.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read tuning file {}", path.display()))?;
        let tuning: Self = serde_yaml::from_str(&raw)
            .with_context(|| format!("invalid tuning file {}", path.display()))?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<()> {
        if self.pace_wpm <= 0.0 || self.pace_wpm > 400.0 {
            bail!("pace_wpm must be in (0, 400], got {}", self.pace_wpm);
        }
        if self.slow_wps <= 0.0 || self.slow_wps >= self.fast_wps {
            bail!(
                "slow_wps ({}) must be positive and below fast_wps ({})",
                self.slow_wps,
                self.fast_wps
            );
        }
        if self.ideal_wps_min >= self.ideal_wps_max {
            bail!("ideal words-per-second band is empty");
        }
        if self.ideal_wps_min < self.slow_wps || self.ideal_wps_max > self.fast_wps {
            bail!("ideal words-per-second band must sit inside the slow/fast band");
        }
        if self.short_sentence_words >= self.long_sentence_words {
            bail!("short_sentence_words must be below long_sentence_words");
        }
        if self.choppy_avg_words >= self.rambling_avg_words {
            bail!("choppy_avg_words must be below rambling_avg_words");
        }
        if self.ideal_avg_words_min >= self.ideal_avg_words_max {
            bail!("ideal average-sentence-length band is empty");
        }
        if !(0.0..=1.0).contains(&self.problem_sentence_share) {
            bail!(
                "problem_sentence_share must be in [0, 1], got {}",
                self.problem_sentence_share
            );
        }
        if !(0..=100).contains(&self.problem_sentence_penalty) {
            bail!(
                "problem_sentence_penalty must be in [0, 100], got {}",
                self.problem_sentence_penalty
            );
        }
        for (name, value) in [
            ("max_strengths", self.max_strengths),
            ("max_improvement_areas", self.max_improvement_areas),
            ("max_suggestions", self.max_suggestions),
            ("max_missing_keywords", self.max_missing_keywords),
            ("max_key_phrases", self.max_key_phrases),
        ] {
            if value == 0 || value > 20 {
                bail!("{name} must be in [1, 20], got {value}");
            }
        }
        Ok(())
    }
}
