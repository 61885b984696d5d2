//! Transcript analysis pipeline.
//!
//! A single pass over the finalized transcript produces pace, clarity,
//! filler, relevance, and sentiment scores plus generated feedback. The
//! pipeline is pure: one input, one `AnalysisResult`, no shared state. A
//! remote semantic service can enrich the relevance and feedback sections;
//! when it fails, the local heuristics answer instead and the failure is
//! only logged.

mod clarity;
mod feedback;
mod filler;
mod pace;
mod relevance;
mod sentiment;
mod text;
#[cfg(test)]
mod tests;

pub use clarity::ClarityReport;
pub use relevance::{candidate_vocabulary, question_keywords, RelevanceReport};
pub use sentiment::SentimentReport;

use crate::config::ScoringTuning;
use crate::log_debug;
use crate::semantic::{SemanticAnalyzer, SemanticInsights};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Delivery metrics derived from the transcript (and measured duration when
/// the recorder provided one).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioAnalysis {
    pub pace_score: u32,
    pub pace_feedback: String,
    pub volume_score: u32,
    pub volume_feedback: String,
    pub filler_words: BTreeMap<String, usize>,
    pub filler_words_count: usize,
    /// Seconds; estimated from word count unless the recorder measured it.
    pub duration: f64,
    pub wpm: u32,
}

/// Content metrics: what was said rather than how.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentAnalysis {
    pub overall_score: u32,
    pub relevance_score: u32,
    pub relevance_feedback: String,
    pub clarity_score: u32,
    pub clarity_feedback: String,
    pub strengths: Vec<String>,
    pub improvement_areas: Vec<String>,
    pub keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub sentiment: SentimentReport,
    pub key_phrases: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackReport {
    pub general_feedback: String,
    pub suggestions: Vec<String>,
    pub sample_answers: Vec<String>,
}

/// Complete analysis of one answer. Computed once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub transcript: String,
    pub audio_analysis: AudioAnalysis,
    pub content_analysis: ContentAnalysis,
    pub feedback: FeedbackReport,
}

/// Volume cannot be measured from text alone; report a fixed neutral score.
const DEFAULT_VOLUME_SCORE: u32 = 75;

pub struct Analyzer<'a> {
    tuning: &'a ScoringTuning,
    semantic: Option<&'a dyn SemanticAnalyzer>,
}

impl<'a> Analyzer<'a> {
    pub fn new(tuning: &'a ScoringTuning) -> Self {
        Self {
            tuning,
            semantic: None,
        }
    }

    /// Attach a semantic service; the analyzer still works without one.
    pub fn with_semantic(mut self, semantic: &'a dyn SemanticAnalyzer) -> Self {
        self.semantic = Some(semantic);
        self
    }

    /// Analyze with a duration estimated from word count at the tuned
    /// speaking rate. Empty transcripts score deterministic baselines.
    pub fn analyze(&self, transcript: &str, question: &str) -> AnalysisResult {
        let words = text::word_count(transcript);
        let duration = pace::estimated_duration_secs(words, self.tuning);
        self.run(transcript, question, duration)
    }

    /// Analyze with the duration the recorder actually measured.
    pub fn analyze_with_duration(
        &self,
        transcript: &str,
        question: &str,
        duration_secs: f64,
    ) -> AnalysisResult {
        self.run(transcript, question, duration_secs.max(0.0))
    }

    fn run(&self, transcript: &str, question: &str, duration_secs: f64) -> AnalysisResult {
        let words = text::word_count(transcript);
        let filler_words = filler::count_filler_words(transcript);
        let filler_count = filler::total_fillers(&filler_words);
        let clarity = clarity::score_clarity(transcript, self.tuning);
        let pace_score = pace::pace_score(words, duration_secs, self.tuning);

        let insights = self.fetch_insights(transcript, question);
        let relevance = match &insights {
            Some(insights) => semantic_relevance(insights),
            None => relevance::local_relevance(transcript, question, self.tuning),
        };

        let (mut strengths, mut improvements) =
            feedback::content_feedback(transcript, &relevance, self.tuning);
        let mut suggestions =
            feedback::suggestions(transcript, &relevance, &clarity, filler_count, self.tuning);
        if let Some(insights) = &insights {
            // The remote service writes richer text; empty lists keep the
            // local output so feedback never vanishes.
            if !insights.strengths.is_empty() {
                strengths = insights.strengths.clone();
            }
            if !insights.improvement_areas.is_empty() {
                improvements = insights.improvement_areas.clone();
            }
            if !insights.suggestions.is_empty() {
                suggestions = insights.suggestions.clone();
            }
        }

        let sentiment = sentiment::sentiment_report(sentiment::sentiment_ratio(transcript));
        let general = feedback::general_feedback(
            relevance.score,
            clarity.score,
            pace_score,
            filler_count,
            self.tuning,
        );

        AnalysisResult {
            transcript: transcript.to_string(),
            audio_analysis: AudioAnalysis {
                pace_score,
                pace_feedback: pace::pace_feedback(pace_score, words),
                volume_score: DEFAULT_VOLUME_SCORE,
                volume_feedback: "Voice volume analysis is based on your recorded audio. Focus on speaking clearly and consistently.".to_string(),
                filler_words,
                filler_words_count: filler_count,
                duration: duration_secs,
                wpm: pace::words_per_minute(words, duration_secs),
            },
            content_analysis: ContentAnalysis {
                overall_score: ((relevance.score + clarity.score) as f64 / 2.0).round() as u32,
                relevance_score: relevance.score,
                relevance_feedback: relevance.feedback,
                clarity_score: clarity.score,
                clarity_feedback: clarity.feedback,
                strengths,
                improvement_areas: improvements,
                keywords: relevance.present,
                missing_keywords: relevance.missing,
                sentiment,
                key_phrases: feedback::key_phrases(transcript, self.tuning),
            },
            feedback: FeedbackReport {
                general_feedback: general,
                suggestions,
                sample_answers: feedback::sample_answers(question),
            },
        }
    }

    fn fetch_insights(&self, transcript: &str, question: &str) -> Option<SemanticInsights> {
        let semantic = self.semantic?;
        match semantic.analyze(transcript, question) {
            Ok(insights) => Some(insights),
            Err(err) => {
                tracing::warn!(error = %format!("{err:#}"), "semantic service unavailable, using local heuristics");
                log_debug(&format!(
                    "semantic service unavailable ({err:#}); using local heuristics"
                ));
                None
            }
        }
    }
}

fn semantic_relevance(insights: &SemanticInsights) -> RelevanceReport {
    let relevant = insights.relevant_keywords.len();
    let missing = insights.missing_keywords.len();
    let score =
        ((relevant as f64 / (relevant + missing).max(1) as f64) * 100.0).round() as u32;
    let score = score.min(100);
    RelevanceReport {
        score,
        feedback: relevance::semantic_relevance_feedback(score),
        present: insights.relevant_keywords.clone(),
        missing: insights.missing_keywords.clone(),
    }
}
