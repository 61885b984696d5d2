use super::{Analyzer, AnalysisResult};
use crate::config::ScoringTuning;
use crate::semantic::{SemanticAnalyzer, SemanticInsights};
use anyhow::{anyhow, Result};

struct FailingSemantic;

impl SemanticAnalyzer for FailingSemantic {
    fn analyze(&self, _transcript: &str, _question: &str) -> Result<SemanticInsights> {
        Err(anyhow!("connection refused"))
    }
}

struct ScriptedSemantic(SemanticInsights);

impl SemanticAnalyzer for ScriptedSemantic {
    fn analyze(&self, _transcript: &str, _question: &str) -> Result<SemanticInsights> {
        Ok(self.0.clone())
    }
}

fn analyze(transcript: &str, question: &str) -> AnalysisResult {
    let tuning = ScoringTuning::default();
    Analyzer::new(&tuning).analyze(transcript, question)
}

const GOOD_ANSWER: &str = "In my previous role I led a team through a difficult \
migration project. We faced a major challenge when the legacy system failed \
during testing. I organized the team, we identified the root cause, and we \
delivered the migration two weeks early. The result was a smoother deployment \
and the experience taught me how to lead under pressure.";

#[test]
fn empty_transcript_scores_deterministic_baselines() {
    let result = analyze("", "");
    assert_eq!(result.audio_analysis.pace_score, 60);
    assert_eq!(result.audio_analysis.wpm, 0);
    assert_eq!(result.audio_analysis.filler_words_count, 0);
    assert!(result.audio_analysis.filler_words.is_empty());
    assert_eq!(result.content_analysis.sentiment.sentiment, "neutral");
    assert!(!result.feedback.suggestions.is_empty());
    assert!(!result.feedback.sample_answers.is_empty());
}

#[test]
fn scores_stay_within_bounds() {
    for transcript in ["", "um", GOOD_ANSWER, "short. a. b. c. d. e. f."] {
        let result = analyze(transcript, "Tell me about a challenge you faced.");
        assert!(result.audio_analysis.pace_score <= 100);
        assert!(result.content_analysis.clarity_score <= 100);
        assert!(result.content_analysis.relevance_score <= 100);
        assert!(result.content_analysis.overall_score <= 100);
    }
}

#[test]
fn overall_is_mean_of_relevance_and_clarity() {
    let result = analyze(GOOD_ANSWER, "Tell me about a challenge you faced.");
    let expected = ((result.content_analysis.relevance_score
        + result.content_analysis.clarity_score) as f64
        / 2.0)
        .round() as u32;
    assert_eq!(result.content_analysis.overall_score, expected);
}

#[test]
fn measured_duration_drives_pace() {
    let tuning = ScoringTuning::default();
    let analyzer = Analyzer::new(&tuning);
    // 20 words over 8 seconds = 2.5 wps, inside the ideal band.
    let twenty = "word ".repeat(20);
    let result = analyzer.analyze_with_duration(&twenty, "", 8.0);
    assert_eq!(result.audio_analysis.pace_score, 90);
    assert_eq!(result.audio_analysis.wpm, 150);
    assert!((result.audio_analysis.duration - 8.0).abs() < f64::EPSILON);
}

#[test]
fn filler_counts_flow_into_audio_analysis() {
    let result = analyze(
        "Um, I think, um, we basically shipped it, you know.",
        "",
    );
    assert_eq!(result.audio_analysis.filler_words["um"], 2);
    assert_eq!(result.audio_analysis.filler_words["basically"], 1);
    assert_eq!(result.audio_analysis.filler_words["you know"], 1);
    assert_eq!(result.audio_analysis.filler_words_count, 4);
}

#[test]
fn semantic_failure_falls_back_to_local_heuristics() {
    crate::logging::set_logging_for_tests(false, false);
    let tuning = ScoringTuning::default();
    let failing = FailingSemantic;
    let analyzer = Analyzer::new(&tuning).with_semantic(&failing);
    let with_remote = analyzer.analyze(GOOD_ANSWER, "Tell me about a challenge you faced.");
    let local = Analyzer::new(&tuning).analyze(GOOD_ANSWER, "Tell me about a challenge you faced.");
    assert_eq!(with_remote, local);
    assert!(!with_remote.feedback.suggestions.is_empty());
}

#[test]
fn semantic_success_overrides_relevance_and_feedback() {
    let insights = SemanticInsights {
        relevant_keywords: vec!["migration".into(), "leadership".into(), "testing".into()],
        missing_keywords: vec!["metrics".into()],
        suggestions: vec!["Quantify the migration outcome.".into()],
        strengths: vec!["Clear ownership of the project.".into()],
        improvement_areas: vec!["Add a measurable result.".into()],
    };
    let tuning = ScoringTuning::default();
    let scripted = ScriptedSemantic(insights);
    let analyzer = Analyzer::new(&tuning).with_semantic(&scripted);
    let result = analyzer.analyze(GOOD_ANSWER, "Tell me about a challenge you faced.");

    // 3 of 4 keywords present: 75%.
    assert_eq!(result.content_analysis.relevance_score, 75);
    assert_eq!(
        result.content_analysis.keywords,
        vec!["migration", "leadership", "testing"]
    );
    assert_eq!(result.content_analysis.missing_keywords, vec!["metrics"]);
    assert_eq!(
        result.feedback.suggestions,
        vec!["Quantify the migration outcome."]
    );
    assert_eq!(
        result.content_analysis.strengths,
        vec!["Clear ownership of the project."]
    );
    assert_eq!(
        result.content_analysis.improvement_areas,
        vec!["Add a measurable result."]
    );
}

#[test]
fn semantic_empty_lists_keep_local_feedback() {
    let tuning = ScoringTuning::default();
    let scripted = ScriptedSemantic(SemanticInsights::default());
    let analyzer = Analyzer::new(&tuning).with_semantic(&scripted);
    let result = analyzer.analyze(GOOD_ANSWER, "Tell me about a challenge you faced.");
    assert!(!result.feedback.suggestions.is_empty());
    assert!(!result.content_analysis.improvement_areas.is_empty());
}

#[test]
fn result_serializes_to_json() {
    let result = analyze(GOOD_ANSWER, "What are your greatest strengths?");
    let json = serde_json::to_value(&result).unwrap();
    assert!(json["audio_analysis"]["pace_score"].is_u64());
    assert!(json["content_analysis"]["sentiment"]["confidence"].is_f64());
    assert!(json["feedback"]["sample_answers"].is_array());
}
