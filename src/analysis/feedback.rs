//! Rule-based feedback generation: strengths, improvement areas, suggestions,
//! and the overall summary paragraph.

use super::clarity::ClarityReport;
use super::relevance::RelevanceReport;
use super::text::{sentences, word_count};
use crate::config::ScoringTuning;
use regex::Regex;
use std::sync::OnceLock;

/// Markers that an answer cites a concrete example.
const EXAMPLE_MARKERS: &[&str] = &["example", "instance", "case", "project", "situation"];

/// Markers that an answer is explicitly structured.
const STRUCTURE_MARKERS: &[&str] = &[
    "first",
    "second",
    "finally",
    "additionally",
    "moreover",
    "conclusion",
];

fn quantified_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)\d+%|\d+ percent|increased by|\d+ years|\d+ months|\d+ projects")
            .expect("quantification pattern should compile")
    })
}

fn mentions_any(lower_transcript: &str, markers: &[&str]) -> bool {
    markers.iter().any(|m| lower_transcript.contains(m))
}

fn mentions_numbers(transcript: &str) -> bool {
    quantified_pattern().is_match(transcript)
}

/// Checklist-derived strengths and improvement areas, each capped by tuning.
pub fn content_feedback(
    transcript: &str,
    relevance: &RelevanceReport,
    tuning: &ScoringTuning,
) -> (Vec<String>, Vec<String>) {
    let lower = transcript.to_lowercase();
    let words = word_count(transcript);
    let mut strengths = Vec::new();
    let mut improvements = Vec::new();

    if words > tuning.detailed_word_count {
        strengths.push("Provided a detailed and comprehensive response".to_string());
    } else if words < tuning.brief_word_count {
        improvements.push(
            "Response is brief - consider expanding with more details and examples".to_string(),
        );
    }

    if relevance.present.len() > tuning.strong_keyword_count {
        strengths.push(
            "Used relevant terminology and keywords appropriate for the position".to_string(),
        );
    } else if relevance.present.len() < tuning.weak_keyword_count {
        improvements
            .push("Include more industry-specific and role-relevant terminology".to_string());
    }

    if mentions_any(&lower, EXAMPLE_MARKERS) {
        strengths.push("Provided specific examples to illustrate points".to_string());
    } else {
        improvements.push("Include specific examples to strengthen your response".to_string());
    }

    if mentions_any(&lower, STRUCTURE_MARKERS) {
        strengths.push("Structured response with clear organization of ideas".to_string());
    } else {
        improvements.push(
            "Consider structuring your response with a clearer beginning, middle, and end"
                .to_string(),
        );
    }

    if mentions_numbers(transcript) {
        strengths.push("Used specific metrics and numbers to quantify achievements".to_string());
    } else {
        improvements.push(
            "Try to quantify your achievements with specific metrics where possible".to_string(),
        );
    }

    if !relevance.missing.is_empty() {
        let topics = relevance
            .missing
            .iter()
            .take(3)
            .cloned()
            .collect::<Vec<_>>()
            .join(", ");
        improvements.push(format!("Consider addressing these relevant topics: {topics}"));
    }

    strengths.truncate(tuning.max_strengths);
    improvements.truncate(tuning.max_improvement_areas);
    (strengths, improvements)
}

/// Suggestions for the next attempt; always ends with at least the generic
/// practice tip, so the list is never empty.
pub fn suggestions(
    transcript: &str,
    relevance: &RelevanceReport,
    clarity: &ClarityReport,
    filler_count: usize,
    tuning: &ScoringTuning,
) -> Vec<String> {
    let lower = transcript.to_lowercase();
    let mut suggestions = Vec::new();

    if filler_count > tuning.heavy_filler_count {
        suggestions.push(
            "Reduce the use of filler words (like \"um,\" \"uh,\" \"you know\") to sound more confident and polished.".to_string(),
        );
    }
    if relevance.score < 70 {
        suggestions.push(
            "Focus more directly on addressing the specific question asked and include industry-relevant terminology.".to_string(),
        );
    }
    if clarity.score < 75 {
        suggestions.push(clarity.feedback.clone());
    }
    if !mentions_any(&lower, EXAMPLE_MARKERS) {
        suggestions.push(
            "Include specific examples from your experience to make your answers more compelling and credible.".to_string(),
        );
    }
    if !mentions_numbers(transcript) {
        suggestions.push(
            "Quantify your achievements with specific numbers or percentages to add credibility (e.g., 'improved efficiency by 20%').".to_string(),
        );
    }
    if !relevance.missing.is_empty() {
        let topics = relevance
            .missing
            .iter()
            .take(3)
            .cloned()
            .collect::<Vec<_>>()
            .join(", ");
        suggestions.push(format!(
            "Consider addressing these relevant topics in your answer: {topics}."
        ));
    }
    suggestions
        .push("Practice delivering your responses with a confident tone and natural pace.".to_string());

    suggestions.truncate(tuning.max_suggestions);
    suggestions
}

/// Summary paragraph combining the three main scores.
pub fn general_feedback(
    relevance_score: u32,
    clarity_score: u32,
    pace_score: u32,
    filler_count: usize,
    tuning: &ScoringTuning,
) -> String {
    let overall = (relevance_score + clarity_score + pace_score) as f64 / 3.0;

    let mut feedback = if overall >= 85.0 {
        "Overall, your interview response was excellent. You delivered a well-structured answer that directly addressed the question with relevant content and good delivery.".to_string()
    } else if overall >= 70.0 {
        "You provided a good interview response that addressed the question effectively. There are a few areas where you could enhance your delivery and content for an even stronger impression.".to_string()
    } else {
        "Your response addressed the basic elements of the question, but there's room for improvement in both content and delivery to make a stronger impression in an interview setting.".to_string()
    };

    if filler_count > tuning.heavy_filler_count {
        feedback.push_str(
            " Your response contained several filler words which can distract from your message.",
        );
    }
    if relevance_score < 70 {
        feedback.push_str(
            " Try to more directly address the specific question and include relevant terminology for the position.",
        );
    }
    feedback
}

/// Canned sample answers keyed on whether a question was asked at all.
pub fn sample_answers(question: &str) -> Vec<String> {
    if question.trim().is_empty() {
        return vec![
            "I've gained significant experience in team environments where effective communication was essential.".to_string(),
            "My approach to problem-solving involves analyzing requirements, considering alternatives, and implementing optimal solutions.".to_string(),
        ];
    }
    vec![
        "In my previous role, I successfully handled a similar situation by prioritizing tasks and communicating clearly with stakeholders.".to_string(),
        "I believe my experience with relevant technologies and methodologies would be valuable for addressing these challenges.".to_string(),
        "I approach these types of problems by breaking them down into manageable components and systematically addressing each part.".to_string(),
    ]
}

/// Adjacent word pairs pulled per sentence, deduplicated and capped.
pub fn key_phrases(transcript: &str, tuning: &ScoringTuning) -> Vec<String> {
    static PAIR: OnceLock<Regex> = OnceLock::new();
    let pair = PAIR.get_or_init(|| {
        Regex::new(r"\b[A-Za-z]+\s+[A-Za-z]+\b").expect("word-pair pattern should compile")
    });

    let mut phrases: Vec<String> = Vec::new();
    for sentence in sentences(transcript) {
        for hit in pair.find_iter(sentence) {
            let phrase = hit.as_str().to_string();
            if phrase.len() > 7 && !phrases.contains(&phrase) {
                phrases.push(phrase);
                if phrases.len() >= tuning.max_key_phrases {
                    return phrases;
                }
            }
        }
    }
    phrases
}
