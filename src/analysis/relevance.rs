//! Keyword-overlap relevance scoring, the local fallback when the remote
//! semantic service is unavailable.

use crate::config::ScoringTuning;

/// Interview vocabulary expected in most answers regardless of the question.
const GENERIC_VOCABULARY: &[&str] = &[
    "experience",
    "skills",
    "teamwork",
    "communication",
    "problem-solving",
    "leadership",
    "project",
    "development",
    "analysis",
    "design",
    "implementation",
    "testing",
    "deployment",
    "methodology",
    "process",
    "collaboration",
    "initiative",
    "results",
    "solution",
    "innovation",
];

/// Question words too generic to treat as topic keywords.
const QUESTION_STOPWORDS: &[&str] = &[
    "about", "would", "could", "should", "their", "there", "where", "which",
];

#[derive(Debug, Clone, PartialEq)]
pub struct RelevanceReport {
    pub score: u32,
    pub feedback: String,
    /// Candidate keywords found in the transcript.
    pub present: Vec<String>,
    /// Candidate keywords absent from the transcript, truncated for readability.
    pub missing: Vec<String>,
}

/// Terms the answer is expected to touch, derived from the question category.
/// An unrecognized question falls back to its own longer words; an empty
/// question contributes nothing, leaving the generic vocabulary.
pub fn question_keywords(question: &str) -> Vec<String> {
    if question.trim().is_empty() {
        return Vec::new();
    }
    let lower = question.to_lowercase();

    let canned: Option<&[&str]> = if lower.contains("experience") {
        Some(&["experience", "worked on", "background", "projects", "roles"])
    } else if lower.contains("challenge") || lower.contains("difficult") {
        Some(&[
            "challenge", "obstacle", "problem", "solution", "overcome", "resolved", "approach",
            "learned", "outcome",
        ])
    } else if lower.contains("strength") || lower.contains("skill") {
        Some(&[
            "strength",
            "skill",
            "capable",
            "proficient",
            "expertise",
            "qualified",
            "competent",
            "excel",
            "strong suit",
        ])
    } else if lower.contains("weak") || lower.contains("improve") {
        Some(&[
            "improve",
            "learning",
            "development",
            "progress",
            "growth",
            "challenge",
            "overcome",
            "addressed",
        ])
    } else if lower.contains("team") || lower.contains("conflict") {
        Some(&[
            "team",
            "collaboration",
            "communication",
            "resolved",
            "conflict",
            "colleagues",
            "together",
            "contributed",
            "cooperate",
        ])
    } else {
        None
    };

    if let Some(words) = canned {
        return words.iter().map(|w| w.to_string()).collect();
    }

    // No category matched: keep the question's longer words as likely topics.
    question
        .split_whitespace()
        .filter(|word| word.len() > 4)
        .map(|word| {
            word.chars()
                .filter(|c| c.is_alphanumeric() || *c == '_')
                .collect::<String>()
                .to_lowercase()
        })
        .filter(|word| !word.is_empty() && !QUESTION_STOPWORDS.contains(&word.as_str()))
        .collect()
}

/// Full candidate vocabulary: generic terms plus question-derived ones,
/// deduplicated while preserving order.
pub fn candidate_vocabulary(question: &str) -> Vec<String> {
    let mut vocabulary: Vec<String> = GENERIC_VOCABULARY.iter().map(|w| w.to_string()).collect();
    for keyword in question_keywords(question) {
        if !vocabulary.contains(&keyword) {
            vocabulary.push(keyword);
        }
    }
    vocabulary
}

/// Score = matched / total candidates, capped at 100. The present and missing
/// sets are disjoint by construction and both drawn from the candidate set.
pub fn local_relevance(transcript: &str, question: &str, tuning: &ScoringTuning) -> RelevanceReport {
    let vocabulary = candidate_vocabulary(question);
    let lower = transcript.to_lowercase();

    let mut present = Vec::new();
    let mut missing = Vec::new();
    for keyword in &vocabulary {
        if lower.contains(&keyword.to_lowercase()) {
            present.push(keyword.clone());
        } else {
            missing.push(keyword.clone());
        }
    }

    let score =
        ((present.len() as f64 / vocabulary.len().max(1) as f64) * 100.0).round() as u32;
    let score = score.min(100);
    let feedback = if score >= 80 {
        "Your answer is highly relevant to the question and the position. You addressed most of the key points expected in your response.".to_string()
    } else if score >= 60 {
        "Your answer is relevant to the question, but you could include more specific details related to the position.".to_string()
    } else {
        "Your answer could be more focused on the specific requirements of the position and the question asked.".to_string()
    };

    missing.truncate(tuning.max_missing_keywords);
    RelevanceReport {
        score,
        feedback,
        present,
        missing,
    }
}

/// Feedback wording for scores produced by the remote semantic service.
pub fn semantic_relevance_feedback(score: u32) -> String {
    if score >= 80 {
        "Your answer demonstrates strong relevance to the question with effective use of context-appropriate terminology and examples.".to_string()
    } else if score >= 60 {
        "Your answer addresses the question with moderate relevance. Consider incorporating more specific industry terminology and focused examples.".to_string()
    } else {
        "Your answer could be more clearly aligned with what the question is asking. Try to incorporate more relevant terminology and specific examples.".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tuning() -> ScoringTuning {
        ScoringTuning::default()
    }

    #[test]
    fn empty_inputs_use_generic_vocabulary() {
        let report = local_relevance("", "", &tuning());
        assert_eq!(report.score, 0);
        assert!(report.present.is_empty());
        assert_eq!(report.missing.len(), tuning().max_missing_keywords);
    }

    #[test]
    fn present_and_missing_partition_the_vocabulary() {
        let transcript = "My experience with teamwork and communication shaped the project.";
        let vocabulary = candidate_vocabulary("");
        let report = local_relevance(transcript, "", &tuning());

        for word in &report.present {
            assert!(vocabulary.contains(word));
            assert!(!report.missing.contains(word));
        }
        for word in &report.missing {
            assert!(vocabulary.contains(word));
        }
    }

    #[test]
    fn score_stays_in_range() {
        let everything = candidate_vocabulary("Tell me about your experience").join(" ");
        let report = local_relevance(&everything, "Tell me about your experience", &tuning());
        assert!(report.score <= 100);
        assert!(report.missing.is_empty());
    }

    #[test]
    fn question_categories_map_to_canned_keywords() {
        assert!(question_keywords("Describe a challenge you faced")
            .contains(&"obstacle".to_string()));
        assert!(question_keywords("What are your strengths?")
            .contains(&"expertise".to_string()));
        assert!(question_keywords("Tell me about a team conflict")
            .contains(&"collaboration".to_string()));
        assert!(question_keywords("What would you improve?")
            .contains(&"growth".to_string()));
    }

    #[test]
    fn uncategorized_question_keeps_long_words() {
        let keywords = question_keywords("How do you design databases?");
        assert!(keywords.contains(&"design".to_string()));
        assert!(keywords.contains(&"databases".to_string()));
        // Stopwords and short words are dropped.
        assert!(!keywords.iter().any(|k| k == "would" || k == "you"));
    }

    #[test]
    fn empty_question_contributes_nothing() {
        assert!(question_keywords("   ").is_empty());
        assert_eq!(candidate_vocabulary("").len(), GENERIC_VOCABULARY.len());
    }

    #[test]
    fn missing_list_is_truncated() {
        let report = local_relevance("nothing relevant here", "", &tuning());
        assert!(report.missing.len() <= tuning().max_missing_keywords);
    }
}
