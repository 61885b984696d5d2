//! Plain-text rendering of an analysis report.

use intervox::analysis::AnalysisResult;
use std::fmt::Write;

pub fn render(question: &str, result: &AnalysisResult) -> String {
    let mut out = String::new();
    let content = &result.content_analysis;
    let audio = &result.audio_analysis;

    let _ = writeln!(out, "Question: {question}");
    let _ = writeln!(out);
    let _ = writeln!(out, "Transcript:");
    if result.transcript.trim().is_empty() {
        let _ = writeln!(out, "  (no speech recognized)");
    } else {
        let _ = writeln!(out, "  {}", result.transcript.trim());
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Scores");
    let _ = writeln!(out, "  overall    {}", score_line(content.overall_score));
    let _ = writeln!(out, "  relevance  {}", score_line(content.relevance_score));
    let _ = writeln!(out, "  clarity    {}", score_line(content.clarity_score));
    let _ = writeln!(out, "  pace       {}", score_line(audio.pace_score));
    let _ = writeln!(
        out,
        "  delivery   {} wpm over {:.1}s, sentiment {} ({:.0}% confidence)",
        audio.wpm,
        audio.duration,
        content.sentiment.sentiment,
        content.sentiment.confidence * 100.0
    );
    let _ = writeln!(out);

    if !audio.filler_words.is_empty() {
        let counts: Vec<String> = audio
            .filler_words
            .iter()
            .map(|(word, count)| format!("{word} x{count}"))
            .collect();
        let _ = writeln!(
            out,
            "Filler words ({} total): {}",
            audio.filler_words_count,
            counts.join(", ")
        );
        let _ = writeln!(out);
    }

    let _ = writeln!(out, "Feedback");
    let _ = writeln!(out, "  {}", result.feedback.general_feedback);
    let _ = writeln!(out, "  {}", content.relevance_feedback);
    let _ = writeln!(out, "  {}", content.clarity_feedback);
    let _ = writeln!(out, "  {}", audio.pace_feedback);
    let _ = writeln!(out);

    render_list(&mut out, "Strengths", &content.strengths);
    render_list(&mut out, "Areas to improve", &content.improvement_areas);
    render_list(&mut out, "Suggestions", &result.feedback.suggestions);
    if !content.missing_keywords.is_empty() {
        let _ = writeln!(
            out,
            "Keywords to work in: {}",
            content.missing_keywords.join(", ")
        );
        let _ = writeln!(out);
    }
    render_list(&mut out, "Sample answers", &result.feedback.sample_answers);

    out
}

fn render_list(out: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    let _ = writeln!(out, "{title}");
    for item in items {
        let _ = writeln!(out, "  - {item}");
    }
    let _ = writeln!(out);
}

fn score_line(score: u32) -> String {
    format!("{score:>3}/100  {}", grade(score))
}

fn grade(score: u32) -> &'static str {
    match score {
        85..=u32::MAX => "excellent",
        70..=84 => "good",
        50..=69 => "fair",
        _ => "needs work",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intervox::analysis::Analyzer;
    use intervox::config::ScoringTuning;

    #[test]
    fn grade_bands() {
        assert_eq!(grade(90), "excellent");
        assert_eq!(grade(84), "good");
        assert_eq!(grade(50), "fair");
        assert_eq!(grade(10), "needs work");
    }

    #[test]
    fn render_includes_the_main_sections() {
        let tuning = ScoringTuning::default();
        let result = Analyzer::new(&tuning).analyze(
            "I led a team through a difficult project and we shipped on time.",
            "Tell me about a challenge you faced.",
        );
        let text = render("Tell me about a challenge you faced.", &result);
        assert!(text.contains("Scores"));
        assert!(text.contains("Feedback"));
        assert!(text.contains("Sample answers"));
        assert!(text.contains("overall"));
    }

    #[test]
    fn render_marks_an_empty_transcript() {
        let tuning = ScoringTuning::default();
        let result = Analyzer::new(&tuning).analyze("", "");
        let text = render("", &result);
        assert!(text.contains("(no speech recognized)"));
    }
}
