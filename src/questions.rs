//! Built-in interview question bank.

use crate::config::MAX_QUESTION_BANK;
use anyhow::{anyhow, Result};

const DEFAULT_QUESTIONS: &[&str] = &[
    "Tell me about yourself.",
    "How do you approach debugging a complex issue?",
    "What are your greatest strengths?",
];

#[derive(Debug, Clone)]
pub struct QuestionBank {
    questions: Vec<String>,
}

impl QuestionBank {
    pub fn new() -> Self {
        Self {
            questions: DEFAULT_QUESTIONS.iter().map(|q| q.to_string()).collect(),
        }
    }

    /// Append a custom question; the bank has a hard cap so a runaway config
    /// cannot grow it without bound.
    pub fn add(&mut self, question: &str) -> Result<()> {
        let question = question.trim();
        if question.is_empty() {
            return Err(anyhow!("question must not be blank"));
        }
        if self.questions.len() >= MAX_QUESTION_BANK {
            return Err(anyhow!(
                "question bank is full ({MAX_QUESTION_BANK} questions)"
            ));
        }
        self.questions.push(question.to_string());
        Ok(())
    }

    pub fn get(&self, index: usize) -> Result<&str> {
        self.questions
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| {
                anyhow!(
                    "question index {index} out of range (bank holds {})",
                    self.questions.len()
                )
            })
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.questions.iter().map(String::as_str)
    }
}

impl Default for QuestionBank {
    fn default() -> Self {
        Self::new()
    }
}
