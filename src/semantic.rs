//! Remote semantic-analysis client.
//!
//! An optional NLP backend can score relevance and draft suggestions with a
//! real language model. The analyzer treats it as best-effort: any failure
//! here is logged and the local heuristics take over.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Payload returned by the semantic service. All fields are optional on the
/// wire; a partial response is still usable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticInsights {
    #[serde(default)]
    pub relevant_keywords: Vec<String>,
    #[serde(default)]
    pub missing_keywords: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub improvement_areas: Vec<String>,
}

#[derive(Debug, Serialize)]
struct SemanticRequest<'a> {
    transcript: &'a str,
    question: &'a str,
}

/// Seam between the analyzer and whatever produces semantic insights, so
/// tests can swap in a scripted implementation.
pub trait SemanticAnalyzer {
    fn analyze(&self, transcript: &str, question: &str) -> Result<SemanticInsights>;
}

/// Blocking HTTP implementation posting `{transcript, question}` as JSON.
pub struct HttpSemanticClient {
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl HttpSemanticClient {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build semantic HTTP client")?;
        Ok(Self {
            endpoint: endpoint.to_string(),
            client,
        })
    }
}

impl SemanticAnalyzer for HttpSemanticClient {
    fn analyze(&self, transcript: &str, question: &str) -> Result<SemanticInsights> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&SemanticRequest {
                transcript,
                question,
            })
            .send()
            .with_context(|| format!("semantic request to {} failed", self.endpoint))?
            .error_for_status()
            .context("semantic service returned an error status")?;
        response
            .json::<SemanticInsights>()
            .context("semantic service returned malformed JSON")
    }
}
