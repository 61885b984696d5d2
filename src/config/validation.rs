use super::defaults::{
    MAX_ANSWER_SECONDS, MAX_HTTP_TIMEOUT_MS, MIN_ANSWER_SECONDS, MIN_HTTP_TIMEOUT_MS,
};
use super::{AppConfig, ProviderKind, ScoringTuning};
use anyhow::{bail, Context, Result};
use clap::Parser;

impl AppConfig {
    /// Parse CLI arguments and validate them right away.
    pub fn parse_args() -> Result<Self> {
        let mut config = Self::parse();
        config.validate()?;
        Ok(config)
    }

    /// Check CLI values and normalize them.
    pub fn validate(&mut self) -> Result<()> {
        if !(MIN_ANSWER_SECONDS..=MAX_ANSWER_SECONDS).contains(&self.seconds) {
            bail!(
                "--seconds must be between {MIN_ANSWER_SECONDS} and {MAX_ANSWER_SECONDS}, got {}",
                self.seconds
            );
        }
        if !(8_000..=96_000).contains(&self.sample_rate) {
            bail!(
                "--sample-rate must be between 8000 and 96000 Hz, got {}",
                self.sample_rate
            );
        }
        if !(8..=1024).contains(&self.channel_capacity) {
            bail!(
                "--channel-capacity must be between 8 and 1024, got {}",
                self.channel_capacity
            );
        }
        if self.whisper_beam_size > 10 {
            bail!(
                "--whisper-beam-size must be at most 10, got {}",
                self.whisper_beam_size
            );
        }
        if !(0.0..=1.0).contains(&self.whisper_temperature) {
            bail!(
                "--whisper-temperature must be between 0.0 and 1.0, got {}",
                self.whisper_temperature
            );
        }
        if self.lang.is_empty() || self.lang.len() > 8 {
            bail!("--lang must be a short language code such as 'en' or 'auto'");
        }

        for (name, timeout) in [
            ("--semantic-timeout-ms", self.semantic_timeout_ms),
            ("--cloud-stt-timeout-ms", self.cloud_stt_timeout_ms),
        ] {
            if !(MIN_HTTP_TIMEOUT_MS..=MAX_HTTP_TIMEOUT_MS).contains(&timeout) {
                bail!(
                    "{name} must be between {MIN_HTTP_TIMEOUT_MS} and {MAX_HTTP_TIMEOUT_MS} ms, got {timeout}"
                );
            }
        }
        if let Some(endpoint) = &self.semantic_endpoint {
            validate_endpoint("--semantic-endpoint", endpoint)?;
        }
        if let Some(endpoint) = &self.cloud_stt_endpoint {
            validate_endpoint("--cloud-stt-endpoint", endpoint)?;
        }
        if self.speech_provider == Some(ProviderKind::Cloud) && self.cloud_stt_endpoint.is_none() {
            bail!("--speech-provider cloud requires --cloud-stt-endpoint");
        }
        if self.speech_provider == Some(ProviderKind::Mock) && self.no_mock_fallback {
            bail!("--speech-provider mock conflicts with --no-mock-fallback");
        }

        if self.transcript_file.is_some() && self.transcript_text.is_some() {
            bail!("--transcript-file and --transcript-text are mutually exclusive");
        }
        for question in &self.add_questions {
            if question.trim().is_empty() {
                bail!("--add-question must not be blank");
            }
        }

        // Fail fast on a broken tuning file rather than mid-analysis.
        self.load_tuning()?;
        Ok(())
    }

    /// Scoring thresholds: YAML override when given, shipped defaults otherwise.
    pub fn load_tuning(&self) -> Result<ScoringTuning> {
        match &self.tuning_file {
            Some(path) => {
                ScoringTuning::from_file(path).context("failed to load --tuning-file")
            }
            None => Ok(ScoringTuning::default()),
        }
    }
}

fn validate_endpoint(flag: &str, endpoint: &str) -> Result<()> {
    if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
        bail!("{flag} must be an http(s) URL, got '{endpoint}'");
    }
    Ok(())
}
