//! Command-line parsing, scoring tunables, and validation helpers.

mod defaults;
#[cfg(test)]
mod tests;
mod tuning;
mod validation;

use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

pub use defaults::{
    DEFAULT_CLOUD_STT_TIMEOUT_MS, DEFAULT_EVENT_CHANNEL_CAPACITY, DEFAULT_MAX_ANSWER_SECONDS,
    DEFAULT_SAMPLE_RATE, DEFAULT_SEMANTIC_TIMEOUT_MS, MAX_QUESTION_BANK,
};
pub use tuning::ScoringTuning;

/// CLI options for intervox. Validated values keep the capture pipeline and
/// outbound HTTP calls inside sane bounds.
#[derive(Debug, Parser, Clone)]
#[command(about = "intervox mock-interview practice", author, version)]
pub struct AppConfig {
    /// Interview question to practice (overrides the built-in bank)
    #[arg(long)]
    pub question: Option<String>,

    /// Index into the question bank when --question is not given
    #[arg(long = "question-index", default_value_t = 0)]
    pub question_index: usize,

    /// Add a question to the bank for this run (repeatable)
    #[arg(long = "add-question", action = ArgAction::Append, value_name = "QUESTION")]
    pub add_questions: Vec<String>,

    /// Analyze a transcript file instead of recording
    #[arg(long = "transcript-file")]
    pub transcript_file: Option<PathBuf>,

    /// Analyze a transcript passed inline instead of recording
    #[arg(long = "transcript-text")]
    pub transcript_text: Option<String>,

    /// Emit the analysis as pretty-printed JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Print detected audio input devices and exit
    #[arg(long = "list-input-devices", default_value_t = false)]
    pub list_input_devices: bool,

    /// Preferred audio input device name
    #[arg(long)]
    pub input_device: Option<String>,

    /// Maximum answer length before capture stops (seconds)
    #[arg(long, default_value_t = DEFAULT_MAX_ANSWER_SECONDS)]
    pub seconds: u64,

    /// Target sample rate for the capture pipeline (Hz)
    #[arg(long = "sample-rate", default_value_t = DEFAULT_SAMPLE_RATE)]
    pub sample_rate: u32,

    /// Recognition event channel capacity
    #[arg(long = "channel-capacity", default_value_t = DEFAULT_EVENT_CHANNEL_CAPACITY)]
    pub channel_capacity: usize,

    /// Force a single speech provider instead of the fallback chain
    #[arg(long = "speech-provider", value_enum)]
    pub speech_provider: Option<ProviderKind>,

    /// Fail instead of synthesizing a mock transcript when all providers fail
    #[arg(long = "no-mock-fallback", default_value_t = false)]
    pub no_mock_fallback: bool,

    /// Whisper model path (GGML file) for the native provider
    #[arg(long = "whisper-model-path", env = "INTERVOX_WHISPER_MODEL")]
    pub whisper_model_path: Option<String>,

    /// Whisper beam size (>1 enables beam search)
    #[arg(long = "whisper-beam-size", default_value_t = 0)]
    pub whisper_beam_size: u32,

    /// Whisper temperature
    #[arg(long = "whisper-temperature", default_value_t = 0.0)]
    pub whisper_temperature: f32,

    /// Language passed to Whisper
    #[arg(long, default_value = "en")]
    pub lang: String,

    /// Cloud speech-to-text endpoint (multipart WAV upload)
    #[arg(long = "cloud-stt-endpoint", env = "INTERVOX_CLOUD_STT_ENDPOINT")]
    pub cloud_stt_endpoint: Option<String>,

    /// Subscription key sent to the cloud speech-to-text endpoint
    #[arg(long = "cloud-stt-key", env = "INTERVOX_CLOUD_STT_KEY")]
    pub cloud_stt_key: Option<String>,

    /// Cloud speech-to-text request timeout (milliseconds)
    #[arg(long = "cloud-stt-timeout-ms", default_value_t = DEFAULT_CLOUD_STT_TIMEOUT_MS)]
    pub cloud_stt_timeout_ms: u64,

    /// Remote semantic-analysis endpoint; unset means local heuristics only
    #[arg(long = "semantic-endpoint", env = "INTERVOX_SEMANTIC_ENDPOINT")]
    pub semantic_endpoint: Option<String>,

    /// Semantic-analysis request timeout (milliseconds)
    #[arg(long = "semantic-timeout-ms", default_value_t = DEFAULT_SEMANTIC_TIMEOUT_MS)]
    pub semantic_timeout_ms: u64,

    /// YAML file overriding the scoring thresholds
    #[arg(long = "tuning-file")]
    pub tuning_file: Option<PathBuf>,

    /// Enable file logging (debug)
    #[arg(long = "logs", env = "INTERVOX_LOGS", default_value_t = false)]
    pub logs: bool,

    /// Disable all file logging (overrides --logs and log env vars)
    #[arg(long = "no-logs", env = "INTERVOX_NO_LOGS", default_value_t = false)]
    pub no_logs: bool,

    /// Allow logging transcript/question snippets (debug log only)
    #[arg(
        long = "log-content",
        env = "INTERVOX_LOG_CONTENT",
        default_value_t = false
    )]
    pub log_content: bool,

    /// Enable verbose timing logs
    #[arg(long)]
    pub log_timings: bool,
}

/// Runtime-selectable speech-recognition providers, in fallback order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProviderKind {
    Native,
    Cloud,
    Mock,
}

impl ProviderKind {
    pub fn label(self) -> &'static str {
        match self {
            ProviderKind::Native => "native",
            ProviderKind::Cloud => "cloud",
            ProviderKind::Mock => "mock",
        }
    }
}

impl AppConfig {
    /// Providers to try, in order. A forced provider collapses the chain to
    /// one entry; otherwise cloud is skipped without an endpoint and mock is
    /// skipped when the user disabled it.
    pub fn provider_order(&self) -> Vec<ProviderKind> {
        if let Some(forced) = self.speech_provider {
            return vec![forced];
        }
        let mut order = vec![ProviderKind::Native];
        if self.cloud_stt_endpoint.is_some() {
            order.push(ProviderKind::Cloud);
        }
        if !self.no_mock_fallback {
            order.push(ProviderKind::Mock);
        }
        order
    }

    pub fn max_capture_ms(&self) -> u64 {
        self.seconds.saturating_mul(1000)
    }
}
