pub mod analysis;
pub mod audio;
pub mod config;
mod logging;
pub mod questions;
pub mod recognition;
pub mod semantic;
pub mod session;
pub mod stt;
mod telemetry;

pub use logging::{
    crash_log_path, init_logging, log_debug, log_debug_content, log_file_path, log_panic,
};
pub use session::{RecognitionJob, SessionMessage, Transcript, TranscriptSession};

use config::AppConfig;

/// One-call startup wiring: file logger plus the tracing telemetry sink.
pub fn init_observability(config: &AppConfig) {
    init_logging(config);
    telemetry::init_tracing(config);
}
