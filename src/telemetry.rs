//! JSON-lines telemetry sink for `tracing` events.

use crate::config::AppConfig;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::OnceLock;
use tracing_subscriber::fmt::time::UtcTime;

static TRACING_INIT: OnceLock<()> = OnceLock::new();

pub(crate) fn tracing_log_path() -> PathBuf {
    std::env::var("INTERVOX_TRACE_LOG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| std::env::temp_dir().join("intervox_trace.jsonl"))
}

/// Install the global JSON subscriber once; runs with logging disabled never
/// touch it.
pub(crate) fn init_tracing(config: &AppConfig) {
    if config.no_logs || !(config.logs || config.log_timings) {
        return;
    }
    TRACING_INIT.get_or_init(|| {
        let file = match OpenOptions::new()
            .create(true)
            .append(true)
            .open(tracing_log_path())
        {
            Ok(file) => file,
            Err(_) => return,
        };
        let subscriber = tracing_subscriber::fmt()
            .json()
            .with_timer(UtcTime::rfc_3339())
            .with_writer(file)
            .with_current_span(false)
            .with_span_list(false)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}
