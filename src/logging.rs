//! File-based debug logging.
//!
//! Recognition and analysis run while the terminal is busy printing interim
//! transcripts, so diagnostics go to a rotating temp file instead of stderr.
//! Content-bearing lines (transcript or question snippets) are dropped unless
//! the user opted in with `--log-content`.

use crate::config::AppConfig;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::panic;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Mutex, OnceLock};
use std::time::{SystemTime, UNIX_EPOCH};

const LOG_MAX_BYTES: u64 = 5 * 1024 * 1024;
const CRASH_LOG_MAX_BYTES: u64 = 256 * 1024;

const FLAG_ENABLED: u8 = 0b01;
const FLAG_CONTENT: u8 = 0b10;

static FLAGS: AtomicU8 = AtomicU8::new(0);
static WRITER: OnceLock<Mutex<Option<CappedLog>>> = OnceLock::new();

/// Path to the temp log file we rotate between runs.
pub fn log_file_path() -> PathBuf {
    std::env::temp_dir().join("intervox.log")
}

/// Path to the crash log file (metadata only).
pub fn crash_log_path() -> PathBuf {
    std::env::temp_dir().join("intervox_crash.log")
}

/// Append-only log file that truncates itself once it outgrows its cap.
struct CappedLog {
    path: PathBuf,
    file: File,
    cap: u64,
    len: u64,
}

impl CappedLog {
    fn open(path: PathBuf, cap: u64) -> Option<Self> {
        let mut len = fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
        if len > cap {
            let _ = fs::remove_file(&path);
            len = 0;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .ok()?;
        Some(Self {
            path,
            file,
            cap,
            len,
        })
    }

    fn append(&mut self, line: &str) {
        if self.len.saturating_add(line.len() as u64) > self.cap {
            match OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&self.path)
            {
                Ok(file) => {
                    self.file = file;
                    self.len = 0;
                }
                Err(_) => return,
            }
        }
        if self.file.write_all(line.as_bytes()).is_ok() {
            self.len = self.len.saturating_add(line.len() as u64);
        }
    }
}

fn writer() -> &'static Mutex<Option<CappedLog>> {
    WRITER.get_or_init(|| Mutex::new(None))
}

fn apply_flags(enabled: bool, content_enabled: bool) {
    let mut flags = 0;
    if enabled {
        flags |= FLAG_ENABLED;
    }
    if enabled && content_enabled {
        flags |= FLAG_CONTENT;
    }
    FLAGS.store(flags, Ordering::Relaxed);

    let mut guard = writer()
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = if enabled {
        CappedLog::open(log_file_path(), LOG_MAX_BYTES)
    } else {
        None
    };
}

/// Configure logging based on CLI flags or environment.
pub fn init_logging(config: &AppConfig) {
    let enabled = (config.logs || config.log_timings) && !config.no_logs;
    apply_flags(enabled, config.log_content);
}

fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Write a debug line to the temp file.
pub fn log_debug(msg: &str) {
    if FLAGS.load(Ordering::Relaxed) & FLAG_ENABLED == 0 {
        return;
    }
    let line = format!("[{}] {msg}\n", unix_timestamp());
    let mut guard = writer()
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    if let Some(log) = guard.as_mut() {
        log.append(&line);
    }
}

/// Write logs that may contain user content (transcript/question snippets).
pub fn log_debug_content(msg: &str) {
    if FLAGS.load(Ordering::Relaxed) & FLAG_CONTENT == 0 {
        return;
    }
    log_debug(msg);
}

/// Write a minimal crash log entry, omitting user content unless explicitly
/// enabled.
pub fn log_panic(info: &panic::PanicHookInfo<'_>) {
    let flags = FLAGS.load(Ordering::Relaxed);
    if flags & FLAG_ENABLED == 0 {
        return;
    }

    let location = info
        .location()
        .map(|loc| format!("{}:{}", loc.file(), loc.line()))
        .unwrap_or_else(|| "unknown".to_string());
    let payload = if flags & FLAG_CONTENT != 0 {
        panic_payload(info)
    } else {
        "panic payload omitted (log-content disabled)".to_string()
    };
    let line = format!(
        "[{}] panic at {location}: {payload} (v{})\n",
        unix_timestamp(),
        env!("CARGO_PKG_VERSION")
    );
    append_crash_line(&crash_log_path(), &line);
}

fn panic_payload(info: &panic::PanicHookInfo<'_>) -> String {
    if let Some(text) = info.payload().downcast_ref::<&str>() {
        (*text).to_string()
    } else if let Some(text) = info.payload().downcast_ref::<String>() {
        text.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

fn append_crash_line(path: &Path, line: &str) {
    // The panic hook must never panic itself, so every failure is swallowed.
    if let Some(mut log) = CappedLog::open(path.to_path_buf(), CRASH_LOG_MAX_BYTES) {
        log.append(line);
    }
}

#[cfg(test)]
pub(crate) fn set_logging_for_tests(enabled: bool, content_enabled: bool) {
    apply_flags(enabled, content_enabled);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_logger_writes_nothing() {
        set_logging_for_tests(false, false);
        let before = fs::metadata(log_file_path()).map(|m| m.len()).unwrap_or(0);
        log_debug("should be dropped");
        let after = fs::metadata(log_file_path()).map(|m| m.len()).unwrap_or(0);
        assert_eq!(before, after);
    }

    #[test]
    fn content_log_requires_opt_in() {
        set_logging_for_tests(true, false);
        let before = fs::metadata(log_file_path()).map(|m| m.len()).unwrap_or(0);
        log_debug_content("transcript snippet");
        let after = fs::metadata(log_file_path()).map(|m| m.len()).unwrap_or(0);
        assert_eq!(before, after);
        set_logging_for_tests(false, false);
    }

    #[test]
    fn capped_log_truncates_past_the_cap() {
        let path = std::env::temp_dir().join(format!(
            "intervox_capped_log_{}.log",
            std::process::id()
        ));
        let _ = fs::remove_file(&path);
        let mut log = CappedLog::open(path.clone(), 32).expect("open capped log");
        log.append("0123456789012345678901234\n");
        log.append("second line that overflows\n");
        let len = fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
        assert!(len <= 32, "log grew past its cap: {len}");
        let _ = fs::remove_file(&path);
    }
}
