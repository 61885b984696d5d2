//! Whisper speech-to-text integration.
//!
//! Wraps `whisper_rs` behind a small options struct. The model is loaded once
//! and reused across captures to avoid repeated initialization overhead.

use crate::config::AppConfig;

/// Decoding options for one transcription pass.
#[derive(Debug, Clone)]
pub struct SttOptions {
    pub lang: String,
    pub beam_size: u32,
    pub temperature: f32,
}

impl From<&AppConfig> for SttOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            lang: config.lang.clone(),
            beam_size: config.whisper_beam_size,
            temperature: config.whisper_temperature,
        }
    }
}

#[cfg(unix)]
mod platform {
    use super::SttOptions;
    use crate::log_debug;
    use anyhow::{anyhow, Context, Result};
    use std::io;
    use std::os::raw::{c_char, c_uint, c_void};
    use std::os::unix::io::AsRawFd;
    use std::sync::Once;
    use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

    /// Redirects stderr to `/dev/null` for its lifetime and restores it on
    /// drop, covering every exit path out of the model load.
    struct StderrSilencer {
        saved_fd: i32,
    }

    impl StderrSilencer {
        fn install() -> Result<Self> {
            let null = std::fs::OpenOptions::new()
                .write(true)
                .open("/dev/null")
                .context("failed to open /dev/null")?;

            // SAFETY: dup(2) copies the stderr descriptor; the copy is closed
            // again in drop after dup2 restores it.
            let saved_fd = unsafe { libc::dup(2) };
            if saved_fd < 0 {
                return Err(anyhow!(
                    "failed to dup stderr: {}",
                    io::Error::last_os_error()
                ));
            }
            if unsafe { libc::dup2(null.as_raw_fd(), 2) } < 0 {
                unsafe { libc::close(saved_fd) };
                return Err(anyhow!(
                    "failed to redirect stderr: {}",
                    io::Error::last_os_error()
                ));
            }
            Ok(Self { saved_fd })
        }
    }

    impl Drop for StderrSilencer {
        fn drop(&mut self) {
            unsafe {
                libc::dup2(self.saved_fd, 2);
                libc::close(self.saved_fd);
            }
        }
    }

    /// Whisper model context. Create once at startup and reuse.
    pub struct Transcriber {
        ctx: WhisperContext,
    }

    impl Transcriber {
        /// Loads the Whisper model from disk.
        ///
        /// stderr is silenced during loading because whisper.cpp emits verbose
        /// initialization messages that would land in the middle of the
        /// interim-transcript output.
        pub fn new(model_path: &str) -> Result<Self> {
            install_whisper_log_silencer();

            let ctx = {
                let _quiet = StderrSilencer::install()?;
                WhisperContext::new_with_params(model_path, WhisperContextParameters::default())
            }
            .context("failed to load whisper model")?;
            Ok(Self { ctx })
        }

        /// Run transcription for the captured PCM samples and return the
        /// concatenated segment text.
        pub fn transcribe(&self, samples: &[f32], opts: &SttOptions) -> Result<String> {
            let mut state = self
                .ctx
                .create_state()
                .context("failed to create whisper state")?;
            let mut params = if opts.beam_size > 1 {
                FullParams::new(SamplingStrategy::BeamSearch {
                    beam_size: opts.beam_size as i32,
                    patience: -1.0,
                })
            } else {
                FullParams::new(SamplingStrategy::Greedy { best_of: 1 })
            };
            if opts.lang.eq_ignore_ascii_case("auto") {
                params.set_language(None);
                params.set_detect_language(true);
            } else {
                params.set_language(Some(&opts.lang));
                params.set_detect_language(false);
            }
            params.set_temperature(opts.temperature);
            // Limit CPU usage so laptops don't max out all cores.
            params.set_n_threads(num_cpus::get().min(8) as i32);
            params.set_print_progress(false);
            params.set_print_timestamps(false);
            params.set_print_special(false);
            params.set_print_realtime(false);
            params.set_translate(false);
            params.set_token_timestamps(false);
            state.full(params, samples)?;

            let mut transcript = String::new();
            let num_segments = match state.full_n_segments() {
                Ok(count) => count,
                Err(err) => {
                    log_debug(&format!("whisper failed to read segment count: {err}"));
                    return Ok(transcript);
                }
            };
            if num_segments < 0 {
                log_debug("whisper returned a negative segment count");
                return Ok(transcript);
            }
            for i in 0..num_segments {
                match state.full_get_segment_text_lossy(i) {
                    Ok(text) => transcript.push_str(&text),
                    Err(err) => log_debug(&format!("failed to read whisper segment {i}: {err}")),
                }
            }
            Ok(transcript.replace("[BLANK_AUDIO]", ""))
        }
    }

    fn install_whisper_log_silencer() {
        static INSTALL_LOG_CALLBACK: Once = Once::new();
        INSTALL_LOG_CALLBACK.call_once(|| unsafe {
            whisper_rs::set_log_callback(Some(whisper_log_callback), std::ptr::null_mut());
        });
    }

    #[allow(unused_variables)]
    unsafe extern "C" fn whisper_log_callback(
        _level: c_uint,
        _text: *const c_char,
        _user_data: *mut c_void,
    ) {
        // Silence the default whisper.cpp logger so it does not corrupt stdout.
    }
}

#[cfg(unix)]
pub use platform::Transcriber;

#[cfg(not(unix))]
mod platform {
    use super::SttOptions;
    use anyhow::{anyhow, Result};

    /// Stub implementation for unsupported targets such as Windows.
    pub struct Transcriber;

    impl Transcriber {
        pub fn new(_: &str) -> Result<Self> {
            Err(anyhow!(
                "Whisper transcription is currently supported only on Unix-like platforms"
            ))
        }

        pub fn transcribe(&self, _: &[f32], _: &SttOptions) -> Result<String> {
            Err(anyhow!(
                "Whisper transcription is currently supported only on Unix-like platforms"
            ))
        }
    }
}

#[cfg(not(unix))]
pub use platform::Transcriber;

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn transcriber_rejects_missing_model() {
        let result = Transcriber::new("/no/such/model.bin");
        assert!(result.is_err());
    }

    #[test]
    fn options_come_from_config() {
        use clap::Parser;
        let config = crate::config::AppConfig::parse_from([
            "intervox",
            "--lang",
            "de",
            "--whisper-beam-size",
            "4",
        ]);
        let opts = SttOptions::from(&config);
        assert_eq!(opts.lang, "de");
        assert_eq!(opts.beam_size, 4);
    }
}
