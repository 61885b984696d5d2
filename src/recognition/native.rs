//! On-device recognition: cpal capture into a local Whisper model.

use super::{CaptureControl, Recognition, RecognitionEvent, SpeechProvider};
use crate::audio::{LevelMeter, Recorder};
use crate::config::AppConfig;
use crate::log_debug;
use crate::stt::{SttOptions, Transcriber};
use anyhow::{anyhow, Result};
use crossbeam_channel::Sender;
use regex::Regex;
use std::sync::OnceLock;

pub struct NativeProvider {
    input_device: Option<String>,
    sample_rate: u32,
    model_path: Option<String>,
    opts: SttOptions,
}

impl NativeProvider {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            input_device: config.input_device.clone(),
            sample_rate: config.sample_rate,
            model_path: config.whisper_model_path.clone(),
            opts: SttOptions::from(config),
        }
    }
}

impl SpeechProvider for NativeProvider {
    fn name(&self) -> &'static str {
        "native"
    }

    fn recognize(
        &self,
        control: &CaptureControl,
        events: &Sender<RecognitionEvent>,
    ) -> Result<Recognition> {
        let model_path = self.model_path.as_deref().ok_or_else(|| {
            anyhow!("no whisper model configured (set --whisper-model-path or INTERVOX_WHISPER_MODEL)")
        })?;
        // Load the model before opening the mic so a bad path fails fast.
        let transcriber = Transcriber::new(model_path)?;

        let recorder = Recorder::new(self.input_device.as_deref())?;
        let meter = LevelMeter::new();
        let capture = recorder.record_until(
            self.sample_rate,
            control.max_duration(),
            Some(control.stop_flag()),
            Some(meter.clone()),
        )?;
        if capture.samples.is_empty() {
            return Err(anyhow!("capture produced no audio samples"));
        }
        if meter.is_quiet() {
            let _ = events.send(RecognitionEvent::Warning(
                "microphone level was very low; check your input device".to_string(),
            ));
        }

        log_debug(&format!(
            "native stt: {} samples ({:.1}s) captured, transcribing",
            capture.samples.len(),
            capture.duration_secs
        ));
        let raw = transcriber.transcribe(&capture.samples, &self.opts)?;
        let text = sanitize_transcript(&raw);
        if text.is_empty() {
            return Err(anyhow!("no speech recognized in the capture"));
        }
        Ok(Recognition {
            text,
            duration_secs: capture.duration_secs,
        })
    }
}

/// Strip Whisper's bracketed non-speech markers and collapse whitespace.
fn sanitize_transcript(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    static NON_SPEECH_RE: OnceLock<Regex> = OnceLock::new();
    let re = NON_SPEECH_RE.get_or_init(|| {
        Regex::new(
            r"(?i)\[\s*\]|\(\s*\)|\[(?:\s*(?:silence|noise|inaudible|blank_audio|blank audio|music|laughter|applause|cough|breath(?:ing)?|wind|background)\s*)\]|\((?:\s*(?:silence|noise|inaudible|blank audio|music|laughter|applause|cough|breath(?:ing)?|wind|background|wind blowing)\s*)\)",
        )
        .expect("non-speech regex should compile")
    });
    let without_markers = re.replace_all(trimmed, " ");
    without_markers
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
