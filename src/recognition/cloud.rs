//! Cloud recognition: upload the captured answer as a WAV and parse the
//! transcription response. The endpoint speaks the Azure batch shape
//! (`recognizedPhrases[].nBest[].display`) with `displayText` as a simpler
//! alternative, so either style of service works.

use super::{CaptureControl, Recognition, RecognitionEvent, SpeechProvider};
use crate::audio::{LevelMeter, Recorder};
use crate::config::AppConfig;
use crate::log_debug;
use anyhow::{anyhow, Context, Result};
use crossbeam_channel::Sender;
use hound::{SampleFormat, WavSpec, WavWriter};
use reqwest::blocking::{multipart, Client};
use serde::Deserialize;
use std::io::Cursor;
use std::time::Duration;

const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

pub struct CloudProvider {
    endpoint: String,
    key: Option<String>,
    input_device: Option<String>,
    sample_rate: u32,
    client: Client,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CloudTranscription {
    #[serde(default)]
    display_text: Option<String>,
    #[serde(default)]
    recognized_phrases: Vec<RecognizedPhrase>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecognizedPhrase {
    #[serde(default)]
    n_best: Vec<NBest>,
}

#[derive(Debug, Deserialize)]
struct NBest {
    #[serde(default)]
    display: String,
}

impl CloudProvider {
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let endpoint = config
            .cloud_stt_endpoint
            .clone()
            .ok_or_else(|| anyhow!("cloud speech provider requires --cloud-stt-endpoint"))?;
        let client = Client::builder()
            .timeout(Duration::from_millis(config.cloud_stt_timeout_ms))
            .build()
            .context("building cloud speech HTTP client")?;
        Ok(Self {
            endpoint,
            key: config.cloud_stt_key.clone(),
            input_device: config.input_device.clone(),
            sample_rate: config.sample_rate,
            client,
        })
    }

    fn upload(&self, wav: Vec<u8>) -> Result<String> {
        let part = multipart::Part::bytes(wav)
            .file_name("answer.wav")
            .mime_str("audio/wav")
            .context("building WAV multipart section")?;
        let form = multipart::Form::new().part("audio", part);
        let mut request = self.client.post(&self.endpoint).multipart(form);
        if let Some(key) = &self.key {
            request = request.header(SUBSCRIPTION_KEY_HEADER, key);
        }
        let response = request
            .send()
            .context("sending audio to cloud speech endpoint")?
            .error_for_status()
            .context("cloud speech endpoint rejected the request")?;
        let payload: CloudTranscription = response
            .json()
            .context("decoding cloud speech response")?;
        extract_text(payload).ok_or_else(|| anyhow!("cloud speech response held no transcript"))
    }
}

impl SpeechProvider for CloudProvider {
    fn name(&self) -> &'static str {
        "cloud"
    }

    fn recognize(
        &self,
        control: &CaptureControl,
        events: &Sender<RecognitionEvent>,
    ) -> Result<Recognition> {
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

        let wav = encode_wav(&capture.samples, self.sample_rate)?;
        log_debug(&format!(
            "cloud stt: uploading {} byte WAV ({:.1}s) to endpoint",
            wav.len(),
            capture.duration_secs
        ));
        let text = self.upload(wav)?;
        let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if text.is_empty() {
            return Err(anyhow!("cloud speech response held no transcript"));
        }
        Ok(Recognition {
            text,
            duration_secs: capture.duration_secs,
        })
    }
}

/// Mono 16-bit PCM WAV in memory.
fn encode_wav(samples: &[f32], sample_rate: u32) -> Result<Vec<u8>> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut cursor = Cursor::new(Vec::new());
    let mut writer =
        WavWriter::new(&mut cursor, spec).context("starting in-memory WAV writer")?;
    for &sample in samples {
        let quantized = (sample.clamp(-1.0, 1.0) * f32::from(i16::MAX)).round() as i16;
        writer
            .write_sample(quantized)
            .context("writing WAV sample")?;
    }
    writer.finalize().context("finalizing WAV header")?;
    Ok(cursor.into_inner())
}

fn extract_text(payload: CloudTranscription) -> Option<String> {
    if let Some(text) = payload.display_text {
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            return Some(trimmed.to_string());
        }
    }
    payload
        .recognized_phrases
        .into_iter()
        .flat_map(|phrase| phrase.n_best.into_iter())
        .map(|best| best.display.trim().to_string())
        .find(|display| !display.is_empty())
}
