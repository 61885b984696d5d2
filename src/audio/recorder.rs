//! System microphone recording via CPAL.
//!
//! Handles device enumeration, format conversion, and downmixing. Samples are
//! collected on the CPAL callback thread into a shared buffer while the
//! caller's thread polls the stop flag, so a manual stop always wins.

use super::level::{rms_db, LevelMeter};
use super::resample::resample_to_rate;
use crate::log_debug;
use anyhow::{anyhow, Context, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, StreamConfig};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// How often the capture loop wakes up to poll the stop flag and meter.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Window of trailing samples fed to the level meter each tick.
const METER_WINDOW_MS: u32 = 200;

/// Finished capture: mono samples at the requested rate plus the wall-clock
/// duration, which the analyzer can use for a real words-per-second figure.
#[derive(Debug, Clone)]
pub struct Capture {
    pub samples: Vec<f32>,
    pub duration_secs: f64,
}

/// Audio input device wrapper.
pub struct Recorder {
    device: cpal::Device,
}

impl Recorder {
    /// List microphone names so the CLI can expose a selector.
    pub fn list_devices() -> Result<Vec<String>> {
        let host = cpal::default_host();
        let devices = host.input_devices().context("no input devices available")?;
        let mut names = Vec::new();
        for device in devices {
            if let Ok(name) = device.name() {
                names.push(name);
            }
        }
        Ok(names)
    }

    /// Create a recorder, optionally forcing a specific device so users can
    /// pick the right microphone when a laptop exposes multiple inputs.
    pub fn new(preferred_device: Option<&str>) -> Result<Self> {
        let host = cpal::default_host();
        let device = match preferred_device {
            Some(name) => {
                let mut devices = host.input_devices().context("no input devices available")?;
                devices
                    .find(|d| d.name().map(|n| n == name).unwrap_or(false))
                    .ok_or_else(|| anyhow!("input device '{name}' not found"))?
            }
            None => host
                .default_input_device()
                .context("no default input device available")?,
        };
        Ok(Self { device })
    }

    /// Name of the active recording device.
    pub fn device_name(&self) -> String {
        self.device
            .name()
            .unwrap_or_else(|_| "Unknown Device".to_string())
    }

    /// Record until the stop flag is set or `max_duration` elapses, then
    /// return mono samples resampled to `target_rate`.
    ///
    /// The CPAL stream lives entirely inside this call; every exit path drops
    /// it, so the microphone is released even when capture fails.
    pub fn record_until(
        &self,
        target_rate: u32,
        max_duration: Duration,
        stop_flag: Option<Arc<AtomicBool>>,
        meter: Option<LevelMeter>,
    ) -> Result<Capture> {
        let default_config = self.device.default_input_config()?;
        let format = default_config.sample_format();
        let device_config: StreamConfig = default_config.clone().into();
        let device_rate = device_config.sample_rate.0;
        let channels = usize::from(device_config.channels.max(1));
        let device_name = self.device_name();

        log_debug(&format!(
            "recorder config: format={format:?} rate={device_rate}Hz channels={channels} device={device_name}"
        ));

        let expected =
            (max_duration.as_secs_f64() * device_rate as f64).ceil() as usize;
        let buffer = Arc::new(Mutex::new(Vec::<f32>::with_capacity(expected)));
        let err_fn = |err| log_debug(&format!("audio_stream_error: {err}"));

        // Convert every supported sample type to f32 in the callback so the
        // rest of the pipeline stays format-agnostic.
        let stream = match format {
            SampleFormat::F32 => {
                let buffer = buffer.clone();
                self.device.build_input_stream(
                    &device_config,
                    move |data: &[f32], _| {
                        if let Ok(mut buf) = buffer.lock() {
                            downmix_into(&mut buf, data, channels, |sample| sample);
                        }
                    },
                    err_fn,
                    None,
                )?
            }
            SampleFormat::I16 => {
                let buffer = buffer.clone();
                self.device.build_input_stream(
                    &device_config,
                    move |data: &[i16], _| {
                        if let Ok(mut buf) = buffer.lock() {
                            downmix_into(&mut buf, data, channels, |sample| {
                                sample as f32 / 32_768.0_f32
                            });
                        }
                    },
                    err_fn,
                    None,
                )?
            }
            SampleFormat::U16 => {
                let buffer = buffer.clone();
                self.device.build_input_stream(
                    &device_config,
                    move |data: &[u16], _| {
                        if let Ok(mut buf) = buffer.lock() {
                            downmix_into(&mut buf, data, channels, |sample| {
                                (sample as f32 - 32_768.0_f32) / 32_768.0_f32
                            });
                        }
                    },
                    err_fn,
                    None,
                )?
            }
            other => return Err(anyhow!("unsupported sample format: {other:?}")),
        };

        stream.play()?;
        let started = Instant::now();
        let meter_window = (device_rate * METER_WINDOW_MS / 1000).max(1) as usize;

        loop {
            std::thread::sleep(POLL_INTERVAL);
            if started.elapsed() >= max_duration {
                break;
            }
            if let Some(ref flag) = stop_flag {
                if flag.load(Ordering::Relaxed) {
                    break;
                }
            }
            if let Some(ref meter) = meter {
                if let Ok(buf) = buffer.lock() {
                    let tail_start = buf.len().saturating_sub(meter_window);
                    meter.set_db(rms_db(&buf[tail_start..]));
                }
            }
        }
        let duration_secs = started.elapsed().as_secs_f64();

        if let Err(err) = stream.pause() {
            log_debug(&format!("failed to pause audio stream: {err}"));
        }
        drop(stream);
        if let Some(ref meter) = meter {
            meter.set_db(-60.0);
        }

        let samples = buffer
            .lock()
            .map_err(|_| anyhow!("audio buffer lock poisoned"))?;
        if samples.is_empty() {
            return Err(anyhow!(
                "no samples captured from '{device_name}'; check microphone permissions and availability. {}",
                mic_permission_hint()
            ));
        }

        let samples = resample_to_rate(&samples, device_rate, target_rate);
        Ok(Capture {
            samples,
            duration_secs,
        })
    }
}

/// Downmix interleaved multi-channel input to mono while applying `convert`,
/// so STT receives one channel regardless of the microphone layout.
pub(crate) fn downmix_into<T, F>(buf: &mut Vec<f32>, data: &[T], channels: usize, mut convert: F)
where
    T: Copy,
    F: FnMut(T) -> f32,
{
    if channels <= 1 {
        buf.extend(data.iter().copied().map(&mut convert));
        return;
    }
    let mut acc = 0.0f32;
    let mut count = 0usize;
    for sample in data.iter().copied() {
        acc += convert(sample);
        count += 1;
        if count == channels {
            buf.push(acc / channels as f32);
            acc = 0.0;
            count = 0;
        }
    }
    if count > 0 {
        buf.push(acc / count as f32);
    }
}

fn mic_permission_hint() -> &'static str {
    #[cfg(target_os = "macos")]
    {
        "macOS: System Settings > Privacy & Security > Microphone (enable your terminal)."
    }
    #[cfg(target_os = "linux")]
    {
        "Linux: check PipeWire/PulseAudio permissions and ensure the device is not muted."
    }
    #[cfg(target_os = "windows")]
    {
        "Windows: Settings > Privacy & Security > Microphone (allow access for your terminal)."
    }
    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        "Check OS microphone permissions."
    }
}

#[cfg(test)]
pub(super) use downmix_into as downmix_into_for_tests;
