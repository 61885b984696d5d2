//! Microphone capture for the speech providers.
//!
//! Audio is captured via CPAL, downmixed to mono, and resampled to the
//! pipeline's target rate (16 kHz by default, Whisper's expected format).
//! Capture stops on the shared stop flag or when the time budget runs out;
//! the stream is dropped before the samples are handed back, so stopping
//! always releases the device.

mod level;
mod recorder;
mod resample;
#[cfg(test)]
mod tests;

pub use level::LevelMeter;
pub use recorder::{Capture, Recorder};
pub use resample::resample_to_rate;
