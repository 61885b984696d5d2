//! Answer-capture session plumbing.
//!
//! [`RecognitionJob`] runs a provider chain on a worker thread and streams
//! [`RecognitionEvent`]s back over a bounded crossbeam channel.
//! [`TranscriptSession`] folds those events into the transcript the analyzer
//! will score: final segments append in arrival order, interim hypotheses
//! only ever replace a preview line, warnings accumulate for display.

use crate::log_debug;
use crate::recognition::{CaptureControl, ProviderChain, Recognition, RecognitionEvent};
use anyhow::{anyhow, Context, Result};
use crossbeam_channel::{bounded, Receiver};
use std::thread::JoinHandle;

/// What a UI should do in response to one recognition event.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionMessage {
    /// Replace the current in-progress line with this hypothesis.
    Preview(String),
    /// Show once; the capture keeps going.
    Notice(String),
    /// A segment of the answer is settled.
    Recognized(String),
}

/// Finalized answer ready for analysis. Interim previews never end up here.
#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    pub text: String,
    pub duration_secs: f64,
}

/// Recognition running on a worker thread. Dropping the job without joining
/// leaves the worker to finish on its own; `request_stop` ends the capture
/// window early.
pub struct RecognitionJob {
    events: Receiver<RecognitionEvent>,
    control: CaptureControl,
    handle: Option<JoinHandle<Result<Recognition>>>,
}

impl RecognitionJob {
    pub fn spawn(
        chain: ProviderChain,
        control: CaptureControl,
        channel_capacity: usize,
    ) -> Result<Self> {
        let (tx, rx) = bounded(channel_capacity.max(1));
        let worker_control = control.clone();
        let handle = std::thread::Builder::new()
            .name("intervox-recognition".to_string())
            .spawn(move || chain.recognize(&worker_control, &tx))
            .context("spawning recognition worker")?;
        log_debug("recognition job started");
        Ok(Self {
            events: rx,
            control,
            handle: Some(handle),
        })
    }

    /// Event stream; disconnects when the worker finishes.
    pub fn events(&self) -> &Receiver<RecognitionEvent> {
        &self.events
    }

    pub fn request_stop(&self) {
        log_debug("recognition stop requested");
        self.control.request_stop();
    }

    /// Wait for the worker and return what the provider chain produced.
    pub fn join(mut self) -> Result<Recognition> {
        let handle = self
            .handle
            .take()
            .ok_or_else(|| anyhow!("recognition job already joined"))?;
        match handle.join() {
            Ok(result) => result,
            Err(_) => Err(anyhow!("recognition worker panicked")),
        }
    }
}

/// Accumulates recognition events into one transcript.
#[derive(Debug, Default)]
pub struct TranscriptSession {
    segments: Vec<String>,
    duration_secs: f64,
    preview: Option<String>,
    warnings: Vec<String>,
}

impl TranscriptSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one event in; the returned message tells a UI what changed.
    pub fn apply(&mut self, event: RecognitionEvent) -> SessionMessage {
        match event {
            RecognitionEvent::Interim(text) => {
                self.preview = Some(text.clone());
                SessionMessage::Preview(text)
            }
            RecognitionEvent::Final {
                text,
                duration_secs,
            } => {
                self.preview = None;
                self.duration_secs += duration_secs.max(0.0);
                self.segments.push(text.clone());
                SessionMessage::Recognized(text)
            }
            RecognitionEvent::Warning(message) => {
                self.warnings.push(message.clone());
                SessionMessage::Notice(message)
            }
        }
    }

    pub fn preview(&self) -> Option<&str> {
        self.preview.as_deref()
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn has_text(&self) -> bool {
        !self.segments.is_empty()
    }

    /// Join the settled segments in arrival order. Any outstanding preview
    /// is discarded: only finalized text is worth scoring.
    pub fn finalize(self) -> Transcript {
        Transcript {
            text: self.segments.join(" "),
            duration_secs: self.duration_secs,
        }
    }

    /// Discard everything collected so far.
    pub fn cancel(self) {
        drop(self);
    }
}
