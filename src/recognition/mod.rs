//! Speech recognition behind a provider fallback chain.
//!
//! Each provider captures an answer and returns the recognized text;
//! progress flows to the UI as [`RecognitionEvent`]s on a crossbeam
//! channel. The chain tries providers in configuration order and the
//! first success wins. A provider failure is a warning, not a fatal
//! error, as long as another provider remains.

mod cloud;
mod mock;
mod native;

pub use cloud::CloudProvider;
pub use mock::MockProvider;
pub use native::NativeProvider;

use crate::config::{AppConfig, ProviderKind};
use crate::log_debug;
use anyhow::{anyhow, Result};
use crossbeam_channel::Sender;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Progress emitted while an answer is being captured and recognized.
#[derive(Debug, Clone, PartialEq)]
pub enum RecognitionEvent {
    /// Partial hypothesis; each one replaces the previous.
    Interim(String),
    /// Recognized answer, emitted exactly once on success.
    Final { text: String, duration_secs: f64 },
    /// Non-fatal trouble (a provider fell over, the mic is quiet).
    Warning(String),
}

/// Shared handle the caller uses to end a capture early. Cloning is cheap;
/// all clones observe the same stop flag.
#[derive(Debug, Clone)]
pub struct CaptureControl {
    stop: Arc<AtomicBool>,
    max_duration: Duration,
}

impl CaptureControl {
    pub fn new(max_duration: Duration) -> Self {
        Self {
            stop: Arc::new(AtomicBool::new(false)),
            max_duration,
        }
    }

    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::SeqCst);
    }

    pub fn stop_requested(&self) -> bool {
        self.stop.load(Ordering::SeqCst)
    }

    pub fn max_duration(&self) -> Duration {
        self.max_duration
    }

    pub(crate) fn stop_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }
}

/// One recognized answer.
#[derive(Debug, Clone, PartialEq)]
pub struct Recognition {
    pub text: String,
    pub duration_secs: f64,
}

/// A single way of turning a spoken answer into text. Implementations block
/// until the capture window closes, emitting events as they go.
pub trait SpeechProvider: Send {
    fn name(&self) -> &'static str;

    fn recognize(
        &self,
        control: &CaptureControl,
        events: &Sender<RecognitionEvent>,
    ) -> Result<Recognition>;
}

/// Ordered providers; the first one that produces text wins.
pub struct ProviderChain {
    providers: Vec<Box<dyn SpeechProvider>>,
}

impl ProviderChain {
    /// Build the chain the configuration asks for. Ordering comes from
    /// [`AppConfig::provider_order`]: native first, cloud when an endpoint is
    /// configured, mock last unless disabled.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let mut providers: Vec<Box<dyn SpeechProvider>> = Vec::new();
        for kind in config.provider_order() {
            match kind {
                ProviderKind::Native => {
                    providers.push(Box::new(NativeProvider::from_config(config)))
                }
                ProviderKind::Cloud => {
                    providers.push(Box::new(CloudProvider::from_config(config)?))
                }
                ProviderKind::Mock => providers.push(Box::new(MockProvider::new())),
            }
        }
        if providers.is_empty() {
            return Err(anyhow!("no speech providers configured"));
        }
        Ok(Self { providers })
    }

    #[cfg(test)]
    pub(crate) fn from_providers(providers: Vec<Box<dyn SpeechProvider>>) -> Self {
        Self { providers }
    }

    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Run providers in order until one succeeds. Failures are surfaced as
    /// `Warning` events and logged; the final success additionally emits a
    /// `Final` event so channel consumers see the transcript too.
    pub fn recognize(
        &self,
        control: &CaptureControl,
        events: &Sender<RecognitionEvent>,
    ) -> Result<Recognition> {
        let mut last_err: Option<anyhow::Error> = None;
        for provider in &self.providers {
            log_debug(&format!("trying speech provider: {}", provider.name()));
            match provider.recognize(control, events) {
                Ok(recognition) => {
                    log_debug(&format!(
                        "speech provider {} recognized {} chars in {:.1}s",
                        provider.name(),
                        recognition.text.len(),
                        recognition.duration_secs
                    ));
                    let _ = events.send(RecognitionEvent::Final {
                        text: recognition.text.clone(),
                        duration_secs: recognition.duration_secs,
                    });
                    return Ok(recognition);
                }
                Err(err) => {
                    tracing::warn!(
                        provider = provider.name(),
                        error = %format!("{err:#}"),
                        "speech provider failed, trying next"
                    );
                    log_debug(&format!(
                        "speech provider {} failed: {err:#}",
                        provider.name()
                    ));
                    let _ = events.send(RecognitionEvent::Warning(format!(
                        "{} speech recognition unavailable: {err:#}",
                        provider.name()
                    )));
                    last_err = Some(err.context(format!(
                        "{} speech provider failed",
                        provider.name()
                    )));
                }
            }
        }
        Err(last_err.unwrap_or_else(|| anyhow!("no speech providers configured")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    struct ScriptedProvider {
        name: &'static str,
        result: std::result::Result<&'static str, &'static str>,
    }

    impl SpeechProvider for ScriptedProvider {
        fn name(&self) -> &'static str {
            self.name
        }

        fn recognize(
            &self,
            _control: &CaptureControl,
            _events: &Sender<RecognitionEvent>,
        ) -> Result<Recognition> {
            match self.result {
                Ok(text) => Ok(Recognition {
                    text: text.to_string(),
                    duration_secs: 1.0,
                }),
                Err(msg) => Err(anyhow!(msg)),
            }
        }
    }

    #[test]
    fn first_success_wins_and_emits_final() {
        crate::logging::set_logging_for_tests(false, false);
        let chain = ProviderChain::from_providers(vec![
            Box::new(ScriptedProvider {
                name: "native",
                result: Err("model missing"),
            }),
            Box::new(ScriptedProvider {
                name: "mock",
                result: Ok("hello"),
            }),
        ]);
        let (tx, rx) = unbounded();
        let control = CaptureControl::new(Duration::from_secs(5));
        let recognition = chain.recognize(&control, &tx).unwrap();
        assert_eq!(recognition.text, "hello");

        let events: Vec<_> = rx.try_iter().collect();
        assert!(matches!(events[0], RecognitionEvent::Warning(_)));
        assert!(matches!(
            events[1],
            RecognitionEvent::Final { ref text, .. } if text == "hello"
        ));
    }

    #[test]
    fn all_failures_return_last_error() {
        crate::logging::set_logging_for_tests(false, false);
        let chain = ProviderChain::from_providers(vec![
            Box::new(ScriptedProvider {
                name: "native",
                result: Err("model missing"),
            }),
            Box::new(ScriptedProvider {
                name: "cloud",
                result: Err("timeout"),
            }),
        ]);
        let (tx, _rx) = unbounded();
        let control = CaptureControl::new(Duration::from_secs(5));
        let err = chain.recognize(&control, &tx).unwrap_err();
        assert!(format!("{err:#}").contains("timeout"));
    }

    #[test]
    fn capture_control_clones_share_the_stop_flag() {
        let control = CaptureControl::new(Duration::from_secs(5));
        let clone = control.clone();
        assert!(!clone.stop_requested());
        control.request_stop();
        assert!(clone.stop_requested());
    }
}
