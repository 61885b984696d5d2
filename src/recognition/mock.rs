//! Mock recognition: the last rung of the fallback chain. Keeps the rest of
//! the pipeline usable on machines with no model and no cloud endpoint by
//! synthesizing a canned answer, streamed as interim hypotheses while the
//! capture window is open.

use super::{CaptureControl, Recognition, RecognitionEvent, SpeechProvider};
use crate::log_debug;
use anyhow::Result;
use crossbeam_channel::Sender;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

const MOCK_TRANSCRIPTS: &[&str] = &[
    "I have extensive experience with React and TypeScript, having worked on several enterprise-scale applications over the past few years.",
    "I approach debugging by first reproducing the issue, then using browser dev tools and logging to trace the problem. I also isolate components when needed for more complex issues.",
    "My strengths include technical problem-solving, clear communication, and adaptability to new technologies and situations.",
];

const POLL_INTERVAL: Duration = Duration::from_millis(50);
/// How often another chunk of the canned answer appears as an interim event.
const CHUNK_INTERVAL: Duration = Duration::from_millis(600);
const CHUNK_WORDS: usize = 3;

pub struct MockProvider {
    pinned_index: Option<usize>,
}

impl MockProvider {
    /// Rotates through the canned answers based on wall-clock time, so
    /// repeated runs do not always practice against the same transcript.
    pub fn new() -> Self {
        Self { pinned_index: None }
    }

    #[cfg(test)]
    pub(crate) fn with_index(index: usize) -> Self {
        Self {
            pinned_index: Some(index),
        }
    }

    fn transcript(&self) -> &'static str {
        let index = match self.pinned_index {
            Some(index) => index,
            None => {
                let millis = SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map(|d| d.as_millis())
                    .unwrap_or(0);
                (millis % MOCK_TRANSCRIPTS.len() as u128) as usize
            }
        };
        MOCK_TRANSCRIPTS[index % MOCK_TRANSCRIPTS.len()]
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SpeechProvider for MockProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn recognize(
        &self,
        control: &CaptureControl,
        events: &Sender<RecognitionEvent>,
    ) -> Result<Recognition> {
        let text = self.transcript();
        let words: Vec<&str> = text.split_whitespace().collect();
        log_debug("mock stt: no real transcription will occur");
        let _ = events.send(RecognitionEvent::Warning(
            "using mock speech recognition; no real transcription will occur".to_string(),
        ));

        let started = Instant::now();
        let mut revealed = 0usize;
        while !control.stop_requested() && started.elapsed() < control.max_duration() {
            let due = (started.elapsed().as_millis() / CHUNK_INTERVAL.as_millis()) as usize
                * CHUNK_WORDS;
            if due > revealed && revealed < words.len() {
                revealed = due.min(words.len());
                let _ = events.send(RecognitionEvent::Interim(words[..revealed].join(" ")));
            }
            std::thread::sleep(POLL_INTERVAL);
        }

        Ok(Recognition {
            text: text.to_string(),
            duration_secs: started.elapsed().as_secs_f64(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    #[test]
    fn pinned_mock_returns_canned_transcript_immediately_on_stop() {
        crate::logging::set_logging_for_tests(false, false);
        let provider = MockProvider::with_index(1);
        let control = CaptureControl::new(Duration::from_secs(30));
        control.request_stop();
        let (tx, rx) = unbounded();
        let recognition = provider.recognize(&control, &tx).unwrap();
        assert_eq!(recognition.text, MOCK_TRANSCRIPTS[1]);
        assert!(recognition.duration_secs < 1.0);
        // The unconditional warning still arrives.
        assert!(rx
            .try_iter()
            .any(|event| matches!(event, RecognitionEvent::Warning(_))));
    }

    #[test]
    fn rotation_index_always_lands_in_range() {
        for _ in 0..10 {
            let provider = MockProvider::new();
            assert!(MOCK_TRANSCRIPTS.contains(&provider.transcript()));
        }
    }
}
