//! intervox entrypoint: capture (or load) an interview answer, score it, and
//! print the report.
//!
//! Recording runs the speech-provider fallback chain on a worker thread while
//! this thread drains recognition events for live display. Pressing Enter
//! ends the capture window early; otherwise it closes at --seconds.

mod report;

use anyhow::{Context, Result};
use intervox::analysis::{AnalysisResult, Analyzer};
use intervox::audio::Recorder;
use intervox::config::AppConfig;
use intervox::questions::QuestionBank;
use intervox::recognition::{CaptureControl, ProviderChain};
use intervox::semantic::HttpSemanticClient;
use intervox::{
    init_observability, log_debug, log_debug_content, log_panic, RecognitionJob, SessionMessage,
    Transcript, TranscriptSession,
};
use std::io::{self, BufRead, Write};
use std::time::Duration;

fn main() -> Result<()> {
    let config = AppConfig::parse_args()?;
    init_observability(&config);
    install_panic_hook();

    if config.list_input_devices {
        return list_input_devices();
    }

    let question = resolve_question(&config)?;
    let tuning = config.load_tuning()?;
    let semantic = build_semantic(&config)?;
    let mut analyzer = Analyzer::new(&tuning);
    if let Some(client) = &semantic {
        analyzer = analyzer.with_semantic(client);
    }

    let result: AnalysisResult = match offline_transcript(&config)? {
        Some(text) => analyzer.analyze(&text, &question),
        None => {
            let transcript = record_answer(&config, &question)?;
            analyzer.analyze_with_duration(&transcript.text, &question, transcript.duration_secs)
        }
    };

    if config.json {
        let json = serde_json::to_string_pretty(&result)
            .context("serializing the analysis report")?;
        println!("{json}");
    } else {
        print!("{}", report::render(&question, &result));
    }
    Ok(())
}

fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        log_panic(info);
        previous(info);
    }));
}

fn list_input_devices() -> Result<()> {
    let devices = Recorder::list_devices()?;
    if devices.is_empty() {
        println!("No audio input devices detected.");
        return Ok(());
    }
    println!("Audio input devices:");
    for device in devices {
        println!("  {device}");
    }
    Ok(())
}

fn resolve_question(config: &AppConfig) -> Result<String> {
    if let Some(question) = &config.question {
        return Ok(question.trim().to_string());
    }
    let mut bank = QuestionBank::new();
    for question in &config.add_questions {
        bank.add(question)?;
    }
    Ok(bank.get(config.question_index)?.to_string())
}

fn build_semantic(config: &AppConfig) -> Result<Option<HttpSemanticClient>> {
    match &config.semantic_endpoint {
        Some(endpoint) => {
            let client = HttpSemanticClient::new(
                endpoint,
                Duration::from_millis(config.semantic_timeout_ms),
            )?;
            Ok(Some(client))
        }
        None => Ok(None),
    }
}

/// Transcript supplied on the command line instead of recorded.
fn offline_transcript(config: &AppConfig) -> Result<Option<String>> {
    if let Some(text) = &config.transcript_text {
        return Ok(Some(text.clone()));
    }
    if let Some(path) = &config.transcript_file {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading transcript file {}", path.display()))?;
        return Ok(Some(text));
    }
    Ok(None)
}

fn record_answer(config: &AppConfig, question: &str) -> Result<Transcript> {
    let chain = ProviderChain::from_config(config)?;
    log_debug(&format!(
        "speech provider order: {}",
        chain.provider_names().join(" -> ")
    ));

    let control = CaptureControl::new(Duration::from_millis(config.max_capture_ms()));
    let stop_control = control.clone();
    let job = RecognitionJob::spawn(chain, control, config.channel_capacity)?;

    println!("Question: {question}");
    println!(
        "Recording... press Enter to finish (auto-stop after {}s).",
        config.seconds
    );
    // Detached on purpose: stdin has no portable non-blocking read, and the
    // process exits right after the report anyway.
    std::thread::spawn(move || {
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line).is_ok() {
            stop_control.request_stop();
        }
    });

    let mut session = TranscriptSession::new();
    let mut previewing = false;
    for event in job.events().iter() {
        match session.apply(event) {
            SessionMessage::Preview(text) => {
                print!("\r  {text}");
                let _ = io::stdout().flush();
                previewing = true;
            }
            SessionMessage::Notice(message) => {
                if previewing {
                    println!();
                    previewing = false;
                }
                eprintln!("warning: {message}");
            }
            SessionMessage::Recognized(_) => {
                if previewing {
                    println!();
                    previewing = false;
                }
            }
        }
    }
    if previewing {
        println!();
    }

    // The worker already sent every event; join surfaces the chain error
    // when no provider produced a transcript.
    job.join()?;
    let transcript = session.finalize();
    log_debug_content(&format!(
        "final transcript ({:.1}s): {}",
        transcript.duration_secs, transcript.text
    ));
    Ok(transcript)
}
