use super::{AppConfig, ProviderKind, ScoringTuning};
use clap::Parser;

fn config_from(args: &[&str]) -> AppConfig {
    let mut full = vec!["intervox"];
    full.extend_from_slice(args);
    AppConfig::parse_from(full)
}

#[test]
fn defaults_pass_validation() {
    let mut config = config_from(&[]);
    config.validate().expect("defaults should be valid");
}

#[test]
fn rejects_out_of_range_seconds() {
    let mut config = config_from(&["--seconds", "2"]);
    assert!(config.validate().is_err());
    let mut config = config_from(&["--seconds", "4000"]);
    assert!(config.validate().is_err());
}

#[test]
fn rejects_bad_sample_rate() {
    let mut config = config_from(&["--sample-rate", "1000"]);
    assert!(config.validate().is_err());
}

#[test]
fn rejects_non_http_semantic_endpoint() {
    let mut config = config_from(&["--semantic-endpoint", "ftp://example.com"]);
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("--semantic-endpoint"));
}

#[test]
fn cloud_provider_requires_endpoint() {
    let mut config = config_from(&["--speech-provider", "cloud"]);
    assert!(config.validate().is_err());

    let mut config = config_from(&[
        "--speech-provider",
        "cloud",
        "--cloud-stt-endpoint",
        "https://stt.example.com/transcribe",
    ]);
    config.validate().expect("endpoint satisfies cloud provider");
}

#[test]
fn transcript_sources_are_exclusive() {
    let mut config = config_from(&[
        "--transcript-file",
        "/tmp/answer.txt",
        "--transcript-text",
        "hello",
    ]);
    assert!(config.validate().is_err());
}

#[test]
fn provider_order_skips_cloud_without_endpoint() {
    let config = config_from(&[]);
    assert_eq!(
        config.provider_order(),
        vec![ProviderKind::Native, ProviderKind::Mock]
    );
}

#[test]
fn provider_order_includes_cloud_with_endpoint() {
    let config = config_from(&["--cloud-stt-endpoint", "https://stt.example.com"]);
    assert_eq!(
        config.provider_order(),
        vec![ProviderKind::Native, ProviderKind::Cloud, ProviderKind::Mock]
    );
}

#[test]
fn forced_provider_collapses_chain() {
    let config = config_from(&["--speech-provider", "mock"]);
    assert_eq!(config.provider_order(), vec![ProviderKind::Mock]);
}

#[test]
fn no_mock_fallback_drops_mock() {
    let config = config_from(&["--no-mock-fallback"]);
    assert_eq!(config.provider_order(), vec![ProviderKind::Native]);
}

#[test]
fn default_tuning_is_valid() {
    ScoringTuning::default()
        .validate()
        .expect("shipped thresholds should validate");
}

#[test]
fn tuning_rejects_inverted_bands() {
    let mut tuning = ScoringTuning::default();
    tuning.ideal_wps_min = tuning.ideal_wps_max + 1.0;
    assert!(tuning.validate().is_err());
}

#[test]
fn tuning_rejects_zero_limits() {
    let mut tuning = ScoringTuning::default();
    tuning.max_suggestions = 0;
    assert!(tuning.validate().is_err());
}

#[test]
fn tuning_file_overrides_subset() {
    let dir = std::env::temp_dir();
    let path = dir.join(format!("intervox_tuning_{}.yaml", std::process::id()));
    std::fs::write(&path, "pace_wpm: 130\nmax_suggestions: 3\n").expect("write tuning file");

    let mut config = config_from(&["--tuning-file", path.to_str().expect("utf8 temp path")]);
    config.validate().expect("tuning file should validate");
    let tuning = config.load_tuning().expect("tuning should load");
    assert_eq!(tuning.pace_wpm, 130.0);
    assert_eq!(tuning.max_suggestions, 3);
    assert_eq!(tuning.max_strengths, ScoringTuning::default().max_strengths);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn provider_labels_are_stable() {
    assert_eq!(ProviderKind::Native.label(), "native");
    assert_eq!(ProviderKind::Cloud.label(), "cloud");
    assert_eq!(ProviderKind::Mock.label(), "mock");
}
