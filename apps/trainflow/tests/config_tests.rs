//! Tests for trainflow.toml loading and validation.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use std::io::Write;
use std::path::Path;
use trainflow::config::{Config, DEFAULT_LOG_FILTER, LogFormat, resolve_path};
use trainflow_core::{RetakePolicy, TrainflowError};

// =============================================================================
// DEFAULTS
// =============================================================================

#[test]
fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.exam.passing_score_percent, 70);
    assert_eq!(config.exam.max_attempts, None);
    assert_eq!(config.generation.tick_ms, 100);
    assert_eq!(config.generation.step_percent, 2);
    assert_eq!(config.logging.filter, DEFAULT_LOG_FILTER);
    assert_eq!(config.logging.format, LogFormat::Text);
    assert_eq!(config.retake_policy(), RetakePolicy::unlimited());
    assert!(config.validate().is_ok());
}

#[test]
fn test_empty_document_is_default() {
    let config = Config::from_toml_str("").unwrap();
    assert_eq!(config, Config::default());
}

// =============================================================================
// PARSING
// =============================================================================

#[test]
fn test_partial_sections_keep_other_defaults() {
    let config = Config::from_toml_str(
        r#"
[exam]
max_attempts = 3

[logging]
format = "json"
"#,
    )
    .unwrap();

    assert_eq!(config.exam.passing_score_percent, 70);
    assert_eq!(config.retake_policy(), RetakePolicy::limited(3));
    assert_eq!(config.logging.format, LogFormat::Json);
    assert_eq!(config.generation.step_percent, 2);
}

#[test]
fn test_from_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        "[exam]\npassing_score_percent = 80\n\n[generation]\ntick_ms = 20\nstep_percent = 5"
    )
    .unwrap();

    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.exam.passing_score_percent, 80);
    assert_eq!(config.generation.tick_ms, 20);
    assert_eq!(config.generation.period().as_millis(), 20);
    assert_eq!(config.generation.step_percent, 5);
}

#[test]
fn test_explicit_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");
    let err = Config::load(Some(missing.as_path())).unwrap_err();
    assert!(matches!(err, TrainflowError::IoError(_)));
}

#[test]
fn test_invalid_toml_is_config_error() {
    let err = Config::from_toml_str("[exam\npassing_score_percent = 70").unwrap_err();
    assert!(matches!(err, TrainflowError::ConfigError(_)));
}

// =============================================================================
// VALIDATION
// =============================================================================

#[test]
fn test_rejects_out_of_range_values() {
    for doc in [
        "[exam]\npassing_score_percent = 101",
        "[exam]\nmax_attempts = 0",
        "[generation]\ntick_ms = 0",
        "[generation]\nstep_percent = 0",
    ] {
        let err = Config::from_toml_str(doc).unwrap_err();
        assert!(matches!(err, TrainflowError::ConfigError(_)), "{doc}");
    }
}

// =============================================================================
// OVERRIDES
// =============================================================================

#[test]
fn test_explicit_path_beats_environment() {
    let explicit = Path::new("a.toml");
    assert_eq!(
        resolve_path(Some(explicit), Some("b.toml")),
        Some(explicit.to_path_buf())
    );
    assert_eq!(resolve_path(None, Some("b.toml")), Some("b.toml".into()));
    assert_eq!(resolve_path(None, Some("")), None);
    assert_eq!(resolve_path(None, None), None);
}

#[test]
fn test_log_format_environment_override() {
    let config = Config::default();
    assert_eq!(config.logging.effective_format(None), LogFormat::Text);
    assert_eq!(config.logging.effective_format(Some("JSON")), LogFormat::Json);
    assert_eq!(config.logging.effective_format(Some("pretty")), LogFormat::Text);
}
