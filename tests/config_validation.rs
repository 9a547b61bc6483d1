//! Integration tests for configuration loading and validation

#![allow(clippy::expect_used, clippy::unwrap_used)]

use tcp_header::config::{CodecConfig, LoggingConfig};
use tcp_header::HeaderError;
use tracing::Level;

#[test]
fn test_default_config_validates() {
    let config = CodecConfig::default();
    let errors = config.validate();
    assert!(
        errors.is_empty(),
        "Default config should be valid, but got errors: {errors:?}"
    );
    assert!(config.zero_copy);
}

#[test]
fn test_empty_app_name() {
    let mut config = CodecConfig::default();
    config.logging.app_name = String::new();

    let errors = config.validate();
    assert!(errors.iter().any(|e| e.contains("cannot be empty")));
    assert!(matches!(
        config.validate_strict(),
        Err(HeaderError::ConfigError(_))
    ));
}

#[test]
fn test_long_app_name() {
    let logging = LoggingConfig {
        app_name: "x".repeat(65),
        ..LoggingConfig::default()
    };
    let errors = logging.validate();
    assert!(errors.iter().any(|e| e.contains("too long")));
}

#[test]
fn test_from_toml() {
    let config = CodecConfig::from_toml(
        r#"
        zero_copy = false

        [logging]
        app_name = "capture-replay"
        log_level = "debug"
        json_format = true
        "#,
    )
    .expect("valid TOML");

    assert!(!config.zero_copy);
    assert_eq!(config.logging.app_name, "capture-replay");
    assert_eq!(config.logging.log_level, Level::DEBUG);
    assert!(config.logging.json_format);
}

#[test]
fn test_from_toml_defaults_missing_sections() {
    let config = CodecConfig::from_toml("").expect("empty TOML uses defaults");
    assert!(config.zero_copy);
    assert_eq!(config.logging.log_level, Level::INFO);
}

#[test]
fn test_invalid_log_level() {
    let result = CodecConfig::from_toml(
        r#"
        [logging]
        app_name = "a"
        log_level = "loud"
        json_format = false
        "#,
    );
    assert!(matches!(result, Err(HeaderError::ConfigError(_))));
}

#[test]
fn test_save_and_load_roundtrip() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("codec.toml");

    let mut config = CodecConfig::default();
    config.zero_copy = false;
    config.logging.log_level = Level::WARN;
    config.save_to_file(&path).expect("save");

    let loaded = CodecConfig::from_file(&path).expect("load");
    assert!(!loaded.zero_copy);
    assert_eq!(loaded.logging.log_level, Level::WARN);
}

#[test]
fn test_missing_file() {
    assert!(matches!(
        CodecConfig::from_file("/nonexistent/codec.toml"),
        Err(HeaderError::ConfigError(_))
    ));
}

#[test]
fn test_example_config_parses() {
    let example = CodecConfig::example_config();
    assert!(example.contains("zero_copy"));
    CodecConfig::from_toml(&example).expect("example config must parse");
}
