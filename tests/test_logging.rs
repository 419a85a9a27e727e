//! Tests for logging configuration and format parsing
//!
//! Tests the pure functions in the logging module that turn environment
//! variable values into logging configuration.

use tracing::Level;
use tucarga::observability::logging::{init_logging, parse_level, parse_span_flag, LogFormat};

#[test]
fn test_log_format_parse_json() {
    assert_eq!(LogFormat::parse("json"), LogFormat::Json);
    assert_eq!(LogFormat::parse("JSON"), LogFormat::Json);
    assert_eq!(LogFormat::parse("  json\n"), LogFormat::Json);
}

#[test]
fn test_log_format_parse_pretty() {
    assert_eq!(LogFormat::parse("pretty"), LogFormat::Pretty);
    assert_eq!(LogFormat::parse("Pretty"), LogFormat::Pretty);
}

#[test]
fn test_log_format_unknown_defaults_to_compact() {
    // A terminal tool defaults to the terminal-friendly format
    for value in ["compact", "", "xml", "123", "\tyaml"] {
        assert_eq!(LogFormat::parse(value), LogFormat::Compact, "value: {value:?}");
    }
}

#[test]
fn test_log_level_parsing() {
    assert_eq!(parse_level("error"), Level::ERROR);
    assert_eq!(parse_level("INFO"), Level::INFO);
    assert_eq!(parse_level(" debug "), Level::DEBUG);
    assert_eq!(parse_level("trace"), Level::TRACE);
}

#[test]
fn test_log_level_defaults_to_warn() {
    assert_eq!(parse_level(""), Level::WARN);
    assert_eq!(parse_level("verbose"), Level::WARN);
}

#[test]
fn test_span_flag() {
    assert!(parse_span_flag("true"));
    assert!(parse_span_flag("TRUE "));
    assert!(!parse_span_flag("1"));
    assert!(!parse_span_flag(""));
}

#[test]
fn test_init_logging_twice_does_not_panic() {
    init_logging(Level::INFO, LogFormat::Json, false);
    init_logging(Level::DEBUG, LogFormat::Compact, true);
    tracing::info!("logging initialised");
}
