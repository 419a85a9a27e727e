//! Configuration loading and validation tests
//!
//! Tests focus on BEHAVIOR of configuration loading from files. The
//! `TUCARGA_DIRECTORY_URL` override is covered by the unit tests, which can
//! serialize access to the environment.

use std::io::Write;
use tempfile::NamedTempFile;
use tucarga::config::{ConfigError, TucargaConfig};

#[test]
fn test_config_loads_successfully_from_valid_toml() {
    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(
        temp_file,
        r#"
[directory]
base_url = "https://api.tucarga.cl"
timeout_ms = 3000
retry_attempts = 2

[quote]
obj_type = "expo"
success_route = "/cotizar/exito"
"#
    )
    .unwrap();

    let config = TucargaConfig::load_from_file(temp_file.path()).unwrap();

    assert_eq!(config.directory.timeout_ms, 3000);
    assert_eq!(config.directory.retry_attempts, 2);
    assert_eq!(config.quote.obj_type, "expo");
}

#[test]
fn test_partial_config_fills_defaults() {
    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(temp_file, "[quote]\nobj_type = \"impo\"").unwrap();

    let config = TucargaConfig::load_from_file(temp_file.path()).unwrap();

    assert_eq!(config.quote.obj_type, "impo");
    assert_eq!(config.quote.success_route, "/cotizar/exito");
    assert_eq!(config.directory.timeout_ms, 5000);
    assert_eq!(config.directory.retry_attempts, 3);
}

#[test]
fn test_missing_file_is_read_error() {
    let result = TucargaConfig::load_from_file(std::path::Path::new("/nonexistent/tucarga.toml"));
    assert!(matches!(result, Err(ConfigError::FileRead(_))));
}

#[test]
fn test_invalid_toml_is_parse_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(temp_file, "[directory\nbase_url = ").unwrap();

    let result = TucargaConfig::load_from_file(temp_file.path());
    assert!(matches!(result, Err(ConfigError::TomlParse(_))));
}

#[test]
fn test_wrong_field_type_is_parse_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(temp_file, "[directory]\ntimeout_ms = \"fast\"").unwrap();

    let result = TucargaConfig::load_from_file(temp_file.path());
    assert!(matches!(result, Err(ConfigError::TomlParse(_))));
}

#[test]
fn test_config_round_trips_through_toml() {
    let config = TucargaConfig::default();
    let rendered = toml::to_string_pretty(&config).unwrap();
    let parsed: TucargaConfig = toml::from_str(&rendered).unwrap();
    assert_eq!(parsed, config);
}
