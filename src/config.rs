//! Configuration for the tucarga client
//!
//! Loaded from a TOML file; every field has a default so an empty file (or no
//! file at all) yields a working local-development configuration.
//!
//! ```toml
//! [directory]
//! base_url = "http://127.0.0.1:8000"
//! timeout_ms = 5000
//! retry_attempts = 3
//!
//! [quote]
//! obj_type = "expo"
//! success_route = "/cotizar/exito"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Environment variable overriding `directory.base_url`
pub const DIRECTORY_URL_ENV: &str = "TUCARGA_DIRECTORY_URL";

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TucargaConfig {
    #[serde(default)]
    pub directory: DirectorySection,
    #[serde(default)]
    pub quote: QuoteSection,
}

/// Directory API connection settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DirectorySection {
    /// Base URL of the backend, without the `/directory` prefix
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Extra attempts for directory lookups after a transient failure
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: usize,
}

impl Default for DirectorySection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            retry_attempts: default_retry_attempts(),
        }
    }
}

impl DirectorySection {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Quote submission settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuoteSection {
    /// Quote type sent as `obj_type`
    #[serde(default = "default_obj_type")]
    pub obj_type: String,
    /// Route the form navigates to after a successful submission
    #[serde(default = "default_success_route")]
    pub success_route: String,
}

impl Default for QuoteSection {
    fn default() -> Self {
        Self {
            obj_type: default_obj_type(),
            success_route: default_success_route(),
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_timeout_ms() -> u64 {
    5000
}

fn default_retry_attempts() -> usize {
    3
}

fn default_obj_type() -> String {
    "expo".to_string()
}

fn default_success_route() -> String {
    "/cotizar/exito".to_string()
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("Invalid base URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl TucargaConfig {
    /// Load configuration from a TOML file, applying environment overrides
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text, applying environment overrides
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let mut config: TucargaConfig = toml::from_str(content)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Built-in defaults with environment overrides applied
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(DIRECTORY_URL_ENV) {
            if !url.trim().is_empty() {
                self.directory.base_url = url.trim().to_string();
            }
        }
    }

    /// Check that the configuration is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.directory.base_url).map_err(|source| {
            ConfigError::InvalidUrl {
                url: self.directory.base_url.clone(),
                source,
            }
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidConfig(format!(
                "directory.base_url must use http or https, got '{}'",
                url.scheme()
            )));
        }

        if self.directory.timeout_ms == 0 {
            return Err(ConfigError::InvalidConfig(
                "directory.timeout_ms must be greater than zero".to_string(),
            ));
        }

        if self.quote.obj_type.trim().is_empty() {
            return Err(ConfigError::InvalidConfig(
                "quote.obj_type must not be empty".to_string(),
            ));
        }

        if !self.quote.success_route.starts_with('/') {
            return Err(ConfigError::InvalidConfig(format!(
                "quote.success_route must start with '/', got '{}'",
                self.quote.success_route
            )));
        }

        Ok(())
    }
}
