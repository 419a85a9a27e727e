//! Error types for directory lookups and quote submission
//!
//! The RUT codec never errors; everything that talks to the backend or reads
//! configuration reports through [`QuoteError`].

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for tucarga operations
#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("Transport error calling {endpoint}: {message}")]
    Transport { endpoint: String, message: String },

    #[error("Request to {endpoint} timed out")]
    Timeout { endpoint: String },

    #[error("{endpoint} responded with status {status}")]
    UnexpectedStatus { endpoint: String, status: StatusCode },

    #[error("Invalid response from {endpoint}: {message}")]
    InvalidResponse { endpoint: String, message: String },

    #[error("Invalid form: {message}")]
    InvalidForm { message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

impl QuoteError {
    /// Create transport error
    pub fn transport<E: Into<String>, M: Into<String>>(endpoint: E, message: M) -> Self {
        Self::Transport {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// Create timeout error
    pub fn timeout<E: Into<String>>(endpoint: E) -> Self {
        Self::Timeout {
            endpoint: endpoint.into(),
        }
    }

    /// Create unexpected status error
    pub fn unexpected_status<E: Into<String>>(endpoint: E, status: StatusCode) -> Self {
        Self::UnexpectedStatus {
            endpoint: endpoint.into(),
            status,
        }
    }

    /// Create invalid response error
    pub fn invalid_response<E: Into<String>, M: Into<String>>(endpoint: E, message: M) -> Self {
        Self::InvalidResponse {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// Create invalid form error
    pub fn invalid_form<S: Into<String>>(message: S) -> Self {
        Self::InvalidForm {
            message: message.into(),
        }
    }
}

/// Result type for tucarga operations
pub type QuoteResult<T> = Result<T, QuoteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructor_messages() {
        let error = QuoteError::transport("/directory/region/", "connection refused");
        assert_eq!(
            error.to_string(),
            "Transport error calling /directory/region/: connection refused"
        );

        let error = QuoteError::timeout("/directory/equipment/");
        assert_eq!(error.to_string(), "Request to /directory/equipment/ timed out");

        let error = QuoteError::invalid_form("contact_email is required");
        assert!(matches!(error, QuoteError::InvalidForm { .. }));
        assert_eq!(error.to_string(), "Invalid form: contact_email is required");
    }

    #[test]
    fn test_unexpected_status_message_includes_code() {
        let error =
            QuoteError::unexpected_status("/directory/freightfirststep/", StatusCode::BAD_REQUEST);
        assert!(error.to_string().contains("400"));
        assert!(error.to_string().contains("freightfirststep"));
    }

    #[test]
    fn test_config_error_converts() {
        let error: QuoteError =
            crate::config::ConfigError::InvalidConfig("timeout_ms must be positive".into()).into();
        assert!(matches!(error, QuoteError::Config(_)));
        assert!(error.to_string().starts_with("Configuration error"));
    }
}
