//! Observability for the tucarga client
//!
//! Structured logging through `tracing`, with span macros for directory
//! requests and quote submissions.

pub mod logging;

pub use logging::{init_default_logging, init_logging, LogFormat};

// Span macros for structured logging
pub use logging::{directory_span, submission_span};
