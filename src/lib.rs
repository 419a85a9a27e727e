//! tucarga - freight quote client
//!
//! Client side of the TuCarga freight-quote flow, plus a Chilean RUT codec.
//!
//! # Overview
//!
//! - [`rut`]: clean, format and validate Chilean national-ID numbers
//! - [`directory`]: dropdown options and contact lookup from the directory API
//! - [`quote`]: quote form validation, request composition and submission
//! - [`config`]: TOML configuration
//! - [`observability`]: structured logging
//!
//! # Quick Start
//!
//! ```rust
//! use tucarga::rut;
//!
//! assert_eq!(rut::format("760864285", ""), "76.086.428-5");
//! assert!(rut::clean_and_validate("76.086.428-5"));
//! assert!(!rut::clean_and_validate("7,012,316-7"));
//! ```
//!
//! Submitting a quote:
//!
//! ```rust,no_run
//! use tucarga::config::TucargaConfig;
//! use tucarga::directory::HttpDirectoryClient;
//! use tucarga::quote::{HttpQuoteSubmitter, QuoteForm, QuoteSession, SubmissionOutcome};
//!
//! # async fn example(form: QuoteForm) -> Result<(), Box<dyn std::error::Error>> {
//! let config = TucargaConfig::from_env()?;
//! let directory = HttpDirectoryClient::new(&config.directory)?;
//! let submitter = HttpQuoteSubmitter::new(&config.directory)?;
//! let mut session = QuoteSession::new(directory, submitter, config.quote.clone());
//!
//! session.hydrate().await;
//! match session.submit(&form).await? {
//!     SubmissionOutcome::Accepted { redirect } => println!("go to {redirect}"),
//!     SubmissionOutcome::Invalid(errors) => eprintln!("fix: {errors}"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod directory;
pub mod error;
pub mod observability;
pub mod quote;
pub mod rut;
pub mod testing;
pub mod transport;

pub use config::{ConfigError, TucargaConfig};
pub use directory::{DirectoryClient, DirectoryEntry, DirectoryList, HttpDirectoryClient};
pub use error::{QuoteError, QuoteResult};
pub use quote::{
    compose, ContactStatus, FormErrors, HttpQuoteSubmitter, QuoteForm, QuoteRequest, QuoteSession,
    QuoteSubmitter, SubmissionOutcome,
};
