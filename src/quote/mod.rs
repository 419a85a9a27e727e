//! Freight quote form: input, composition, submission
//!
//! ```text
//! QuoteForm --validate/compose--> QuoteRequest --QuoteSubmitter--> backend
//! ```

pub mod form;
pub mod request;
pub mod session;
pub mod submit;

pub use form::{DateParts, FieldError, FormErrors, PhoneParts, QuoteForm};
pub use request::{compose, QuoteRequest};
pub use session::{ContactStatus, FormOptions, HydrationSummary, QuoteSession, SubmissionOutcome};
pub use submit::{HttpQuoteSubmitter, QuoteSubmitter};
