//! Transport layer for backend communication
//!
//! Both the directory client and the quote submitter talk to the same backend
//! through [`HttpTransport`].

pub mod http;

pub use http::HttpTransport;
