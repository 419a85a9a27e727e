//! Testing utilities and mock implementations
//!
//! This module provides mock implementations for testing quote sessions
//! without a running directory backend.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
