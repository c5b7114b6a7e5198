//! The `utils` module provides a collection of utility functions and common
//! definitions used across the `smokelink` crate.
//!
//! It centralizes the error types returned by the client and the tracing
//! subscriber setup shared by the binary and the tests.

pub mod error;
pub mod logging;

pub use error::{MalformedFrame, PubSubError, Result};

#[cfg(test)]
mod tests;
