//! Error types for the query-string driver
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait
//! implementations.
//!
//! The propagation policy lives with the types: read operations never
//! surface these (see [`read_or_default`]), write operations fail loud with
//! [`Error::OperationFailed`] wrapping the cause, and the address length
//! gate is deliberately not an error at all: an oversized write is a
//! warned no-op, reported through the write path's outcome type.

use thiserror::Error;

/// Result type alias for driver operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the query-string driver
#[derive(Debug, Error)]
pub enum Error {
    /// Address resolution needs a live environment that is not present
    #[error("environment unavailable: {0}")]
    EnvironmentUnavailable(String),

    /// An explicitly configured address string cannot be parsed.
    /// The message carries the offending string.
    #[error("invalid address: {url} ({reason})")]
    InvalidAddress {
        /// The configured address that failed to parse
        url: String,
        /// What the parser rejected
        reason: String,
    },

    /// A write operation failed in the resolve/decode/encode pipeline.
    /// Carries the original cause.
    #[error("{message}: {cause}")]
    OperationFailed {
        /// Which operation failed ("Failed to set item", ...)
        message: String,
        /// The underlying failure
        #[source]
        cause: Box<Error>,
    },
}

impl Error {
    /// Wrap a pipeline failure in a write-operation error
    pub fn operation_failed(message: impl Into<String>, cause: Error) -> Error {
        Error::OperationFailed {
            message: message.into(),
            cause: Box::new(cause),
        }
    }
}

/// Fail-soft combinator for the read path.
///
/// Every read operation swallows internal failures and reports its empty
/// result instead. Expressing that once here keeps the policy visible and
/// testable rather than scattered across call sites.
pub fn read_or_default<T: Default>(result: Result<T>) -> T {
    result.unwrap_or_default()
}
