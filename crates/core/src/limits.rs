//! Address length budget
//!
//! A committed address must never exceed the configured maximum length.
//! The limit is measured in characters, matching how browsers and proxies
//! advertise URL limits. Violations are not errors: the write path checks
//! the budget before installing anything and turns a violation into a
//! warned no-op.

use thiserror::Error;

/// Default maximum address length in characters
pub const DEFAULT_MAX_URL_LENGTH: usize = 2000;

/// Length budget for committed addresses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum full-address length in characters (default: 2000)
    pub max_url_length: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_url_length: DEFAULT_MAX_URL_LENGTH,
        }
    }
}

impl Limits {
    /// Create a budget with a custom maximum address length
    pub fn with_max_url_length(max_url_length: usize) -> Self {
        Limits { max_url_length }
    }

    /// Validate a candidate address against the budget
    pub fn validate_href(&self, href: &str) -> Result<(), LimitError> {
        let actual = href.chars().count();
        if actual > self.max_url_length {
            return Err(LimitError::AddressTooLong {
                actual,
                max: self.max_url_length,
            });
        }
        Ok(())
    }
}

/// Length budget violations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LimitError {
    /// Candidate address exceeds the configured maximum length
    #[error("address length {actual} exceeds maximum allowed {max}")]
    AddressTooLong {
        /// Candidate address length in characters
        actual: usize,
        /// Configured maximum
        max: usize,
    },
}
