//! Core types and traits for the urlstate query-string driver
//!
//! This crate defines the foundational types used throughout the system:
//! - Value: unified value enum for query-string data, with the wire
//!   coercion pair (literal revival and lowering)
//! - KeyPath: dotted/bracket paths into nested query state, with
//!   get/set/delete/exists operations
//! - Error: error type hierarchy and the fail-soft read combinator
//! - Limits: the committed-address length budget
//! - Traits: the `StorageDriver` contract and the `Environment` host seam

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod limits;
pub mod path;
pub mod traits;
pub mod value;

// Re-export commonly used types and traits
pub use error::{read_or_default, Error, Result};
pub use limits::{LimitError, Limits, DEFAULT_MAX_URL_LENGTH};
pub use path::{
    delete_at_path, get_at_path, path_exists, set_at_path, KeyPath, PathParseError, PathSegment,
};
pub use traits::{Environment, HistoryMethod, StorageDriver};
pub use value::{QueryMapping, Value};
