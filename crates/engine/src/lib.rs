//! State-synchronization engine for the urlstate query-string driver
//!
//! This crate owns the pipeline behind every storage operation: resolve the
//! current address ([`AddressResolver`]), decode its query, extract the
//! namespace subtree ([`scoped_data`]), apply key mutations
//! ([`KeyOperations`]), re-encode, enforce the length budget and publish
//! ([`AddressUpdater`]). The [`QueryStringDriver`] facade assembles the
//! pieces behind the `StorageDriver` contract.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod address;
pub mod driver;
pub mod environment;
pub mod operations;
pub mod resolver;
pub mod scope;
pub mod update;

pub use address::{Address, AddressParseError};
pub use driver::{DriverOptions, QueryStringDriver, DRIVER_NAME};
pub use environment::MemoryEnvironment;
pub use operations::KeyOperations;
pub use resolver::AddressResolver;
pub use scope::scoped_data;
pub use update::{AddressUpdater, UpdateOutcome};

// Re-export the core surface alongside the engine types, so the facade
// crate (and most callers) only need one import path.
pub use urlstate_core::{
    Environment, Error, HistoryMethod, KeyPath, LimitError, Limits, QueryMapping, Result,
    StorageDriver, Value, DEFAULT_MAX_URL_LENGTH,
};
