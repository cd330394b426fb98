//! urlstate - key-value storage in a URL query string
//!
//! urlstate implements a uniform key-value storage interface whose
//! persistent medium is an address's query string: every write is reflected
//! into the address (and, optionally, session history), and every read
//! reconstructs state from the current address.
//!
//! # Quick Start
//!
//! ```
//! use urlstate::{DriverOptions, QueryStringDriver, StorageDriver, Value};
//!
//! // A managed driver owns its address entirely (no host environment)
//! let driver = QueryStringDriver::new(
//!     DriverOptions::default().with_url("https://example.com/"),
//! );
//!
//! driver.set_item("filter.category", Value::from("books"))?;
//! assert_eq!(driver.get_item("filter.category"), Some(Value::from("books")));
//! # Ok::<(), urlstate::Error>(())
//! ```
//!
//! # Architecture
//!
//! All operations go through the state-synchronization engine: resolve the
//! current address, decode the query into a nested mapping, apply the key
//! mutation within the configured namespace, re-encode, enforce the length
//! budget, and publish through the right channel (history navigation for
//! the live flavor, an internally tracked address for the managed one).

// Re-export the public API from urlstate-engine
pub use urlstate_engine::*;

// The wire codec is part of the public surface: applications that build or
// inspect addresses outside the driver use the same parse/stringify pair.
pub use urlstate_codec::{parse_query, stringify_query};
