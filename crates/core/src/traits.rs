//! Core traits: the storage contract and the host environment seam
//!
//! This module defines the two boundaries of the system. `StorageDriver` is
//! the uniform key-value contract the engine plugs into; `Environment` is
//! the host seam through which the engine observes a live address and
//! publishes navigation. Swapping either implementation must not break the
//! layers above.

use crate::error::Result;
use crate::value::Value;
use serde::{Deserialize, Serialize};

/// How a committed address is published into session history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HistoryMethod {
    /// Create a new history entry
    #[default]
    PushState,
    /// Overwrite the current history entry
    ReplaceState,
}

/// Host environment seam
///
/// A live context (a browser window, an embedded webview) implements this to
/// expose its current address and accept navigation. Headless contexts have
/// no environment; engines configured with an explicit address never need
/// one for navigation.
///
/// Thread safety: implementations must be safe to call concurrently
/// (requires Send + Sync), since a driver may be shared behind `Arc`.
pub trait Environment: Send + Sync {
    /// The context's current full address, if it has one
    fn current_address(&self) -> Option<String>;

    /// The context's origin (`scheme://authority`), used to complete
    /// relative configured addresses
    fn origin(&self) -> Option<String>;

    /// Publish a navigation to `href` using `method`
    fn navigate(&self, method: HistoryMethod, href: &str);
}

/// Uniform storage contract
///
/// The driver surface every storage backend presents: existence checks,
/// typed and raw reads, writes, key listing, clearing, and disposal. Reads
/// never fail: any internal failure maps to the operation's empty result.
/// Writes fail loud, except the address length gate which is a warned no-op.
///
/// All operations complete synchronously; the contract's asynchronous shape
/// in other ecosystems exists for interface compatibility only.
pub trait StorageDriver: Send + Sync {
    /// Stable identifier for this driver kind
    fn name(&self) -> &'static str;

    /// True iff `key` exists. Failures report `false`.
    fn has_item(&self, key: &str) -> bool;

    /// The revived value at `key`, or `None` if absent. Failures report
    /// `None`.
    fn get_item(&self, key: &str) -> Option<Value>;

    /// The value at `key` coerced to its literal string form. Failures
    /// report `None`.
    fn get_item_raw(&self, key: &str) -> Option<String>;

    /// Store `value` at `key`. A `Null` value behaves like `remove_item`.
    fn set_item(&self, key: &str, value: Value) -> Result<()>;

    /// Store the exact string at `key`, without interpretation.
    fn set_item_raw(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`.
    fn remove_item(&self, key: &str) -> Result<()>;

    /// Top-level key names. Failures report an empty vec.
    fn get_keys(&self) -> Vec<String>;

    /// Remove every key this instance is allowed to touch.
    fn clear(&self) -> Result<()>;

    /// Completion signal; this driver holds no resources to release.
    fn dispose(&self) -> Result<()> {
        Ok(())
    }
}
