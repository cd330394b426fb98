//! Key operations
//!
//! The storage surface, expressed over the scoped mapping: every operation
//! first resolves the current address, decodes its query, and extracts the
//! namespace subtree; writes hand the complete new namespace contents to
//! the [`AddressUpdater`].
//!
//! Reads fail soft (the `read_or_default` policy), writes fail loud with a
//! wrapped cause. The length gate is the exception: a warned no-op inside
//! the updater.

use crate::resolver::AddressResolver;
use crate::scope::scoped_data;
use crate::update::AddressUpdater;
use std::sync::Arc;
use urlstate_core::{
    delete_at_path, get_at_path, path_exists, read_or_default, set_at_path, Error, KeyPath,
    QueryMapping, Result, Value,
};
use urlstate_codec::parse_query;

/// Storage operations over one engine instance's namespace
pub struct KeyOperations {
    resolver: Arc<AddressResolver>,
    updater: AddressUpdater,
    namespace: Option<KeyPath>,
}

/// Interpret a storage key as a path. A key that fails path parsing
/// (unclosed bracket and the like) degrades to one flat key rather than
/// erroring, so the operation surface stays total over arbitrary keys.
fn key_path(key: &str) -> KeyPath {
    key.parse()
        .unwrap_or_else(|_| KeyPath::root().key(key))
}

impl KeyOperations {
    /// Wire the operation surface to a resolver and updater pair
    pub fn new(
        resolver: Arc<AddressResolver>,
        updater: AddressUpdater,
        namespace: Option<KeyPath>,
    ) -> Self {
        KeyOperations {
            resolver,
            updater,
            namespace,
        }
    }

    /// The current namespace contents: resolve, decode, extract
    fn current_contents(&self) -> Result<QueryMapping> {
        let address = self.resolver.resolve()?;
        let mapping = parse_query(address.query());
        Ok(scoped_data(mapping, self.namespace.as_ref()))
    }

    /// True iff `key` exists in the namespace. Failures report `false`.
    pub fn has_item(&self, key: &str) -> bool {
        read_or_default(
            self.current_contents()
                .map(|data| path_exists(&Value::Object(data), &key_path(key))),
        )
    }

    /// The revived value at `key`, or `None` if absent. Failures report
    /// `None`.
    pub fn get_item(&self, key: &str) -> Option<Value> {
        read_or_default(self.current_contents().map(|data| {
            get_at_path(&Value::Object(data), &key_path(key))
                .cloned()
                .map(Value::revive)
        }))
    }

    /// The value at `key` in its literal string form. Failures report
    /// `None`.
    pub fn get_item_raw(&self, key: &str) -> Option<String> {
        self.get_item(key).and_then(|value| value.to_literal())
    }

    /// Store `value` at `key`. A `Null` value behaves like `remove_item`.
    ///
    /// # Errors
    ///
    /// `OperationFailed("Failed to set item", ..)` when the pipeline fails.
    pub fn set_item(&self, key: &str, value: Value) -> Result<()> {
        if value.is_null() {
            return self
                .remove_from_contents(key)
                .map_err(|e| Error::operation_failed("Failed to set item", e));
        }
        self.write_to_contents(key, value.to_wire())
            .map_err(|e| Error::operation_failed("Failed to set item", e))
    }

    /// Store the exact string at `key`, without interpretation. An empty
    /// raw string stores a genuine empty string (`key=` on the wire).
    ///
    /// # Errors
    ///
    /// `OperationFailed("Failed to set raw item", ..)` when the pipeline
    /// fails.
    pub fn set_item_raw(&self, key: &str, value: &str) -> Result<()> {
        self.write_to_contents(key, Value::String(value.to_string()))
            .map_err(|e| Error::operation_failed("Failed to set raw item", e))
    }

    /// Remove `key` from the namespace.
    ///
    /// # Errors
    ///
    /// `OperationFailed("Failed to remove item", ..)` when the pipeline
    /// fails.
    pub fn remove_item(&self, key: &str) -> Result<()> {
        self.remove_from_contents(key)
            .map_err(|e| Error::operation_failed("Failed to remove item", e))
    }

    /// Top-level key names of the namespace, sorted. Failures report an
    /// empty vec.
    pub fn get_keys(&self) -> Vec<String> {
        read_or_default(self.current_contents().map(|data| {
            let mut keys: Vec<String> = data.into_keys().collect();
            keys.sort();
            keys
        }))
    }

    /// Remove every key in the namespace, leaving siblings untouched.
    ///
    /// # Errors
    ///
    /// `OperationFailed("Failed to clear storage", ..)` when the pipeline
    /// fails.
    pub fn clear(&self) -> Result<()> {
        self.updater
            .apply(QueryMapping::new())
            .map(|_| ())
            .map_err(|e| Error::operation_failed("Failed to clear storage", e))
    }

    fn write_to_contents(&self, key: &str, wire_value: Value) -> Result<()> {
        let mut data = Value::Object(self.current_contents()?);
        set_at_path(&mut data, &key_path(key), wire_value);
        self.updater
            .apply(data.into_object().unwrap_or_default())
            .map(|_| ())
    }

    fn remove_from_contents(&self, key: &str) -> Result<()> {
        let mut data = Value::Object(self.current_contents()?);
        delete_at_path(&mut data, &key_path(key));
        self.updater
            .apply(data.into_object().unwrap_or_default())
            .map(|_| ())
    }
}
