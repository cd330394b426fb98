//! Driver facade and configuration
//!
//! [`QueryStringDriver`] wires the resolver, updater and key operations
//! into the [`StorageDriver`] contract. Configuration is immutable per
//! instance: the flavor (managed vs live), namespace, history behavior and
//! length budget are all fixed at construction.

use crate::operations::KeyOperations;
use crate::resolver::AddressResolver;
use crate::update::AddressUpdater;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use urlstate_core::{
    Environment, HistoryMethod, KeyPath, Limits, Result, StorageDriver, Value,
    DEFAULT_MAX_URL_LENGTH,
};

/// Stable driver identifier
pub const DRIVER_NAME: &str = "query-string";

/// Configuration for one driver instance
///
/// `url` selects the managed flavor (an explicit address the engine owns
/// entirely); without it the driver follows the `environment`'s live
/// address. `base` restricts all operations to one subtree of the query.
#[derive(Clone, Serialize, Deserialize)]
pub struct DriverOptions {
    /// Explicit address; absence means "use the live environment"
    pub url: Option<String>,
    /// Namespace path restricting all operations (default: none)
    pub base: Option<String>,
    /// Whether live-flavor writes create history entries (default: true)
    pub update_history: bool,
    /// How history is updated (default: push)
    pub history_method: HistoryMethod,
    /// Maximum committed address length in characters (default: 2000)
    pub max_url_length: usize,
    /// The host environment, when one exists
    #[serde(skip)]
    pub environment: Option<Arc<dyn Environment>>,
}

impl Default for DriverOptions {
    fn default() -> Self {
        DriverOptions {
            url: None,
            base: None,
            update_history: true,
            history_method: HistoryMethod::default(),
            max_url_length: DEFAULT_MAX_URL_LENGTH,
            environment: None,
        }
    }
}

impl fmt::Debug for DriverOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DriverOptions")
            .field("url", &self.url)
            .field("base", &self.base)
            .field("update_history", &self.update_history)
            .field("history_method", &self.history_method)
            .field("max_url_length", &self.max_url_length)
            .field("environment", &self.environment.is_some())
            .finish()
    }
}

impl DriverOptions {
    /// Options with an explicit address (the managed flavor)
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Options with a namespace path
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = Some(base.into());
        self
    }

    /// Options with history updates toggled
    pub fn with_update_history(mut self, update_history: bool) -> Self {
        self.update_history = update_history;
        self
    }

    /// Options with a history method
    pub fn with_history_method(mut self, history_method: HistoryMethod) -> Self {
        self.history_method = history_method;
        self
    }

    /// Options with a custom length budget
    pub fn with_max_url_length(mut self, max_url_length: usize) -> Self {
        self.max_url_length = max_url_length;
        self
    }

    /// Options with a host environment
    pub fn with_environment(mut self, environment: Arc<dyn Environment>) -> Self {
        self.environment = Some(environment);
        self
    }
}

/// Key-value storage driver persisting state in a URL query string
pub struct QueryStringDriver {
    options: DriverOptions,
    operations: KeyOperations,
}

impl QueryStringDriver {
    /// Assemble a driver from options.
    ///
    /// Construction never fails: address resolution is lazy, so a
    /// misconfigured instance surfaces its error on first use.
    pub fn new(options: DriverOptions) -> Self {
        let namespace: Option<KeyPath> = options
            .base
            .as_deref()
            .filter(|base| !base.is_empty())
            .map(|base| {
                base.parse()
                    .unwrap_or_else(|_| KeyPath::root().key(base))
            });

        let resolver = Arc::new(AddressResolver::new(
            options.url.clone(),
            options.environment.clone(),
        ));
        let updater = AddressUpdater::new(
            resolver.clone(),
            options.environment.clone(),
            namespace.clone(),
            options.update_history,
            options.history_method,
            Limits::with_max_url_length(options.max_url_length),
        );
        let operations = KeyOperations::new(resolver, updater, namespace);

        QueryStringDriver {
            options,
            operations,
        }
    }

    /// The options this instance was constructed with
    pub fn options(&self) -> &DriverOptions {
        &self.options
    }
}

impl fmt::Debug for QueryStringDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryStringDriver")
            .field("options", &self.options)
            .finish()
    }
}

impl StorageDriver for QueryStringDriver {
    fn name(&self) -> &'static str {
        DRIVER_NAME
    }

    fn has_item(&self, key: &str) -> bool {
        self.operations.has_item(key)
    }

    fn get_item(&self, key: &str) -> Option<Value> {
        self.operations.get_item(key)
    }

    fn get_item_raw(&self, key: &str) -> Option<String> {
        self.operations.get_item_raw(key)
    }

    fn set_item(&self, key: &str, value: Value) -> Result<()> {
        self.operations.set_item(key, value)
    }

    fn set_item_raw(&self, key: &str, value: &str) -> Result<()> {
        self.operations.set_item_raw(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.operations.remove_item(key)
    }

    fn get_keys(&self) -> Vec<String> {
        self.operations.get_keys()
    }

    fn clear(&self) -> Result<()> {
        self.operations.clear()
    }
}
