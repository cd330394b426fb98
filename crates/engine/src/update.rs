//! The write path
//!
//! [`AddressUpdater::apply`] takes the complete desired namespace contents,
//! merges them into the full decoded mapping, re-encodes, enforces the
//! length budget, installs the result as the current address, and, for the
//! live flavor with history enabled, publishes the navigation.
//!
//! The length gate is deliberately soft: an over-budget candidate is warned
//! about and dropped whole, leaving the previously resolved address
//! authoritative. Silent truncation is never an option.

use crate::resolver::AddressResolver;
use std::sync::Arc;
use tracing::warn;
use urlstate_core::{
    set_at_path, Environment, HistoryMethod, KeyPath, LimitError, Limits, QueryMapping, Result,
    Value,
};
use urlstate_codec::{parse_query, stringify_query};

/// What a write attempt did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The candidate address was installed (and published, when applicable)
    Committed,
    /// The candidate exceeded the length budget; nothing was mutated
    RejectedTooLong {
        /// Candidate address length in characters
        length: usize,
        /// Configured maximum
        max: usize,
    },
}

impl UpdateOutcome {
    /// True iff the write was installed
    pub fn is_committed(&self) -> bool {
        matches!(self, UpdateOutcome::Committed)
    }
}

/// Applies namespace-contents writes to the current address
pub struct AddressUpdater {
    resolver: Arc<AddressResolver>,
    environment: Option<Arc<dyn Environment>>,
    namespace: Option<KeyPath>,
    update_history: bool,
    history_method: HistoryMethod,
    limits: Limits,
}

impl AddressUpdater {
    /// Create an updater sharing the instance's resolver.
    pub fn new(
        resolver: Arc<AddressResolver>,
        environment: Option<Arc<dyn Environment>>,
        namespace: Option<KeyPath>,
        update_history: bool,
        history_method: HistoryMethod,
        limits: Limits,
    ) -> Self {
        AddressUpdater {
            resolver,
            environment,
            namespace,
            update_history,
            history_method,
            limits,
        }
    }

    /// Apply `namespace_contents` as the entire new contents of this
    /// instance's namespace (or of the whole query without one).
    ///
    /// Idempotent given identical input and identical current address.
    ///
    /// # Errors
    ///
    /// Propagates address resolution failures. The length gate is not an
    /// error; it reports through the returned [`UpdateOutcome`].
    pub fn apply(&self, namespace_contents: QueryMapping) -> Result<UpdateOutcome> {
        let current = self.resolver.resolve()?;

        let full_mapping = match &self.namespace {
            Some(path) if !path.is_root() => {
                // Replace only the namespace subtree; siblings pass through.
                let mut root = Value::Object(parse_query(current.query()));
                set_at_path(&mut root, path, Value::Object(namespace_contents));
                root.into_object().unwrap_or_default()
            }
            _ => namespace_contents,
        };

        let candidate = current.with_query(stringify_query(&full_mapping));
        let href = candidate.href();

        if let Err(LimitError::AddressTooLong { actual, max }) = self.limits.validate_href(&href) {
            warn!(
                target: "urlstate::update",
                length = actual,
                max = max,
                "candidate address exceeds maximum allowed length; write dropped"
            );
            return Ok(UpdateOutcome::RejectedTooLong {
                length: actual,
                max,
            });
        }

        self.resolver.install(candidate);

        // Only the live flavor publishes navigation, and only when asked to.
        if !self.resolver.is_managed() && self.update_history {
            if let Some(environment) = &self.environment {
                environment.navigate(self.history_method, &href);
            }
        }

        Ok(UpdateOutcome::Committed)
    }
}
