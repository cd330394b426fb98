//! Current-address resolution
//!
//! [`AddressResolver`] owns the notion of "the current URL" for one engine
//! instance. Two flavors exist, fixed at construction:
//!
//! - **managed** (explicit configured address): parsed once on first
//!   resolve, then cached for the instance's lifetime. Never re-derived
//!   from a live environment, even if one is present.
//! - **live** (no configured address): every resolve re-reads the host
//!   environment's current address, until [`AddressResolver::install`]
//!   has been called, after which the installed address is the truth.
//!
//! The cache is a field on the resolver, and every engine instance owns its
//! own resolver, so independently configured instances never share address
//! state through a hidden global.

use crate::address::Address;
use parking_lot::Mutex;
use std::sync::Arc;
use urlstate_core::{Environment, Error, Result};

/// Resolves and caches the current address for one engine instance
pub struct AddressResolver {
    configured_url: Option<String>,
    environment: Option<Arc<dyn Environment>>,
    cached: Mutex<Option<Address>>,
}

impl AddressResolver {
    /// Create a resolver. `configured_url` selects the managed flavor;
    /// without it the resolver follows the live environment.
    pub fn new(
        configured_url: Option<String>,
        environment: Option<Arc<dyn Environment>>,
    ) -> Self {
        AddressResolver {
            configured_url,
            environment,
            cached: Mutex::new(None),
        }
    }

    /// Whether this resolver was configured with an explicit address
    /// (the managed flavor)
    pub fn is_managed(&self) -> bool {
        self.configured_url.is_some()
    }

    /// Resolve the current address.
    ///
    /// # Errors
    ///
    /// `EnvironmentUnavailable` when resolution needs a live environment
    /// that is not present; `InvalidAddress` when a configured or observed
    /// address string does not parse.
    pub fn resolve(&self) -> Result<Address> {
        let mut cached = self.cached.lock();
        if let Some(address) = cached.as_ref() {
            return Ok(address.clone());
        }

        match &self.configured_url {
            Some(url) => {
                let address = self.parse_configured(url)?;
                *cached = Some(address.clone());
                Ok(address)
            }
            // Live flavor: re-read the environment on every call until an
            // install pins the address.
            None => {
                let environment = self.environment.as_ref().ok_or_else(|| {
                    Error::EnvironmentUnavailable(
                        "an explicit address is required without a host environment".to_string(),
                    )
                })?;
                let href = environment.current_address().ok_or_else(|| {
                    Error::EnvironmentUnavailable(
                        "the host environment has no current address".to_string(),
                    )
                })?;
                Address::parse(&href).map_err(|e| Error::InvalidAddress {
                    url: href,
                    reason: e.to_string(),
                })
            }
        }
    }

    fn parse_configured(&self, url: &str) -> Result<Address> {
        if Address::is_absolute(url) {
            return Address::parse(url).map_err(|e| Error::InvalidAddress {
                url: url.to_string(),
                reason: e.to_string(),
            });
        }

        // A relative configured address needs a live origin to complete it
        let origin = self
            .environment
            .as_ref()
            .and_then(|env| env.origin())
            .ok_or_else(|| {
                Error::EnvironmentUnavailable(
                    "cannot resolve a relative address without a host environment".to_string(),
                )
            })?;
        Address::parse_relative(url, &origin).map_err(|e| Error::InvalidAddress {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }

    /// Install a newly computed address as the current one.
    ///
    /// Only updates the cache; publishing through navigation is the write
    /// path's responsibility.
    pub fn install(&self, address: Address) {
        *self.cached.lock() = Some(address);
    }
}
