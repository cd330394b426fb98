//! In-memory host environment
//!
//! [`MemoryEnvironment`] stands in for a live context: it holds a current
//! address and records every navigation it is asked to perform. Headless
//! hosts use it to give a driver an addressable context without a browser;
//! tests use it to assert what the engine published and how.

use crate::address::Address;
use parking_lot::Mutex;
use urlstate_core::{Environment, HistoryMethod};

#[derive(Debug, Default)]
struct EnvState {
    current: Option<String>,
    history: Vec<(HistoryMethod, String)>,
}

/// An in-memory [`Environment`] with a navigation log
#[derive(Debug, Default)]
pub struct MemoryEnvironment {
    state: Mutex<EnvState>,
}

impl MemoryEnvironment {
    /// Create an environment with no current address (a non-addressable
    /// context; resolution against it fails the same way headless hosts do)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an environment whose context is currently at `href`
    pub fn with_address(href: impl Into<String>) -> Self {
        MemoryEnvironment {
            state: Mutex::new(EnvState {
                current: Some(href.into()),
                history: Vec::new(),
            }),
        }
    }

    /// Snapshot of the navigation log, oldest first
    pub fn history(&self) -> Vec<(HistoryMethod, String)> {
        self.state.lock().history.clone()
    }

    /// Number of recorded navigations
    pub fn history_len(&self) -> usize {
        self.state.lock().history.len()
    }
}

impl Environment for MemoryEnvironment {
    fn current_address(&self) -> Option<String> {
        self.state.lock().current.clone()
    }

    fn origin(&self) -> Option<String> {
        let current = self.state.lock().current.clone()?;
        Address::parse(&current).ok().map(|addr| addr.origin())
    }

    fn navigate(&self, method: HistoryMethod, href: &str) {
        let mut state = self.state.lock();
        match method {
            HistoryMethod::PushState => {
                state.history.push((method, href.to_string()));
            }
            HistoryMethod::ReplaceState => match state.history.last_mut() {
                Some(last) => *last = (method, href.to_string()),
                None => state.history.push((method, href.to_string())),
            },
        }
        state.current = Some(href.to_string());
    }
}
