//! Navigation seam for the API client.
//!
//! The 401 handler needs to know where the user currently is and to send
//! them elsewhere. Both go through [`Navigator`] so the client never reads
//! an ambient location.

use std::sync::{PoisonError, RwLock};

/// Where the user is when a response comes back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationContext {
    pub current_path: String,
}

impl NavigationContext {
    #[must_use]
    pub fn new(current_path: impl Into<String>) -> Self {
        Self { current_path: current_path.into() }
    }
}

pub trait Navigator: Send + Sync {
    /// Snapshot of the current location.
    fn context(&self) -> NavigationContext;

    /// Replace the current location. Returns `false` when a navigation is
    /// already under way and this call was ignored.
    fn replace(&self, location: &str) -> bool;
}

#[derive(Debug)]
struct HistoryState {
    current: String,
    pending: Option<String>,
}

/// In-process navigator: the first `replace` wins until the navigation is
/// committed with [`HistoryNavigator::commit`].
#[derive(Debug)]
pub struct HistoryNavigator {
    state: RwLock<HistoryState>,
}

impl HistoryNavigator {
    #[must_use]
    pub fn new(current_path: impl Into<String>) -> Self {
        Self { state: RwLock::new(HistoryState { current: current_path.into(), pending: None }) }
    }

    /// Location requested but not yet committed.
    #[must_use]
    pub fn pending(&self) -> Option<String> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .pending
            .clone()
    }

    /// Finish the in-flight navigation; its path (without query) becomes current.
    pub fn commit(&self) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(location) = state.pending.take() {
            let path = location.split_once('?').map_or(location.as_str(), |(path, _)| path);
            state.current = path.to_owned();
        }
    }

    /// Direct user navigation, as from clicking a link.
    pub fn visit(&self, path: impl Into<String>) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.current = path.into();
        state.pending = None;
    }
}

impl Navigator for HistoryNavigator {
    fn context(&self) -> NavigationContext {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        NavigationContext::new(state.current.clone())
    }

    fn replace(&self, location: &str) -> bool {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if state.pending.is_some() {
            return false;
        }
        state.pending = Some(location.to_owned());
        true
    }
}

#[cfg(test)]
#[path = "navigation_test.rs"]
mod tests;
