//! Client-side auth state container.
//!
//! Passed explicitly as a handle to whatever needs it rather than living in
//! a global. Only two writes exist: [`AuthStore::set_credentials`] and
//! [`AuthStore::clear_credentials`].

use std::sync::{PoisonError, RwLock};

use crate::auth::types::AuthUser;

/// Snapshot of the current authentication state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<AuthUser>,
    pub is_authenticated: bool,
}

#[derive(Debug, Default)]
pub struct AuthStore {
    state: RwLock<AuthState>,
}

impl AuthStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_credentials(&self, user: AuthUser) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.user = Some(user);
        state.is_authenticated = true;
    }

    pub fn clear_credentials(&self) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        *state = AuthState::default();
    }

    #[must_use]
    pub fn snapshot(&self) -> AuthState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_authenticated
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
