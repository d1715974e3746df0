//! Session lifecycle: login, registration, logout, and rehydration.
//!
//! Success paths persist the token through the client's session store and
//! publish the user to the [`AuthStore`]. Failures are returned untouched so
//! forms can display [`ApiError::message`].

use serde::Serialize;

use super::types::{AuthResponse, AuthUser, LoginInput, MeResponse, RegisterInput};
use crate::api::{ApiClient, ApiError, endpoints};
use crate::paths;
use crate::retry::{RetryPolicy, with_retry};
use crate::store::AuthStore;

/// Result of a successful login or registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedIn {
    pub user: AuthUser,
    pub token: String,
    /// Where the user was sent afterwards. `None` when an earlier navigation
    /// was still pending and this one was dropped.
    pub redirect_to: Option<String>,
}

async fn establish_session(
    client: &ApiClient,
    store: &AuthStore,
    endpoint: &str,
    body: &impl Serialize,
    redirect_to: &str,
) -> Result<SignedIn, ApiError> {
    let response: AuthResponse = client.post(endpoint, body).await?;
    let AuthResponse { user, token } = response;

    client.session().set(&token);
    store.set_credentials(user.clone());
    let redirect_to = client.navigator().replace(redirect_to).then(|| redirect_to.to_owned());

    tracing::info!(user_id = user.id, endpoint, ?redirect_to, "session established");
    Ok(SignedIn { user, token, redirect_to })
}

/// Log in and go to `callback_url` (or the feed).
///
/// # Errors
///
/// Returns the normalized API error; bad credentials leave any existing
/// session untouched.
pub async fn login(
    client: &ApiClient,
    store: &AuthStore,
    input: &LoginInput,
    callback_url: Option<&str>,
) -> Result<SignedIn, ApiError> {
    let redirect_to = paths::sanitize_callback(callback_url);
    establish_session(client, store, endpoints::LOGIN, input, redirect_to).await
}

/// Create an account and go to the feed.
///
/// # Errors
///
/// Returns the normalized API error.
pub async fn register(client: &ApiClient, store: &AuthStore, input: &RegisterInput) -> Result<SignedIn, ApiError> {
    establish_session(client, store, endpoints::REGISTER, input, paths::DEFAULT_AUTHENTICATED).await
}

/// End the session locally and go to the login page. Tokens expire on their
/// own, so the backend is not called.
pub fn logout(client: &ApiClient, store: &AuthStore) {
    client.session().clear();
    store.clear_credentials();
    client.navigator().replace(paths::LOGIN);
}

/// Current user's profile and stats.
///
/// # Errors
///
/// Returns the normalized API error. A 401 has already revoked the session
/// by the time it is returned.
pub async fn get_me(client: &ApiClient) -> Result<MeResponse, ApiError> {
    with_retry(RetryPolicy::QUERY, move || client.get(endpoints::ME)).await
}

/// Restore the store after a reload: a token exists but no user is loaded.
/// Returns the restored user, if any.
pub async fn rehydrate_session(client: &ApiClient, store: &AuthStore) -> Option<AuthUser> {
    if client.session().token().is_none() || store.is_authenticated() {
        return None;
    }

    match get_me(client).await {
        Ok(MeResponse { profile, .. }) => {
            store.set_credentials(profile.clone());
            Some(profile)
        }
        Err(e) => {
            tracing::debug!(error = %e, "session rehydration failed");
            None
        }
    }
}

#[cfg(test)]
#[path = "service_test.rs"]
mod tests;
