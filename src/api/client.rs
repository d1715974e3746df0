//! HTTP client wrapping every backend call.
//!
//! PIPELINE
//! ========
//! 1. Attach `Authorization: Bearer <token>` when the session store has one.
//! 2. Send with a bounded timeout (10s by default).
//! 3. On success, decode either envelope shape into the caller's type.
//! 4. On failure, normalize into [`ApiError`] and, for a 401 from anything
//!    other than an auth endpoint, revoke the session and bounce the user to
//!    login unless they are already on an auth page.
//!
//! Concurrent 401s each run step 4 independently. Clearing the cookie and
//! requesting navigation are both idempotent, so the second handler is a
//! no-op.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::endpoints;
use super::envelope;
use super::error::ApiError;
use super::navigation::{NavigationContext, Navigator};
use crate::config::AppConfig;
use crate::paths;
use crate::session::SessionStore;
use crate::store::AuthStore;

const CONNECT_TIMEOUT_SECS: u64 = 5;

// =============================================================================
// REQUEST
// =============================================================================

/// A single backend call: method, path, and optional JSON body / headers.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
    pub headers: HeaderMap,
}

impl ApiRequest {
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), body: None, headers: HeaderMap::new() }
    }

    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Attach a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Request`] if the body cannot be serialized.
    pub fn json(mut self, body: &impl Serialize) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body).map_err(|e| ApiError::Request { message: e.to_string() })?;
        self.body = Some(value);
        Ok(self)
    }

    #[must_use]
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

// =============================================================================
// 401 POLICY
// =============================================================================

/// What the 401 handler did.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RevocationOutcome {
    /// A stored token was removed by this call.
    pub session_cleared: bool,
    /// Login redirect requested by this call.
    pub redirect: Option<String>,
}

/// Apply the authorization-failure policy for a 401 on `request_path`.
///
/// Auth endpoints are left alone so a bad login attempt surfaces in the
/// form. Otherwise the token is cleared, and unless `ctx` is already an auth
/// page the user is sent to `/login?callbackUrl=<current path>`.
pub fn handle_unauthorized(
    session: &dyn SessionStore,
    navigator: &dyn Navigator,
    request_path: &str,
    ctx: &NavigationContext,
) -> RevocationOutcome {
    if endpoints::is_auth_endpoint(request_path) {
        return RevocationOutcome::default();
    }

    let session_cleared = session.clear();
    if session_cleared {
        tracing::info!(path = %request_path, "session revoked after 401");
    }

    if paths::is_auth_page(&ctx.current_path) {
        return RevocationOutcome { session_cleared, redirect: None };
    }

    let location = paths::login_redirect(&ctx.current_path);
    let redirect = navigator.replace(&location).then_some(location);
    RevocationOutcome { session_cleared, redirect }
}

// =============================================================================
// CLIENT
// =============================================================================

/// Backend client shared by every feature module.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
    session: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
    auth_store: Option<Arc<AuthStore>>,
}

impl ApiClient {
    /// Build a client against `base_url` with the given request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client fails to build.
    pub fn new(
        base_url: &str,
        timeout: Duration,
        session: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ApiError> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS).min(timeout))
            .default_headers(default_headers)
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
            timeout,
            session,
            navigator,
            auth_store: None,
        })
    }

    /// Build a client from typed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client fails to build.
    pub fn from_config(
        config: &AppConfig,
        session: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ApiError> {
        Self::new(&config.api_base_url, config.api_timeout, session, navigator)
    }

    /// Also clear the auth store's credentials when a session is revoked.
    #[must_use]
    pub fn with_auth_store(mut self, store: Arc<AuthStore>) -> Self {
        self.auth_store = Some(store);
        self
    }

    #[must_use]
    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    #[must_use]
    pub fn navigator(&self) -> &Arc<dyn Navigator> {
        &self.navigator
    }

    /// `GET path`, decoding the body into `T`.
    ///
    /// # Errors
    ///
    /// Returns a normalized [`ApiError`] on any failure.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(ApiRequest::get(path)).await
    }

    /// `POST path` with a JSON body, decoding the response into `T`.
    ///
    /// # Errors
    ///
    /// Returns a normalized [`ApiError`] on any failure.
    pub async fn post<T: DeserializeOwned>(&self, path: &str, body: &impl Serialize) -> Result<T, ApiError> {
        self.send(ApiRequest::post(path).json(body)?).await
    }

    /// Send a request through the pipeline.
    ///
    /// # Errors
    ///
    /// Returns a normalized [`ApiError`] on any failure. A 401 from a
    /// non-auth endpoint additionally revokes the session before returning.
    pub async fn send<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        let method = request.method.clone();
        let path = request.path.clone();

        let result = self.execute(request).await;
        match result {
            Ok(text) => envelope::decode(&text),
            Err(err) => {
                self.on_error(&method, &path, &err);
                Err(err)
            }
        }
    }

    async fn execute(&self, request: ApiRequest) -> Result<String, ApiError> {
        let url = format!("{}{}", self.base_url, request.path);
        let mut builder = self.http.request(request.method, url).headers(request.headers);

        if let Some(token) = self.session.token() {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let timeout_ms = self.timeout.as_millis();
        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::from_transport(&e, timeout_ms))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::from_transport(&e, timeout_ms))?;

        if !status.is_success() {
            return Err(ApiError::from_status(status, &text));
        }
        Ok(text)
    }

    fn on_error(&self, method: &Method, path: &str, err: &ApiError) {
        tracing::debug!(%method, %path, status = ?err.status(), message = err.message(), "api request failed");

        match err.status() {
            Some(status) if status == StatusCode::UNAUTHORIZED.as_u16() => {
                let ctx = self.navigator.context();
                let outcome = handle_unauthorized(self.session.as_ref(), self.navigator.as_ref(), path, &ctx);
                if outcome.session_cleared {
                    if let Some(store) = &self.auth_store {
                        store.clear_credentials();
                    }
                }
            }
            Some(status) if status >= 500 => {
                tracing::warn!(%method, %path, status, "server-side fault");
            }
            _ => {}
        }
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
