//! Route guard — gates every page navigation before any handler runs.
//!
//! DESIGN
//! ======
//! The decision is a pure function of the request path and the `token`
//! cookie. The token check is syntactic only (three dot-separated base64url
//! segments); signatures and expiry are the backend's concern. A missing
//! token and a malformed one are indistinguishable here, and the guard never
//! fails: the worst case is the unauthenticated path.

use std::sync::LazyLock;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use regex::Regex;

use crate::paths::{self, RouteClass};
use crate::session::SessionSource;

static TOKEN_SHAPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_=-]+\.[A-Za-z0-9_=-]+\.[A-Za-z0-9_.+/=-]*$").expect("Invalid regex"));

/// Outcome of evaluating one navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    /// Redirect to the given site-relative location.
    Redirect(String),
}

/// Cheap structural check for a JWT-shaped token.
#[must_use]
pub fn is_valid_token_structure(token: &str) -> bool {
    TOKEN_SHAPE_RE.is_match(token)
}

/// Decide what to do with a navigation to `path`.
///
/// | class     | valid token | outcome                           |
/// |-----------|-------------|-----------------------------------|
/// | protected | no          | `/login?callbackUrl=<path>`       |
/// | auth-only | yes         | default authenticated landing page |
/// | otherwise |             | allow                             |
#[must_use]
pub fn evaluate(path: &str, token: Option<&str>) -> GuardDecision {
    let authenticated = token.is_some_and(is_valid_token_structure);

    match (paths::classify(path), authenticated) {
        (RouteClass::Protected, false) => GuardDecision::Redirect(paths::login_redirect(path)),
        (RouteClass::AuthOnly, true) => GuardDecision::Redirect(paths::DEFAULT_AUTHENTICATED.to_owned()),
        _ => GuardDecision::Allow,
    }
}

/// Axum middleware applying [`evaluate`] to each request.
pub async fn route_guard(jar: CookieJar, request: Request, next: Next) -> Response {
    let token = jar.token();
    match evaluate(request.uri().path(), token.as_deref()) {
        GuardDecision::Allow => next.run(request).await,
        GuardDecision::Redirect(location) => {
            tracing::debug!(path = %request.uri().path(), %location, "route guard redirect");
            Redirect::temporary(&location).into_response()
        }
    }
}

#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;
