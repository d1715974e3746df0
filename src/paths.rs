//! Page routes and their access classification.
//!
//! Every navigable path falls into exactly one [`RouteClass`]. Protected
//! routes match exactly or by prefix; auth-only routes match exactly.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

pub const HOME: &str = "/";
pub const LOGIN: &str = "/login";
pub const REGISTER: &str = "/register";
pub const FORGOT_PASSWORD: &str = "/forgot-password";
pub const FEED: &str = "/feed";
pub const PROFILE: &str = "/me";

/// Landing page for an authenticated user.
pub const DEFAULT_AUTHENTICATED: &str = FEED;

/// Query parameter carrying the post-login destination.
pub const CALLBACK_PARAM: &str = "callbackUrl";

/// Characters left as-is in a query component; everything else is `%XX`.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub const AUTH_ONLY_ROUTES: &[&str] = &[LOGIN, REGISTER];
pub const PROTECTED_ROUTES: &[&str] = &[HOME, FEED, PROFILE];
pub const PROTECTED_PREFIXES: &[&str] = &["/me/"];

/// Pages where a client-side 401 must not bounce the user to login again.
/// Matched by prefix against the current location.
pub const AUTH_PAGES: &[&str] = &[LOGIN, REGISTER, FORGOT_PASSWORD];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// Requires a valid session.
    Protected,
    /// Login/registration; not reachable once a session exists.
    AuthOnly,
    /// No restriction.
    Public,
}

/// Classify a request path. Protected wins over auth-only, though the tables
/// never overlap.
#[must_use]
pub fn classify(path: &str) -> RouteClass {
    if PROTECTED_ROUTES.contains(&path) || PROTECTED_PREFIXES.iter().any(|p| path.starts_with(p)) {
        RouteClass::Protected
    } else if AUTH_ONLY_ROUTES.contains(&path) {
        RouteClass::AuthOnly
    } else {
        RouteClass::Public
    }
}

/// True when the current location is a login/registration style page.
#[must_use]
pub fn is_auth_page(current_path: &str) -> bool {
    AUTH_PAGES.iter().any(|page| current_path.starts_with(page))
}

/// `/login?callbackUrl=<encoded destination>`.
#[must_use]
pub fn login_redirect(destination: &str) -> String {
    format!("{LOGIN}?{}", callback_query(destination))
}

/// `callbackUrl=<encoded destination>`, spaces as `%20`.
#[must_use]
pub fn callback_query(destination: &str) -> String {
    format!("{CALLBACK_PARAM}={}", utf8_percent_encode(destination, QUERY_COMPONENT))
}

/// Accept a callback destination only if it stays on this site.
#[must_use]
pub fn sanitize_callback(raw: Option<&str>) -> &str {
    match raw {
        Some(dest) if dest.starts_with('/') && !dest.starts_with("//") && !dest.contains('\\') => dest,
        _ => DEFAULT_AUTHENTICATED,
    }
}

#[cfg(test)]
#[path = "paths_test.rs"]
mod tests;
