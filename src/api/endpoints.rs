//! Backend endpoint paths.

pub const LOGIN: &str = "/api/auth/login";
pub const REGISTER: &str = "/api/auth/register";
pub const ME: &str = "/api/me";
pub const POSTS: &str = "/api/posts";

/// Endpoints whose 401 means "bad credentials", not "session revoked".
const AUTH_ENDPOINTS: &[&str] = &["/auth/login", "/auth/register", "/auth/logout", "/auth/forgot-password"];

/// True if `path` targets an authentication endpoint, with or without the
/// `/api` prefix and ignoring any query string.
#[must_use]
pub fn is_auth_endpoint(path: &str) -> bool {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let path = path.strip_prefix("/api").unwrap_or(path);
    let path = path.trim_end_matches('/');
    AUTH_ENDPOINTS.contains(&path)
}

#[must_use]
pub fn post(id: u64) -> String {
    format!("{POSTS}/{id}")
}
