//! Session token cookie.
//!
//! ARCHITECTURE
//! ============
//! The edge guard and the API client both read the same `token` cookie but
//! never share memory, so access goes through two accessor traits:
//! [`SessionSource`] (read-only, implemented for the request `CookieJar`)
//! and [`SessionStore`] (read/write, implemented by [`MemoryCookieStore`]
//! on the client side).
//!
//! Clearing is idempotent: concurrent 401 handlers may both call
//! [`SessionStore::clear`] and the second call is a no-op.

use std::sync::{PoisonError, RwLock};

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::{Duration, OffsetDateTime};

pub const TOKEN_COOKIE: &str = "token";
pub const TOKEN_MAX_AGE_DAYS: i64 = 7;

/// Read access to the current session token.
pub trait SessionSource: Send + Sync {
    /// The stored token, if present and non-empty.
    fn token(&self) -> Option<String>;
}

/// Read/write access to the session token.
pub trait SessionStore: SessionSource {
    /// Persist a freshly issued token.
    fn set(&self, token: &str);

    /// Remove the token. Returns `true` if a token was actually removed.
    fn clear(&self) -> bool;
}

/// Cookie that establishes a session: 7 days, secure, strict same-site.
#[must_use]
pub fn session_cookie(token: &str, secure: bool) -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, token.to_owned()))
        .path("/")
        .secure(secure)
        .same_site(SameSite::Strict)
        .max_age(Duration::days(TOKEN_MAX_AGE_DAYS))
        .build()
}

/// Cookie that expires the session immediately.
#[must_use]
pub fn removal_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, ""))
        .path("/")
        .secure(secure)
        .same_site(SameSite::Strict)
        .max_age(Duration::ZERO)
        .build()
}

impl SessionSource for CookieJar {
    fn token(&self) -> Option<String> {
        self.get(TOKEN_COOKIE)
            .map(Cookie::value)
            .filter(|v| !v.is_empty())
            .map(str::to_owned)
    }
}

// =============================================================================
// CLIENT-SIDE STORE
// =============================================================================

struct StoredCookie {
    cookie: Cookie<'static>,
    expires_at: OffsetDateTime,
}

/// In-process cookie store used by the API client.
pub struct MemoryCookieStore {
    secure: bool,
    slot: RwLock<Option<StoredCookie>>,
}

impl MemoryCookieStore {
    #[must_use]
    pub fn new(secure: bool) -> Self {
        Self { secure, slot: RwLock::new(None) }
    }

    /// Store seeded with an existing token, as after a page reload.
    #[must_use]
    pub fn with_token(secure: bool, token: &str) -> Self {
        let store = Self::new(secure);
        store.set(token);
        store
    }

    /// The cookie as it would be written, for inspecting its attributes.
    #[must_use]
    pub fn cookie(&self) -> Option<Cookie<'static>> {
        let slot = self.slot.read().unwrap_or_else(PoisonError::into_inner);
        slot.as_ref().map(|stored| stored.cookie.clone())
    }
}

impl SessionSource for MemoryCookieStore {
    fn token(&self) -> Option<String> {
        let slot = self.slot.read().unwrap_or_else(PoisonError::into_inner);
        slot.as_ref()
            .filter(|stored| stored.expires_at > OffsetDateTime::now_utc())
            .map(|stored| stored.cookie.value().to_owned())
            .filter(|v| !v.is_empty())
    }
}

impl SessionStore for MemoryCookieStore {
    fn set(&self, token: &str) {
        let cookie = session_cookie(token, self.secure);
        let expires_at = OffsetDateTime::now_utc() + Duration::days(TOKEN_MAX_AGE_DAYS);
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(StoredCookie { cookie, expires_at });
    }

    fn clear(&self) -> bool {
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        slot.take().is_some()
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
