use std::time::Duration;

use serde_json::Value;

use super::*;
use crate::api::navigation::HistoryNavigator;
use crate::auth::types::{AuthUser, MeResponse};
use crate::session::{MemoryCookieStore, SessionSource};
use crate::test_support::{GOOD_TOKEN, Harness};

// =============================================================================
// token injection
// =============================================================================

#[tokio::test]
async fn stored_token_is_sent_as_bearer() {
    let h = Harness::new("/feed", Some(GOOD_TOKEN)).await;
    let echoed: Value = h.client.get("/echo-auth").await.unwrap();
    assert_eq!(echoed["authorization"], format!("Bearer {GOOD_TOKEN}"));
    assert_eq!(echoed["accept"], "application/json");
}

#[tokio::test]
async fn no_token_means_no_authorization_header() {
    let h = Harness::new("/feed", None).await;
    let echoed: Value = h.client.get("/echo-auth").await.unwrap();
    assert!(echoed["authorization"].is_null());
}

#[tokio::test]
async fn caller_headers_are_forwarded() {
    let h = Harness::new("/feed", None).await;
    let request =
        ApiRequest::get("/echo-auth").header(HeaderName::from_static("x-request-source"), HeaderValue::from_static("feed"));
    let echoed: Value = h.client.send(request).await.unwrap();
    assert_eq!(echoed["custom"], "feed");
}

#[tokio::test]
async fn wrapped_envelope_is_unwrapped() {
    let h = Harness::new("/me", Some(GOOD_TOKEN)).await;
    let me: MeResponse = h.client.get(endpoints::ME).await.unwrap();
    assert_eq!(me.profile.username, "ayu");
    assert_eq!(me.stats.followers, 10);
}

// =============================================================================
// 401 policy
// =============================================================================

#[tokio::test]
async fn unauthorized_on_protected_resource_revokes_session() {
    let h = Harness::new("/feed", Some("expired.token.sig")).await;
    h.store.set_credentials(sample_user());

    let err = h.client.get::<MeResponse>(endpoints::ME).await.unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(err.message(), "Unauthorized");
    assert_eq!(h.session.token(), None);
    assert!(!h.store.is_authenticated());
    assert_eq!(h.navigator.pending().as_deref(), Some("/login?callbackUrl=%2Ffeed"));
}

#[tokio::test]
async fn unauthorized_on_auth_page_clears_without_redirect() {
    let h = Harness::new("/register", Some("expired.token.sig")).await;

    let err = h.client.get::<MeResponse>(endpoints::ME).await.unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(h.session.token(), None);
    assert_eq!(h.navigator.pending(), None);
}

#[tokio::test]
async fn unauthorized_on_login_endpoint_keeps_session() {
    let h = Harness::new("/login", Some(GOOD_TOKEN)).await;
    let body = serde_json::json!({ "email": "ayu@example.com", "password": "wrong" });

    let err = h.client.post::<Value>(endpoints::LOGIN, &body).await.unwrap_err();

    assert_eq!(err.message(), "Invalid email or password");
    assert_eq!(h.session.token().as_deref(), Some(GOOD_TOKEN));
    assert_eq!(h.navigator.pending(), None);
}

#[tokio::test]
async fn concurrent_unauthorized_responses_are_idempotent() {
    let h = Harness::new("/me", Some("expired.token.sig")).await;

    let (a, b) = tokio::join!(h.client.get::<MeResponse>(endpoints::ME), h.client.get::<MeResponse>(endpoints::ME));

    assert!(a.unwrap_err().is_unauthorized());
    assert!(b.unwrap_err().is_unauthorized());
    assert_eq!(h.session.token(), None);
    assert_eq!(h.navigator.pending().as_deref(), Some("/login?callbackUrl=%2Fme"));
}

#[test]
fn handle_unauthorized_reports_first_caller_only() {
    let session = MemoryCookieStore::with_token(true, GOOD_TOKEN);
    let navigator = HistoryNavigator::new("/feed");
    let ctx = navigator.context();

    let first = handle_unauthorized(&session, &navigator, "/api/me", &ctx);
    let second = handle_unauthorized(&session, &navigator, "/api/me", &ctx);

    assert_eq!(
        first,
        RevocationOutcome { session_cleared: true, redirect: Some("/login?callbackUrl=%2Ffeed".into()) }
    );
    assert_eq!(second, RevocationOutcome::default());
}

#[test]
fn handle_unauthorized_uses_current_location_not_request_path() {
    let session = MemoryCookieStore::with_token(true, GOOD_TOKEN);
    let navigator = HistoryNavigator::new("/me/settings");
    let ctx = navigator.context();

    let outcome = handle_unauthorized(&session, &navigator, "/api/posts", &ctx);

    assert_eq!(outcome.redirect.as_deref(), Some("/login?callbackUrl=%2Fme%2Fsettings"));
}

#[test]
fn handle_unauthorized_ignores_auth_endpoints() {
    let session = MemoryCookieStore::with_token(true, GOOD_TOKEN);
    let navigator = HistoryNavigator::new("/feed");
    let ctx = navigator.context();

    for path in ["/api/auth/login", "/api/auth/register", "/auth/login"] {
        assert_eq!(handle_unauthorized(&session, &navigator, path, &ctx), RevocationOutcome::default());
    }
    assert_eq!(session.token().as_deref(), Some(GOOD_TOKEN));
    assert_eq!(navigator.pending(), None);
}

// =============================================================================
// other failures
// =============================================================================

#[tokio::test]
async fn server_error_surfaces_payload_message_without_side_effects() {
    let h = Harness::new("/feed", Some(GOOD_TOKEN)).await;

    let err = h.client.get::<Value>("/boom").await.unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert_eq!(err.message(), "database unavailable");
    assert_eq!(h.session.token().as_deref(), Some(GOOD_TOKEN));
    assert_eq!(h.navigator.pending(), None);
}

#[tokio::test]
async fn non_json_error_body_uses_status_message() {
    let h = Harness::new("/feed", None).await;
    let err = h.client.get::<Value>("/missing").await.unwrap_err();
    assert_eq!(err.message(), "Request failed with status code 404");
}

#[tokio::test]
async fn slow_backend_times_out() {
    let h = Harness::with_timeout("/feed", Some(GOOD_TOKEN), Duration::from_millis(200)).await;

    let err = h.client.get::<Value>("/slow").await.unwrap_err();

    assert!(matches!(err, ApiError::Timeout { .. }), "got {err:?}");
    assert_eq!(err.message(), "timeout of 200ms exceeded");
    assert_eq!(h.session.token().as_deref(), Some(GOOD_TOKEN));
}

#[tokio::test]
async fn unreachable_backend_is_transport_error() {
    let session = std::sync::Arc::new(MemoryCookieStore::new(true));
    let navigator = std::sync::Arc::new(HistoryNavigator::new("/feed"));
    let client = ApiClient::new("http://127.0.0.1:1", Duration::from_secs(2), session, navigator).unwrap();

    let err = client.get::<Value>("/anything").await.unwrap_err();

    assert!(matches!(err, ApiError::Transport { .. }), "got {err:?}");
    assert!(!err.message().is_empty());
}

fn sample_user() -> AuthUser {
    serde_json::from_value(crate::test_support::user_json()).unwrap()
}
