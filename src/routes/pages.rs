//! Page handlers. Rendering is out of scope; each page returns a minimal
//! HTML shell so the guard has something to protect.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::paths;
use crate::session::removal_cookie;
use crate::state::AppState;

fn shell(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!doctype html><html><head><meta charset=\"utf-8\"><title>{title} | Sociality</title></head>\
         <body><main>{body}</main></body></html>"
    ))
}

/// `GET /` — authenticated home is the feed.
pub async fn home() -> Redirect {
    Redirect::temporary(paths::FEED)
}

#[derive(Deserialize)]
pub struct LoginQuery {
    #[serde(rename = "callbackUrl")]
    callback_url: Option<String>,
}

/// `GET /login`
pub async fn login(Query(query): Query<LoginQuery>) -> Html<String> {
    let destination = paths::sanitize_callback(query.callback_url.as_deref());
    let action = paths::callback_query(destination);
    shell("Login", &format!("<h1>Welcome back</h1><form data-callback=\"?{action}\"></form>"))
}

/// `GET /register`
pub async fn register() -> Html<String> {
    shell("Register", "<h1>Create account</h1><form></form>")
}

/// `GET /feed`
pub async fn feed() -> Html<String> {
    shell("Feed", "<h1>Feed</h1>")
}

/// `GET /me` and `GET /me/{*rest}`
pub async fn profile() -> Html<String> {
    shell("Profile", "<h1>My profile</h1>")
}

/// `GET /logout` — expire the cookie and go to login.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let jar = jar.add(removal_cookie(state.config.cookie_secure));
    (jar, Redirect::to(paths::LOGIN))
}

pub async fn healthz() -> StatusCode {
    StatusCode::OK
}
