//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every page route sits behind [`guard::route_guard`], so navigation is
//! classified and possibly redirected before any handler runs. Health checks
//! and logout are mounted outside the guard.

pub mod pages;

use axum::Router;
use axum::middleware;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use crate::guard;
use crate::state::AppState;

/// Guarded page routes plus unguarded utility routes.
pub fn app(state: AppState) -> Router {
    let guarded = Router::new()
        .route("/", get(pages::home))
        .route("/login", get(pages::login))
        .route("/register", get(pages::register))
        .route("/feed", get(pages::feed))
        .route("/me", get(pages::profile))
        .route("/me/{*rest}", get(pages::profile))
        .layer(middleware::from_fn(guard::route_guard));

    Router::new()
        .merge(guarded)
        .route("/logout", get(pages::logout))
        .route("/healthz", get(pages::healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
