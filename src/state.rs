//! Shared edge-server state.
//!
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! The guard itself is stateless; only handlers that write cookies need
//! the config.

use std::sync::Arc;

use crate::config::AppConfig;

/// Clone is required by Axum; the config is Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
}

impl AppState {
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        Self { config: Arc::new(config) }
    }
}
