//! API — the single egress point for backend calls.
//!
//! DESIGN
//! ======
//! UI-facing feature modules (`auth`, `posts`) never build HTTP requests
//! themselves. They go through [`ApiClient`], which owns bearer-token
//! injection, the request timeout, envelope decoding, error normalization,
//! and the 401 session-revocation policy.

pub mod client;
pub mod endpoints;
pub mod envelope;
pub mod error;
pub mod navigation;

pub use client::{ApiClient, ApiRequest, RevocationOutcome, handle_unauthorized};
pub use envelope::Envelope;
pub use error::ApiError;
pub use navigation::{HistoryNavigator, NavigationContext, Navigator};
