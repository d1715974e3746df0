//! Normalized API errors.
//!
//! Every failure leaving the client carries a human-readable message,
//! chosen in priority order: the payload's `message` field, then the
//! transport error's own text, then [`FALLBACK_MESSAGE`].

use reqwest::StatusCode;
use serde_json::Value;

pub const FALLBACK_MESSAGE: &str = "An unexpected error occurred";

/// Errors produced by API client operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No response arrived within the request timeout.
    #[error("{message}")]
    Timeout { message: String },

    /// The request never produced a response (DNS, connect, reset, ...).
    #[error("{message}")]
    Transport { message: String },

    /// The backend answered with a non-success status.
    #[error("{message}")]
    Status { status: u16, message: String, body: Option<Value> },

    /// A wrapped envelope reported `success: false` or carried no data.
    #[error("{message}")]
    Rejected { message: String },

    /// The response body did not match the expected shape.
    #[error("{message}")]
    Decode { message: String },

    /// The request could not be built (bad body, bad URL).
    #[error("{message}")]
    Request { message: String },

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl ApiError {
    /// Normalized message suitable for showing next to a form.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Timeout { message }
            | Self::Transport { message }
            | Self::Status { message, .. }
            | Self::Rejected { message }
            | Self::Decode { message }
            | Self::Request { message }
            | Self::HttpClientBuild(message) => message,
        }
    }

    /// HTTP status, when the backend answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED.as_u16())
    }

    /// Whether a caller-level policy may try again. Never true for 401.
    #[must_use]
    pub fn retryable(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::Transport { .. } | Self::Status { status: 408 | 429 | 500..=599, .. })
    }

    pub(crate) fn from_transport(err: &reqwest::Error, timeout_ms: u128) -> Self {
        if err.is_timeout() {
            return Self::Timeout { message: format!("timeout of {timeout_ms}ms exceeded") };
        }
        Self::Transport { message: non_empty(err.to_string()) }
    }

    /// Build a status error from the raw response body.
    pub(crate) fn from_status(status: StatusCode, text: &str) -> Self {
        let body = serde_json::from_str::<Value>(text).ok();
        let message = body
            .as_ref()
            .and_then(payload_message)
            .unwrap_or_else(|| format!("Request failed with status code {}", status.as_u16()));
        Self::Status { status: status.as_u16(), message, body }
    }
}

/// The payload's own `message`, if it is a non-empty string.
pub(crate) fn payload_message(body: &Value) -> Option<String> {
    body.get("message")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_owned)
}

fn non_empty(message: String) -> String {
    if message.trim().is_empty() { FALLBACK_MESSAGE.to_owned() } else { message }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
