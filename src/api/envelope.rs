//! Response envelope decoding.
//!
//! The backend answers either with a bare payload or with a
//! `{ success, message, data }` wrapper, depending on the endpoint.
//! [`Envelope`] accepts both and [`Envelope::into_result`] flattens them.

use serde::Deserialize;

use super::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct Wrapped<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Envelope<T> {
    Wrapped(Wrapped<T>),
    Flat(T),
}

impl<T> Envelope<T> {
    /// Unwrap the payload.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] when a wrapper reports `success: false`
    /// or carries no `data`.
    pub fn into_result(self) -> Result<T, ApiError> {
        match self {
            Self::Flat(data) | Self::Wrapped(Wrapped { success: true, data: Some(data), .. }) => Ok(data),
            Self::Wrapped(Wrapped { message, .. }) => Err(ApiError::Rejected {
                message: message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| super::error::FALLBACK_MESSAGE.to_owned()),
            }),
        }
    }
}

/// Decode a success body into `T`, accepting either envelope shape.
///
/// # Errors
///
/// Returns [`ApiError::Decode`] if neither shape matches, or
/// [`ApiError::Rejected`] for an unsuccessful wrapper.
pub fn decode<T>(text: &str) -> Result<T, ApiError>
where
    T: for<'de> Deserialize<'de>,
{
    serde_json::from_str::<Envelope<T>>(text)
        .map_err(|e| ApiError::Decode { message: format!("unexpected response shape: {e}") })?
        .into_result()
}

#[cfg(test)]
#[path = "envelope_test.rs"]
mod tests;
