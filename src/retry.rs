//! Caller-level retry for backend reads.
//!
//! The client itself never retries. Reads opt in through [`with_retry`];
//! mutations use [`RetryPolicy::NONE`]. Only [`ApiError::retryable`]
//! failures are retried, so a 401 always surfaces immediately.

use std::future::Future;
use std::time::Duration;

use crate::api::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Extra attempts after the first.
    pub retries: u32,
    /// Delay before retry `n` is `n * base_delay`.
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub const NONE: Self = Self { retries: 0, base_delay: Duration::ZERO };
    pub const QUERY: Self = Self { retries: 1, base_delay: Duration::from_millis(250) };
}

/// Run `op`, retrying retryable failures per `policy`.
///
/// # Errors
///
/// Returns the last error once attempts are exhausted, or the first
/// non-retryable error.
pub async fn with_retry<T, F, Fut>(policy: RetryPolicy, mut op: F) -> Result<T, ApiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let mut attempt: u32 = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if e.retryable() && attempt < policy.retries => {
                attempt += 1;
                tracing::warn!(error = %e, attempt, total = policy.retries, "request failed; retrying");
                tokio::time::sleep(policy.base_delay * attempt).await;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
#[path = "retry_test.rs"]
mod tests;
