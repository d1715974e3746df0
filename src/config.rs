//! Runtime configuration parsed from environment variables.
//!
//! `main` loads a `.env` file through `dotenvy` before calling
//! [`AppConfig::from_env`], so local overrides and real environment
//! variables are read the same way.

use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 10;

/// Errors produced while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("missing env var {0}")]
    Missing(&'static str),

    /// A variable is set but its value is unusable.
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Backend base URL, without a trailing slash.
    pub api_base_url: String,
    /// Port the edge server binds to.
    pub port: u16,
    /// Whether the session cookie carries the `Secure` attribute.
    pub cookie_secure: bool,
    /// Upper bound on every backend call.
    pub api_timeout: Duration,
}

impl AppConfig {
    /// Build typed config from environment variables.
    ///
    /// Required:
    /// - `SOCIALITY_API_URL`
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `COOKIE_SECURE`: default true
    /// - `API_TIMEOUT_SECS`: default 10, must be at least 1
    ///
    /// # Errors
    ///
    /// Returns an error if the API URL is missing or a value fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_base_url = std::env::var("SOCIALITY_API_URL").map_err(|_| ConfigError::Missing("SOCIALITY_API_URL"))?;
        let api_base_url = normalize_base_url(&api_base_url)?;

        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid { key: "PORT", value: raw })?,
            Err(_) => DEFAULT_PORT,
        };

        let api_timeout = match std::env::var("API_TIMEOUT_SECS") {
            Ok(raw) => parse_timeout_secs(&raw)
                .ok_or(ConfigError::Invalid { key: "API_TIMEOUT_SECS", value: raw })?,
            Err(_) => Duration::from_secs(DEFAULT_API_TIMEOUT_SECS),
        };

        Ok(Self {
            api_base_url,
            port,
            cookie_secure: env_bool("COOKIE_SECURE").unwrap_or(true),
            api_timeout,
        })
    }
}

/// Trim whitespace and trailing slashes; reject values that are not http(s) URLs.
pub(crate) fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    match url::Url::parse(trimmed) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(trimmed.to_owned()),
        _ => Err(ConfigError::Invalid { key: "SOCIALITY_API_URL", value: raw.to_owned() }),
    }
}

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

/// A whole number of seconds greater than zero.
fn parse_timeout_secs(raw: &str) -> Option<Duration> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
