//! Environment configuration for the notification endpoint.
//!
//! Variables (all optional):
//! - `PORT` listen port, default 3001
//! - `RESEND_API_KEY` enables real delivery; without it mail is only logged
//! - `NOTIFY_FROM` sender address
//! - `APP_BASE_URL` origin used for links back into the app
//! - `CHAT_COOLDOWN_SECS` per-recipient, per-event chat cooldown

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_FROM: &str = "Event Planner <notifications@example.com>";
pub const DEFAULT_APP_BASE_URL: &str = "http://localhost:3000";
/// Eight hours, matching the browser-side limiter.
pub const DEFAULT_CHAT_COOLDOWN_SECS: u64 = 8 * 60 * 60;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("APP_BASE_URL must start with http:// or https:// (got {0:?})")]
    InvalidBaseUrl(String),
    #[error("NOTIFY_FROM must contain an email address (got {0:?})")]
    InvalidFrom(String),
}

#[derive(Clone, Debug)]
pub struct NotifyConfig {
    pub port: u16,
    pub resend_api_key: Option<String>,
    pub from: String,
    /// No trailing slash.
    pub app_base_url: String,
    pub chat_cooldown: Duration,
}

impl NotifyConfig {
    /// Read configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when a present value is malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when a present value is malformed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        let app_base_url = non_empty("APP_BASE_URL").unwrap_or_else(|| DEFAULT_APP_BASE_URL.to_owned());
        if !(app_base_url.starts_with("http://") || app_base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(app_base_url));
        }
        let from = non_empty("NOTIFY_FROM").unwrap_or_else(|| DEFAULT_FROM.to_owned());
        if !from.contains('@') {
            return Err(ConfigError::InvalidFrom(from));
        }

        Ok(Self {
            port: env_parse(&lookup, "PORT", DEFAULT_PORT),
            resend_api_key: non_empty("RESEND_API_KEY"),
            from,
            app_base_url: app_base_url.trim_end_matches('/').to_owned(),
            chat_cooldown: Duration::from_secs(env_parse(&lookup, "CHAT_COOLDOWN_SECS", DEFAULT_CHAT_COOLDOWN_SECS)),
        })
    }
}

/// Parse `key`, falling back to `default` when missing or malformed.
fn env_parse<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    lookup(key)
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}
