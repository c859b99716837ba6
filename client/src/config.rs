//! Build-time client configuration.
//!
//! Values come from `option_env!` at compile time (the bundle has no runtime
//! environment) and fall back to a local development stack.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

const DEFAULT_DATA_API_URL: &str = "http://localhost:54321";
const DEFAULT_NOTIFY_URL: &str = "http://localhost:3001/functions/v1/send-notification";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the hosted data platform (REST lives under `/rest/v1`).
    pub data_api_url: String,
    /// Public (anon) API key sent with every data request.
    pub data_api_key: String,
    /// Full URL of the notification function.
    pub notify_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_parts(option_env!("DATA_API_URL"), option_env!("DATA_API_KEY"), option_env!("NOTIFY_URL"))
    }
}

impl ClientConfig {
    /// Build from optional raw values; blanks count as unset.
    #[must_use]
    pub fn from_parts(data_api_url: Option<&str>, data_api_key: Option<&str>, notify_url: Option<&str>) -> Self {
        let pick = |value: Option<&str>, default: &str| {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .unwrap_or(default)
                .trim_end_matches('/')
                .to_owned()
        };
        Self {
            data_api_url: pick(data_api_url, DEFAULT_DATA_API_URL),
            data_api_key: pick(data_api_key, ""),
            notify_url: pick(notify_url, DEFAULT_NOTIFY_URL),
        }
    }

    /// `/rest/v1/{table}` on the data platform.
    #[must_use]
    pub fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.data_api_url)
    }
}
