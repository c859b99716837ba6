use std::collections::HashMap;

use super::*;

fn config_from(vars: &[(&str, &str)]) -> Result<NotifyConfig, ConfigError> {
    let vars: HashMap<String, String> = vars.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    NotifyConfig::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn defaults_apply_when_unset() {
    let config = config_from(&[]).unwrap();
    assert_eq!(config.port, DEFAULT_PORT);
    assert_eq!(config.resend_api_key, None);
    assert_eq!(config.from, DEFAULT_FROM);
    assert_eq!(config.app_base_url, DEFAULT_APP_BASE_URL);
    assert_eq!(config.chat_cooldown, Duration::from_secs(28_800));
}

#[test]
fn present_values_override_defaults() {
    let config = config_from(&[
        ("PORT", "8080"),
        ("RESEND_API_KEY", "re_123"),
        ("NOTIFY_FROM", "hello@events.test"),
        ("APP_BASE_URL", "https://events.test/"),
        ("CHAT_COOLDOWN_SECS", "60"),
    ])
    .unwrap();
    assert_eq!(config.port, 8080);
    assert_eq!(config.resend_api_key.as_deref(), Some("re_123"));
    assert_eq!(config.from, "hello@events.test");
    assert_eq!(config.app_base_url, "https://events.test");
    assert_eq!(config.chat_cooldown, Duration::from_secs(60));
}

#[test]
fn malformed_numbers_fall_back() {
    let config = config_from(&[("PORT", "eighty"), ("CHAT_COOLDOWN_SECS", "-5")]).unwrap();
    assert_eq!(config.port, DEFAULT_PORT);
    assert_eq!(config.chat_cooldown, Duration::from_secs(DEFAULT_CHAT_COOLDOWN_SECS));
}

#[test]
fn blank_api_key_means_log_only() {
    let config = config_from(&[("RESEND_API_KEY", "   ")]).unwrap();
    assert_eq!(config.resend_api_key, None);
}

#[test]
fn rejects_bad_base_url_and_sender() {
    assert_eq!(
        config_from(&[("APP_BASE_URL", "events.test")]).unwrap_err(),
        ConfigError::InvalidBaseUrl("events.test".into())
    );
    assert_eq!(
        config_from(&[("NOTIFY_FROM", "nobody")]).unwrap_err(),
        ConfigError::InvalidFrom("nobody".into())
    );
}
