use super::*;

#[test]
fn unset_values_use_local_defaults() {
    let config = ClientConfig::from_parts(None, None, None);
    assert_eq!(config.data_api_url, "http://localhost:54321");
    assert_eq!(config.data_api_key, "");
    assert!(config.notify_url.ends_with("/functions/v1/send-notification"));
}

#[test]
fn blank_values_count_as_unset() {
    let config = ClientConfig::from_parts(Some("  "), Some(""), None);
    assert_eq!(config.data_api_url, "http://localhost:54321");
}

#[test]
fn trailing_slashes_are_dropped() {
    let config = ClientConfig::from_parts(Some("https://data.example.com/"), Some("anon"), Some("https://fn.example.com/notify/"));
    assert_eq!(config.rest_url("event_threads"), "https://data.example.com/rest/v1/event_threads");
    assert_eq!(config.notify_url, "https://fn.example.com/notify");
    assert_eq!(config.data_api_key, "anon");
}
