use super::*;

fn backend(token: Option<&str>) -> RestBackend {
    let config = ClientConfig::from_parts(Some("https://data.example.com"), Some("anon-key"), None);
    RestBackend::new(config, token.map(str::to_owned))
}

#[test]
fn table_url_without_query_is_bare() {
    assert_eq!(table_url("https://x/rest/v1/events", &[]), "https://x/rest/v1/events");
}

#[test]
fn filters_are_encoded() {
    let url = backend(None).url("event_threads", &[("event_id", eq("a b&c")), ("select", "*".into())]);
    assert_eq!(url, "https://data.example.com/rest/v1/event_threads?event_id=eq.a%20b%26c&select=*");
}

#[test]
fn select_lists_keep_commas() {
    assert_eq!(encode_component("id,name,owner_id"), "id,name,owner_id");
    assert_eq!(encode_component("créé"), "cr%C3%A9%C3%A9");
}

#[test]
fn bearer_prefers_session_token() {
    assert_eq!(backend(Some("jwt")).bearer(), "Bearer jwt");
    assert_eq!(backend(None).bearer(), "Bearer anon-key");
}

#[test]
fn new_thread_payload_matches_columns() {
    let json = serde_json::to_value(NewThread { event_id: "e1", subject: "Gala" }).unwrap();
    assert_eq!(json, serde_json::json!({ "event_id": "e1", "subject": "Gala" }));
}
