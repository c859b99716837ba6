use super::*;
use messaging::storage::MemoryKeyValueStore;

#[test]
fn missing_session_is_signed_out() {
    let state = AuthState::load(&MemoryKeyValueStore::new());
    assert_eq!(state, AuthState::default());
    assert_eq!(state.viewer_id(), None);
}

#[test]
fn session_yields_viewer_and_token() {
    let store = MemoryKeyValueStore::new();
    store
        .set(
            AUTH_SESSION_KEY,
            r#"{"access_token":"jwt","user":{"id":"u1","email":"ana@example.com","user_metadata":{"full_name":"Ana Ruiz"}}}"#,
        )
        .unwrap();
    let state = AuthState::load(&store);
    assert_eq!(state.access_token.as_deref(), Some("jwt"));
    let viewer = state.viewer.unwrap();
    assert_eq!(viewer.id, "u1");
    assert_eq!(viewer.display_name(), "Ana Ruiz");
}

#[test]
fn explicit_name_wins_over_full_name() {
    let store = MemoryKeyValueStore::new();
    store
        .set(
            AUTH_SESSION_KEY,
            r#"{"access_token":"t","user":{"id":"u1","email":"a@example.com","user_metadata":{"name":"Ana","full_name":"Ana Ruiz"}}}"#,
        )
        .unwrap();
    assert_eq!(AuthState::load(&store).viewer.unwrap().name.as_deref(), Some("Ana"));
}

#[test]
fn corrupt_session_is_signed_out() {
    let store = MemoryKeyValueStore::new();
    store.set(AUTH_SESSION_KEY, "{not json").unwrap();
    assert!(AuthState::load(&store).viewer.is_none());
}
