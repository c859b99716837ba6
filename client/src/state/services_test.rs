use super::*;
use messaging::rate_limit::CHAT_NOTIFICATION_COOLDOWN_MS;

#[test]
fn dispatcher_uses_eight_hour_chat_cooldown() {
    let services = Services::new(&ClientConfig::from_parts(None, None, None), &AuthState::default());
    assert_eq!(services.dispatcher.limiter().cooldown_ms(), CHAT_NOTIFICATION_COOLDOWN_MS);
}

#[test]
fn native_read_state_starts_empty() {
    let services = Services::new(&ClientConfig::from_parts(None, None, None), &AuthState::default());
    assert!(services.read_state.load().is_empty());
}
