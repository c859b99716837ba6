use super::*;
use crate::storage::MemoryKeyValueStore;

#[test]
fn storage_key_names_the_pair() {
    assert_eq!(storage_key("u-1", "e-9"), "chat_notification_sent_u-1_e-9");
}

#[test]
fn first_send_is_allowed() {
    let limiter = ChatRateLimiter::new(MemoryKeyValueStore::new());
    assert!(limiter.allows("u", "e", 0));
    assert_eq!(limiter.remaining("u", "e", 0), None);
}

#[test]
fn within_cooldown_reports_remaining_time() {
    let limiter = ChatRateLimiter::new(MemoryKeyValueStore::new());
    limiter.record("u", "e", 0);
    assert_eq!(limiter.remaining("u", "e", 4 * HOUR_MS), Some(4 * HOUR_MS));
    assert!(!limiter.allows("u", "e", CHAT_NOTIFICATION_COOLDOWN_MS - 1));
}

#[test]
fn cooldown_boundary_is_allowed() {
    let limiter = ChatRateLimiter::new(MemoryKeyValueStore::new());
    limiter.record("u", "e", 1_000);
    assert!(limiter.allows("u", "e", 1_000 + CHAT_NOTIFICATION_COOLDOWN_MS));
}

#[test]
fn pairs_are_independent() {
    let limiter = ChatRateLimiter::new(MemoryKeyValueStore::new());
    limiter.record("u", "e1", 0);
    assert!(limiter.allows("u", "e2", 1));
    assert!(limiter.allows("v", "e1", 1));
    assert!(!limiter.allows("u", "e1", 1));
}

#[test]
fn marker_from_the_future_blocks_for_one_cooldown_at_most() {
    let limiter = ChatRateLimiter::new(MemoryKeyValueStore::new());
    limiter.record("u", "e", 10 * HOUR_MS);
    assert_eq!(limiter.remaining("u", "e", 0), Some(CHAT_NOTIFICATION_COOLDOWN_MS));
}

#[test]
fn garbage_marker_is_ignored() {
    let kv = MemoryKeyValueStore::new();
    kv.set(&storage_key("u", "e"), "yesterday").unwrap();
    let limiter = ChatRateLimiter::new(kv);
    assert_eq!(limiter.last_sent("u", "e"), None);
    assert!(limiter.allows("u", "e", 0));
}

#[test]
fn custom_cooldown_is_respected() {
    let limiter = ChatRateLimiter::with_cooldown(MemoryKeyValueStore::new(), 1_000);
    limiter.record("u", "e", 0);
    assert!(!limiter.allows("u", "e", 999));
    assert!(limiter.allows("u", "e", 1_000));
}
