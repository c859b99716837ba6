//! Local cooldown for chat-message notifications.
//!
//! DESIGN
//! ======
//! One epoch-ms marker per (recipient, event) pair, stored under its own key.
//! A notification is allowed when no marker exists or at least the cooldown
//! has elapsed since it (the boundary itself is allowed).
//!
//! TRADE-OFFS
//! ==========
//! The marker lives in the sender's browser, so it throttles one device, not
//! the recipient's inbox. The notify server keeps its own cooldown for that.

#[cfg(test)]
#[path = "rate_limit_test.rs"]
mod rate_limit_test;

use crate::storage::KeyValueStore;
use crate::time_label::HOUR_MS;

pub const CHAT_NOTIFICATION_COOLDOWN_MS: i64 = 8 * HOUR_MS;
const KEY_PREFIX: &str = "chat_notification_sent";

#[must_use]
pub fn storage_key(recipient_id: &str, event_id: &str) -> String {
    format!("{KEY_PREFIX}_{recipient_id}_{event_id}")
}

#[derive(Clone, Debug)]
pub struct ChatRateLimiter<S> {
    store: S,
    cooldown_ms: i64,
}

impl<S: KeyValueStore> ChatRateLimiter<S> {
    pub fn new(store: S) -> Self {
        Self::with_cooldown(store, CHAT_NOTIFICATION_COOLDOWN_MS)
    }

    pub fn with_cooldown(store: S, cooldown_ms: i64) -> Self {
        Self { store, cooldown_ms: cooldown_ms.max(0) }
    }

    #[must_use]
    pub fn cooldown_ms(&self) -> i64 {
        self.cooldown_ms
    }

    /// Last recorded send for the pair. Unparseable markers read as absent.
    #[must_use]
    pub fn last_sent(&self, recipient_id: &str, event_id: &str) -> Option<i64> {
        self.store
            .get(&storage_key(recipient_id, event_id))
            .and_then(|raw| raw.trim().parse::<i64>().ok())
    }

    /// Milliseconds left in the cooldown, or `None` if a send is allowed now.
    #[must_use]
    pub fn remaining(&self, recipient_id: &str, event_id: &str, now_ms: i64) -> Option<i64> {
        let last = self.last_sent(recipient_id, event_id)?;
        let elapsed = now_ms.saturating_sub(last);
        if elapsed >= self.cooldown_ms {
            return None;
        }
        Some(self.cooldown_ms.saturating_sub(elapsed).min(self.cooldown_ms))
    }

    #[must_use]
    pub fn allows(&self, recipient_id: &str, event_id: &str, now_ms: i64) -> bool {
        self.remaining(recipient_id, event_id, now_ms).is_none()
    }

    /// Store `now_ms` as the pair's last send. Write failures are logged.
    pub fn record(&self, recipient_id: &str, event_id: &str, now_ms: i64) {
        let key = storage_key(recipient_id, event_id);
        if let Err(e) = self.store.set(&key, &now_ms.to_string()) {
            tracing::warn!(error = %e, %key, "failed to persist chat notification marker");
        }
    }
}
