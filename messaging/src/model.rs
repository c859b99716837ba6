//! Rows exchanged with the hosted data store.
//!
//! DESIGN
//! ======
//! Field names mirror the store's column names so rows deserialize without
//! renaming. Timestamps arrive as RFC 3339 strings (`timestamptz`) and are
//! kept as [`OffsetDateTime`]; local markers use epoch milliseconds, so the
//! conversion helpers live here too.

#[cfg(test)]
#[path = "model_test.rs"]
mod model_test;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Convert a timestamp to milliseconds since the Unix epoch.
#[must_use]
pub fn epoch_ms(ts: OffsetDateTime) -> i64 {
    i64::try_from(ts.unix_timestamp_nanos() / 1_000_000).unwrap_or(i64::MAX)
}

/// Convert milliseconds since the Unix epoch back to a UTC timestamp.
///
/// Out-of-range values clamp to the epoch.
#[must_use]
pub fn from_epoch_ms(ms: i64) -> OffsetDateTime {
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(ms) * 1_000_000).unwrap_or(OffsetDateTime::UNIX_EPOCH)
}

/// A conversation scoped to one event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thread {
    pub id: String,
    pub event_id: String,
    /// Label shown in the thread list (usually the event name).
    pub subject: String,
    #[serde(default)]
    pub last_message_preview: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub last_message_at: Option<OffsetDateTime>,
    #[serde(default)]
    pub last_message_sender_id: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Thread {
    /// Timestamp used for recency ordering.
    #[must_use]
    pub fn last_activity(&self) -> OffsetDateTime {
        self.last_message_at.unwrap_or(self.created_at)
    }

    #[must_use]
    pub fn last_message_ms(&self) -> Option<i64> {
        self.last_message_at.map(epoch_ms)
    }

    pub fn apply_summary(&mut self, update: ThreadSummaryUpdate) {
        self.last_message_preview = Some(update.last_message_preview);
        self.last_message_at = Some(update.last_message_at);
        self.last_message_sender_id = Some(update.last_message_sender_id);
    }
}

/// A single chat entry. Immutable once stored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub thread_id: String,
    pub sender_id: String,
    #[serde(default)]
    pub sender_name: Option<String>,
    pub body: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Message {
    #[must_use]
    pub fn created_ms(&self) -> i64 {
        epoch_ms(self.created_at)
    }
}

/// Insert payload for a new message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewMessage {
    pub thread_id: String,
    pub sender_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_name: Option<String>,
    pub body: String,
}

/// Characters kept in a thread's last-message preview.
pub const THREAD_PREVIEW_CHARS: usize = 120;

/// Patch for a thread's last-message fields after a send.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ThreadSummaryUpdate {
    pub last_message_preview: String,
    #[serde(with = "time::serde::rfc3339")]
    pub last_message_at: OffsetDateTime,
    pub last_message_sender_id: String,
}

impl ThreadSummaryUpdate {
    #[must_use]
    pub fn for_message(message: &Message) -> Self {
        Self {
            last_message_preview: crate::markup::preview(&message.body, THREAD_PREVIEW_CHARS),
            last_message_at: message.created_at,
            last_message_sender_id: message.sender_id.clone(),
        }
    }
}

/// An event the viewer owns, as listed in the new-conversation picker.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSummary {
    pub id: String,
    pub name: String,
    pub owner_id: String,
}

/// Someone who receives chat notifications for an event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub user_id: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl Participant {
    /// Name to address the participant by, falling back to the email's local part.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => self.email.split('@').next().unwrap_or(&self.email),
        }
    }
}

/// The signed-in user as reported by the hosted auth service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewer {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl Viewer {
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => self.email.split('@').next().unwrap_or(&self.email),
        }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use super::*;

    /// Thread created at `created_ms` with no messages.
    #[must_use]
    pub fn thread(id: &str, event_id: &str, created_ms: i64) -> Thread {
        Thread {
            id: id.to_owned(),
            event_id: event_id.to_owned(),
            subject: format!("Event {event_id}"),
            last_message_preview: None,
            last_message_at: None,
            last_message_sender_id: None,
            created_at: from_epoch_ms(created_ms),
        }
    }

    /// Thread whose last message was sent by `sender_id` at `last_ms`.
    #[must_use]
    pub fn thread_with_last(id: &str, event_id: &str, sender_id: &str, last_ms: i64) -> Thread {
        Thread {
            last_message_preview: Some("latest".to_owned()),
            last_message_at: Some(from_epoch_ms(last_ms)),
            last_message_sender_id: Some(sender_id.to_owned()),
            ..thread(id, event_id, 0)
        }
    }

    #[must_use]
    pub fn message(id: &str, thread_id: &str, sender_id: &str, body: &str, created_ms: i64) -> Message {
        Message {
            id: id.to_owned(),
            thread_id: thread_id.to_owned(),
            sender_id: sender_id.to_owned(),
            sender_name: None,
            body: body.to_owned(),
            created_at: from_epoch_ms(created_ms),
        }
    }
}
