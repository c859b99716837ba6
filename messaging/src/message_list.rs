//! Message rows: ownership, new-message highlight, pending sends and markup.

#[cfg(test)]
#[path = "message_list_test.rs"]
mod message_list_test;

use uuid::Uuid;

use crate::markup::{self, Span};
use crate::model::{Message, Viewer, from_epoch_ms};

/// Id prefix for optimistic messages that the store has not confirmed yet.
pub const PENDING_ID_PREFIX: &str = "pending-";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageRow {
    pub message: Message,
    /// Sent by the viewer: right-aligned, own bubble colour.
    pub own: bool,
    /// Someone else's message newer than the viewer's last read.
    pub new: bool,
    /// Optimistic send still in flight.
    pub pending: bool,
    pub spans: Vec<Span>,
}

#[must_use]
pub fn is_own(message: &Message, viewer_id: &str) -> bool {
    message.sender_id == viewer_id
}

#[must_use]
pub fn is_new(message: &Message, viewer_id: &str, last_read_ms: Option<i64>) -> bool {
    if is_own(message, viewer_id) {
        return false;
    }
    last_read_ms.is_some_and(|read| message.created_ms() > read)
}

#[must_use]
pub fn is_pending_id(id: &str) -> bool {
    id.starts_with(PENDING_ID_PREFIX)
}

/// Rows for `messages`, treating messages with a [`PENDING_ID_PREFIX`] id as pending.
#[must_use]
pub fn build_rows(messages: &[Message], viewer_id: &str, last_read_ms: Option<i64>) -> Vec<MessageRow> {
    build_rows_with(messages, viewer_id, last_read_ms, |m| is_pending_id(&m.id))
}

/// Rows for `messages` with a caller-supplied pending predicate.
pub fn build_rows_with<F>(
    messages: &[Message],
    viewer_id: &str,
    last_read_ms: Option<i64>,
    is_pending: F,
) -> Vec<MessageRow>
where
    F: Fn(&Message) -> bool,
{
    messages
        .iter()
        .map(|message| MessageRow {
            own: is_own(message, viewer_id),
            new: is_new(message, viewer_id, last_read_ms),
            pending: is_pending(message),
            spans: markup::parse(&message.body),
            message: message.clone(),
        })
        .collect()
}

/// Local placeholder shown while a send is in flight.
#[must_use]
pub fn optimistic_message(thread_id: &str, viewer: &Viewer, body: &str, now_ms: i64) -> Message {
    Message {
        id: format!("{PENDING_ID_PREFIX}{}", Uuid::new_v4()),
        thread_id: thread_id.to_owned(),
        sender_id: viewer.id.clone(),
        sender_name: Some(viewer.display_name().to_owned()),
        body: body.to_owned(),
        created_at: from_epoch_ms(now_ms),
    }
}

/// Replace the shown list with `fetched`, keeping optimistic messages that
/// are still in flight at the end.
#[must_use]
pub fn merge_fetched(current: &[Message], fetched: Vec<Message>) -> Vec<Message> {
    let mut merged = fetched;
    merged.extend(current.iter().filter(|m| is_pending_id(&m.id)).cloned());
    merged
}

/// Swap the optimistic placeholder `pending_id` for the stored message. If a
/// refresh already brought the stored copy in, the placeholder is dropped.
///
/// A list holding neither is left alone: it belongs to another thread, or a
/// fetch replaced it, and the next fetch brings the message in.
pub fn confirm_pending(messages: &mut Vec<Message>, pending_id: &str, stored: Message) {
    if messages.iter().any(|m| m.id == stored.id) {
        messages.retain(|m| m.id != pending_id);
        return;
    }
    if let Some(slot) = messages.iter_mut().find(|m| m.id == pending_id) {
        *slot = stored;
    }
}

/// Drop a placeholder whose send failed.
pub fn discard_pending(messages: &mut Vec<Message>, pending_id: &str) {
    messages.retain(|m| m.id != pending_id);
}
