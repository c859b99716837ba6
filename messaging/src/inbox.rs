//! Inbox selection state and the flows that touch the store.
//!
//! The active thread is a local copy. Each refresh swaps in the fresh record
//! when the thread is still listed; nothing is reconciled beyond that.

#[cfg(test)]
#[path = "inbox_test.rs"]
mod inbox_test;

use crate::clock::Clock;
use crate::feed::{ThreadScope, load_threads};
use crate::markup;
use crate::model::{EventSummary, Message, NewMessage, Thread, Viewer};
use crate::notify::{ChatMessageNotice, DispatchOutcome, NotificationDispatcher, NotificationTransport};
use crate::storage::KeyValueStore;
use crate::store::{StoreError, ThreadStore};

/// Characters of the message body quoted in a chat notification.
pub const NOTIFICATION_PREVIEW_CHARS: usize = 100;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InboxState {
    pub threads: Vec<Thread>,
    pub active: Option<Thread>,
    pub loading: bool,
    /// New-conversation picker is open.
    pub composing: bool,
}

impl InboxState {
    pub fn begin_refresh(&mut self) {
        self.loading = true;
    }

    /// Replace the list with a fetch result.
    pub fn apply_threads(&mut self, threads: Vec<Thread>) {
        if let Some(active) = self.active.as_mut() {
            if let Some(fresh) = threads.iter().find(|t| t.id == active.id) {
                active.clone_from(fresh);
            }
        }
        self.threads = threads;
        self.loading = false;
    }

    pub fn select(&mut self, thread: Thread) {
        self.active = Some(thread);
        self.composing = false;
    }

    pub fn clear_selection(&mut self) {
        self.active = None;
    }

    #[must_use]
    pub fn active_id(&self) -> Option<&str> {
        self.active.as_ref().map(|t| t.id.as_str())
    }

    pub fn start_composing(&mut self) {
        self.composing = true;
    }

    pub fn cancel_composing(&mut self) {
        self.composing = false;
    }

    /// Activate a conversation opened with [`open_conversation`].
    pub fn apply_opened(&mut self, opened: OpenedConversation) {
        self.select(opened.thread);
        self.apply_threads(opened.threads);
    }
}

/// Result of the new-conversation flow.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenedConversation {
    pub thread: Thread,
    /// The refreshed list for the inbox scope.
    pub threads: Vec<Thread>,
}

/// Get or create `event`'s thread, labelled with the event name, then reload
/// the list for `scope`.
///
/// # Errors
///
/// Returns the store error if the thread could not be fetched or created.
pub async fn open_conversation<S>(
    store: &S,
    event: &EventSummary,
    scope: &ThreadScope,
) -> Result<OpenedConversation, StoreError>
where
    S: ThreadStore + ?Sized,
{
    let thread = store.get_or_create_thread(&event.id, &event.name).await?;
    tracing::info!(thread = %thread.id, event = %event.id, "conversation opened");
    let threads = load_threads(store, scope).await;
    Ok(OpenedConversation { thread, threads })
}

/// Store a message from `sender` in `thread`, then notify every other
/// participant of the event.
///
/// Notification outcomes are logged and never change the result.
///
/// # Errors
///
/// Returns the store error if the message itself could not be stored.
pub async fn send_chat_message<S, T, K, C>(
    store: &S,
    dispatcher: &NotificationDispatcher<T, K, C>,
    thread: &Thread,
    sender: &Viewer,
    body: &str,
) -> Result<Message, StoreError>
where
    S: ThreadStore + ?Sized,
    T: NotificationTransport,
    K: KeyValueStore,
    C: Clock,
{
    let message = post_chat_message(store, thread, sender, body).await?;
    notify_chat_participants(store, dispatcher, thread, sender, body).await;
    Ok(message)
}

/// Store a message without notifying anyone.
///
/// # Errors
///
/// Returns the store error if the insert fails.
pub async fn post_chat_message<S>(store: &S, thread: &Thread, sender: &Viewer, body: &str) -> Result<Message, StoreError>
where
    S: ThreadStore + ?Sized,
{
    store
        .send_message(&NewMessage {
            thread_id: thread.id.clone(),
            sender_id: sender.id.clone(),
            sender_name: Some(sender.display_name().to_owned()),
            body: body.to_owned(),
        })
        .await
}

/// Send a chat notification to every participant of `thread`'s event except
/// `sender`. Returns each recipient's outcome.
pub async fn notify_chat_participants<S, T, K, C>(
    store: &S,
    dispatcher: &NotificationDispatcher<T, K, C>,
    thread: &Thread,
    sender: &Viewer,
    body: &str,
) -> Vec<(String, DispatchOutcome)>
where
    S: ThreadStore + ?Sized,
    T: NotificationTransport,
    K: KeyValueStore,
    C: Clock,
{
    let participants = match store.event_participants(&thread.event_id).await {
        Ok(participants) => participants,
        Err(e) => {
            tracing::warn!(error = %e, event = %thread.event_id, "skipping chat notifications");
            return Vec::new();
        }
    };

    let preview = markup::preview(body, NOTIFICATION_PREVIEW_CHARS);
    let mut outcomes = Vec::new();
    for participant in participants.into_iter().filter(|p| p.user_id != sender.id) {
        let outcome = dispatcher
            .chat_message(ChatMessageNotice {
                recipient_email: participant.email,
                recipient_id: participant.user_id.clone(),
                event_id: thread.event_id.clone(),
                event_name: thread.subject.clone(),
                sender_name: sender.display_name().to_owned(),
                message_preview: preview.clone(),
            })
            .await;
        tracing::debug!(recipient = %participant.user_id, ?outcome, "chat notification");
        outcomes.push((participant.user_id, outcome));
    }
    outcomes
}
