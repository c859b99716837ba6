//! Notification payloads and the best-effort dispatcher.
//!
//! DESIGN
//! ======
//! Every notification goes through one remote endpoint and is told apart by
//! the `notification_type` tag. Dispatch never fails the caller: transport
//! errors are logged and come back as [`DispatchOutcome::Failed`], so the
//! action that triggered the notification (task creation, invite, message
//! send) always completes.
//!
//! Chat notifications alone pass through [`ChatRateLimiter`]. The marker is
//! written only after the endpoint reports a real delivery, so a pair with a
//! delivery still in flight is held in memory and a second send for it is
//! skipped rather than racing the first past the cooldown check.

#[cfg(test)]
#[path = "notify_test.rs"]
mod notify_test;

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::rate_limit::{ChatRateLimiter, storage_key};
use crate::storage::KeyValueStore;

// =============================================================================
// PAYLOADS
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskAssigned {
    pub recipient_email: String,
    pub event_id: String,
    pub event_name: String,
    pub assigner_name: String,
    pub task_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollaboratorInvitation {
    pub recipient_email: String,
    pub event_id: String,
    pub event_name: String,
    pub inviter_name: String,
    pub invitation_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessageNotice {
    pub recipient_email: String,
    pub recipient_id: String,
    pub event_id: String,
    pub event_name: String,
    pub sender_name: String,
    pub message_preview: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventUpdated {
    pub recipient_email: String,
    pub event_id: String,
    pub event_name: String,
    pub updater_name: String,
    #[serde(default)]
    pub changes: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollaboratorStatusChanged {
    pub recipient_email: String,
    pub event_id: String,
    pub event_name: String,
    pub collaborator_name: String,
    pub status: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorInvitation {
    pub recipient_email: String,
    pub event_id: String,
    pub event_name: String,
    pub inviter_name: String,
    pub vendor_name: String,
    pub invitation_token: String,
}

/// Body of a call to the notification endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "notification_type", rename_all = "snake_case")]
pub enum NotificationRequest {
    TaskAssigned(TaskAssigned),
    CollaboratorInvitation(CollaboratorInvitation),
    ChatMessage(ChatMessageNotice),
    EventUpdated(EventUpdated),
    CollaboratorStatusChanged(CollaboratorStatusChanged),
    VendorInvitation(VendorInvitation),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    TaskAssigned,
    CollaboratorInvitation,
    ChatMessage,
    EventUpdated,
    CollaboratorStatusChanged,
    VendorInvitation,
}

impl NotificationKind {
    /// Wire tag.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TaskAssigned => "task_assigned",
            Self::CollaboratorInvitation => "collaborator_invitation",
            Self::ChatMessage => "chat_message",
            Self::EventUpdated => "event_updated",
            Self::CollaboratorStatusChanged => "collaborator_status_changed",
            Self::VendorInvitation => "vendor_invitation",
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl NotificationRequest {
    #[must_use]
    pub fn kind(&self) -> NotificationKind {
        match self {
            Self::TaskAssigned(_) => NotificationKind::TaskAssigned,
            Self::CollaboratorInvitation(_) => NotificationKind::CollaboratorInvitation,
            Self::ChatMessage(_) => NotificationKind::ChatMessage,
            Self::EventUpdated(_) => NotificationKind::EventUpdated,
            Self::CollaboratorStatusChanged(_) => NotificationKind::CollaboratorStatusChanged,
            Self::VendorInvitation(_) => NotificationKind::VendorInvitation,
        }
    }

    #[must_use]
    pub fn recipient_email(&self) -> &str {
        match self {
            Self::TaskAssigned(n) => &n.recipient_email,
            Self::CollaboratorInvitation(n) => &n.recipient_email,
            Self::ChatMessage(n) => &n.recipient_email,
            Self::EventUpdated(n) => &n.recipient_email,
            Self::CollaboratorStatusChanged(n) => &n.recipient_email,
            Self::VendorInvitation(n) => &n.recipient_email,
        }
    }

    #[must_use]
    pub fn event_id(&self) -> &str {
        match self {
            Self::TaskAssigned(n) => &n.event_id,
            Self::CollaboratorInvitation(n) => &n.event_id,
            Self::ChatMessage(n) => &n.event_id,
            Self::EventUpdated(n) => &n.event_id,
            Self::CollaboratorStatusChanged(n) => &n.event_id,
            Self::VendorInvitation(n) => &n.event_id,
        }
    }

    #[must_use]
    pub fn event_name(&self) -> &str {
        match self {
            Self::TaskAssigned(n) => &n.event_name,
            Self::CollaboratorInvitation(n) => &n.event_name,
            Self::ChatMessage(n) => &n.event_name,
            Self::EventUpdated(n) => &n.event_name,
            Self::CollaboratorStatusChanged(n) => &n.event_name,
            Self::VendorInvitation(n) => &n.event_name,
        }
    }
}

// =============================================================================
// TRANSPORT
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("notification endpoint not available in this environment")]
    Unavailable,
    #[error("notification request failed: {0}")]
    Request(String),
    #[error("notification endpoint returned status {0}")]
    Status(u16),
    #[error("notification endpoint response malformed: {0}")]
    Decode(String),
}

/// Endpoint reply.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportReceipt {
    /// The endpoint accepted the call but chose not to deliver.
    #[serde(default)]
    pub skipped: bool,
}

#[async_trait::async_trait(?Send)]
pub trait NotificationTransport {
    /// One remote call per request.
    async fn deliver(&self, request: &NotificationRequest) -> Result<TransportReceipt, TransportError>;
}

// =============================================================================
// DISPATCHER
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DispatchOutcome {
    Sent,
    /// Not delivered and not an error. `retry_after_ms` is known when the
    /// local cooldown made the call.
    Skipped { retry_after_ms: Option<i64> },
    Failed(String),
}

impl DispatchOutcome {
    #[must_use]
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent)
    }

    #[must_use]
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }
}

pub struct NotificationDispatcher<T, S, C> {
    transport: T,
    limiter: ChatRateLimiter<S>,
    clock: C,
    in_flight: Mutex<HashSet<String>>,
}

impl<T, S, C> NotificationDispatcher<T, S, C>
where
    T: NotificationTransport,
    S: KeyValueStore,
    C: Clock,
{
    pub fn new(transport: T, store: S, clock: C) -> Self {
        Self { transport, limiter: ChatRateLimiter::new(store), clock, in_flight: Mutex::new(HashSet::new()) }
    }

    pub fn limiter(&self) -> &ChatRateLimiter<S> {
        &self.limiter
    }

    pub async fn task_assigned(&self, notice: TaskAssigned) -> DispatchOutcome {
        self.dispatch(NotificationRequest::TaskAssigned(notice)).await
    }

    pub async fn collaborator_invitation(&self, notice: CollaboratorInvitation) -> DispatchOutcome {
        self.dispatch(NotificationRequest::CollaboratorInvitation(notice)).await
    }

    pub async fn chat_message(&self, notice: ChatMessageNotice) -> DispatchOutcome {
        self.dispatch(NotificationRequest::ChatMessage(notice)).await
    }

    pub async fn event_updated(&self, notice: EventUpdated) -> DispatchOutcome {
        self.dispatch(NotificationRequest::EventUpdated(notice)).await
    }

    pub async fn collaborator_status_changed(&self, notice: CollaboratorStatusChanged) -> DispatchOutcome {
        self.dispatch(NotificationRequest::CollaboratorStatusChanged(notice)).await
    }

    pub async fn vendor_invitation(&self, notice: VendorInvitation) -> DispatchOutcome {
        self.dispatch(NotificationRequest::VendorInvitation(notice)).await
    }

    /// Send any request, applying the chat cooldown to chat messages.
    pub async fn dispatch(&self, request: NotificationRequest) -> DispatchOutcome {
        let NotificationRequest::ChatMessage(notice) = &request else {
            return self.deliver(&request).await;
        };

        let now = self.clock.now_ms();
        if let Some(remaining) = self.limiter.remaining(&notice.recipient_id, &notice.event_id, now) {
            tracing::debug!(
                recipient = %notice.recipient_id,
                event = %notice.event_id,
                remaining_ms = remaining,
                "chat notification suppressed by cooldown"
            );
            return DispatchOutcome::Skipped { retry_after_ms: Some(remaining) };
        }

        let key = storage_key(&notice.recipient_id, &notice.event_id);
        if !self.in_flight().insert(key.clone()) {
            tracing::debug!(
                recipient = %notice.recipient_id,
                event = %notice.event_id,
                "chat notification already in flight"
            );
            return DispatchOutcome::Skipped { retry_after_ms: None };
        }

        let outcome = self.deliver(&request).await;
        if outcome.is_sent() {
            self.limiter.record(&notice.recipient_id, &notice.event_id, now);
        }
        self.in_flight().remove(&key);
        outcome
    }

    fn in_flight(&self) -> std::sync::MutexGuard<'_, HashSet<String>> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn deliver(&self, request: &NotificationRequest) -> DispatchOutcome {
        let kind = request.kind();
        match self.transport.deliver(request).await {
            Ok(TransportReceipt { skipped: false }) => {
                tracing::debug!(%kind, event = %request.event_id(), "notification sent");
                DispatchOutcome::Sent
            }
            Ok(TransportReceipt { skipped: true }) => {
                tracing::debug!(%kind, event = %request.event_id(), "notification skipped by endpoint");
                DispatchOutcome::Skipped { retry_after_ms: None }
            }
            Err(e) => {
                tracing::warn!(error = %e, %kind, event = %request.event_id(), "notification dispatch failed");
                DispatchOutcome::Failed(e.to_string())
            }
        }
    }
}
