//! Handling of one notification request.
//!
//! Validate the recipient, apply the chat cooldown, render, deliver. Chat
//! requests inside the cooldown succeed with `skipped = true` so the browser
//! treats them like its own local skip.

#[cfg(test)]
#[path = "notification_test.rs"]
mod notification_test;

use messaging::notify::NotificationRequest;

use crate::services::mailer::{MailError, OutgoingEmail};
use crate::services::templates;
use crate::state::AppState;

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("invalid recipient email")]
    InvalidEmail,
    #[error(transparent)]
    Mail(#[from] MailError),
}

/// What happened to a valid request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Delivery {
    pub skipped: bool,
}

#[must_use]
pub fn normalize_email(email: &str) -> Option<String> {
    let normalized = email.trim().to_ascii_lowercase();
    let (local, domain) = normalized.split_once('@')?;
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return None;
    }
    Some(normalized)
}

/// Process `request` against `state`.
///
/// # Errors
///
/// [`NotifyError::InvalidEmail`] for a malformed recipient, or the mailer's
/// error when delivery fails. A failed chat delivery leaves the cooldown as
/// it was.
pub async fn handle(state: &AppState, request: &NotificationRequest) -> Result<Delivery, NotifyError> {
    let kind = request.kind();
    let recipient = normalize_email(request.recipient_email()).ok_or(NotifyError::InvalidEmail)?;

    let reservation = match request {
        NotificationRequest::ChatMessage(notice) => match state.cooldown.reserve(&notice.recipient_id, &notice.event_id) {
            Ok(reservation) => {
                tracing::debug!(pairs = state.cooldown.tracked_pairs(), "chat cooldown reserved");
                Some(reservation)
            }
            Err(active) => {
                tracing::info!(
                    %kind,
                    recipient = %notice.recipient_id,
                    event = %notice.event_id,
                    retry_after_secs = active.retry_after_secs,
                    "chat notification skipped by cooldown"
                );
                return Ok(Delivery { skipped: true });
            }
        },
        _ => None,
    };

    let rendered = templates::render(request, &state.config.app_base_url);
    let email = OutgoingEmail { to: recipient, subject: rendered.subject, html: rendered.html };
    if let Err(e) = state.mailer.send(&email).await {
        tracing::warn!(%kind, error = %e, event = %request.event_id(), "notification delivery failed");
        if let Some(reservation) = reservation {
            state.cooldown.release(reservation);
        }
        return Err(e.into());
    }

    tracing::info!(%kind, event = %request.event_id(), "notification sent");
    Ok(Delivery { skipped: false })
}
