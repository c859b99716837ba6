use messaging::notify::{ChatMessageNotice, CollaboratorStatusChanged};

use super::*;
use crate::state::test_helpers::test_app_state;

fn chat(recipient_id: &str, event_id: &str) -> NotificationRequest {
    NotificationRequest::ChatMessage(ChatMessageNotice {
        recipient_email: format!("  {}@Example.com ", recipient_id.to_uppercase()),
        recipient_id: recipient_id.into(),
        event_id: event_id.into(),
        event_name: "Spring Gala".into(),
        sender_name: "Ana".into(),
        message_preview: "Menu is final".into(),
    })
}

fn status_change(email: &str) -> NotificationRequest {
    NotificationRequest::CollaboratorStatusChanged(CollaboratorStatusChanged {
        recipient_email: email.into(),
        event_id: "e1".into(),
        event_name: "Spring Gala".into(),
        collaborator_name: "Bo".into(),
        status: "accepted".into(),
    })
}

#[test]
fn normalize_email_accepts_basic_address() {
    assert_eq!(normalize_email("  USER@Example.com "), Some("user@example.com".to_owned()));
}

#[test]
fn normalize_email_rejects_invalid_values() {
    assert_eq!(normalize_email(""), None);
    assert_eq!(normalize_email("user"), None);
    assert_eq!(normalize_email("@example.com"), None);
    assert_eq!(normalize_email("user@"), None);
    assert_eq!(normalize_email("a@b@c"), None);
}

#[tokio::test]
async fn sends_to_normalized_recipient() {
    let (state, mailer) = test_app_state();
    let delivery = handle(&state, &chat("bo", "e1")).await.unwrap();
    assert!(!delivery.skipped);

    let sent = mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "bo@example.com");
    assert_eq!(sent[0].subject, "New message about Spring Gala");
    assert!(sent[0].html.contains("https://events.test/events/e1/messages"));
}

#[tokio::test]
async fn invalid_recipient_is_rejected_before_sending() {
    let (state, mailer) = test_app_state();
    let err = handle(&state, &status_change("not-an-email")).await.unwrap_err();
    assert!(matches!(err, NotifyError::InvalidEmail));
    assert!(mailer.sent().is_empty());
}

#[tokio::test]
async fn repeat_chat_is_skipped_by_cooldown() {
    let (state, mailer) = test_app_state();
    handle(&state, &chat("bo", "e1")).await.unwrap();
    let second = handle(&state, &chat("bo", "e1")).await.unwrap();
    assert!(second.skipped);
    assert_eq!(mailer.sent().len(), 1);

    // Another event or recipient is not affected.
    assert!(!handle(&state, &chat("bo", "e2")).await.unwrap().skipped);
    assert!(!handle(&state, &chat("cy", "e1")).await.unwrap().skipped);
}

#[tokio::test]
async fn other_types_are_never_rate_limited() {
    let (state, mailer) = test_app_state();
    for _ in 0..3 {
        assert!(!handle(&state, &status_change("bo@example.com")).await.unwrap().skipped);
    }
    assert_eq!(mailer.sent().len(), 3);
}

#[tokio::test]
async fn failed_chat_delivery_does_not_start_cooldown() {
    let (state, mailer) = test_app_state();
    mailer.set_fail(true);
    assert!(matches!(handle(&state, &chat("bo", "e1")).await, Err(NotifyError::Mail(_))));
    assert_eq!(state.cooldown.tracked_pairs(), 0);

    mailer.set_fail(false);
    assert!(!handle(&state, &chat("bo", "e1")).await.unwrap().skipped);
}
