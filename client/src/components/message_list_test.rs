use super::*;
use messaging::markup::parse;
use messaging::model::from_epoch_ms;

fn row(own: bool, new: bool, pending: bool) -> MessageRow {
    MessageRow {
        message: Message {
            id: "m1".into(),
            thread_id: "t1".into(),
            sender_id: "u1".into(),
            sender_name: Some("Bo".into()),
            body: "hi".into(),
            created_at: from_epoch_ms(0),
        },
        own,
        new,
        pending,
        spans: parse("hi"),
    }
}

#[test]
fn own_and_other_bubbles_align_differently() {
    assert_eq!(bubble_class(&row(true, false, false)), "message message--own");
    assert_eq!(bubble_class(&row(false, false, false)), "message message--other");
}

#[test]
fn new_and_pending_add_modifiers() {
    assert_eq!(bubble_class(&row(false, true, false)), "message message--other message--new");
    assert_eq!(bubble_class(&row(true, false, true)), "message message--own message--pending");
}

#[test]
fn pending_own_message_shows_sending() {
    assert_eq!(delivery_status(&row(true, false, true)), Some("Sending…"));
    assert_eq!(delivery_status(&row(true, false, false)), Some("✓"));
    assert_eq!(delivery_status(&row(false, true, false)), None);
}

#[test]
fn blank_sender_name_reads_unknown() {
    let mut message = row(false, false, false).message;
    assert_eq!(sender_label(&message), "Bo");
    message.sender_name = Some("  ".into());
    assert_eq!(sender_label(&message), "Unknown");
    message.sender_name = None;
    assert_eq!(sender_label(&message), "Unknown");
}
