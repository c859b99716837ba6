use super::*;
use crate::markup::SpanKind;
use crate::model::test_helpers::message;

const VIEWER: &str = "me";

#[test]
fn ownership_follows_sender_identity() {
    let rows = build_rows(
        &[message("1", "t", VIEWER, "mine", 10), message("2", "t", "them", "theirs", 20)],
        VIEWER,
        None,
    );
    assert!(rows[0].own);
    assert!(!rows[1].own);
}

#[test]
fn nothing_is_new_without_last_read() {
    let rows = build_rows(&[message("1", "t", "them", "hi", 10)], VIEWER, None);
    assert!(!rows[0].new);
}

#[test]
fn only_foreign_messages_strictly_after_last_read_are_new() {
    let messages = [
        message("1", "t", "them", "old", 100),
        message("2", "t", "them", "same instant", 200),
        message("3", "t", "them", "fresh", 201),
        message("4", "t", VIEWER, "mine", 300),
    ];
    let rows = build_rows(&messages, VIEWER, Some(200));
    let flags: Vec<bool> = rows.iter().map(|r| r.new).collect();
    assert_eq!(flags, [false, false, true, false]);
}

#[test]
fn bodies_are_tokenized() {
    let rows = build_rows(&[message("1", "t", "them", "**hi** there", 10)], VIEWER, None);
    assert_eq!(rows[0].spans[0].kind, SpanKind::Bold);
    assert_eq!(rows[0].spans[1].text, " there");
}

#[test]
fn optimistic_messages_render_pending() {
    let viewer = Viewer { id: VIEWER.into(), email: "me@example.com".into(), name: None };
    let pending = optimistic_message("t", &viewer, "on its way", 50);
    assert!(is_pending_id(&pending.id));
    assert_eq!(pending.sender_name.as_deref(), Some("me"));

    let rows = build_rows(&[message("1", "t", "them", "hi", 10), pending], VIEWER, None);
    assert!(!rows[0].pending);
    assert!(rows[1].pending);
    assert!(rows[1].own);
}

#[test]
fn custom_pending_predicate() {
    let rows = build_rows_with(&[message("x", "t", VIEWER, "hi", 10)], VIEWER, None, |m| m.id == "x");
    assert!(rows[0].pending);
}

#[test]
fn optimistic_ids_are_unique() {
    let viewer = Viewer { id: VIEWER.into(), email: "me@example.com".into(), name: None };
    let a = optimistic_message("t", &viewer, "a", 0);
    let b = optimistic_message("t", &viewer, "a", 0);
    assert_ne!(a.id, b.id);
}

#[test]
fn refresh_keeps_in_flight_placeholders() {
    let viewer = Viewer { id: VIEWER.into(), email: "me@example.com".into(), name: None };
    let pending = optimistic_message("t", &viewer, "sending", 30);
    let current = vec![message("1", "t", "them", "old", 10), pending.clone()];

    let merged = merge_fetched(&current, vec![message("1", "t", "them", "old", 10), message("2", "t", "them", "new", 20)]);
    let ids: Vec<&str> = merged.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, ["1", "2", pending.id.as_str()]);
}

#[test]
fn confirm_replaces_placeholder_in_place() {
    let viewer = Viewer { id: VIEWER.into(), email: "me@example.com".into(), name: None };
    let pending = optimistic_message("t", &viewer, "hi", 30);
    let mut messages = vec![pending.clone(), message("9", "t", "them", "later", 40)];

    confirm_pending(&mut messages, &pending.id, message("5", "t", VIEWER, "hi", 31));
    let ids: Vec<&str> = messages.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, ["5", "9"]);
}

#[test]
fn confirm_after_refresh_drops_placeholder() {
    let viewer = Viewer { id: VIEWER.into(), email: "me@example.com".into(), name: None };
    let pending = optimistic_message("t", &viewer, "hi", 30);
    let stored = message("5", "t", VIEWER, "hi", 31);
    let mut messages = vec![stored.clone(), pending.clone()];

    confirm_pending(&mut messages, &pending.id, stored);
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].id, "5");
}

#[test]
fn failed_placeholder_is_discarded() {
    let viewer = Viewer { id: VIEWER.into(), email: "me@example.com".into(), name: None };
    let pending = optimistic_message("t", &viewer, "hi", 30);
    let mut messages = vec![message("1", "t", "them", "old", 10), pending.clone()];
    discard_pending(&mut messages, &pending.id);
    assert_eq!(messages.len(), 1);
}

#[test]
fn confirm_leaves_another_threads_list_untouched() {
    let viewer = Viewer { id: VIEWER.into(), email: "me@example.com".into(), name: None };
    let pending = optimistic_message("thread-a", &viewer, "for a", 30);
    let mut shown = vec![message("b1", "thread-b", "them", "in b", 20)];

    confirm_pending(&mut shown, &pending.id, message("m-a", "thread-a", VIEWER, "for a", 31));
    let ids: Vec<&str> = shown.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, ["b1"]);
}
