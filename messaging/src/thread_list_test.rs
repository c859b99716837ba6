use super::*;
use crate::model::test_helpers::{thread, thread_with_last};
use crate::read_state::ReadStateStore;
use crate::storage::MemoryKeyValueStore;
use crate::time_label::{DAY_MS, MINUTE_MS};

const VIEWER: &str = "me";
const OTHER: &str = "vendor";
const NOW: i64 = 1_792_324_800_000;

// =============================================================================
// is_unread
// =============================================================================

#[test]
fn thread_without_messages_is_read() {
    assert!(!is_unread(&thread("t", "e", 0), VIEWER, None));
}

#[test]
fn message_from_other_without_marker_is_unread() {
    assert!(is_unread(&thread_with_last("t", "e", OTHER, 100), VIEWER, None));
}

#[test]
fn own_last_message_is_never_unread() {
    assert!(!is_unread(&thread_with_last("t", "e", VIEWER, 100), VIEWER, None));
    assert!(!is_unread(&thread_with_last("t", "e", VIEWER, 100), VIEWER, Some(0)));
}

#[test]
fn marker_must_be_strictly_older() {
    let t = thread_with_last("t", "e", OTHER, 100);
    assert!(is_unread(&t, VIEWER, Some(99)));
    assert!(!is_unread(&t, VIEWER, Some(100)));
    assert!(!is_unread(&t, VIEWER, Some(101)));
}

#[test]
fn two_thread_scenario_marks_only_fresh_foreign_thread_unread() {
    let a = thread_with_last("A", "e1", OTHER, NOW - 10 * MINUTE_MS);
    let b = thread_with_last("B", "e2", VIEWER, NOW - 2 * DAY_MS);
    let reads = ReadStateStore::new(MemoryKeyValueStore::new());

    let rows = build_rows(&[a.clone(), b.clone()], VIEWER, &reads.load(), TimeLabeler::utc(), NOW);
    assert!(rows[0].unread);
    assert!(!rows[1].unread);
    assert_eq!(rows[0].time_label.as_deref(), Some("10m ago"));
    assert_eq!(rows[1].time_label.as_deref(), Some("2d ago"));

    // Opening A writes "now" and clears its flag; B is untouched.
    let state = reads.mark_read("A", NOW);
    let rows = build_rows(&[a, b], VIEWER, &state, TimeLabeler::utc(), NOW);
    assert!(!rows[0].unread);
    assert!(!rows[1].unread);
    assert_eq!(state.last_read("B"), None);
}

#[test]
fn unread_count_counts_flagged_threads() {
    let threads = vec![
        thread_with_last("a", "e", OTHER, 10),
        thread_with_last("b", "e", OTHER, 10),
        thread_with_last("c", "e", VIEWER, 10),
        thread("d", "e", 10),
    ];
    let mut reads = ReadState::default();
    reads.mark("b", 20);
    assert_eq!(unread_count(&threads, VIEWER, &reads), 1);
}

#[test]
fn row_without_messages_has_no_time_label() {
    let rows = build_rows(&[thread("t", "e", 0)], VIEWER, &ReadState::default(), TimeLabeler::utc(), NOW);
    assert_eq!(rows[0].time_label, None);
}

// =============================================================================
// sort_by_recency
// =============================================================================

#[test]
fn sort_puts_latest_activity_first() {
    let mut threads = vec![
        thread("old", "e", 100),
        thread_with_last("active", "e", OTHER, 500),
        thread("new", "e", 300),
    ];
    sort_by_recency(&mut threads);
    let ids: Vec<_> = threads.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["active", "new", "old"]);
}

// =============================================================================
// ThreadListState
// =============================================================================

fn three() -> Vec<Thread> {
    vec![thread("a", "e", 0), thread("b", "e", 0), thread("c", "e", 0)]
}

#[test]
fn list_command_maps_keys() {
    assert_eq!(list_command("ArrowDown"), Some(ListCommand::Down));
    assert_eq!(list_command("ArrowUp"), Some(ListCommand::Up));
    assert_eq!(list_command("Home"), Some(ListCommand::First));
    assert_eq!(list_command("End"), Some(ListCommand::Last));
    assert_eq!(list_command("Enter"), Some(ListCommand::Open));
    assert_eq!(list_command("x"), None);
}

#[test]
fn cursor_starts_empty_and_enters_at_edges() {
    let mut list = ThreadListState::new(three());
    assert_eq!(list.cursor(), None);
    list.move_down();
    assert_eq!(list.cursor(), Some(0));

    let mut list = ThreadListState::new(three());
    list.move_up();
    assert_eq!(list.cursor(), Some(2));
}

#[test]
fn cursor_clamps_at_both_ends() {
    let mut list = ThreadListState::new(three());
    list.move_last();
    list.move_down();
    assert_eq!(list.cursor(), Some(2));
    list.move_first();
    list.move_up();
    assert_eq!(list.cursor(), Some(0));
}

#[test]
fn open_returns_selected_thread() {
    let mut list = ThreadListState::new(three());
    assert_eq!(list.apply(ListCommand::Open), None);
    list.apply(ListCommand::Down);
    list.apply(ListCommand::Down);
    assert_eq!(list.apply(ListCommand::Open).map(|t| t.id), Some("b".to_owned()));
}

#[test]
fn replace_clamps_cursor_to_shorter_list() {
    let mut list = ThreadListState::new(three());
    list.move_last();
    list.replace(vec![thread("x", "e", 0)]);
    assert_eq!(list.cursor(), Some(0));
    list.replace(Vec::new());
    assert_eq!(list.cursor(), None);
    assert!(list.selected().is_none());
}

#[test]
fn replace_keeps_absent_cursor_absent() {
    let mut list = ThreadListState::new(three());
    list.replace(three());
    assert_eq!(list.cursor(), None);
}

#[test]
fn movement_on_empty_list_is_a_no_op() {
    let mut list = ThreadListState::default();
    list.move_down();
    list.move_up();
    list.move_last();
    assert_eq!(list.cursor(), None);
}

#[test]
fn focus_moves_cursor_to_thread() {
    let mut list = ThreadListState::new(three());
    list.focus("c");
    assert_eq!(list.selected().map(|t| t.id.as_str()), Some("c"));
    list.focus("missing");
    assert_eq!(list.cursor(), Some(2));
}
