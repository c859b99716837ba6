//! Thread list ordering, unread detection and keyboard cursor.
//!
//! DESIGN
//! ======
//! Unread is a heuristic over three facts: the thread has a last message,
//! that message is newer than the local read marker (or there is none), and
//! the viewer did not send it. The cursor is plain index state so the list
//! can be replaced wholesale on every poll; replacement only clamps it.

#[cfg(test)]
#[path = "thread_list_test.rs"]
mod thread_list_test;

use crate::model::Thread;
use crate::read_state::ReadState;
use crate::time_label::TimeLabeler;

/// Whether `thread` should render as unread for `viewer_id`.
#[must_use]
pub fn is_unread(thread: &Thread, viewer_id: &str, last_read_ms: Option<i64>) -> bool {
    let Some(last_message_ms) = thread.last_message_ms() else {
        return false;
    };
    if thread.last_message_sender_id.as_deref() == Some(viewer_id) {
        return false;
    }
    last_read_ms.is_none_or(|read| last_message_ms > read)
}

/// Newest activity first; ties keep their incoming order.
pub fn sort_by_recency(threads: &mut [Thread]) {
    threads.sort_by(|a, b| b.last_activity().cmp(&a.last_activity()));
}

/// Render-ready row for one thread.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThreadRow {
    pub thread: Thread,
    pub unread: bool,
    pub time_label: Option<String>,
}

#[must_use]
pub fn build_rows(
    threads: &[Thread],
    viewer_id: &str,
    reads: &ReadState,
    labeler: TimeLabeler,
    now_ms: i64,
) -> Vec<ThreadRow> {
    threads
        .iter()
        .map(|thread| ThreadRow {
            unread: is_unread(thread, viewer_id, reads.last_read(&thread.id)),
            time_label: thread.last_message_ms().map(|ts| labeler.relative(ts, now_ms)),
            thread: thread.clone(),
        })
        .collect()
}

#[must_use]
pub fn unread_count(threads: &[Thread], viewer_id: &str, reads: &ReadState) -> usize {
    threads
        .iter()
        .filter(|t| is_unread(t, viewer_id, reads.last_read(&t.id)))
        .count()
}

// =============================================================================
// KEYBOARD CURSOR
// =============================================================================

/// Navigation commands the list understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListCommand {
    Up,
    Down,
    First,
    Last,
    Open,
}

/// Map a `KeyboardEvent.key` value to a list command.
#[must_use]
pub fn list_command(key: &str) -> Option<ListCommand> {
    match key {
        "ArrowUp" | "k" => Some(ListCommand::Up),
        "ArrowDown" | "j" => Some(ListCommand::Down),
        "Home" => Some(ListCommand::First),
        "End" => Some(ListCommand::Last),
        "Enter" | " " => Some(ListCommand::Open),
        _ => None,
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ThreadListState {
    threads: Vec<Thread>,
    cursor: Option<usize>,
}

impl ThreadListState {
    #[must_use]
    pub fn new(threads: Vec<Thread>) -> Self {
        Self { threads, cursor: None }
    }

    #[must_use]
    pub fn threads(&self) -> &[Thread] {
        &self.threads
    }

    #[must_use]
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    #[must_use]
    pub fn selected(&self) -> Option<&Thread> {
        self.cursor.and_then(|i| self.threads.get(i))
    }

    /// Swap in a new sequence, clamping the cursor into bounds.
    pub fn replace(&mut self, threads: Vec<Thread>) {
        self.threads = threads;
        self.cursor = match (self.cursor, self.threads.len()) {
            (_, 0) | (None, _) => None,
            (Some(i), len) => Some(i.min(len - 1)),
        };
    }

    pub fn move_down(&mut self) {
        let len = self.threads.len();
        if len == 0 {
            return;
        }
        self.cursor = Some(self.cursor.map_or(0, |i| (i + 1).min(len - 1)));
    }

    pub fn move_up(&mut self) {
        let len = self.threads.len();
        if len == 0 {
            return;
        }
        self.cursor = Some(self.cursor.map_or(len - 1, |i| i.saturating_sub(1)));
    }

    pub fn move_first(&mut self) {
        if !self.threads.is_empty() {
            self.cursor = Some(0);
        }
    }

    pub fn move_last(&mut self) {
        if let Some(last) = self.threads.len().checked_sub(1) {
            self.cursor = Some(last);
        }
    }

    /// Put the cursor on the thread with `thread_id`, if present.
    pub fn focus(&mut self, thread_id: &str) {
        if let Some(i) = self.threads.iter().position(|t| t.id == thread_id) {
            self.cursor = Some(i);
        }
    }

    /// Apply a command. Returns the thread to open for [`ListCommand::Open`].
    pub fn apply(&mut self, command: ListCommand) -> Option<Thread> {
        match command {
            ListCommand::Up => self.move_up(),
            ListCommand::Down => self.move_down(),
            ListCommand::First => self.move_first(),
            ListCommand::Last => self.move_last(),
            ListCommand::Open => return self.selected().cloned(),
        }
        None
    }
}
