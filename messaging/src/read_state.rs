//! Per-thread "last opened" markers kept in local storage.
//!
//! The whole map lives as one JSON object under [`READ_STATE_KEY`]. It is
//! never synced across devices, so it cannot tell "never read" from "read
//! somewhere else".

#[cfg(test)]
#[path = "read_state_test.rs"]
mod read_state_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::storage::{KeyValueStore, load_json, save_json};

pub const READ_STATE_KEY: &str = "messages_read_state";

/// Thread id -> epoch ms the viewer last opened it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReadState(HashMap<String, i64>);

impl ReadState {
    #[must_use]
    pub fn last_read(&self, thread_id: &str) -> Option<i64> {
        self.0.get(thread_id).copied()
    }

    pub fn mark(&mut self, thread_id: &str, at_ms: i64) {
        self.0.insert(thread_id.to_owned(), at_ms);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Read/write access to the persisted [`ReadState`].
#[derive(Clone, Debug)]
pub struct ReadStateStore<S> {
    store: S,
}

impl<S: KeyValueStore> ReadStateStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Current markers. A missing or corrupt entry reads as empty.
    #[must_use]
    pub fn load(&self) -> ReadState {
        load_json(&self.store, READ_STATE_KEY).unwrap_or_default()
    }

    #[must_use]
    pub fn last_read(&self, thread_id: &str) -> Option<i64> {
        self.load().last_read(thread_id)
    }

    /// Record that `thread_id` was opened at `now_ms` and return the updated map.
    ///
    /// A failed write is logged; the returned map still carries the marker so
    /// the current view updates.
    pub fn mark_read(&self, thread_id: &str, now_ms: i64) -> ReadState {
        let mut state = self.load();
        state.mark(thread_id, now_ms);
        if let Err(e) = save_json(&self.store, READ_STATE_KEY, &state) {
            tracing::warn!(error = %e, thread_id, "failed to persist read state");
        }
        state
    }
}
