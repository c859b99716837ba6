//! Thread/message persistence seam.
//!
//! SYSTEM CONTEXT
//! ==============
//! The hosted relational store owns threads, messages, events and
//! collaborators. The browser client implements [`ThreadStore`] over its
//! REST interface; [`MemoryThreadStore`] is the in-process stand-in used by
//! tests and demos. Ordering and uniqueness are whatever the store provides:
//! nothing here adds transactional guarantees.
//!
//! Futures are `?Send` because the browser runtime is single-threaded.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::sync::{Arc, Mutex, PoisonError};

use crate::clock::{Clock, SystemClock};
use crate::model::{EventSummary, Message, NewMessage, Participant, Thread, ThreadSummaryUpdate, from_epoch_ms};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("data store not available in this environment")]
    Unavailable,
    #[error("data store request failed: {0}")]
    Request(String),
    #[error("data store returned status {0}")]
    Status(u16),
    #[error("failed to decode data store response: {0}")]
    Decode(String),
    #[error("{0} not found")]
    NotFound(String),
}

#[async_trait::async_trait(?Send)]
pub trait ThreadStore {
    /// Threads for one event.
    async fn event_threads(&self, event_id: &str) -> Result<Vec<Thread>, StoreError>;

    /// The event's thread, created with `subject` when none exists yet.
    async fn get_or_create_thread(&self, event_id: &str, subject: &str) -> Result<Thread, StoreError>;

    /// Messages in a thread, oldest first.
    async fn thread_messages(&self, thread_id: &str) -> Result<Vec<Message>, StoreError>;

    /// Store a message and bump the thread's last-message fields.
    async fn send_message(&self, message: &NewMessage) -> Result<Message, StoreError>;

    /// Events owned by `owner_id`.
    async fn owned_events(&self, owner_id: &str) -> Result<Vec<EventSummary>, StoreError>;

    /// Owner and collaborators of an event.
    async fn event_participants(&self, event_id: &str) -> Result<Vec<Participant>, StoreError>;
}

// =============================================================================
// IN-MEMORY STORE
// =============================================================================

#[derive(Default)]
struct MemoryInner {
    threads: Vec<Thread>,
    messages: Vec<Message>,
    events: Vec<EventSummary>,
    participants: Vec<(String, Participant)>,
    next_id: u64,
    fail_reads: bool,
    fail_writes: bool,
}

impl MemoryInner {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-{}", self.next_id)
    }
}

/// In-process [`ThreadStore`]; clones share the same data.
#[derive(Clone)]
pub struct MemoryThreadStore {
    inner: Arc<Mutex<MemoryInner>>,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl Default for MemoryThreadStore {
    fn default() -> Self {
        Self::new(SystemClock)
    }
}

impl MemoryThreadStore {
    pub fn new(clock: impl Clock + Send + Sync + 'static) -> Self {
        Self { inner: Arc::new(Mutex::new(MemoryInner::default())), clock: Arc::new(clock) }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add_event(&self, event: EventSummary) {
        self.lock().events.push(event);
    }

    pub fn add_participant(&self, event_id: &str, participant: Participant) {
        self.lock().participants.push((event_id.to_owned(), participant));
    }

    pub fn insert_thread(&self, thread: Thread) {
        self.lock().threads.push(thread);
    }

    /// Make every read fail with [`StoreError::Status`] 503.
    pub fn set_fail_reads(&self, fail: bool) {
        self.lock().fail_reads = fail;
    }

    /// Make every write fail with [`StoreError::Status`] 503.
    pub fn set_fail_writes(&self, fail: bool) {
        self.lock().fail_writes = fail;
    }

    #[must_use]
    pub fn thread_count(&self) -> usize {
        self.lock().threads.len()
    }

    #[must_use]
    pub fn message_count(&self) -> usize {
        self.lock().messages.len()
    }

    fn check_read(inner: &MemoryInner) -> Result<(), StoreError> {
        if inner.fail_reads { Err(StoreError::Status(503)) } else { Ok(()) }
    }

    fn check_write(inner: &MemoryInner) -> Result<(), StoreError> {
        if inner.fail_writes { Err(StoreError::Status(503)) } else { Ok(()) }
    }
}

#[async_trait::async_trait(?Send)]
impl ThreadStore for MemoryThreadStore {
    async fn event_threads(&self, event_id: &str) -> Result<Vec<Thread>, StoreError> {
        let inner = self.lock();
        Self::check_read(&inner)?;
        Ok(inner
            .threads
            .iter()
            .filter(|t| t.event_id == event_id)
            .cloned()
            .collect())
    }

    async fn get_or_create_thread(&self, event_id: &str, subject: &str) -> Result<Thread, StoreError> {
        let now = from_epoch_ms(self.clock.now_ms());
        let mut inner = self.lock();
        Self::check_read(&inner)?;
        if let Some(existing) = inner.threads.iter().find(|t| t.event_id == event_id) {
            return Ok(existing.clone());
        }
        Self::check_write(&inner)?;
        let thread = Thread {
            id: inner.next_id("thread"),
            event_id: event_id.to_owned(),
            subject: subject.to_owned(),
            last_message_preview: None,
            last_message_at: None,
            last_message_sender_id: None,
            created_at: now,
        };
        inner.threads.push(thread.clone());
        Ok(thread)
    }

    async fn thread_messages(&self, thread_id: &str) -> Result<Vec<Message>, StoreError> {
        let inner = self.lock();
        Self::check_read(&inner)?;
        let mut messages: Vec<Message> = inner
            .messages
            .iter()
            .filter(|m| m.thread_id == thread_id)
            .cloned()
            .collect();
        messages.sort_by_key(|m| m.created_at);
        Ok(messages)
    }

    async fn send_message(&self, message: &NewMessage) -> Result<Message, StoreError> {
        let now = from_epoch_ms(self.clock.now_ms());
        let mut inner = self.lock();
        Self::check_write(&inner)?;
        if !inner.threads.iter().any(|t| t.id == message.thread_id) {
            return Err(StoreError::NotFound(format!("thread {}", message.thread_id)));
        }
        let stored = Message {
            id: inner.next_id("message"),
            thread_id: message.thread_id.clone(),
            sender_id: message.sender_id.clone(),
            sender_name: message.sender_name.clone(),
            body: message.body.clone(),
            created_at: now,
        };
        inner.messages.push(stored.clone());
        if let Some(thread) = inner.threads.iter_mut().find(|t| t.id == message.thread_id) {
            thread.apply_summary(ThreadSummaryUpdate::for_message(&stored));
        }
        Ok(stored)
    }

    async fn owned_events(&self, owner_id: &str) -> Result<Vec<EventSummary>, StoreError> {
        let inner = self.lock();
        Self::check_read(&inner)?;
        Ok(inner
            .events
            .iter()
            .filter(|e| e.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn event_participants(&self, event_id: &str) -> Result<Vec<Participant>, StoreError> {
        let inner = self.lock();
        Self::check_read(&inner)?;
        Ok(inner
            .participants
            .iter()
            .filter(|(id, _)| id == event_id)
            .map(|(_, p)| p.clone())
            .collect())
    }
}
