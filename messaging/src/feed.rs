//! Thread list loading and the subscription seam around it.
//!
//! DESIGN
//! ======
//! Consumers ask a [`ThreadFeed`] for updates and hold a [`Subscription`]
//! until they unmount. The only backing today is polling: [`run_polling`]
//! loads immediately, then every [`POLL_INTERVAL`], with no backoff and no
//! change detection. A push-capable feed can implement the same trait.
//!
//! Poll ticks and manual refreshes are not coordinated. Whichever response
//! resolves last wins.

#[cfg(test)]
#[path = "feed_test.rs"]
mod feed_test;

use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::model::Thread;
use crate::store::ThreadStore;
use crate::thread_list::sort_by_recency;

pub const POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Which threads an inbox shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ThreadScope {
    /// Threads of a single event.
    Event(String),
    /// Threads across every event the given viewer owns.
    OwnedEvents(String),
}

/// Fetch the threads for `scope`, most recent first.
///
/// Failures degrade to an empty (or partial) list and are logged.
pub async fn load_threads<S>(store: &S, scope: &ThreadScope) -> Vec<Thread>
where
    S: ThreadStore + ?Sized,
{
    let mut threads = match scope {
        ThreadScope::Event(event_id) => match store.event_threads(event_id).await {
            Ok(threads) => threads,
            Err(e) => {
                tracing::warn!(error = %e, event = %event_id, "failed to load event threads");
                Vec::new()
            }
        },
        ThreadScope::OwnedEvents(viewer_id) => load_owned(store, viewer_id).await,
    };
    sort_by_recency(&mut threads);
    threads
}

async fn load_owned<S>(store: &S, viewer_id: &str) -> Vec<Thread>
where
    S: ThreadStore + ?Sized,
{
    let events = match store.owned_events(viewer_id).await {
        Ok(events) => events,
        Err(e) => {
            tracing::warn!(error = %e, viewer = %viewer_id, "failed to load owned events");
            return Vec::new();
        }
    };

    let mut seen = HashSet::new();
    let mut threads = Vec::new();
    for event in &events {
        match store.event_threads(&event.id).await {
            Ok(batch) => threads.extend(batch.into_iter().filter(|t| seen.insert(t.id.clone()))),
            Err(e) => tracing::warn!(error = %e, event = %event.id, "skipping event threads"),
        }
    }
    threads
}

// =============================================================================
// SUBSCRIPTION
// =============================================================================

/// Cancellable handle for a feed; clones share the same flag.
#[derive(Clone, Debug)]
pub struct Subscription {
    active: Arc<AtomicBool>,
}

impl Default for Subscription {
    fn default() -> Self {
        Self::new()
    }
}

impl Subscription {
    #[must_use]
    pub fn new() -> Self {
        Self { active: Arc::new(AtomicBool::new(true)) }
    }

    /// Stop future updates. Work already in flight may still complete.
    pub fn cancel(&self) {
        self.active.store(false, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Relaxed)
    }
}

/// Source of thread-list updates for one scope.
pub trait ThreadFeed {
    fn subscribe(&self, scope: ThreadScope, on_update: Box<dyn Fn(Vec<Thread>)>) -> Subscription;
}

/// Drive `tick` now and after every `interval` until `subscription` is cancelled.
///
/// Runtime-agnostic: the caller supplies the sleep future.
pub async fn run_polling<Sleep, SleepFut, Tick, TickFut>(
    subscription: Subscription,
    interval: Duration,
    mut sleep: Sleep,
    mut tick: Tick,
) where
    Sleep: FnMut(Duration) -> SleepFut,
    SleepFut: Future<Output = ()>,
    Tick: FnMut() -> TickFut,
    TickFut: Future<Output = ()>,
{
    while subscription.is_active() {
        tick().await;
        sleep(interval).await;
    }
    tracing::debug!("thread polling stopped");
}
