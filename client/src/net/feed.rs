//! Polling-backed [`ThreadFeed`] for the browser.
//!
//! Ticks run on `gloo-timers` and `spawn_local`. Native builds have no
//! browser timer, so subscriptions come back already cancelled.

#[cfg(test)]
#[path = "feed_test.rs"]
mod feed_test;

use std::time::Duration;

use messaging::feed::{POLL_INTERVAL, Subscription, ThreadFeed, ThreadScope};
use messaging::model::Thread;
use messaging::store::ThreadStore;

/// Re-fetches the thread list every interval for as long as the
/// subscription is active.
#[derive(Clone, Debug)]
pub struct PollingThreadFeed<S> {
    store: S,
    interval: Duration,
}

impl<S> PollingThreadFeed<S> {
    pub fn new(store: S) -> Self {
        Self { store, interval: POLL_INTERVAL }
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl<S> ThreadFeed for PollingThreadFeed<S>
where
    S: ThreadStore + Clone + 'static,
{
    fn subscribe(&self, scope: ThreadScope, on_update: Box<dyn Fn(Vec<Thread>)>) -> Subscription {
        let subscription = Subscription::new();

        #[cfg(feature = "csr")]
        {
            use std::rc::Rc;

            let store = self.store.clone();
            let handle = subscription.clone();
            let on_update: Rc<dyn Fn(Vec<Thread>)> = Rc::from(on_update);
            let interval = self.interval;
            leptos::task::spawn_local(async move {
                let ticker = handle.clone();
                messaging::feed::run_polling(handle, interval, gloo_timers::future::sleep, move || {
                    let store = store.clone();
                    let scope = scope.clone();
                    let on_update = Rc::clone(&on_update);
                    let ticker = ticker.clone();
                    async move {
                        let threads = messaging::feed::load_threads(&store, &scope).await;
                        // The fetch is never aborted; an unmounted view just drops it.
                        if ticker.is_active() {
                            on_update(threads);
                        }
                    }
                })
                .await;
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (&self.store, scope, on_update);
            leptos::logging::warn!("thread polling needs a browser timer; feed inactive");
            subscription.cancel();
        }

        subscription
    }
}
