//! Injected service bundle.
//!
//! Built once in `App` and provided through context, so components receive
//! their store, feed, dispatcher and local markers instead of reaching for
//! globals.

#[cfg(test)]
#[path = "services_test.rs"]
mod services_test;

use std::sync::Arc;

use messaging::notify::NotificationDispatcher;
use messaging::read_state::ReadStateStore;
use messaging::time_label::TimeLabeler;

use crate::config::ClientConfig;
use crate::net::feed::PollingThreadFeed;
use crate::net::functions::FunctionTransport;
use crate::net::rest::RestBackend;
use crate::state::auth::AuthState;
use crate::util::browser_clock::{BrowserClock, local_labeler};
use crate::util::browser_storage::BrowserStorage;

pub type Dispatcher = NotificationDispatcher<FunctionTransport, BrowserStorage, BrowserClock>;

#[derive(Clone)]
pub struct Services {
    pub store: RestBackend,
    pub feed: PollingThreadFeed<RestBackend>,
    pub dispatcher: Arc<Dispatcher>,
    pub read_state: ReadStateStore<BrowserStorage>,
    pub clock: BrowserClock,
    pub labeler: TimeLabeler,
}

impl Services {
    #[must_use]
    pub fn new(config: &ClientConfig, auth: &AuthState) -> Self {
        let store = RestBackend::new(config.clone(), auth.access_token.clone());
        let transport = FunctionTransport::new(config, auth.access_token.clone());
        Self {
            feed: PollingThreadFeed::new(store.clone()),
            store,
            dispatcher: Arc::new(NotificationDispatcher::new(transport, BrowserStorage, BrowserClock)),
            read_state: ReadStateStore::new(BrowserStorage),
            clock: BrowserClock,
            labeler: local_labeler(),
        }
    }
}
