//! Root application component and context providers.

use leptos::prelude::*;

use crate::components::messages_inbox::MessagesInbox;
use crate::config::ClientConfig;
use crate::state::auth::AuthState;
use crate::state::services::Services;
use crate::util::browser_storage::BrowserStorage;

/// Root application component.
///
/// Reads the stored session once, builds the service bundle for it and
/// provides both as context. Everything below renders the owned-events inbox.
#[component]
pub fn App() -> impl IntoView {
    let auth_state = AuthState::load(&BrowserStorage);
    let services = Services::new(&ClientConfig::default(), &auth_state);

    provide_context(RwSignal::new(auth_state));
    provide_context(services);

    view! {
        <main class="app">
            <MessagesInbox/>
        </main>
    }
}
