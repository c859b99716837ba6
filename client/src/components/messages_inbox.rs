//! Two-pane inbox: thread list on the left, active conversation on the right.
//!
//! The list is kept fresh by a [`ThreadFeed`] subscription that lives as long
//! as the component; unmounting cancels it. A manual refresh races the poll
//! and whichever answer lands last wins.

use leptos::prelude::*;
use messaging::clock::Clock;
use messaging::feed::{ThreadFeed, ThreadScope, load_threads};
use messaging::inbox::{InboxState, open_conversation};
use messaging::model::{EventSummary, Thread};
use messaging::store::ThreadStore;
use messaging::thread_list::{build_rows, unread_count};

use crate::components::thread_detail::{ComposeSlots, ThreadDetail};
use crate::components::thread_list::ThreadList;
use crate::state::auth::AuthState;
use crate::state::services::Services;

/// Inbox for one event (`event_id`) or, without it, every event the viewer
/// owns.
#[component]
pub fn MessagesInbox(#[prop(optional, into)] event_id: Option<String>) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let services = expect_context::<Services>();

    let Some(viewer) = auth.with_untracked(|a| a.viewer.clone()) else {
        return view! {
            <div class="messages-inbox messages-inbox--signed-out">
                <p class="messages-inbox__empty">"Sign in to see your messages."</p>
            </div>
        }
        .into_any();
    };

    let scope = match event_id {
        Some(id) => ThreadScope::Event(id),
        None => ThreadScope::OwnedEvents(viewer.id.clone()),
    };

    let inbox = RwSignal::new(InboxState { loading: true, ..InboxState::default() });
    let reads = RwSignal::new(services.read_state.load());
    let now = RwSignal::new(services.clock.now_ms());
    let compose = ComposeSlots::new();

    let clock = services.clock;
    let subscription = services.feed.subscribe(
        scope.clone(),
        Box::new(move |threads: Vec<Thread>| {
            now.set(clock.now_ms());
            inbox.update(|s| s.apply_threads(threads));
        }),
    );
    on_cleanup(move || subscription.cancel());

    let labeler = services.labeler;
    let viewer_id = viewer.id.clone();
    let rows = Memo::new(move |_| {
        let read_state = reads.get();
        inbox.with(|s| build_rows(&s.threads, &viewer_id, &read_state, labeler, now.get()))
    });
    let badge_viewer = viewer.id.clone();
    let unread = Memo::new(move |_| {
        let read_state = reads.get();
        inbox.with(|s| unread_count(&s.threads, &badge_viewer, &read_state))
    });
    let active_id = Signal::derive(move || inbox.with(|s| s.active_id().map(str::to_owned)));

    let refresh_services = services.clone();
    let refresh_scope = scope.clone();
    let on_refresh = move |_| {
        inbox.update(InboxState::begin_refresh);
        let store = refresh_services.store.clone();
        let scope = refresh_scope.clone();
        let clock = refresh_services.clock;
        leptos::task::spawn_local(async move {
            let threads = load_threads(&store, &scope).await;
            now.set(clock.now_ms());
            inbox.update(|s| s.apply_threads(threads));
        });
    };

    let on_select = Callback::new(move |thread: Thread| inbox.update(|s| s.select(thread)));

    let is_empty = move || inbox.with(|s| !s.loading && s.threads.is_empty());
    let has_active = move || inbox.with(|s| s.active.is_some());
    let composing = move || inbox.with(|s| s.composing);
    let dialog_scope = scope;
    let dialog_viewer_id = viewer.id.clone();

    view! {
        <div class="messages-inbox">
            <aside class="messages-inbox__list">
                <header class="messages-inbox__header">
                    <h2>
                        "Messages"
                        <Show when=move || { unread.get() > 0 }>
                            <span class="messages-inbox__badge">{move || unread.get()}</span>
                        </Show>
                    </h2>
                    <button class="btn" title="Refresh" on:click=on_refresh>
                        "↻"
                    </button>
                    <button class="btn btn--primary" on:click=move |_| inbox.update(InboxState::start_composing)>
                        "New conversation"
                    </button>
                </header>
                <Show when=composing>
                    <NewConversationDialog
                        inbox=inbox
                        scope=dialog_scope.clone()
                        viewer_id=dialog_viewer_id.clone()
                    />
                </Show>
                <Show
                    when=move || !is_empty()
                    fallback=|| view! { <p class="messages-inbox__empty">"No threads yet"</p> }
                >
                    <ThreadList rows=rows active_id=active_id on_select=on_select/>
                </Show>
            </aside>
            <section class="messages-inbox__detail">
                <Show
                    when=has_active
                    fallback=|| view! { <p class="messages-inbox__placeholder">"Select a conversation"</p> }
                >
                    <ThreadDetail inbox=inbox reads=reads compose=compose viewer=viewer.clone()/>
                </Show>
            </section>
        </div>
    }
    .into_any()
}

// =============================================================================
// NEW CONVERSATION
// =============================================================================

/// Picker over the viewer's events. Confirming opens (or creates) that
/// event's thread and makes it active.
#[component]
fn NewConversationDialog(inbox: RwSignal<InboxState>, scope: ThreadScope, viewer_id: String) -> impl IntoView {
    let services = expect_context::<Services>();
    let events = RwSignal::new(Vec::<EventSummary>::new());
    let chosen = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let store = services.store.clone();
    leptos::task::spawn_local(async move {
        match store.owned_events(&viewer_id).await {
            Ok(owned) => {
                chosen.set(owned.first().map(|e| e.id.clone()));
                events.set(owned);
            }
            Err(e) => leptos::logging::warn!("event list failed: {e}"),
        }
    });

    let on_confirm = move |_| {
        let Some(event) = chosen
            .get_untracked()
            .and_then(|id| events.with_untracked(|list| list.iter().find(|e| e.id == id).cloned()))
        else {
            return;
        };
        busy.set(true);
        let store = services.store.clone();
        let scope = scope.clone();
        leptos::task::spawn_local(async move {
            match open_conversation(&store, &event, &scope).await {
                Ok(opened) => inbox.update(|s| s.apply_opened(opened)),
                Err(e) => leptos::logging::warn!("could not open conversation for {}: {e}", event.id),
            }
            busy.set(false);
        });
    };

    view! {
        <div class="dialog new-conversation" role="dialog" aria-label="New conversation">
            <Show
                when=move || events.with(|list| !list.is_empty())
                fallback=|| view! { <p class="dialog__empty">"You have no events yet."</p> }
            >
                <select
                    class="new-conversation__event"
                    on:change=move |ev| chosen.set(Some(event_target_value(&ev)))
                    prop:value=move || chosen.get().unwrap_or_default()
                >
                    {move || {
                        events
                            .get()
                            .into_iter()
                            .map(|e| view! { <option value=e.id.clone()>{e.name}</option> })
                            .collect::<Vec<_>>()
                    }}
                </select>
            </Show>
            <div class="dialog__actions">
                <button class="btn" on:click=move |_| inbox.update(InboxState::cancel_composing)>
                    "Cancel"
                </button>
                <button
                    class="btn btn--primary"
                    disabled=move || busy.get() || chosen.with(Option::is_none)
                    on:click=on_confirm
                >
                    "Start"
                </button>
            </div>
        </div>
    }
}
