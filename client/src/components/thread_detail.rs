//! Detail pane for the active thread: history plus compose.
//!
//! Sends are optimistic. The draft clears and a placeholder bubble appears
//! at once; the store's answer either swaps in the stored message or puts
//! the text back in the compose box. Chat notifications go out after the
//! message is stored and never hold up the bubble.
//!
//! A send or fetch can settle after the user has moved to another thread.
//! Its result only touches the shown list when its thread is still the one
//! on screen; compose state for other threads waits in [`ComposeSlots`].

use leptos::prelude::*;
use messaging::clock::Clock;
use messaging::compose::{ComposeDrafts, ComposeState};
use messaging::inbox::{InboxState, notify_chat_participants, post_chat_message};
use messaging::message_list::{confirm_pending, discard_pending, merge_fetched, optimistic_message};
use messaging::model::{Message, Viewer};
use messaging::read_state::ReadState;
use messaging::store::ThreadStore;

use crate::components::message_list::MessageList;
use crate::components::send_message_form::SendMessageForm;
use crate::state::services::Services;

/// Compose state owned by the inbox so it survives the detail pane closing.
#[derive(Clone, Copy)]
pub struct ComposeSlots {
    /// What the compose box shows.
    pub visible: RwSignal<ComposeState>,
    /// Thread `visible` and the shown message list belong to.
    pub thread_id: RwSignal<Option<String>>,
    pub parked: RwSignal<ComposeDrafts>,
}

impl ComposeSlots {
    #[must_use]
    pub fn new() -> Self {
        Self {
            visible: RwSignal::new(ComposeState::default()),
            thread_id: RwSignal::new(None),
            parked: RwSignal::new(ComposeDrafts::default()),
        }
    }

    fn shows(&self, thread_id: &str) -> bool {
        self.thread_id.with_untracked(|shown| shown.as_deref() == Some(thread_id))
    }

    /// Bring `thread_id`'s compose state on screen, parking the current one.
    fn show(&self, thread_id: &str) {
        if self.shows(thread_id) {
            return;
        }
        let outgoing = self.visible.get_untracked();
        let from = self.thread_id.get_untracked();
        let incoming = self
            .parked
            .try_update(|p| p.switch(from.as_deref(), outgoing, thread_id))
            .unwrap_or_default();
        self.visible.set(incoming);
        self.thread_id.set(Some(thread_id.to_owned()));
    }

    fn confirm(&self, thread_id: &str, attempt: u64) {
        if self.shows(thread_id) {
            self.visible.update(|c| {
                c.confirm(attempt);
            });
        } else {
            self.parked.update(|p| {
                p.confirm(thread_id, attempt);
            });
        }
    }

    fn fail(&self, thread_id: &str, attempt: u64) {
        if self.shows(thread_id) {
            self.visible.update(|c| {
                c.fail(attempt);
            });
        } else {
            self.parked.update(|p| {
                p.fail(thread_id, attempt);
            });
        }
    }
}

impl Default for ComposeSlots {
    fn default() -> Self {
        Self::new()
    }
}

#[component]
pub fn ThreadDetail(
    inbox: RwSignal<InboxState>,
    reads: RwSignal<ReadState>,
    compose: ComposeSlots,
    viewer: Viewer,
) -> impl IntoView {
    let services = expect_context::<Services>();
    let messages = RwSignal::new(Vec::<Message>::new());
    let last_read_before_open = RwSignal::new(None::<i64>);

    // Re-fetch whenever the active thread or its last message changes.
    let active_key = Memo::new(move |_| {
        inbox.with(|s| s.active.as_ref().map(|t| (t.id.clone(), t.last_message_at)))
    });

    let fetch_services = services.clone();
    Effect::new(move |previous: Option<Option<String>>| {
        let Some((thread_id, _)) = active_key.get() else {
            messages.set(Vec::new());
            return None;
        };
        let read_state = &fetch_services.read_state;
        if previous.flatten().as_deref() != Some(thread_id.as_str()) {
            messages.set(Vec::new());
            compose.show(&thread_id);
            last_read_before_open.set(read_state.last_read(&thread_id));
        }
        reads.set(read_state.mark_read(&thread_id, now_ms(&fetch_services)));

        let store = fetch_services.store.clone();
        let fetch_id = thread_id.clone();
        leptos::task::spawn_local(async move {
            let fetched = match store.thread_messages(&fetch_id).await {
                Ok(fetched) => fetched,
                Err(e) => {
                    leptos::logging::warn!("message fetch failed for {fetch_id}: {e}");
                    Vec::new()
                }
            };
            if compose.shows(&fetch_id) {
                messages.try_update(|m| *m = merge_fetched(m, fetched));
            }
        });
        Some(thread_id)
    });

    let send_services = services.clone();
    let send_viewer = viewer.clone();
    let on_submit = Callback::new(move |()| {
        let Some(thread) = inbox.with_untracked(|s| s.active.clone()).filter(|t| compose.shows(&t.id)) else {
            return;
        };
        let mut started = None;
        compose.visible.update(|c| started = c.begin_send(false));
        let Some(attempt) = started else {
            return;
        };

        let services = send_services.clone();
        let viewer = send_viewer.clone();
        let pending = optimistic_message(&thread.id, &viewer, &attempt.text, now_ms(&services));
        let pending_id = pending.id.clone();
        messages.update(|m| m.push(pending));

        leptos::task::spawn_local(async move {
            match post_chat_message(&services.store, &thread, &viewer, &attempt.text).await {
                Ok(stored) => {
                    if compose.shows(&thread.id) {
                        messages.try_update(|m| confirm_pending(m, &pending_id, stored));
                    }
                    compose.confirm(&thread.id, attempt.id);
                    notify_chat_participants(&services.store, services.dispatcher.as_ref(), &thread, &viewer, &attempt.text)
                        .await;
                }
                Err(e) => {
                    leptos::logging::warn!("message send failed: {e}");
                    if compose.shows(&thread.id) {
                        messages.try_update(|m| discard_pending(m, &pending_id));
                    }
                    compose.fail(&thread.id, attempt.id);
                }
            }
        });
    });

    let subject = move || inbox.with(|s| s.active.as_ref().map(|t| t.subject.clone()).unwrap_or_default());
    let viewer_id = viewer.id.clone();

    view! {
        <div class="thread-detail">
            <header class="thread-detail__header">
                <h2 class="thread-detail__subject">{subject}</h2>
                <button
                    class="btn thread-detail__close"
                    title="Close conversation"
                    on:click=move |_| inbox.update(InboxState::clear_selection)
                >
                    "×"
                </button>
            </header>
            <MessageList
                messages=messages
                viewer_id=Signal::stored(viewer_id)
                last_read=last_read_before_open
                labeler=services.labeler
            />
            <SendMessageForm compose=compose.visible disabled=Signal::stored(false) on_submit=on_submit/>
        </div>
    }
}

fn now_ms(services: &Services) -> i64 {
    services.clock.now_ms()
}
