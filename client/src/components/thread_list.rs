//! Keyboard-navigable thread list.
//!
//! Arrow keys (or j/k), Home and End move a cursor; Enter or Space opens the
//! thread under it. Unread threads show a dot and a bold subject.

#[cfg(test)]
#[path = "thread_list_test.rs"]
mod thread_list_test;

use leptos::prelude::*;
use messaging::model::Thread;
use messaging::thread_list::{ThreadListState, ThreadRow, list_command};

#[component]
pub fn ThreadList(
    #[prop(into)] rows: Signal<Vec<ThreadRow>>,
    #[prop(into)] active_id: Signal<Option<String>>,
    on_select: Callback<Thread>,
) -> impl IntoView {
    let cursor = RwSignal::new(ThreadListState::default());
    Effect::new(move || {
        let threads = rows.with(|rows| rows.iter().map(|r| r.thread.clone()).collect());
        cursor.update(|c| c.replace(threads));
    });

    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        let Some(command) = list_command(&ev.key()) else {
            return;
        };
        ev.prevent_default();
        let mut opened = None;
        cursor.update(|c| opened = c.apply(command));
        if let Some(thread) = opened {
            on_select.run(thread);
        }
    };

    view! {
        <ul class="thread-list" role="listbox" tabindex="0" aria-label="Conversations" on:keydown=on_keydown>
            {move || {
                rows.get()
                    .into_iter()
                    .enumerate()
                    .map(|(idx, row)| {
                        let ThreadRow { thread, unread, time_label } = row;
                        let id = thread.id.clone();
                        let active = Memo::new(move |_| active_id.with(|a| a.as_deref() == Some(id.as_str())));
                        let focused = Memo::new(move |_| cursor.with(|c| c.cursor() == Some(idx)));
                        let subject = thread.subject.clone();
                        let preview = thread.last_message_preview.clone().unwrap_or_default();
                        view! {
                            <li
                                class=move || row_class(unread, active.get(), focused.get())
                                role="option"
                                aria-selected=move || active.get().to_string()
                                on:click=move |_| {
                                    cursor.update(|c| c.focus(&thread.id));
                                    on_select.run(thread.clone());
                                }
                            >
                                <span class="thread-row__dot" aria-hidden="true">
                                    {unread.then_some("●")}
                                </span>
                                <div class="thread-row__main">
                                    <span class="thread-row__subject">{subject}</span>
                                    <span class="thread-row__preview">{preview}</span>
                                </div>
                                <span class="thread-row__time">{time_label.unwrap_or_default()}</span>
                            </li>
                        }
                    })
                    .collect::<Vec<_>>()
            }}
        </ul>
    }
}

fn row_class(unread: bool, active: bool, focused: bool) -> String {
    let mut class = String::from("thread-row");
    for (on, modifier) in [(unread, " thread-row--unread"), (active, " thread-row--active"), (focused, " thread-row--focused")] {
        if on {
            class.push_str(modifier);
        }
    }
    class
}
