//! Message bubbles for the active thread.
//!
//! Own messages sit on the right; other people's messages newer than the
//! viewer's previous visit carry a "new" highlight; optimistic sends render
//! faded with a sending marker until the store confirms them.

#[cfg(test)]
#[path = "message_list_test.rs"]
mod message_list_test;

use leptos::prelude::*;
use messaging::message_list::{MessageRow, build_rows};
use messaging::model::Message;
use messaging::time_label::TimeLabeler;

use crate::components::markup_view::MarkupView;

#[component]
pub fn MessageList(
    #[prop(into)] messages: Signal<Vec<Message>>,
    #[prop(into)] viewer_id: Signal<String>,
    /// Last-read marker from before the thread was opened.
    #[prop(into)]
    last_read: Signal<Option<i64>>,
    labeler: TimeLabeler,
) -> impl IntoView {
    let list_ref = NodeRef::<leptos::html::Div>::new();
    let rows = Memo::new(move |_| messages.with(|m| build_rows(m, &viewer_id.get(), last_read.get())));

    // Keep the newest message in view.
    Effect::new(move || {
        rows.track();
        #[cfg(feature = "csr")]
        {
            if let Some(el) = list_ref.get_untracked() {
                el.set_scroll_top(el.scroll_height());
            }
        }
    });

    view! {
        <div class="message-list" node_ref=list_ref>
            {move || {
                let rows = rows.get();
                if rows.is_empty() {
                    return view! { <p class="message-list__empty">"No messages yet"</p> }.into_any();
                }
                rows.into_iter()
                    .map(|row| view! { <MessageBubble row=row labeler=labeler/> })
                    .collect::<Vec<_>>()
                    .into_any()
            }}
        </div>
    }
}

#[component]
fn MessageBubble(row: MessageRow, labeler: TimeLabeler) -> impl IntoView {
    let class = bubble_class(&row);
    let status = delivery_status(&row);
    let time = labeler.clock(row.message.created_ms());
    let sender = (!row.own).then(|| sender_label(&row.message));

    view! {
        <div class=class>
            {sender.map(|name| view! { <span class="message__sender">{name}</span> })}
            <div class="message__body">
                <MarkupView spans=row.spans/>
            </div>
            <div class="message__meta">
                <span class="message__time">{time}</span>
                {status.map(|s| view! { <span class="message__status">{s}</span> })}
            </div>
        </div>
    }
}

fn bubble_class(row: &MessageRow) -> String {
    let mut class = String::from(if row.own { "message message--own" } else { "message message--other" });
    if row.new {
        class.push_str(" message--new");
    }
    if row.pending {
        class.push_str(" message--pending");
    }
    class
}

/// Sending marker or delivered check, own messages only.
fn delivery_status(row: &MessageRow) -> Option<&'static str> {
    match (row.own, row.pending) {
        (true, true) => Some("Sending…"),
        (true, false) => Some("✓"),
        (false, _) => None,
    }
}

fn sender_label(message: &Message) -> String {
    message
        .sender_name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or("Unknown")
        .to_owned()
}
