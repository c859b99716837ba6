//! Compose box with send-on-Enter and markup shortcuts.
//!
//! Enter sends, Shift+Enter breaks the line, Ctrl/Cmd+Enter always sends.
//! Ctrl/Cmd+B, I and U wrap the selection in bold, italic and underline
//! delimiters and leave the wrapped text selected.

use leptos::html::Textarea;
use leptos::prelude::*;
use messaging::compose::{ComposeAction, ComposeState, KeyChord, Markup, WrapResult, compose_action, utf16_len, wrap_selection};

#[component]
pub fn SendMessageForm(
    compose: RwSignal<ComposeState>,
    #[prop(into)] disabled: Signal<bool>,
    /// Fired when the user asks to send; the owner starts the attempt.
    on_submit: Callback<()>,
) -> impl IntoView {
    let textarea_ref = NodeRef::<Textarea>::new();
    let can_send = move || compose.with(|c| c.can_send(disabled.get()));

    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        let key = ev.key();
        let chord = KeyChord { key: &key, shift: ev.shift_key(), modifier: ev.ctrl_key() || ev.meta_key() };
        match compose_action(chord) {
            ComposeAction::Send => {
                ev.prevent_default();
                on_submit.run(());
            }
            ComposeAction::Wrap(style) => {
                ev.prevent_default();
                wrap_in_place(textarea_ref, compose, style);
            }
            ComposeAction::Newline | ComposeAction::Ignore => {}
        }
    };

    let style_button = move |style: Markup, label: &'static str, title: &'static str| {
        view! {
            <button
                type="button"
                class="btn send-message-form__style"
                title=title
                on:click=move |_| wrap_in_place(textarea_ref, compose, style)
                disabled=move || disabled.get()
            >
                {label}
            </button>
        }
    };

    view! {
        <form
            class="send-message-form"
            on:submit=move |ev: leptos::ev::SubmitEvent| {
                ev.prevent_default();
                on_submit.run(());
            }
        >
            <textarea
                node_ref=textarea_ref
                class="send-message-form__input"
                rows="2"
                placeholder="Write a message…"
                prop:value=move || compose.with(|c| c.draft.clone())
                on:input=move |ev| compose.update(|c| c.set_draft(event_target_value(&ev)))
                on:keydown=on_keydown
                disabled=move || disabled.get()
            ></textarea>
            <div class="send-message-form__toolbar">
                {style_button(Markup::Bold, "B", "Bold (Ctrl+B)")}
                {style_button(Markup::Italic, "I", "Italic (Ctrl+I)")}
                {style_button(Markup::Underline, "U", "Underline (Ctrl+U)")}
                <span class="send-message-form__spacer"></span>
                <button type="submit" class="btn btn--primary send-message-form__send" disabled=move || !can_send()>
                    "Send"
                </button>
            </div>
        </form>
    }
}

/// Wrap the textarea's current selection and restore it afterwards.
fn wrap_in_place(textarea_ref: NodeRef<Textarea>, compose: RwSignal<ComposeState>, style: Markup) {
    let draft = compose.with_untracked(|c| c.draft.clone());
    let (start, end) = current_selection(textarea_ref, &draft);
    let result = wrap_selection(&draft, start, end, style.delimiter());
    compose.update(|c| c.set_draft(result.text.clone()));
    restore_selection(textarea_ref, &result);
}

/// Selection in UTF-16 units; the end of the draft when unknown.
fn current_selection(textarea_ref: NodeRef<Textarea>, draft: &str) -> (usize, usize) {
    let end_of_draft = utf16_len(draft);
    #[cfg(feature = "csr")]
    {
        let Some(el) = textarea_ref.get_untracked() else {
            return (end_of_draft, end_of_draft);
        };
        let read = |offset: Result<Option<u32>, wasm_bindgen::JsValue>| {
            offset.ok().flatten().map_or(end_of_draft, |o| o as usize)
        };
        (read(el.selection_start()), read(el.selection_end()))
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = textarea_ref;
        (end_of_draft, end_of_draft)
    }
}

fn restore_selection(textarea_ref: NodeRef<Textarea>, result: &WrapResult) {
    #[cfg(feature = "csr")]
    {
        let Some(el) = textarea_ref.get_untracked() else {
            return;
        };
        el.set_value(&result.text);
        let start = u32::try_from(result.selection_start).unwrap_or(u32::MAX);
        let end = u32::try_from(result.selection_end).unwrap_or(u32::MAX);
        if let Err(e) = el.focus() {
            leptos::logging::warn!("compose focus failed: {e:?}");
        }
        if let Err(e) = el.set_selection_range(start, end) {
            leptos::logging::warn!("compose selection restore failed: {e:?}");
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (textarea_ref, result);
    }
}
