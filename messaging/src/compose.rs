//! Compose box state: optimistic sends with rollback, and markup shortcuts.
//!
//! DESIGN
//! ======
//! Each send is a [`SendAttempt`] moving `Drafted -> Sending -> Confirmed`
//! or `Sending -> RolledBack`. The draft clears the moment a send starts;
//! a rolled-back attempt puts its exact text back into the draft. Several
//! attempts can be in flight at once, and they settle in any order.
//!
//! The detail pane shows one thread at a time. [`ComposeDrafts`] parks the
//! compose state of threads the user switched away from, so an attempt that
//! settles later still confirms or restores against its own thread.
//!
//! Selection offsets are UTF-16 code units, the unit a browser textarea
//! reports, and are converted to byte offsets internally.

#[cfg(test)]
#[path = "compose_test.rs"]
mod compose_test;

use std::collections::HashMap;

// =============================================================================
// SEND STATE MACHINE
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SendPhase {
    Drafted,
    Sending,
    Confirmed,
    RolledBack,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid send transition {from:?} -> {to:?}")]
pub struct InvalidTransition {
    pub from: SendPhase,
    pub to: SendPhase,
}

/// One outbound message and where it is in its lifecycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SendAttempt {
    pub id: u64,
    pub text: String,
    phase: SendPhase,
}

impl SendAttempt {
    #[must_use]
    pub fn new(id: u64, text: impl Into<String>) -> Self {
        Self { id, text: text.into(), phase: SendPhase::Drafted }
    }

    #[must_use]
    pub fn phase(&self) -> SendPhase {
        self.phase
    }

    /// Advance to `next`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTransition`] for any move the lifecycle doesn't allow;
    /// the phase is left unchanged.
    pub fn transition(&mut self, next: SendPhase) -> Result<(), InvalidTransition> {
        let allowed = matches!(
            (self.phase, next),
            (SendPhase::Drafted, SendPhase::Sending)
                | (SendPhase::Sending, SendPhase::Confirmed | SendPhase::RolledBack)
        );
        if !allowed {
            return Err(InvalidTransition { from: self.phase, to: next });
        }
        self.phase = next;
        Ok(())
    }
}

/// Draft text plus every send still in flight.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ComposeState {
    pub draft: String,
    in_flight: Vec<SendAttempt>,
    next_id: u64,
}

impl ComposeState {
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Send button enabled: non-blank draft and the form isn't disabled.
    #[must_use]
    pub fn can_send(&self, disabled: bool) -> bool {
        !disabled && !self.draft.trim().is_empty()
    }

    #[must_use]
    pub fn in_flight(&self) -> &[SendAttempt] {
        &self.in_flight
    }

    #[must_use]
    pub fn is_sending(&self) -> bool {
        !self.in_flight.is_empty()
    }

    /// Start sending the trimmed draft. The draft is cleared immediately.
    ///
    /// Returns `None` when sending isn't allowed.
    pub fn begin_send(&mut self, disabled: bool) -> Option<SendAttempt> {
        if !self.can_send(disabled) {
            return None;
        }
        let text = self.draft.trim().to_owned();
        self.draft.clear();

        self.next_id += 1;
        let mut attempt = SendAttempt::new(self.next_id, text);
        attempt.transition(SendPhase::Sending).ok()?;
        self.in_flight.push(attempt.clone());
        Some(attempt)
    }

    /// The store accepted attempt `id`. The draft is left as the user has it.
    pub fn confirm(&mut self, id: u64) -> Option<SendAttempt> {
        self.settle(id, SendPhase::Confirmed)
    }

    /// The store rejected attempt `id`; its text goes back into the draft.
    pub fn fail(&mut self, id: u64) -> Option<SendAttempt> {
        let attempt = self.settle(id, SendPhase::RolledBack)?;
        self.draft.clone_from(&attempt.text);
        Some(attempt)
    }

    fn settle(&mut self, id: u64, outcome: SendPhase) -> Option<SendAttempt> {
        let idx = self.in_flight.iter().position(|a| a.id == id)?;
        let mut attempt = self.in_flight.remove(idx);
        if let Err(e) = attempt.transition(outcome) {
            tracing::warn!(error = %e, attempt = id, "ignoring send settlement");
            return None;
        }
        Some(attempt)
    }
}

/// Compose state for threads that are not on screen, keyed by thread id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ComposeDrafts {
    parked: HashMap<String, ComposeState>,
}

impl ComposeDrafts {
    /// Park `visible` under `from` and hand back whatever was parked for `to`.
    #[must_use]
    pub fn switch(&mut self, from: Option<&str>, visible: ComposeState, to: &str) -> ComposeState {
        if let Some(from) = from {
            self.park(from, visible);
        }
        self.parked.remove(to).unwrap_or_default()
    }

    /// Keep `state` for `thread_id`. An empty draft with nothing in flight
    /// isn't worth keeping.
    pub fn park(&mut self, thread_id: &str, state: ComposeState) {
        if state.draft.is_empty() && !state.is_sending() {
            self.parked.remove(thread_id);
        } else {
            self.parked.insert(thread_id.to_owned(), state);
        }
    }

    #[must_use]
    pub fn parked(&self, thread_id: &str) -> Option<&ComposeState> {
        self.parked.get(thread_id)
    }

    /// Confirm attempt `id` of a parked thread.
    pub fn confirm(&mut self, thread_id: &str, id: u64) -> Option<SendAttempt> {
        self.settle(thread_id, |state| state.confirm(id))
    }

    /// Roll back attempt `id` of a parked thread; the text waits in that
    /// thread's draft.
    pub fn fail(&mut self, thread_id: &str, id: u64) -> Option<SendAttempt> {
        self.settle(thread_id, |state| state.fail(id))
    }

    fn settle(
        &mut self,
        thread_id: &str,
        settle: impl FnOnce(&mut ComposeState) -> Option<SendAttempt>,
    ) -> Option<SendAttempt> {
        let mut state = self.parked.remove(thread_id)?;
        let settled = settle(&mut state);
        self.park(thread_id, state);
        settled
    }
}

// =============================================================================
// KEYBOARD CONTRACT
// =============================================================================

/// Inline styles with compose shortcuts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Markup {
    Bold,
    Italic,
    Underline,
}

impl Markup {
    /// Delimiter understood by [`crate::markup::parse`].
    #[must_use]
    pub fn delimiter(self) -> &'static str {
        match self {
            Self::Bold => "**",
            Self::Italic => "*",
            Self::Underline => "__",
        }
    }
}

/// A key press as the compose box sees it. `modifier` is Ctrl or Meta.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyChord<'a> {
    pub key: &'a str,
    pub shift: bool,
    pub modifier: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ComposeAction {
    Send,
    /// Let the textarea insert a newline.
    Newline,
    Wrap(Markup),
    /// Not a compose shortcut.
    Ignore,
}

#[must_use]
pub fn compose_action(chord: KeyChord<'_>) -> ComposeAction {
    match chord.key {
        "Enter" if chord.modifier => ComposeAction::Send,
        "Enter" if chord.shift => ComposeAction::Newline,
        "Enter" => ComposeAction::Send,
        "b" | "B" if chord.modifier => ComposeAction::Wrap(Markup::Bold),
        "i" | "I" if chord.modifier => ComposeAction::Wrap(Markup::Italic),
        "u" | "U" if chord.modifier => ComposeAction::Wrap(Markup::Underline),
        _ => ComposeAction::Ignore,
    }
}

/// Text and selection after wrapping. Offsets are UTF-16 code units.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WrapResult {
    pub text: String,
    pub selection_start: usize,
    pub selection_end: usize,
}

/// Wrap `[start, end)` in `delimiter`.
///
/// With a selection the result selects the wrapped content; with a bare
/// cursor it lands between the inserted delimiters.
#[must_use]
pub fn wrap_selection(text: &str, start: usize, end: usize, delimiter: &str) -> WrapResult {
    let (start, end) = if start <= end { (start, end) } else { (end, start) };
    let start_byte = utf16_to_byte(text, start);
    let end_byte = utf16_to_byte(text, end).max(start_byte);
    let selected = &text[start_byte..end_byte];

    let mut out = String::with_capacity(text.len() + 2 * delimiter.len());
    out.push_str(&text[..start_byte]);
    out.push_str(delimiter);
    out.push_str(selected);
    out.push_str(delimiter);
    out.push_str(&text[end_byte..]);

    let selection_start = utf16_len(&text[..start_byte]) + utf16_len(delimiter);
    WrapResult { text: out, selection_start, selection_end: selection_start + utf16_len(selected) }
}

#[must_use]
pub fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Byte offset of the first char at or past `offset` UTF-16 units.
fn utf16_to_byte(text: &str, offset: usize) -> usize {
    let mut units = 0;
    for (idx, ch) in text.char_indices() {
        if units >= offset {
            return idx;
        }
        units += ch.len_utf16();
    }
    text.len()
}
