//! Event messaging core shared by the browser client and the notify server.
//!
//! SYSTEM CONTEXT
//! ==============
//! Threads and messages live in the hosted data store; this crate owns the
//! logic that sits on top of them: inline markup, unread tracking, compose
//! state, inbox refresh and rate-limited notification dispatch. Browser and
//! network specifics stay behind the [`store::ThreadStore`],
//! [`storage::KeyValueStore`], [`clock::Clock`] and
//! [`notify::NotificationTransport`] seams so every rule here runs natively
//! under `cargo test`.
//!
//! TRADE-OFFS
//! ==========
//! Read markers and notification rate-limit markers are client-local and
//! advisory. Clearing browser storage or switching devices resets both.

pub mod clock;
pub mod compose;
pub mod feed;
pub mod inbox;
pub mod markup;
pub mod message_list;
pub mod model;
pub mod notify;
pub mod rate_limit;
pub mod read_state;
pub mod storage;
pub mod store;
pub mod thread_list;
pub mod time_label;
