//! Inbox UI components.
//!
//! SYSTEM CONTEXT
//! ==============
//! `MessagesInbox` owns selection and polling and composes the list and
//! detail panes. The other components render what they are handed and report
//! user intent back through callbacks.

pub mod markup_view;
pub mod message_list;
pub mod messages_inbox;
pub mod send_message_form;
pub mod thread_detail;
pub mod thread_list;
