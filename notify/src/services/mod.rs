//! Domain services behind the HTTP routes.
//!
//! SYSTEM CONTEXT
//! ==============
//! `notification` validates a request, applies the chat cooldown and hands a
//! rendered email to a `mailer`. `templates` turns a request into subject and
//! HTML.

pub mod mailer;
pub mod notification;
pub mod templates;
