//! Network adapters for the hosted platform.
//!
//! SYSTEM CONTEXT
//! ==============
//! `rest` implements the thread store over the platform's REST tables,
//! `functions` invokes the notification function, and `feed` polls the
//! thread list on a browser timer.

pub mod feed;
pub mod functions;
pub mod rest;
