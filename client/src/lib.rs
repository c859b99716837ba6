//! # client
//!
//! Leptos + WASM frontend for event messaging: the two-pane inbox, message
//! rendering, compose with optimistic send, and the browser-side adapters
//! (hosted REST store, notification function, `localStorage`, clock) that
//! plug into the `messaging` core.
//!
//! Browser code sits behind the `csr` feature. Without it the crate still
//! builds natively so the component helpers and adapters can be unit tested;
//! network calls then report the backend as unavailable.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod state;
pub mod util;

/// WASM entry point: install panic and log hooks, then mount [`app::App`].
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Debug).is_err() {
        leptos::logging::warn!("console logger already initialised");
    }
    leptos::mount::mount_to_body(app::App);
}
