//! Browser environment adapters.
//!
//! SYSTEM CONTEXT
//! ==============
//! These modules wrap `localStorage` and the JS clock behind the core's
//! `KeyValueStore` and `Clock` traits so components never touch web-sys
//! directly.

pub mod browser_clock;
pub mod browser_storage;
