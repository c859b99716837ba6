//! Client-local key/value persistence.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser client backs [`KeyValueStore`] with `localStorage`; tests and
//! native callers use [`MemoryKeyValueStore`]. Values are strings, matching
//! what `localStorage` can hold, and JSON helpers sit on top.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use serde::de::DeserializeOwned;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("local storage unavailable")]
    Unavailable,
    #[error("local storage write rejected: {0}")]
    Write(String),
    #[error("failed to encode stored value: {0}")]
    Encode(#[from] serde_json::Error),
}

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    /// # Errors
    ///
    /// Returns an error if the backing storage refuses the write (quota,
    /// private browsing, missing window).
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Load a JSON value stored under `key`. Missing or corrupt values read as `None`.
pub fn load_json<T: DeserializeOwned>(store: &impl KeyValueStore, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    serde_json::from_str(&raw).ok()
}

/// Save `value` as JSON under `key`.
///
/// # Errors
///
/// Returns an error if encoding fails or the store rejects the write.
pub fn save_json<T: Serialize>(store: &impl KeyValueStore, key: &str, value: &T) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}

/// In-process store; clones share the same map.
#[derive(Clone, Debug, Default)]
pub struct MemoryKeyValueStore {
    inner: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryKeyValueStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Option<String> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}
