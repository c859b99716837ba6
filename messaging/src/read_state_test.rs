use super::*;
use crate::storage::{MemoryKeyValueStore, StorageError};

#[test]
fn empty_store_has_no_markers() {
    let reads = ReadStateStore::new(MemoryKeyValueStore::new());
    assert!(reads.load().is_empty());
    assert_eq!(reads.last_read("t-1"), None);
}

#[test]
fn mark_read_persists_under_single_key() {
    let kv = MemoryKeyValueStore::new();
    let reads = ReadStateStore::new(kv.clone());
    reads.mark_read("t-1", 1_000);
    reads.mark_read("t-2", 2_000);

    assert_eq!(kv.len(), 1);
    let raw = kv.get(READ_STATE_KEY).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed, serde_json::json!({ "t-1": 1000, "t-2": 2000 }));
}

#[test]
fn mark_read_overwrites_previous_marker() {
    let reads = ReadStateStore::new(MemoryKeyValueStore::new());
    reads.mark_read("t-1", 1_000);
    let state = reads.mark_read("t-1", 5_000);
    assert_eq!(state.last_read("t-1"), Some(5_000));
    assert_eq!(reads.last_read("t-1"), Some(5_000));
}

#[test]
fn corrupt_marker_map_reads_as_empty() {
    let kv = MemoryKeyValueStore::new();
    kv.set(READ_STATE_KEY, "[1,2,3]").unwrap();
    let reads = ReadStateStore::new(kv);
    assert!(reads.load().is_empty());
}

struct RejectingStore;

impl KeyValueStore for RejectingStore {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Write("quota exceeded".into()))
    }
}

#[test]
fn failed_write_still_returns_updated_state() {
    let reads = ReadStateStore::new(RejectingStore);
    let state = reads.mark_read("t-1", 7);
    assert_eq!(state.last_read("t-1"), Some(7));
    assert_eq!(reads.last_read("t-1"), None);
}
