//! In-memory `DraftStore`.
//!
//! Backed by a `DashMap` behind an `Arc`, so clones share the same entries.
//! Used for ephemeral sessions and tests.

use std::sync::Arc;

use dashmap::DashMap;
use rendizy_types::error::StoreError;

use super::store::DraftStore;

/// Process-local draft store. Cloning shares the underlying map.
#[derive(Debug, Clone, Default)]
pub struct MemoryDraftStore {
    entries: Arc<DashMap<String, String>>,
}

impl MemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl DraftStore for MemoryDraftStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }

    fn list_keys(&self) -> Result<Vec<String>, StoreError> {
        let mut keys: Vec<String> = self.entries.iter().map(|e| e.key().clone()).collect();
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_roundtrip() {
        let store = MemoryDraftStore::new();
        store.set("property_draft_1", r#"{"name":"Casa"}"#).unwrap();
        assert_eq!(
            store.get("property_draft_1").unwrap().as_deref(),
            Some(r#"{"name":"Casa"}"#)
        );
    }

    #[test]
    fn test_clones_share_entries() {
        let store = MemoryDraftStore::new();
        let clone = store.clone();
        clone.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove_nonexistent_is_noop() {
        let store = MemoryDraftStore::new();
        store.remove("missing").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_list_keys_sorted() {
        let store = MemoryDraftStore::new();
        store.set("b", "2").unwrap();
        store.set("a", "1").unwrap();
        store.set("c", "3").unwrap();
        assert_eq!(store.list_keys().unwrap(), vec!["a", "b", "c"]);
    }
}
