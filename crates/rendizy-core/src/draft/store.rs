//! Local fallback store trait.
//!
//! Defines the key-value interface the controller writes drafts to.
//! Implementations live in this crate (`memory`) and in rendizy-infra.

use std::sync::Arc;

use rendizy_types::error::StoreError;

/// Synchronous key-value store holding serialized drafts.
///
/// Synchronous so the controller can flush the current draft from `Drop`.
/// Writes are last-writer-wins overwrites of a single key.
pub trait DraftStore: Send + Sync {
    /// Get the raw value for a key. Returns None if the key does not exist.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Set the value for a key (overwrite).
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete a key. No-op if the key does not exist.
    fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// List all keys, sorted.
    fn list_keys(&self) -> Result<Vec<String>, StoreError>;
}

impl<S: DraftStore + ?Sized> DraftStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }

    fn list_keys(&self) -> Result<Vec<String>, StoreError> {
        (**self).list_keys()
    }
}
