//! Deleting local drafts once the entity is durably saved upstream.

use rendizy_types::draft::DraftKey;
use tracing::{debug, warn};

use super::store::DraftStore;

/// Removes local fallback records.
pub struct DraftDiscardHelper<S: DraftStore> {
    store: S,
}

impl<S: DraftStore> DraftDiscardHelper<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Delete the record under `key`. Idempotent.
    ///
    /// Returns `false` only when the store failed; a missing key counts as
    /// discarded.
    pub fn discard(&self, key: &DraftKey) -> bool {
        match self.store.remove(key.as_str()) {
            Ok(()) => {
                debug!(key = %key, "local draft discarded");
                true
            }
            Err(e) => {
                warn!(key = %key, error = %e, "failed to discard local draft");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::memory::MemoryDraftStore;

    #[test]
    fn test_discard_removes_record() {
        let store = MemoryDraftStore::new();
        let key = DraftKey::for_entity(Some("p1"));
        store.set(key.as_str(), "{}").unwrap();

        let helper = DraftDiscardHelper::new(store.clone());
        assert!(helper.discard(&key));
        assert!(store.get(key.as_str()).unwrap().is_none());
    }

    #[test]
    fn test_discard_is_idempotent() {
        let store = MemoryDraftStore::new();
        let helper = DraftDiscardHelper::new(store.clone());
        let key = DraftKey::new_entity();

        assert!(helper.discard(&key));
        assert!(helper.discard(&key));
        assert!(store.is_empty());
    }

    #[test]
    fn test_discard_leaves_other_keys() {
        let store = MemoryDraftStore::new();
        store.set("property_draft_a", "{}").unwrap();
        store.set("property_draft_b", "{}").unwrap();

        DraftDiscardHelper::new(store.clone()).discard(&DraftKey::for_entity(Some("a")));
        assert_eq!(store.list_keys().unwrap(), vec!["property_draft_b"]);
    }
}
