//! Reading local drafts back when an editor opens.
//!
//! A corrupt or unreadable local copy must never block the user from
//! starting a fresh form, so every failure here degrades to "no draft".

use rendizy_types::draft::DraftKey;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::store::DraftStore;

/// Reads local fallback records.
pub struct DraftRecoveryReader<S: DraftStore> {
    store: S,
}

impl<S: DraftStore> DraftRecoveryReader<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Load and parse the draft stored under `key`.
    ///
    /// Returns `None` when the record is absent, the store fails, or the
    /// value does not parse as `D`.
    pub fn recover<D: DeserializeOwned>(&self, key: &DraftKey) -> Option<D> {
        let raw = self.read(key)?;
        match serde_json::from_str(&raw) {
            Ok(draft) => {
                debug!(key = %key, "recovered local draft");
                Some(draft)
            }
            Err(e) => {
                warn!(key = %key, error = %e, "ignoring unparsable local draft");
                None
            }
        }
    }

    /// Load the draft as untyped JSON, with the same failure rules.
    pub fn recover_raw(&self, key: &DraftKey) -> Option<serde_json::Value> {
        self.recover(key)
    }

    fn read(&self, key: &DraftKey) -> Option<String> {
        match self.store.get(key.as_str()) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key = %key, error = %e, "failed to read local draft");
                None
            }
        }
    }
}
