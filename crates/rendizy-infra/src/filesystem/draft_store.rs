//! File-backed draft store.
//!
//! Each record lives in `{dir}/{key}.json`. Writes go to a temporary file
//! in the same directory and are renamed into place, so a crash mid-write
//! leaves the previous copy intact.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use rendizy_core::draft::store::DraftStore;
use rendizy_types::error::StoreError;
use tracing::debug;

const EXTENSION: &str = "json";

/// Directory of JSON draft files.
#[derive(Debug, Clone)]
pub struct FileDraftStore {
    dir: PathBuf,
}

impl FileDraftStore {
    /// Use `dir` as the store root. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.{EXTENSION}")))
    }
}

fn validate_key(key: &str) -> Result<(), StoreError> {
    let invalid = key.is_empty()
        || key.starts_with('.')
        || key.contains(['/', '\\', '\0']);
    if invalid {
        return Err(StoreError::InvalidKey(key.to_string()));
    }
    Ok(())
}

impl DraftStore for FileDraftStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;

        let tmp = self.dir.join(format!(".{key}.{EXTENSION}.tmp"));
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(value.as_bytes())?;
            file.sync_all()?;
        }
        if let Err(e) = fs::rename(&tmp, &path) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        debug!(key, path = %path.display(), "draft file written");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn list_keys(&self) -> Result<Vec<String>, StoreError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut keys = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            // Skip temporaries and anything we would not have written.
            if validate_key(stem).is_ok() {
                keys.push(stem.to_string());
            }
        }
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_set_and_get_roundtrip() {
        let dir = tempdir().unwrap();
        let store = FileDraftStore::new(dir.path().join("drafts"));

        store.set("property_draft_p1", r#"{"name":"Casa A"}"#).unwrap();
        assert_eq!(
            store.get("property_draft_p1").unwrap().as_deref(),
            Some(r#"{"name":"Casa A"}"#)
        );
        assert!(dir.path().join("drafts/property_draft_p1.json").exists());
    }

    #[test]
    fn test_get_missing_returns_none() {
        let dir = tempdir().unwrap();
        let store = FileDraftStore::new(dir.path());
        assert!(store.get("property_draft_nope").unwrap().is_none());
    }

    #[test]
    fn test_set_overwrites_and_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        let store = FileDraftStore::new(dir.path());

        store.set("property_draft_p1", "{\"v\":1}").unwrap();
        store.set("property_draft_p1", "{\"v\":2}").unwrap();
        assert_eq!(
            store.get("property_draft_p1").unwrap().as_deref(),
            Some("{\"v\":2}")
        );

        let files: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let dir = tempdir().unwrap();
        let store = FileDraftStore::new(dir.path());

        store.set("property_draft_p1", "{}").unwrap();
        store.remove("property_draft_p1").unwrap();
        store.remove("property_draft_p1").unwrap();
        assert!(store.get("property_draft_p1").unwrap().is_none());
    }

    #[test]
    fn test_list_keys_sorted_and_filtered() {
        let dir = tempdir().unwrap();
        let store = FileDraftStore::new(dir.path());

        store.set("property_draft_b", "{}").unwrap();
        store.set("property_draft_a", "{}").unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();
        fs::write(dir.path().join(".property_draft_c.json.tmp"), "x").unwrap();

        assert_eq!(
            store.list_keys().unwrap(),
            vec!["property_draft_a", "property_draft_b"]
        );
    }

    #[test]
    fn test_list_keys_missing_dir_is_empty() {
        let dir = tempdir().unwrap();
        let store = FileDraftStore::new(dir.path().join("absent"));
        assert!(store.list_keys().unwrap().is_empty());
    }

    #[test]
    fn test_dotted_entity_ids_are_stored() {
        let dir = tempdir().unwrap();
        let store = FileDraftStore::new(dir.path());

        store.set("property_draft_v1..2", "{}").unwrap();
        assert_eq!(store.get("property_draft_v1..2").unwrap().as_deref(), Some("{}"));
        assert_eq!(store.list_keys().unwrap(), vec!["property_draft_v1..2"]);
    }

    #[test]
    fn test_invalid_keys_rejected() {
        let dir = tempdir().unwrap();
        let store = FileDraftStore::new(dir.path());

        for key in ["", ".", "..", "../escape", "a/b", "a\\b", ".hidden"] {
            assert!(
                matches!(store.set(key, "{}"), Err(StoreError::InvalidKey(_))),
                "key {key:?} should be rejected"
            );
        }
    }
}
