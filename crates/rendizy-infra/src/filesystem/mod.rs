//! Filesystem adapters for Rendizy.
//!
//! Resolves the data directory layout and provides the file-backed
//! `DraftStore`.

pub mod draft_store;

use std::path::{Path, PathBuf};

pub use draft_store::FileDraftStore;

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `RENDIZY_DATA_DIR` environment variable
/// 2. `~/.rendizy`
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("RENDIZY_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".rendizy");
    }

    // Last resort: current directory
    PathBuf::from(".rendizy")
}

/// Directory holding local draft records: `{data_dir}/drafts/`.
pub fn drafts_dir(data_dir: &Path) -> PathBuf {
    data_dir.join("drafts")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drafts_dir_layout() {
        let dir = drafts_dir(Path::new("/tmp/rendizy"));
        assert_eq!(dir, PathBuf::from("/tmp/rendizy/drafts"));
    }

    #[test]
    fn test_resolve_data_dir_is_not_empty() {
        assert!(!resolve_data_dir().as_os_str().is_empty());
    }
}
