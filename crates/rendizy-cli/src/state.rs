//! Application state shared by the CLI commands.

use std::path::PathBuf;

use rendizy_infra::config::load_global_config;
use rendizy_infra::filesystem::{FileDraftStore, drafts_dir, resolve_data_dir};
use rendizy_types::config::GlobalConfig;

pub struct AppState {
    pub data_dir: PathBuf,
    pub config: GlobalConfig,
    pub store: FileDraftStore,
}

impl AppState {
    /// Resolve the data directory, load `config.toml`, open the draft store.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_global_config(&data_dir).await;
        let store = FileDraftStore::new(drafts_dir(&data_dir));
        tracing::debug!(data_dir = %data_dir.display(), "app state initialized");

        Ok(Self {
            data_dir,
            config,
            store,
        })
    }
}
