//! Global configuration loader for Rendizy.
//!
//! Reads `config.toml` from the data directory (`~/.rendizy/` in production)
//! and deserializes it into [`GlobalConfig`]. Falls back to defaults when the
//! file is missing or malformed.

use std::path::Path;

use rendizy_types::config::GlobalConfig;

/// Lowest accepted debounce interval.
const MIN_DEBOUNCE_MS: u64 = 100;

/// Load global configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`GlobalConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - If the file parses, returns it with the debounce clamped to a sane minimum.
pub async fn load_global_config(data_dir: &Path) -> GlobalConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return GlobalConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return GlobalConfig::default();
        }
    };

    match toml::from_str::<GlobalConfig>(&content) {
        Ok(mut config) => {
            if config.autosave.debounce_ms < MIN_DEBOUNCE_MS {
                tracing::warn!(
                    debounce_ms = config.autosave.debounce_ms,
                    "autosave.debounce_ms below {MIN_DEBOUNCE_MS}, clamping"
                );
                config.autosave.debounce_ms = MIN_DEBOUNCE_MS;
            }
            config
        }
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            GlobalConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_global_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_global_config(tmp.path()).await;
        assert_eq!(config.autosave.debounce_ms, 2_000);
        assert!(config.remote.is_none());
    }

    #[tokio::test]
    async fn load_global_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            r#"
[autosave]
debounce_ms = 1500
notify = false

[remote]
base_url = "https://api.rendizy.test/properties"
api_key = "secret"
"#,
        )
        .await
        .unwrap();

        let config = load_global_config(tmp.path()).await;
        assert_eq!(config.autosave.debounce_ms, 1_500);
        assert!(!config.autosave.notify);
        assert_eq!(config.autosave.saved_display_ms, 3_000);
        let remote = config.remote.unwrap();
        assert_eq!(remote.base_url, "https://api.rendizy.test/properties");
        assert_eq!(remote.api_key.as_deref(), Some("secret"));
        assert_eq!(remote.timeout_secs, 30);
    }

    #[tokio::test]
    async fn load_global_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_global_config(tmp.path()).await;
        assert_eq!(config.autosave.debounce_ms, 2_000);
        assert!(config.remote.is_none());
    }

    #[tokio::test]
    async fn load_global_config_clamps_tiny_debounce() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "[autosave]\ndebounce_ms = 5\n")
            .await
            .unwrap();

        let config = load_global_config(tmp.path()).await;
        assert_eq!(config.autosave.debounce_ms, MIN_DEBOUNCE_MS);
    }
}
