//! Global configuration types for Rendizy.
//!
//! `GlobalConfig` represents the top-level `config.toml` that controls
//! auto-save timing and the optional remote save endpoint.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Top-level configuration.
///
/// Loaded from `~/.rendizy/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default)]
    pub autosave: AutoSaveConfig,

    /// Remote endpoint drafts are saved to. Absent means local-only.
    #[serde(default)]
    pub remote: Option<RemoteConfig>,
}

/// Timing and notification settings for the draft persistence controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoSaveConfig {
    /// Quiet period after the last edit before an automatic save fires.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Emit user notices on save start, success and failure.
    #[serde(default = "default_true")]
    pub notify: bool,

    /// How long `saved` stays visible before returning to idle.
    #[serde(default = "default_saved_display_ms")]
    pub saved_display_ms: u64,

    /// How long `error` stays visible before returning to idle.
    #[serde(default = "default_error_display_ms")]
    pub error_display_ms: u64,

    /// Automatic saves are scheduled only while enabled.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_debounce_ms() -> u64 {
    2_000
}

fn default_saved_display_ms() -> u64 {
    3_000
}

fn default_error_display_ms() -> u64 {
    5_000
}

fn default_true() -> bool {
    true
}

impl Default for AutoSaveConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            notify: true,
            saved_display_ms: default_saved_display_ms(),
            error_display_ms: default_error_display_ms(),
            enabled: true,
        }
    }
}

impl AutoSaveConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn saved_display(&self) -> Duration {
        Duration::from_millis(self.saved_display_ms)
    }

    pub fn error_display(&self) -> Duration {
        Duration::from_millis(self.error_display_ms)
    }

    /// Same config with a different debounce interval.
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce_ms = u64::try_from(debounce.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Same config with notices switched on or off.
    pub fn with_notify(mut self, notify: bool) -> Self {
        self.notify = notify;
        self
    }
}

/// HTTP endpoint accepting `PUT` requests with the draft as JSON body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Base URL; the entity id is appended as the last path segment.
    pub base_url: String,

    /// Bearer token sent in the `Authorization` header.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}
