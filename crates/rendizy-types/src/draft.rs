//! Draft persistence types.
//!
//! `SaveStatus` is the transient indicator shown next to a form while the
//! controller persists it. `DraftKey` names the local fallback record of an
//! entity, and `SaveOutcome` reports what a manual save actually did.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Prefix shared by every local fallback record.
pub const DRAFT_KEY_PREFIX: &str = "property_draft_";

/// Entity id used for records that have not been created upstream yet.
pub const NEW_ENTITY_ID: &str = "draft";

/// Current state of the save indicator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveStatus {
    #[default]
    Idle,
    Saving,
    Saved,
    Error,
}

impl SaveStatus {
    /// Short label rendered by status indicators. Idle renders nothing.
    pub fn label(&self) -> &'static str {
        match self {
            SaveStatus::Idle => "",
            SaveStatus::Saving => "Saving...",
            SaveStatus::Saved => "Saved",
            SaveStatus::Error => "Error saving (kept locally)",
        }
    }

    /// Whether the status resets itself to idle after a display window.
    pub fn is_transient(&self) -> bool {
        matches!(self, SaveStatus::Saved | SaveStatus::Error)
    }
}

impl fmt::Display for SaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SaveStatus::Idle => "idle",
            SaveStatus::Saving => "saving",
            SaveStatus::Saved => "saved",
            SaveStatus::Error => "error",
        };
        write!(f, "{s}")
    }
}

/// Key of a local fallback record: `property_draft_<entityId>`.
///
/// Entities without an identifier share the `property_draft_draft` record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DraftKey(String);

impl DraftKey {
    /// Build the key for an entity. Blank ids are treated as a new entity.
    pub fn for_entity(entity_id: Option<&str>) -> Self {
        let id = entity_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .unwrap_or(NEW_ENTITY_ID);
        Self(format!("{DRAFT_KEY_PREFIX}{id}"))
    }

    /// Key for an entity that has not been created upstream yet.
    pub fn new_entity() -> Self {
        Self::for_entity(None)
    }

    /// Parse a raw store key back into a `DraftKey`.
    ///
    /// Returns `None` for keys outside the draft namespace.
    pub fn parse(raw: &str) -> Option<Self> {
        let id = raw.strip_prefix(DRAFT_KEY_PREFIX)?;
        if id.is_empty() {
            return None;
        }
        Some(Self(raw.to_string()))
    }

    /// The entity id portion (`draft` for new entities).
    pub fn entity_id(&self) -> &str {
        &self.0[DRAFT_KEY_PREFIX.len()..]
    }

    /// Whether this key belongs to an entity not yet created upstream.
    pub fn is_new_entity(&self) -> bool {
        self.entity_id() == NEW_ENTITY_ID
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DraftKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of an explicit save checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveOutcome {
    /// The draft matched the last saved snapshot; nothing was sent.
    Unchanged,
    /// The remote save succeeded.
    Saved,
    /// The remote save failed; the draft is kept in the local store.
    Failed,
}

impl SaveOutcome {
    /// True when the remote target holds the current draft afterwards.
    pub fn is_persisted(&self) -> bool {
        matches!(self, SaveOutcome::Unchanged | SaveOutcome::Saved)
    }
}
