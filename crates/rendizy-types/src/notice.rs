//! Transient user notices emitted around save attempts.

use serde::{Deserialize, Serialize};

/// Severity of a notice, mirrored by the toast style a UI picks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// A short-lived message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_level() {
        assert_eq!(Notice::info("a").level, NoticeLevel::Info);
        assert_eq!(Notice::success("b").level, NoticeLevel::Success);
        let err = Notice::error("c");
        assert_eq!(err.level, NoticeLevel::Error);
        assert_eq!(err.message, "c");
    }

    #[test]
    fn test_notice_serialize() {
        let json = serde_json::to_string(&Notice::success("Saved")).unwrap();
        assert_eq!(json, r#"{"level":"success","message":"Saved"}"#);
    }
}
