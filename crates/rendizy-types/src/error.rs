use thiserror::Error;

/// Errors from a remote save target.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("save rejected: {0}")]
    Rejected(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Errors from the local fallback store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid key '{0}'")]
    InvalidKey(String),

    #[error("store backend error: {0}")]
    Backend(String),
}

/// Errors from wizard navigation and submission.
#[derive(Debug, Error)]
pub enum WizardError {
    #[error("unknown wizard step: block '{block}', index {index}")]
    UnknownStep { block: String, index: usize },

    #[error("failed to save step '{step}': {source}")]
    Save {
        step: String,
        #[source]
        source: SaveError,
    },

    #[error("step '{step}' could not be checkpointed; draft kept locally")]
    Checkpoint { step: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_error_display() {
        let err = SaveError::Rejected("quota exceeded".to_string());
        assert_eq!(err.to_string(), "save rejected: quota exceeded");
    }

    #[test]
    fn test_store_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: StoreError = io.into();
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_wizard_error_display() {
        let err = WizardError::Save {
            step: "content-type".to_string(),
            source: SaveError::Transport("timeout".to_string()),
        };
        assert!(err.to_string().contains("content-type"));
        assert!(err.to_string().contains("timeout"));

        let err = WizardError::UnknownStep {
            block: "nope".to_string(),
            index: 3,
        };
        assert_eq!(err.to_string(), "unknown wizard step: block 'nope', index 3");

        let err = WizardError::Checkpoint {
            step: "financial-fees".to_string(),
        };
        assert!(err.to_string().contains("kept locally"));
    }
}
