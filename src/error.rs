use thiserror::Error;

/// Unified error type for floating tag operations
#[derive(Error, Debug)]
pub enum FloatingTagError {
    #[error(
        "Invalid semantic version format: {tag}. Expected format: v1.2.3 or 1.2.3 (with optional prerelease/build)"
    )]
    InvalidVersionFormat { tag: String },

    #[error("Prerelease versions are ignored. Tag \"{tag}\" contains prerelease identifier \"{prerelease}\"")]
    PrereleaseIgnored { tag: String, prerelease: String },

    #[error("Failed to resolve commit for reference '{reference}': {reason}")]
    CommitResolutionFailed { reference: String, reason: String },

    #[error("Failed to create or update tag '{tag}': {reason}")]
    TagOperationFailed { tag: String, reason: String },

    #[error("Failed to push tag '{tag}': {reason}")]
    PushFailed { tag: String, reason: String },

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Remote operation failed: {0}")]
    Remote(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in floating-tags
pub type Result<T> = std::result::Result<T, FloatingTagError>;

impl FloatingTagError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        FloatingTagError::Config(msg.into())
    }

    /// Create a remote error with context
    pub fn remote(msg: impl Into<String>) -> Self {
        FloatingTagError::Remote(msg.into())
    }

    pub fn invalid_version(tag: impl Into<String>) -> Self {
        FloatingTagError::InvalidVersionFormat { tag: tag.into() }
    }

    pub fn commit_resolution(reference: impl Into<String>, reason: impl ToString) -> Self {
        FloatingTagError::CommitResolutionFailed {
            reference: reference.into(),
            reason: reason.to_string(),
        }
    }

    pub fn tag_operation(tag: impl Into<String>, reason: impl ToString) -> Self {
        FloatingTagError::TagOperationFailed {
            tag: tag.into(),
            reason: reason.to_string(),
        }
    }

    pub fn push(tag: impl Into<String>, reason: impl ToString) -> Self {
        FloatingTagError::PushFailed {
            tag: tag.into(),
            reason: reason.to_string(),
        }
    }
}
