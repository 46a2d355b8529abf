//! Error types for the media store.

use std::path::PathBuf;

/// Errors that can occur when working with the media store.
#[derive(Debug, thiserror::Error)]
pub enum MediaStoreError {
    /// Object (or, for the local simulator, its sidecar) not found
    #[error("media not found: {0}")]
    NotFound(String),

    /// Key cannot be mapped onto storage
    #[error("invalid media key: {0:?}")]
    InvalidKey(String),

    /// Object storage error
    #[error("object storage error: {0}")]
    ObjectStore(#[from] object_store::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Unreadable metadata sidecar
    #[error("invalid metadata sidecar {path}: {source}")]
    Sidecar {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// S3 bucket not found - must be created before use
    #[error("S3 bucket '{0}' does not exist. Create it before starting the server.")]
    BucketNotFound(String),
}

impl MediaStoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, MediaStoreError::NotFound(_))
    }
}

/// Result type alias for media store operations.
pub type Result<T> = std::result::Result<T, MediaStoreError>;
