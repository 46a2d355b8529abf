use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Configuration for the media storage backend.
///
/// The bucket name is passed alongside, since every variant needs it.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MediaStoreConfig {
    /// In-memory object storage (for testing)
    #[default]
    Memory,

    /// Local S3 simulator; objects live under `<root>/<bucket>/`
    Local {
        /// Simulator root directory
        root: PathBuf,
    },

    /// S3 (or S3-compatible) storage.
    ///
    /// Credentials are read from the standard `AWS_*` environment variables.
    S3 {
        /// Region (e.g. "us-west-2")
        region: String,
        /// Optional endpoint URL for S3-compatible services
        endpoint: Option<String>,
    },
}
