//! MediaStore - one interface over the remote and local backends.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

use crate::config::MediaStoreConfig;
use crate::error::Result;
use crate::local::LocalSimulator;
use crate::remote::RemoteObjectStore;

/// Flat string metadata attached to an object.
pub type Metadata = BTreeMap<String, String>;

/// Optional attributes for a write.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveOptions {
    pub metadata: Option<Metadata>,
    pub content_type: Option<String>,
}

impl SaveOptions {
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// A fetched object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaObject {
    pub body: Bytes,
    pub metadata: Option<Metadata>,
    pub content_type: Option<String>,
}

/// Storage backend operations.
///
/// Implementations hold only configuration fixed at construction (bucket name,
/// root directory, client handle) and are shared across requests. Writes to
/// one key are not serialized; the last write to finish wins.
#[async_trait]
pub trait MediaBackend: Debug + Send + Sync + 'static {
    /// Bucket this backend stores into
    fn bucket(&self) -> &str;

    /// Store `body` under `key`, replacing any previous object.
    async fn save(&self, key: &str, body: Bytes, options: SaveOptions) -> Result<()>;

    /// Load the object under `key`, or `MediaStoreError::NotFound`.
    async fn fetch(&self, key: &str) -> Result<MediaObject>;

    /// Keys under `prefix`.
    async fn list(&self, prefix: &str) -> Result<Vec<String>>;

    /// Remove every key in `keys`. Missing keys are not an error.
    async fn delete(&self, keys: &BTreeSet<String>) -> Result<()>;
}

/// Media storage facade.
///
/// Owns the backend chosen at startup; nothing branches on the backend per call.
#[derive(Debug, Clone)]
pub struct MediaStore {
    backend: Arc<dyn MediaBackend>,
}

impl MediaStore {
    /// Wrap an already constructed backend.
    pub fn new(backend: impl MediaBackend) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Build the backend described by `config` for `bucket`.
    pub async fn from_config(bucket: &str, config: MediaStoreConfig) -> Result<Self> {
        let store = match config {
            MediaStoreConfig::Memory => Self::new(RemoteObjectStore::memory(bucket)),
            MediaStoreConfig::Local { root } => {
                Self::new(LocalSimulator::new(&root, bucket).await?)
            }
            MediaStoreConfig::S3 { region, endpoint } => {
                Self::new(RemoteObjectStore::s3(bucket, &region, endpoint.as_deref()).await?)
            }
        };
        Ok(store)
    }

    pub fn bucket(&self) -> &str {
        self.backend.bucket()
    }

    /// Store media under `key` with full overwrite semantics.
    pub async fn save_media(
        &self,
        key: &str,
        body: impl Into<Bytes>,
        options: SaveOptions,
    ) -> Result<()> {
        self.backend.save(key, body.into(), options).await
    }

    /// Fetch media, its metadata and content type.
    pub async fn fetch_media(&self, key: &str) -> Result<MediaObject> {
        self.backend.fetch(key).await
    }

    /// List keys under `prefix`.
    ///
    /// The local simulator lists a single directory level; the remote store
    /// lists every key that starts with the prefix.
    pub async fn list_media(&self, prefix: &str) -> Result<Vec<String>> {
        self.backend.list(prefix).await
    }

    /// Delete a set of keys. An empty set succeeds without touching storage.
    pub async fn delete_media<I, S>(&self, keys: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keys: BTreeSet<String> = keys.into_iter().map(Into::into).collect();
        tracing::debug!(keys = ?keys, "deleteMedia");
        if keys.is_empty() {
            return Ok(());
        }
        self.backend.delete(&keys).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::error::MediaStoreError;

    /// Counts backend calls and stores nothing
    #[derive(Debug, Default)]
    struct CountingBackend {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl MediaBackend for CountingBackend {
        fn bucket(&self) -> &str {
            "counting"
        }
        async fn save(&self, _: &str, _: Bytes, _: SaveOptions) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
        async fn fetch(&self, key: &str) -> Result<MediaObject> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(MediaStoreError::NotFound(key.to_string()))
        }
        async fn list(&self, _: &str) -> Result<Vec<String>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![])
        }
        async fn delete(&self, _: &BTreeSet<String>) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_empty_delete_never_reaches_backend() {
        let calls = Arc::new(AtomicUsize::new(0));
        let store = MediaStore::new(CountingBackend {
            calls: calls.clone(),
        });

        store.delete_media(Vec::<String>::new()).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        store.delete_media(["a", "a", "b"]).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_from_config_memory() {
        let store = MediaStore::from_config("bucket", MediaStoreConfig::Memory)
            .await
            .unwrap();
        assert_eq!(store.bucket(), "bucket");

        store
            .save_media("k", "v", SaveOptions::default())
            .await
            .unwrap();
        assert_eq!(store.fetch_media("k").await.unwrap().body, Bytes::from("v"));
    }

    #[tokio::test]
    async fn test_from_config_local_creates_bucket_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = MediaStoreConfig::Local {
            root: temp_dir.path().to_path_buf(),
        };
        let store = MediaStore::from_config("personas.bucket", config)
            .await
            .unwrap();
        assert_eq!(store.bucket(), "personas.bucket");
        assert!(temp_dir.path().join("personas.bucket").is_dir());
    }
}
