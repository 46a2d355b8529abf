//! Local S3 simulator
//!
//! Layout under `<root>/<bucket>/`:
//!
//! ```text
//! personas/abc/^Profile.json        data
//! personas/abc/^Profile.json.meta   {"Bucket":..,"Key":..,"Metadata":..,"ContentType":..}
//! ```

use std::collections::BTreeSet;
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::{MediaStoreError, Result};
use crate::store::{MediaBackend, MediaObject, Metadata, SaveOptions};

const ESCAPE_MARKER: char = '^';
const META_SUFFIX: &str = ".meta";
const IGNORED_SUFFIXES: [&str; 2] = [META_SUFFIX, ".DS_Store"];

/// A character that lowercasing changes: uppercase and titlecase letters.
fn is_capital(c: char) -> bool {
    !c.to_lowercase().eq(std::iter::once(c))
}

/// Prefix every character that lowercasing would change with `^`.
///
/// Keeps `Foo` and `foo` apart on case-insensitive filesystems.
pub fn escape_capitals(key: &str) -> String {
    let mut escaped = String::with_capacity(key.len());
    for c in key.chars() {
        if is_capital(c) {
            escaped.push(ESCAPE_MARKER);
        }
        escaped.push(c);
    }
    escaped
}

/// Inverse of [`escape_capitals`]: drop a `^` only when a capital follows.
pub fn unescape_capitals(name: &str) -> String {
    let mut unescaped = String::with_capacity(name.len());
    let mut chars = name.chars().peekable();
    while let Some(c) = chars.next() {
        if c == ESCAPE_MARKER && chars.peek().copied().is_some_and(is_capital) {
            continue;
        }
        unescaped.push(c);
    }
    unescaped
}

/// Sidecar record stored next to each data file
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Sidecar {
    bucket: String,
    key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    metadata: Option<Metadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content_type: Option<String>,
}

/// Filesystem-backed stand-in for the remote object store.
#[derive(Debug, Clone)]
pub struct LocalSimulator {
    bucket: String,
    dir: PathBuf,
}

impl LocalSimulator {
    /// Use `<root>/<bucket>` as the bucket directory, creating it if needed.
    pub async fn new(root: &Path, bucket: &str) -> Result<Self> {
        let dir = root.join(bucket);
        tokio::fs::create_dir_all(&dir).await?;
        tracing::info!(dir = %dir.display(), "Simulating S3; saving media files locally");
        Ok(Self {
            bucket: bucket.to_string(),
            dir,
        })
    }

    /// Bucket directory on disk
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Map a key onto the filesystem. `allow_empty` admits the bucket root.
    fn resolve(&self, key: &str, allow_empty: bool) -> Result<PathBuf> {
        let trimmed = key.trim_matches('/');
        if trimmed.is_empty() {
            return if allow_empty {
                Ok(self.dir.clone())
            } else {
                Err(MediaStoreError::InvalidKey(key.to_string()))
            };
        }

        let mut path = self.dir.clone();
        for segment in trimmed.split('/') {
            if segment.is_empty() || segment == "." || segment == ".." {
                return Err(MediaStoreError::InvalidKey(key.to_string()));
            }
            path.push(escape_capitals(segment));
        }
        Ok(path)
    }

    fn data_path(&self, key: &str) -> Result<PathBuf> {
        self.resolve(key, false)
    }

    fn meta_path(data_path: &Path) -> PathBuf {
        let mut name = OsString::from(data_path.as_os_str());
        name.push(META_SUFFIX);
        PathBuf::from(name)
    }
}

async fn exists(path: &Path) -> Result<bool> {
    Ok(tokio::fs::try_exists(path).await?)
}

/// Replace the data file, dropping the old sidecar first.
///
/// Until the new sidecar lands the key reads as missing, so a body is never
/// served with another write's metadata.
async fn write_body(path: &Path, body: &[u8]) -> Result<()> {
    remove_if_present(&LocalSimulator::meta_path(path)).await?;
    tokio::fs::write(path, body).await?;
    Ok(())
}

async fn remove_if_present(path: &Path) -> Result<()> {
    let removed = match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_dir() => tokio::fs::remove_dir_all(path).await,
        Ok(_) => tokio::fs::remove_file(path).await,
        Err(e) => Err(e),
    };
    match removed {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

#[async_trait]
impl MediaBackend for LocalSimulator {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn save(&self, key: &str, body: Bytes, options: SaveOptions) -> Result<()> {
        let path = self.data_path(key)?;
        if let Some(parent) = path.parent() {
            if !exists(parent).await? {
                tracing::debug!(dir = %parent.display(), "creating local directory");
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let sidecar = Sidecar {
            bucket: self.bucket.clone(),
            key: key.to_string(),
            metadata: options.metadata,
            content_type: options.content_type,
        };
        let meta_path = Self::meta_path(&path);
        let json = serde_json::to_vec(&sidecar).map_err(|source| MediaStoreError::Sidecar {
            path: meta_path.clone(),
            source,
        })?;

        tracing::debug!(key, path = %path.display(), "saving media");
        write_body(&path, &body).await?;
        tokio::fs::write(&meta_path, json).await?;
        Ok(())
    }

    async fn fetch(&self, key: &str) -> Result<MediaObject> {
        let path = self.data_path(key)?;
        let meta_path = Self::meta_path(&path);

        let is_file = match tokio::fs::metadata(&path).await {
            Ok(meta) => meta.is_file(),
            Err(e) if e.kind() == ErrorKind::NotFound => false,
            Err(e) => return Err(e.into()),
        };
        if !is_file || !exists(&meta_path).await? {
            tracing::debug!(key, path = %path.display(), "media or sidecar missing");
            return Err(MediaStoreError::NotFound(key.to_string()));
        }

        let raw = tokio::fs::read(&meta_path).await?;
        let sidecar: Sidecar =
            serde_json::from_slice(&raw).map_err(|source| MediaStoreError::Sidecar {
                path: meta_path.clone(),
                source,
            })?;
        let body = tokio::fs::read(&path).await?;

        Ok(MediaObject {
            body: Bytes::from(body),
            metadata: sidecar.metadata,
            content_type: sidecar.content_type,
        })
    }

    /// One directory level only. A prefix naming a file lists just that key;
    /// a missing prefix lists nothing.
    async fn list(&self, prefix: &str) -> Result<Vec<String>> {
        let dir = self.resolve(prefix, true)?;
        let meta = match tokio::fs::metadata(&dir).await {
            Ok(meta) => meta,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(vec![]),
            Err(e) => return Err(e.into()),
        };
        let base = prefix.trim_matches('/');
        if meta.is_file() {
            return Ok(vec![base.to_string()]);
        }

        let mut keys = Vec::new();
        let mut entries = tokio::fs::read_dir(&dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_dir() {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(unescape_capitals) else {
                continue;
            };
            if IGNORED_SUFFIXES.iter().any(|suffix| name.ends_with(suffix)) {
                continue;
            }
            keys.push(if base.is_empty() {
                name
            } else {
                format!("{base}/{name}")
            });
        }
        keys.sort();
        Ok(keys)
    }

    async fn delete(&self, keys: &BTreeSet<String>) -> Result<()> {
        let paths = keys
            .iter()
            .map(|key| self.data_path(key).map(|path| (key, path)))
            .collect::<Result<Vec<_>>>()?;

        for (key, path) in paths {
            tracing::debug!(key, path = %path.display(), "deleting local media");
            remove_if_present(&Self::meta_path(&path)).await?;
            remove_if_present(&path).await?;
        }
        Ok(())
    }
}
