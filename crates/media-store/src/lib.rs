//! Media storage with object-store semantics
//!
//! This crate stores opaque media under slash separated keys, together with an
//! optional content type and a flat map of string metadata, behind a single
//! [`MediaStore`] facade.
//!
//! # Backends
//!
//! - Remote object storage (S3) via the `object_store` crate
//! - In-memory object storage (for testing), same code path as S3
//! - A local filesystem simulator that reproduces the S3 behaviour the server
//!   relies on: content type and metadata in a sidecar file, case-preserving
//!   keys on case-insensitive filesystems, prefix listing, bulk delete
//!
//! # Example
//!
//! ```rust,no_run
//! use media_store::{MediaStore, MediaStoreConfig, SaveOptions};
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), media_store::MediaStoreError> {
//! let config = MediaStoreConfig::Local { root: PathBuf::from("/tmp/s3simulator") };
//! let store = MediaStore::from_config("personas.bucket", config).await?;
//!
//! let options = SaveOptions::default().with_content_type("text/plain");
//! store.save_media("personas/abc/hello.txt", "hello", options).await?;
//! let media = store.fetch_media("personas/abc/hello.txt").await?;
//! assert_eq!(media.content_type.as_deref(), Some("text/plain"));
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod local;
mod remote;
mod store;

pub use config::MediaStoreConfig;
pub use error::{MediaStoreError, Result};
pub use local::{escape_capitals, unescape_capitals, LocalSimulator};
pub use remote::RemoteObjectStore;
pub use store::{MediaBackend, MediaObject, MediaStore, Metadata, SaveOptions};
