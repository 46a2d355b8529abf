//! Shared fixtures for the media store integration tests
#![allow(dead_code)]

use media_store::{LocalSimulator, MediaStore, Metadata, RemoteObjectStore};
use tempfile::TempDir;

pub const BUCKET: &str = "personas.bucket";

/// Both backends, the local one rooted in a fresh temp dir
pub async fn backends() -> (TempDir, Vec<(&'static str, MediaStore)>) {
    let temp_dir = TempDir::new().unwrap();
    let local = LocalSimulator::new(temp_dir.path(), BUCKET).await.unwrap();
    let stores = vec![
        ("remote", MediaStore::new(RemoteObjectStore::memory(BUCKET))),
        ("local", MediaStore::new(local)),
    ];
    (temp_dir, stores)
}

pub fn metadata(pairs: &[(&str, &str)]) -> Metadata {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
