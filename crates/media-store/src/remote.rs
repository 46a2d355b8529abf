//! Remote backend: S3 through `object_store`, or in-memory for tests.

use std::borrow::Cow;
use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use futures::{StreamExt, TryStreamExt};
use object_store::aws::AmazonS3Builder;
use object_store::memory::InMemory;
use object_store::path::Path as ObjectPath;
use object_store::{Attribute, Attributes, ObjectStore, PutOptions, PutPayload};

use crate::error::{MediaStoreError, Result};
use crate::store::{MediaBackend, MediaObject, Metadata, SaveOptions};

/// Media backend on top of any [`ObjectStore`].
///
/// Content type and metadata travel as object attributes, so S3 sees them as
/// `Content-Type` and `x-amz-meta-*`.
#[derive(Debug, Clone)]
pub struct RemoteObjectStore {
    bucket: String,
    inner: Arc<dyn ObjectStore>,
}

impl RemoteObjectStore {
    /// Wrap an existing object store client.
    pub fn new(bucket: impl Into<String>, inner: Arc<dyn ObjectStore>) -> Self {
        Self {
            bucket: bucket.into(),
            inner,
        }
    }

    /// In-memory store (for testing)
    pub fn memory(bucket: impl Into<String>) -> Self {
        Self::new(bucket, Arc::new(InMemory::new()))
    }

    /// Connect to an S3 bucket. Fails fast when the bucket does not exist.
    ///
    /// Credentials come from the standard `AWS_*` environment variables.
    pub async fn s3(bucket: &str, region: &str, endpoint: Option<&str>) -> Result<Self> {
        let mut builder = AmazonS3Builder::from_env()
            .with_bucket_name(bucket)
            .with_region(region);
        if let Some(endpoint) = endpoint {
            builder = builder
                .with_endpoint(endpoint)
                .with_allow_http(endpoint.starts_with("http://"));
        }

        let store: Arc<dyn ObjectStore> = Arc::new(
            builder
                .build()
                .map_err(|e| MediaStoreError::InvalidConfig(e.to_string()))?,
        );

        // an empty listing is enough to tell whether the bucket exists
        let mut stream = store.list(None);
        match stream.try_next().await {
            Ok(_) => {}
            Err(object_store::Error::NotFound { .. }) => {
                return Err(MediaStoreError::BucketNotFound(bucket.to_string()));
            }
            Err(e) => {
                let msg = e.to_string();
                if msg.contains("NoSuchBucket") {
                    return Err(MediaStoreError::BucketNotFound(bucket.to_string()));
                }
                return Err(e.into());
            }
        }
        drop(stream);

        tracing::info!(bucket, region, ?endpoint, "connected to S3 bucket");
        Ok(Self::new(bucket, store))
    }

    fn object_path(key: &str) -> Result<ObjectPath> {
        ObjectPath::parse(key.trim_start_matches('/'))
            .map_err(|_| MediaStoreError::InvalidKey(key.to_string()))
    }
}

fn put_attributes(options: SaveOptions) -> Attributes {
    let mut attributes = Attributes::new();
    if let Some(content_type) = options.content_type {
        attributes.insert(Attribute::ContentType, content_type.into());
    }
    for (name, value) in options.metadata.unwrap_or_default() {
        attributes.insert(Attribute::Metadata(Cow::Owned(name)), value.into());
    }
    attributes
}

#[async_trait]
impl MediaBackend for RemoteObjectStore {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn save(&self, key: &str, body: Bytes, options: SaveOptions) -> Result<()> {
        let path = Self::object_path(key)?;
        let opts = PutOptions {
            attributes: put_attributes(options),
            ..Default::default()
        };
        self.inner
            .put_opts(&path, PutPayload::from(body), opts)
            .await?;
        tracing::debug!(bucket = %self.bucket, key, "saved media");
        Ok(())
    }

    async fn fetch(&self, key: &str) -> Result<MediaObject> {
        let path = Self::object_path(key)?;
        let result = match self.inner.get(&path).await {
            Ok(result) => result,
            Err(object_store::Error::NotFound { .. }) => {
                return Err(MediaStoreError::NotFound(key.to_string()))
            }
            Err(e) => return Err(e.into()),
        };

        let attributes = result.attributes.clone();
        let body = result.bytes().await?;

        let mut content_type = None;
        let mut metadata = Metadata::new();
        for (attribute, value) in attributes.iter() {
            let value: &str = value.as_ref();
            match attribute {
                Attribute::ContentType => content_type = Some(value.to_string()),
                Attribute::Metadata(name) => {
                    metadata.insert(name.to_string(), value.to_string());
                }
                _ => {}
            }
        }

        Ok(MediaObject {
            body,
            metadata: (!metadata.is_empty()).then_some(metadata),
            content_type,
        })
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>> {
        let prefix = prefix.trim_matches('/');
        let prefix = if prefix.is_empty() {
            None
        } else {
            Some(Self::object_path(prefix)?)
        };

        let items: Vec<_> = self.inner.list(prefix.as_ref()).try_collect().await?;
        let mut keys: Vec<String> = items
            .into_iter()
            .map(|meta| meta.location.to_string())
            .collect();
        keys.sort();
        Ok(keys)
    }

    async fn delete(&self, keys: &BTreeSet<String>) -> Result<()> {
        let paths = keys
            .iter()
            .map(|key| Self::object_path(key))
            .collect::<Result<Vec<_>>>()?;

        let locations = futures::stream::iter(paths.into_iter().map(Ok)).boxed();
        let mut deleted = self.inner.delete_stream(locations);
        while let Some(result) = deleted.next().await {
            match result {
                Ok(_) | Err(object_store::Error::NotFound { .. }) => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}
