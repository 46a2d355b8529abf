use chrono::{DateTime, Utc};
use media_store::{MediaStore, MediaStoreError};

use super::service_config::Config;

/// Main service state, shared by every request handler
#[derive(Debug, Clone)]
pub struct State {
    media: MediaStore,
    started: DateTime<Utc>,
}

impl State {
    pub async fn from_config(config: &Config) -> Result<Self, StateSetupError> {
        tracing::debug!("ServiceState::from_config - opening media store");
        let media = MediaStore::from_config(&config.bucket, config.media_store.clone()).await?;
        tracing::info!(bucket = %media.bucket(), "media store ready");
        Ok(Self::new(media))
    }

    /// State around an already opened store, started now.
    pub fn new(media: MediaStore) -> Self {
        Self {
            media,
            started: Utc::now(),
        }
    }

    pub fn media(&self) -> &MediaStore {
        &self.media
    }

    pub fn started(&self) -> DateTime<Utc> {
        self.started
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateSetupError {
    #[error("media store setup error: {0}")]
    MediaStore(#[from] MediaStoreError),
}
