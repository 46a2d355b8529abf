use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, HeaderValue, StatusCode, Uri};
use axum::response::{IntoResponse, Response};

use media_store::{MediaObject, MediaStoreError};

use crate::http_server::handlers::error_response;
use crate::ServiceState;

/// Prefix S3 puts on user metadata response headers
const METADATA_HEADER_PREFIX: &str = "x-amz-meta-";

/// `GET /personas/:pid/*path`
pub async fn persona_handler(
    State(state): State<ServiceState>,
    Path((pid, path)): Path<(String, String)>,
) -> Result<Response, FetchError> {
    fetch(&state, &format!("personas/{pid}/{path}")).await
}

/// `GET /service.json`, `/favicon.ico`, `/index.html`: the same-named key.
pub async fn root_file_handler(
    State(state): State<ServiceState>,
    uri: Uri,
) -> Result<Response, FetchError> {
    fetch(&state, uri.path().trim_start_matches('/')).await
}

async fn fetch(state: &ServiceState, key: &str) -> Result<Response, FetchError> {
    tracing::debug!(%key, "fetching media");
    let media = state.media().fetch_media(key).await?;
    Ok(media_response(media))
}

/// Stored media as an HTTP response.
///
/// An empty body is 204. Otherwise the content type and every metadata entry,
/// as `x-amz-meta-<name>`, are echoed back.
pub fn media_response(media: MediaObject) -> Response {
    if media.body.is_empty() {
        return StatusCode::NO_CONTENT.into_response();
    }

    let mut response = Response::new(Body::from(media.body));
    let headers = response.headers_mut();

    let content_type = media
        .content_type
        .as_deref()
        .unwrap_or("application/octet-stream");
    match HeaderValue::from_str(content_type) {
        Ok(value) => {
            headers.insert(CONTENT_TYPE, value);
        }
        Err(_) => tracing::warn!(content_type, "stored content type is not a header value"),
    }

    for (name, value) in media.metadata.unwrap_or_default() {
        let header = format!("{METADATA_HEADER_PREFIX}{name}");
        match (
            HeaderName::from_bytes(header.as_bytes()),
            HeaderValue::from_str(&value),
        ) {
            (Ok(name), Ok(value)) => {
                headers.insert(name, value);
            }
            _ => tracing::warn!(%header, "skipping metadata that cannot be a header"),
        }
    }

    response
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("failed to fetch media: {0}")]
    MediaStore(#[from] MediaStoreError),
}

impl IntoResponse for FetchError {
    fn into_response(self) -> Response {
        match &self {
            FetchError::MediaStore(MediaStoreError::NotFound(_)) => {
                error_response(StatusCode::NOT_FOUND, "not_found", &self)
            }
            FetchError::MediaStore(MediaStoreError::InvalidKey(_)) => {
                error_response(StatusCode::BAD_REQUEST, "invalid_key", &self)
            }
            FetchError::MediaStore(e) => {
                tracing::error!("media store error: {}", e);
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "storage_error", &self)
            }
        }
    }
}
