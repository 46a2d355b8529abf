use axum::extract::{OriginalUri, Path, State};
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use bytes::Bytes;

use common::edsig::{
    request_message, verify_content_signature, verify_request_signature, ContentRecord, EdSigError,
};
use media_store::{MediaStoreError, SaveOptions};

use crate::http_server::handlers::error_response;
use crate::ServiceState;

/// `POST <prefix>/personas/:pid/*path`
///
/// Request authentication covers the URL exactly as received, prefix and
/// query included. Certification covers `/personas/<pid>/<path>` so that it
/// stays valid wherever the controller is mounted.
pub async fn handler(
    State(state): State<ServiceState>,
    OriginalUri(uri): OriginalUri,
    Path((pid, path)): Path<(String, String)>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, SaveError> {
    let path_and_query = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());

    let message = request_message(method.as_str(), path_and_query, &headers, &body);
    let auth = verify_request_signature(&headers, &message)?.ok_or(SaveError::Unauthenticated)?;
    auth.ensure_principal(&pid)?;

    let content_path = format!("/personas/{pid}/{path}");
    let record = ContentRecord::snapshot(&content_path, &headers, &body);
    let cert = verify_content_signature(&headers, &record.to_message())?;
    cert.ensure_principal(&pid)?;

    let mut options = SaveOptions::default().with_metadata(record.metadata(&cert));
    if let Some(content_type) = &record.content_type {
        options = options.with_content_type(content_type);
    }

    let key = format!("personas/{pid}/{path}");
    tracing::info!(%key, size = body.len(), "saving certified media");
    state.media().save_media(&key, body, options).await?;

    Ok(Json(serde_json::json!({})))
}

#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("request requires EdSig authentication")]
    Unauthenticated,
    #[error(transparent)]
    EdSig(#[from] EdSigError),
    #[error("failed to save media: {0}")]
    MediaStore(#[from] MediaStoreError),
}

impl IntoResponse for SaveError {
    fn into_response(self) -> Response {
        match &self {
            SaveError::Unauthenticated => {
                error_response(StatusCode::UNAUTHORIZED, "missing_authentication", &self)
            }
            SaveError::EdSig(e @ EdSigError::PrincipalMismatch { .. }) => {
                error_response(StatusCode::FORBIDDEN, e.code(), e)
            }
            SaveError::EdSig(e) => error_response(StatusCode::UNAUTHORIZED, e.code(), e),
            SaveError::MediaStore(MediaStoreError::InvalidKey(_)) => {
                error_response(StatusCode::BAD_REQUEST, "invalid_key", &self)
            }
            SaveError::MediaStore(e) => {
                tracing::error!("media store error: {}", e);
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "storage_error", &self)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::prelude::SignatureRole;

    #[test]
    fn test_error_statuses() {
        let cases = [
            (SaveError::Unauthenticated, StatusCode::UNAUTHORIZED),
            (
                SaveError::EdSig(EdSigError::SignatureMismatch),
                StatusCode::UNAUTHORIZED,
            ),
            (
                SaveError::EdSig(EdSigError::PrincipalMismatch {
                    role: SignatureRole::Request,
                    owner: "abc".into(),
                }),
                StatusCode::FORBIDDEN,
            ),
            (
                SaveError::MediaStore(MediaStoreError::InvalidKey("a//b".into())),
                StatusCode::BAD_REQUEST,
            ),
            (
                SaveError::MediaStore(MediaStoreError::NotFound("k".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(error.into_response().status(), status);
        }
    }
}
