use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use chrono::SecondsFormat;
use serde::Serialize;

use crate::ServiceState;

/// Server protocol version reported by `/status`
pub const SERVER_VERSION: [u8; 3] = [1, 0, 0];

#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub version: [u8; 3],
    pub started: String,
}

#[tracing::instrument(skip_all)]
pub async fn handler(State(state): State<ServiceState>) -> impl IntoResponse {
    Json(StatusResponse {
        version: SERVER_VERSION,
        started: state
            .started()
            .to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use media_store::{MediaStore, RemoteObjectStore};

    use super::*;

    #[tokio::test]
    async fn test_handler_direct() {
        let state = ServiceState::new(MediaStore::new(RemoteObjectStore::memory("b")));
        let response = handler(State(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
