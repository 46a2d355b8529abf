use std::fmt::Display;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

mod not_found;

pub use not_found::not_found_handler;

/// JSON error body shared by every route: `{"msg": ..., "code": ...}`.
pub fn error_response(status: StatusCode, code: &str, msg: impl Display) -> Response {
    let body = serde_json::json!({ "msg": msg.to_string(), "code": code });
    (status, Json(body)).into_response()
}
