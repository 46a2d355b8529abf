//! Read-only media routes.
//!
//! Normally an edge cache serves these straight from the bucket; the server
//! answers them for local development and debugging.

use axum::routing::get;
use axum::Router;

pub mod fetch;

use crate::ServiceState;

/// Keys served from the bucket root
pub const ROOT_FILES: [&str; 3] = ["/service.json", "/favicon.ico", "/index.html"];

pub fn routes(router: Router<ServiceState>) -> Router<ServiceState> {
    let router = ROOT_FILES.iter().fold(router, |router, file| {
        router.route(file, get(fetch::root_file_handler))
    });
    router.route("/personas/:pid/*path", get(fetch::persona_handler))
}
