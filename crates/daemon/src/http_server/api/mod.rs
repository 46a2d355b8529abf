use axum::routing::{get, post};
use axum::Router;

pub mod personas;

use super::health;
use super::Config;
use crate::ServiceState;

/// Controller routes, mounted under the configured prefix.
///
/// Paths are spelled out with the prefix rather than nested, so that a root
/// mount shares `/personas/:pid/*path` with the read routes.
pub fn routes(config: &Config, router: Router<ServiceState>) -> Router<ServiceState> {
    router
        .route(&config.controller_path("/status"), get(health::status::handler))
        .route(
            &config.controller_path("/personas/:pid/*path"),
            post(personas::save::handler),
        )
}
