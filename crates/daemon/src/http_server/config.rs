use std::net::SocketAddr;

use crate::service_config::normalize_prefix;

#[derive(Debug, Clone)]
pub struct Config {
    // Listen address
    pub listen_addr: SocketAddr,
    // Mount point of the controller routes: "" for the root, else "/segment..."
    pub controller_prefix: String,
    // log level for http tracing
    pub log_level: tracing::Level,
}

impl Config {
    pub fn new(listen_addr: SocketAddr, controller_prefix: &str) -> Self {
        let controller_prefix = normalize_prefix(controller_prefix);
        tracing::info!(
            "Creating HTTP server Config: listen_addr={}, controller_prefix={:?}",
            listen_addr,
            controller_prefix
        );
        Self {
            listen_addr,
            controller_prefix,
            log_level: tracing::Level::INFO,
        }
    }

    /// Route path for `route` under the controller prefix.
    pub fn controller_path(&self, route: &str) -> String {
        format!("{}{}", self.controller_prefix, route)
    }
}
