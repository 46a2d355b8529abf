use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use media_store::MediaStoreConfig;

/// Environment variables the binary reads its settings from.
pub mod env {
    pub const PORT: &str = "PORT";
    pub const BUCKET: &str = "PERSONAS_S3_BUCKET";
    pub const CONTROLLER_PATH_PREFIX: &str = "PERSONAS_CONTROLLER_PATH_PREFIX";
    pub const SIMULATOR_DIR: &str = "LOCAL_S3_SIMULATOR_DIR";
    pub const S3_REGION: &str = "PERSONAS_S3_REGION";
    pub const S3_ENDPOINT: &str = "PERSONAS_S3_ENDPOINT";
    pub const LOG_LEVEL: &str = "LOG_LEVEL";
    pub const LOG_DIR: &str = "LOG_DIR";
}

pub const DEFAULT_PORT: u16 = 3030;
pub const DEFAULT_BUCKET: &str = "personas.bucket";
pub const DEFAULT_CONTROLLER_PATH_PREFIX: &str = "/";
pub const DEFAULT_S3_REGION: &str = "us-west-2";

#[derive(Debug, Clone)]
pub struct Config {
    // http server configuration
    /// address for the HTTP server to listen on
    pub listen_addr: SocketAddr,
    /// mount point of the authenticated write routes, `/` for the root
    pub controller_prefix: String,

    // storage configuration
    /// bucket that media is stored into
    pub bucket: String,
    /// backend holding the bucket
    pub media_store: MediaStoreConfig,

    // logging
    pub log_level: tracing::Level,
    /// Directory for log files (optional, logs to stdout only if not set)
    pub log_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT),
            controller_prefix: DEFAULT_CONTROLLER_PATH_PREFIX.to_string(),
            bucket: DEFAULT_BUCKET.to_string(),
            media_store: MediaStoreConfig::Memory,
            log_level: tracing::Level::INFO,
            log_dir: None,
        }
    }
}

impl Config {
    /// Log the effective settings and whether each came from the environment.
    pub fn report(&self) {
        let source = |name: &str| match std::env::var_os(name) {
            Some(value) if !value.is_empty() => "environment",
            _ => "default or flag",
        };

        tracing::info!(port = self.listen_addr.port(), source = source(env::PORT), "listen port");
        tracing::info!(bucket = %self.bucket, source = source(env::BUCKET), "media bucket");
        tracing::info!(
            prefix = %self.controller_prefix,
            source = source(env::CONTROLLER_PATH_PREFIX),
            "controller path prefix"
        );
        match &self.media_store {
            MediaStoreConfig::Memory => tracing::warn!("using in-memory media store"),
            MediaStoreConfig::Local { root } => tracing::info!(
                root = %root.display(),
                source = source(env::SIMULATOR_DIR),
                "simulating S3 on the local filesystem"
            ),
            MediaStoreConfig::S3 { region, endpoint } => tracing::info!(
                %region,
                ?endpoint,
                source = source(env::S3_REGION),
                "using S3 media bucket"
            ),
        }
    }
}

/// Normalize a mount prefix to `""` (root) or `/segment[/segment...]`.
pub fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}
