use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Parser;

use media_store::MediaStoreConfig;
use persona_daemon::service_config::{
    env, DEFAULT_BUCKET, DEFAULT_CONTROLLER_PATH_PREFIX, DEFAULT_PORT, DEFAULT_S3_REGION,
};
use persona_daemon::ServiceConfig;

/// Persona Server - EdSig certified media storage
#[derive(Parser, Debug)]
#[command(name = "persona", author, version, about, long_about = None)]
pub struct Args {
    /// Port to listen on for HTTP requests
    #[arg(short, long, env = env::PORT, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Bucket that media is stored into
    #[arg(long, env = env::BUCKET, default_value = DEFAULT_BUCKET)]
    pub bucket: String,

    /// Path prefix the authenticated write routes are mounted under
    #[arg(long, env = env::CONTROLLER_PATH_PREFIX, default_value = DEFAULT_CONTROLLER_PATH_PREFIX)]
    pub controller_prefix: String,

    /// Simulate S3 under this directory (relative paths resolve against the home directory)
    #[arg(long, env = env::SIMULATOR_DIR)]
    pub simulator_dir: Option<PathBuf>,

    /// S3 region
    #[arg(long, env = env::S3_REGION, default_value = DEFAULT_S3_REGION)]
    pub region: String,

    /// Endpoint for S3-compatible services
    #[arg(long, env = env::S3_ENDPOINT)]
    pub endpoint: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, env = env::LOG_LEVEL, default_value = "info")]
    pub log_level: tracing::Level,

    /// Directory for log files (logs to stdout only if not set)
    #[arg(long, env = env::LOG_DIR)]
    pub log_dir: Option<PathBuf>,
}

impl Args {
    /// Resolve into a service config. `home` anchors a relative simulator directory.
    pub fn into_config(self, home: Option<PathBuf>) -> Result<ServiceConfig> {
        let media_store = match self.simulator_dir.filter(|dir| !dir.as_os_str().is_empty()) {
            Some(dir) if dir.is_absolute() => MediaStoreConfig::Local { root: dir },
            Some(dir) => {
                let home = home.ok_or_else(|| {
                    anyhow!("cannot resolve {}: no home directory", dir.display())
                })?;
                MediaStoreConfig::Local {
                    root: home.join(dir),
                }
            }
            None => MediaStoreConfig::S3 {
                region: self.region,
                endpoint: self.endpoint,
            },
        };

        Ok(ServiceConfig {
            listen_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), self.port),
            controller_prefix: self.controller_prefix,
            bucket: self.bucket,
            media_store,
            log_level: self.log_level,
            log_dir: self.log_dir,
        })
    }
}
