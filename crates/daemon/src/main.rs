//! Persona Server - certified media storage over HTTP
//!
//! Accepts EdSig authenticated and certified writes under `/personas/<pid>/`
//! and serves stored media back for debugging.

mod args;

use anyhow::Result;
use clap::Parser;

use args::Args;
use persona_daemon::spawn_service;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = args.into_config(dirs::home_dir())?;
    spawn_service(&config).await?;
    Ok(())
}
