//! apidrift-server - HTTP API for schema drift detection.
//!
//! Configuration comes from an optional TOML file; `--host` and `--port`
//! (or `APIDRIFT_HOST` / `APIDRIFT_PORT`, also read from `.env`) override it.

use std::path::PathBuf;

use anyhow::Context;
use apidrift_core::logging_facility::{init, Profile};
use apidrift_server::{HttpServer, HttpServerConfig};
use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "apidrift-server")]
#[command(about = "Serve the apidrift schema diff API", long_about = None)]
struct Args {
    /// TOML configuration file
    #[arg(long, env = "APIDRIFT_CONFIG")]
    config: Option<PathBuf>,

    /// IP address to bind to (hostnames are not resolved)
    #[arg(long, env = "APIDRIFT_HOST")]
    host: Option<String>,

    /// Port to bind to
    #[arg(long, env = "APIDRIFT_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    init(Profile::Production);

    let mut config = match &args.config {
        Some(path) => HttpServerConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => HttpServerConfig::default(),
    };
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }

    HttpServer::with_config(config)
        .start()
        .await
        .context("server error")?;

    Ok(())
}
