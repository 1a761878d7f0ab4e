//! Keebuilder Web Server Binary
//!
//! This binary starts the keebuilder web server that provides a REST API
//! for the parts catalog and compatibility checks.
//!
//! # Usage
//!
//! ```bash
//! # Start with the configured host and port (127.0.0.1:3002 by default)
//! keebuilder-web
//!
//! # Override port and catalog
//! keebuilder-web --port 8080 --catalog ./my-parts.json
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use keebuilder::config::Config;
use keebuilder::web;

/// Keebuilder Web Server - REST API for the build configurator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on (defaults to the configured port)
    #[arg(short, long)]
    port: Option<u16>,

    /// Host to bind to (defaults to the configured host)
    #[arg(long)]
    host: Option<String>,

    /// Parts catalog JSON file (defaults to the configured or built-in catalog)
    #[arg(short, long, value_name = "FILE")]
    catalog: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = Config::load().context("Failed to load configuration")?;

    // Command line flags win over the config file
    if let Some(path) = args.catalog {
        config.catalog.path = Some(path);
    }
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    match &config.catalog.path {
        Some(path) => info!("Catalog: {}", path.display()),
        None => info!("Catalog: built-in"),
    }

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    web::run_server(config, addr).await
}
