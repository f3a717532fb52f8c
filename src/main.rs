//! Panasonic Exporter - Prometheus exporter for Panasonic breaker box energy data
//!
//! Every scrape of `/metrics` fetches the breaker box CSV snapshot once and
//! republishes the configured circuits as `panasonic_power_watts` gauges.
//!
//! # Usage
//! ```sh
//! PANASONIC_URL=http://192.168.1.50/now.csv \
//! PANASONIC_MAPPINGS='{"main": 3, "kitchen_appliances": 7}' \
//! panasonic-exporter
//! ```
//!
//! # Environment Variables
//! - `PANASONIC_URL` - Breaker box CSV endpoint (required)
//! - `PANASONIC_MAPPINGS` - JSON object of entity name to column index (required)
//! - `PANASONIC_LISTEN_ADDRESS` - HTTP listen address (default: 0.0.0.0:9190)
//! - `PANASONIC_FETCH_TIMEOUT_SECS` - Upstream request timeout (default: none)
//! - `RUST_LOG` - Log filter (default: info)

use anyhow::{Context, Result};
use clap::Parser;
use panasonic_exporter::application::PowerCollector;
use panasonic_exporter::config::Config;
use panasonic_exporter::infrastructure::BreakerBoxClient;
use panasonic_exporter::infrastructure::observability::ExporterMetrics;
use panasonic_exporter::interfaces::http;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{Level, info, warn};
use tracing_subscriber::prelude::*;

#[derive(Parser, Debug)]
#[command(author, version, about = "Prometheus exporter for Panasonic breaker box energy data", long_about = None)]
struct Cli {
    /// Address to serve /metrics on (overrides PANASONIC_LISTEN_ADDRESS)
    #[arg(short, long)]
    listen_address: Option<SocketAddr>,

    /// Settings file to load before reading the environment
    #[arg(long)]
    env_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load environment variables
    let dotenv = match &cli.env_file {
        Some(path) => dotenvy::from_path(path).map(|_| path.clone()),
        None => dotenvy::dotenv(),
    };

    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .init();

    info!("Panasonic Exporter {} starting...", env!("CARGO_PKG_VERSION"));
    match dotenv {
        Ok(path) => info!("Loaded settings from {}", path.display()),
        Err(e) if cli.env_file.is_some() => {
            return Err(e).context("Failed to load the requested env file");
        }
        Err(_) => info!("No .env file found, relying on existing environment variables."),
    }

    let mut config = Config::from_env()?;
    if let Some(addr) = cli.listen_address {
        config.server.listen_address = addr;
    }
    info!(
        "Configuration loaded: URL={}, Entities={}",
        config.source.url,
        config.source.mappings.len()
    );
    if config.source.mappings.is_empty() {
        warn!("PANASONIC_MAPPINGS is empty; no power samples will be exported.");
    }

    let metrics = ExporterMetrics::new().context("Failed to create metrics registry")?;
    let source = BreakerBoxClient::new(config.source.url.clone(), config.source.fetch_timeout)
        .context("Failed to build breaker box HTTP client")?;
    let collector = PowerCollector::new(
        Arc::new(source),
        Arc::new(config.source.mappings.clone()),
        metrics,
    );

    http::serve(config.server.listen_address, http::router(Arc::new(collector))).await
}
