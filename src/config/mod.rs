//! Configuration module for the exporter.
//!
//! Configuration is read once at startup from environment variables (seeded
//! from a `.env` file when present) and then handed to the collector as an
//! immutable value.

mod server_config;
mod source_config;

pub use server_config::{DEFAULT_LISTEN_ADDRESS, LISTEN_ADDRESS_VAR, ServerConfig};
pub use source_config::{FETCH_TIMEOUT_VAR, MAPPINGS_VAR, SourceConfig, URL_VAR};

use anyhow::{Context, Result};
use std::env;

/// Main exporter configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub source: SourceConfig,
    pub server: ServerConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(&|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> Result<Self> {
        let source = SourceConfig::from_lookup(lookup).context("Failed to load source config")?;
        let server = ServerConfig::from_lookup(lookup).context("Failed to load server config")?;

        Ok(Self { source, server })
    }
}
