//! HTTP listener configuration.

use anyhow::{Context, Result};
use std::net::SocketAddr;

pub const LISTEN_ADDRESS_VAR: &str = "PANASONIC_LISTEN_ADDRESS";
pub const DEFAULT_LISTEN_ADDRESS: &str = "0.0.0.0:9190";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub listen_address: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_address: SocketAddr::from(([0, 0, 0, 0], 9190)),
        }
    }
}

impl ServerConfig {
    pub fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> Result<Self> {
        let raw = lookup(LISTEN_ADDRESS_VAR).unwrap_or_else(|| DEFAULT_LISTEN_ADDRESS.to_string());
        let listen_address = raw
            .trim()
            .parse::<SocketAddr>()
            .with_context(|| format!("Invalid {}: {}", LISTEN_ADDRESS_VAR, raw))?;

        Ok(Self { listen_address })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_defaults() {
        let config = ServerConfig::from_lookup(&|_| None).unwrap();
        assert_eq!(config.listen_address.port(), 9190);
        assert_eq!(
            config.listen_address,
            ServerConfig::default().listen_address
        );
    }

    #[test]
    fn test_server_config_override() {
        let config =
            ServerConfig::from_lookup(&|_| Some("127.0.0.1:9300".to_string())).unwrap();
        assert_eq!(config.listen_address.to_string(), "127.0.0.1:9300");
    }

    #[test]
    fn test_server_config_rejects_bad_address() {
        assert!(ServerConfig::from_lookup(&|_| Some(":9190".to_string())).is_err());
    }
}
