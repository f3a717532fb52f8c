//! Breaker box source configuration.
//!
//! Both the device URL and the circuit mapping table are required. There are
//! no defaults: a missing value stops the exporter before it starts serving.

use crate::domain::mappings::PowerMappings;
use anyhow::{Context, Result, bail};
use std::time::Duration;
use url::Url;

pub const URL_VAR: &str = "PANASONIC_URL";
pub const MAPPINGS_VAR: &str = "PANASONIC_MAPPINGS";
pub const FETCH_TIMEOUT_VAR: &str = "PANASONIC_FETCH_TIMEOUT_SECS";

/// Where to fetch the snapshot from and which columns to export
#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub url: Url,
    pub mappings: PowerMappings,
    /// `None` keeps the HTTP client's default behaviour
    pub fetch_timeout: Option<Duration>,
}

impl SourceConfig {
    pub fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> Result<Self> {
        let url = required(lookup, URL_VAR)?;
        let mappings_json = required(lookup, MAPPINGS_VAR)?;

        let url = Url::parse(url.trim()).with_context(|| format!("Invalid {}: {}", URL_VAR, url))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!(
                "Invalid {}: scheme must be http or https, got '{}'",
                URL_VAR,
                url.scheme()
            );
        }

        let mappings = PowerMappings::from_json(&mappings_json)
            .with_context(|| format!("Could not parse {} JSON", MAPPINGS_VAR))?;

        let fetch_timeout = match lookup(FETCH_TIMEOUT_VAR) {
            Some(raw) => {
                let secs = raw
                    .trim()
                    .parse::<u64>()
                    .with_context(|| format!("Failed to parse {}", FETCH_TIMEOUT_VAR))?;
                if secs == 0 {
                    bail!("{} must be greater than zero", FETCH_TIMEOUT_VAR);
                }
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self {
            url,
            mappings,
            fetch_timeout,
        })
    }
}

fn required(lookup: &dyn Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => bail!(
            "{} and {} must be set in the .env file or environment ({} is missing)",
            URL_VAR,
            MAPPINGS_VAR,
            key
        ),
    }
}
