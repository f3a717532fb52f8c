//! HTTP client for the Panasonic breaker box CSV endpoint.

use crate::domain::errors::ScrapeError;
use crate::domain::ports::SnapshotSource;
use crate::infrastructure::core::HttpClientFactory;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::debug;
use url::Url;

pub struct BreakerBoxClient {
    client: Client,
    url: Url,
}

impl BreakerBoxClient {
    pub fn new(url: Url, timeout: Option<Duration>) -> reqwest::Result<Self> {
        Ok(Self {
            client: HttpClientFactory::create_client(timeout)?,
            url,
        })
    }
}

#[async_trait]
impl SnapshotSource for BreakerBoxClient {
    async fn fetch(&self) -> Result<Vec<u8>, ScrapeError> {
        debug!("Fetching breaker box snapshot from {}", self.url);

        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|e| ScrapeError::Fetch {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ScrapeError::Status {
                status: status.to_string(),
            });
        }

        let body = response.bytes().await.map_err(|e| ScrapeError::Fetch {
            reason: e.to_string(),
        })?;

        debug!("Received {} bytes from breaker box", body.len());
        Ok(body.to_vec())
    }
}
