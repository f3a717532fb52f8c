use crate::domain::errors::ScrapeError;
use async_trait::async_trait;

/// Where the collector gets a raw snapshot from on every scrape.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Fetch the current snapshot body. One attempt, no retry.
    async fn fetch(&self) -> Result<Vec<u8>, ScrapeError>;
}
