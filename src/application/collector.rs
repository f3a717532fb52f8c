//! Scrape-triggered power collector.
//!
//! Every `/metrics` request runs one fetch → parse → extract → publish pass
//! against the breaker box. Passes never overlap: a second scrape waits for
//! the running one to finish.

use crate::domain::errors::ScrapeError;
use crate::domain::mappings::PowerMappings;
use crate::domain::ports::SnapshotSource;
use crate::domain::sample::{PowerSample, extract_sample};
use crate::domain::snapshot::Snapshot;
use crate::infrastructure::observability::{ExporterMetrics, ScrapeTimer};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

pub struct PowerCollector {
    source: Arc<dyn SnapshotSource>,
    mappings: Arc<PowerMappings>,
    metrics: ExporterMetrics,
    scrape_lock: Mutex<()>,
}

impl PowerCollector {
    pub fn new(
        source: Arc<dyn SnapshotSource>,
        mappings: Arc<PowerMappings>,
        metrics: ExporterMetrics,
    ) -> Self {
        Self {
            source,
            mappings,
            metrics,
            scrape_lock: Mutex::new(()),
        }
    }

    pub fn metrics(&self) -> &ExporterMetrics {
        &self.metrics
    }

    /// Run one scrape and publish its samples into the power gauge family.
    ///
    /// Returns the samples that were published; empty when the scrape aborted.
    pub async fn scrape(&self) -> Vec<PowerSample> {
        let _guard = self.scrape_lock.lock().await;
        self.scrape_locked().await
    }

    /// Run one scrape and render the whole registry while still holding the
    /// scrape lock, so the output reflects exactly this scrape's samples.
    pub async fn scrape_and_render(&self) -> anyhow::Result<String> {
        let _guard = self.scrape_lock.lock().await;
        self.scrape_locked().await;
        self.metrics.render()
    }

    async fn scrape_locked(&self) -> Vec<PowerSample> {
        let _timer = ScrapeTimer::start(self.metrics.scrape_duration_seconds.clone());
        self.metrics.clear_power();

        let samples = match self.collect_samples().await {
            Ok(samples) => samples,
            Err(e) => {
                warn!("Scrape aborted: {}", e);
                self.metrics.inc_scrape_error(e.reason());
                return Vec::new();
            }
        };

        for sample in &samples {
            self.metrics.set_power(sample);
        }
        debug!(
            "Published {}/{} power samples",
            samples.len(),
            self.mappings.len()
        );
        samples
    }

    async fn collect_samples(&self) -> Result<Vec<PowerSample>, ScrapeError> {
        let body = self.source.fetch().await?;
        let snapshot = Snapshot::parse(&body)?;
        let row = snapshot.data_row()?;

        Ok(self
            .mappings
            .iter()
            .filter_map(|(entity, column)| match extract_sample(entity, column, row) {
                Ok(sample) => Some(sample),
                Err(e) => {
                    warn!("Skipping entity '{}': {}", e.entity(), e);
                    self.metrics.inc_scrape_error(e.reason());
                    None
                }
            })
            .collect())
    }
}
