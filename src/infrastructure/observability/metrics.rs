//! Prometheus metrics definitions for the exporter
//!
//! The power family uses the `panasonic_` namespace. Exporter self-metrics live
//! in the same registry, next to the process collector on Linux.

use crate::domain::sample::PowerSample;
use prometheus::{
    CounterVec, Encoder, GaugeVec, Histogram, HistogramOpts, Opts, Registry, TextEncoder,
};
use std::sync::Arc;

pub const NAMESPACE: &str = "panasonic";

/// Registry and handles for everything served on `/metrics`.
#[derive(Clone)]
pub struct ExporterMetrics {
    registry: Arc<Registry>,
    /// Current power consumption per entity
    pub power_watts: GaugeVec,
    /// Aborted scrapes and skipped mapping entries, by reason
    pub scrape_errors_total: CounterVec,
    /// Wall time of the fetch/parse/emit sequence
    pub scrape_duration_seconds: Histogram,
}

impl ExporterMetrics {
    /// Create the registry with all families registered
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let power_watts = GaugeVec::new(
            Opts::new("power_watts", "Current power consumption in Watts.").namespace(NAMESPACE),
            &["entity", "friendly_name"],
        )?;
        registry.register(Box::new(power_watts.clone()))?;

        let scrape_errors_total = CounterVec::new(
            Opts::new(
                "scrape_errors_total",
                "Breaker box scrape failures and skipped entities by reason.",
            )
            .namespace(NAMESPACE),
            &["reason"],
        )?;
        registry.register(Box::new(scrape_errors_total.clone()))?;

        let scrape_duration_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "scrape_duration_seconds",
                "Time spent fetching and parsing the breaker box snapshot.",
            )
            .namespace(NAMESPACE)
            .buckets(vec![0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
        )?;
        registry.register(Box::new(scrape_duration_seconds.clone()))?;

        #[cfg(target_os = "linux")]
        registry.register(Box::new(
            prometheus::process_collector::ProcessCollector::for_self(),
        ))?;

        Ok(Self {
            registry: Arc::new(registry),
            power_watts,
            scrape_errors_total,
            scrape_duration_seconds,
        })
    }

    /// Drop every power sample left over from the previous scrape
    pub fn clear_power(&self) {
        self.power_watts.reset();
    }

    pub fn set_power(&self, sample: &PowerSample) {
        self.power_watts
            .with_label_values(&[sample.entity.as_str(), sample.friendly_name.as_str()])
            .set(sample.watts);
    }

    pub fn inc_scrape_error(&self, reason: &str) {
        self.scrape_errors_total.with_label_values(&[reason]).inc();
    }

    /// Render all metrics in Prometheus text format
    pub fn render(&self) -> anyhow::Result<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }

    pub fn content_type(&self) -> String {
        TextEncoder::new().format_type().to_string()
    }
}
