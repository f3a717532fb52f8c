//! Pull-based observability for the exporter
//!
//! Everything is gathered into one registry and rendered on demand when
//! `/metrics` is scraped:
//!
//! 1. **Power family**: `panasonic_power_watts`, rebuilt on every scrape
//! 2. **Self-metrics**: scrape duration and failure counters
//! 3. **Process metrics**: CPU, memory and file descriptors (Linux only)

pub mod metrics;
pub mod scrape_timer;

pub use metrics::ExporterMetrics;
pub use scrape_timer::ScrapeTimer;
