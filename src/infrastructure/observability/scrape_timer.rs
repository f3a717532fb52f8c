use prometheus::Histogram;
use std::time::{Duration, Instant};
use tracing::debug;

/// RAII guard that records one scrape's duration when dropped
pub struct ScrapeTimer {
    start: Instant,
    histogram: Histogram,
}

impl ScrapeTimer {
    pub fn start(histogram: Histogram) -> Self {
        Self {
            start: Instant::now(),
            histogram,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for ScrapeTimer {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        self.histogram.observe(elapsed.as_secs_f64());
        debug!("Scrape finished in {:?}", elapsed);
    }
}
