// Scrape-triggered collector
pub mod collector;

pub use collector::PowerCollector;
