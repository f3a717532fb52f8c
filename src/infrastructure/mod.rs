pub mod breaker_box;
pub mod core;
pub mod mock;
pub mod observability;

pub use breaker_box::BreakerBoxClient;
