// Circuit mapping table
pub mod mappings;

// Port interfaces
pub mod ports;

// Power readings and their derivation rules
pub mod sample;

// Breaker box CSV snapshot
pub mod snapshot;

// Domain-specific error types
pub mod errors;
