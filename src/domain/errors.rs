use thiserror::Error;

/// Errors that abort a whole scrape. No power samples are emitted.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Error fetching data from breaker box: {reason}")]
    Fetch { reason: String },

    #[error("Received non-200 status code: {status}")]
    Status { status: String },

    #[error("Error parsing CSV data: {reason}")]
    Parse { reason: String },

    #[error("CSV header row ('{marker}') not found in the response")]
    HeaderMissing { marker: &'static str },

    #[error("Data row not found immediately after the header row (row {header_index})")]
    DataRowMissing { header_index: usize },
}

impl ScrapeError {
    /// Value of the `reason` label on the scrape error counter.
    pub fn reason(&self) -> &'static str {
        match self {
            ScrapeError::Fetch { .. } => "fetch",
            ScrapeError::Status { .. } => "status",
            ScrapeError::Parse { .. } => "parse",
            ScrapeError::HeaderMissing { .. } => "header_missing",
            ScrapeError::DataRowMissing { .. } => "data_row_missing",
        }
    }
}

/// Errors that skip a single mapping entry while the rest of the scrape continues.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("column index {column} for entity '{entity}' is out of bounds (row has {width} fields)")]
    ColumnOutOfBounds {
        entity: String,
        column: usize,
        width: usize,
    },

    #[error("could not parse hex value {field:?} for entity '{entity}': {reason}")]
    InvalidHex {
        entity: String,
        field: String,
        reason: String,
    },
}

impl ExtractionError {
    pub fn entity(&self) -> &str {
        match self {
            ExtractionError::ColumnOutOfBounds { entity, .. }
            | ExtractionError::InvalidHex { entity, .. } => entity,
        }
    }

    pub fn reason(&self) -> &'static str {
        match self {
            ExtractionError::ColumnOutOfBounds { .. } => "column_out_of_bounds",
            ExtractionError::InvalidHex { .. } => "invalid_hex",
        }
    }
}

/// Errors raised while loading the circuit mapping table.
#[derive(Debug, Error)]
pub enum MappingsError {
    #[error("expected a flat JSON object of entity name to non-negative column index: {0}")]
    Json(#[from] serde_json::Error),
}
