//! Breaker box CSV snapshot.
//!
//! The device serves a loosely structured CSV file: preamble rows of varying
//! width, a header row starting with [`HEADER_MARKER`], and the current
//! readings on the row right after it.

use crate::domain::errors::ScrapeError;
use csv::{ByteRecord, ReaderBuilder};

/// First field of the row that precedes the data row.
pub const HEADER_MARKER: &str = "YYYYMMDDhhmm";

/// Rows of a fetched snapshot. Row widths are not required to match.
///
/// Fields stay raw bytes: the device may send preamble text in a non-UTF-8
/// encoding, and only the data row fields are ever decoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    rows: Vec<ByteRecord>,
}

impl Snapshot {
    /// Decode a response body. Ragged rows are accepted, blank lines dropped.
    pub fn parse(body: &[u8]) -> Result<Self, ScrapeError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(body);

        let mut rows = Vec::new();
        for record in reader.byte_records() {
            let record = record.map_err(|e| ScrapeError::Parse {
                reason: e.to_string(),
            })?;
            if record.len() == 1 && record[0].is_empty() {
                continue;
            }
            rows.push(record);
        }

        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[ByteRecord] {
        &self.rows
    }

    /// Index of the first row whose first field is exactly [`HEADER_MARKER`].
    pub fn header_index(&self) -> Option<usize> {
        self.rows
            .iter()
            .position(|row| row.get(0) == Some(HEADER_MARKER.as_bytes()))
    }

    /// The row immediately following the header marker row.
    pub fn data_row(&self) -> Result<&ByteRecord, ScrapeError> {
        let header_index = self.header_index().ok_or(ScrapeError::HeaderMissing {
            marker: HEADER_MARKER,
        })?;

        self.rows
            .get(header_index + 1)
            .ok_or(ScrapeError::DataRowMissing { header_index })
    }
}
