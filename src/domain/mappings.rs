//! Circuit mapping table.
//!
//! Associates each exported entity (e.g. `main`, `kitchen_appliances`) with the
//! column of the breaker box data row that carries its reading.

use crate::domain::errors::MappingsError;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Immutable entity → column index table, loaded once at startup.
///
/// Keys are unique by construction. Column indices may repeat or be sparse.
/// Iteration is in key order so logs and exposition output are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct PowerMappings(BTreeMap<String, usize>);

impl PowerMappings {
    /// Parse a flat JSON object such as `{"main": 3, "kitchen": 7}`.
    ///
    /// Nested values, negative indices and non-integer values are rejected.
    pub fn from_json(json: &str) -> Result<Self, MappingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(entity, column)| (entity.as_str(), *column))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn column(&self, entity: &str) -> Option<usize> {
        self.0.get(entity).copied()
    }
}

impl<K: Into<String>> FromIterator<(K, usize)> for PowerMappings {
    fn from_iter<I: IntoIterator<Item = (K, usize)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
