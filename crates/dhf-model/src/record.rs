#![deny(unsafe_code)]

use std::collections::BTreeMap;

use crate::error::{ModelError, Result};

/// One input row: header name to cell value.
///
/// Cells missing from a short row are absent from the map, so the two access
/// paths differ: [`CheckRecord::required`] fails, [`CheckRecord::optional`]
/// yields an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckRecord {
    line: u64,
    fields: BTreeMap<String, String>,
}

impl CheckRecord {
    pub fn new(line: u64, fields: BTreeMap<String, String>) -> Self {
        Self { line, fields }
    }

    /// Build a record from `(column, value)` pairs. Mostly useful in tests.
    pub fn from_pairs<K, V>(line: u64, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let fields = pairs
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self { line, fields }
    }

    /// Source line of the row (1-based, header is line 1).
    pub fn line(&self) -> u64 {
        self.line
    }

    pub fn required(&self, column: &str) -> Result<&str> {
        self.fields
            .get(column)
            .map(String::as_str)
            .ok_or_else(|| ModelError::MissingColumn {
                column: column.to_string(),
                line: self.line,
            })
    }

    pub fn optional(&self, column: &str) -> &str {
        self.fields.get(column).map(String::as_str).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
