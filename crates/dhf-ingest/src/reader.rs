//! Reading check-definition CSV files into [`CheckRecord`]s.

use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::debug;

use dhf_model::CheckRecord;

use crate::error::{IngestError, Result};

fn normalize_header(raw: &str) -> String {
    raw.trim_matches('\u{feff}').trim().to_string()
}

/// Read every data row of `path`, keyed by the header row.
///
/// Short rows leave their trailing columns absent; cells past the last header
/// are ignored. Cell values are kept as written.
pub fn read_check_records(path: &Path) -> Result<Vec<CheckRecord>> {
    let file = File::open(path).map_err(|source| IngestError::io(path, source))?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|source| IngestError::csv(path, source))?
        .iter()
        .map(normalize_header)
        .collect();

    let mut records = Vec::new();
    for (idx, row) in reader.records().enumerate() {
        let row = row.map_err(|source| IngestError::csv(path, source))?;
        // Header occupies line 1; fall back to the row index when the reader
        // has no position.
        let line = row
            .position()
            .map_or(idx as u64 + 2, csv::Position::line);
        records.push(to_record(&headers, &row, line));
    }

    debug!(
        path = %path.display(),
        columns = headers.len(),
        records = records.len(),
        "loaded check records"
    );
    Ok(records)
}

fn to_record(headers: &[String], row: &StringRecord, line: u64) -> CheckRecord {
    let fields: BTreeMap<String, String> = headers
        .iter()
        .zip(row.iter())
        .map(|(header, value)| (header.clone(), value.to_string()))
        .collect();
    CheckRecord::new(line, fields)
}
