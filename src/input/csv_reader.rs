//! CSV ingestion of raw job-posting rows

use crate::error::{CareerGapError, Result};
use crate::input::raw_record::{columns, RawRecord};
use log::{debug, warn};
use std::io::Read;
use std::path::Path;

/// Read every well-formed row of a CSV source.
///
/// Rows that fail to parse (wrong field count, invalid UTF-8) are skipped with a
/// warning rather than failing the whole load.
pub fn read_raw_records<R: Read>(source: R) -> Result<Vec<RawRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(source);

    let headers = reader.headers()?.clone();
    let missing: Vec<&str> = columns::REQUIRED
        .iter()
        .copied()
        .filter(|column| !headers.iter().any(|h| h.trim() == *column))
        .collect();
    if !missing.is_empty() {
        warn!("Dataset is missing columns: {}", missing.join(", "));
    }

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for (row, result) in reader.records().enumerate() {
        match result {
            Ok(record) => {
                let raw: RawRecord = headers
                    .iter()
                    .zip(record.iter())
                    .map(|(header, field)| (header.trim(), field))
                    .collect();
                records.push(raw);
            }
            Err(e) => {
                skipped += 1;
                warn!("Skipping malformed row {}: {}", row + 2, e);
            }
        }
    }

    debug!("Read {} rows, skipped {}", records.len(), skipped);
    Ok(records)
}

/// Read a CSV dataset from disk
pub fn read_raw_records_from_path(path: &Path) -> Result<Vec<RawRecord>> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase());

    if extension.as_deref() != Some("csv") {
        return Err(CareerGapError::InvalidInput(format!(
            "Dataset must be a .csv file: {}",
            path.display()
        )));
    }

    let file = std::fs::File::open(path)?;
    read_raw_records(file)
}
