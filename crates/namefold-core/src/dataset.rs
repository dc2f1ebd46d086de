//! CSV play-log loading
//!
//! The log has no header row and five columns:
//! `user_id, game_name, action, hours, unknown`.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::{DatasetError, Result};
use crate::record::RawRecord;

/// `user_id, game_name, action, hours, unknown`
const COLUMNS: usize = 5;

/// Load every record of a CSV play log
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<RawRecord>> {
    let path = path.as_ref();
    let shown = path.display().to_string();

    if !path.exists() {
        tracing::error!(path = shown.as_str(), "Failed to load dataset: file not found");
        return Err(DatasetError::FileNotFound(shown).into());
    }

    let file = File::open(path).map_err(|e| {
        tracing::error!(path = shown.as_str(), error = %e, "Failed to load dataset");
        DatasetError::OpenFailed(e.to_string())
    })?;

    let records = read_records(BufReader::new(file)).inspect_err(|e| {
        tracing::error!(path = shown.as_str(), error = %e, "Failed to load dataset");
    })?;

    tracing::info!(
        path = shown.as_str(),
        records = records.len(),
        "Dataset loaded successfully"
    );
    Ok(records)
}

/// Read records from any CSV source
///
/// Every row must have exactly five fields; a shorter or longer row is an
/// `InvalidRecord` carrying its line number.
pub fn read_records<R: Read>(source: R) -> Result<Vec<RawRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(source);

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result.map_err(|e| DatasetError::InvalidRecord {
            line: e.position().map(|p| p.line()).unwrap_or(0),
            message: e.to_string(),
        })?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);

        if row.len() != COLUMNS {
            return Err(DatasetError::InvalidRecord {
                line,
                message: format!("expected {} fields, found {}", COLUMNS, row.len()),
            }
            .into());
        }

        let record: RawRecord = row
            .deserialize(None)
            .map_err(|e| DatasetError::InvalidRecord {
                line,
                message: e.to_string(),
            })?;
        records.push(record);
    }

    Ok(records)
}
