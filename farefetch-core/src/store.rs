//! Append-only CSV persistence for the flight dataset.
//!
//! The file is created with a header on first write; later runs append
//! data rows only. Concurrent writers are not guarded against.

use std::fs::OpenOptions;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{DataError, Result};
use crate::record::FlightRecord;

/// Append `records` to the CSV at `path`, creating parent directories and
/// the header when the file does not yet exist. Rows violating the dataset
/// invariant are skipped. Returns the number of rows written.
pub fn append_records(path: &Path, records: &[FlightRecord]) -> Result<usize> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let write_header = !path.exists();
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(write_header)
        .from_writer(file);

    let mut written = 0usize;
    for record in records {
        if !record.is_valid() {
            debug!(airline = %record.airline, "skipping invalid row");
            continue;
        }
        writer.serialize(record)?;
        written += 1;
    }
    writer.flush()?;

    info!("appended {} rows to {}", written, path.display());
    Ok(written)
}

/// Load every price-valid row from the CSV at `path`.
///
/// A missing file maps to [`DataError::Load`]; a file that yields zero
/// usable rows maps to [`DataError::EmptyDataset`]. Individual rows that
/// fail to parse are dropped, not fatal.
pub fn load_records(path: &Path) -> Result<Vec<FlightRecord>> {
    if !path.exists() {
        return Err(DataError::Load(path.display().to_string()));
    }

    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();
    for row in reader.deserialize::<FlightRecord>() {
        match row {
            Ok(record) if record.price.is_finite() && record.price >= 0.0 => {
                records.push(record);
            }
            Ok(record) => {
                debug!(airline = %record.airline, "dropping row with invalid price");
            }
            Err(err) => {
                debug!("dropping unparsable row: {}", err);
            }
        }
    }

    if records.is_empty() {
        return Err(DataError::EmptyDataset(path.display().to_string()));
    }
    Ok(records)
}
