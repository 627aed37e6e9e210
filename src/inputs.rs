//! Input table loading.
//!
//! The input is a CSV file with a header row that must name both `URL` and
//! `Title`. Other columns are allowed and ignored. A missing required column
//! is reported before any row is read, so a bad file never reaches the
//! network.
//!
//! Rows are never rejected: a row with fewer cells than the header reads the
//! missing cells as empty strings, and its request then fails on its own.

use crate::error::TableError;
use crate::models::InputRecord;
use csv::StringRecord;
use std::io;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument, warn};

/// Columns every input table must carry.
pub const REQUIRED_COLUMNS: [&str; 2] = ["URL", "Title"];

/// Read and validate the input CSV at `path`.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn read_records(path: &Path) -> Result<Vec<InputRecord>, TableError> {
    let raw = fs::read(path).await?;
    let records = read_records_from(raw.as_slice())?;
    info!(count = records.len(), "Loaded input records");
    Ok(records)
}

/// Read and validate input records from any CSV source.
pub fn read_records_from<R: io::Read>(source: R) -> Result<Vec<InputRecord>, TableError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(source);

    let headers = reader.headers()?;
    let column = |name: &str| headers.iter().position(|h| h == name);
    let (url_idx, title_idx) = match (column("URL"), column("Title")) {
        (Some(url), Some(title)) => (url, title),
        (url, title) => {
            let missing = REQUIRED_COLUMNS
                .into_iter()
                .zip([url, title])
                .filter_map(|(name, idx)| idx.is_none().then_some(name))
                .collect();
            return Err(TableError::MissingColumns(missing));
        }
    };

    let mut records = Vec::new();
    let mut row = StringRecord::new();
    while reader.read_record(&mut row)? {
        if row.len() <= url_idx.max(title_idx) {
            warn!(
                line = row.position().map(|p| p.line()),
                cells = row.len(),
                "Short row; missing cells read as empty"
            );
        }
        records.push(InputRecord {
            url: row.get(url_idx).unwrap_or("").to_string(),
            title: row.get(title_idx).unwrap_or("").to_string(),
        });
    }
    Ok(records)
}
