//! CSV output for summarized records.
//!
//! The table always starts with the `URL,Title,Summary` header, even when
//! there are no rows, and replaces any file already at the target path.

use crate::error::TableError;
use crate::models::OutputRecord;
use std::io;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Header row of the output table.
pub const OUTPUT_COLUMNS: [&str; 3] = ["URL", "Title", "Summary"];

/// Write `records` to `path`, overwriting any existing file.
#[instrument(level = "info", skip_all, fields(path = %path.display(), count = records.len()))]
pub async fn write_records(path: &Path, records: &[OutputRecord]) -> Result<(), TableError> {
    let mut buf = Vec::new();
    write_records_to(&mut buf, records)?;
    fs::write(path, buf).await?;
    info!("Wrote summary table");
    Ok(())
}

/// Write `records` as CSV to any sink.
pub fn write_records_to<W: io::Write>(sink: W, records: &[OutputRecord]) -> Result<(), TableError> {
    let mut writer = ::csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(sink);

    writer.write_record(OUTPUT_COLUMNS)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}
