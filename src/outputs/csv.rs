//! CSV output.
//!
//! One header row (`title,link`) followed by one row per record, in the order
//! the extractor produced them. Quoting and escaping follow RFC 4180 as
//! implemented by the `csv` crate.

use crate::error::{Result, ScrapeError};
use crate::models::HeadlineRecord;
use crate::utils::ensure_parent_dir;
use std::path::Path;
use tokio::fs;
use tracing::{error, info, instrument};

/// Serialize records to CSV bytes, header included.
pub fn to_csv(records: &[HeadlineRecord]) -> Result<Vec<u8>> {
    let mut writer = ::csv::Writer::from_writer(Vec::new());
    // serialize() only emits a header once a row exists
    if records.is_empty() {
        writer.write_record(["title", "link"])?;
    }
    for record in records {
        writer.serialize(record)?;
    }
    writer
        .into_inner()
        .map_err(|e| ScrapeError::Io(e.into_error()))
}

/// Write records as CSV to `path`, creating parent directories as needed.
#[instrument(level = "info", skip_all, fields(path = %path.display(), count = records.len()))]
pub async fn write_headlines(records: &[HeadlineRecord], path: &Path) -> Result<()> {
    let bytes = to_csv(records)?;

    if let Err(e) = ensure_parent_dir(path).await {
        error!(error = %e, "Failed to create output directory");
        return Err(e.into());
    }

    fs::write(path, bytes).await?;
    info!("Wrote CSV file");
    Ok(())
}
