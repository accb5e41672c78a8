//! JSON output: a pretty-printed array of `{ "title", "link" }` objects.

use crate::error::Result;
use crate::models::HeadlineRecord;
use crate::utils::ensure_parent_dir;
use std::path::Path;
use tokio::fs;
use tracing::{error, info, instrument};

/// Write records as JSON to `path`, creating parent directories as needed.
#[instrument(level = "info", skip_all, fields(path = %path.display(), count = records.len()))]
pub async fn write_headlines(records: &[HeadlineRecord], path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;

    if let Err(e) = ensure_parent_dir(path).await {
        error!(error = %e, "Failed to create output directory");
        return Err(e.into());
    }

    fs::write(path, json).await?;
    info!("Wrote JSON file");
    Ok(())
}
