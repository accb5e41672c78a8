//! Where scraped headlines go once the pipeline is done.
//!
//! # Submodules
//!
//! - [`csv`]: writes the records as a `title,link` CSV file (default)
//! - [`json`]: writes the records as a JSON array
//! - [`display`]: best-effort preview of the first rows for the operator
//!
//! Both file writers create missing parent directories.

pub mod csv;
pub mod display;
pub mod json;

use crate::error::Result;
use crate::models::HeadlineRecord;
use clap::ValueEnum;
use std::path::Path;

/// File format for [`write_headlines`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

/// Write `records` to `path` in the requested format.
pub async fn write_headlines(
    records: &[HeadlineRecord],
    path: &Path,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Csv => self::csv::write_headlines(records, path).await,
        OutputFormat::Json => self::json::write_headlines(records, path).await,
    }
}
