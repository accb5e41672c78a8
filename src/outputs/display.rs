//! Operator-facing preview of scraped headlines.
//!
//! Showing results is a side channel: callers log a failed [`HeadlineDisplay::show`]
//! and carry on, the written file is what matters.

use crate::models::HeadlineRecord;
use crate::utils::truncate_for_log;
use std::fmt::Write as _;
use std::io::{self, Write};

/// Something that can present a batch of headlines to a human.
pub trait HeadlineDisplay {
    fn show(&self, name: &str, records: &[HeadlineRecord]) -> io::Result<()>;
}

/// Prints the first `rows` records to stdout as a numbered table.
#[derive(Debug, Clone, Copy)]
pub struct ConsolePreview {
    pub rows: usize,
}

impl HeadlineDisplay for ConsolePreview {
    fn show(&self, name: &str, records: &[HeadlineRecord]) -> io::Result<()> {
        let table = render_preview(name, records, self.rows);
        let mut stdout = io::stdout().lock();
        stdout.write_all(table.as_bytes())?;
        stdout.flush()
    }
}

/// Render the first `rows` records.
///
/// Titles are collapsed onto one line and shortened for the terminal; the
/// records themselves are not touched.
pub fn render_preview(name: &str, records: &[HeadlineRecord], rows: usize) -> String {
    let shown = records.len().min(rows);
    let mut out = String::new();
    let _ = writeln!(out, "{name} (showing {shown} of {})", records.len());

    for (i, record) in records.iter().take(rows).enumerate() {
        let title = record.title.split_whitespace().collect::<Vec<_>>().join(" ");
        let _ = writeln!(out, "{i:>4}  {}  {}", truncate_for_log(&title, 80), record.link);
    }
    out
}
