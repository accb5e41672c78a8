//! # Finance Headlines
//!
//! Scrapes the latest headlines from the Yahoo Finance news page and saves them
//! as a `title,link` table.
//!
//! ## Usage
//!
//! ```sh
//! finance_headlines --max-retries 5 --output data/yahoo_news.csv
//! ```
//!
//! ## Architecture
//!
//! The run is a single linear pipeline:
//! 1. **Fetching**: download the listing page, retrying a bounded number of
//!    times with a fixed pause
//! 2. **Extracting**: pick headline containers out of the HTML and resolve
//!    their links to absolute URLs
//! 3. **Output**: write CSV (or JSON) and preview the first rows on stdout

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod error;
mod extractor;
mod fetcher;
mod models;
mod outputs;
mod pipeline;
mod utils;

use cli::Cli;
use config::{ScrapeConfig, load_partial};
use models::PipelineOutcome;
use outputs::display::{ConsolePreview, HeadlineDisplay};
use pipeline::Pipeline;

#[tokio::main(flavor = "current_thread")]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    // ---- Layer configuration: defaults < YAML < CLI ----
    let mut scrape_config = ScrapeConfig::default();
    if let Some(path) = &args.config {
        match load_partial(path).await {
            Ok(partial) => scrape_config.apply(partial),
            Err(e) => {
                error!(path = %path.display(), error = %e, "Failed to load config file");
                return Err(e.into());
            }
        }
    }
    scrape_config.apply(args.overrides());
    info!(
        url = %scrape_config.target_url,
        max_retries = scrape_config.max_retries,
        selector = %scrape_config.headline_selector,
        "Starting headline scrape"
    );

    // ---- Fetch and extract ----
    let pipeline = Pipeline::from_config(&scrape_config)?;
    let records = match pipeline.run().await {
        PipelineOutcome::Done(records) => records,
        PipelineOutcome::Exhausted { attempts, errors } => {
            error!(attempts, url = %scrape_config.target_url, "Site unreachable; nothing written");
            let last = errors.last().cloned().unwrap_or_default();
            return Err(format!(
                "failed to fetch {} after {attempts} attempt(s): {last}",
                scrape_config.target_url
            )
            .into());
        }
        PipelineOutcome::ExtractFailed(e) => {
            error!(error = %e, "Site returned an unusable page; nothing written");
            return Err(e.into());
        }
    };

    // ---- Output ----
    if let Err(e) = outputs::write_headlines(&records, &args.output, args.format).await {
        error!(path = %args.output.display(), error = %e, "Failed to write headlines");
        return Err(e.into());
    }
    info!(path = %args.output.display(), count = records.len(), "Saved headlines");

    if args.preview_rows > 0 {
        let display = ConsolePreview {
            rows: args.preview_rows,
        };
        if let Err(e) = display.show("Yahoo Finance news", &records) {
            warn!(error = %e, "Preview failed; output file is unaffected");
        }
    }

    let elapsed = start_time.elapsed();
    info!(?elapsed, secs = elapsed.as_secs(), millis = elapsed.subsec_millis(), "Execution complete");

    Ok(())
}
