//! Command-line interface definitions.
//!
//! Every scraper setting can come from a flag, an environment variable or the
//! YAML file given with `--config`. Flags win over the file, the file wins over
//! the built-in defaults.

use crate::config::PartialConfig;
use crate::outputs::OutputFormat;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments.
///
/// # Examples
///
/// ```sh
/// # Scrape Yahoo Finance news into data/yahoo_news.csv
/// finance_headlines
///
/// # Five attempts, JSON output
/// finance_headlines --max-retries 5 --format json --output out/news.json
///
/// # Settings from a file
/// finance_headlines --config headlines.yaml
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Page to scrape [default: https://finance.yahoo.com/news/]
    #[arg(short, long, env = "HEADLINES_URL")]
    pub url: Option<String>,

    /// Maximum number of fetch attempts [default: 3]
    #[arg(short = 'r', long, env = "HEADLINES_MAX_RETRIES", value_parser = clap::value_parser!(u32).range(1..))]
    pub max_retries: Option<u32>,

    /// Where to write the scraped headlines
    #[arg(short, long, env = "HEADLINES_OUTPUT", default_value = "data/yahoo_news.csv")]
    pub output: PathBuf,

    /// Output file format
    #[arg(short, long, value_enum, env = "HEADLINES_FORMAT", default_value_t = OutputFormat::Csv)]
    pub format: OutputFormat,

    /// Optional path to a YAML config file
    #[arg(short, long, env = "HEADLINES_CONFIG")]
    pub config: Option<PathBuf>,

    /// Origin used to resolve relative headline links [default: https://finance.yahoo.com]
    #[arg(long, env = "HEADLINES_BASE_URL")]
    pub base_url: Option<String>,

    /// CSS selector matching one headline container [default: "li.js-stream-content h3"]
    #[arg(long, env = "HEADLINES_SELECTOR")]
    pub selector: Option<String>,

    /// User-Agent header sent with every request [default: Mozilla/5.0]
    #[arg(long, env = "HEADLINES_USER_AGENT")]
    pub user_agent: Option<String>,

    /// Per-request timeout in seconds [default: 10]
    #[arg(long, env = "HEADLINES_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Number of headlines to preview on stdout, 0 to disable
    #[arg(long, env = "HEADLINES_PREVIEW_ROWS", default_value_t = 5)]
    pub preview_rows: usize,
}

impl Cli {
    /// Scraper settings given on the command line, as overrides.
    pub fn overrides(&self) -> PartialConfig {
        PartialConfig {
            url: self.url.clone(),
            base_url: self.base_url.clone(),
            user_agent: self.user_agent.clone(),
            timeout_secs: self.timeout_secs,
            max_retries: self.max_retries,
            selector: self.selector.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScrapeConfig;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["finance_headlines"]);

        assert_eq!(cli.output, PathBuf::from("data/yahoo_news.csv"));
        assert_eq!(cli.format, OutputFormat::Csv);
        assert_eq!(cli.preview_rows, 5);
        assert_eq!(cli.overrides(), PartialConfig::default());
    }

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from([
            "finance_headlines",
            "--url",
            "https://finance.yahoo.com/topic/stock-market-news/",
            "--max-retries",
            "5",
            "--output",
            "/tmp/out/news.json",
            "--format",
            "json",
        ]);

        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.output, PathBuf::from("/tmp/out/news.json"));

        let mut config = ScrapeConfig::default();
        config.apply(cli.overrides());
        assert_eq!(
            config.target_url,
            "https://finance.yahoo.com/topic/stock-market-news/"
        );
        assert_eq!(config.max_retries, 5);
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from(["finance_headlines", "-u", "http://test", "-r", "2", "-o", "x.csv"]);

        assert_eq!(cli.url.as_deref(), Some("http://test"));
        assert_eq!(cli.max_retries, Some(2));
        assert_eq!(cli.output, PathBuf::from("x.csv"));
    }

    #[test]
    fn test_cli_has_no_retry_delay_flag() {
        let result = Cli::try_parse_from(["finance_headlines", "--retry-delay-secs", "0"]);
        assert!(result.is_err());

        let cli = Cli::parse_from(["finance_headlines", "--max-retries", "4"]);
        let mut config = ScrapeConfig::default();
        config.apply(cli.overrides());
        assert_eq!(config.retry_delay, std::time::Duration::from_secs(3));
    }

    #[test]
    fn test_cli_rejects_zero_retries() {
        let result = Cli::try_parse_from(["finance_headlines", "--max-retries", "0"]);
        assert!(result.is_err());
    }
}
