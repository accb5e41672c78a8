//! Error types for the headline scraper.
//!
//! Two layers of errors exist:
//! - [`AttemptError`]: a single failed HTTP attempt. These are recovered by the
//!   retry loop in [`crate::fetcher`] and only ever surface as text inside
//!   [`crate::models::FetchOutcome::Exhausted`].
//! - [`ScrapeError`]: everything else, from configuration problems to a body the
//!   extractor cannot use.

use reqwest::StatusCode;
use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// A single failed fetch attempt.
#[derive(Debug, Error)]
pub enum AttemptError {
    /// Timeout, refused connection, DNS failure and the like.
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The server answered with anything other than `200 OK`.
    #[error("unexpected HTTP status {0}")]
    Status(StatusCode),

    /// The status was fine but the body could not be read as text.
    #[error("failed to read response body: {0}")]
    Body(#[source] reqwest::Error),
}

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// A configuration value is missing or out of range.
    #[error("invalid configuration value `{key}`: {message}")]
    Config {
        /// The configuration key at fault (e.g. "max_retries")
        key: String,
        /// What is wrong with it
        message: String,
    },

    /// The headline selector could not be parsed as CSS.
    #[error("invalid headline selector `{selector}`: {reason}")]
    InvalidSelector { selector: String, reason: String },

    /// A configured URL failed to parse.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// The page was fetched but cannot be used as a headline listing.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ScrapeError {
    /// Shorthand for a [`ScrapeError::Config`] tied to a specific key.
    pub fn config(key: &str, message: impl Into<String>) -> Self {
        ScrapeError::Config {
            key: key.to_string(),
            message: message.into(),
        }
    }
}
