//! Data models shared by the fetcher, the extractor and the writers.
//!
//! - [`HeadlineRecord`]: one scraped headline with its resolved link
//! - [`Page`]: a successfully fetched response
//! - [`FetchOutcome`]: result of the retry loop, success or exhaustion
//! - [`PipelineOutcome`]: terminal state of a full scrape

use crate::error::ScrapeError;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

/// Placeholder stored in [`HeadlineRecord::link`] when no usable link exists.
pub const LINK_SENTINEL: &str = "N/A";

/// A single headline scraped from the listing page.
///
/// `link` is always either an absolute URL with both a scheme and a host, or
/// [`LINK_SENTINEL`]. It is never relative and never empty.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HeadlineRecord {
    /// Text content of the headline container, untrimmed.
    pub title: String,
    /// Absolute link or `"N/A"`.
    pub link: String,
}

impl HeadlineRecord {
    /// Build a record whose link could not be resolved.
    pub fn without_link(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: LINK_SENTINEL.to_string(),
        }
    }

    /// Whether this record carries a real link rather than the sentinel.
    pub fn has_link(&self) -> bool {
        self.link != LINK_SENTINEL
    }
}

/// A response that passed the success check (`200 OK`, readable body).
#[derive(Debug, Clone)]
pub struct Page {
    pub status: StatusCode,
    pub body: String,
}

/// Result of [`crate::fetcher::Fetcher::fetch`].
///
/// Exhaustion is a value, not an error: callers must match on it before
/// handing anything to the extractor.
#[derive(Debug)]
pub enum FetchOutcome {
    /// The page was fetched on attempt number `attempts`.
    Success { page: Page, attempts: u32 },
    /// Every attempt failed. `errors` holds one description per attempt.
    Exhausted { attempts: u32, errors: Vec<String> },
}

impl FetchOutcome {
    /// Number of attempts made, whatever the outcome.
    pub fn attempts(&self) -> u32 {
        match self {
            FetchOutcome::Success { attempts, .. } | FetchOutcome::Exhausted { attempts, .. } => {
                *attempts
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, FetchOutcome::Success { .. })
    }
}

/// Terminal state of [`crate::pipeline::Pipeline::run`].
#[derive(Debug)]
pub enum PipelineOutcome {
    /// Extraction finished. The list may be empty.
    Done(Vec<HeadlineRecord>),
    /// The site could not be reached within the retry budget.
    Exhausted { attempts: u32, errors: Vec<String> },
    /// The site answered but the body was unusable.
    ExtractFailed(ScrapeError),
}
