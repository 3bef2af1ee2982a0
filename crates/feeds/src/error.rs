//! Error types for fetching and parsing vendor pages.

use thiserror::Error;

/// Errors that can occur while reading one vendor page.
#[derive(Debug, Clone, Error)]
pub enum FeedError {
    #[error("Request failed: {0}")]
    Http(String),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("Price table not found: {0}")]
    TableNotFound(&'static str),

    #[error("Missing <{0}> in price table")]
    MissingSection(&'static str),

    #[error("Malformed price row: {0}")]
    MalformedRow(String),

    #[error("No product row found")]
    NoProductRow,
}

impl From<reqwest::Error> for FeedError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => FeedError::Status(status.as_u16()),
            None => FeedError::Http(err.to_string()),
        }
    }
}

impl FeedError {
    /// True for transport-level failures, false for page structure problems.
    pub fn is_fetch_error(&self) -> bool {
        matches!(self, FeedError::Http(_) | FeedError::Status(_))
    }
}
