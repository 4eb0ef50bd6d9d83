//! Error types for rehydra-scrape.

use thiserror::Error;

/// Result type alias for rehydra-scrape operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while crawling a thread.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Transport-level HTTP error (connect failure, timeout, bad body).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status.
    #[error("HTTP status {status} fetching {url}")]
    Status {
        /// Status code returned by the server
        status: u16,
        /// URL that was being fetched
        url: String,
    },

    /// Thread URL could not be parsed.
    #[error("Invalid thread URL '{url}': {source}")]
    InvalidUrl {
        /// The offending URL string
        url: String,
        /// Underlying parse error
        #[source]
        source: url::ParseError,
    },
}

impl Error {
    /// Returns whether this error is worth retrying.
    ///
    /// Timeouts, connect failures, and server-side (5xx) statuses are
    /// transient; client-side statuses and malformed URLs are permanent.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(e) => e.is_timeout() || e.is_connect(),
            Error::Status { status, .. } => *status >= 500,
            Error::InvalidUrl { .. } => false,
        }
    }
}
