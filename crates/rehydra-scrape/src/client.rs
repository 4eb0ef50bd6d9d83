//! Polite HTTP page fetching.

use std::time::Duration;

use backon::{ExponentialBuilder, Retryable};
use tracing::warn;
use url::Url;

use crate::error::{Error, Result};

/// HTTP client for fetching thread pages.
///
/// Every request carries the caller-supplied User-Agent and request
/// timeout. Transient failures (timeouts, connect errors, 5xx) are
/// retried with exponential backoff before being reported.
pub struct PageClient {
    http: reqwest::Client,
}

impl PageClient {
    /// Creates a client with the given User-Agent and per-request timeout.
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self { http })
    }

    /// Fetches a page and returns its body as text.
    ///
    /// Retries up to three attempts on retryable errors; the final error
    /// is returned unchanged.
    pub async fn fetch_page(&self, url: &Url) -> Result<String> {
        (|| self.fetch_once(url))
            .retry(ExponentialBuilder::default().with_max_times(2))
            .when(Error::is_retryable)
            .notify(|err: &Error, after: Duration| {
                warn!(%err, after_ms = after.as_millis() as u64, "retrying page fetch");
            })
            .await
    }

    async fn fetch_once(&self, url: &Url) -> Result<String> {
        let response = self.http.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response.text().await?)
    }
}
