//! HTTP retrieval of remote images.

use std::time::Duration;

use crate::ImageError;

/// Bounded timeout applied to every image request.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Source of raw image bytes.
///
/// Abstracting the transport keeps the renderer and assembler testable
/// without a network: tests substitute a fake that serves bytes from
/// memory.
pub trait ImageFetcher {
    /// Retrieve the raw body behind `url`.
    ///
    /// One outbound call per invocation; no caching, no retry.
    fn fetch(&self, url: &str) -> Result<Vec<u8>, ImageError>;
}

/// [`ImageFetcher`] backed by a blocking HTTP client.
///
/// The inner client is shared and safe for concurrent use, so one
/// `HttpFetcher` can serve parallel conversions.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    /// Create a fetcher with the default 10 second timeout.
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_FETCH_TIMEOUT)
    }

    /// Create a fetcher with a custom per-request timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .expect("HTTP client construction only fails on TLS backend init");
        Self { client }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, ImageError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| ImageError::Transport {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ImageError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().map_err(|e| ImageError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        Ok(body.to_vec())
    }
}
