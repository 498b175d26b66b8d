//! Shared application state.

use deckpress_media::HttpFetcher;

/// State shared across requests: the only shared resource is the HTTP
/// client used for image retrieval, which is safe for concurrent use.
pub struct AppState {
    pub fetcher: HttpFetcher,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            fetcher: HttpFetcher::new(),
        }
    }
}
