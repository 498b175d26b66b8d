//! Remote image retrieval and normalization for PPTX deck export.
//!
//! Every fetched image is decoded and re-encoded to 3-channel RGB PNG so
//! the embedding step downstream never needs format-specific logic. All
//! faults stay local to the image that caused them.

pub mod fetch;
pub mod normalize;

pub use fetch::{HttpFetcher, ImageFetcher, DEFAULT_FETCH_TIMEOUT};
pub use normalize::{fetch_and_normalize, NormalizedImage};

use thiserror::Error;

/// Per-image fault. Never fatal to a conversion: the renderer skips the
/// affected item and continues.
#[derive(Error, Debug)]
pub enum ImageError {
    /// The request did not complete (connect failure, timeout, ...).
    #[error("Transport error fetching {url}: {message}")]
    Transport { url: String, message: String },

    /// The server answered with a non-success status.
    #[error("Unexpected status {status} fetching {url}")]
    Status { url: String, status: u16 },

    /// The response body was not a decodable raster image.
    #[error("Failed to decode image from {url}: {message}")]
    Decode { url: String, message: String },

    /// Re-encoding the decoded image to PNG failed.
    #[error("Failed to encode image from {url}: {message}")]
    Encode { url: String, message: String },
}
