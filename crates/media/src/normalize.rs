//! Image normalization: decode whatever the server returned, re-encode
//! as 3-channel RGB PNG.

use std::io::Cursor;

use image::ImageFormat;

use crate::fetch::ImageFetcher;
use crate::ImageError;

/// An image re-encoded to the canonical embedding format.
#[derive(Debug, Clone)]
pub struct NormalizedImage {
    /// PNG-encoded RGB8 pixel data.
    pub bytes: Vec<u8>,
}

impl NormalizedImage {
    /// File extension matching [`NormalizedImage::bytes`].
    pub const EXTENSION: &'static str = "png";

    /// Content type of the encoded data.
    pub const CONTENT_TYPE: &'static str = "image/png";
}

/// Fetch `url` through `fetcher` and normalize the result.
///
/// Any fault — transport, status, decode, or encode — is reported as an
/// [`ImageError`] for the caller to recover from; nothing here aborts a
/// conversion.
pub fn fetch_and_normalize<F: ImageFetcher + ?Sized>(
    fetcher: &F,
    url: &str,
) -> Result<NormalizedImage, ImageError> {
    let raw = fetcher.fetch(url)?;
    normalize(&raw, url)
}

/// Decode `raw` and re-encode it as RGB8 PNG.
pub fn normalize(raw: &[u8], url: &str) -> Result<NormalizedImage, ImageError> {
    let decoded = image::load_from_memory(raw).map_err(|e| ImageError::Decode {
        url: url.to_string(),
        message: e.to_string(),
    })?;

    // Flatten alpha and palette variants into one fixed color model.
    let rgb = decoded.to_rgb8();

    let mut bytes = Vec::new();
    rgb.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| ImageError::Encode {
            url: url.to_string(),
            message: e.to_string(),
        })?;

    log::debug!(
        "Normalized image from {} ({} raw bytes -> {} png bytes)",
        url,
        raw.len(),
        bytes.len()
    );

    Ok(NormalizedImage { bytes })
}
