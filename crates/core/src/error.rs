//! Error types for deck-to-PPTX conversion.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during a deck conversion.
///
/// Per-image fetch/decode faults are deliberately absent here: they are
/// recovered inside the slide renderer and never abort a conversion.
#[derive(Error, Debug)]
pub enum Error {
    /// A theme color token did not contain six hexadecimal digits.
    #[error("Invalid color format: {0:?}")]
    InvalidColorFormat(String),

    /// The specification contained no slides.
    #[error("No slides provided")]
    EmptySlideList,

    /// Serializing the finished package failed.
    #[error("Package write error: {0}")]
    PackageWrite(String),
}
