//! Core domain types, theme color resolution, and error taxonomy
//! for declarative PPTX deck export.

pub mod color;
pub mod error;
pub mod types;

pub use color::{resolve_color, Rgb};
pub use error::{Error, Result};
pub use types::{PresentationSpec, ResolvedColors, SlideItem, SlideSpec};
