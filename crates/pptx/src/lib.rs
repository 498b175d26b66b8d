//! PPTX (OOXML) writer backend for deck export.
//!
//! Renders declarative slide specifications into DrawingML shapes and
//! serializes them as a ZIP package openable by standard readers.

mod model;
mod parts;
mod render;
mod xml;

pub mod package;

pub use package::assemble;
