//! Internal model of a rendered slide: positioned shapes awaiting
//! serialization. Never exposed outside this crate.

use deckpress_core::Rgb;
use deckpress_media::NormalizedImage;

/// English Metric Units per inch, the native PPTX coordinate unit.
pub(crate) const EMU_PER_INCH: i64 = 914_400;

/// 16:9 slide canvas, 13.333 x 7.5 inches.
pub(crate) const SLIDE_WIDTH_EMU: i64 = 12_192_000;
pub(crate) const SLIDE_HEIGHT_EMU: i64 = 6_858_000;

/// Convert a length in inches to EMU.
pub(crate) fn emu(inches: f64) -> i64 {
    (inches * EMU_PER_INCH as f64).round() as i64
}

/// Bounding box of a shape, in EMU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Frame {
    pub x: i64,
    pub y: i64,
    pub cx: i64,
    pub cy: i64,
}

impl Frame {
    /// Build a frame from inch coordinates.
    pub(crate) fn inches(x: f64, y: f64, cx: f64, cy: f64) -> Self {
        Self {
            x: emu(x),
            y: emu(y),
            cx: emu(cx),
            cy: emu(cy),
        }
    }
}

/// Horizontal paragraph alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Align {
    Left,
    Center,
}

impl Align {
    pub(crate) fn as_attr(self) -> &'static str {
        match self {
            Align::Left => "l",
            Align::Center => "ctr",
        }
    }
}

/// A single-paragraph text shape.
#[derive(Debug, Clone)]
pub(crate) struct TextBox {
    pub frame: Frame,
    pub text: String,
    pub align: Align,
    /// Font size in points.
    pub size_pt: u32,
    pub bold: bool,
    pub color: Rgb,
    /// Whether the text wraps inside the frame (`wrap="square"`).
    pub wrap: bool,
}

/// An embedded, already-normalized picture.
#[derive(Debug, Clone)]
pub(crate) struct Picture {
    pub frame: Frame,
    pub image: NormalizedImage,
}

/// One visual element of a slide, in z-order.
#[derive(Debug, Clone)]
pub(crate) enum Shape {
    Text(TextBox),
    Picture(Picture),
}

/// A fully rendered slide, ready to be merged into the package.
#[derive(Debug, Clone)]
pub(crate) struct RenderedSlide {
    /// Solid background fill.
    pub background: Rgb,
    /// Shapes in placement order.
    pub shapes: Vec<Shape>,
}

impl RenderedSlide {
    pub(crate) fn new(background: Rgb) -> Self {
        Self {
            background,
            shapes: Vec::new(),
        }
    }

    pub(crate) fn push_text(&mut self, text_box: TextBox) {
        self.shapes.push(Shape::Text(text_box));
    }

    pub(crate) fn push_picture(&mut self, picture: Picture) {
        self.shapes.push(Shape::Picture(picture));
    }

    /// Pictures in placement order, as referenced by the slide's
    /// relationship part.
    pub(crate) fn pictures(&self) -> impl Iterator<Item = &Picture> {
        self.shapes.iter().filter_map(|s| match s {
            Shape::Picture(p) => Some(p),
            Shape::Text(_) => None,
        })
    }
}
