//! Domain types describing a declarative slide deck.

use serde::{Deserialize, Serialize};

use crate::color::{resolve_color, Rgb};
use crate::error::Result;

/// Full specification of a deck to export, as received from the caller.
///
/// Arrives fully parsed and type-checked; the conversion itself only
/// verifies content-level constraints (non-empty slide list, well-formed
/// color tokens).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresentationSpec {
    /// Background color token (night blue by default).
    #[serde(default = "default_primary")]
    pub theme_primary: String,

    /// Accent color token, reserved for future layout use (gold by default).
    #[serde(default = "default_accent")]
    pub theme_accent: String,

    /// Foreground text color token.
    #[serde(default = "default_text")]
    pub theme_text: String,

    /// Slides in presentation order. Must be non-empty.
    pub slides: Vec<SlideSpec>,

    /// Suggested filename for the exported package.
    #[serde(default = "default_filename")]
    pub filename: String,
}

fn default_primary() -> String {
    "0b1220".to_string()
}

fn default_accent() -> String {
    "d4af37".to_string()
}

fn default_text() -> String {
    "ffffff".to_string()
}

fn default_filename() -> String {
    "presentation.pptx".to_string()
}

impl PresentationSpec {
    /// Resolve the three theme tokens into concrete colors.
    ///
    /// Called once per conversion, before any rendering work.
    pub fn resolve_colors(&self) -> Result<ResolvedColors> {
        Ok(ResolvedColors {
            primary: resolve_color(&self.theme_primary)?,
            accent: resolve_color(&self.theme_accent)?,
            text: resolve_color(&self.theme_text)?,
        })
    }
}

/// One slide of the deck.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlideSpec {
    /// Slide title. Required.
    pub title: String,

    /// Optional subtitle. An empty string renders nothing.
    #[serde(default)]
    pub subtitle: Option<String>,

    /// Content items in layout order. Ignored on the deck's first slide.
    #[serde(default)]
    pub items: Vec<SlideItem>,
}

/// A typed content item on a slide.
///
/// Items missing their required field are silently skipped during
/// rendering; an unrecognized `type` tag deserializes to [`Unknown`]
/// and contributes nothing.
///
/// [`Unknown`]: SlideItem::Unknown
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SlideItem {
    /// Extra title text. Accepted for compatibility, renders nothing.
    Title {
        #[serde(default)]
        content: Option<String>,
    },

    /// A plain text block.
    Text {
        #[serde(default)]
        content: Option<String>,
    },

    /// An equation, rendered bold and slightly larger than plain text.
    Equation {
        #[serde(default)]
        content: Option<String>,
    },

    /// A remote image with an optional caption.
    Image {
        #[serde(default)]
        image_url: Option<String>,
        #[serde(default)]
        caption: Option<String>,
    },

    /// Any unrecognized item type. A no-op.
    #[serde(other)]
    Unknown,
}

/// Theme colors resolved once per conversion and shared read-only by
/// every slide render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedColors {
    /// Slide background.
    pub primary: Rgb,
    /// Reserved; not placed by the current layout.
    pub accent: Rgb,
    /// Foreground text.
    pub text: Rgb,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_defaults_apply() {
        let spec: PresentationSpec =
            serde_json::from_str(r#"{"slides": [{"title": "Intro"}]}"#).unwrap();
        assert_eq!(spec.theme_primary, "0b1220");
        assert_eq!(spec.theme_accent, "d4af37");
        assert_eq!(spec.theme_text, "ffffff");
        assert_eq!(spec.filename, "presentation.pptx");
        assert_eq!(spec.slides.len(), 1);
        assert!(spec.slides[0].items.is_empty());
    }

    #[test]
    fn item_tags_deserialize() {
        let item: SlideItem =
            serde_json::from_str(r#"{"type": "equation", "content": "E = mc^2"}"#).unwrap();
        assert!(matches!(item, SlideItem::Equation { content: Some(c) } if c == "E = mc^2"));

        let item: SlideItem =
            serde_json::from_str(r#"{"type": "image", "image_url": "http://x/y.png"}"#).unwrap();
        assert!(matches!(item, SlideItem::Image { caption: None, .. }));
    }

    #[test]
    fn unrecognized_item_type_is_unknown() {
        let item: SlideItem = serde_json::from_str(r#"{"type": "video"}"#).unwrap();
        assert!(matches!(item, SlideItem::Unknown));
    }

    #[test]
    fn resolve_colors_uses_all_three_tokens() {
        let spec: PresentationSpec = serde_json::from_str(
            r##"{"theme_primary": "102030", "theme_text": "#ffffff", "slides": [{"title": "t"}]}"##,
        )
        .unwrap();
        let colors = spec.resolve_colors().unwrap();
        assert_eq!(colors.primary, Rgb::new(0x10, 0x20, 0x30));
        assert_eq!(colors.accent, Rgb::new(0xd4, 0xaf, 0x37));
        assert_eq!(colors.text, Rgb::new(0xff, 0xff, 0xff));
    }
}
