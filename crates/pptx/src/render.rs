//! Slide rendering: maps one slide's content model onto positioned
//! shapes. The first slide of a deck goes through [`render_title`],
//! every later slide through [`render_content`].

use deckpress_core::{ResolvedColors, SlideItem, SlideSpec};
use deckpress_media::{fetch_and_normalize, ImageFetcher};

use crate::model::{Align, Frame, Picture, RenderedSlide, TextBox};

/// Typeface applied to every run.
pub(crate) const FONT_NAME: &str = "Inter";

/// Title slide: large centered title, optional centered subtitle.
const TITLE_SLIDE_TITLE_PT: u32 = 54;
const TITLE_SLIDE_SUBTITLE_PT: u32 = 24;

/// Content slide: left-aligned header and a vertical flow of items.
const CONTENT_TITLE_PT: u32 = 38;
const CONTENT_SUBTITLE_PT: u32 = 20;
const TEXT_PT: u32 = 18;
const EQUATION_PT: u32 = 20;
const CAPTION_PT: u32 = 12;

/// Vertical cursor start, just below the subtitle region (inches).
const CONTENT_START_Y: f64 = 2.4;
/// Cursor advance per text or equation item.
const TEXT_ROW_STEP: f64 = 1.0;
/// Cursor advance per image item, taken regardless of fetch outcome.
const IMAGE_ROW_STEP: f64 = 3.2;

/// Render the deck's first slide. Items are ignored on this path.
pub(crate) fn render_title(
    title: &str,
    subtitle: Option<&str>,
    colors: &ResolvedColors,
) -> RenderedSlide {
    let mut slide = RenderedSlide::new(colors.primary);

    slide.push_text(TextBox {
        frame: Frame::inches(0.5, 2.3, 12.33, 1.5),
        text: title.to_string(),
        align: Align::Center,
        size_pt: TITLE_SLIDE_TITLE_PT,
        bold: true,
        color: colors.text,
        wrap: true,
    });

    // An empty subtitle string renders nothing, same as an absent one.
    if let Some(subtitle) = subtitle.filter(|s| !s.is_empty()) {
        slide.push_text(TextBox {
            frame: Frame::inches(0.5, 3.9, 12.33, 1.0),
            text: subtitle.to_string(),
            align: Align::Center,
            size_pt: TITLE_SLIDE_SUBTITLE_PT,
            bold: false,
            color: colors.text,
            wrap: false,
        });
    }

    slide
}

/// Render a content slide: title, optional subtitle, then the item flow.
///
/// The vertical cursor advances by a fixed step per item kind, never by
/// content length. A failed image fetch leaves no trace in the output
/// but still advances the cursor by the full image step.
pub(crate) fn render_content<F: ImageFetcher + ?Sized>(
    spec: &SlideSpec,
    colors: &ResolvedColors,
    fetcher: &F,
) -> RenderedSlide {
    let mut slide = RenderedSlide::new(colors.primary);

    slide.push_text(TextBox {
        frame: Frame::inches(0.6, 0.4, 12.2, 1.2),
        text: spec.title.clone(),
        align: Align::Left,
        size_pt: CONTENT_TITLE_PT,
        bold: true,
        color: colors.text,
        wrap: true,
    });

    if let Some(subtitle) = spec.subtitle.as_deref().filter(|s| !s.is_empty()) {
        slide.push_text(TextBox {
            frame: Frame::inches(0.9, 1.8, 11.0, 1.0),
            text: subtitle.to_string(),
            align: Align::Left,
            size_pt: CONTENT_SUBTITLE_PT,
            bold: false,
            color: colors.text,
            wrap: false,
        });
    }

    let mut y = CONTENT_START_Y;
    for item in &spec.items {
        match item {
            SlideItem::Text { content } | SlideItem::Equation { content } => {
                let Some(text) = non_empty(content.as_deref()) else {
                    continue;
                };
                let equation = matches!(item, SlideItem::Equation { .. });
                slide.push_text(TextBox {
                    frame: Frame::inches(0.9, y, 7.0, 1.2),
                    text: text.to_string(),
                    align: Align::Left,
                    size_pt: if equation { EQUATION_PT } else { TEXT_PT },
                    bold: equation,
                    color: colors.text,
                    wrap: true,
                });
                y += TEXT_ROW_STEP;
            }
            SlideItem::Image { image_url, caption } => {
                let Some(url) = non_empty(image_url.as_deref()) else {
                    continue;
                };
                match fetch_and_normalize(fetcher, url) {
                    Ok(image) => {
                        slide.push_picture(Picture {
                            frame: Frame::inches(8.2, y - 0.2, 4.5, 2.8),
                            image,
                        });
                        if let Some(caption) = non_empty(caption.as_deref()) {
                            slide.push_text(TextBox {
                                frame: Frame::inches(8.2, y + 2.7, 4.5, 0.6),
                                text: caption.to_string(),
                                align: Align::Left,
                                size_pt: CAPTION_PT,
                                bold: false,
                                color: colors.text,
                                wrap: false,
                            });
                        }
                    }
                    Err(e) => {
                        // Deliberate partial-failure policy: the item
                        // vanishes and the conversion continues.
                        log::debug!("Skipping image item: {}", e);
                    }
                }
                y += IMAGE_ROW_STEP;
            }
            // Extra titles and unrecognized types place nothing and do
            // not move the cursor.
            SlideItem::Title { .. } | SlideItem::Unknown => {}
        }
    }

    slide
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}
