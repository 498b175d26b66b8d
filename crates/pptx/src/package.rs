//! Document assembly: orchestrates slide rendering and serializes the
//! finished package.

use std::io::{Cursor, Seek, Write};

use deckpress_core::{Error, PresentationSpec, Result};
use deckpress_media::ImageFetcher;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::model::RenderedSlide;
use crate::render::{render_content, render_title};
use crate::{parts, xml};

/// Convert a full deck specification into PPTX package bytes.
///
/// Fails fast on input-shape errors (empty slide list, malformed color
/// token) before any rendering. Per-image faults are recovered inside
/// the renderer; only a failure to serialize the finished document
/// aborts the conversion, as [`Error::PackageWrite`].
pub fn assemble<F: ImageFetcher + ?Sized>(
    spec: &PresentationSpec,
    fetcher: &F,
) -> Result<Vec<u8>> {
    if spec.slides.is_empty() {
        return Err(Error::EmptySlideList);
    }
    let colors = spec.resolve_colors()?;

    let mut slides = Vec::with_capacity(spec.slides.len());

    // The deck's first slide always goes through the title path; its
    // items are ignored.
    let first = &spec.slides[0];
    slides.push(render_title(&first.title, first.subtitle.as_deref(), &colors));

    for slide_spec in &spec.slides[1..] {
        slides.push(render_content(slide_spec, &colors, fetcher));
    }

    log::info!(
        "Assembling package: {} slides, {} embedded images",
        slides.len(),
        slides.iter().map(|s| s.pictures().count()).sum::<usize>()
    );

    write_package(&slides)
}

/// Serialize rendered slides, in order, into one ZIP byte stream.
fn write_package(slides: &[RenderedSlide]) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    add_file(
        &mut zip,
        "[Content_Types].xml",
        &content_part(xml::content_types_xml(slides.len()))?,
    )?;
    add_file(&mut zip, "_rels/.rels", parts::ROOT_RELS.as_bytes())?;
    add_file(
        &mut zip,
        "ppt/presentation.xml",
        &content_part(xml::presentation_xml(slides.len()))?,
    )?;
    add_file(
        &mut zip,
        "ppt/_rels/presentation.xml.rels",
        &content_part(xml::presentation_rels_xml(slides.len()))?,
    )?;
    add_file(
        &mut zip,
        "ppt/slideMasters/slideMaster1.xml",
        parts::SLIDE_MASTER.as_bytes(),
    )?;
    add_file(
        &mut zip,
        "ppt/slideMasters/_rels/slideMaster1.xml.rels",
        parts::SLIDE_MASTER_RELS.as_bytes(),
    )?;
    add_file(
        &mut zip,
        "ppt/slideLayouts/slideLayout1.xml",
        parts::SLIDE_LAYOUT.as_bytes(),
    )?;
    add_file(
        &mut zip,
        "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
        parts::SLIDE_LAYOUT_RELS.as_bytes(),
    )?;
    add_file(&mut zip, "ppt/theme/theme1.xml", parts::THEME.as_bytes())?;

    // Media files are numbered globally across the package; slide
    // relationship ids restart at rId2 per slide.
    let mut image_no = 0usize;
    for (idx, slide) in slides.iter().enumerate() {
        let slide_no = idx + 1;
        let mut media_names = Vec::new();
        for picture in slide.pictures() {
            image_no += 1;
            let media_name = format!("image{image_no}.png");
            add_file(
                &mut zip,
                &format!("ppt/media/{media_name}"),
                &picture.image.bytes,
            )?;
            media_names.push(media_name);
        }
        add_file(
            &mut zip,
            &format!("ppt/slides/slide{slide_no}.xml"),
            &content_part(xml::slide_xml(slide))?,
        )?;
        add_file(
            &mut zip,
            &format!("ppt/slides/_rels/slide{slide_no}.xml.rels"),
            &content_part(xml::slide_rels_xml(&media_names))?,
        )?;
    }

    let cursor = zip.finish().map_err(package_err)?;
    Ok(cursor.into_inner())
}

fn add_file<W: Write + Seek>(zip: &mut ZipWriter<W>, name: &str, data: &[u8]) -> Result<()> {
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
    zip.start_file(name, options).map_err(package_err)?;
    zip.write_all(data).map_err(package_err)?;
    Ok(())
}

fn content_part(part: quick_xml::Result<Vec<u8>>) -> Result<Vec<u8>> {
    part.map_err(package_err)
}

fn package_err<E: std::fmt::Display>(err: E) -> Error {
    Error::PackageWrite(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use deckpress_core::{SlideItem, SlideSpec};
    use deckpress_media::ImageError;
    use std::io::Read;
    use zip::ZipArchive;

    /// Serves an in-memory PNG for any URL, or fails every request.
    struct FakeFetcher {
        healthy: bool,
    }

    impl ImageFetcher for FakeFetcher {
        fn fetch(&self, url: &str) -> std::result::Result<Vec<u8>, ImageError> {
            if !self.healthy {
                return Err(ImageError::Status {
                    url: url.to_string(),
                    status: 404,
                });
            }
            let img = image::RgbImage::from_pixel(3, 3, image::Rgb([200, 100, 50]));
            let mut bytes = Vec::new();
            image::DynamicImage::ImageRgb8(img)
                .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
                .unwrap();
            Ok(bytes)
        }
    }

    fn spec(slides: Vec<SlideSpec>) -> PresentationSpec {
        PresentationSpec {
            theme_primary: "0b1220".to_string(),
            theme_accent: "d4af37".to_string(),
            theme_text: "ffffff".to_string(),
            slides,
            filename: "deck.pptx".to_string(),
        }
    }

    fn slide(title: &str, items: Vec<SlideItem>) -> SlideSpec {
        SlideSpec {
            title: title.to_string(),
            subtitle: None,
            items,
        }
    }

    fn open(bytes: Vec<u8>) -> ZipArchive<Cursor<Vec<u8>>> {
        ZipArchive::new(Cursor::new(bytes)).expect("package must be a readable ZIP")
    }

    fn slide_entries(archive: &mut ZipArchive<Cursor<Vec<u8>>>) -> Vec<String> {
        let mut names: Vec<String> = archive
            .file_names()
            .filter(|n| n.starts_with("ppt/slides/slide") && n.ends_with(".xml"))
            .map(String::from)
            .collect();
        names.sort();
        names
    }

    fn read_entry(archive: &mut ZipArchive<Cursor<Vec<u8>>>, name: &str) -> String {
        let mut content = String::new();
        archive
            .by_name(name)
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        content
    }

    #[test]
    fn empty_slide_list_is_rejected() {
        let err = assemble(&spec(vec![]), &FakeFetcher { healthy: true }).unwrap_err();
        assert!(matches!(err, Error::EmptySlideList));
    }

    #[test]
    fn malformed_color_fails_before_rendering() {
        let mut bad = spec(vec![slide("Only", vec![])]);
        bad.theme_primary = "night-blue".to_string();
        let err = assemble(&bad, &FakeFetcher { healthy: true }).unwrap_err();
        assert!(matches!(err, Error::InvalidColorFormat(_)));
    }

    #[test]
    fn single_slide_deck_renders_one_title_slide() {
        let deck = spec(vec![slide(
            "Opening",
            // Items on the first slide are ignored by the title path.
            vec![SlideItem::Text {
                content: Some("never placed".to_string()),
            }],
        )]);
        let bytes = assemble(&deck, &FakeFetcher { healthy: true }).unwrap();

        let mut archive = open(bytes);
        assert_eq!(slide_entries(&mut archive), vec!["ppt/slides/slide1.xml"]);
        let xml = read_entry(&mut archive, "ppt/slides/slide1.xml");
        assert!(xml.contains("Opening"));
        assert!(!xml.contains("never placed"));
        assert!(xml.contains(r#"algn="ctr""#));
    }

    #[test]
    fn slide_count_matches_spec() {
        let deck = spec(vec![
            slide("One", vec![]),
            slide("Two", vec![]),
            slide("Three", vec![]),
        ]);
        let bytes = assemble(&deck, &FakeFetcher { healthy: true }).unwrap();
        let mut archive = open(bytes);
        assert_eq!(slide_entries(&mut archive).len(), 3);
    }

    #[test]
    fn failing_image_does_not_abort_conversion() {
        let deck = spec(vec![
            slide("Title", vec![]),
            slide(
                "Content",
                vec![
                    SlideItem::Image {
                        image_url: Some("http://dead.host/x.png".to_string()),
                        caption: Some("gone".to_string()),
                    },
                    SlideItem::Text {
                        content: Some("still here".to_string()),
                    },
                ],
            ),
        ]);
        let bytes = assemble(&deck, &FakeFetcher { healthy: false }).unwrap();

        let mut archive = open(bytes);
        assert_eq!(slide_entries(&mut archive).len(), 2);
        assert!(!archive.file_names().any(|n| n.starts_with("ppt/media/")));

        let xml = read_entry(&mut archive, "ppt/slides/slide2.xml");
        assert!(xml.contains("still here"));
        assert!(!xml.contains("p:pic"));
        assert!(!xml.contains("gone"));
    }

    #[test]
    fn fetched_images_are_embedded_and_referenced() {
        let deck = spec(vec![
            slide("Title", vec![]),
            slide(
                "Figures",
                vec![SlideItem::Image {
                    image_url: Some("http://host/fig.png".to_string()),
                    caption: None,
                }],
            ),
        ]);
        let bytes = assemble(&deck, &FakeFetcher { healthy: true }).unwrap();

        let mut archive = open(bytes);
        assert!(archive.file_names().any(|n| n == "ppt/media/image1.png"));

        let slide_xml = read_entry(&mut archive, "ppt/slides/slide2.xml");
        assert!(slide_xml.contains(r#"r:embed="rId2""#));

        let rels = read_entry(&mut archive, "ppt/slides/_rels/slide2.xml.rels");
        assert!(rels.contains("../media/image1.png"));
    }

    #[test]
    fn theme_change_only_alters_background_encoding() {
        let deck = spec(vec![
            slide("Same", vec![]),
            slide(
                "Layout",
                vec![SlideItem::Text {
                    content: Some("stable text".to_string()),
                }],
            ),
        ]);
        let mut recolored = deck.clone();
        recolored.theme_primary = "ff0000".to_string();

        let fetcher = FakeFetcher { healthy: true };
        let mut a = open(assemble(&deck, &fetcher).unwrap());
        let mut b = open(assemble(&recolored, &fetcher).unwrap());

        assert_eq!(slide_entries(&mut a), slide_entries(&mut b));

        let xml_a = read_entry(&mut a, "ppt/slides/slide2.xml");
        let xml_b = read_entry(&mut b, "ppt/slides/slide2.xml");
        assert!(xml_a.contains(r#"<a:srgbClr val="0B1220"/>"#));
        assert!(xml_b.contains(r#"<a:srgbClr val="FF0000"/>"#));
        assert_eq!(
            xml_a.replace("0B1220", ""),
            xml_b.replace("FF0000", ""),
        );
    }

    #[test]
    fn package_has_required_ooxml_scaffolding() {
        let bytes = assemble(&spec(vec![slide("S", vec![])]), &FakeFetcher { healthy: true })
            .unwrap();
        let mut archive = open(bytes);
        for part in [
            "[Content_Types].xml",
            "_rels/.rels",
            "ppt/presentation.xml",
            "ppt/_rels/presentation.xml.rels",
            "ppt/slideMasters/slideMaster1.xml",
            "ppt/slideLayouts/slideLayout1.xml",
            "ppt/theme/theme1.xml",
            "ppt/slides/_rels/slide1.xml.rels",
        ] {
            assert!(
                archive.by_name(part).is_ok(),
                "missing package part: {part}"
            );
        }
    }
}
