//! DrawingML / PresentationML part generation.
//!
//! Every generated part goes through quick-xml's writer so text and
//! attribute values are escaped consistently. Static parts that never
//! vary (master, layout, theme) live in [`crate::parts`].

use deckpress_core::Rgb;
use quick_xml::events::{BytesDecl, BytesText, Event};
use quick_xml::Writer;

use crate::model::{Picture, RenderedSlide, Shape, TextBox, SLIDE_HEIGHT_EMU, SLIDE_WIDTH_EMU};
use crate::render::FONT_NAME;

const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
const NS_CT: &str = "http://schemas.openxmlformats.org/package/2006/content-types";
const NS_REL: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

const REL_TYPE_SLIDE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
const REL_TYPE_SLIDE_MASTER: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster";
const REL_TYPE_SLIDE_LAYOUT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";
const REL_TYPE_IMAGE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";

type W = Writer<Vec<u8>>;
type XmlResult<T> = quick_xml::Result<T>;

/// Run `build` inside a fresh document with an XML declaration.
fn document<F>(build: F) -> XmlResult<Vec<u8>>
where
    F: FnOnce(&mut W) -> XmlResult<()>,
{
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
    build(&mut writer)?;
    Ok(writer.into_inner())
}

/// `[Content_Types].xml` with one override per slide part.
pub(crate) fn content_types_xml(slide_count: usize) -> XmlResult<Vec<u8>> {
    document(|w| {
        w.create_element("Types")
            .with_attribute(("xmlns", NS_CT))
            .write_inner_content(|w| {
                default_type(w, "rels", "application/vnd.openxmlformats-package.relationships+xml")?;
                default_type(w, "xml", "application/xml")?;
                default_type(w, "png", "image/png")?;
                override_type(
                    w,
                    "/ppt/presentation.xml",
                    "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml",
                )?;
                override_type(
                    w,
                    "/ppt/slideMasters/slideMaster1.xml",
                    "application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml",
                )?;
                override_type(
                    w,
                    "/ppt/slideLayouts/slideLayout1.xml",
                    "application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml",
                )?;
                override_type(
                    w,
                    "/ppt/theme/theme1.xml",
                    "application/vnd.openxmlformats-officedocument.theme+xml",
                )?;
                for n in 1..=slide_count {
                    override_type(
                        w,
                        &format!("/ppt/slides/slide{n}.xml"),
                        "application/vnd.openxmlformats-officedocument.presentationml.slide+xml",
                    )?;
                }
                Ok::<(), quick_xml::Error>(())
            })?;
        Ok(())
    })
}

fn default_type(w: &mut W, extension: &str, content_type: &str) -> XmlResult<()> {
    w.create_element("Default")
        .with_attributes([("Extension", extension), ("ContentType", content_type)])
        .write_empty()?;
    Ok(())
}

fn override_type(w: &mut W, part_name: &str, content_type: &str) -> XmlResult<()> {
    w.create_element("Override")
        .with_attributes([("PartName", part_name), ("ContentType", content_type)])
        .write_empty()?;
    Ok(())
}

/// `ppt/presentation.xml`: master reference, slide list, slide size.
pub(crate) fn presentation_xml(slide_count: usize) -> XmlResult<Vec<u8>> {
    document(|w| {
        w.create_element("p:presentation")
            .with_attributes([("xmlns:a", NS_A), ("xmlns:r", NS_R), ("xmlns:p", NS_P)])
            .write_inner_content(|w| {
                w.create_element("p:sldMasterIdLst").write_inner_content(|w| {
                    w.create_element("p:sldMasterId")
                        .with_attributes([("id", "2147483648"), ("r:id", "rId1")])
                        .write_empty()?;
                    Ok::<(), quick_xml::Error>(())
                })?;
                w.create_element("p:sldIdLst").write_inner_content(|w| {
                    for n in 0..slide_count {
                        w.create_element("p:sldId")
                            .with_attributes([
                                ("id", (256 + n).to_string().as_str()),
                                ("r:id", format!("rId{}", n + 2).as_str()),
                            ])
                            .write_empty()?;
                    }
                    Ok::<(), quick_xml::Error>(())
                })?;
                w.create_element("p:sldSz")
                    .with_attributes([
                        ("cx", SLIDE_WIDTH_EMU.to_string().as_str()),
                        ("cy", SLIDE_HEIGHT_EMU.to_string().as_str()),
                    ])
                    .write_empty()?;
                w.create_element("p:notesSz")
                    .with_attributes([("cx", "6858000"), ("cy", "9144000")])
                    .write_empty()?;
                Ok::<(), quick_xml::Error>(())
            })?;
        Ok(())
    })
}

/// `ppt/_rels/presentation.xml.rels`: rId1 is the master, rId2.. the
/// slides in deck order.
pub(crate) fn presentation_rels_xml(slide_count: usize) -> XmlResult<Vec<u8>> {
    document(|w| {
        w.create_element("Relationships")
            .with_attribute(("xmlns", NS_REL))
            .write_inner_content(|w| {
                relationship(w, "rId1", REL_TYPE_SLIDE_MASTER, "slideMasters/slideMaster1.xml")?;
                for n in 1..=slide_count {
                    relationship(
                        w,
                        &format!("rId{}", n + 1),
                        REL_TYPE_SLIDE,
                        &format!("slides/slide{n}.xml"),
                    )?;
                }
                Ok::<(), quick_xml::Error>(())
            })?;
        Ok(())
    })
}

/// Relationship part for one slide: the layout plus its embedded media,
/// `rId2..` matching picture placement order.
pub(crate) fn slide_rels_xml(media_names: &[String]) -> XmlResult<Vec<u8>> {
    document(|w| {
        w.create_element("Relationships")
            .with_attribute(("xmlns", NS_REL))
            .write_inner_content(|w| {
                relationship(w, "rId1", REL_TYPE_SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml")?;
                for (i, name) in media_names.iter().enumerate() {
                    relationship(
                        w,
                        &format!("rId{}", i + 2),
                        REL_TYPE_IMAGE,
                        &format!("../media/{name}"),
                    )?;
                }
                Ok::<(), quick_xml::Error>(())
            })?;
        Ok(())
    })
}

fn relationship(w: &mut W, id: &str, rel_type: &str, target: &str) -> XmlResult<()> {
    w.create_element("Relationship")
        .with_attributes([("Id", id), ("Type", rel_type), ("Target", target)])
        .write_empty()?;
    Ok(())
}

/// Serialize one rendered slide to `ppt/slides/slideN.xml`.
pub(crate) fn slide_xml(slide: &RenderedSlide) -> XmlResult<Vec<u8>> {
    document(|w| {
        w.create_element("p:sld")
            .with_attributes([("xmlns:a", NS_A), ("xmlns:r", NS_R), ("xmlns:p", NS_P)])
            .write_inner_content(|w| {
                w.create_element("p:cSld").write_inner_content(|w| {
                    background(w, slide.background)?;
                    shape_tree(w, slide)?;
                    Ok::<(), quick_xml::Error>(())
                })?;
                w.create_element("p:clrMapOvr").write_inner_content(|w| {
                    w.create_element("a:masterClrMapping").write_empty()?;
                    Ok::<(), quick_xml::Error>(())
                })?;
                Ok::<(), quick_xml::Error>(())
            })?;
        Ok(())
    })
}

fn background(w: &mut W, color: Rgb) -> XmlResult<()> {
    w.create_element("p:bg").write_inner_content(|w| {
        w.create_element("p:bgPr").write_inner_content(|w| {
            solid_fill(w, color)?;
            w.create_element("a:effectLst").write_empty()?;
            Ok::<(), quick_xml::Error>(())
        })?;
        Ok::<(), quick_xml::Error>(())
    })?;
    Ok(())
}

fn shape_tree(w: &mut W, slide: &RenderedSlide) -> XmlResult<()> {
    w.create_element("p:spTree").write_inner_content(|w| {
        w.create_element("p:nvGrpSpPr").write_inner_content(|w| {
            w.create_element("p:cNvPr")
                .with_attributes([("id", "1"), ("name", "")])
                .write_empty()?;
            w.create_element("p:cNvGrpSpPr").write_empty()?;
            w.create_element("p:nvPr").write_empty()?;
            Ok::<(), quick_xml::Error>(())
        })?;
        w.create_element("p:grpSpPr").write_inner_content(|w| {
            w.create_element("a:xfrm").write_inner_content(|w| {
                w.create_element("a:off")
                    .with_attributes([("x", "0"), ("y", "0")])
                    .write_empty()?;
                w.create_element("a:ext")
                    .with_attributes([("cx", "0"), ("cy", "0")])
                    .write_empty()?;
                w.create_element("a:chOff")
                    .with_attributes([("x", "0"), ("y", "0")])
                    .write_empty()?;
                w.create_element("a:chExt")
                    .with_attributes([("cx", "0"), ("cy", "0")])
                    .write_empty()?;
                Ok::<(), quick_xml::Error>(())
            })?;
            Ok::<(), quick_xml::Error>(())
        })?;

        // Shape ids start at 2 (1 is the group), picture relationship
        // ids at rId2 (rId1 is the layout).
        let mut shape_id = 2u32;
        let mut rel_no = 2u32;
        for shape in &slide.shapes {
            match shape {
                Shape::Text(text_box) => text_shape(w, text_box, shape_id)?,
                Shape::Picture(picture) => {
                    picture_shape(w, picture, shape_id, &format!("rId{rel_no}"))?;
                    rel_no += 1;
                }
            }
            shape_id += 1;
        }
        Ok::<(), quick_xml::Error>(())
    })?;
    Ok(())
}

fn text_shape(w: &mut W, text_box: &TextBox, id: u32) -> XmlResult<()> {
    let id_attr = id.to_string();
    let name = format!("TextBox {id}");
    w.create_element("p:sp").write_inner_content(|w| {
        w.create_element("p:nvSpPr").write_inner_content(|w| {
            w.create_element("p:cNvPr")
                .with_attributes([("id", id_attr.as_str()), ("name", name.as_str())])
                .write_empty()?;
            w.create_element("p:cNvSpPr")
                .with_attribute(("txBox", "1"))
                .write_empty()?;
            w.create_element("p:nvPr").write_empty()?;
            Ok::<(), quick_xml::Error>(())
        })?;
        shape_properties(w, text_box.frame.x, text_box.frame.y, text_box.frame.cx, text_box.frame.cy)?;
        w.create_element("p:txBody").write_inner_content(|w| {
            w.create_element("a:bodyPr")
                .with_attribute(("wrap", if text_box.wrap { "square" } else { "none" }))
                .write_empty()?;
            w.create_element("a:lstStyle").write_empty()?;
            w.create_element("a:p").write_inner_content(|w| {
                w.create_element("a:pPr")
                    .with_attribute(("algn", text_box.align.as_attr()))
                    .write_empty()?;
                w.create_element("a:r").write_inner_content(|w| {
                    run_properties(w, text_box)?;
                    w.create_element("a:t")
                        .write_text_content(BytesText::new(&text_box.text))?;
                    Ok::<(), quick_xml::Error>(())
                })?;
                Ok::<(), quick_xml::Error>(())
            })?;
            Ok::<(), quick_xml::Error>(())
        })?;
        Ok::<(), quick_xml::Error>(())
    })?;
    Ok(())
}

fn run_properties(w: &mut W, text_box: &TextBox) -> XmlResult<()> {
    let size = (text_box.size_pt * 100).to_string();
    let mut element = w
        .create_element("a:rPr")
        .with_attributes([("lang", "en-US"), ("sz", size.as_str()), ("dirty", "0")]);
    if text_box.bold {
        element = element.with_attribute(("b", "1"));
    }
    element.write_inner_content(|w| {
        solid_fill(w, text_box.color)?;
        w.create_element("a:latin")
            .with_attribute(("typeface", FONT_NAME))
            .write_empty()?;
        Ok::<(), quick_xml::Error>(())
    })?;
    Ok(())
}

fn picture_shape(w: &mut W, picture: &Picture, id: u32, rel_id: &str) -> XmlResult<()> {
    let id_attr = id.to_string();
    let name = format!("Picture {id}");
    w.create_element("p:pic").write_inner_content(|w| {
        w.create_element("p:nvPicPr").write_inner_content(|w| {
            w.create_element("p:cNvPr")
                .with_attributes([("id", id_attr.as_str()), ("name", name.as_str())])
                .write_empty()?;
            w.create_element("p:cNvPicPr").write_empty()?;
            w.create_element("p:nvPr").write_empty()?;
            Ok::<(), quick_xml::Error>(())
        })?;
        w.create_element("p:blipFill").write_inner_content(|w| {
            w.create_element("a:blip")
                .with_attribute(("r:embed", rel_id))
                .write_empty()?;
            w.create_element("a:stretch").write_inner_content(|w| {
                w.create_element("a:fillRect").write_empty()?;
                Ok::<(), quick_xml::Error>(())
            })?;
            Ok::<(), quick_xml::Error>(())
        })?;
        shape_properties(w, picture.frame.x, picture.frame.y, picture.frame.cx, picture.frame.cy)?;
        Ok::<(), quick_xml::Error>(())
    })?;
    Ok(())
}

/// `p:spPr` with a transform and plain rectangle geometry.
fn shape_properties(w: &mut W, x: i64, y: i64, cx: i64, cy: i64) -> XmlResult<()> {
    w.create_element("p:spPr").write_inner_content(|w| {
        w.create_element("a:xfrm").write_inner_content(|w| {
            w.create_element("a:off")
                .with_attributes([("x", x.to_string().as_str()), ("y", y.to_string().as_str())])
                .write_empty()?;
            w.create_element("a:ext")
                .with_attributes([
                    ("cx", cx.to_string().as_str()),
                    ("cy", cy.to_string().as_str()),
                ])
                .write_empty()?;
            Ok::<(), quick_xml::Error>(())
        })?;
        w.create_element("a:prstGeom")
            .with_attribute(("prst", "rect"))
            .write_inner_content(|w| {
                w.create_element("a:avLst").write_empty()?;
                Ok::<(), quick_xml::Error>(())
            })?;
        Ok::<(), quick_xml::Error>(())
    })?;
    Ok(())
}

fn solid_fill(w: &mut W, color: Rgb) -> XmlResult<()> {
    w.create_element("a:solidFill").write_inner_content(|w| {
        w.create_element("a:srgbClr")
            .with_attribute(("val", color.to_hex().as_str()))
            .write_empty()?;
        Ok::<(), quick_xml::Error>(())
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Align, Frame, RenderedSlide};

    fn sample_slide() -> RenderedSlide {
        let mut slide = RenderedSlide::new(Rgb::new(0x0b, 0x12, 0x20));
        slide.push_text(TextBox {
            frame: Frame::inches(0.5, 2.3, 12.33, 1.5),
            text: "Q & A <session>".to_string(),
            align: Align::Center,
            size_pt: 54,
            bold: true,
            color: Rgb::new(0xff, 0xff, 0xff),
            wrap: true,
        });
        slide
    }

    #[test]
    fn slide_xml_carries_background_and_escaped_text() {
        let bytes = slide_xml(&sample_slide()).unwrap();
        let xml = String::from_utf8(bytes).unwrap();
        assert!(xml.contains(r#"<a:srgbClr val="0B1220"/>"#));
        assert!(xml.contains("<a:t>Q &amp; A &lt;session&gt;</a:t>"));
        assert!(xml.contains(r#"<a:pPr algn="ctr"/>"#));
        assert!(xml.contains(r#"sz="5400""#));
        assert!(xml.contains(r#"<a:latin typeface="Inter"/>"#));
    }

    #[test]
    fn presentation_xml_lists_slides_in_order() {
        let xml = String::from_utf8(presentation_xml(3).unwrap()).unwrap();
        assert!(xml.contains(r#"<p:sldId id="256" r:id="rId2"/>"#));
        assert!(xml.contains(r#"<p:sldId id="257" r:id="rId3"/>"#));
        assert!(xml.contains(r#"<p:sldId id="258" r:id="rId4"/>"#));
        assert!(xml.contains(r#"cx="12192000""#));
    }

    #[test]
    fn slide_rels_reference_layout_then_media() {
        let media = vec!["image3.png".to_string()];
        let xml = String::from_utf8(slide_rels_xml(&media).unwrap()).unwrap();
        assert!(xml.contains(r#"Id="rId1""#));
        assert!(xml.contains("slideLayouts/slideLayout1.xml"));
        assert!(xml.contains(r#"Id="rId2""#));
        assert!(xml.contains("../media/image3.png"));
    }

    #[test]
    fn content_types_cover_every_slide() {
        let xml = String::from_utf8(content_types_xml(2).unwrap()).unwrap();
        assert!(xml.contains(r#"PartName="/ppt/slides/slide1.xml""#));
        assert!(xml.contains(r#"PartName="/ppt/slides/slide2.xml""#));
        assert!(!xml.contains("slide3.xml"));
        assert!(xml.contains(r#"Extension="png""#));
    }
}
