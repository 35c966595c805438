//! Drawing and media parsing.
//!
//! Each sheet references at most one `xl/drawings/drawing*.xml` part via
//! its `_rels` file. The drawing part anchors pictures either between two
//! cells (`twoCellAnchor`) or at one cell plus an extent
//! (`oneCellAnchor`). Picture payloads live in `xl/media/` and are
//! resolved through the drawing's own `_rels` file.

use quick_xml::events::Event;
use quick_xml::Reader;
use std::collections::HashMap;
use std::io::{BufReader, Read, Seek};
use zip::ZipArchive;

use crate::error::Result;
use crate::types::{AnchorPoint, MediaImage, PictureAnchor};
use crate::xml_helpers::{attr_i64, attr_string, attr_string_local};

/// Parse a drawing part into picture anchors, in file order.
///
/// Anchors that contain no `<pic>` (charts, shapes) are skipped.
pub fn parse_drawing<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    drawing_path: &str,
) -> Result<Vec<PictureAnchor>> {
    let normalized_path = drawing_path.trim_start_matches('/');

    let Ok(file) = archive.by_name(normalized_path) else {
        return Ok(Vec::new());
    };

    let reader = BufReader::new(file);
    let mut xml = Reader::from_reader(reader);
    xml.trim_text(true);

    let mut anchors = Vec::new();
    let mut buf = Vec::new();

    let mut current: Option<PictureAnchor> = None;
    let mut is_picture = false;
    let mut in_from = false;
    let mut in_to = false;
    let mut corner_field: Option<&'static str> = None;

    loop {
        match xml.read_event_into(&mut buf) {
            Ok(Event::Start(ref e) | Event::Empty(ref e)) => {
                let local_name = e.local_name();
                match local_name.as_ref() {
                    b"twoCellAnchor" | b"oneCellAnchor" => {
                        current = Some(PictureAnchor::default());
                        is_picture = false;
                    }
                    b"from" => in_from = true,
                    b"to" => {
                        in_to = true;
                        if let Some(ref mut anchor) = current {
                            anchor.to = Some(AnchorPoint::default());
                        }
                    }
                    b"col" => corner_field = Some("col"),
                    b"colOff" => corner_field = Some("colOff"),
                    b"row" => corner_field = Some("row"),
                    b"rowOff" => corner_field = Some("rowOff"),
                    b"ext" => {
                        if let (Some(ref mut anchor), Some(cx), Some(cy)) =
                            (current.as_mut(), attr_i64(e, b"cx"), attr_i64(e, b"cy"))
                        {
                            anchor.extent = Some((cx, cy));
                        }
                    }
                    b"pic" => is_picture = true,
                    b"blip" => {
                        if let Some(ref mut anchor) = current {
                            anchor.embed_rid = attr_string_local(e, b"embed");
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::Text(ref t)) => {
                if let (Some(ref mut anchor), Some(field)) = (current.as_mut(), corner_field) {
                    if in_from || in_to {
                        let value: i64 = t
                            .unescape()
                            .ok()
                            .and_then(|s| s.trim().parse().ok())
                            .unwrap_or(0);
                        let point = if in_to {
                            anchor.to.get_or_insert_with(AnchorPoint::default)
                        } else {
                            &mut anchor.from
                        };
                        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                        match field {
                            "col" => point.col = value.clamp(0, i64::from(u32::MAX)) as u32,
                            "colOff" => point.col_off_emu = value,
                            "row" => point.row = value.clamp(0, i64::from(u32::MAX)) as u32,
                            _ => point.row_off_emu = value,
                        }
                    }
                }
            }
            Ok(Event::End(ref e)) => {
                let local_name = e.local_name();
                match local_name.as_ref() {
                    b"twoCellAnchor" | b"oneCellAnchor" => {
                        if let Some(anchor) = current.take() {
                            if is_picture {
                                anchors.push(anchor);
                            }
                        }
                    }
                    b"from" => in_from = false,
                    b"to" => in_to = false,
                    b"col" | b"colOff" | b"row" | b"rowOff" => corner_field = None,
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {}
        }
        buf.clear();
    }

    Ok(anchors)
}

/// Find the drawing part path for a worksheet, from the sheet's rels file.
pub fn get_drawing_path<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    sheet_path: &str,
) -> Option<String> {
    let sheet_path = sheet_path.trim_start_matches('/');
    let rels_path = construct_rels_path(sheet_path);

    let Ok(file) = archive.by_name(&rels_path) else {
        return None;
    };

    let reader = BufReader::new(file);
    let mut xml = Reader::from_reader(reader);
    xml.trim_text(true);

    let mut buf = Vec::new();

    loop {
        match xml.read_event_into(&mut buf) {
            Ok(Event::Empty(ref e) | Event::Start(ref e)) => {
                if e.local_name().as_ref() == b"Relationship" {
                    let target = attr_string(e, b"Target").unwrap_or_default();
                    let rel_type = attr_string(e, b"Type").unwrap_or_default();

                    if rel_type.contains("drawing") && !target.is_empty() {
                        let base_dir = sheet_path
                            .rfind('/')
                            .and_then(|pos| sheet_path.get(..pos))
                            .unwrap_or("");
                        return Some(resolve_relative_path(base_dir, &target));
                    }
                }
            }
            Ok(Event::Eof) | Err(_) => break,
            _ => {}
        }
        buf.clear();
    }

    None
}

/// Map rId -> media path from a drawing part's rels file.
pub fn get_image_relationships<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    drawing_path: &str,
) -> HashMap<String, String> {
    let mut rels = HashMap::new();

    let rels_path = construct_rels_path(drawing_path);
    let Ok(file) = archive.by_name(&rels_path) else {
        return rels;
    };

    let reader = BufReader::new(file);
    let mut xml = Reader::from_reader(reader);
    xml.trim_text(true);

    let mut buf = Vec::new();

    loop {
        match xml.read_event_into(&mut buf) {
            Ok(Event::Empty(ref e) | Event::Start(ref e)) => {
                if e.local_name().as_ref() == b"Relationship" {
                    let id = attr_string(e, b"Id").unwrap_or_default();
                    let target = attr_string(e, b"Target").unwrap_or_default();
                    let rel_type = attr_string(e, b"Type").unwrap_or_default();

                    if !id.is_empty() && !target.is_empty() && rel_type.contains("image") {
                        let base_dir = drawing_path
                            .rfind('/')
                            .and_then(|pos| drawing_path.get(..pos))
                            .unwrap_or("");
                        rels.insert(id, resolve_relative_path(base_dir, &target));
                    }
                }
            }
            Ok(Event::Eof) | Err(_) => break,
            _ => {}
        }
        buf.clear();
    }

    rels
}

/// Read one media payload out of the archive.
pub fn read_image<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    image_path: &str,
) -> Option<MediaImage> {
    let normalized_path = image_path.trim_start_matches('/');

    let mut file = archive.by_name(normalized_path).ok()?;
    let mut data = Vec::new();
    file.read_to_end(&mut data).ok()?;

    if data.is_empty() {
        return None;
    }

    Some(MediaImage {
        path: normalized_path.to_string(),
        mime: MediaImage::mime_for_path(normalized_path).to_string(),
        data,
    })
}

/// "xl/drawings/drawing1.xml" -> "xl/drawings/_rels/drawing1.xml.rels"
fn construct_rels_path(file_path: &str) -> String {
    match file_path.rfind('/') {
        Some(pos) => {
            let dir = file_path.get(..pos).unwrap_or("");
            let filename = file_path.get(pos + 1..).unwrap_or("");
            format!("{dir}/_rels/{filename}.rels")
        }
        None => format!("_rels/{file_path}.rels"),
    }
}

/// Resolve a rels target like "../media/image1.png" against a base dir.
fn resolve_relative_path(base_dir: &str, relative: &str) -> String {
    if let Some(stripped) = relative.strip_prefix('/') {
        return stripped.to_string();
    }

    let mut components: Vec<&str> = base_dir.split('/').filter(|s| !s.is_empty()).collect();
    for part in relative.split('/') {
        match part {
            ".." => {
                components.pop();
            }
            "." | "" => {}
            _ => components.push(part),
        }
    }
    components.join("/")
}
