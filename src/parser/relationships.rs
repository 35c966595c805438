//! Workbook-level parts: relationships, sheet list, theme, shared strings.

use quick_xml::events::Event;
use quick_xml::Reader;
use std::collections::HashMap;
use std::io::{BufReader, Read, Seek};
use zip::ZipArchive;

use crate::color::DEFAULT_THEME_COLORS;
use crate::error::Result;
use crate::types::SheetEntry;
use crate::xml_helpers::attr_string;

/// Part paths from xl/_rels/workbook.xml.rels, resolved relative to xl/.
#[derive(Default, Debug)]
pub(super) struct WorkbookRelationships {
    /// rId -> worksheet part path, e.g. "rId1" -> "xl/worksheets/sheet1.xml".
    pub worksheets: HashMap<String, String>,
    pub shared_strings: Option<String>,
    pub styles: Option<String>,
    pub theme: Option<String>,
}

pub(super) fn parse_workbook_relationships<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
) -> WorkbookRelationships {
    let mut rels = WorkbookRelationships::default();

    let Ok(file) = archive.by_name("xl/_rels/workbook.xml.rels") else {
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

                    let full_path = match target.strip_prefix('/') {
                        Some(stripped) => stripped.to_string(),
                        None => format!("xl/{target}"),
                    };

                    if rel_type.contains("worksheet") && !id.is_empty() && !target.is_empty() {
                        rels.worksheets.insert(id, full_path);
                    } else if rel_type.contains("sharedStrings") {
                        rels.shared_strings = Some(full_path);
                    } else if rel_type.contains("/styles") {
                        rels.styles = Some(full_path);
                    } else if rel_type.contains("/theme") {
                        rels.theme = Some(full_path);
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

/// Sheet list from xl/workbook.xml, in workbook order, plus the date1904
/// flag.
pub(super) fn get_sheet_entries<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
) -> Result<(Vec<SheetEntry>, bool)> {
    let file = archive.by_name("xl/workbook.xml")?;

    let reader = BufReader::new(file);
    let mut xml = Reader::from_reader(reader);
    xml.trim_text(true);

    let mut sheets = Vec::new();
    let mut date1904 = false;
    let mut buf = Vec::new();

    loop {
        match xml.read_event_into(&mut buf) {
            Ok(Event::Empty(ref e) | Event::Start(ref e)) => {
                let local_name = e.local_name();
                match local_name.as_ref() {
                    b"workbookPr" => {
                        if let Some(val) = attr_string(e, b"date1904") {
                            date1904 = val == "1" || val.eq_ignore_ascii_case("true");
                        }
                    }
                    b"sheet" => {
                        let name = attr_string(e, b"name").unwrap_or_default();
                        let mut rid = String::new();
                        for attr in e.attributes().flatten() {
                            if attr.key.local_name().as_ref() == b"id" {
                                rid = std::str::from_utf8(&attr.value)
                                    .unwrap_or("")
                                    .to_string();
                            }
                        }
                        sheets.push(SheetEntry { name, rid });
                    }
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {}
        }
        buf.clear();
    }

    Ok((sheets, date1904))
}

/// Theme color palette, falling back to the Office defaults when the
/// workbook carries no theme part.
pub(super) fn parse_theme<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    path: Option<&str>,
) -> Vec<String> {
    let mut colors: Vec<String> = DEFAULT_THEME_COLORS
        .iter()
        .map(ToString::to_string)
        .collect();

    let theme_path = path.unwrap_or("xl/theme/theme1.xml");
    let Ok(file) = archive.by_name(theme_path) else {
        return colors;
    };

    let reader = BufReader::new(file);
    let mut xml = Reader::from_reader(reader);
    xml.trim_text(true);

    let mut buf = Vec::new();
    let mut color_index = 0;
    let mut in_clr_scheme = false;

    let color_elements = [
        "lt1", "dk1", "lt2", "dk2", "accent1", "accent2", "accent3", "accent4", "accent5",
        "accent6", "hlink", "folHlink",
    ];

    loop {
        match xml.read_event_into(&mut buf) {
            Ok(Event::Start(ref e) | Event::Empty(ref e)) => {
                let local_name = e.local_name();
                let name = std::str::from_utf8(local_name.as_ref()).unwrap_or("");

                if name == "clrScheme" {
                    in_clr_scheme = true;
                }
                if in_clr_scheme {
                    if let Some(idx) = color_elements.iter().position(|&n| n == name) {
                        color_index = idx;
                    }
                    if name == "srgbClr" || name == "sysClr" {
                        for attr in e.attributes().flatten() {
                            if attr.key.as_ref() == b"val" || attr.key.as_ref() == b"lastClr" {
                                let val = std::str::from_utf8(&attr.value).unwrap_or("");
                                if val.len() == 6 {
                                    if let Some(color) = colors.get_mut(color_index) {
                                        *color = format!("#{val}");
                                    }
                                }
                            }
                        }
                    }
                }
            }
            Ok(Event::End(ref e)) => {
                if e.local_name().as_ref() == b"clrScheme" {
                    in_clr_scheme = false;
                }
            }
            Ok(Event::Eof) | Err(_) => break,
            _ => {}
        }
        buf.clear();
    }

    colors
}

/// Shared strings table. Rich-text runs concatenate their `<t>` pieces.
pub(super) fn parse_shared_strings<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    path: Option<&str>,
) -> Vec<String> {
    let sst_path = path.unwrap_or("xl/sharedStrings.xml");
    let Ok(file) = archive.by_name(sst_path) else {
        return Vec::new();
    };

    let reader = BufReader::new(file);
    let mut xml = Reader::from_reader(reader);
    xml.trim_text(false);

    let mut strings = Vec::new();
    let mut buf = Vec::new();
    let mut current_string = String::new();
    let mut in_si = false;
    let mut in_t = false;

    loop {
        match xml.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"si" => {
                    in_si = true;
                    current_string.clear();
                }
                b"t" if in_si => in_t = true,
                _ => {}
            },
            Ok(Event::Text(ref e)) if in_t => {
                if let Ok(text) = e.unescape() {
                    current_string.push_str(&text);
                }
            }
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"si" => {
                    strings.push(current_string.clone());
                    in_si = false;
                }
                b"t" => in_t = false,
                _ => {}
            },
            Ok(Event::Eof) | Err(_) => break,
            _ => {}
        }
        buf.clear();
    }

    strings
}
