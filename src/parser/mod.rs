//! XLSX parsing entry point.
//!
//! Opens the ZIP archive, walks the workbook relationships and assembles
//! everything the conversion needs for one sheet: parsed cells, the
//! resolved style table, picture anchors and their media payloads.

mod relationships;
pub(crate) mod styles;
mod worksheet;

use std::collections::HashMap;
use std::io::{BufReader, Cursor};
use zip::ZipArchive;

use crate::drawings::{get_drawing_path, get_image_relationships, parse_drawing, read_image};
use crate::error::{Result, XlfoError};
use crate::types::{CellStyle, MediaImage, PictureAnchor, SheetData};

use relationships::{
    get_sheet_entries, parse_shared_strings, parse_theme, parse_workbook_relationships,
};
pub use styles::{parse_styles, resolve_styles};
use worksheet::parse_sheet;

/// The workbook default font, as far as layout cares about it.
#[derive(Debug, Clone)]
pub struct DefaultFont {
    pub family: String,
    pub size_pt: f64,
}

impl Default for DefaultFont {
    fn default() -> Self {
        Self {
            family: "Calibri".to_string(),
            size_pt: 11.0,
        }
    }
}

/// Everything extracted for the one sheet being converted.
#[derive(Debug, Clone, Default)]
pub struct ParsedSheet {
    pub name: String,
    pub data: SheetData,
    /// Resolved style table, indexed by cellXf id.
    pub styles: Vec<CellStyle>,
    pub default_font: DefaultFont,
    pub date1904: bool,
    /// Picture anchors in drawing file order.
    pub anchors: Vec<PictureAnchor>,
    /// rId -> media payload for the anchors above.
    pub media: HashMap<String, MediaImage>,
}

/// Parse one sheet of an XLSX document held in memory.
///
/// `sheet_index` is 0-based workbook order. Everything is read in a
/// single pass over the archive; the archive handle is dropped on
/// return, success or not.
pub fn parse_workbook_sheet(bytes: &[u8], sheet_index: usize) -> Result<ParsedSheet> {
    let cursor = Cursor::new(bytes);
    let mut archive = ZipArchive::new(cursor)?;

    let rels = parse_workbook_relationships(&mut archive);
    let (entries, date1904) = get_sheet_entries(&mut archive)?;

    let entry = entries
        .get(sheet_index)
        .ok_or(XlfoError::InvalidSheetIndex {
            index: sheet_index,
            count: entries.len(),
        })?;
    let sheet_path = rels
        .worksheets
        .get(&entry.rid)
        .cloned()
        .unwrap_or_else(|| format!("xl/worksheets/sheet{}.xml", sheet_index + 1));
    log::debug!("sheet {sheet_index} ({}) -> {sheet_path}", entry.name);

    let theme = parse_theme(&mut archive, rels.theme.as_deref());
    let shared_strings = parse_shared_strings(&mut archive, rels.shared_strings.as_deref());
    log::debug!("{} shared strings", shared_strings.len());

    let stylesheet = {
        let styles_path = rels.styles.as_deref().unwrap_or("xl/styles.xml");
        match archive.by_name(styles_path) {
            Ok(file) => parse_styles(BufReader::new(file))?,
            Err(_) => Default::default(),
        }
    };
    let default_font = stylesheet
        .default_font()
        .map(|raw| DefaultFont {
            family: raw.name.clone().unwrap_or_else(|| "Calibri".to_string()),
            size_pt: raw.size.unwrap_or(11.0),
        })
        .unwrap_or_default();
    let styles = resolve_styles(&stylesheet, &theme)?;
    log::debug!(
        "{} styles resolved ({} fonts, {} borders)",
        styles.len(),
        stylesheet.fonts.len(),
        stylesheet.borders.len()
    );

    let data = {
        let file = archive.by_name(&sheet_path)?;
        parse_sheet(BufReader::new(file), &shared_strings, &styles, date1904)?
    };

    let mut anchors = Vec::new();
    let mut media = HashMap::new();
    if let Some(drawing_path) = get_drawing_path(&mut archive, &sheet_path) {
        anchors = parse_drawing(&mut archive, &drawing_path)?;
        let image_rels = get_image_relationships(&mut archive, &drawing_path);
        for anchor in &anchors {
            let Some(rid) = anchor.embed_rid.as_ref() else {
                continue;
            };
            if media.contains_key(rid) {
                continue;
            }
            if let Some(image) = image_rels.get(rid).and_then(|p| read_image(&mut archive, p)) {
                media.insert(rid.clone(), image);
            }
        }
        log::debug!("{} picture anchors, {} media payloads", anchors.len(), media.len());
    }

    Ok(ParsedSheet {
        name: entry.name.clone(),
        data,
        styles,
        default_font,
        date1904,
        anchors,
        media,
    })
}
