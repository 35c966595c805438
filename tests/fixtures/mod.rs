//! Test fixtures for generating valid XLSX files in memory.
//!
//! Builders for assembling a small workbook ZIP programmatically, so the
//! converter can be exercised end to end with known inputs.
//!
//! # Example
//!
//! ```rust
//! use fixtures::{StyleBuilder, XlsxBuilder};
//!
//! let xlsx = XlsxBuilder::new()
//!     .style(StyleBuilder::new().bold())
//!     .cell("A1", "Hello")
//!     .styled_cell("B1", 42.0, 1)
//!     .build();
//! ```
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic,
    clippy::cast_possible_truncation
)]

use std::io::{Cursor, Write};
use zip::write::FileOptions;
use zip::ZipWriter;

// ============================================================================
// Style Builder
// ============================================================================

/// A border side definition.
#[derive(Debug, Clone, PartialEq)]
pub struct BorderSide {
    pub style: String,
    pub color: Option<String>,
}

impl BorderSide {
    #[must_use]
    pub fn new(style: &str) -> Self {
        Self {
            style: style.to_string(),
            color: None,
        }
    }

    #[must_use]
    pub fn color(mut self, color: &str) -> Self {
        self.color = Some(color.trim_start_matches('#').to_string());
        self
    }
}

/// Builder for one cellXf entry and its font/fill/border parts.
#[derive(Debug, Clone, Default)]
pub struct StyleBuilder {
    pub font_name: Option<String>,
    pub font_size: Option<f64>,
    pub font_color: Option<String>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub bg_color: Option<String>,
    pub border_top: Option<BorderSide>,
    pub border_right: Option<BorderSide>,
    pub border_bottom: Option<BorderSide>,
    pub border_left: Option<BorderSide>,
    pub align_horizontal: Option<String>,
    pub align_vertical: Option<String>,
    pub number_format: Option<String>,
}

impl StyleBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn font_name(mut self, name: &str) -> Self {
        self.font_name = Some(name.to_string());
        self
    }

    #[must_use]
    pub fn font_size(mut self, size: f64) -> Self {
        self.font_size = Some(size);
        self
    }

    /// Font color as #RRGGBB.
    #[must_use]
    pub fn font_color(mut self, color: &str) -> Self {
        self.font_color = Some(color.trim_start_matches('#').to_string());
        self
    }

    #[must_use]
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    #[must_use]
    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    #[must_use]
    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    /// Solid fill color as #RRGGBB.
    #[must_use]
    pub fn bg_color(mut self, color: &str) -> Self {
        self.bg_color = Some(color.trim_start_matches('#').to_string());
        self
    }

    #[must_use]
    pub fn border_top(mut self, side: BorderSide) -> Self {
        self.border_top = Some(side);
        self
    }

    #[must_use]
    pub fn border_right(mut self, side: BorderSide) -> Self {
        self.border_right = Some(side);
        self
    }

    #[must_use]
    pub fn border_bottom(mut self, side: BorderSide) -> Self {
        self.border_bottom = Some(side);
        self
    }

    #[must_use]
    pub fn border_left(mut self, side: BorderSide) -> Self {
        self.border_left = Some(side);
        self
    }

    #[must_use]
    pub fn align_horizontal(mut self, align: &str) -> Self {
        self.align_horizontal = Some(align.to_string());
        self
    }

    #[must_use]
    pub fn align_vertical(mut self, align: &str) -> Self {
        self.align_vertical = Some(align.to_string());
        self
    }

    #[must_use]
    pub fn number_format(mut self, format: &str) -> Self {
        self.number_format = Some(format.to_string());
        self
    }

    fn uses_font(&self) -> bool {
        self.font_name.is_some()
            || self.font_size.is_some()
            || self.font_color.is_some()
            || self.bold
            || self.italic
            || self.underline
    }

    fn uses_border(&self) -> bool {
        self.border_top.is_some()
            || self.border_right.is_some()
            || self.border_bottom.is_some()
            || self.border_left.is_some()
    }

    fn uses_alignment(&self) -> bool {
        self.align_horizontal.is_some() || self.align_vertical.is_some()
    }
}

// ============================================================================
// Cell values
// ============================================================================

#[derive(Debug, Clone)]
pub enum CellValue {
    Str(String),
    Number(f64),
    Bool(bool),
    /// Formula with a cached result: `(expression, cached value, t attr)`.
    Formula(String, String, Option<&'static str>),
}

impl From<&str> for CellValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<bool> for CellValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

// ============================================================================
// Xlsx Builder
// ============================================================================

#[derive(Debug, Clone)]
struct PlacedCell {
    row: u32,
    col: u32,
    value: CellValue,
    style: Option<usize>,
}

/// Builds a single-sheet workbook ZIP. Added styles get cellXf ids
/// 1, 2, ... in order (id 0 is the default format).
#[derive(Default)]
pub struct XlsxBuilder {
    styles: Vec<StyleBuilder>,
    cells: Vec<PlacedCell>,
    merges: Vec<String>,
    col_widths: Vec<(u32, u32, f64)>,
    row_heights: Vec<(u32, f64)>,
    margins: Option<(f64, f64, f64, f64)>,
    paper_size: Option<u32>,
    landscape: bool,
    date1904: bool,
    sheet_name: String,
    image: Option<EmbeddedImage>,
    extra_sheets: Vec<String>,
}

struct EmbeddedImage {
    data: Vec<u8>,
    from: (u32, i64, u32, i64),
    to: (u32, i64, u32, i64),
}

impl XlsxBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            sheet_name: "Sheet1".to_string(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn sheet_name(mut self, name: &str) -> Self {
        self.sheet_name = name.to_string();
        self
    }

    /// Append empty extra sheets after the first one.
    #[must_use]
    pub fn extra_sheet(mut self, name: &str) -> Self {
        self.extra_sheets.push(name.to_string());
        self
    }

    #[must_use]
    pub fn style(mut self, style: StyleBuilder) -> Self {
        self.styles.push(style);
        self
    }

    #[must_use]
    pub fn cell<V: Into<CellValue>>(mut self, cell_ref: &str, value: V) -> Self {
        let (col, row) = parse_ref(cell_ref);
        self.cells.push(PlacedCell {
            row,
            col,
            value: value.into(),
            style: None,
        });
        self
    }

    #[must_use]
    pub fn styled_cell<V: Into<CellValue>>(
        mut self,
        cell_ref: &str,
        value: V,
        style_id: usize,
    ) -> Self {
        let (col, row) = parse_ref(cell_ref);
        self.cells.push(PlacedCell {
            row,
            col,
            value: value.into(),
            style: Some(style_id),
        });
        self
    }

    /// A styled but valueless cell, as Excel writes for formatted blanks.
    #[must_use]
    pub fn styled_blank(mut self, cell_ref: &str, style_id: usize) -> Self {
        let (col, row) = parse_ref(cell_ref);
        self.cells.push(PlacedCell {
            row,
            col,
            value: CellValue::Str(String::new()),
            style: Some(style_id),
        });
        self
    }

    /// Merge a range like "A1:B2".
    #[must_use]
    pub fn merge(mut self, range: &str) -> Self {
        self.merges.push(range.to_string());
        self
    }

    /// Column width in character units for 1-based columns min..=max.
    #[must_use]
    pub fn col_width(mut self, min: u32, max: u32, width: f64) -> Self {
        self.col_widths.push((min, max, width));
        self
    }

    /// Explicit height in points for a 1-based row.
    #[must_use]
    pub fn row_height(mut self, row: u32, height: f64) -> Self {
        self.row_heights.push((row, height));
        self
    }

    /// Page margins in inches: left, right, top, bottom.
    #[must_use]
    pub fn margins(mut self, left: f64, right: f64, top: f64, bottom: f64) -> Self {
        self.margins = Some((left, right, top, bottom));
        self
    }

    #[must_use]
    pub fn paper_size(mut self, code: u32) -> Self {
        self.paper_size = Some(code);
        self
    }

    #[must_use]
    pub fn landscape(mut self) -> Self {
        self.landscape = true;
        self
    }

    #[must_use]
    pub fn date1904(mut self) -> Self {
        self.date1904 = true;
        self
    }

    /// Embed one PNG picture with a twoCellAnchor. Anchors are
    /// `(col, colOffEmu, row, rowOffEmu)`, 0-based.
    #[must_use]
    pub fn picture(
        mut self,
        data: Vec<u8>,
        from: (u32, i64, u32, i64),
        to: (u32, i64, u32, i64),
    ) -> Self {
        self.image = Some(EmbeddedImage { data, from, to });
        self
    }

    /// Assemble the ZIP.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        let mut shared: Vec<String> = Vec::new();
        let sheet_xml = self.sheet_xml(&mut shared);
        let sheet_count = 1 + self.extra_sheets.len();

        let cursor = Cursor::new(Vec::new());
        let mut zip = ZipWriter::new(cursor);
        let options: FileOptions =
            FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        let _ = zip.start_file("[Content_Types].xml", options);
        let _ = zip.write_all(content_types(sheet_count, self.image.is_some()).as_bytes());

        let _ = zip.start_file("_rels/.rels", options);
        let _ = zip.write_all(ROOT_RELS.as_bytes());

        let _ = zip.start_file("xl/_rels/workbook.xml.rels", options);
        let _ = zip.write_all(workbook_rels(sheet_count).as_bytes());

        let _ = zip.start_file("xl/workbook.xml", options);
        let _ = zip.write_all(self.workbook_xml().as_bytes());

        let _ = zip.start_file("xl/styles.xml", options);
        let _ = zip.write_all(styles_xml(&self.styles).as_bytes());

        let _ = zip.start_file("xl/sharedStrings.xml", options);
        let _ = zip.write_all(shared_strings_xml(&shared).as_bytes());

        let _ = zip.start_file("xl/worksheets/sheet1.xml", options);
        let _ = zip.write_all(sheet_xml.as_bytes());
        for (i, _) in self.extra_sheets.iter().enumerate() {
            let _ = zip.start_file(format!("xl/worksheets/sheet{}.xml", i + 2), options);
            let _ = zip.write_all(EMPTY_SHEET.as_bytes());
        }

        if let Some(image) = &self.image {
            let _ = zip.start_file("xl/worksheets/_rels/sheet1.xml.rels", options);
            let _ = zip.write_all(SHEET_RELS.as_bytes());

            let _ = zip.start_file("xl/drawings/drawing1.xml", options);
            let _ = zip.write_all(drawing_xml(image).as_bytes());

            let _ = zip.start_file("xl/drawings/_rels/drawing1.xml.rels", options);
            let _ = zip.write_all(DRAWING_RELS.as_bytes());

            let _ = zip.start_file("xl/media/image1.png", options);
            let _ = zip.write_all(&image.data);
        }

        let cursor = zip.finish().expect("zip finish");
        cursor.into_inner()
    }

    fn workbook_xml(&self) -> String {
        let mut xml = String::from(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n\
             <workbook xmlns=\"http://schemas.openxmlformats.org/spreadsheetml/2006/main\" \
             xmlns:r=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships\">",
        );
        if self.date1904 {
            xml.push_str("<workbookPr date1904=\"1\"/>");
        }
        xml.push_str("<sheets>");
        xml.push_str(&format!(
            "<sheet name=\"{}\" sheetId=\"1\" r:id=\"rId1\"/>",
            self.sheet_name
        ));
        for (i, name) in self.extra_sheets.iter().enumerate() {
            xml.push_str(&format!(
                "<sheet name=\"{}\" sheetId=\"{}\" r:id=\"rId{}\"/>",
                name,
                i + 2,
                i + 2
            ));
        }
        xml.push_str("</sheets></workbook>");
        xml
    }

    fn sheet_xml(&self, shared: &mut Vec<String>) -> String {
        let mut xml = String::from(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n\
             <worksheet xmlns=\"http://schemas.openxmlformats.org/spreadsheetml/2006/main\" \
             xmlns:r=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships\">",
        );

        if !self.col_widths.is_empty() {
            xml.push_str("<cols>");
            for (min, max, width) in &self.col_widths {
                xml.push_str(&format!(
                    "<col min=\"{min}\" max=\"{max}\" width=\"{width}\" customWidth=\"1\"/>"
                ));
            }
            xml.push_str("</cols>");
        }

        xml.push_str("<sheetData>");
        let mut cells = self.cells.clone();
        cells.sort_by_key(|c| (c.row, c.col));
        // Rows with a custom height but no cells still get a <row>
        // element, as Excel writes them.
        let mut row_indices: Vec<u32> = cells.iter().map(|c| c.row).collect();
        row_indices.extend(self.row_heights.iter().map(|(r, _)| r.saturating_sub(1)));
        row_indices.sort_unstable();
        row_indices.dedup();
        for row in row_indices {
            let height = self
                .row_heights
                .iter()
                .find(|(r, _)| *r == row + 1)
                .map(|(_, h)| *h);
            match height {
                Some(h) => xml.push_str(&format!(
                    "<row r=\"{}\" ht=\"{h}\" customHeight=\"1\">",
                    row + 1
                )),
                None => xml.push_str(&format!("<row r=\"{}\">", row + 1)),
            }
            for cell in cells.iter().filter(|c| c.row == row) {
                xml.push_str(&cell_xml(cell, shared));
            }
            xml.push_str("</row>");
        }
        xml.push_str("</sheetData>");

        if !self.merges.is_empty() {
            xml.push_str(&format!("<mergeCells count=\"{}\">", self.merges.len()));
            for range in &self.merges {
                xml.push_str(&format!("<mergeCell ref=\"{range}\"/>"));
            }
            xml.push_str("</mergeCells>");
        }

        if let Some((left, right, top, bottom)) = self.margins {
            xml.push_str(&format!(
                "<pageMargins left=\"{left}\" right=\"{right}\" top=\"{top}\" \
                 bottom=\"{bottom}\" header=\"0.3\" footer=\"0.3\"/>"
            ));
        }
        if self.paper_size.is_some() || self.landscape {
            let orientation = if self.landscape {
                " orientation=\"landscape\""
            } else {
                ""
            };
            match self.paper_size {
                Some(code) => xml.push_str(&format!(
                    "<pageSetup paperSize=\"{code}\"{orientation}/>"
                )),
                None => xml.push_str(&format!("<pageSetup{orientation}/>")),
            }
        }
        if self.image.is_some() {
            xml.push_str("<drawing r:id=\"rId1\"/>");
        }

        xml.push_str("</worksheet>");
        xml
    }
}

fn cell_xml(cell: &PlacedCell, shared: &mut Vec<String>) -> String {
    let r = format_ref(cell.col, cell.row);
    let s = cell
        .style
        .map(|id| format!(" s=\"{id}\""))
        .unwrap_or_default();
    match &cell.value {
        CellValue::Str(text) if text.is_empty() => format!("<c r=\"{r}\"{s}/>"),
        CellValue::Str(text) => {
            let idx = shared.len();
            shared.push(text.clone());
            format!("<c r=\"{r}\"{s} t=\"s\"><v>{idx}</v></c>")
        }
        CellValue::Number(n) => format!("<c r=\"{r}\"{s}><v>{n}</v></c>"),
        CellValue::Bool(b) => format!("<c r=\"{r}\"{s} t=\"b\"><v>{}</v></c>", i32::from(*b)),
        CellValue::Formula(expr, cached, tag) => {
            let t = tag.map(|t| format!(" t=\"{t}\"")).unwrap_or_default();
            format!("<c r=\"{r}\"{s}{t}><f>{expr}</f><v>{cached}</v></c>")
        }
    }
}

/// "B3" -> (1, 2), 0-based.
fn parse_ref(cell_ref: &str) -> (u32, u32) {
    let mut col = 0u32;
    let mut row = 0u32;
    for c in cell_ref.chars() {
        if c.is_ascii_alphabetic() {
            col = col * 26 + (c.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
        } else if c.is_ascii_digit() {
            row = row * 10 + (c as u32 - '0' as u32);
        }
    }
    (col.saturating_sub(1), row.saturating_sub(1))
}

fn format_ref(col: u32, row: u32) -> String {
    let mut name = String::new();
    let mut c = col + 1;
    while c > 0 {
        let rem = (c - 1) % 26;
        name.insert(0, (b'A' + rem as u8) as char);
        c = (c - 1) / 26;
    }
    format!("{name}{}", row + 1)
}

// ============================================================================
// Workbook part templates
// ============================================================================

const ROOT_RELS: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n\
<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
<Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument\" Target=\"xl/workbook.xml\"/>\
</Relationships>";

const SHEET_RELS: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n\
<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
<Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/drawing\" Target=\"../drawings/drawing1.xml\"/>\
</Relationships>";

const DRAWING_RELS: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n\
<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
<Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/image\" Target=\"../media/image1.png\"/>\
</Relationships>";

const EMPTY_SHEET: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n\
<worksheet xmlns=\"http://schemas.openxmlformats.org/spreadsheetml/2006/main\">\
<sheetData/></worksheet>";

fn content_types(sheet_count: usize, has_image: bool) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n\
         <Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">\
         <Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>\
         <Default Extension=\"xml\" ContentType=\"application/xml\"/>",
    );
    if has_image {
        xml.push_str("<Default Extension=\"png\" ContentType=\"image/png\"/>");
    }
    xml.push_str(
        "<Override PartName=\"/xl/workbook.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml\"/>\
         <Override PartName=\"/xl/styles.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml\"/>\
         <Override PartName=\"/xl/sharedStrings.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml\"/>",
    );
    for i in 0..sheet_count {
        xml.push_str(&format!(
            "<Override PartName=\"/xl/worksheets/sheet{}.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml\"/>",
            i + 1
        ));
    }
    xml.push_str("</Types>");
    xml
}

fn workbook_rels(sheet_count: usize) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n\
         <Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">",
    );
    for i in 0..sheet_count {
        xml.push_str(&format!(
            "<Relationship Id=\"rId{}\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet\" Target=\"worksheets/sheet{}.xml\"/>",
            i + 1,
            i + 1
        ));
    }
    xml.push_str(&format!(
        "<Relationship Id=\"rId{}\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles\" Target=\"styles.xml\"/>",
        sheet_count + 1
    ));
    xml.push_str(&format!(
        "<Relationship Id=\"rId{}\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings\" Target=\"sharedStrings.xml\"/>",
        sheet_count + 2
    ));
    xml.push_str("</Relationships>");
    xml
}

fn shared_strings_xml(strings: &[String]) -> String {
    let mut xml = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n\
         <sst xmlns=\"http://schemas.openxmlformats.org/spreadsheetml/2006/main\" \
         count=\"{}\" uniqueCount=\"{}\">",
        strings.len(),
        strings.len()
    );
    for s in strings {
        let escaped = s
            .replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;");
        xml.push_str(&format!("<si><t>{escaped}</t></si>"));
    }
    xml.push_str("</sst>");
    xml
}

fn styles_xml(styles: &[StyleBuilder]) -> String {
    let mut fonts = vec![
        "<font><sz val=\"11\"/><name val=\"Calibri\"/></font>".to_string(),
    ];
    let mut fills = vec![
        "<fill><patternFill patternType=\"none\"/></fill>".to_string(),
        "<fill><patternFill patternType=\"gray125\"/></fill>".to_string(),
    ];
    let mut borders = vec![
        "<border><left/><right/><top/><bottom/><diagonal/></border>".to_string(),
    ];
    let mut num_fmts: Vec<(u32, String)> = Vec::new();
    let mut xfs = vec![
        "<xf numFmtId=\"0\" fontId=\"0\" fillId=\"0\" borderId=\"0\"/>".to_string(),
    ];

    for style in styles {
        let font_id = if style.uses_font() {
            let mut f = String::from("<font>");
            if style.bold {
                f.push_str("<b/>");
            }
            if style.italic {
                f.push_str("<i/>");
            }
            if style.underline {
                f.push_str("<u/>");
            }
            f.push_str(&format!(
                "<sz val=\"{}\"/>",
                style.font_size.unwrap_or(11.0)
            ));
            if let Some(color) = &style.font_color {
                f.push_str(&format!("<color rgb=\"FF{color}\"/>"));
            }
            f.push_str(&format!(
                "<name val=\"{}\"/>",
                style.font_name.as_deref().unwrap_or("Calibri")
            ));
            f.push_str("</font>");
            fonts.push(f);
            fonts.len() - 1
        } else {
            0
        };

        let fill_id = if let Some(color) = &style.bg_color {
            fills.push(format!(
                "<fill><patternFill patternType=\"solid\"><fgColor rgb=\"FF{color}\"/>\
                 <bgColor indexed=\"64\"/></patternFill></fill>"
            ));
            fills.len() - 1
        } else {
            0
        };

        let border_id = if style.uses_border() {
            let side = |name: &str, b: &Option<BorderSide>| match b {
                Some(b) => {
                    let color = b
                        .color
                        .as_ref()
                        .map(|c| format!("<color rgb=\"FF{c}\"/>"))
                        .unwrap_or_default();
                    format!("<{name} style=\"{}\">{color}</{name}>", b.style)
                }
                None => format!("<{name}/>"),
            };
            let mut b = String::from("<border>");
            b.push_str(&side("left", &style.border_left));
            b.push_str(&side("right", &style.border_right));
            b.push_str(&side("top", &style.border_top));
            b.push_str(&side("bottom", &style.border_bottom));
            b.push_str("<diagonal/></border>");
            borders.push(b);
            borders.len() - 1
        } else {
            0
        };

        let num_fmt_id = match &style.number_format {
            Some(code) => {
                let id = 164 + num_fmts.len() as u32;
                num_fmts.push((id, code.clone()));
                id
            }
            None => 0,
        };

        let mut xf = format!(
            "<xf numFmtId=\"{num_fmt_id}\" fontId=\"{font_id}\" fillId=\"{fill_id}\" \
             borderId=\"{border_id}\" applyFont=\"1\" applyFill=\"1\" applyBorder=\"1\""
        );
        if style.uses_alignment() {
            xf.push_str(" applyAlignment=\"1\"><alignment");
            if let Some(h) = &style.align_horizontal {
                xf.push_str(&format!(" horizontal=\"{h}\""));
            }
            if let Some(v) = &style.align_vertical {
                xf.push_str(&format!(" vertical=\"{v}\""));
            }
            xf.push_str("/></xf>");
        } else {
            xf.push_str("/>");
        }
        xfs.push(xf);
    }

    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n\
         <styleSheet xmlns=\"http://schemas.openxmlformats.org/spreadsheetml/2006/main\">",
    );
    if !num_fmts.is_empty() {
        xml.push_str(&format!("<numFmts count=\"{}\">", num_fmts.len()));
        for (id, code) in &num_fmts {
            let escaped = code.replace('&', "&amp;").replace('"', "&quot;");
            xml.push_str(&format!("<numFmt numFmtId=\"{id}\" formatCode=\"{escaped}\"/>"));
        }
        xml.push_str("</numFmts>");
    }
    xml.push_str(&format!("<fonts count=\"{}\">", fonts.len()));
    xml.extend(fonts.iter().map(String::as_str));
    xml.push_str("</fonts>");
    xml.push_str(&format!("<fills count=\"{}\">", fills.len()));
    xml.extend(fills.iter().map(String::as_str));
    xml.push_str("</fills>");
    xml.push_str(&format!("<borders count=\"{}\">", borders.len()));
    xml.extend(borders.iter().map(String::as_str));
    xml.push_str("</borders>");
    xml.push_str("<cellStyleXfs count=\"1\"><xf numFmtId=\"0\" fontId=\"0\" fillId=\"0\" borderId=\"0\"/></cellStyleXfs>");
    xml.push_str(&format!("<cellXfs count=\"{}\">", xfs.len()));
    xml.extend(xfs.iter().map(String::as_str));
    xml.push_str("</cellXfs></styleSheet>");
    xml
}

fn drawing_xml(image: &EmbeddedImage) -> String {
    let corner = |(col, col_off, row, row_off): (u32, i64, u32, i64), tag: &str| {
        format!(
            "<xdr:{tag}><xdr:col>{col}</xdr:col><xdr:colOff>{col_off}</xdr:colOff>\
             <xdr:row>{row}</xdr:row><xdr:rowOff>{row_off}</xdr:rowOff></xdr:{tag}>"
        )
    };
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n\
         <xdr:wsDr xmlns:xdr=\"http://schemas.openxmlformats.org/drawingml/2006/spreadsheetDrawing\" \
         xmlns:a=\"http://schemas.openxmlformats.org/drawingml/2006/main\" \
         xmlns:r=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships\">\
         <xdr:twoCellAnchor>{}{}<xdr:pic><xdr:nvPicPr>\
         <xdr:cNvPr id=\"1\" name=\"Picture 1\"/><xdr:cNvPicPr/></xdr:nvPicPr>\
         <xdr:blipFill><a:blip r:embed=\"rId1\"/></xdr:blipFill>\
         <xdr:spPr/></xdr:pic><xdr:clientData/></xdr:twoCellAnchor></xdr:wsDr>",
        corner(image.from, "from"),
        corner(image.to, "to")
    )
}

/// A tiny valid PNG (1x1 transparent pixel).
#[must_use]
pub fn tiny_png() -> Vec<u8> {
    vec![
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48,
        0x44, 0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00,
        0x00, 0x1F, 0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78,
        0x9C, 0x63, 0x00, 0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00,
        0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ]
}
