//! Worksheet parsing: cells, rows, columns, merges and print setup.

use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::BufRead;

use crate::cell_ref::{parse_cell_ref_bytes_or_default, parse_cell_range};
use crate::error::Result;
use crate::numfmt::{format_general, format_number};
use crate::types::{
    Cell, CellKind, CellStyle, ColSpec, MergeRange, Orientation, PageMargins, PageSetup, Row,
    SheetData,
};
use crate::xml_helpers::{attr_f64, attr_string, attr_string_local, attr_u32};

/// Cell type tag from the `t` attribute of a `<c>` element.
#[derive(Copy, Clone)]
enum CellTypeTag {
    Shared,
    Inline,
    Str,
    Bool,
    Error,
    Default,
}

fn parse_cell_type_tag(value: &[u8]) -> CellTypeTag {
    match value {
        b"s" => CellTypeTag::Shared,
        b"b" => CellTypeTag::Bool,
        b"e" => CellTypeTag::Error,
        b"str" => CellTypeTag::Str,
        b"inlineStr" => CellTypeTag::Inline,
        _ => CellTypeTag::Default,
    }
}

fn parse_u32_bytes(value: &[u8]) -> Option<u32> {
    let mut num: u32 = 0;
    let mut seen = false;
    for &b in value {
        if !b.is_ascii_digit() {
            return None;
        }
        seen = true;
        num = num.saturating_mul(10).saturating_add(u32::from(b - b'0'));
    }
    seen.then_some(num)
}

/// Turn the raw `<v>` text into the display value and kind.
///
/// String cells pass their text through untouched; numeric values go
/// through the style's number format (a date format yields a date string
/// but the kind stays Number); booleans display as TRUE/FALSE.
fn resolve_cell_value(
    raw: Option<&str>,
    tag: CellTypeTag,
    shared_strings: &[String],
    style: Option<&CellStyle>,
    date1904: bool,
) -> (String, CellKind) {
    let Some(raw) = raw else {
        return (String::new(), CellKind::Blank);
    };

    match tag {
        CellTypeTag::Shared => {
            let text = raw
                .parse::<usize>()
                .ok()
                .and_then(|idx| shared_strings.get(idx))
                .cloned()
                .unwrap_or_default();
            (text, CellKind::Text)
        }
        CellTypeTag::Inline | CellTypeTag::Str => (raw.to_string(), CellKind::Text),
        CellTypeTag::Bool => {
            let text = if raw == "1" { "TRUE" } else { "FALSE" };
            (text.to_string(), CellKind::Boolean)
        }
        CellTypeTag::Error => (raw.to_string(), CellKind::Error),
        CellTypeTag::Default => match raw.parse::<f64>() {
            Ok(num) => {
                let formatted = match style.and_then(|s| s.num_fmt.as_deref()) {
                    Some(code) => format_number(num, code, date1904),
                    None => format_general(num),
                };
                (formatted, CellKind::Number)
            }
            Err(_) => (raw.to_string(), CellKind::Text),
        },
    }
}

/// Parse one worksheet part.
#[allow(clippy::too_many_lines)]
pub fn parse_sheet<R: BufRead>(
    reader: R,
    shared_strings: &[String],
    style_table: &[CellStyle],
    date1904: bool,
) -> Result<SheetData> {
    let mut xml = Reader::from_reader(reader);
    xml.trim_text(false);

    let mut sheet = SheetData::default();

    let mut buf = Vec::new();
    let mut cell_buf = Vec::new();
    let mut text_buf = Vec::new();
    let mut current_row: Option<Row> = None;
    let mut in_cols = false;

    loop {
        match xml.read_event_into(&mut buf) {
            Ok(ref event @ (Event::Start(_) | Event::Empty(_))) => {
                let (Event::Start(ref e) | Event::Empty(ref e)) = event else {
                    continue;
                };
                let is_start_event = matches!(event, Event::Start(_));
                let local_name = e.local_name();

                match local_name.as_ref() {
                    b"sheetFormatPr" => {
                        sheet.default_row_height = attr_f64(e, b"defaultRowHeight");
                        sheet.default_col_width = attr_f64(e, b"defaultColWidth");
                    }

                    b"cols" => in_cols = true,

                    b"col" if in_cols => {
                        let min = attr_u32(e, b"min").unwrap_or(1);
                        let max = attr_u32(e, b"max").unwrap_or(min);
                        if let Some(width) = attr_f64(e, b"width") {
                            sheet.col_specs.push(ColSpec {
                                min: min.saturating_sub(1),
                                max: max.saturating_sub(1),
                                width,
                            });
                        }
                    }

                    b"row" => {
                        if let Some(row) = current_row.take() {
                            sheet.rows.push(row);
                        }
                        let index = attr_u32(e, b"r").unwrap_or(1).saturating_sub(1);
                        current_row = Some(Row {
                            index,
                            height: attr_f64(e, b"ht"),
                            cells: Vec::new(),
                        });
                    }

                    b"c" => {
                        let mut col: u32 = 0;
                        let mut tag = CellTypeTag::Default;
                        let mut style_id: Option<u32> = None;

                        for attr in e.attributes().flatten() {
                            match attr.key.as_ref() {
                                b"r" => {
                                    let (c, _) = parse_cell_ref_bytes_or_default(&attr.value);
                                    col = c;
                                }
                                b"t" => tag = parse_cell_type_tag(&attr.value),
                                b"s" => style_id = parse_u32_bytes(&attr.value),
                                _ => {}
                            }
                        }

                        // Child elements only exist for Start events; a
                        // self-closing <c/> is a blank styled cell.
                        let mut value: Option<String> = None;
                        let mut is_formula = false;
                        if is_start_event {
                            loop {
                                cell_buf.clear();
                                match xml.read_event_into(&mut cell_buf) {
                                    Ok(Event::Start(ref inner) | Event::Empty(ref inner)) => {
                                        let inner_name = inner.local_name();
                                        match inner_name.as_ref() {
                                            b"f" => is_formula = true,
                                            b"v" | b"t" => {
                                                text_buf.clear();
                                                if let Ok(Event::Text(text)) =
                                                    xml.read_event_into(&mut text_buf)
                                                {
                                                    value = text
                                                        .unescape()
                                                        .ok()
                                                        .map(|s| s.to_string());
                                                }
                                            }
                                            _ => {}
                                        }
                                    }
                                    Ok(Event::End(ref inner)) => {
                                        if inner.local_name().as_ref() == b"c" {
                                            break;
                                        }
                                    }
                                    Ok(Event::Eof) => break,
                                    Err(err) => return Err(err.into()),
                                    _ => {}
                                }
                            }
                        }

                        let style = style_id
                            .and_then(|id| style_table.get(id as usize));
                        let (display, kind) = resolve_cell_value(
                            value.as_deref(),
                            tag,
                            shared_strings,
                            style,
                            date1904,
                        );

                        if let Some(ref mut row) = current_row {
                            row.cells.push(Cell {
                                col,
                                value: display,
                                kind,
                                is_formula,
                                style_id,
                            });
                        }
                    }

                    b"mergeCell" => {
                        if let Some(range) = attr_string(e, b"ref")
                            .as_deref()
                            .and_then(parse_cell_range)
                        {
                            let (start_row, start_col, end_row, end_col) = range;
                            sheet.merges.push(MergeRange {
                                start_row,
                                start_col,
                                end_row,
                                end_col,
                            });
                        }
                    }

                    b"pageMargins" => {
                        let defaults = PageMargins::default();
                        sheet.margins = PageMargins {
                            left: attr_f64(e, b"left").unwrap_or(defaults.left),
                            right: attr_f64(e, b"right").unwrap_or(defaults.right),
                            top: attr_f64(e, b"top").unwrap_or(defaults.top),
                            bottom: attr_f64(e, b"bottom").unwrap_or(defaults.bottom),
                        };
                    }

                    b"pageSetup" => {
                        sheet.setup = PageSetup {
                            paper_size: attr_u32(e, b"paperSize"),
                            orientation: match attr_string(e, b"orientation").as_deref() {
                                Some("landscape") => Orientation::Landscape,
                                _ => Orientation::Portrait,
                            },
                        };
                    }

                    b"drawing" => {
                        sheet.drawing_rid = attr_string_local(e, b"id");
                    }

                    _ => {}
                }
            }
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"cols" => in_cols = false,
                b"row" => {
                    if let Some(row) = current_row.take() {
                        sheet.rows.push(row);
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {}
        }
        buf.clear();
    }

    if let Some(row) = current_row.take() {
        sheet.rows.push(row);
    }

    Ok(sheet)
}
