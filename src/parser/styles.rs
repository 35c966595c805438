//! Parsing of xl/styles.xml and resolution into the per-cell style table.

use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::BufRead;

use crate::color::resolve_color;
use crate::error::{Result, XlfoError};
use crate::types::{
    BorderEdge, BorderKind, CellStyle, CellXf, FontSpec, HAlign, RawAlignment, RawBorder,
    RawBorderSide, RawFill, RawFont, StyleSheet, VAlign,
};
use crate::xml_helpers::{attr_string, attr_u32, parse_color_attrs};

/// Parse a styles.xml part into raw stylesheet records.
#[allow(clippy::too_many_lines)]
pub fn parse_styles<R: BufRead>(reader: R) -> Result<StyleSheet> {
    let mut xml = Reader::from_reader(reader);
    xml.trim_text(true);

    let mut stylesheet = StyleSheet::default();
    let mut buf = Vec::new();

    let mut in_fonts = false;
    let mut in_fills = false;
    let mut in_borders = false;
    let mut in_cell_xfs = false;
    let mut in_num_fmts = false;
    let mut in_colors = false;
    let mut in_indexed_colors = false;

    let mut current_font: Option<RawFont> = None;
    let mut current_fill: Option<RawFill> = None;
    let mut current_border: Option<RawBorder> = None;
    let mut current_xf: Option<CellXf> = None;
    let mut current_border_side: Option<String> = None;
    let mut indexed_colors: Vec<String> = Vec::new();

    loop {
        match xml.read_event_into(&mut buf) {
            Ok(ref event @ (Event::Start(ref e) | Event::Empty(ref e))) => {
                let is_empty = matches!(event, Event::Empty(_));
                let name = e.local_name();
                let name_str = std::str::from_utf8(name.as_ref()).unwrap_or("");

                match name_str {
                    "numFmts" => in_num_fmts = true,
                    "fonts" => in_fonts = true,
                    "fills" => in_fills = true,
                    "borders" => in_borders = true,
                    "cellXfs" => in_cell_xfs = true,
                    "colors" => in_colors = true,
                    "indexedColors" if in_colors => in_indexed_colors = true,

                    "rgbColor" if in_indexed_colors => {
                        if let Some(rgb) = attr_string(e, b"rgb") {
                            // ARGB in the file; strip the alpha byte.
                            let color = match rgb.len() {
                                8 => rgb.get(2..).map_or_else(
                                    || format!("#{rgb}"),
                                    |tail| format!("#{tail}"),
                                ),
                                _ => format!("#{rgb}"),
                            };
                            indexed_colors.push(color);
                        }
                    }

                    "numFmt" if in_num_fmts => {
                        let id = attr_u32(e, b"numFmtId").unwrap_or(0);
                        let code = attr_string(e, b"formatCode").unwrap_or_default();
                        stylesheet.num_fmts.push((id, code));
                    }

                    "font" if in_fonts => {
                        current_font = Some(RawFont::default());
                        if is_empty {
                            if let Some(font) = current_font.take() {
                                stylesheet.fonts.push(font);
                            }
                        }
                    }
                    "sz" if current_font.is_some() => {
                        if let Some(ref mut font) = current_font {
                            font.size = attr_string(e, b"val").and_then(|s| s.parse().ok());
                        }
                    }
                    "name" if current_font.is_some() => {
                        if let Some(ref mut font) = current_font {
                            font.name = attr_string(e, b"val");
                        }
                    }
                    "b" if current_font.is_some() => {
                        if let Some(ref mut font) = current_font {
                            font.bold = attr_string(e, b"val").map_or(true, |v| v != "0");
                        }
                    }
                    "i" if current_font.is_some() => {
                        if let Some(ref mut font) = current_font {
                            font.italic = attr_string(e, b"val").map_or(true, |v| v != "0");
                        }
                    }
                    "u" if current_font.is_some() => {
                        if let Some(ref mut font) = current_font {
                            font.underline =
                                attr_string(e, b"val").map_or(true, |v| v != "none");
                        }
                    }
                    "color" if current_font.is_some() && current_border_side.is_none() => {
                        if let Some(ref mut font) = current_font {
                            font.color = Some(parse_color_attrs(e));
                        }
                    }

                    "fill" if in_fills => {
                        current_fill = Some(RawFill::default());
                    }
                    "patternFill" if current_fill.is_some() => {
                        if let Some(ref mut fill) = current_fill {
                            fill.pattern_type = attr_string(e, b"patternType");
                        }
                    }
                    "fgColor" if current_fill.is_some() => {
                        if let Some(ref mut fill) = current_fill {
                            fill.fg_color = Some(parse_color_attrs(e));
                        }
                    }

                    "border" if in_borders => {
                        if is_empty {
                            stylesheet.borders.push(RawBorder::default());
                        } else {
                            current_border = Some(RawBorder::default());
                        }
                    }
                    "left" | "right" | "top" | "bottom" if current_border.is_some() => {
                        current_border_side = Some(name_str.to_string());
                        let side = attr_string(e, b"style")
                            .as_deref()
                            .and_then(BorderKind::from_attr)
                            .map(|kind| RawBorderSide { kind, color: None });
                        if let Some(ref mut border) = current_border {
                            match name_str {
                                "left" => border.left = side,
                                "right" => border.right = side,
                                "top" => border.top = side,
                                _ => border.bottom = side,
                            }
                        }
                        if is_empty {
                            current_border_side = None;
                        }
                    }
                    "color" if current_border_side.is_some() => {
                        let color = parse_color_attrs(e);
                        if let (Some(ref mut border), Some(ref side_name)) =
                            (current_border.as_mut(), current_border_side.as_ref())
                        {
                            let side = match side_name.as_str() {
                                "right" => &mut border.right,
                                "top" => &mut border.top,
                                "bottom" => &mut border.bottom,
                                _ => &mut border.left,
                            };
                            if let Some(ref mut s) = side {
                                s.color = Some(color);
                            }
                        }
                    }

                    "xf" if in_cell_xfs => {
                        let xf = CellXf {
                            font_id: attr_u32(e, b"fontId"),
                            fill_id: attr_u32(e, b"fillId"),
                            border_id: attr_u32(e, b"borderId"),
                            num_fmt_id: attr_u32(e, b"numFmtId"),
                            alignment: None,
                        };
                        if is_empty {
                            stylesheet.cell_xfs.push(xf);
                        } else {
                            current_xf = Some(xf);
                        }
                    }
                    "alignment" if current_xf.is_some() => {
                        if let Some(ref mut xf) = current_xf {
                            xf.alignment = Some(RawAlignment {
                                horizontal: attr_string(e, b"horizontal"),
                                vertical: attr_string(e, b"vertical"),
                            });
                        }
                    }

                    _ => {}
                }
            }
            Ok(Event::End(ref e)) => {
                let name = e.local_name();
                match name.as_ref() {
                    b"numFmts" => in_num_fmts = false,
                    b"fonts" => in_fonts = false,
                    b"fills" => in_fills = false,
                    b"borders" => in_borders = false,
                    b"cellXfs" => in_cell_xfs = false,
                    b"colors" => in_colors = false,
                    b"indexedColors" => in_indexed_colors = false,
                    b"font" => {
                        if let Some(font) = current_font.take() {
                            if in_fonts {
                                stylesheet.fonts.push(font);
                            }
                        }
                    }
                    b"fill" => {
                        if let Some(fill) = current_fill.take() {
                            stylesheet.fills.push(fill);
                        }
                    }
                    b"border" => {
                        if let Some(border) = current_border.take() {
                            stylesheet.borders.push(border);
                        }
                    }
                    b"left" | b"right" | b"top" | b"bottom" => {
                        current_border_side = None;
                    }
                    b"xf" => {
                        if let Some(xf) = current_xf.take() {
                            if in_cell_xfs {
                                stylesheet.cell_xfs.push(xf);
                            }
                        }
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

    if !indexed_colors.is_empty() {
        stylesheet.indexed_colors = Some(indexed_colors);
    }

    Ok(stylesheet)
}

fn resolve_edge(
    side: Option<&RawBorderSide>,
    theme: &[String],
    indexed: Option<&Vec<String>>,
) -> Option<BorderEdge> {
    side.map(|s| BorderEdge {
        kind: s.kind,
        color: s
            .color
            .as_ref()
            .and_then(|c| resolve_color(c, theme, indexed)),
    })
}

/// Resolve the raw stylesheet into one `CellStyle` per cellXf entry.
///
/// Font index 0 is the workbook default; cells on it carry no font
/// attributes, so its entry resolves to `font: None`.
pub fn resolve_styles(stylesheet: &StyleSheet, theme: &[String]) -> Result<Vec<CellStyle>> {
    let indexed = stylesheet.indexed_colors.as_ref();
    let mut table = Vec::with_capacity(stylesheet.cell_xfs.len());

    for xf in &stylesheet.cell_xfs {
        let font = match xf.font_id {
            None | Some(0) => None,
            Some(id) => {
                let raw = stylesheet.fonts.get(id as usize).ok_or_else(|| {
                    XlfoError::Style(format!(
                        "font id {id} out of range ({} fonts)",
                        stylesheet.fonts.len()
                    ))
                })?;
                Some(FontSpec {
                    family: raw.name.clone().unwrap_or_else(|| "Calibri".to_string()),
                    size_pt: raw.size.unwrap_or(11.0),
                    color: raw
                        .color
                        .as_ref()
                        .and_then(|c| resolve_color(c, theme, indexed)),
                    bold: raw.bold,
                    italic: raw.italic,
                    underline: raw.underline,
                })
            }
        };

        let bg_color = match xf.fill_id {
            None => None,
            Some(id) => {
                let fill = stylesheet.fills.get(id as usize).ok_or_else(|| {
                    XlfoError::Style(format!(
                        "fill id {id} out of range ({} fills)",
                        stylesheet.fills.len()
                    ))
                })?;
                // none and gray125 are Excel's reserved first two fills.
                match fill.pattern_type.as_deref() {
                    Some("none") | None => None,
                    _ => fill
                        .fg_color
                        .as_ref()
                        .and_then(|c| resolve_color(c, theme, indexed)),
                }
            }
        };

        let (border_top, border_left, border_bottom, border_right) = match xf.border_id {
            None => (None, None, None, None),
            Some(id) => {
                let border = stylesheet.borders.get(id as usize).ok_or_else(|| {
                    XlfoError::Style(format!(
                        "border id {id} out of range ({} borders)",
                        stylesheet.borders.len()
                    ))
                })?;
                (
                    resolve_edge(border.top.as_ref(), theme, indexed),
                    resolve_edge(border.left.as_ref(), theme, indexed),
                    resolve_edge(border.bottom.as_ref(), theme, indexed),
                    resolve_edge(border.right.as_ref(), theme, indexed),
                )
            }
        };

        let num_fmt = match xf.num_fmt_id {
            None | Some(0) => None,
            Some(id) => stylesheet.format_code(id).map(|code| code.to_string()),
        };

        let align_h = xf
            .alignment
            .as_ref()
            .and_then(|a| a.horizontal.as_deref())
            .and_then(HAlign::from_attr);
        let align_v = xf
            .alignment
            .as_ref()
            .and_then(|a| a.vertical.as_deref())
            .and_then(VAlign::from_attr);

        table.push(CellStyle {
            font,
            bg_color,
            align_h,
            align_v,
            border_top,
            border_left,
            border_bottom,
            border_right,
            num_fmt,
        });
    }

    Ok(table)
}
