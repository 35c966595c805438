//! Per-cell output attribute assembly.
//!
//! Turns a grid cell and its resolved style into the attribute string
//! carried by the cell's table element. Emission order is fixed: spans,
//! alignment, font, fill, borders. A merge anchor draws its bottom and
//! right borders from the region's bottom-right cell style.

use crate::error::{Result, XlfoError};
use crate::grid::CellRecord;
use crate::types::{BorderEdge, CellKind, CellStyle, HAlign};

/// Build the attribute string for one non-hidden cell.
pub fn cell_attributes(record: &CellRecord, styles: &[CellStyle]) -> Result<String> {
    let mut attrib = String::new();

    if record.row_span > 1 {
        attrib.push_str(&format!(" number-rows-spanned=\"{}\" ", record.row_span));
    }
    if record.col_span >= 0 {
        attrib.push_str(&format!(" number-columns-spanned=\"{}\" ", record.col_span));
    }

    let Some(style_id) = record.style_id else {
        return Ok(attrib);
    };
    let style = lookup_style(styles, style_id)?;
    let bottom_right = match record.bottom_right_style {
        Some(id) => Some(lookup_style(styles, id)?),
        None => None,
    };

    push_alignment(&mut attrib, record, style);
    push_font(&mut attrib, style);
    push_fill(&mut attrib, style);
    push_borders(&mut attrib, style, bottom_right);

    Ok(attrib)
}

fn lookup_style(styles: &[CellStyle], id: u32) -> Result<&CellStyle> {
    styles.get(id as usize).ok_or_else(|| {
        XlfoError::Style(format!(
            "cell style index {id} outside resolved table of {}",
            styles.len()
        ))
    })
}

fn push_alignment(attrib: &mut String, record: &CellRecord, style: &CellStyle) {
    if let Some(v) = style.align_v {
        attrib.push_str(&format!(" display-align=\"{}\"", v.fo_value()));
    }
    match style.align_h {
        Some(h) => attrib.push_str(&format!(" text-align=\"{}\"", h.fo_value())),
        // Numbers lean right when the sheet says nothing.
        None if record.kind == CellKind::Number => {
            attrib.push_str(&format!(" text-align=\"{}\"", HAlign::Right.fo_value()));
        }
        None => {}
    }
}

fn push_font(attrib: &mut String, style: &CellStyle) {
    // The workbook default font is inherited from the page, not repeated
    // on every cell.
    let Some(font) = &style.font else {
        return;
    };
    attrib.push_str(&format!(" font-family=\"{}\"", font.family));
    attrib.push_str(&format!(" font-size=\"{}pt\"", fmt_font_size(font.size_pt)));
    if let Some(color) = &font.color {
        attrib.push_str(&format!(" color=\"{color}\""));
    }
    if font.bold {
        attrib.push_str(" font-weight=\"bold\"");
    }
    if font.italic {
        attrib.push_str(" font-style=\"italic\"");
    }
    if font.underline {
        attrib.push_str(" text-decoration=\"underline\"");
    }
}

fn push_fill(attrib: &mut String, style: &CellStyle) {
    if let Some(color) = &style.bg_color {
        attrib.push_str(&format!(" background-color=\"{color}\" "));
    }
}

fn push_borders(attrib: &mut String, style: &CellStyle, bottom_right: Option<&CellStyle>) {
    let bottom_edge = bottom_right
        .map(|s| &s.border_bottom)
        .unwrap_or(&style.border_bottom);
    let right_edge = bottom_right
        .map(|s| &s.border_right)
        .unwrap_or(&style.border_right);

    push_border_edge(attrib, "top", &style.border_top);
    push_border_edge(attrib, "left", &style.border_left);
    push_border_edge(attrib, "bottom", bottom_edge);
    push_border_edge(attrib, "right", right_edge);

    push_border_color(attrib, "top", &style.border_top);
    push_border_color(attrib, "left", &style.border_left);
    push_border_color(attrib, "bottom", bottom_edge);
    push_border_color(attrib, "right", right_edge);
}

fn push_border_edge(attrib: &mut String, side: &str, edge: &Option<BorderEdge>) {
    if let Some(edge) = edge {
        attrib.push_str(&format!(
            " border-{side}-style=\"{}\"",
            edge.kind.fo_style()
        ));
        attrib.push_str(&format!(
            " border-{side}-width=\"{}\"",
            edge.kind.fo_width()
        ));
    }
}

fn push_border_color(attrib: &mut String, side: &str, edge: &Option<BorderEdge>) {
    if let Some(color) = edge.as_ref().and_then(|e| e.color.as_ref()) {
        attrib.push_str(&format!(" border-{side}-color=\"{color}\""));
    }
}

/// Font sizes are whole points in almost every sheet; keep them short.
fn fmt_font_size(size: f64) -> String {
    if size.fract() == 0.0 {
        format!("{size:.0}")
    } else {
        format!("{size}")
    }
}
