//! XSL-FO serialization.
//!
//! Assembles the final document from the grid, the placed images and the
//! page geometry: one layout-master-set, one fixed-layout table, then an
//! absolutely positioned block-container per image.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use quick_xml::escape::escape;

use crate::attrs::cell_attributes;
use crate::error::Result;
use crate::grid::Grid;
use crate::images::{ImageRecord, ImageSource};
use crate::page::PageGeometry;
use crate::parser::ParsedSheet;

/// Render the whole FO document.
pub fn render(
    sheet: &ParsedSheet,
    grid: &Grid,
    images: &[ImageRecord],
    page: &PageGeometry,
) -> Result<String> {
    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str("<fo:root xmlns:fo=\"http://www.w3.org/1999/XSL/Format\" xml:lang=\"ja\">\n");

    push_page_master(&mut out, page);

    out.push_str(&format!(
        "\t<fo:page-sequence initial-page-number=\"1\" master-reference=\"PageMaster\" \
         font-family=\"{}\" font-size=\"{}pt\">\n",
        escape(&sheet.default_font.family),
        fmt_short(sheet.default_font.size_pt)
    ));
    out.push_str("\t\t<fo:flow flow-name=\"xsl-region-body\">\n");
    out.push_str("\t\t\t<fo:block  space-before=\"1em\" >\n");

    push_table(&mut out, sheet, grid)?;
    for image in images {
        push_image(&mut out, image);
    }

    out.push_str("\t\t\t</fo:block>\n");
    out.push_str("\t\t</fo:flow>\n");
    out.push_str("\t</fo:page-sequence>\n");
    out.push_str("</fo:root>\n");
    Ok(out)
}

fn push_page_master(out: &mut String, page: &PageGeometry) {
    out.push_str("\t<fo:layout-master-set>\n");
    out.push_str(&format!(
        "\t\t<fo:simple-page-master page-height=\"{}mm\" page-width=\"{}mm\" \
         margin-top=\"0mm\" margin-left=\"0mm\" margin-right=\"0mm\" margin-bottom=\"0mm\" \
         master-name=\"PageMaster\">\n",
        fmt_short(page.height_mm),
        fmt_short(page.width_mm)
    ));
    out.push_str(&format!(
        "\t\t\t<fo:region-body margin-top=\"{}pt\" margin-left=\"{}pt\" \
         margin-right=\"{}pt\" margin-bottom=\"{}pt\"/>\n",
        fmt_pt(page.margin_top_pt),
        fmt_pt(page.margin_left_pt),
        fmt_pt(page.margin_right_pt),
        fmt_pt(page.margin_bottom_pt)
    ));
    out.push_str("\t\t</fo:simple-page-master>\n");
    out.push_str("\t</fo:layout-master-set>\n");
}

fn push_table(out: &mut String, sheet: &ParsedSheet, grid: &Grid) -> Result<()> {
    out.push_str(&format!(
        "\t\t\t\t<fo:table inline-progression-dimension=\"{}pt\" table-layout=\"fixed\">\n",
        fmt_pt(grid.table_width())
    ));
    for (i, width) in grid.col_widths_pt.iter().enumerate() {
        out.push_str(&format!(
            "\t\t\t\t\t<fo:table-column column-number=\"{}\" column-width=\"{}pt\" />\n",
            i + 1,
            fmt_pt(*width)
        ));
    }
    out.push_str("\t\t\t\t\t<fo:table-body>\n");
    for r in 0..grid.rows {
        out.push_str(&format!(
            "\t\t\t\t\t\t<fo:table-row height=\"{}pt\">\n",
            fmt_pt(grid.row_height(r))
        ));
        for c in 0..grid.cols {
            let Some(cell) = grid.cell(r, c) else {
                continue;
            };
            if cell.hidden {
                continue;
            }
            let attrib = cell_attributes(cell, &sheet.styles)?;
            out.push_str(&format!("\t\t\t\t\t\t\t<fo:table-cell{attrib}>\n"));
            out.push_str("\t\t\t\t\t\t\t\t<fo:block margin-left=\"1mm\">");
            out.push_str(&escape(&cell.value));
            out.push_str("</fo:block>\n");
            out.push_str("\t\t\t\t\t\t\t</fo:table-cell>\n");
        }
        out.push_str("\t\t\t\t\t\t</fo:table-row>\n");
    }
    out.push_str("\t\t\t\t\t</fo:table-body>\n");
    out.push_str("\t\t\t\t</fo:table>\n");
    Ok(())
}

fn push_image(out: &mut String, image: &ImageRecord) {
    let w = fmt_pt(image.width);
    let h = fmt_pt(image.height);
    out.push_str(&format!(
        "\t\t\t\t<fo:block-container position=\"absolute\" top=\"{}pt\" left=\"{}pt\" \
         width=\"{w}pt\" height=\"{h}pt\">\n",
        fmt_pt(image.top),
        fmt_pt(image.left)
    ));
    let (src, border_width) = match &image.source {
        ImageSource::Embedded { data, mime } => {
            (format!("data:{mime};base64,{}", STANDARD.encode(data)), "thin")
        }
        ImageSource::External { src } => (escape(src).into_owned(), "0mm"),
    };
    out.push_str(&format!(
        "\t\t\t\t\t<fo:block><fo:external-graphic src=\"{src}\" width=\"{w}pt\" \
         height=\"{h}pt\" content-width=\"{w}pt\" content-height=\"{h}pt\" \
         border-style=\"dotted\" border-width=\"{border_width}\" scaling=\"{}\"/></fo:block>\n",
        image.scaling.fo_value()
    ));
    out.push_str("\t\t\t\t</fo:block-container>\n");
}

/// Point measurements keep one decimal for whole values, shortest form
/// otherwise.
fn fmt_pt(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 {
        format!("{v:.1}")
    } else {
        format!("{v}")
    }
}

/// Whole-number friendly form for font sizes and page dimensions.
fn fmt_short(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        format!("{v}")
    }
}
