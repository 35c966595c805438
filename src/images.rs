//! Absolute image placement.
//!
//! Produces one ordered list of image records: embedded pictures in
//! drawing order first, then inline `${src}{json}` tags in row-major
//! cell order. All coordinates are points relative to the table origin.

use serde::Deserialize;

use crate::error::{Result, XlfoError};
use crate::grid::Grid;
use crate::parser::ParsedSheet;

/// EMU per point, the drawing offset unit.
pub const EMU_PER_POINT: f64 = 12700.0;

/// How the graphic fills its box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scaling {
    Uniform,
    NonUniform,
}

impl Scaling {
    pub const fn fo_value(self) -> &'static str {
        match self {
            Self::Uniform => "uniform",
            Self::NonUniform => "non-uniform",
        }
    }
}

/// Where the graphic bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Picture payload read from the archive's media directory.
    Embedded { data: Vec<u8>, mime: String },
    /// The literal `${...}` token of an inline tag, resolved by the
    /// formatter downstream.
    External { src: String },
}

/// One absolutely positioned image, in points.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRecord {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
    pub source: ImageSource,
    pub scaling: Scaling,
}

/// Inline tag parameter object. Footprint is in grid units from the
/// cell's own position; dx/dy are point offsets on the corners.
#[derive(Debug, Deserialize)]
#[serde(default)]
struct InlineParams {
    rows: u32,
    columns: u32,
    dx1: f64,
    dy1: f64,
    dx2: f64,
    dy2: f64,
    aspect: Option<String>,
}

impl Default for InlineParams {
    fn default() -> Self {
        Self {
            rows: 1,
            columns: 1,
            dx1: 0.0,
            dy1: 0.0,
            dx2: 0.0,
            dy2: 0.0,
            aspect: None,
        }
    }
}

/// Compute placement for every image on the sheet.
pub fn place_images(sheet: &ParsedSheet, grid: &Grid) -> Result<Vec<ImageRecord>> {
    let mut records = Vec::new();

    for anchor in &sheet.anchors {
        let Some(rid) = anchor.embed_rid.as_ref() else {
            continue;
        };
        let Some(media) = sheet.media.get(rid) else {
            log::warn!("no media payload for picture relationship {rid}");
            continue;
        };

        let from = &anchor.from;
        let top = grid.row_top(from.row as usize) + from.row_off_emu as f64 / EMU_PER_POINT;
        let left = grid.col_left(from.col as usize) + from.col_off_emu as f64 / EMU_PER_POINT;
        let (bottom, right) = if let Some(to) = &anchor.to {
            (
                grid.row_top(to.row as usize) + to.row_off_emu as f64 / EMU_PER_POINT,
                grid.col_left(to.col as usize) + to.col_off_emu as f64 / EMU_PER_POINT,
            )
        } else if let Some((cx, cy)) = anchor.extent {
            (
                top + cy as f64 / EMU_PER_POINT,
                left + cx as f64 / EMU_PER_POINT,
            )
        } else {
            log::warn!("picture {rid} has neither a second anchor nor an extent");
            continue;
        };

        records.push(ImageRecord {
            top,
            left,
            width: right - left + 1.0,
            height: bottom - top + 1.0,
            source: ImageSource::Embedded {
                data: media.data.clone(),
                mime: media.mime.clone(),
            },
            scaling: Scaling::NonUniform,
        });
    }

    for r in 0..grid.rows {
        for c in 0..grid.cols {
            let Some(cell) = grid.cell(r, c) else {
                continue;
            };
            if cell.hidden {
                continue;
            }
            let Some(tag) = &cell.inline_tag else {
                continue;
            };
            records.push(place_inline(grid, r, c, &tag.src, &tag.params)?);
        }
    }

    log::debug!("{} images placed", records.len());
    Ok(records)
}

fn place_inline(grid: &Grid, row: usize, col: usize, src: &str, json: &str) -> Result<ImageRecord> {
    let params: InlineParams = serde_json::from_str(json)
        .map_err(|e| XlfoError::ImageParameter(format!("{src}: {e}")))?;

    let r1 = row + params.rows as usize;
    let c1 = col + params.columns as usize;

    let top = grid.row_top(row) + params.dy1;
    let left = grid.col_left(col) + params.dx1;
    let bottom = grid.row_top(r1) + params.dy2;
    let right = grid.col_left(c1) + params.dx2;

    let scaling = match params.aspect.as_deref() {
        Some("image") => Scaling::Uniform,
        _ => Scaling::NonUniform,
    };

    Ok(ImageRecord {
        top,
        left,
        width: right - left + 1.0,
        height: bottom - top + 1.0,
        source: ImageSource::External {
            src: src.to_string(),
        },
        scaling,
    })
}
