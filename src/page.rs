//! Page geometry: paper size, orientation and margins.

use crate::types::{Orientation, PageMargins, PageSetup};

/// ECMA-376 `pageSetup` paper size codes this tool knows. Anything else
/// falls back to A4.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaperSize {
    Letter,
    Tabloid,
    Legal,
    Statement,
    Executive,
    A3,
    A4,
    A5,
    B4,
    B5,
}

impl PaperSize {
    pub const fn from_code(code: Option<u32>) -> Self {
        match code {
            Some(1) => Self::Letter,
            Some(3) => Self::Tabloid,
            Some(5) => Self::Legal,
            Some(6) => Self::Statement,
            Some(7) => Self::Executive,
            Some(8) => Self::A3,
            Some(11) => Self::A5,
            Some(12) => Self::B4,
            Some(13) => Self::B5,
            _ => Self::A4,
        }
    }

    /// Portrait (width, height) in millimeters.
    pub const fn dims_mm(self) -> (f64, f64) {
        match self {
            Self::Letter => (215.9, 279.4),
            Self::Tabloid => (279.4, 431.8),
            Self::Legal => (215.9, 355.6),
            Self::Statement => (139.7, 215.9),
            Self::Executive => (184.1, 266.7),
            Self::A3 => (297.0, 420.0),
            Self::A4 => (210.0, 297.0),
            Self::A5 => (148.0, 210.0),
            Self::B4 => (250.0, 354.0),
            Self::B5 => (182.0, 257.0),
        }
    }
}

/// Resolved physical page: dimensions in millimeters, margins in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width_mm: f64,
    pub height_mm: f64,
    pub margin_top_pt: f64,
    pub margin_bottom_pt: f64,
    pub margin_left_pt: f64,
    pub margin_right_pt: f64,
}

/// Resolve the sheet's print setup into physical page geometry.
pub fn resolve_page(setup: &PageSetup, margins: &PageMargins) -> PageGeometry {
    let (w, h) = PaperSize::from_code(setup.paper_size).dims_mm();
    let (width_mm, height_mm) = match setup.orientation {
        Orientation::Portrait => (w, h),
        Orientation::Landscape => (h, w),
    };
    PageGeometry {
        width_mm,
        height_mm,
        margin_top_pt: margins.top * 72.0,
        margin_bottom_pt: margins.bottom * 72.0,
        margin_left_pt: margins.left * 72.0,
        margin_right_pt: margins.right * 72.0,
    }
}
