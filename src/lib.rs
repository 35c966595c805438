//! xlfo - XLSX to XSL-FO converter
//!
//! Turns one sheet of a styled Excel workbook into an XSL-FO draft:
//! - Fixed-layout table mirroring the sheet's rows, columns and merges
//! - Resolved fonts, fills, borders and alignment per cell
//! - Number and date formats applied to displayed values
//! - Embedded pictures and `${src}{json}` inline image tags placed
//!   absolutely in points
//! - Page master from the sheet's paper size, orientation and margins
//!
//! # Usage
//!
//! ```no_run
//! use xlfo::Converter;
//!
//! # fn main() -> xlfo::Result<()> {
//! let converter = Converter::new(0);
//! converter.convert_file("report.xlsx", "report.fo")?;
//! # Ok(())
//! # }
//! ```

// Parsing modules
pub mod cell_ref;
pub mod color;
pub mod drawings;
pub mod error;
pub mod numfmt;
pub mod parser;
pub mod types;
pub mod xml_helpers;

// Layout and rendering modules
pub mod attrs;
pub mod convert;
pub mod fo;
pub mod grid;
pub mod images;
pub mod page;

pub use convert::Converter;
pub use error::{Result, XlfoError};
pub use grid::Grid;
pub use images::{ImageRecord, ImageSource, Scaling};
pub use page::{PageGeometry, PaperSize};
pub use types::*;
