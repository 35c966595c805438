//! Conversion pipeline: XLSX bytes in, XSL-FO text out.

use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::fo;
use crate::grid::Grid;
use crate::images::place_images;
use crate::page::resolve_page;
use crate::parser::parse_workbook_sheet;

/// One-sheet XLSX to XSL-FO converter.
///
/// A converter is cheap to construct and holds no state between runs;
/// every conversion owns its buffers and drops them on return, success
/// or failure. Any error aborts the whole run, partial output is never
/// produced.
#[derive(Debug, Clone, Copy, Default)]
pub struct Converter {
    /// 0-based workbook sheet index.
    pub sheet_index: usize,
}

impl Converter {
    pub fn new(sheet_index: usize) -> Self {
        Self { sheet_index }
    }

    /// Convert an in-memory XLSX document to an FO string.
    pub fn convert(&self, bytes: &[u8]) -> Result<String> {
        let sheet = parse_workbook_sheet(bytes, self.sheet_index)?;
        log::debug!("sheet '{}' parsed", sheet.name);

        let grid = Grid::build(&sheet);
        log::debug!("grid {} x {}", grid.rows, grid.cols);

        let images = place_images(&sheet, &grid)?;
        let page = resolve_page(&sheet.data.setup, &sheet.data.margins);

        fo::render(&sheet, &grid, &images, &page)
    }

    /// Convert a file on disk. The output file is written only after the
    /// whole document rendered.
    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(&self, input: P, output: Q) -> Result<()> {
        let bytes = fs::read(input)?;
        let document = self.convert(&bytes)?;
        fs::write(output, document)?;
        Ok(())
    }
}
