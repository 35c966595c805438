//! Worksheet types: cells, rows, merges, column widths and print setup.

/// The kind of a cell's displayed value.
///
/// A formula cell takes the kind of its cached result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellKind {
    #[default]
    Blank,
    Text,
    Number,
    Boolean,
    Error,
}

/// One parsed cell.
#[derive(Debug, Clone, Default)]
pub struct Cell {
    /// 0-indexed column.
    pub col: u32,
    /// Display value, already formatted through the cell's number format.
    pub value: String,
    pub kind: CellKind,
    pub is_formula: bool,
    /// cellXf index into the resolved style table.
    pub style_id: Option<u32>,
}

/// One parsed row. Rows absent from the file do not appear here.
#[derive(Debug, Clone, Default)]
pub struct Row {
    /// 0-indexed row.
    pub index: u32,
    /// Explicit height in points (`ht` attribute).
    pub height: Option<f64>,
    pub cells: Vec<Cell>,
}

/// A merged region, 0-indexed and inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeRange {
    pub start_row: u32,
    pub start_col: u32,
    pub end_row: u32,
    pub end_col: u32,
}

/// A `<col>` width declaration covering columns `min..=max` (0-indexed).
/// Width is in character units.
#[derive(Debug, Clone, Copy)]
pub struct ColSpec {
    pub min: u32,
    pub max: u32,
    pub width: f64,
}

/// Print margins in inches. Excel's defaults apply when the part carries
/// no `<pageMargins>`.
#[derive(Debug, Clone, Copy)]
pub struct PageMargins {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Default for PageMargins {
    fn default() -> Self {
        Self {
            left: 0.7,
            right: 0.7,
            top: 0.75,
            bottom: 0.75,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// `<pageSetup>` subset: paper size code and orientation.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageSetup {
    pub paper_size: Option<u32>,
    pub orientation: Orientation,
}

/// Everything parsed from one worksheet part.
#[derive(Debug, Clone, Default)]
pub struct SheetData {
    pub rows: Vec<Row>,
    pub merges: Vec<MergeRange>,
    pub col_specs: Vec<ColSpec>,
    /// `defaultRowHeight` from sheetFormatPr, points.
    pub default_row_height: Option<f64>,
    /// `defaultColWidth` from sheetFormatPr, character units.
    pub default_col_width: Option<f64>,
    pub margins: PageMargins,
    pub setup: PageSetup,
    /// r:id of the sheet's drawing part, when one is referenced.
    pub drawing_rid: Option<String>,
}

impl SheetData {
    /// Explicit width for a 0-indexed column, if any `<col>` run covers it.
    pub fn col_width(&self, col: u32) -> Option<f64> {
        self.col_specs
            .iter()
            .find(|spec| spec.min <= col && col <= spec.max)
            .map(|spec| spec.width)
    }
}

/// A workbook sheet entry from workbook.xml.
#[derive(Debug, Clone)]
pub struct SheetEntry {
    pub name: String,
    pub rid: String,
}
