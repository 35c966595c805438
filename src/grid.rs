//! Grid model: a dense row x column matrix of cells with resolved
//! geometry in points.
//!
//! The grid is built once from a parsed sheet and never mutated
//! afterwards. Merged regions are folded in during construction so that
//! each region has exactly one visible anchor carrying the span counts;
//! every other cell of the region is hidden. Row and column offsets are
//! kept as prefix sums so coordinate lookups are O(1).

use crate::parser::ParsedSheet;
use crate::types::CellKind;

/// Column width fallback in character units when neither the column run
/// nor sheetFormatPr declares one.
const DEFAULT_COL_WIDTH_CHARS: f64 = 8.43;

/// Row height fallback in points.
const DEFAULT_ROW_HEIGHT_PT: f64 = 15.0;

/// Width heuristic factor: characters to points, scaled by the default
/// font size.
const COL_WIDTH_FONT_FACTOR: f64 = 0.56;

/// An image reference written into a cell as `${src}{json}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineTag {
    /// The whole `${...}` token, used verbatim as the graphic source.
    pub src: String,
    /// The `{...}` parameter object, decoded later by the image placer.
    pub params: String,
}

/// One grid cell after merge resolution.
#[derive(Debug, Clone)]
pub struct CellRecord {
    pub value: String,
    pub kind: CellKind,
    pub is_formula: bool,
    /// Index into the resolved style table.
    pub style_id: Option<u32>,
    /// Style of the merge region's bottom-right cell. Set on anchors
    /// only; bottom and right borders are drawn from it.
    pub bottom_right_style: Option<u32>,
    /// Covered by a merge region and not its anchor.
    pub hidden: bool,
    /// Merge extent in rows. -1 outside merge anchors.
    pub row_span: i32,
    /// Merge extent in columns. -1 outside merge anchors.
    pub col_span: i32,
    pub inline_tag: Option<InlineTag>,
}

impl Default for CellRecord {
    fn default() -> Self {
        Self {
            value: String::new(),
            kind: CellKind::Blank,
            is_formula: false,
            style_id: None,
            bottom_right_style: None,
            hidden: false,
            row_span: -1,
            col_span: -1,
            inline_tag: None,
        }
    }
}

/// The resolved sheet grid.
#[derive(Debug, Clone, Default)]
pub struct Grid {
    pub rows: usize,
    pub cols: usize,
    /// Row-major, rows * cols entries.
    cells: Vec<CellRecord>,
    /// Heights in points, one per row.
    pub row_heights_pt: Vec<f64>,
    /// Widths in points, one per column.
    pub col_widths_pt: Vec<f64>,
    /// Prefix sums of heights, rows + 1 entries.
    row_offsets: Vec<f64>,
    /// Prefix sums of widths, cols + 1 entries.
    col_offsets: Vec<f64>,
}

impl Grid {
    /// Build the grid for a parsed sheet: dense matrix, merge spans and
    /// point geometry.
    pub fn build(sheet: &ParsedSheet) -> Self {
        let data = &sheet.data;

        let rows = data
            .rows
            .iter()
            .map(|r| r.index as usize + 1)
            .max()
            .unwrap_or(0);
        let cols = data
            .rows
            .iter()
            .flat_map(|r| r.cells.iter())
            .map(|c| c.col as usize + 1)
            .max()
            .unwrap_or(0);

        let mut cells = vec![CellRecord::default(); rows * cols];
        for row in &data.rows {
            for cell in &row.cells {
                let idx = row.index as usize * cols + cell.col as usize;
                let Some(record) = cells.get_mut(idx) else {
                    continue;
                };
                record.kind = cell.kind;
                record.is_formula = cell.is_formula;
                record.style_id = cell.style_id;
                if let Some(tag) = parse_inline_tag(&cell.value) {
                    record.inline_tag = Some(tag);
                    record.value = String::new();
                } else {
                    record.value = cell.value.clone();
                }
            }
        }

        let mut grid = Self {
            rows,
            cols,
            cells,
            row_heights_pt: Vec::new(),
            col_widths_pt: Vec::new(),
            row_offsets: Vec::new(),
            col_offsets: Vec::new(),
        };

        grid.apply_merges(sheet);

        let default_height = data.default_row_height.unwrap_or(DEFAULT_ROW_HEIGHT_PT);
        let mut heights = vec![default_height; rows];
        for row in &data.rows {
            if let (Some(h), Some(slot)) = (row.height, heights.get_mut(row.index as usize)) {
                *slot = h;
            }
        }
        grid.row_heights_pt = heights;

        let default_width = data.default_col_width.unwrap_or(DEFAULT_COL_WIDTH_CHARS);
        let base_pt = sheet.default_font.size_pt;
        grid.col_widths_pt = (0..cols)
            .map(|c| {
                let col = u32::try_from(c).unwrap_or(u32::MAX);
                let chars = data.col_width(col).unwrap_or(default_width);
                chars * base_pt * COL_WIDTH_FONT_FACTOR
            })
            .collect();

        grid.row_offsets = prefix_sums(&grid.row_heights_pt);
        grid.col_offsets = prefix_sums(&grid.col_widths_pt);
        grid
    }

    /// Fold the merged regions in, file order. Regions reaching outside
    /// the used range are clipped by the matrix bounds; overlapping
    /// regions keep the later region's spans.
    fn apply_merges(&mut self, sheet: &ParsedSheet) {
        for merge in &sheet.data.merges {
            for r in merge.start_row..=merge.end_row {
                for c in merge.start_col..=merge.end_col {
                    if let Some(cell) = self.cell_mut(r as usize, c as usize) {
                        cell.hidden = true;
                    }
                }
            }
            let row_span = i32::try_from(merge.end_row - merge.start_row + 1).unwrap_or(i32::MAX);
            let col_span = i32::try_from(merge.end_col - merge.start_col + 1).unwrap_or(i32::MAX);
            let bottom_right = self
                .cell(merge.end_row as usize, merge.end_col as usize)
                .and_then(|c| c.style_id);
            if let Some(anchor) = self.cell_mut(merge.start_row as usize, merge.start_col as usize)
            {
                anchor.hidden = false;
                anchor.row_span = row_span;
                anchor.col_span = col_span;
                anchor.bottom_right_style = bottom_right;
            }
        }
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&CellRecord> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells.get(row * self.cols + col)
    }

    fn cell_mut(&mut self, row: usize, col: usize) -> Option<&mut CellRecord> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells.get_mut(row * self.cols + col)
    }

    /// Top edge of a row in points. `row == rows` gives the table's
    /// bottom edge.
    pub fn row_top(&self, row: usize) -> f64 {
        self.row_offsets
            .get(row.min(self.rows))
            .copied()
            .unwrap_or(0.0)
    }

    /// Left edge of a column in points. `col == cols` gives the table's
    /// right edge.
    pub fn col_left(&self, col: usize) -> f64 {
        self.col_offsets
            .get(col.min(self.cols))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn row_height(&self, row: usize) -> f64 {
        self.row_heights_pt.get(row).copied().unwrap_or(0.0)
    }

    /// Sum of all column widths in points.
    pub fn table_width(&self) -> f64 {
        self.col_left(self.cols)
    }
}

fn prefix_sums(values: &[f64]) -> Vec<f64> {
    let mut sums = Vec::with_capacity(values.len() + 1);
    let mut acc = 0.0;
    sums.push(acc);
    for v in values {
        acc += v;
        sums.push(acc);
    }
    sums
}

/// Recognize a `${src}{json}` image tag anywhere in a cell value.
fn parse_inline_tag(value: &str) -> Option<InlineTag> {
    let start = value.find("${")?;
    let after_src = value.get(start..)?;
    let src_end = after_src.find('}')?;
    let src = after_src.get(..=src_end)?;
    if src.len() <= "${}".len() {
        return None;
    }
    let rest = after_src.get(src_end + 1..)?;
    if !rest.starts_with('{') {
        return None;
    }
    let params_end = rest.find('}')?;
    let params = rest.get(..=params_end)?;
    if params.len() <= "{}".len() {
        return None;
    }
    Some(InlineTag {
        src: src.to_string(),
        params: params.to_string(),
    })
}
