// src/sheets/store/mod.rs
// Tabular storage primitives the submission pipeline writes through.

pub mod memory;

pub use memory::MemorySheetStore;

use super::error::StoreResult;

/// Horizontal alignment of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HorizontalAlign {
    #[default]
    General,
    Left,
    Center,
    Right,
}

impl HorizontalAlign {
    pub fn as_str(self) -> &'static str {
        match self {
            HorizontalAlign::General => "general",
            HorizontalAlign::Left => "left",
            HorizontalAlign::Center => "center",
            HorizontalAlign::Right => "right",
        }
    }

    /// Unknown names fall back to `General`.
    pub fn parse(name: &str) -> Self {
        match name {
            "left" => HorizontalAlign::Left,
            "center" => HorizontalAlign::Center,
            "right" => HorizontalAlign::Right,
            _ => HorizontalAlign::General,
        }
    }
}

/// Styling applied to every cell of a written range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellStyle {
    pub bold: bool,
    pub align: HorizontalAlign,
}

impl CellStyle {
    /// Header row: bold, centered.
    pub fn header() -> Self {
        Self {
            bold: true,
            align: HorizontalAlign::Center,
        }
    }

    /// Data row: normal weight, centered.
    pub fn data() -> Self {
        Self {
            bold: false,
            align: HorizontalAlign::Center,
        }
    }
}

/// Named 2-D grids addressed by 1-based row and column.
///
/// `row_count` and `column_count` report the last row/column holding a
/// non-empty value, so a sheet whose cells were all cleared counts as blank.
/// Every operation except `get_or_create_sheet` and `sheet_names` fails with
/// `SheetNotFound` for an unknown sheet.
pub trait SheetStore {
    /// Returns `true` when the sheet did not exist and was created.
    fn get_or_create_sheet(&mut self, name: &str) -> StoreResult<bool>;

    fn sheet_names(&self) -> StoreResult<Vec<String>>;

    /// Row 1 from column 1 up to its last non-empty cell.
    fn read_header_row(&self, sheet: &str) -> StoreResult<Vec<String>>;

    fn read_range(
        &self,
        sheet: &str,
        row: usize,
        column: usize,
        rows: usize,
        columns: usize,
    ) -> StoreResult<Vec<Vec<String>>>;

    fn cell_style(&self, sheet: &str, row: usize, column: usize) -> StoreResult<CellStyle>;

    fn write_range(
        &mut self,
        sheet: &str,
        row: usize,
        column: usize,
        values: &[Vec<String>],
        style: CellStyle,
    ) -> StoreResult<()>;

    /// Shift every row below `row` down by one, leaving a blank row at `row + 1`.
    fn insert_row_after(&mut self, sheet: &str, row: usize) -> StoreResult<()>;

    /// Empty `columns` cells of `row` starting at `column`. Styling is kept.
    fn clear_range(&mut self, sheet: &str, row: usize, column: usize, columns: usize)
        -> StoreResult<()>;

    fn row_count(&self, sheet: &str) -> StoreResult<usize>;

    fn column_count(&self, sheet: &str) -> StoreResult<usize>;

    fn frozen_row_count(&self, sheet: &str) -> StoreResult<usize>;

    fn set_frozen_rows(&mut self, sheet: &str, rows: usize) -> StoreResult<()>;
}

/// Reject the 0 coordinate, which no 1-based grid has.
pub(crate) fn check_origin(sheet: &str, row: usize, column: usize) -> StoreResult<()> {
    if row == 0 || column == 0 {
        return Err(super::error::StoreError::InvalidRange {
            sheet: sheet.to_string(),
            row,
            column,
        });
    }
    Ok(())
}
