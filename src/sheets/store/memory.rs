// src/sheets/store/memory.rs

use indexmap::IndexMap;

use super::{check_origin, CellStyle, SheetStore};
use crate::sheets::error::{StoreError, StoreResult};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Cell {
    value: String,
    style: CellStyle,
}

#[derive(Debug, Default)]
struct MemorySheet {
    /// `rows[0]` is row 1. Rows are ragged; missing cells are blank.
    rows: Vec<Vec<Cell>>,
    frozen_rows: usize,
}

impl MemorySheet {
    fn cell(&self, row: usize, column: usize) -> Option<&Cell> {
        self.rows.get(row - 1).and_then(|r| r.get(column - 1))
    }

    fn cell_mut(&mut self, row: usize, column: usize) -> &mut Cell {
        if self.rows.len() < row {
            self.rows.resize_with(row, Vec::new);
        }
        let cells = &mut self.rows[row - 1];
        if cells.len() < column {
            cells.resize_with(column, Cell::default);
        }
        &mut cells[column - 1]
    }

    fn last_row(&self) -> usize {
        self.rows
            .iter()
            .rposition(|r| r.iter().any(|c| !c.value.is_empty()))
            .map_or(0, |i| i + 1)
    }

    fn last_column(&self) -> usize {
        self.rows
            .iter()
            .filter_map(|r| r.iter().rposition(|c| !c.value.is_empty()))
            .max()
            .map_or(0, |i| i + 1)
    }
}

/// Sheets held in process memory. Contents are lost when the store is dropped.
#[derive(Debug, Default)]
pub struct MemorySheetStore {
    sheets: IndexMap<String, MemorySheet>,
}

impl MemorySheetStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn sheet(&self, name: &str) -> StoreResult<&MemorySheet> {
        self.sheets
            .get(name)
            .ok_or_else(|| StoreError::SheetNotFound(name.to_string()))
    }

    fn sheet_mut(&mut self, name: &str) -> StoreResult<&mut MemorySheet> {
        self.sheets
            .get_mut(name)
            .ok_or_else(|| StoreError::SheetNotFound(name.to_string()))
    }
}

impl SheetStore for MemorySheetStore {
    fn get_or_create_sheet(&mut self, name: &str) -> StoreResult<bool> {
        if self.sheets.contains_key(name) {
            return Ok(false);
        }
        self.sheets.insert(name.to_string(), MemorySheet::default());
        Ok(true)
    }

    fn sheet_names(&self) -> StoreResult<Vec<String>> {
        Ok(self.sheets.keys().cloned().collect())
    }

    fn read_header_row(&self, sheet: &str) -> StoreResult<Vec<String>> {
        let data = self.sheet(sheet)?;
        let Some(first) = data.rows.first() else {
            return Ok(Vec::new());
        };
        let width = first
            .iter()
            .rposition(|c| !c.value.is_empty())
            .map_or(0, |i| i + 1);
        Ok(first[..width].iter().map(|c| c.value.clone()).collect())
    }

    fn read_range(
        &self,
        sheet: &str,
        row: usize,
        column: usize,
        rows: usize,
        columns: usize,
    ) -> StoreResult<Vec<Vec<String>>> {
        check_origin(sheet, row, column)?;
        let data = self.sheet(sheet)?;
        Ok((row..row + rows)
            .map(|r| {
                (column..column + columns)
                    .map(|c| data.cell(r, c).map(|cell| cell.value.clone()).unwrap_or_default())
                    .collect()
            })
            .collect())
    }

    fn cell_style(&self, sheet: &str, row: usize, column: usize) -> StoreResult<CellStyle> {
        check_origin(sheet, row, column)?;
        let data = self.sheet(sheet)?;
        Ok(data.cell(row, column).map(|c| c.style).unwrap_or_default())
    }

    fn write_range(
        &mut self,
        sheet: &str,
        row: usize,
        column: usize,
        values: &[Vec<String>],
        style: CellStyle,
    ) -> StoreResult<()> {
        check_origin(sheet, row, column)?;
        let data = self.sheet_mut(sheet)?;
        for (dr, line) in values.iter().enumerate() {
            for (dc, value) in line.iter().enumerate() {
                *data.cell_mut(row + dr, column + dc) = Cell {
                    value: value.clone(),
                    style,
                };
            }
        }
        Ok(())
    }

    fn insert_row_after(&mut self, sheet: &str, row: usize) -> StoreResult<()> {
        let data = self.sheet_mut(sheet)?;
        if row < data.rows.len() {
            data.rows.insert(row, Vec::new());
        }
        Ok(())
    }

    fn clear_range(
        &mut self,
        sheet: &str,
        row: usize,
        column: usize,
        columns: usize,
    ) -> StoreResult<()> {
        check_origin(sheet, row, column)?;
        let data = self.sheet_mut(sheet)?;
        if let Some(cells) = data.rows.get_mut(row - 1) {
            for cell in cells.iter_mut().skip(column - 1).take(columns) {
                cell.value.clear();
            }
        }
        Ok(())
    }

    fn row_count(&self, sheet: &str) -> StoreResult<usize> {
        Ok(self.sheet(sheet)?.last_row())
    }

    fn column_count(&self, sheet: &str) -> StoreResult<usize> {
        Ok(self.sheet(sheet)?.last_column())
    }

    fn frozen_row_count(&self, sheet: &str) -> StoreResult<usize> {
        Ok(self.sheet(sheet)?.frozen_rows)
    }

    fn set_frozen_rows(&mut self, sheet: &str, rows: usize) -> StoreResult<()> {
        self.sheet_mut(sheet)?.frozen_rows = rows;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_get_or_create_reports_creation_once() {
        let mut store = MemorySheetStore::new();
        assert!(store.get_or_create_sheet("Leads").unwrap());
        assert!(!store.get_or_create_sheet("Leads").unwrap());
        assert!(store.get_or_create_sheet("Orders").unwrap());
        assert_eq!(store.sheet_names().unwrap(), row(&["Leads", "Orders"]));
    }

    #[test]
    fn test_unknown_sheet_is_an_error() {
        let store = MemorySheetStore::new();
        assert!(matches!(
            store.row_count("Nope"),
            Err(StoreError::SheetNotFound(name)) if name == "Nope"
        ));
    }

    #[test]
    fn test_write_and_read_range() {
        let mut store = MemorySheetStore::new();
        store.get_or_create_sheet("S").unwrap();
        store
            .write_range("S", 2, 2, &[row(&["a", "b"]), row(&["c", "d"])], CellStyle::data())
            .unwrap();

        assert_eq!(store.row_count("S").unwrap(), 3);
        assert_eq!(store.column_count("S").unwrap(), 3);
        assert_eq!(
            store.read_range("S", 1, 1, 3, 3).unwrap(),
            vec![row(&["", "", ""]), row(&["", "a", "b"]), row(&["", "c", "d"])]
        );
        assert_eq!(store.cell_style("S", 2, 2).unwrap(), CellStyle::data());
        assert_eq!(store.cell_style("S", 1, 1).unwrap(), CellStyle::default());
    }

    #[test]
    fn test_header_row_stops_at_last_value() {
        let mut store = MemorySheetStore::new();
        store.get_or_create_sheet("S").unwrap();
        store
            .write_range("S", 1, 1, &[row(&["A", "B", "C"])], CellStyle::header())
            .unwrap();
        store.clear_range("S", 1, 3, 1).unwrap();
        assert_eq!(store.read_header_row("S").unwrap(), row(&["A", "B"]));
        // Clearing keeps the styling.
        assert!(store.cell_style("S", 1, 3).unwrap().bold);
    }

    #[test]
    fn test_insert_row_after_shifts_rows_down() {
        let mut store = MemorySheetStore::new();
        store.get_or_create_sheet("S").unwrap();
        store
            .write_range("S", 1, 1, &[row(&["h"]), row(&["r2"]), row(&["r3"])], CellStyle::data())
            .unwrap();
        store.insert_row_after("S", 1).unwrap();
        assert_eq!(
            store.read_range("S", 1, 1, 4, 1).unwrap(),
            vec![row(&["h"]), row(&[""]), row(&["r2"]), row(&["r3"])]
        );
        // Inserting past the end changes nothing visible.
        store.insert_row_after("S", 10).unwrap();
        assert_eq!(store.row_count("S").unwrap(), 4);
    }

    #[test]
    fn test_frozen_rows() {
        let mut store = MemorySheetStore::new();
        store.get_or_create_sheet("S").unwrap();
        assert_eq!(store.frozen_row_count("S").unwrap(), 0);
        store.set_frozen_rows("S", 2).unwrap();
        assert_eq!(store.frozen_row_count("S").unwrap(), 2);
    }

    #[test]
    fn test_zero_coordinates_rejected() {
        let mut store = MemorySheetStore::new();
        store.get_or_create_sheet("S").unwrap();
        assert!(matches!(
            store.write_range("S", 0, 1, &[row(&["x"])], CellStyle::data()),
            Err(StoreError::InvalidRange { row: 0, .. })
        ));
    }
}
