// src/sheets/database/mod.rs

pub mod connection;
pub mod reader;
pub mod schema;
pub mod writer;

pub use connection::DbConnection;
pub use reader::DbReader;
pub use writer::DbWriter;

use std::path::{Path, PathBuf};

use rusqlite::Connection;

use crate::sheets::error::StoreResult;
use crate::sheets::store::{check_origin, CellStyle, SheetStore};

/// Sheets persisted in a single SQLite file.
pub struct SqliteSheetStore {
    conn: Connection,
    path: Option<PathBuf>,
}

impl SqliteSheetStore {
    pub fn open(path: &Path) -> StoreResult<Self> {
        let conn = DbConnection::open(path)?;
        tracing::info!("Opened sheet database at {}", path.display());
        Ok(Self {
            conn,
            path: Some(path.to_path_buf()),
        })
    }

    pub fn open_in_memory() -> StoreResult<Self> {
        Ok(Self {
            conn: DbConnection::open_in_memory()?,
            path: None,
        })
    }

    /// File backing this store, `None` for in-memory databases.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn id(&self, sheet: &str) -> StoreResult<i64> {
        DbReader::require_sheet(&self.conn, sheet)
    }
}

impl SheetStore for SqliteSheetStore {
    fn get_or_create_sheet(&mut self, name: &str) -> StoreResult<bool> {
        if DbReader::sheet_id(&self.conn, name)?.is_some() {
            return Ok(false);
        }
        let id = DbWriter::create_sheet(&self.conn, name)?;
        tracing::debug!("Registered sheet '{}' with id {}", name, id);
        Ok(true)
    }

    fn sheet_names(&self) -> StoreResult<Vec<String>> {
        DbReader::sheet_names(&self.conn)
    }

    fn read_header_row(&self, sheet: &str) -> StoreResult<Vec<String>> {
        DbReader::header_row(&self.conn, self.id(sheet)?)
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
        DbReader::read_range(&self.conn, self.id(sheet)?, row, column, rows, columns)
    }

    fn cell_style(&self, sheet: &str, row: usize, column: usize) -> StoreResult<CellStyle> {
        check_origin(sheet, row, column)?;
        DbReader::cell_style(&self.conn, self.id(sheet)?, row, column)
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
        DbWriter::write_range(&self.conn, self.id(sheet)?, row, column, values, style)
    }

    fn insert_row_after(&mut self, sheet: &str, row: usize) -> StoreResult<()> {
        DbWriter::insert_row_after(&self.conn, self.id(sheet)?, row)
    }

    fn clear_range(
        &mut self,
        sheet: &str,
        row: usize,
        column: usize,
        columns: usize,
    ) -> StoreResult<()> {
        check_origin(sheet, row, column)?;
        DbWriter::clear_range(&self.conn, self.id(sheet)?, row, column, columns)
    }

    fn row_count(&self, sheet: &str) -> StoreResult<usize> {
        DbReader::last_row(&self.conn, self.id(sheet)?)
    }

    fn column_count(&self, sheet: &str) -> StoreResult<usize> {
        DbReader::last_column(&self.conn, self.id(sheet)?)
    }

    fn frozen_row_count(&self, sheet: &str) -> StoreResult<usize> {
        DbReader::frozen_rows(&self.conn, self.id(sheet)?)
    }

    fn set_frozen_rows(&mut self, sheet: &str, rows: usize) -> StoreResult<()> {
        DbWriter::set_frozen_rows(&self.conn, self.id(sheet)?, rows)
    }
}
