// src/sheets/database/reader.rs
// READ-only queries. All writes live in writer.rs.

use crate::sheets::error::{StoreError, StoreResult};
use crate::sheets::store::{CellStyle, HorizontalAlign};
use rusqlite::{params, Connection, OptionalExtension};

pub struct DbReader;

impl DbReader {
    /// Look up a sheet's id by name
    pub fn sheet_id(conn: &Connection, name: &str) -> StoreResult<Option<i64>> {
        let id = conn
            .query_row("SELECT id FROM _Sheets WHERE name = ?", [name], |row| row.get(0))
            .optional()?;
        Ok(id)
    }

    /// Sheet id or `SheetNotFound`
    pub fn require_sheet(conn: &Connection, name: &str) -> StoreResult<i64> {
        Self::sheet_id(conn, name)?.ok_or_else(|| StoreError::SheetNotFound(name.to_string()))
    }

    /// All sheet names in creation order
    pub fn sheet_names(conn: &Connection) -> StoreResult<Vec<String>> {
        let mut stmt = conn.prepare("SELECT name FROM _Sheets ORDER BY id")?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }

    /// Row 1 up to its last non-empty cell
    pub fn header_row(conn: &Connection, sheet_id: i64) -> StoreResult<Vec<String>> {
        let mut stmt = conn.prepare(
            "SELECT col_index, value FROM _Cells
             WHERE sheet_id = ? AND row_index = 1 AND value <> ''
             ORDER BY col_index",
        )?;
        let cells = stmt
            .query_map([sheet_id], |row| {
                Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let width = cells.last().map_or(0, |(col, _)| *col as usize);
        let mut header = vec![String::new(); width];
        for (col, value) in cells {
            header[col as usize - 1] = value;
        }
        Ok(header)
    }

    /// Rectangular block of values; blank cells come back as empty strings
    pub fn read_range(
        conn: &Connection,
        sheet_id: i64,
        row: usize,
        column: usize,
        rows: usize,
        columns: usize,
    ) -> StoreResult<Vec<Vec<String>>> {
        let mut grid = vec![vec![String::new(); columns]; rows];
        if rows == 0 || columns == 0 {
            return Ok(grid);
        }

        let mut stmt = conn.prepare(
            "SELECT row_index, col_index, value FROM _Cells
             WHERE sheet_id = ?
               AND row_index BETWEEN ? AND ?
               AND col_index BETWEEN ? AND ?",
        )?;
        let cells = stmt.query_map(
            params![
                sheet_id,
                row as i64,
                (row + rows - 1) as i64,
                column as i64,
                (column + columns - 1) as i64
            ],
            |r| {
                Ok((
                    r.get::<_, i64>(0)?,
                    r.get::<_, i64>(1)?,
                    r.get::<_, String>(2)?,
                ))
            },
        )?;

        for cell in cells {
            let (r, c, value) = cell?;
            grid[r as usize - row][c as usize - column] = value;
        }
        Ok(grid)
    }

    pub fn cell_style(
        conn: &Connection,
        sheet_id: i64,
        row: usize,
        column: usize,
    ) -> StoreResult<CellStyle> {
        let style = conn
            .query_row(
                "SELECT bold, align FROM _Cells \
                 WHERE sheet_id = ? AND row_index = ? AND col_index = ?",
                params![sheet_id, row as i64, column as i64],
                |r| {
                    Ok(CellStyle {
                        bold: r.get::<_, i32>(0)? != 0,
                        align: HorizontalAlign::parse(&r.get::<_, String>(1)?),
                    })
                },
            )
            .optional()?;
        Ok(style.unwrap_or_default())
    }

    /// Index of the last row holding a non-empty value, 0 when blank
    pub fn last_row(conn: &Connection, sheet_id: i64) -> StoreResult<usize> {
        let last: i64 = conn.query_row(
            "SELECT COALESCE(MAX(row_index), 0) FROM _Cells WHERE sheet_id = ? AND value <> ''",
            [sheet_id],
            |row| row.get(0),
        )?;
        Ok(last as usize)
    }

    /// Index of the last column holding a non-empty value, 0 when blank
    pub fn last_column(conn: &Connection, sheet_id: i64) -> StoreResult<usize> {
        let last: i64 = conn.query_row(
            "SELECT COALESCE(MAX(col_index), 0) FROM _Cells WHERE sheet_id = ? AND value <> ''",
            [sheet_id],
            |row| row.get(0),
        )?;
        Ok(last as usize)
    }

    pub fn frozen_rows(conn: &Connection, sheet_id: i64) -> StoreResult<usize> {
        let frozen: i64 = conn.query_row(
            "SELECT frozen_rows FROM _Sheets WHERE id = ?",
            [sheet_id],
            |row| row.get(0),
        )?;
        Ok(frozen as usize)
    }
}
