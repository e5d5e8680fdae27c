// src/sheets/database/writer.rs
// Every statement that modifies sheet storage goes through here.

use crate::sheets::error::StoreResult;
use crate::sheets::store::CellStyle;
use rusqlite::{params, Connection};

pub struct DbWriter;

impl DbWriter {
    /// Register a new sheet and return its id
    pub fn create_sheet(conn: &Connection, name: &str) -> StoreResult<i64> {
        conn.execute("INSERT INTO _Sheets (name) VALUES (?)", [name])?;
        Ok(conn.last_insert_rowid())
    }

    /// Upsert a block of cells with one style, within a transaction.
    pub fn write_range(
        conn: &Connection,
        sheet_id: i64,
        row: usize,
        column: usize,
        values: &[Vec<String>],
        style: CellStyle,
    ) -> StoreResult<()> {
        let tx = conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO _Cells (sheet_id, row_index, col_index, value, bold, align)
                 VALUES (?, ?, ?, ?, ?, ?)
                 ON CONFLICT(sheet_id, row_index, col_index) DO UPDATE SET
                    value = excluded.value,
                    bold = excluded.bold,
                    align = excluded.align,
                    updated_at = CURRENT_TIMESTAMP",
            )?;
            for (dr, line) in values.iter().enumerate() {
                for (dc, value) in line.iter().enumerate() {
                    stmt.execute(params![
                        sheet_id,
                        (row + dr) as i64,
                        (column + dc) as i64,
                        value,
                        style.bold as i32,
                        style.align.as_str(),
                    ])?;
                }
            }
        }
        tx.commit()?;
        Ok(())
    }

    /// Shift every row below `row` down by one.
    /// Rows are moved in DESCENDING order so the (sheet, row, col) primary key
    /// never sees two cells at the same position mid-update.
    pub fn insert_row_after(conn: &Connection, sheet_id: i64, row: usize) -> StoreResult<()> {
        let tx = conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare(
                "SELECT DISTINCT row_index FROM _Cells
                 WHERE sheet_id = ? AND row_index > ?
                 ORDER BY row_index DESC",
            )?;
            let below: Vec<i64> = stmt
                .query_map(params![sheet_id, row as i64], |r| r.get(0))?
                .collect::<Result<Vec<i64>, _>>()?;

            for ri in below {
                tx.execute(
                    "UPDATE _Cells SET row_index = ?, updated_at = CURRENT_TIMESTAMP
                     WHERE sheet_id = ? AND row_index = ?",
                    params![ri + 1, sheet_id, ri],
                )?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    /// Blank the values of `columns` cells in `row`; styling is kept.
    pub fn clear_range(
        conn: &Connection,
        sheet_id: i64,
        row: usize,
        column: usize,
        columns: usize,
    ) -> StoreResult<()> {
        if columns == 0 {
            return Ok(());
        }
        conn.execute(
            "UPDATE _Cells SET value = '', updated_at = CURRENT_TIMESTAMP
             WHERE sheet_id = ? AND row_index = ? AND col_index BETWEEN ? AND ?",
            params![
                sheet_id,
                row as i64,
                column as i64,
                (column + columns - 1) as i64
            ],
        )?;
        Ok(())
    }

    pub fn set_frozen_rows(conn: &Connection, sheet_id: i64, rows: usize) -> StoreResult<()> {
        conn.execute(
            "UPDATE _Sheets SET frozen_rows = ? WHERE id = ?",
            params![rows as i64, sheet_id],
        )?;
        Ok(())
    }
}
