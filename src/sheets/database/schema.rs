// src/sheets/database/schema.rs
// Table layout for sheet storage and its version tracking.

use crate::sheets::error::StoreResult;
use rusqlite::{params, Connection};

/// Create migration tracking table
fn ensure_migration_tracking(conn: &Connection) -> StoreResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS _SchemaVersions (
            version INTEGER PRIMARY KEY,
            applied_at TEXT DEFAULT CURRENT_TIMESTAMP,
            description TEXT
        )",
        [],
    )?;
    Ok(())
}

/// Check if a specific migration version has been applied
pub fn is_migration_applied(conn: &Connection, version: i32) -> StoreResult<bool> {
    let count: i32 = conn.query_row(
        "SELECT COUNT(*) FROM _SchemaVersions WHERE version = ?",
        params![version],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

fn mark_migration_applied(conn: &Connection, version: i32, description: &str) -> StoreResult<()> {
    conn.execute(
        "INSERT OR IGNORE INTO _SchemaVersions (version, description) VALUES (?, ?)",
        params![version, description],
    )?;
    Ok(())
}

/// Bring the database up to the current schema. Safe to call on every open.
pub fn ensure_schema(conn: &Connection) -> StoreResult<()> {
    ensure_migration_tracking(conn)?;

    if !is_migration_applied(conn, 1)? {
        create_sheet_tables(conn)?;
        mark_migration_applied(conn, 1, "Created _Sheets and _Cells tables")?;
        tracing::info!("Initialized sheet storage schema");
    }

    Ok(())
}

/// Migration 1: sheet registry plus one row per non-blank cell.
fn create_sheet_tables(conn: &Connection) -> StoreResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS _Sheets (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            frozen_rows INTEGER NOT NULL DEFAULT 0,
            created_at TEXT DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;
    conn.execute(
        "CREATE TABLE IF NOT EXISTS _Cells (
            sheet_id INTEGER NOT NULL REFERENCES _Sheets(id) ON DELETE CASCADE,
            row_index INTEGER NOT NULL,
            col_index INTEGER NOT NULL,
            value TEXT NOT NULL DEFAULT '',
            bold INTEGER NOT NULL DEFAULT 0,
            align TEXT NOT NULL DEFAULT 'general',
            updated_at TEXT DEFAULT CURRENT_TIMESTAMP,
            PRIMARY KEY (sheet_id, row_index, col_index)
        )",
        [],
    )?;
    Ok(())
}
