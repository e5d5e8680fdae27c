// src/sheets/database/connection.rs

use crate::sheets::error::StoreResult;
use rusqlite::Connection;
use std::path::Path;

pub struct DbConnection;

impl DbConnection {
    /// Opens (or creates) a sheet database with WAL mode enabled and the schema in place.
    /// Always use this instead of Connection::open() so the pragmas are applied.
    pub fn open(path: &Path) -> StoreResult<Connection> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;

        // PRAGMA settings are connection-specific, not database-specific.
        // PRAGMA journal_mode=WAL returns the mode that was set.
        let journal_mode: String = conn.query_row("PRAGMA journal_mode=WAL", [], |row| row.get(0))?;

        if journal_mode.to_uppercase() != "WAL" {
            tracing::warn!(
                "Failed to set WAL mode on database {:?}. Current mode: {}. \
                 This may indicate the database is in use by another connection.",
                path.file_name(),
                journal_mode
            );
        } else {
            tracing::debug!("WAL mode activated for database {:?}", path.file_name());
        }

        Self::configure(&conn)?;
        Ok(conn)
    }

    /// Private in-memory database, used by tests and throwaway runs.
    pub fn open_in_memory() -> StoreResult<Connection> {
        let conn = Connection::open_in_memory()?;
        Self::configure(&conn)?;
        Ok(conn)
    }

    fn configure(conn: &Connection) -> StoreResult<()> {
        conn.execute_batch(
            "PRAGMA synchronous=NORMAL;
             PRAGMA foreign_keys=ON;
             PRAGMA busy_timeout=5000;",
        )?;
        super::schema::ensure_schema(conn)?;
        Ok(())
    }
}
