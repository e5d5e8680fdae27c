// src/sheets/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),
    #[error("Invalid range on sheet '{sheet}': row {row}, column {column}")]
    InvalidRange {
        sheet: String,
        row: usize,
        column: usize,
    },
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure to accept one submission.
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl SubmitError {
    /// Whether the client sent something unusable, as opposed to a store failure.
    pub fn is_client_error(&self) -> bool {
        matches!(self, SubmitError::MalformedPayload(_) | SubmitError::Json(_))
    }
}
