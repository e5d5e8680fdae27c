// src/sheets/mod.rs

pub mod database;
pub mod directives;
pub mod error;
pub mod flatten;
pub mod headers;
pub mod pipeline;
pub mod record;
pub mod rows;
pub mod store;

pub use database::SqliteSheetStore;
pub use directives::Directives;
pub use error::{StoreError, StoreResult, SubmitError};
pub use pipeline::{submit, SubmissionOutcome, SubmitOptions};
pub use record::{FlatRecord, FlatValue, Record, Value};
pub use store::{CellStyle, HorizontalAlign, MemorySheetStore, SheetStore};
