// src/sheets/pipeline.rs
// One submission, end to end: directives, flattening, header reconciliation, row writes.

use serde::Serialize;
use tracing::{debug, info};

use super::directives::{Directives, DEFAULT_SHEET_NAME};
use super::error::StoreResult;
use super::flatten::flatten;
use super::headers::reconcile;
use super::record::Record;
use super::rows::{has_data, materialize, needs_header_rewrite, plan_data_row};
use super::store::{CellStyle, SheetStore};

#[derive(Debug, Clone)]
pub struct SubmitOptions {
    /// Sheet used when neither the sheet-name directive nor `form_name` is present.
    pub default_sheet_name: String,
}

impl Default for SubmitOptions {
    fn default() -> Self {
        Self {
            default_sheet_name: DEFAULT_SHEET_NAME.to_string(),
        }
    }
}

/// What a submission did to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionOutcome {
    pub sheet: String,
    pub created: bool,
    pub headers: Vec<String>,
    pub header_rewritten: bool,
    /// Row the data landed on; `None` when every value was empty.
    pub data_row: Option<usize>,
}

/// Append `record` to the sheet it targets, growing the header row as needed.
///
/// The record must already carry its submission timestamp. Store failures are
/// returned as-is; a failure after the header write leaves the new headers
/// without a data row.
pub fn submit<S>(
    store: &mut S,
    record: &Record,
    options: &SubmitOptions,
) -> StoreResult<SubmissionOutcome>
where
    S: SheetStore + ?Sized,
{
    // Directives are read before flattening, from the record as submitted.
    let directives = Directives::extract(record, &options.default_sheet_name);
    let flat = flatten(record);
    let sheet = directives.sheet_name.as_str();

    let created = store.get_or_create_sheet(sheet)?;
    if created {
        info!("Created sheet '{}'", sheet);
    }

    let existing = existing_headers(store, sheet, created)?;
    let headers = reconcile(
        &existing,
        flat.keys().map(String::as_str),
        &directives.order,
        &directives.exclude,
    );
    let values = materialize(&headers, &flat);
    debug!(
        "Sheet '{}': {} existing headers, {} after reconcile",
        sheet,
        existing.len(),
        headers.len()
    );

    let mut header_rewritten = false;
    if needs_header_rewrite(created, &headers, &existing) && !headers.is_empty() {
        if !created && store.row_count(sheet)? > 0 {
            let width = store.column_count(sheet)?;
            if width > 0 {
                store.clear_range(sheet, 1, 1, width)?;
            }
        }
        store.write_range(sheet, 1, 1, std::slice::from_ref(&headers), CellStyle::header())?;
        header_rewritten = true;
        debug!("Sheet '{}': wrote header row {:?}", sheet, headers);
    }

    let data_row = if has_data(&values) {
        let row = append_data_row(store, sheet, values)?;
        info!("Sheet '{}': appended submission at row {}", sheet, row);
        Some(row)
    } else {
        debug!("Sheet '{}': submission carried no values, no row appended", sheet);
        None
    };

    Ok(SubmissionOutcome {
        sheet: directives.sheet_name.clone(),
        created,
        headers,
        header_rewritten,
        data_row,
    })
}

/// Row 1 across the sheet's full used width, so a column that lost its header
/// but still holds data below keeps its slot as a blank header.
fn existing_headers<S>(store: &S, sheet: &str, created: bool) -> StoreResult<Vec<String>>
where
    S: SheetStore + ?Sized,
{
    if created || store.row_count(sheet)? == 0 {
        return Ok(Vec::new());
    }
    let width = store.column_count(sheet)?;
    if width == 0 {
        return Ok(Vec::new());
    }
    let mut rows = store.read_range(sheet, 1, 1, 1, width)?;
    Ok(rows.pop().unwrap_or_default())
}

fn append_data_row<S>(store: &mut S, sheet: &str, values: Vec<String>) -> StoreResult<usize>
where
    S: SheetStore + ?Sized,
{
    let row_count = store.row_count(sheet)?;
    let frozen = store.frozen_row_count(sheet)?;
    let header_is_bold = row_count > 0 && store.cell_style(sheet, 1, 1)?.bold;

    let placement = plan_data_row(row_count, frozen, header_is_bold);
    if let Some(after) = placement.insert_after {
        store.insert_row_after(sheet, after)?;
    }
    store.write_range(sheet, placement.row, 1, &[values], CellStyle::data())?;
    Ok(placement.row)
}
