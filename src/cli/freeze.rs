// src/cli/freeze.rs
use anyhow::{Context, Result};

use crate::sheets::store::SheetStore;

/// Creates the sheet when missing, so a frozen header can be set up before the first submission.
pub fn run<S: SheetStore + ?Sized>(store: &mut S, sheet: &str, rows: usize) -> Result<()> {
    if store.get_or_create_sheet(sheet)? {
        println!("Created sheet '{}'", sheet);
    }
    store
        .set_frozen_rows(sheet, rows)
        .with_context(|| format!("freezing rows of '{}'", sheet))?;
    println!("'{}': {} frozen row(s)", sheet, rows);
    Ok(())
}
