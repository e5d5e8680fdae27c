// src/cli/inspect.rs
// Read-only views over stored sheets: listing, table dump, JSON export

use anyhow::{Context, Result};
use indexmap::IndexMap;
use std::fs;
use std::io::BufWriter;
use std::path::Path;
use tracing::info;

use crate::sheets::store::SheetStore;

pub fn list_sheets<S: SheetStore + ?Sized>(store: &S) -> Result<()> {
    let names = store.sheet_names()?;
    if names.is_empty() {
        println!("No sheets.");
        return Ok(());
    }
    println!(
        "{:<30} {:>6} {:>8} {:>7}  {}",
        "Sheet", "Rows", "Columns", "Frozen", "Headers"
    );
    println!("{}", "-".repeat(80));
    for name in names {
        println!(
            "{:<30} {:>6} {:>8} {:>7}  {}",
            name,
            store.row_count(&name)?,
            store.column_count(&name)?,
            store.frozen_row_count(&name)?,
            store.read_header_row(&name)?.join(", ")
        );
    }
    Ok(())
}

/// All non-empty rows of `sheet`, header row first.
pub fn sheet_grid<S>(store: &S, sheet: &str) -> Result<Vec<Vec<String>>>
where
    S: SheetStore + ?Sized,
{
    let rows = store.row_count(sheet)?;
    let columns = store.column_count(sheet)?;
    if rows == 0 || columns == 0 {
        return Ok(Vec::new());
    }
    Ok(store.read_range(sheet, 1, 1, rows, columns)?)
}

pub fn show_sheet<S: SheetStore + ?Sized>(store: &S, sheet: &str) -> Result<()> {
    let grid = sheet_grid(store, sheet)?;
    if grid.is_empty() {
        println!("Sheet '{}' is empty.", sheet);
        return Ok(());
    }

    let columns = grid[0].len();
    let widths: Vec<usize> = (0..columns)
        .map(|c| {
            grid.iter()
                .map(|row| row[c].chars().count())
                .max()
                .unwrap_or(0)
                .clamp(4, 40)
        })
        .collect();

    for (i, row) in grid.iter().enumerate() {
        let cells: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", truncate(cell, *width), width = width))
            .collect();
        println!("{:>5} | {}", i + 1, cells.join(" | "));
        if i == 0 {
            println!("{}", "-".repeat(8 + widths.iter().map(|w| w + 3).sum::<usize>()));
        }
    }
    Ok(())
}

fn truncate(cell: &str, width: usize) -> String {
    if cell.chars().count() <= width {
        cell.to_string()
    } else {
        let mut out: String = cell.chars().take(width.saturating_sub(1)).collect();
        out.push('~');
        out
    }
}

/// Data rows as objects keyed by header, skipping columns with an empty header.
pub fn export_rows<S>(store: &S, sheet: &str) -> Result<Vec<IndexMap<String, String>>>
where
    S: SheetStore + ?Sized,
{
    let grid = sheet_grid(store, sheet)?;
    let Some((headers, rows)) = grid.split_first() else {
        return Ok(Vec::new());
    };
    Ok(rows
        .iter()
        .filter(|row| row.iter().any(|cell| !cell.is_empty()))
        .map(|row| {
            headers
                .iter()
                .zip(row)
                .filter(|(header, _)| !header.is_empty())
                .map(|(header, cell)| (header.clone(), cell.clone()))
                .collect()
        })
        .collect())
}

pub fn export_sheet<S>(store: &S, sheet: &str, output: &Path) -> Result<usize>
where
    S: SheetStore + ?Sized,
{
    let rows = export_rows(store, sheet)?;
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file =
        fs::File::create(output).with_context(|| format!("creating {}", output.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &rows)
        .with_context(|| format!("writing {}", output.display()))?;
    info!("Exported {} rows of '{}' to {:?}", rows.len(), sheet, output);
    println!("Exported {} rows to {}", rows.len(), output.display());
    Ok(rows.len())
}
