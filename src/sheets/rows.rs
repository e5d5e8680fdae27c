// src/sheets/rows.rs
// Turning a flattened record into row values and deciding where rows go.

use super::record::FlatRecord;

/// One cell value per header; absent keys become empty cells.
pub fn materialize(headers: &[String], flat: &FlatRecord) -> Vec<String> {
    headers
        .iter()
        .map(|h| flat.get(h).map(|v| v.to_cell_text()).unwrap_or_default())
        .collect()
}

/// A row is only worth appending if some cell carries a value.
pub fn has_data(values: &[String]) -> bool {
    values.iter().any(|v| !v.is_empty())
}

/// Decide whether row 1 must be rewritten.
///
/// The comparison is prefix based: stale trailing headers beyond
/// `headers.len()` do not trigger a rewrite on their own.
pub fn needs_header_rewrite(created: bool, headers: &[String], existing: &[String]) -> bool {
    if created || headers.len() > existing.len() {
        return true;
    }
    headers != &existing[..headers.len()]
}

/// Where the next data row lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowPlacement {
    /// 1-based target row.
    pub row: usize,
    /// Row after which a blank row is inserted before writing, if any.
    pub insert_after: Option<usize>,
}

/// Plan the data row from the sheet's current shape.
///
/// `header_is_bold` reports the styling of cell A1, which is how a header row
/// is recognised.
pub fn plan_data_row(row_count: usize, frozen_rows: usize, header_is_bold: bool) -> RowPlacement {
    if row_count == 0 && frozen_rows == 0 {
        return RowPlacement {
            row: 1,
            insert_after: None,
        };
    }
    if row_count == 1 && header_is_bold {
        return RowPlacement {
            row: 2,
            insert_after: Some(1),
        };
    }
    let last = row_count.max(frozen_rows);
    RowPlacement {
        row: last + 1,
        insert_after: Some(last),
    }
}
