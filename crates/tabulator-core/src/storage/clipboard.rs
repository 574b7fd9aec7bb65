//! Spreadsheet clipboard interchange text.

use crate::error::{Result, TabulatorError};
use crate::table::{SelectionRange, Table};

/// Serialize the selected rectangles: cells joined by tabs, rows by newlines.
///
/// Ranges are emitted one after another, each contributing its own rows.
/// Null cells become empty strings.
pub fn copy_selection(table: &Table, ranges: &[SelectionRange]) -> Result<String> {
    if ranges.is_empty() {
        return Err(TabulatorError::InvalidSelection(
            "nothing selected".to_string(),
        ));
    }
    for range in ranges {
        range.validate(table)?;
    }

    let mut lines = Vec::new();
    for range in ranges {
        for row in range.rows() {
            let cells: Vec<String> = range.columns().map(|col| table.display(row, col)).collect();
            lines.push(cells.join("\t"));
        }
    }
    Ok(lines.join("\n"))
}
