//! The in-memory table: a rectangular, header-less grid of cells.
//!
//! Row 0 is ordinary data. Transforms that need named columns read it through
//! [`HeaderIndex`] for the duration of one operation only.

mod cell;
mod header;
mod selection;

pub use cell::{CellValue, format_number};
pub use header::HeaderIndex;
pub use selection::{RangeSpec, SelectionRange, col_to_letters};

/// Ordered rows of cells. Every row has exactly `column_count()` cells.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    rows: Vec<Vec<CellValue>>,
    width: usize,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from ragged rows, padding short rows with empty cells.
    pub fn from_rows(rows: Vec<Vec<CellValue>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        Self::with_width(rows, width)
    }

    /// Build a table with a fixed column count. Short rows are padded, long
    /// rows truncated.
    pub fn with_width(mut rows: Vec<Vec<CellValue>>, width: usize) -> Self {
        for row in &mut rows {
            row.resize(width, CellValue::Empty);
        }
        Table { rows, width }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.width
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.width)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.width == 0
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn row(&self, row: usize) -> Option<&[CellValue]> {
        self.rows.get(row).map(Vec::as_slice)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.rows.get(row)?.get(col)
    }

    /// Set a cell. Returns false (and changes nothing) when out of bounds.
    pub fn set(&mut self, row: usize, col: usize, value: CellValue) -> bool {
        match self.rows.get_mut(row).and_then(|r| r.get_mut(col)) {
            Some(cell) => {
                *cell = value;
                true
            }
            None => false,
        }
    }

    /// Display text of a cell; empty for null or out-of-bounds cells.
    pub fn display(&self, row: usize, col: usize) -> String {
        self.get(row, col).map(ToString::to_string).unwrap_or_default()
    }

    pub fn push_row(&mut self, mut row: Vec<CellValue>) {
        row.resize(self.width, CellValue::Empty);
        self.rows.push(row);
    }

    /// Insert an all-empty row before `at` (or append when `at == row_count()`).
    pub fn insert_blank_row(&mut self, at: usize) {
        let at = at.min(self.rows.len());
        self.rows.insert(at, vec![CellValue::Empty; self.width]);
    }

    pub fn remove_row(&mut self, at: usize) -> Option<Vec<CellValue>> {
        (at < self.rows.len()).then(|| self.rows.remove(at))
    }

    /// Insert an all-empty column before `at` (or append when `at == column_count()`).
    pub fn insert_blank_column(&mut self, at: usize) {
        let at = at.min(self.width);
        for row in &mut self.rows {
            row.insert(at, CellValue::Empty);
        }
        self.width += 1;
    }

    pub fn remove_column(&mut self, at: usize) -> bool {
        if at >= self.width {
            return false;
        }
        for row in &mut self.rows {
            row.remove(at);
        }
        self.width -= 1;
        true
    }

    /// New table holding the given columns (by position) in the given order.
    pub fn select_columns(&self, columns: &[usize]) -> Table {
        let rows = self
            .rows
            .iter()
            .map(|row| {
                columns
                    .iter()
                    .map(|&c| row.get(c).cloned().unwrap_or_default())
                    .collect()
            })
            .collect();
        Table::with_width(rows, columns.len())
    }

    /// Render the whole table as tab-separated lines.
    pub fn to_tsv(&self) -> String {
        self.rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("\t")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Build a table from string literals; empty strings become null cells.
/// Handy for tests and fixtures.
impl<const W: usize> From<Vec<[&str; W]>> for Table {
    fn from(rows: Vec<[&str; W]>) -> Self {
        let rows = rows
            .into_iter()
            .map(|r| r.iter().map(|f| CellValue::from_field(f)).collect())
            .collect();
        Table::with_width(rows, W)
    }
}
