//! Selection ranges and their textual form.
//!
//! A [`SelectionRange`] is an inclusive, 0-indexed rectangle supplied by the
//! presentation layer. [`RangeSpec`] is the spreadsheet-style notation a user
//! types for one:
//!
//! ```ignore
//! "B2"      // one cell
//! "A1:C3"   // cells
//! "2:4"     // whole rows 2 to 4 (1-based)
//! "B:D"     // whole columns B to D
//! "*"       // everything
//! ```

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use super::Table;
use crate::error::{Result, TabulatorError};

/// Inclusive rectangle of cells, 0-indexed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SelectionRange {
    pub top: usize,
    pub bottom: usize,
    pub left: usize,
    pub right: usize,
}

impl SelectionRange {
    pub fn new(top: usize, bottom: usize, left: usize, right: usize) -> Self {
        SelectionRange {
            top,
            bottom,
            left,
            right,
        }
    }

    pub fn cell(row: usize, col: usize) -> Self {
        Self::new(row, row, col, col)
    }

    /// Every column of one row.
    pub fn whole_row(row: usize, table: &Table) -> Self {
        Self::new(row, row, 0, table.column_count().saturating_sub(1))
    }

    /// Every row of one column.
    pub fn whole_column(col: usize, table: &Table) -> Self {
        Self::new(0, table.row_count().saturating_sub(1), col, col)
    }

    pub fn all(table: &Table) -> Self {
        Self::new(
            0,
            table.row_count().saturating_sub(1),
            0,
            table.column_count().saturating_sub(1),
        )
    }

    pub fn rows(&self) -> RangeInclusive<usize> {
        self.top..=self.bottom
    }

    pub fn columns(&self) -> RangeInclusive<usize> {
        self.left..=self.right
    }

    /// The range covers column 0 through the last column.
    pub fn spans_all_columns(&self, table: &Table) -> bool {
        self.left == 0 && self.right + 1 == table.column_count()
    }

    /// The range covers row 0 through the last row.
    pub fn spans_all_rows(&self, table: &Table) -> bool {
        self.top == 0 && self.bottom + 1 == table.row_count()
    }

    /// Reject inverted ranges and ranges reaching outside the table.
    pub fn validate(&self, table: &Table) -> Result<()> {
        if self.top > self.bottom || self.left > self.right {
            return Err(TabulatorError::InvalidSelection(format!(
                "{} is inverted",
                self
            )));
        }
        let (rows, cols) = table.shape();
        if self.bottom >= rows || self.right >= cols {
            return Err(TabulatorError::InvalidSelection(format!(
                "{} lies outside a {}x{} table",
                self, rows, cols
            )));
        }
        Ok(())
    }
}

impl fmt::Display for SelectionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}:{}{}",
            col_to_letters(self.left),
            self.top + 1,
            col_to_letters(self.right),
            self.bottom + 1
        )
    }
}

/// Convert column index to spreadsheet-style letters (0 -> A, 25 -> Z, 26 -> AA).
pub fn col_to_letters(col: usize) -> String {
    let mut result = String::new();
    let mut n = col as u128 + 1;
    while n > 0 {
        n -= 1;
        result.insert(0, (b'A' + (n % 26) as u8) as char);
        n /= 26;
    }
    result
}

fn letters_to_col(letters: &str) -> Option<usize> {
    let mut acc = 0usize;
    for c in letters.to_ascii_uppercase().bytes() {
        let digit = (c - b'A') as usize + 1;
        acc = acc.checked_mul(26)?.checked_add(digit)?;
    }
    acc.checked_sub(1)
}

fn number_to_row(numbers: &str) -> Option<usize> {
    numbers.parse::<usize>().ok()?.checked_sub(1)
}

static CELL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?<letters>[A-Za-z]+)(?<numbers>[0-9]+)$").unwrap());
static ROW_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+$").unwrap());
static COL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z]+$").unwrap());

/// A selection as typed by a user, before it is resolved against a table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RangeSpec {
    /// Corner cells as (row, col).
    Cells {
        start: (usize, usize),
        end: (usize, usize),
    },
    Rows {
        first: usize,
        last: usize,
    },
    Columns {
        first: usize,
        last: usize,
    },
    All,
}

impl RangeSpec {
    /// Parse a comma-separated list of ranges.
    pub fn parse_list(s: &str) -> Result<Vec<RangeSpec>> {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::parse)
            .collect()
    }

    /// Turn this notation into a concrete rectangle for `table`.
    pub fn resolve(&self, table: &Table) -> SelectionRange {
        match *self {
            RangeSpec::Cells { start, end } => SelectionRange::new(
                start.0.min(end.0),
                start.0.max(end.0),
                start.1.min(end.1),
                start.1.max(end.1),
            ),
            RangeSpec::Rows { first, last } => SelectionRange {
                bottom: first.max(last),
                ..SelectionRange::whole_row(first.min(last), table)
            },
            RangeSpec::Columns { first, last } => SelectionRange {
                right: first.max(last),
                ..SelectionRange::whole_column(first.min(last), table)
            },
            RangeSpec::All => SelectionRange::all(table),
        }
    }

    /// Resolve a list of specs against `table`.
    pub fn resolve_all(specs: &[RangeSpec], table: &Table) -> Vec<SelectionRange> {
        specs.iter().map(|spec| spec.resolve(table)).collect()
    }

    fn parse_cell(s: &str) -> Option<(usize, usize)> {
        let caps = CELL_RE.captures(s)?;
        let col = letters_to_col(&caps["letters"])?;
        let row = number_to_row(&caps["numbers"])?;
        Some((row, col))
    }

    fn parse_part(s: &str) -> Option<RangeSpec> {
        if s == "*" {
            return Some(RangeSpec::All);
        }
        let (a, b) = s.split_once(':').unwrap_or((s, s));
        if ROW_RE.is_match(a) && ROW_RE.is_match(b) {
            return Some(RangeSpec::Rows {
                first: number_to_row(a)?,
                last: number_to_row(b)?,
            });
        }
        if COL_RE.is_match(a) && COL_RE.is_match(b) {
            return Some(RangeSpec::Columns {
                first: letters_to_col(a)?,
                last: letters_to_col(b)?,
            });
        }
        Some(RangeSpec::Cells {
            start: Self::parse_cell(a)?,
            end: Self::parse_cell(b)?,
        })
    }
}

impl FromStr for RangeSpec {
    type Err = TabulatorError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        Self::parse_part(s).ok_or_else(|| TabulatorError::InvalidRangeSpec(s.to_string()))
    }
}
