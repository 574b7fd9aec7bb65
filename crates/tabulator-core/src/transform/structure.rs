//! Structural edits driven by selection ranges.

use std::collections::BTreeSet;

use crate::error::Result;
use crate::table::{CellValue, SelectionRange, Table};

/// How a range qualifies for row/column edits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Span {
    /// Covers every column: acts on its rows.
    Rows,
    /// Covers every row (but not every column): acts on its columns.
    Columns,
    /// Neither; ignored by row/column edits.
    Cells,
}

impl Span {
    pub fn of(range: &SelectionRange, table: &Table) -> Span {
        if range.spans_all_columns(table) {
            Span::Rows
        } else if range.spans_all_rows(table) {
            Span::Columns
        } else {
            Span::Cells
        }
    }
}

/// Rows and columns touched by an insert or delete.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EditCounts {
    pub rows: usize,
    pub columns: usize,
}

fn validate_all(table: &Table, ranges: &[SelectionRange]) -> Result<()> {
    ranges.iter().try_for_each(|range| range.validate(table))
}

/// Row and column indices, against the table as it is now, of every
/// full-span range.
fn targets(table: &Table, ranges: &[SelectionRange]) -> (BTreeSet<usize>, BTreeSet<usize>) {
    let mut rows = BTreeSet::new();
    let mut cols = BTreeSet::new();
    for range in ranges {
        match Span::of(range, table) {
            Span::Rows => rows.extend(range.rows()),
            Span::Columns => cols.extend(range.columns()),
            Span::Cells => {}
        }
    }
    (rows, cols)
}

/// Null out every cell of every range. Returns the number of cells visited.
pub fn clear_ranges(table: &mut Table, ranges: &[SelectionRange]) -> Result<usize> {
    validate_all(table, ranges)?;
    let mut cleared = 0;
    for range in ranges {
        for row in range.rows() {
            for col in range.columns() {
                table.set(row, col, CellValue::Empty);
                cleared += 1;
            }
        }
    }
    Ok(cleared)
}

/// Delete the rows of full-row ranges, then the columns of full-column ranges.
pub fn delete_ranges(table: &mut Table, ranges: &[SelectionRange]) -> Result<EditCounts> {
    validate_all(table, ranges)?;
    let (rows, cols) = targets(table, ranges);

    // Highest first so lower indices stay put.
    for &row in rows.iter().rev() {
        table.remove_row(row);
    }
    for &col in cols.iter().rev() {
        table.remove_column(col);
    }
    Ok(EditCounts {
        rows: rows.len(),
        columns: cols.len(),
    })
}

/// Insert one blank row before every row of a full-row range and one blank
/// column before every column of a full-column range.
///
/// Indices refer to the table before any insertion: selecting rows 1 and 2
/// of `[a, b, c]` yields `[a, _, b, _, c]`.
pub fn insert_blank_ranges(table: &mut Table, ranges: &[SelectionRange]) -> Result<EditCounts> {
    validate_all(table, ranges)?;
    let (rows, cols) = targets(table, ranges);

    for &row in rows.iter().rev() {
        table.insert_blank_row(row);
    }
    for &col in cols.iter().rev() {
        table.insert_blank_column(col);
    }
    Ok(EditCounts {
        rows: rows.len(),
        columns: cols.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn five_rows() -> Table {
        Table::from(vec![
            ["r0", "a"],
            ["r1", "b"],
            ["r2", "c"],
            ["r3", "d"],
            ["r4", "e"],
        ])
    }

    #[test]
    fn test_span_rows_take_precedence() {
        let table = five_rows();
        assert_eq!(Span::of(&SelectionRange::all(&table), &table), Span::Rows);
        assert_eq!(
            Span::of(&SelectionRange::whole_column(1, &table), &table),
            Span::Columns
        );
        assert_eq!(Span::of(&SelectionRange::cell(0, 0), &table), Span::Cells);
    }

    #[test]
    fn test_delete_rows_one_and_three() {
        let mut table = five_rows();
        let ranges = [
            SelectionRange::whole_row(1, &table),
            SelectionRange::whole_row(3, &table),
        ];
        let counts = delete_ranges(&mut table, &ranges).unwrap();
        assert_eq!(counts, EditCounts { rows: 2, columns: 0 });
        assert_eq!(
            table,
            Table::from(vec![["r0", "a"], ["r2", "c"], ["r4", "e"]])
        );
    }

    #[test]
    fn test_delete_columns_and_ignore_partial_ranges() {
        let mut table = five_rows();
        let ranges = [
            SelectionRange::whole_column(0, &table),
            SelectionRange::new(0, 1, 1, 1),
        ];
        delete_ranges(&mut table, &ranges).unwrap();
        assert_eq!(table.shape(), (5, 1));
        assert_eq!(table.display(4, 0), "e");
    }

    #[test]
    fn test_delete_every_row_keeps_columns() {
        let mut table = five_rows();
        let all = SelectionRange::all(&table);
        delete_ranges(&mut table, &[all]).unwrap();
        assert_eq!(table.shape(), (0, 2));
    }

    #[test]
    fn test_clear_keeps_shape() {
        let mut table = five_rows();
        let cleared = clear_ranges(
            &mut table,
            &[SelectionRange::new(0, 1, 0, 0), SelectionRange::cell(4, 1)],
        )
        .unwrap();
        assert_eq!(cleared, 3);
        assert_eq!(table.shape(), (5, 2));
        assert_eq!(table.get(0, 0), Some(&CellValue::Empty));
        assert_eq!(table.get(1, 0), Some(&CellValue::Empty));
        assert_eq!(table.display(1, 1), "b");
        assert_eq!(table.get(4, 1), Some(&CellValue::Empty));
    }

    #[test]
    fn test_insert_rows_use_original_indices() {
        let mut table = Table::from(vec![["a"], ["b"], ["c"]]);
        let range = SelectionRange::new(1, 2, 0, 0);
        insert_blank_ranges(&mut table, &[range]).unwrap();
        assert_eq!(table, Table::from(vec![["a"], [""], ["b"], [""], ["c"]]));
    }

    #[test]
    fn test_insert_columns() {
        let mut table = Table::from(vec![["a", "b", "c"], ["d", "e", "f"]]);
        let range = SelectionRange::whole_column(1, &table);
        let counts = insert_blank_ranges(&mut table, &[range]).unwrap();
        assert_eq!(counts, EditCounts { rows: 0, columns: 1 });
        assert_eq!(
            table,
            Table::from(vec![["a", "", "b", "c"], ["d", "", "e", "f"]])
        );
    }

    #[test]
    fn test_delete_rows_then_columns_by_original_index() {
        let mut table = Table::from(vec![["a", "b", "c"], ["d", "e", "f"], ["g", "h", "i"]]);
        let ranges = [
            SelectionRange::whole_column(2, &table),
            SelectionRange::whole_row(0, &table),
        ];
        let counts = delete_ranges(&mut table, &ranges).unwrap();
        assert_eq!(counts, EditCounts { rows: 1, columns: 1 });
        assert_eq!(table, Table::from(vec![["d", "e"], ["g", "h"]]));
    }

    #[test]
    fn test_insert_columns_use_original_indices() {
        let mut table = Table::from(vec![["a", "b", "c"], ["d", "e", "f"]]);
        let range = SelectionRange::new(0, 1, 1, 2);
        let counts = insert_blank_ranges(&mut table, &[range]).unwrap();
        assert_eq!(counts, EditCounts { rows: 0, columns: 2 });
        assert_eq!(
            table,
            Table::from(vec![["a", "", "b", "", "c"], ["d", "", "e", "", "f"]])
        );
    }

    #[test]
    fn test_invalid_range_leaves_table_untouched() {
        let mut table = five_rows();
        let before = table.clone();
        let ranges = [SelectionRange::cell(0, 0), SelectionRange::cell(9, 0)];
        assert!(clear_ranges(&mut table, &ranges).is_err());
        assert!(delete_ranges(&mut table, &ranges).is_err());
        assert!(insert_blank_ranges(&mut table, &ranges).is_err());
        assert_eq!(table, before);
    }
}
