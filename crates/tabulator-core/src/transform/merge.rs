use indexmap::IndexMap;
use tracing::info;

use crate::error::Result;
use crate::table::{CellValue, HeaderIndex, Table};

/// Summary of a duplicate merge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Body rows before merging (header excluded).
    pub input_rows: usize,
    /// Body rows after merging, one per distinct key.
    pub groups: usize,
    /// Groups whose rows disagreed on a column that is neither key nor summed.
    /// Only the first row's values survive in those groups.
    pub diverged_groups: usize,
}

/// Hashable view of a cell used for grouping. Text "5" and the number 5 are
/// different keys.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum KeyPart {
    Empty,
    Text(String),
    Number(u64),
}

impl From<&CellValue> for KeyPart {
    fn from(cell: &CellValue) -> Self {
        match cell {
            CellValue::Empty => KeyPart::Empty,
            CellValue::Text(s) => KeyPart::Text(s.clone()),
            // Fold -0.0 into 0.0
            CellValue::Number(n) => KeyPart::Number((n + 0.0).to_bits()),
        }
    }
}

struct Group {
    first: Vec<CellValue>,
    sum: f64,
    diverged: bool,
}

/// Collapse body rows sharing the same `keys` values into one row.
///
/// Row 0 is the header and is copied through unchanged. Within a group the
/// `sum` column is the total of its numerically coerced values (anything
/// non-numeric counts as 0) and every other column keeps the first row's
/// value. Groups appear in the order their key was first seen.
pub fn merge_duplicates<S: AsRef<str>>(
    table: &Table,
    keys: &[S],
    sum: &str,
) -> Result<(Table, MergeReport)> {
    let header = HeaderIndex::from_table(table);
    let key_cols = header.require_all(keys)?;
    let sum_col = header.require(sum)?;

    let mut groups: IndexMap<Vec<KeyPart>, Group> = IndexMap::new();
    let body = table.rows().get(1..).unwrap_or_default();

    for row in body {
        let key: Vec<KeyPart> = key_cols.iter().map(|&c| KeyPart::from(&row[c])).collect();
        let qty = row[sum_col].coerce_number();
        match groups.get_mut(&key) {
            Some(group) => {
                group.sum += qty;
                if !group.diverged {
                    group.diverged = row.iter().enumerate().any(|(col, cell)| {
                        col != sum_col && !key_cols.contains(&col) && *cell != group.first[col]
                    });
                }
            }
            None => {
                groups.insert(
                    key,
                    Group {
                        first: row.clone(),
                        sum: qty,
                        diverged: false,
                    },
                );
            }
        }
    }

    let report = MergeReport {
        input_rows: body.len(),
        groups: groups.len(),
        diverged_groups: groups.values().filter(|g| g.diverged).count(),
    };

    let mut merged = Table::with_width(Vec::new(), table.column_count());
    if let Some(header_row) = table.row(0) {
        merged.push_row(header_row.to_vec());
    }
    for group in groups.into_values() {
        let mut row = group.first;
        row[sum_col] = CellValue::Number(group.sum);
        merged.push_row(row);
    }

    info!(
        input_rows = report.input_rows,
        groups = report.groups,
        diverged = report.diverged_groups,
        "merged duplicate rows"
    );
    Ok((merged, report))
}
