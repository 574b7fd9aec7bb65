use indexmap::IndexSet;

use crate::error::Result;
use crate::table::{HeaderIndex, Table};

/// Keep only the columns named in `keep`, in the order of `keep`.
///
/// Row 0 is read as the header for the lookup and stays row 0 of the result.
/// Repeated names in `keep` are collapsed to their first occurrence.
pub fn project_columns<S: AsRef<str>>(table: &Table, keep: &[S]) -> Result<Table> {
    let names: IndexSet<&str> = keep.iter().map(|name| name.as_ref()).collect();
    let names: Vec<&str> = names.into_iter().collect();
    let columns = HeaderIndex::from_table(table).require_all(&names)?;
    Ok(table.select_columns(&columns))
}
