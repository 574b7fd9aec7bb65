//! Transient header interpretation of row 0.

use indexmap::IndexMap;

use super::Table;
use crate::error::{Result, TabulatorError};

/// Column name -> position mapping read from row 0 of a table.
///
/// When a name occurs more than once the first occurrence wins.
#[derive(Clone, Debug, Default)]
pub struct HeaderIndex {
    names: IndexMap<String, usize>,
}

impl HeaderIndex {
    pub fn from_table(table: &Table) -> Self {
        let mut names = IndexMap::new();
        if let Some(header) = table.row(0) {
            for (col, cell) in header.iter().enumerate() {
                names.entry(cell.to_string()).or_insert(col);
            }
        }
        HeaderIndex { names }
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.get(name).copied()
    }

    pub fn require(&self, name: &str) -> Result<usize> {
        self.position(name)
            .ok_or_else(|| TabulatorError::MissingColumn(name.to_string()))
    }

    /// Resolve every name, failing on the first one that is absent.
    pub fn require_all<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<usize>> {
        names.iter().map(|n| self.require(n.as_ref())).collect()
    }
}
