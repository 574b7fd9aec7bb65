use super::Document;
use crate::error::{Result, TabulatorError};
use crate::storage::copy_selection;
use crate::table::{SelectionRange, Table};
use crate::transform::{self, EditCounts, MergeReport};
use tracing::debug;

impl Document {
    /// Run `op` against the current table and commit its result.
    ///
    /// The snapshot is pushed only once `op` has succeeded, so a failed
    /// operation leaves both the table and the undo stack untouched.
    fn apply<T>(&mut self, name: &str, op: impl FnOnce(&Table) -> Result<(Table, T)>) -> Result<T> {
        let current = self.table.as_ref().ok_or(TabulatorError::NoData)?;
        let (next, outcome) = op(current)?;
        self.save_undo_state();
        debug!(
            op = name,
            rows = next.row_count(),
            columns = next.column_count(),
            undo_depth = self.undo_stack.len(),
            "applied"
        );
        self.table = Some(next);
        Ok(outcome)
    }

    /// Run a structural edit on a copy of the current table.
    ///
    /// An empty table has nothing to edit: the call succeeds without touching
    /// the table or the undo stack.
    fn edit<T: Default>(
        &mut self,
        name: &str,
        op: impl FnOnce(&mut Table) -> Result<T>,
    ) -> Result<T> {
        let current = self.table.as_ref().ok_or(TabulatorError::NoData)?;
        if current.is_empty() {
            debug!(op = name, "table is empty, nothing to edit");
            return Ok(T::default());
        }
        self.apply(name, |table| {
            let mut next = table.clone();
            let outcome = op(&mut next)?;
            Ok((next, outcome))
        })
    }

    /// Keep only the profile's `keep_columns`, in that order.
    pub fn filter_columns(&mut self) -> Result<()> {
        let keep = self.profile.keep_columns.clone();
        self.project_columns(&keep)
    }

    /// Keep only the named columns, in the given order.
    pub fn project_columns<S: AsRef<str>>(&mut self, keep: &[S]) -> Result<()> {
        self.apply("project", |table| {
            Ok((transform::project_columns(table, keep)?, ()))
        })
    }

    /// Merge duplicates using the profile's key and sum columns.
    pub fn merge_duplicates(&mut self) -> Result<MergeReport> {
        let keys = self.profile.merge_keys.clone();
        let sum = self.profile.merge_sum.clone();
        self.merge_duplicates_by(&keys, &sum)
    }

    pub fn merge_duplicates_by<S: AsRef<str>>(&mut self, keys: &[S], sum: &str) -> Result<MergeReport> {
        self.apply("merge", |table| transform::merge_duplicates(table, keys, sum))
    }

    /// Null out every selected cell. Returns the number of cells cleared.
    pub fn clear_selection(&mut self, ranges: &[SelectionRange]) -> Result<usize> {
        self.edit("clear-selection", |table| transform::clear_ranges(table, ranges))
    }

    /// Delete fully selected rows and columns.
    pub fn delete_selection(&mut self, ranges: &[SelectionRange]) -> Result<EditCounts> {
        self.edit("delete-selection", |table| transform::delete_ranges(table, ranges))
    }

    /// Insert blank rows/columns before fully selected rows/columns.
    pub fn insert_blank(&mut self, ranges: &[SelectionRange]) -> Result<EditCounts> {
        self.edit("insert-blank", |table| transform::insert_blank_ranges(table, ranges))
    }

    /// Drop the whole table. Undoable when the table had any cells.
    pub fn clear_data(&mut self) {
        self.save_undo_state();
        self.table = None;
    }

    /// Restore the most recent snapshot.
    pub fn undo(&mut self) -> Result<()> {
        let snapshot = self.undo_stack.pop().ok_or(TabulatorError::NothingToUndo)?;
        self.table = Some(snapshot);
        Ok(())
    }

    /// Clipboard text for the selected ranges.
    pub fn copy_selection(&self, ranges: &[SelectionRange]) -> Result<String> {
        let table = self.table.as_ref().ok_or(TabulatorError::NoData)?;
        copy_selection(table, ranges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::TransformProfile;

    fn orders_doc() -> Document {
        let mut doc = Document::new();
        doc.table = Some(Table::from(vec![
            ["so_number", "item_number", "item_desc", "so_qty", "orderamt", "notes"],
            ["A", "1", "X", "5", "10", "n1"],
            ["A", "1", "X", "bad", "10", "n2"],
            ["B", "2", "Y", "3", "7", "n3"],
        ]));
        doc
    }

    #[test]
    fn test_filter_then_merge_then_undo_twice() {
        let mut doc = orders_doc();
        let original = doc.table.clone();

        doc.filter_columns().unwrap();
        let filtered = doc.table.clone();
        assert_eq!(doc.table().map(Table::column_count), Some(5));

        let report = doc.merge_duplicates().unwrap();
        assert_eq!(report.groups, 2);
        assert_eq!(doc.table().map(Table::row_count), Some(3));
        assert_eq!(doc.undo_depth(), 2);

        doc.undo().unwrap();
        assert_eq!(doc.table, filtered);
        assert_eq!(doc.undo_depth(), 1);
        doc.undo().unwrap();
        assert_eq!(doc.table, original);
        assert!(!doc.can_undo());
    }

    #[test]
    fn test_missing_column_changes_nothing() {
        let mut doc = orders_doc();
        doc.profile = TransformProfile {
            keep_columns: vec!["so_number".into(), "nope".into()],
            ..TransformProfile::default()
        };
        let before = doc.table.clone();

        let err = doc.filter_columns().unwrap_err();
        assert!(matches!(err, TabulatorError::MissingColumn(ref n) if n == "nope"));
        assert_eq!(doc.table, before);
        assert_eq!(doc.undo_depth(), 0);
    }

    #[test]
    fn test_operations_without_data() {
        let mut doc = Document::new();
        let range = SelectionRange::cell(0, 0);
        assert!(matches!(doc.filter_columns(), Err(TabulatorError::NoData)));
        assert!(matches!(doc.merge_duplicates(), Err(TabulatorError::NoData)));
        assert!(matches!(doc.clear_selection(&[range]), Err(TabulatorError::NoData)));
        assert!(matches!(doc.delete_selection(&[range]), Err(TabulatorError::NoData)));
        assert!(matches!(doc.insert_blank(&[range]), Err(TabulatorError::NoData)));
        assert!(matches!(doc.copy_selection(&[range]), Err(TabulatorError::NoData)));
        assert!(matches!(doc.undo(), Err(TabulatorError::NothingToUndo)));

        doc.clear_data();
        assert_eq!(doc.undo_depth(), 0);
    }

    #[test]
    fn test_each_structural_edit_is_one_undo_step() {
        let mut doc = orders_doc();
        let original = doc.table.clone();
        let table = original.clone().unwrap();

        doc.clear_selection(&[SelectionRange::cell(1, 0)]).unwrap();
        doc.delete_selection(&[SelectionRange::whole_row(2, &table)])
            .unwrap();
        doc.insert_blank(&[SelectionRange::whole_column(0, &table)])
            .unwrap_err();
        assert_eq!(doc.undo_depth(), 2);

        doc.undo().unwrap();
        doc.undo().unwrap();
        assert_eq!(doc.table, original);
    }

    #[test]
    fn test_clear_data_is_undoable() {
        let mut doc = orders_doc();
        let original = doc.table.clone();
        doc.clear_data();
        assert!(!doc.has_data());
        doc.undo().unwrap();
        assert_eq!(doc.table, original);
    }

    #[test]
    fn test_copy_does_not_touch_undo() {
        let doc = orders_doc();
        let text = doc
            .copy_selection(&[SelectionRange::new(1, 2, 3, 4)])
            .unwrap();
        assert_eq!(text, "5\t10\nbad\t10");
        assert_eq!(doc.undo_depth(), 0);
    }

    #[test]
    fn test_emptied_table_takes_no_snapshots() {
        let mut doc = Document::new();
        doc.table = Some(Table::from(vec![["a", "b"], ["1", "2"]]));
        let all = SelectionRange::all(doc.table().unwrap());

        doc.delete_selection(&[all]).unwrap();
        assert_eq!(doc.table().map(Table::shape), Some((0, 2)));
        assert_eq!(doc.undo_depth(), 1);

        let counts = doc.delete_selection(&[]).unwrap();
        assert_eq!(counts, EditCounts::default());
        doc.save_undo_state();
        doc.clear_data();
        assert_eq!(doc.undo_depth(), 1);

        doc.undo().unwrap();
        assert_eq!(doc.table().map(Table::shape), Some((2, 2)));
    }

    #[test]
    fn test_structural_edits_on_loaded_zero_row_table() {
        let mut doc = Document::new();
        doc.table = Some(Table::with_width(Vec::new(), 3));
        let before = doc.table.clone();
        let range = SelectionRange::new(0, 0, 0, 2);

        assert_eq!(doc.clear_selection(&[range]).unwrap(), 0);
        assert_eq!(doc.delete_selection(&[range]).unwrap(), EditCounts::default());
        assert_eq!(doc.insert_blank(&[range]).unwrap(), EditCounts::default());
        assert_eq!(doc.table, before);
        assert!(!doc.can_undo());
    }
}
