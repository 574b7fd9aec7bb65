use super::Document;
use crate::error::Result;
use crate::storage::load;
use std::path::Path;

impl Document {
    /// Replace the table with the contents of `path`.
    ///
    /// Loading is not undoable and leaves the undo stack as it is. On failure
    /// the current table is kept.
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        let (table, source) = load(path)?;
        self.table = Some(table);
        self.file_path = Some(path.to_path_buf());
        self.load_source = Some(source);
        Ok(())
    }
}
