use crate::profile::TransformProfile;
use crate::storage::LoadSource;
use crate::table::Table;
use std::path::PathBuf;

/// UI-agnostic application state: the current table and its undo history.
#[derive(Clone, Debug, Default)]
pub struct Document {
    /// The current table; `None` until something is loaded (and after clear)
    pub table: Option<Table>,
    /// Snapshots taken before each mutation, most recent last
    pub undo_stack: Vec<Table>,
    /// Path of the last successful load
    pub file_path: Option<PathBuf>,
    /// Strategy that produced the last successful load
    pub load_source: Option<LoadSource>,
    /// Column names for the named transforms
    pub profile: TransformProfile,
}

impl Document {
    /// Create an empty document with the default profile.
    ///
    /// This constructor is side-effect free: it does not touch the filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(profile: TransformProfile) -> Self {
        Document {
            profile,
            ..Self::default()
        }
    }

    pub fn table(&self) -> Option<&Table> {
        self.table.as_ref()
    }

    pub fn has_data(&self) -> bool {
        self.table.is_some()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Push a copy of the current table. Does nothing when the table is
    /// absent or empty.
    pub fn save_undo_state(&mut self) {
        if let Some(table) = self.table.as_ref().filter(|t| !t.is_empty()) {
            self.undo_stack.push(table.clone());
        }
    }
}
