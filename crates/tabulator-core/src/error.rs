//! Error types for Tabulator core.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or transforming a table
#[derive(Error, Debug)]
pub enum TabulatorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Recovery failed for {}: {reason}", .path.display())]
    Load { path: PathBuf, reason: String },

    #[error("Column '{0}' is missing")]
    MissingColumn(String),

    #[error("No data loaded")]
    NoData,

    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("Invalid range: {0}")]
    InvalidRangeSpec(String),

    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("Profile error: {0}")]
    Profile(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, TabulatorError>;
