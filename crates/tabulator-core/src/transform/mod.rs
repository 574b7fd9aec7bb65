//! Table transforms.
//!
//! Every function here either returns a new table or validates all of its
//! inputs before touching the table it is given, so a failed transform never
//! leaves a half-edited table behind.

mod merge;
mod project;
mod structure;

pub use merge::{MergeReport, merge_duplicates};
pub use project::project_columns;
pub use structure::{EditCounts, Span, clear_ranges, delete_ranges, insert_blank_ranges};
