//! tabulator-core - UI-agnostic table model, recovery loader and transforms.

pub mod document;
pub mod error;
pub mod profile;
pub mod storage;
pub mod table;
pub mod transform;

pub use document::{Document, LoadSource};
pub use error::{Result, TabulatorError};
pub use profile::TransformProfile;
pub use table::{CellValue, RangeSpec, SelectionRange, Table};
