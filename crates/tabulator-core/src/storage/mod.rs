//! Loading files and serializing selections.

pub mod clipboard;
pub mod encodings;
pub mod loader;

pub use clipboard::copy_selection;
pub use encodings::{CANDIDATES, TextEncoding};
pub use loader::{LoadSource, is_spreadsheet_path, load, parse_delimited, recover_text};
