//! Column names used by the named transforms.
//!
//! A profile is a small TOML file; every key is optional:
//!
//! ```toml
//! keep_columns = ["so_number", "item_number", "item_desc", "so_qty", "orderamt"]
//! merge_keys = ["so_number", "item_desc"]
//! merge_sum = "so_qty"
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::Result;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransformProfile {
    /// Columns kept by the column filter, in output order.
    pub keep_columns: Vec<String>,
    /// Columns that identify duplicate rows.
    pub merge_keys: Vec<String>,
    /// Column summed across duplicates.
    pub merge_sum: String,
}

impl Default for TransformProfile {
    fn default() -> Self {
        TransformProfile {
            keep_columns: ["so_number", "item_number", "item_desc", "so_qty", "orderamt"]
                .map(String::from)
                .to_vec(),
            merge_keys: ["so_number", "item_desc"].map(String::from).to_vec(),
            merge_sum: "so_qty".to_string(),
        }
    }
}

impl TransformProfile {
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}
