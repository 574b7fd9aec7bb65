//! Named commands and their dispatch against a [`Document`].

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Result, bail};
use tabulator_core::{Document, RangeSpec, SelectionRange, TabulatorError};
use tracing::warn;

use crate::clipboard::ClipboardProvider;

/// A user command, as typed after `-c`.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Load(PathBuf),
    Undo,
    Copy(Vec<RangeSpec>),
    Filter,
    Merge,
    Clear,
    ClearSelection(Vec<RangeSpec>),
    DeleteSelection(Vec<RangeSpec>),
    InsertBlank(Vec<RangeSpec>),
}

fn ranges_arg(command: &str, args: Option<&str>) -> std::result::Result<Vec<RangeSpec>, String> {
    let Some(args) = args.filter(|a| !a.is_empty()) else {
        return Err(format!("Usage: {} <RANGES> (e.g. {} A1:C3,5:6)", command, command));
    };
    let specs = RangeSpec::parse_list(args).map_err(|e| e.to_string())?;
    if specs.is_empty() {
        return Err(format!("{}: no ranges given", command));
    }
    Ok(specs)
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().splitn(2, ' ').collect();
        let command = parts[0];
        let args = parts.get(1).map(|s| s.trim());

        match command {
            "load" | "open" | "e" => match args {
                Some(path) if !path.is_empty() => Ok(Command::Load(PathBuf::from(path))),
                _ => Err("Usage: load <path>".to_string()),
            },
            "undo" | "u" => Ok(Command::Undo),
            "copy" | "y" => ranges_arg(command, args).map(Command::Copy),
            "filter" | "gfk" => Ok(Command::Filter),
            "merge" => Ok(Command::Merge),
            "clear" => Ok(Command::Clear),
            "clear-selection" | "cs" => ranges_arg(command, args).map(Command::ClearSelection),
            "delete-selection" | "ds" => ranges_arg(command, args).map(Command::DeleteSelection),
            "insert-blank" | "ib" => ranges_arg(command, args).map(Command::InsertBlank),
            _ => Err(format!("Unknown command: {}", command)),
        }
    }
}

fn resolve(doc: &Document, specs: &[RangeSpec]) -> Result<Vec<SelectionRange>> {
    let table = doc.table().ok_or(TabulatorError::NoData)?;
    Ok(RangeSpec::resolve_all(specs, table))
}

/// Apply a command to the document.
///
/// Returns a status line describing what happened. Errors leave the document
/// unchanged.
pub fn execute(
    doc: &mut Document,
    command: &Command,
    clipboard: &mut dyn ClipboardProvider,
) -> Result<String> {
    let status = match command {
        Command::Load(path) => {
            doc.load_file(path)?;
            let source = doc
                .load_source
                .map(|s| s.to_string())
                .unwrap_or_default();
            format!("Loaded {} as {}", path.display(), source)
        }
        Command::Undo => {
            if doc.can_undo() {
                doc.undo()?;
                format!("Undone ({} left)", doc.undo_depth())
            } else {
                warn!("nothing to undo");
                "Nothing to undo".to_string()
            }
        }
        Command::Copy(specs) => {
            let ranges = resolve(doc, specs)?;
            let text = doc.copy_selection(&ranges)?;
            let rows = text.lines().count();
            if !clipboard.set_text(text) {
                bail!("Failed to access clipboard");
            }
            format!("Copied {} rows", rows)
        }
        Command::Filter => {
            doc.filter_columns()?;
            format!("Filtered to {} columns", doc.profile.keep_columns.len())
        }
        Command::Merge => {
            let report = doc.merge_duplicates()?;
            if report.diverged_groups > 0 {
                warn!(
                    groups = report.diverged_groups,
                    "merged rows disagreed on other columns; kept first values"
                );
            }
            format!(
                "Merged {} rows into {} groups",
                report.input_rows, report.groups
            )
        }
        Command::Clear => {
            if doc.has_data() {
                doc.clear_data();
                "Cleared data".to_string()
            } else {
                "Nothing to clear".to_string()
            }
        }
        Command::ClearSelection(specs) => {
            let ranges = resolve(doc, specs)?;
            let cleared = doc.clear_selection(&ranges)?;
            format!("Cleared {} cells", cleared)
        }
        Command::DeleteSelection(specs) => {
            let ranges = resolve(doc, specs)?;
            let counts = doc.delete_selection(&ranges)?;
            format!("Deleted {} rows and {} columns", counts.rows, counts.columns)
        }
        Command::InsertBlank(specs) => {
            let ranges = resolve(doc, specs)?;
            let counts = doc.insert_blank(&ranges)?;
            format!("Inserted {} rows and {} columns", counts.rows, counts.columns)
        }
    };
    Ok(status)
}
