//! Load a file into a [`Table`], recovering mislabeled or oddly encoded files.
//!
//! Strategies run in a fixed order and the first success wins:
//!
//! 1. structured spreadsheet parsing, only for spreadsheet extensions;
//! 2. tab-separated text, once per [`CANDIDATES`] encoding.
//!
//! A strategy failure is never surfaced on its own; only when every strategy
//! has failed does the load fail with [`TabulatorError::Load`].

use std::fmt;
use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use tracing::{debug, info, warn};

use super::encodings::{CANDIDATES, TextEncoding};
use crate::error::{Result, TabulatorError};
use crate::table::{CellValue, Table};

/// Extensions handed to the spreadsheet parser first.
pub const SPREADSHEET_EXTENSIONS: &[&str] = &["xls", "xlsx", "xlsm", "xlsb", "ods"];

/// Which strategy produced a loaded table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadSource {
    Spreadsheet,
    Text(TextEncoding),
}

impl fmt::Display for LoadSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadSource::Spreadsheet => f.write_str("spreadsheet"),
            LoadSource::Text(encoding) => write!(f, "tab-separated text ({})", encoding),
        }
    }
}

pub fn is_spreadsheet_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SPREADSHEET_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Load `path` with spreadsheet parsing and then text recovery.
pub fn load(path: &Path) -> Result<(Table, LoadSource)> {
    if is_spreadsheet_path(path) {
        match parse_spreadsheet(path) {
            Ok(table) => {
                info!(path = %path.display(), rows = table.row_count(), "loaded spreadsheet");
                return Ok((table, LoadSource::Spreadsheet));
            }
            Err(reason) => {
                warn!(path = %path.display(), %reason, "spreadsheet parse failed, trying text recovery");
            }
        }
    }

    let bytes = std::fs::read(path).map_err(|e| TabulatorError::Load {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    match recover_text(&bytes) {
        Ok((table, encoding)) => {
            info!(path = %path.display(), %encoding, rows = table.row_count(), "recovered delimited text");
            Ok((table, LoadSource::Text(encoding)))
        }
        Err(reason) => Err(TabulatorError::Load {
            path: path.to_path_buf(),
            reason,
        }),
    }
}

/// Parse the first worksheet; every row, including the first, is data.
pub fn parse_spreadsheet(path: &Path) -> std::result::Result<Table, String> {
    let mut workbook =
        open_workbook_auto(path).map_err(|e| format!("Failed to open spreadsheet: {}", e))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| "Spreadsheet contains no sheets".to_string())?
        .map_err(|e| format!("Failed to read first sheet: {}", e))?;

    let rows = range
        .rows()
        .map(|row| row.iter().map(cell_from_data).collect())
        .collect();
    Ok(Table::from_rows(rows))
}

fn cell_from_data(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) if s.is_empty() => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(n) => CellValue::Number(*n),
        Data::Int(n) => CellValue::from_int(*n),
        other => CellValue::Text(other.to_string()),
    }
}

/// Try every candidate encoding in order. On total failure returns the last
/// strategy's reason.
pub fn recover_text(bytes: &[u8]) -> std::result::Result<(Table, TextEncoding), String> {
    let mut last_reason = "No encodings to try".to_string();

    for &encoding in CANDIDATES.iter() {
        let Some(text) = encoding.decode(bytes) else {
            debug!(%encoding, "decode failed");
            last_reason = format!("{}: malformed input", encoding);
            continue;
        };
        match parse_delimited(&text, b'\t') {
            Ok(table) => return Ok((table, encoding)),
            Err(reason) => {
                debug!(%encoding, %reason, "parse failed");
                last_reason = format!("{}: {}", encoding, reason);
            }
        }
    }

    Err(format!(
        "no candidate encoding parsed the file (last: {})",
        last_reason
    ))
}

/// Parse delimited text without a header row.
///
/// The first record fixes the column count: shorter records are padded with
/// empty cells, a longer record is an error. Blank lines are skipped and
/// content with no records at all is an error.
pub fn parse_delimited(text: &str, delimiter: u8) -> std::result::Result<Table, String> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows: Vec<Vec<CellValue>> = Vec::new();
    let mut width = 0usize;

    for result in reader.records() {
        let record = result.map_err(|e| e.to_string())?;
        if record.len() == 1 && record.get(0).is_some_and(str::is_empty) {
            continue;
        }
        if rows.is_empty() {
            width = record.len();
        } else if record.len() > width {
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            return Err(format!(
                "Expected {} fields in line {}, saw {}",
                width,
                line,
                record.len()
            ));
        }
        rows.push(record.iter().map(CellValue::from_field).collect());
    }

    if rows.is_empty() {
        return Err("No columns to parse".to_string());
    }
    Ok(Table::with_width(rows, width))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_parse_delimited_pads_short_rows() {
        let table = parse_delimited("a\tb\tc\n1\t2\n", b'\t').unwrap();
        assert_eq!(table.shape(), (2, 3));
        assert_eq!(table.get(1, 2), Some(&CellValue::Empty));
        assert_eq!(table.get(1, 0), Some(&CellValue::Number(1.0)));
    }

    #[test]
    fn test_parse_delimited_rejects_long_rows() {
        let err = parse_delimited("a\tb\n1\t2\t3\n", b'\t').unwrap_err();
        assert!(err.contains("Expected 2 fields"), "{err}");
    }

    #[test]
    fn test_parse_delimited_skips_blank_lines() {
        let table = parse_delimited("a\tb\n\n1\t2\n", b'\t').unwrap();
        assert_eq!(table.shape(), (2, 2));
    }

    #[test]
    fn test_parse_delimited_empty_content_fails() {
        assert!(parse_delimited("", b'\t').is_err());
        assert!(parse_delimited("\n\n", b'\t').is_err());
    }

    #[test]
    fn test_recover_ascii() {
        let (table, encoding) = recover_text(b"so_number\tso_qty\nA\t5\n").unwrap();
        assert_eq!(encoding, TextEncoding::Ascii);
        assert_eq!(table.display(1, 1), "5");
    }

    #[test]
    fn test_recover_utf8() {
        let (table, encoding) = recover_text("name\tcity\nZoë\tKöln\n".as_bytes()).unwrap();
        assert_eq!(encoding.name(), "UTF-8");
        assert_eq!(table.display(1, 0), "Zoë");
    }

    #[test]
    fn test_recover_utf8_with_bom() {
        let mut bytes = b"\xEF\xBB\xBF".to_vec();
        bytes.extend_from_slice("a\tb\n1\t2\n".as_bytes());
        let (table, encoding) = recover_text(&bytes).unwrap();
        assert_eq!(encoding, TextEncoding::Utf8Bom);
        assert_eq!(table.display(0, 0), "a");
    }

    #[test]
    fn test_recover_utf16_with_bom() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "a\tb\n1\t2\n".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        let (table, encoding) = recover_text(&bytes).unwrap();
        assert_eq!(encoding, TextEncoding::Utf16Bom);
        assert_eq!(table.shape(), (2, 2));
        assert_eq!(table.display(0, 1), "b");
    }

    #[test]
    fn test_recover_legacy_code_page() {
        // "café\t1\n" in windows-125x; odd length rules out BOM-less UTF-16.
        let (table, encoding) = recover_text(b"caf\xE9\t1\n").unwrap();
        assert_eq!(encoding.name(), "windows-1250");
        assert_eq!(table.display(0, 0), "café");
    }

    #[test]
    fn test_load_missing_file_is_load_error() {
        let dir = tempdir().unwrap();
        let err = load(&dir.path().join("missing.tsv")).unwrap_err();
        assert!(matches!(err, TabulatorError::Load { .. }));
    }

    #[test]
    fn test_load_empty_file_fails_every_strategy() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.tsv");
        fs::write(&path, b"").unwrap();
        let err = load(&path).unwrap_err();
        assert!(err.to_string().contains("Recovery failed"), "{err}");
    }

    #[test]
    fn test_mislabeled_spreadsheet_falls_back_to_text() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("export.xls");
        fs::write(&path, "so_number\titem_desc\tso_qty\nSO1\tWidget\t3\n").unwrap();

        let (table, source) = load(&path).unwrap();
        assert_eq!(source, LoadSource::Text(TextEncoding::Ascii));
        assert_eq!(table.shape(), (2, 3));
        assert_eq!(table.display(0, 0), "so_number");
    }

    #[test]
    fn test_load_real_xlsx_without_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("orders.xlsx");

        let mut workbook = rust_xlsxwriter::Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "so_number").unwrap();
        sheet.write_string(0, 1, "so_qty").unwrap();
        sheet.write_string(1, 0, "SO1").unwrap();
        sheet.write_number(1, 1, 5).unwrap();
        workbook.save(&path).unwrap();

        let (table, source) = load(&path).unwrap();
        assert_eq!(source, LoadSource::Spreadsheet);
        assert_eq!(table.shape(), (2, 2));
        assert_eq!(table.display(0, 1), "so_qty");
        assert_eq!(table.get(1, 1), Some(&CellValue::Number(5.0)));
    }

    #[test]
    fn test_parse_delimited_keeps_wide_ids_verbatim() {
        let text = "so_number\tso_qty\n12345678901234567890\t1\n9007199254740993\t2\n-0\t3\n";
        let table = parse_delimited(text, b'\t').unwrap();
        assert_eq!(table.display(1, 0), "12345678901234567890");
        assert_eq!(table.display(2, 0), "9007199254740993");
        assert_eq!(table.display(3, 0), "-0");
        assert_eq!(table.get(3, 1), Some(&CellValue::Number(3.0)));
    }

    #[test]
    fn test_spreadsheet_int_outside_f64_range_is_text() {
        assert_eq!(
            cell_from_data(&Data::Int(9_007_199_254_740_993)),
            CellValue::text("9007199254740993")
        );
        assert_eq!(cell_from_data(&Data::Int(42)), CellValue::Number(42.0));
    }

    #[test]
    fn test_load_xlsx_with_empty_first_sheet_is_accepted() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("blank.xlsx");

        let mut workbook = rust_xlsxwriter::Workbook::new();
        workbook.add_worksheet();
        workbook.save(&path).unwrap();

        let (table, source) = load(&path).unwrap();
        assert_eq!(source, LoadSource::Spreadsheet);
        assert!(table.is_empty());
    }

    #[test]
    fn test_spreadsheet_extension_is_case_insensitive() {
        assert!(is_spreadsheet_path(Path::new("a.XLSX")));
        assert!(is_spreadsheet_path(Path::new("a.ods")));
        assert!(!is_spreadsheet_path(Path::new("a.csv")));
        assert!(!is_spreadsheet_path(Path::new("noext")));
    }
}
