//! Cell values.

use std::fmt;

/// A single cell: text, a number, or nothing.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
}

impl CellValue {
    pub fn text(s: impl Into<String>) -> Self {
        CellValue::Text(s.into())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Type a raw delimited-text field.
    ///
    /// - Empty string -> Empty
    /// - Valid number -> Number (unless it has leading zeros like "007")
    /// - Otherwise -> Text, kept verbatim
    pub fn from_field(field: &str) -> Self {
        if field.is_empty() {
            return CellValue::Empty;
        }

        let trimmed = field.trim();
        if field != trimmed {
            return CellValue::Text(field.to_string());
        }

        // "007" and "00123" stay text; "0" and "0.5" are numbers.
        if trimmed.starts_with('0')
            && trimmed.len() > 1
            && !trimmed.starts_with("0.")
            && trimmed.chars().nth(1).is_some_and(|c| c.is_ascii_digit())
        {
            return CellValue::Text(trimmed.to_string());
        }

        if is_integer_literal(trimmed) {
            // IDs wider than f64's exact integer range stay text, as do
            // spellings a number would not print back ("-0", "+5").
            return match trimmed.parse::<i64>() {
                Ok(i) if fits_f64(i) && format_number(i as f64) == trimmed => {
                    CellValue::Number(i as f64)
                }
                _ => CellValue::Text(trimmed.to_string()),
            };
        }

        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() && significant_digits(trimmed) <= MAX_SIGNIFICANT_DIGITS => {
                CellValue::Number(n)
            }
            _ => CellValue::Text(trimmed.to_string()),
        }
    }

    /// Type an integer read from a spreadsheet.
    pub fn from_int(n: i64) -> Self {
        if fits_f64(n) {
            CellValue::Number(n as f64)
        } else {
            CellValue::Text(n.to_string())
        }
    }

    /// Lenient numeric coercion: anything that does not read as a finite
    /// number becomes `0.0`.
    pub fn coerce_number(&self) -> f64 {
        match self {
            CellValue::Number(n) if n.is_finite() => *n,
            CellValue::Text(s) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .unwrap_or(0.0),
            _ => 0.0,
        }
    }
}

/// Largest magnitude below which every integer is exact in an `f64`.
const MAX_EXACT_INT: u64 = 1 << 53;

/// Decimal digits an `f64` always carries exactly.
const MAX_SIGNIFICANT_DIGITS: usize = 15;

fn fits_f64(n: i64) -> bool {
    n.unsigned_abs() <= MAX_EXACT_INT
}

fn is_integer_literal(s: &str) -> bool {
    let digits = s.strip_prefix(['-', '+']).unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Digits of the mantissa, ignoring leading zeros.
fn significant_digits(s: &str) -> usize {
    let mantissa = s.split(['e', 'E']).next().unwrap_or(s);
    mantissa
        .bytes()
        .filter(u8::is_ascii_digit)
        .skip_while(|&b| b == b'0')
        .count()
}

/// Format a number for display.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "#NAN!".to_string()
    } else if n.is_infinite() {
        "#INF!".to_string()
    } else if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{:.0}", n)
    } else {
        n.to_string()
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Number(n) => f.write_str(&format_number(*n)),
        }
    }
}
