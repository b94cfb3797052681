//! Typed cell values and the type-aware comparator.
//!
//! An absent cell (no cell at that position) is modelled as `None` at the
//! accessor; [`CellValue::Blank`] is a cell that exists but carries no value.
//! The two compare differently but stringify identically.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    String(String),
    Numeric(f64),
    Boolean(bool),
    Blank,
    /// Formula errors and any other kind without a typed accessor.
    Error(String),
}

impl CellValue {
    pub fn kind(&self) -> &'static str {
        match self {
            CellValue::String(_) => "string",
            CellValue::Numeric(_) => "numeric",
            CellValue::Boolean(_) => "boolean",
            CellValue::Blank => "blank",
            CellValue::Error(_) => "error",
        }
    }

    /// Classifies typed text the way a spreadsheet does when importing
    /// delimited files: booleans and finite numbers become typed cells.
    pub fn from_text(raw: &str) -> Self {
        if raw.is_empty() {
            return CellValue::Blank;
        }
        if raw.eq_ignore_ascii_case("true") {
            return CellValue::Boolean(true);
        }
        if raw.eq_ignore_ascii_case("false") {
            return CellValue::Boolean(false);
        }
        match raw.trim().parse::<f64>() {
            Ok(number) if number.is_finite() => CellValue::Numeric(number),
            _ => CellValue::String(raw.to_string()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", stringify(Some(self)))
    }
}

pub fn values_equal(left: Option<&CellValue>, right: Option<&CellValue>) -> bool {
    match (left, right) {
        (None, None) => true,
        (None, Some(_)) | (Some(_), None) => false,
        (Some(CellValue::String(a)), Some(CellValue::String(b))) => a == b,
        (Some(CellValue::Numeric(a)), Some(CellValue::Numeric(b))) => a == b,
        (Some(CellValue::Boolean(a)), Some(CellValue::Boolean(b))) => a == b,
        (Some(CellValue::Blank), Some(CellValue::Blank)) => true,
        _ => false,
    }
}

pub fn stringify(cell: Option<&CellValue>) -> String {
    match cell {
        None | Some(CellValue::Blank) | Some(CellValue::Error(_)) => String::new(),
        Some(CellValue::String(s)) => s.clone(),
        Some(CellValue::Numeric(n)) => render_numeric(*n),
        Some(CellValue::Boolean(b)) => b.to_string(),
    }
}

/// Renders a double independently of locale. Integral values keep a `.0`
/// suffix; magnitudes outside `[1e-3, 1e7)` switch to `d.dddE±n`.
pub fn render_numeric(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }
    let magnitude = value.abs();
    if (1e-3..1e7).contains(&magnitude) {
        let mut rendered = value.to_string();
        if !rendered.contains('.') {
            rendered.push_str(".0");
        }
        return rendered;
    }
    let scientific = format!("{value:E}");
    match scientific.split_once('E') {
        Some((mantissa, exponent)) if !mantissa.contains('.') => {
            format!("{mantissa}.0E{exponent}")
        }
        _ => scientific,
    }
}
