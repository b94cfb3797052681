//! Structured events raised while matching columns and comparing cells.
//!
//! Core code never prints; the command layer decides how events surface.

use std::fmt;

use serde::Serialize;

use crate::matcher::MissingSide;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    UnresolvedMapping {
        tag_id: usize,
        source_name: String,
        target_name: String,
        missing: MissingSide,
    },
    CellMismatch {
        tag_id: usize,
        /// 1-based row of the source sheet.
        row: usize,
        /// 1-based row of the target sheet paired with `row`.
        target_row: usize,
        source_field: String,
        target_field: String,
        value1: String,
        value2: String,
    },
}

impl Diagnostic {
    pub fn tag_id(&self) -> usize {
        match self {
            Diagnostic::UnresolvedMapping { tag_id, .. }
            | Diagnostic::CellMismatch { tag_id, .. } => *tag_id,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnresolvedMapping {
                tag_id,
                source_name,
                target_name,
                missing,
            } => write!(
                f,
                "[tag {tag_id}] column mapping not found for '{source_name}' or '{target_name}' ({missing})"
            ),
            Diagnostic::CellMismatch {
                tag_id,
                row,
                target_row,
                source_field,
                target_field,
                value1,
                value2,
            } => {
                write!(f, "[tag {tag_id}] row {row}")?;
                if target_row != row {
                    write!(f, " (target row {target_row})")?;
                }
                write!(
                    f,
                    ": '{source_field}' = '{value1}' vs '{target_field}' = '{value2}'"
                )
            }
        }
    }
}
