//! Positional, column-pair-by-column-pair comparison of two sheets.
//!
//! Rows are aligned by position only. For each resolved match both sheets'
//! data rows are walked in lockstep and the walk stops at the shorter sheet
//! without raising anything. The pass never short-circuits: every mismatch
//! is collected.

use serde::Serialize;

use crate::{
    cell::{stringify, values_equal},
    diagnostics::Diagnostic,
    header::HeaderIndex,
    matcher::{ColumnMatch, unresolved_diagnostics},
    sheet::Sheet,
};

/// One differing cell pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MismatchRecord {
    /// 1-based position of the column match in the mapping.
    pub tag_id: usize,
    /// 1-based row of the source sheet holding `value1`.
    pub row: usize,
    pub field_name: String,
    pub value1: String,
    pub value2: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub identical: bool,
    pub mismatches: Vec<MismatchRecord>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Comparison {
    pub fn unresolved_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|diagnostic| matches!(diagnostic, Diagnostic::UnresolvedMapping { .. }))
            .count()
    }
}

pub fn compare(
    source: &Sheet,
    target: &Sheet,
    source_header: &HeaderIndex,
    target_header: &HeaderIndex,
    matches: &[ColumnMatch],
) -> Comparison {
    let mut diagnostics = unresolved_diagnostics(matches);
    let unresolved = !diagnostics.is_empty();
    let mut mismatches = Vec::new();

    for (position, column_match) in matches.iter().enumerate() {
        let tag_id = position + 1;
        let Some((source_index, target_index)) = column_match.indices() else {
            continue;
        };
        let field_name = source_header
            .name_of(source_index)
            .unwrap_or(column_match.source_name())
            .to_string();
        let target_field = target_header
            .name_of(target_index)
            .unwrap_or(column_match.target_name());

        for (source_row, target_row) in source.data_rows().zip(target.data_rows()) {
            let left = source_row.cell(source_index);
            let right = target_row.cell(target_index);
            if values_equal(left, right) {
                continue;
            }
            let record = MismatchRecord {
                tag_id,
                row: source_row.number(),
                field_name: field_name.clone(),
                value1: stringify(left),
                value2: stringify(right),
            };
            diagnostics.push(Diagnostic::CellMismatch {
                tag_id,
                row: record.row,
                target_row: target_row.number(),
                source_field: field_name.clone(),
                target_field: target_field.to_string(),
                value1: record.value1.clone(),
                value2: record.value2.clone(),
            });
            mismatches.push(record);
        }
    }

    Comparison {
        identical: mismatches.is_empty() && !unresolved,
        mismatches,
        diagnostics,
    }
}
