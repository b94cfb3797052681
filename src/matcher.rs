//! Resolves the column mapping against both header indices.
//!
//! The result holds one [`ColumnMatch`] per mapping entry, in mapping order.
//! Position `i` is reported as tag id `i + 1`, so the list is never sorted or
//! compacted; unresolved entries stay in place.

use std::fmt;

use serde::Serialize;

use crate::{diagnostics::Diagnostic, header::HeaderIndex, mapping::ColumnMapping};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingSide {
    Source,
    Target,
    Both,
}

impl fmt::Display for MissingSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            MissingSide::Source => "source column missing",
            MissingSide::Target => "target column missing",
            MissingSide::Both => "source and target columns missing",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ColumnMatch {
    Resolved {
        source_index: usize,
        target_index: usize,
        source_name: String,
        target_name: String,
    },
    Unresolved {
        source_name: String,
        target_name: String,
        missing: MissingSide,
    },
}

impl ColumnMatch {
    pub fn is_resolved(&self) -> bool {
        matches!(self, ColumnMatch::Resolved { .. })
    }

    pub fn source_name(&self) -> &str {
        match self {
            ColumnMatch::Resolved { source_name, .. }
            | ColumnMatch::Unresolved { source_name, .. } => source_name,
        }
    }

    pub fn target_name(&self) -> &str {
        match self {
            ColumnMatch::Resolved { target_name, .. }
            | ColumnMatch::Unresolved { target_name, .. } => target_name,
        }
    }

    /// `(source_index, target_index)` for resolved matches.
    pub fn indices(&self) -> Option<(usize, usize)> {
        match self {
            ColumnMatch::Resolved {
                source_index,
                target_index,
                ..
            } => Some((*source_index, *target_index)),
            ColumnMatch::Unresolved { .. } => None,
        }
    }
}

pub fn match_columns(
    source: &HeaderIndex,
    target: &HeaderIndex,
    mapping: &ColumnMapping,
) -> Vec<ColumnMatch> {
    mapping
        .iter()
        .map(|(source_name, target_name)| {
            match (source.position(source_name), target.position(target_name)) {
                (Some(source_index), Some(target_index)) => ColumnMatch::Resolved {
                    source_index,
                    target_index,
                    source_name: source_name.to_string(),
                    target_name: target_name.to_string(),
                },
                (found_source, found_target) => ColumnMatch::Unresolved {
                    source_name: source_name.to_string(),
                    target_name: target_name.to_string(),
                    missing: match (found_source, found_target) {
                        (None, Some(_)) => MissingSide::Source,
                        (Some(_), None) => MissingSide::Target,
                        _ => MissingSide::Both,
                    },
                },
            }
        })
        .collect()
}

/// One [`Diagnostic::UnresolvedMapping`] per unresolved entry, tagged by
/// position.
pub fn unresolved_diagnostics(matches: &[ColumnMatch]) -> Vec<Diagnostic> {
    matches
        .iter()
        .enumerate()
        .filter_map(|(position, column_match)| match column_match {
            ColumnMatch::Unresolved {
                source_name,
                target_name,
                missing,
            } => Some(Diagnostic::UnresolvedMapping {
                tag_id: position + 1,
                source_name: source_name.clone(),
                target_name: target_name.clone(),
                missing: *missing,
            }),
            ColumnMatch::Resolved { .. } => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        cell::CellValue,
        sheet::{Row, Sheet},
    };

    fn header(names: &[&str]) -> HeaderIndex {
        let row = Row::from(
            names
                .iter()
                .map(|name| CellValue::String(name.to_string()))
                .collect::<Vec<_>>(),
        );
        HeaderIndex::from_sheet(&Sheet::new("header", vec![row])).expect("header index")
    }

    #[test]
    fn unresolved_entry_keeps_its_position() {
        let source = header(&["A", "B"]);
        let target = header(&["X"]);
        let mapping: ColumnMapping = [("A", "X"), ("B", "Z")].into_iter().collect();

        let matches = match_columns(&source, &target, &mapping);
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].indices(), Some((0, 0)));
        assert_eq!(
            matches[1],
            ColumnMatch::Unresolved {
                source_name: "B".into(),
                target_name: "Z".into(),
                missing: MissingSide::Target,
            }
        );

        let diagnostics = unresolved_diagnostics(&matches);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].tag_id(), 2);
    }

    #[test]
    fn missing_side_is_reported() {
        let source = header(&["A"]);
        let target = header(&["X"]);
        let mapping: ColumnMapping = [("Q", "X"), ("Q2", "Y"), ("A", "Y")].into_iter().collect();
        let matches = match_columns(&source, &target, &mapping);
        let sides = matches
            .iter()
            .map(|m| match m {
                ColumnMatch::Unresolved { missing, .. } => Some(*missing),
                ColumnMatch::Resolved { .. } => None,
            })
            .collect::<Vec<_>>();
        assert_eq!(
            sides,
            vec![
                Some(MissingSide::Source),
                Some(MissingSide::Both),
                Some(MissingSide::Target)
            ]
        );
    }

    #[test]
    fn order_follows_mapping_not_header_positions() {
        let source = header(&["A", "B", "C"]);
        let target = header(&["C", "B", "A"]);
        let mapping: ColumnMapping = [("C", "C"), ("A", "A"), ("B", "B")].into_iter().collect();
        let matches = match_columns(&source, &target, &mapping);
        let indices = matches
            .iter()
            .map(ColumnMatch::indices)
            .collect::<Vec<_>>();
        assert_eq!(indices, vec![Some((2, 0)), Some((0, 2)), Some((1, 1))]);
        assert!(matches.iter().all(ColumnMatch::is_resolved));
        assert_eq!(matches[0].source_name(), "C");
        assert_eq!(matches[1].target_name(), "A");
    }

    #[test]
    fn empty_mapping_yields_no_matches() {
        let matches = match_columns(&header(&["A"]), &header(&["A"]), &ColumnMapping::default());
        assert!(matches.is_empty());
        assert!(unresolved_diagnostics(&matches).is_empty());
    }
}
