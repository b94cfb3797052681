//! Source → target column-name mapping loaded from a two-column table.

use std::collections::HashMap;

use crate::{
    cell::CellValue,
    error::CompareError,
    sheet::{Row, Sheet},
};

/// Ordered name mapping. A repeated source name replaces the target of the
/// first occurrence and keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMapping {
    entries: Vec<(String, String)>,
    positions: HashMap<String, usize>,
}

impl ColumnMapping {
    /// Reads every row of `sheet`; the mapping table has no header row.
    pub fn from_sheet(sheet: &Sheet) -> Result<Self, CompareError> {
        let mut mapping = ColumnMapping::default();
        for row in sheet.rows() {
            if is_spacer(row) {
                continue;
            }
            let source = mapping_name(sheet, row, 0)?;
            let target = mapping_name(sheet, row, 1)?;
            mapping.insert(source, target);
        }
        Ok(mapping)
    }

    pub fn insert(&mut self, source: impl Into<String>, target: impl Into<String>) {
        let source = source.into();
        let target = target.into();
        match self.positions.get(&source) {
            Some(&position) => self.entries[position].1 = target,
            None => {
                self.positions.insert(source.clone(), self.entries.len());
                self.entries.push((source, target));
            }
        }
    }

    pub fn target_of(&self, source: &str) -> Option<&str> {
        self.positions
            .get(source)
            .map(|&position| self.entries[position].1.as_str())
    }

    /// `(source, target)` pairs in mapping order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(source, target)| (source.as_str(), target.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>, T: Into<String>> FromIterator<(S, T)> for ColumnMapping {
    fn from_iter<I: IntoIterator<Item = (S, T)>>(iter: I) -> Self {
        let mut mapping = ColumnMapping::default();
        for (source, target) in iter {
            mapping.insert(source, target);
        }
        mapping
    }
}

fn is_spacer(row: &Row) -> bool {
    (0..2).all(|column| matches!(row.cell(column), None | Some(CellValue::Blank)))
}

fn mapping_name(sheet: &Sheet, row: &Row, column: usize) -> Result<String, CompareError> {
    match row.cell(column) {
        Some(CellValue::String(name)) => Ok(name.trim().to_string()),
        other => Err(CompareError::MalformedHeaderCell {
            table: sheet.name().to_string(),
            row: row.number(),
            column: column + 1,
            found: other.map_or("nothing", CellValue::kind),
        }),
    }
}
