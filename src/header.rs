use std::collections::HashMap;

use crate::{cell::CellValue, error::CompareError, sheet::Sheet};

/// Header name ↔ column position lookup built from a sheet's first row.
///
/// Names are trimmed and case-sensitive. A repeated name overwrites the
/// earlier position, and the overwritten position no longer resolves to a
/// name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderIndex {
    by_name: HashMap<String, usize>,
    by_position: HashMap<usize, String>,
}

impl HeaderIndex {
    pub fn from_sheet(sheet: &Sheet) -> Result<Self, CompareError> {
        let mut index = HeaderIndex::default();
        let Some(header) = sheet.header_row() else {
            return Ok(index);
        };
        for (column, cell) in header.cells() {
            match cell {
                CellValue::Blank => continue,
                CellValue::String(name) => index.insert(name.trim(), column),
                other => {
                    return Err(CompareError::MalformedHeaderCell {
                        table: sheet.name().to_string(),
                        row: header.number(),
                        column: column + 1,
                        found: other.kind(),
                    });
                }
            }
        }
        Ok(index)
    }

    fn insert(&mut self, name: &str, column: usize) {
        if let Some(previous) = self.by_name.insert(name.to_string(), column) {
            self.by_position.remove(&previous);
        }
        self.by_position.insert(column, name.to_string());
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    pub fn name_of(&self, column: usize) -> Option<&str> {
        self.by_position.get(&column).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
