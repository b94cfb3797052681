//! In-memory sheet model shared by every tabular source.
//!
//! A [`Sheet`] owns its rows of typed cells; row 0 is the header row for data
//! tables. Sources are read completely on open, so the comparison walks
//! immutable data and file handles never outlive the loader.

use std::path::Path;

use encoding_rs::{Encoding, UTF_8};
use log::debug;

use crate::{cell::CellValue, error::CompareError, io_utils, workbook};

/// How a table's cells should be interpreted when the source carries no
/// type information of its own (delimited text).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableRole {
    /// Header row of names followed by typed data rows.
    Data,
    /// Two-column name mapping; every cell is text.
    Mapping,
}

#[derive(Debug, Clone, Copy)]
pub struct SourceOptions {
    pub delimiter: Option<u8>,
    pub encoding: &'static Encoding,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            delimiter: None,
            encoding: UTF_8,
        }
    }
}

/// One sheet row. `number` is the 1-based row of the source sheet, which can
/// differ from the row's position once empty rows are dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    number: Option<usize>,
    cells: Vec<Option<CellValue>>,
}

impl Row {
    /// A row numbered by its position when added to a [`Sheet`].
    pub fn new(cells: Vec<Option<CellValue>>) -> Self {
        Self {
            number: None,
            cells,
        }
    }

    pub fn numbered(number: usize, cells: Vec<Option<CellValue>>) -> Self {
        Self {
            number: Some(number),
            cells,
        }
    }

    /// 1-based row of the source sheet.
    pub fn number(&self) -> usize {
        self.number.unwrap_or_default()
    }

    /// Cell at `column`, or `None` when the row holds no cell there.
    pub fn cell(&self, column: usize) -> Option<&CellValue> {
        self.cells.get(column).and_then(Option::as_ref)
    }

    /// Present cells with their column positions.
    pub fn cells(&self) -> impl Iterator<Item = (usize, &CellValue)> {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(idx, cell)| cell.as_ref().map(|value| (idx, value)))
    }

    pub fn width(&self) -> usize {
        self.cells.len()
    }
}

impl From<Vec<CellValue>> for Row {
    fn from(cells: Vec<CellValue>) -> Self {
        Row::new(cells.into_iter().map(Some).collect())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    name: String,
    rows: Vec<Row>,
}

impl Sheet {
    /// Rows without a source row number are numbered by position.
    pub fn new(name: impl Into<String>, mut rows: Vec<Row>) -> Self {
        for (idx, row) in rows.iter_mut().enumerate() {
            row.number.get_or_insert(idx + 1);
        }
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Label used in diagnostics and error messages.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn header_row(&self) -> Option<&Row> {
        self.rows.first()
    }

    /// Rows after the header, in their original order.
    pub fn data_rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter().skip(1)
    }

    /// Every row including row 0, for tables without a header.
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Opens the first sheet of `path`, choosing the adapter from its extension.
pub fn open(path: &Path, role: TableRole, options: &SourceOptions) -> Result<Sheet, CompareError> {
    let sheet = if io_utils::is_delimited(path) {
        read_delimited(path, role, options)?
    } else {
        workbook::read_first_sheet(path)?
    };
    debug!(
        "Loaded {} row(s) from {:?} as {:?} table",
        sheet.row_count(),
        path,
        role
    );
    Ok(sheet)
}

fn read_delimited(
    path: &Path,
    role: TableRole,
    options: &SourceOptions,
) -> Result<Sheet, CompareError> {
    let delimiter = io_utils::resolve_input_delimiter(path, options.delimiter);
    let records = io_utils::read_delimited_records(path, delimiter, options.encoding)?;
    let rows = records
        .into_iter()
        .enumerate()
        .map(|(row_idx, fields)| {
            let typed = role == TableRole::Data && row_idx > 0;
            let cells = fields
                .into_iter()
                .map(|field| delimited_cell(field, typed))
                .collect();
            Row::numbered(row_idx + 1, cells)
        })
        .collect();
    Ok(Sheet::new(path.display().to_string(), rows))
}

/// Empty fields are absent, like unstored workbook cells.
fn delimited_cell(field: String, typed: bool) -> Option<CellValue> {
    if field.is_empty() {
        None
    } else if typed {
        Some(CellValue::from_text(&field))
    } else {
        Some(CellValue::String(field))
    }
}
