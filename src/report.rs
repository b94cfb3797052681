//! Mismatch report rendering.
//!
//! [`write_report`] lays out the report rows and hands them to a
//! [`ReportSink`]; [`XlsxReport`] is the workbook sink used by the CLI.

use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Color, Format, FormatPattern, Workbook, XlsxError};

use crate::{diff::MismatchRecord, error::CompareError};

pub const REPORT_HEADERS: [&str; 4] = [
    "Tag ID",
    "Field Name",
    "Value in File 1",
    "Value in File 2",
];
pub const REPORT_SHEET_NAME: &str = "Mismatches";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReportCell<'a> {
    Header(&'a str),
    Number(f64),
    /// Text rendered with the mismatch highlight.
    Flagged(&'a str),
}

/// Destination for a tabular report: rows are appended in order and the
/// artifact is written out by `persist`.
pub trait ReportSink {
    fn append_row(&mut self, cells: &[ReportCell<'_>]) -> Result<(), CompareError>;

    fn persist(self) -> Result<(), CompareError>;
}

pub fn write_report<S: ReportSink>(
    mut sink: S,
    mismatches: &[MismatchRecord],
) -> Result<(), CompareError> {
    let header = REPORT_HEADERS.map(ReportCell::Header);
    sink.append_row(&header)?;
    for record in mismatches {
        sink.append_row(&[
            ReportCell::Number(record.tag_id as f64),
            ReportCell::Flagged(&record.field_name),
            ReportCell::Flagged(&record.value1),
            ReportCell::Flagged(&record.value2),
        ])?;
    }
    sink.persist()
}

/// Plain-text rows for console rendering, in report order.
pub fn mismatch_rows(mismatches: &[MismatchRecord]) -> Vec<Vec<String>> {
    mismatches
        .iter()
        .map(|record| {
            vec![
                record.tag_id.to_string(),
                record.field_name.clone(),
                record.value1.clone(),
                record.value2.clone(),
            ]
        })
        .collect()
}

pub struct XlsxReport {
    path: PathBuf,
    workbook: Workbook,
    header_format: Format,
    mismatch_format: Format,
    next_row: u32,
}

impl XlsxReport {
    pub fn create(path: &Path) -> Result<Self, CompareError> {
        let mut workbook = Workbook::new();
        workbook
            .add_worksheet()
            .set_name(REPORT_SHEET_NAME)
            .map_err(|err| CompareError::sink_unavailable(path, "create", err))?;
        Ok(Self {
            path: path.to_path_buf(),
            workbook,
            header_format: Format::new().set_bold(),
            mismatch_format: Format::new()
                .set_background_color(Color::Red)
                .set_pattern(FormatPattern::Solid),
            next_row: 0,
        })
    }

    fn write_row(&mut self, cells: &[ReportCell<'_>]) -> Result<(), XlsxError> {
        let row = self.next_row;
        let worksheet = self.workbook.worksheet_from_index(0)?;
        for (col, cell) in (0u16..).zip(cells) {
            match cell {
                ReportCell::Header(text) => {
                    worksheet.write_string_with_format(row, col, *text, &self.header_format)?;
                }
                ReportCell::Number(value) => {
                    worksheet.write_number(row, col, *value)?;
                }
                ReportCell::Flagged(text) => {
                    worksheet.write_string_with_format(row, col, *text, &self.mismatch_format)?;
                }
            }
        }
        self.next_row += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), XlsxError> {
        self.workbook.worksheet_from_index(0)?.autofit();
        self.workbook.save(&self.path)
    }
}

impl ReportSink for XlsxReport {
    fn append_row(&mut self, cells: &[ReportCell<'_>]) -> Result<(), CompareError> {
        self.write_row(cells)
            .map_err(|err| CompareError::sink_unavailable(&self.path, "write a row of", err))
    }

    fn persist(mut self) -> Result<(), CompareError> {
        self.finish()
            .map_err(|err| CompareError::sink_unavailable(&self.path, "save", err))
    }
}
