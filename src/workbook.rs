//! Workbook source adapter (xlsx, xlsm, xls, xlsb, ods) backed by calamine.
//!
//! Only the first worksheet is read. Cell kinds are folded onto
//! [`CellValue`]: dates are serial numbers, ISO date/duration text stays text,
//! and cells with no stored value are absent.

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use log::debug;

use crate::{
    cell::CellValue,
    error::CompareError,
    sheet::{Row, Sheet},
};

pub fn read_first_sheet(path: &Path) -> Result<Sheet, CompareError> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|err| CompareError::source_unavailable(path, "open", err))?;
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .unwrap_or_default();
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| {
            CompareError::source_unavailable(path, "read", "workbook contains no sheets")
        })?
        .map_err(|err| CompareError::source_unavailable(path, "read", err))?;

    // The used range may not begin at A1; keep column positions absolute.
    let (start_row, start_col) = range.start().unwrap_or((0, 0));
    debug!(
        "Sheet '{}' of {:?} starts at row {}, column {}",
        sheet_name, path, start_row, start_col
    );

    let rows = range
        .rows()
        .enumerate()
        .filter(|(_, cells)| cells.iter().any(|cell| !matches!(cell, Data::Empty)))
        .map(|(offset, cells)| {
            let mut row = Vec::with_capacity(start_col as usize + cells.len());
            row.resize(start_col as usize, None);
            row.extend(cells.iter().map(convert));
            Row::numbered(start_row as usize + offset + 1, row)
        })
        .collect();

    Ok(Sheet::new(
        format!("{} [{}]", path.display(), sheet_name),
        rows,
    ))
}

fn convert(cell: &Data) -> Option<CellValue> {
    let value = match cell {
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => {
            CellValue::String(s.clone())
        }
        Data::Float(n) => CellValue::Numeric(*n),
        Data::Int(n) => CellValue::Numeric(*n as f64),
        Data::DateTime(dt) => CellValue::Numeric(dt.as_f64()),
        Data::Bool(b) => CellValue::Boolean(*b),
        Data::Error(e) => CellValue::Error(e.to_string()),
        Data::Empty => return None,
    };
    Some(value)
}

#[cfg(test)]
mod tests {
    use calamine::{CellErrorType, ExcelDateTime, ExcelDateTimeType};
    use rust_xlsxwriter::{Format, Workbook};
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn reads_typed_cells_from_first_sheet() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("typed.xlsx");

        let mut workbook = Workbook::new();
        let first = workbook.add_worksheet();
        first.write_string(0, 0, "name").unwrap();
        first.write_string(0, 1, "amount").unwrap();
        first.write_string(0, 2, "paid").unwrap();
        first.write_string(1, 0, "Alice").unwrap();
        first.write_number(1, 1, 42.5).unwrap();
        first.write_boolean(1, 2, true).unwrap();
        let second = workbook.add_worksheet();
        second.write_string(0, 0, "ignored").unwrap();
        workbook.save(&path).unwrap();

        let sheet = read_first_sheet(&path).expect("read");
        assert_eq!(sheet.row_count(), 2);
        let row = sheet.data_rows().next().expect("row");
        assert_eq!(row.cell(0), Some(&CellValue::String("Alice".into())));
        assert_eq!(row.cell(1), Some(&CellValue::Numeric(42.5)));
        assert_eq!(row.cell(2), Some(&CellValue::Boolean(true)));
    }

    #[test]
    fn offset_range_keeps_absolute_columns_and_skips_empty_rows() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("offset.xlsx");

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 1, "code").unwrap();
        sheet.write_string(0, 2, "label").unwrap();
        sheet.write_number(1, 1, 7.0).unwrap();
        sheet.write_string(3, 2, "late").unwrap();
        workbook.save(&path).unwrap();

        let sheet = read_first_sheet(&path).expect("read");
        let header = sheet.header_row().expect("header");
        assert_eq!(header.cell(0), None);
        assert_eq!(header.cell(1), Some(&CellValue::String("code".into())));

        let rows = sheet.data_rows().collect::<Vec<_>>();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].cell(1), Some(&CellValue::Numeric(7.0)));
        assert_eq!(rows[0].cell(2), None);
        assert_eq!(rows[1].cell(2), Some(&CellValue::String("late".into())));
        assert_eq!(header.number(), 1);
        assert_eq!(rows[0].number(), 2);
        assert_eq!(rows[1].number(), 4);
    }

    #[test]
    fn rows_keep_sheet_numbers_when_range_starts_low() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("low.xlsx");

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(2, 0, "id").unwrap();
        sheet.write_number(5, 0, 1.0).unwrap();
        workbook.save(&path).unwrap();

        let sheet = read_first_sheet(&path).expect("read");
        let numbers = sheet.rows().map(Row::number).collect::<Vec<_>>();
        assert_eq!(numbers, vec![3, 6]);
    }

    #[test]
    fn converts_every_cell_kind() {
        assert_eq!(convert(&Data::Int(3)), Some(CellValue::Numeric(3.0)));
        assert_eq!(
            convert(&Data::DateTime(ExcelDateTime::new(
                45306.5,
                ExcelDateTimeType::DateTime,
                false
            ))),
            Some(CellValue::Numeric(45306.5))
        );
        assert_eq!(
            convert(&Data::Error(CellErrorType::Div0)),
            Some(CellValue::Error("#DIV/0!".into()))
        );
        assert_eq!(
            convert(&Data::DateTimeIso("2024-01-15T00:00:00".into())),
            Some(CellValue::String("2024-01-15T00:00:00".into()))
        );
        assert_eq!(convert(&Data::Empty), None);
    }

    #[test]
    fn dates_read_back_as_serial_numbers() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("dates.xlsx");

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        let date = rust_xlsxwriter::ExcelDateTime::from_ymd(2024, 1, 15).unwrap();
        let format = Format::new().set_num_format("yyyy-mm-dd");
        sheet.write_string(0, 0, "posted").unwrap();
        sheet.write_datetime_with_format(1, 0, &date, &format).unwrap();
        workbook.save(&path).unwrap();

        let sheet = read_first_sheet(&path).expect("read");
        let row = sheet.data_rows().next().expect("row");
        assert_eq!(row.cell(0), Some(&CellValue::Numeric(45306.0)));
    }

    #[test]
    fn missing_workbook_is_source_unavailable() {
        let dir = tempdir().expect("temp dir");
        let err = read_first_sheet(&dir.path().join("missing.xlsx")).unwrap_err();
        assert!(matches!(err, CompareError::SourceUnavailable { .. }));
    }
}
