#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use calamine::{Data, Reader, open_workbook_auto};
use rust_xlsxwriter::Workbook;
use tempfile::{TempDir, tempdir};

/// A fixture cell written into a generated workbook.
#[derive(Debug, Clone, Copy)]
pub enum Fx<'a> {
    Text(&'a str),
    Num(f64),
    Bool(bool),
    Skip,
}

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    /// Creates a fresh scratch directory for the current test case.
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    /// Returns the root path for all files owned by this workspace.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut file = File::create(&path).expect("create temp file");
        file.write_all(contents.as_bytes())
            .expect("write temp file contents");
        path
    }

    /// Writes a single-sheet workbook whose rows start at A1.
    pub fn write_xlsx(&self, name: &str, rows: &[Vec<Fx<'_>>]) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        for (row_idx, row) in rows.iter().enumerate() {
            for (col_idx, cell) in row.iter().enumerate() {
                let (r, c) = (row_idx as u32, col_idx as u16);
                match cell {
                    Fx::Text(text) => {
                        sheet.write_string(r, c, *text).expect("write string");
                    }
                    Fx::Num(value) => {
                        sheet.write_number(r, c, *value).expect("write number");
                    }
                    Fx::Bool(value) => {
                        sheet.write_boolean(r, c, *value).expect("write boolean");
                    }
                    Fx::Skip => {}
                }
            }
        }
        workbook.save(&path).expect("save workbook");
        path
    }
}

/// Reads the first sheet of a workbook as raw calamine rows.
pub fn read_xlsx(path: &Path) -> Vec<Vec<Data>> {
    let mut workbook = open_workbook_auto(path).expect("open workbook");
    let range = workbook
        .worksheet_range_at(0)
        .expect("first sheet")
        .expect("sheet range");
    range.rows().map(|row| row.to_vec()).collect()
}
