//! Aligned plain-text tables for console output.

use std::borrow::Cow;
use std::fmt::Write as _;

const COLUMN_GAP: &str = "  ";
const MIN_RULE_WIDTH: usize = 3;

#[derive(Debug, Clone, Default)]
pub struct TextTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TextTable {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn extend_rows(&mut self, rows: impl IntoIterator<Item = Vec<String>>) {
        self.rows.extend(rows);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Header, a dashed rule, then one line per row. Cells past the header
    /// width are dropped; trailing padding is trimmed.
    pub fn render(&self) -> String {
        let widths = self.column_widths();
        let rule = widths
            .iter()
            .map(|width| "-".repeat((*width).max(MIN_RULE_WIDTH)))
            .collect::<Vec<_>>();
        let rule_widths = widths
            .iter()
            .map(|width| (*width).max(MIN_RULE_WIDTH))
            .collect::<Vec<_>>();

        let mut output = String::new();
        let _ = writeln!(output, "{}", format_line(&self.headers, &widths));
        let _ = writeln!(output, "{}", format_line(&rule, &rule_widths));
        for row in &self.rows {
            let _ = writeln!(output, "{}", format_line(row, &widths));
        }
        output
    }

    pub fn print(&self) {
        print!("{}", self.render());
    }

    fn column_widths(&self) -> Vec<usize> {
        let mut widths = self
            .headers
            .iter()
            .map(|header| display_width(header))
            .collect::<Vec<_>>();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(display_width(cell));
            }
        }
        widths.iter().map(|width| (*width).max(1)).collect()
    }
}

fn format_line(cells: &[String], widths: &[usize]) -> String {
    let mut line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let cell = single_line(cell);
            let padding = width.saturating_sub(display_width(&cell));
            format!("{cell}{}", " ".repeat(padding))
        })
        .collect::<Vec<_>>()
        .join(COLUMN_GAP);
    line.truncate(line.trim_end().len());
    line
}

fn display_width(value: &str) -> usize {
    single_line(value).chars().count()
}

fn single_line(value: &str) -> Cow<'_, str> {
    if value.contains(['\n', '\r', '\t']) {
        Cow::Owned(value.replace(['\n', '\r', '\t'], " "))
    } else {
        Cow::Borrowed(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_are_aligned_under_headers() {
        let mut table = TextTable::new(["tag", "field"]);
        table.push_row(vec!["1".into(), "Customer".into()]);
        table.push_row(vec!["12".into(), "Id".into()]);
        let rendered = table.render();
        let lines = rendered.lines().collect::<Vec<_>>();
        assert_eq!(
            lines,
            vec!["tag  field", "---  --------", "1    Customer", "12   Id"]
        );
    }

    #[test]
    fn control_characters_are_flattened() {
        let mut table = TextTable::new(["value"]);
        table.push_row(vec!["line1\nline2\tend".into()]);
        let rendered = table.render();
        assert_eq!(rendered.lines().nth(2), Some("line1 line2 end"));
    }

    #[test]
    fn width_counts_characters_not_bytes() {
        let mut table = TextTable::new(["name", "x"]);
        table.push_row(vec!["café".into(), "1".into()]);
        let rendered = table.render();
        assert_eq!(rendered.lines().nth(2), Some("café  1"));
    }

    #[test]
    fn empty_table_renders_header_only() {
        let table = TextTable::new(["a"]);
        assert!(table.is_empty());
        assert_eq!(table.render(), "a\n---\n");
    }
}
