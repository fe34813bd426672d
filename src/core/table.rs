//! Tabular output behind a small trait so narration never depends on a
//! particular table library.

use tabled::builder::Builder;
use tabled::settings::Style;

/// Rows of named columns, ready to be rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableData {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableData {
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row. Short rows are padded with empty cells, long rows truncated.
    pub fn push_row<S: Into<String>>(&mut self, cells: impl IntoIterator<Item = S>) {
        let mut row: Vec<String> = cells.into_iter().map(Into::into).collect();
        row.resize(self.columns.len(), String::new());
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Turns table data into printable text.
pub trait TableRenderer {
    fn render(&self, table: &TableData) -> String;
}

/// ASCII grid (`+---+` borders) via `tabled`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AsciiGridRenderer;

impl TableRenderer for AsciiGridRenderer {
    fn render(&self, table: &TableData) -> String {
        let mut builder = Builder::default();
        builder.push_record(table.columns.iter().cloned());
        for row in &table.rows {
            builder.push_record(row.iter().cloned());
        }

        let mut grid = builder.build();
        grid.with(Style::ascii());
        grid.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_row_pads_to_column_count() {
        let mut table = TableData::new(["Bowler", "Overs", "Runs"]);
        table.push_row(["Starc"]);
        assert_eq!(table.rows[0], vec!["Starc".to_string(), String::new(), String::new()]);
    }

    #[test]
    fn ascii_grid_contains_headers_and_cells() {
        let mut table = TableData::new(["Batter", "Runs"]);
        table.push_row(["Head", "137"]);
        let rendered = AsciiGridRenderer.render(&table);
        assert!(rendered.starts_with('+'));
        assert!(rendered.contains("| Batter |"));
        assert!(rendered.contains("| Head   |"));
        assert!(rendered.contains("137"));
    }

    #[test]
    fn multi_line_cells_render_on_separate_lines() {
        let mut table = TableData::new(["Remarks"]);
        table.push_row(["first line\nsecond line"]);
        let rendered = AsciiGridRenderer.render(&table);
        assert!(rendered.lines().any(|l| l.contains("first line")));
        assert!(rendered.lines().any(|l| l.contains("second line")));
    }
}
