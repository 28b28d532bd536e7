//! Table rendering utilities for CLI outputs.

use unicode_width::UnicodeWidthStr;

pub struct Column {
    pub header: String,
    pub width: usize,
}

pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Build a table whose column widths fit both headers and cells.
    pub fn fitted(headers: &[String], rows: Vec<Vec<String>>) -> Self {
        let mut widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
        for row in &rows {
            for (i, cell) in row.iter().enumerate() {
                if let Some(w) = widths.get_mut(i) {
                    *w = (*w).max(cell.width());
                }
            }
        }

        let columns = headers
            .iter()
            .zip(widths)
            .map(|(h, width)| Column {
                header: h.clone(),
                width,
            })
            .collect();

        let mut table = Table::new(columns);
        for row in rows {
            table.add_row(row);
        }
        table
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        // Header
        for col in &self.columns {
            out.push_str(&pad(&col.header, col.width));
            out.push(' ');
        }
        out.push('\n');

        // Rows
        for row in &self.rows {
            for (i, col) in self.columns.iter().enumerate() {
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                out.push_str(&pad(cell, col.width));
                out.push(' ');
            }
            out.push('\n');
        }

        out
    }
}

/// Left-align `s` to `width` display columns.
fn pad(s: &str, width: usize) -> String {
    let w = s.width();
    if w >= width {
        s.to_string()
    } else {
        format!("{s}{}", " ".repeat(width - w))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fitted_widths_cover_longest_cell() {
        let headers = vec!["Project".to_string(), "04-Mar".to_string()];
        let t = Table::fitted(&headers, vec![vec!["Alpha long name".into(), "1".into()]]);
        assert_eq!(t.columns[0].width, 15);
        assert_eq!(t.columns[1].width, 6);
        let rendered = t.render();
        assert!(rendered.starts_with("Project         04-Mar"));
        assert!(rendered.contains("Alpha long name 1"));
    }
}
