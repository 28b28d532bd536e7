use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::Serialize;

/// Dense day-by-project matrix of whole hours.
///
/// Every row has exactly one cell per entry of `days`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoursTable {
    pub days: Vec<NaiveDate>,
    pub rows: IndexMap<String, Vec<i64>>,
    /// events whose start day fell outside `days`: (project, summary, day)
    pub skipped: Vec<(String, String, NaiveDate)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Weekday,
    Weekend,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportColumn {
    pub label: String,
    pub date: NaiveDate,
    pub kind: ColumnKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub project: String,
    /// `None` for weekend columns
    pub cells: Vec<Option<i64>>,
    pub total: i64,
}

/// Final report: one row per project, one column per day plus `Total`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportTable {
    pub columns: Vec<ReportColumn>,
    pub rows: Vec<ReportRow>,
}

pub const PROJECT_HEADER: &str = "Project";
pub const TOTAL_HEADER: &str = "Total";

impl ReportTable {
    /// Header line: project column, day labels, `Total`.
    pub fn headers(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.columns.len() + 2);
        out.push(PROJECT_HEADER.to_string());
        out.extend(self.columns.iter().map(|c| c.label.clone()));
        out.push(TOTAL_HEADER.to_string());
        out
    }

    /// Rows as display strings; blank cells become "".
    pub fn string_rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|r| {
                let mut line = Vec::with_capacity(r.cells.len() + 2);
                line.push(r.project.clone());
                line.extend(
                    r.cells
                        .iter()
                        .map(|c| c.map(|v| v.to_string()).unwrap_or_default()),
                );
                line.push(r.total.to_string());
                line
            })
            .collect()
    }
}
