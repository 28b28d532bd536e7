//! Turns the hours matrix into the exported table: weekday labels, blank
//! weekends, per-row totals.

use crate::models::{ColumnKind, HoursTable, ReportColumn, ReportRow, ReportTable};
use crate::utils::date::{day_month_label, is_weekend};

pub const WEEKEND_LABEL: &str = "weekend";

pub struct ReportFormatter;

impl ReportFormatter {
    /// Relabel day columns and add totals.
    ///
    /// Weekday columns become `DD-Mon`. Saturday and Sunday columns are all
    /// labelled `weekend` and kept as separate columns; their values are
    /// discarded and do not count toward `Total`.
    pub fn format(table: &HoursTable) -> ReportTable {
        let columns: Vec<ReportColumn> = table
            .days
            .iter()
            .map(|d| {
                if is_weekend(*d) {
                    ReportColumn {
                        label: WEEKEND_LABEL.to_string(),
                        date: *d,
                        kind: ColumnKind::Weekend,
                    }
                } else {
                    ReportColumn {
                        label: day_month_label(*d),
                        date: *d,
                        kind: ColumnKind::Weekday,
                    }
                }
            })
            .collect();

        let rows = table
            .rows
            .iter()
            .map(|(project, hours)| {
                let cells: Vec<Option<i64>> = columns
                    .iter()
                    .zip(hours)
                    .map(|(col, h)| match col.kind {
                        ColumnKind::Weekday => Some(*h),
                        ColumnKind::Weekend => None,
                    })
                    .collect();
                let total = cells.iter().flatten().sum();
                ReportRow {
                    project: project.clone(),
                    cells,
                    total,
                }
            })
            .collect();

        ReportTable { columns, rows }
    }
}
