//! Per-project, per-day time rollup.

use crate::config::EmptyProjectPolicy;
use crate::core::classifier::Classification;
use crate::errors::{AppError, AppResult};
use crate::models::HoursTable;
use crate::ui::messages::warning;
use crate::utils::date::days_inclusive;
use crate::utils::time::truncated_hours;
use chrono::{FixedOffset, NaiveDate, TimeDelta};
use indexmap::IndexMap;

pub struct TimeAggregator {
    offset: FixedOffset,
    empty_project: EmptyProjectPolicy,
}

impl TimeAggregator {
    /// `offset` decides which calendar day an event start belongs to.
    pub fn new(offset: FixedOffset, empty_project: EmptyProjectPolicy) -> Self {
        Self {
            offset,
            empty_project,
        }
    }

    /// Sum event durations per project per day over `[start_date, end_date]`.
    ///
    /// Every day of the range gets a column, zero when nothing happened.
    /// Events are bucketed by their start day; an event whose start day lies
    /// outside the range is left out and listed in `HoursTable::skipped`.
    pub fn aggregate(
        &self,
        classification: &Classification<'_>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> AppResult<HoursTable> {
        let days = days_inclusive(start_date, end_date);
        if days.is_empty() {
            return Err(AppError::EmptyRange {
                start: start_date.format("%d/%m/%Y").to_string(),
                end: end_date.format("%d/%m/%Y").to_string(),
            });
        }

        let mut rows = IndexMap::with_capacity(classification.len());
        let mut skipped = Vec::new();

        for (project, events) in classification {
            if events.is_empty() {
                match self.empty_project {
                    EmptyProjectPolicy::Abort => {
                        return Err(AppError::EmptyClassification(project.clone()));
                    }
                    EmptyProjectPolicy::Exclude => {
                        warning(format!("No events matched project '{project}', leaving it out."));
                        continue;
                    }
                }
            }

            // zero-fill first so the row is dense
            let mut buckets: IndexMap<NaiveDate, TimeDelta> =
                days.iter().map(|d| (*d, TimeDelta::zero())).collect();

            for ev in events {
                let day = ev.start_date_in(&self.offset);
                match buckets.get_mut(&day) {
                    Some(total) => *total += ev.duration,
                    None => {
                        log::warn!("'{}' starts on {day}, outside the report range", ev.summary);
                        skipped.push((project.clone(), ev.summary.clone(), day));
                    }
                }
            }

            let hours: Vec<i64> = buckets.values().map(|d| truncated_hours(*d)).collect();
            rows.insert(project.clone(), hours);
        }

        if !skipped.is_empty() {
            warning(format!(
                "{} event(s) started outside the selected days and were not counted.",
                skipped.len()
            ));
        }

        Ok(HoursTable {
            days,
            rows,
            skipped,
        })
    }
}
