use chrono::{DateTime, FixedOffset, NaiveDate, TimeDelta};
use std::fmt;

/// A calendar entry normalized from a raw source record.
///
/// Only built through [`Event::new`], which rejects records ending before
/// they start, so `duration` is never negative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    pub duration: TimeDelta,
    pub summary: String,
    pub description: String,
    /// true when the source only gave a `date` (no `dateTime`)
    pub all_day: bool,
}

/// A raw record the fetcher had to drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedEvent {
    pub summary: String,
    pub reason: String,
}

impl fmt::Display for MalformedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.summary.is_empty() {
            write!(f, "(untitled): {}", self.reason)
        } else {
            write!(f, "'{}': {}", self.summary, self.reason)
        }
    }
}

impl Event {
    pub fn new(
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
        summary: impl Into<String>,
        description: impl Into<String>,
        all_day: bool,
    ) -> Result<Self, MalformedEvent> {
        let summary = summary.into();
        if end < start {
            return Err(MalformedEvent {
                summary,
                reason: format!("ends ({}) before it starts ({})", end.to_rfc3339(), start.to_rfc3339()),
            });
        }

        Ok(Self {
            start,
            end,
            duration: end - start,
            summary,
            description: description.into(),
            all_day,
        })
    }

    /// Calendar day of the start, seen from `offset`.
    pub fn start_date_in(&self, offset: &FixedOffset) -> NaiveDate {
        self.start.with_timezone(offset).date_naive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    #[test]
    fn duration_is_derived_from_bounds() {
        let ev = Event::new(
            ts("2024-03-04T10:00:00Z"),
            ts("2024-03-04T11:30:00Z"),
            "demo sync",
            "",
            false,
        )
        .unwrap();
        assert_eq!(ev.duration.num_minutes(), 90);
    }

    #[test]
    fn end_before_start_is_malformed() {
        let err = Event::new(
            ts("2024-03-04T11:00:00Z"),
            ts("2024-03-04T10:00:00Z"),
            "backwards",
            "",
            false,
        )
        .unwrap_err();
        assert_eq!(err.summary, "backwards");
        assert!(err.to_string().contains("before it starts"));
    }

    #[test]
    fn start_date_follows_the_offset() {
        let ev = Event::new(
            ts("2024-03-05T02:00:00Z"),
            ts("2024-03-05T03:00:00Z"),
            "late call",
            "",
            false,
        )
        .unwrap();
        let bogota = FixedOffset::west_opt(5 * 3600).unwrap();
        assert_eq!(
            ev.start_date_in(&bogota),
            NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
        );
    }
}
