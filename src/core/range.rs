//! Start/end date resolution for a report run.

use crate::errors::{AppError, AppResult};
use crate::utils::date::days_inclusive;
use crate::utils::prompt::Prompter;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, SecondsFormat, TimeDelta, Utc};
use regex::Regex;
use std::io::{BufRead, Write};

const DATE_FORMAT: &str = "%d/%m/%Y";

/// Parse a zero-padded `dd/mm/yyyy` date.
pub fn parse_day(input: &str) -> AppResult<NaiveDate> {
    let s = input.trim();
    let re = Regex::new(r"^\d{2}/\d{2}/\d{4}$").map_err(|e| AppError::Other(e.to_string()))?;
    if !re.is_match(s) {
        return Err(AppError::InvalidDateFormat(s.to_string()));
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| AppError::InvalidDateFormat(s.to_string()))
}

/// Resolved search window. Both ends carry the same fixed offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

impl DateRange {
    pub fn start_date(&self) -> NaiveDate {
        self.start.date_naive()
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end.date_naive()
    }

    pub fn offset(&self) -> FixedOffset {
        *self.start.offset()
    }

    /// true when the end day comes before the start day
    pub fn is_empty(&self) -> bool {
        self.end_date() < self.start_date()
    }

    /// Every calendar day of the window, both ends included.
    pub fn days(&self) -> Vec<NaiveDate> {
        days_inclusive(self.start_date(), self.end_date())
    }

    /// `timeMin` for the events.list call.
    pub fn time_min(&self) -> String {
        self.start.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    /// `timeMax` for the events.list call.
    pub fn time_max(&self) -> String {
        self.end.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    /// Gmail search expression covering the same days.
    /// Gmail's `before:` is exclusive, hence the extra day.
    pub fn gmail_query(&self) -> String {
        let before = self.end_date() + TimeDelta::days(1);
        format!(
            "after:{} before:{}",
            self.start_date().format("%Y/%m/%d"),
            before.format("%Y/%m/%d")
        )
    }

    /// Fail with `EmptyRange` when the window has no day in it.
    pub fn ensure_not_empty(&self) -> AppResult<()> {
        if self.is_empty() {
            return Err(AppError::EmptyRange {
                start: self.start_date().format(DATE_FORMAT).to_string(),
                end: self.end_date().format(DATE_FORMAT).to_string(),
            });
        }
        Ok(())
    }
}

pub struct DateRangeResolver {
    offset: FixedOffset,
    now_keyword: String,
}

impl DateRangeResolver {
    pub fn new(offset: FixedOffset, now_keyword: impl Into<String>) -> Self {
        Self {
            offset,
            now_keyword: now_keyword.into(),
        }
    }

    /// Start of the given day.
    pub fn parse_start(&self, input: &str) -> AppResult<DateTime<FixedOffset>> {
        let day = parse_day(input)?;
        self.at(day, NaiveTime::MIN, input)
    }

    /// Last second of the given day, or `now` for the sentinel keyword.
    pub fn parse_end(&self, input: &str, now: DateTime<Utc>) -> AppResult<DateTime<FixedOffset>> {
        if input.trim() == self.now_keyword {
            return Ok(now.with_timezone(&self.offset));
        }
        let day = parse_day(input)?;
        let last = NaiveTime::from_hms_opt(23, 59, 59)
            .ok_or_else(|| AppError::Other("invalid end-of-day time".into()))?;
        self.at(day, last, input)
    }

    /// Resolve both inputs, capturing "now" at call time.
    pub fn resolve(&self, start_input: &str, end_input: &str) -> AppResult<DateRange> {
        self.resolve_at(start_input, end_input, Utc::now())
    }

    pub fn resolve_at(
        &self,
        start_input: &str,
        end_input: &str,
        now: DateTime<Utc>,
    ) -> AppResult<DateRange> {
        Ok(DateRange {
            start: self.parse_start(start_input)?,
            end: self.parse_end(end_input, now)?,
        })
    }

    /// Ask for both dates through `prompter`, honouring its retry policy.
    pub fn prompt<R: BufRead, W: Write>(
        &self,
        prompter: &mut Prompter<R, W>,
    ) -> AppResult<DateRange> {
        let start = prompter.ask_validated("Initial date (dd/mm/yyyy): ", |s| {
            self.parse_start(s)
        })?;

        let question = format!(
            "Final date (dd/mm/yyyy) or '{}' for the current date: ",
            self.now_keyword
        );
        // "now" is read when the answer arrives, not when the prompt is shown
        let end = prompter.ask_validated(&question, |s| self.parse_end(s, Utc::now()))?;

        let range = DateRange { start, end };
        log::debug!("resolved range {} .. {}", range.time_min(), range.time_max());
        Ok(range)
    }

    fn at(&self, day: NaiveDate, time: NaiveTime, input: &str) -> AppResult<DateTime<FixedOffset>> {
        day.and_time(time)
            .and_local_timezone(self.offset)
            .single()
            .ok_or_else(|| AppError::InvalidDateFormat(input.to_string()))
    }
}
