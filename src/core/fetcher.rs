//! Event retrieval: walks every page of an [`EventSource`] and normalizes raw
//! records into [`Event`]s.

use crate::core::range::DateRange;
use crate::errors::AppResult;
use crate::google::models::{EventPage, RawEvent, RawEventTime};
use crate::models::{Event, MalformedEvent};
use crate::ui::messages::warning;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};

/// Anything that can list raw event records page by page.
pub trait EventSource {
    fn list_page(&self, range: &DateRange, page_token: Option<&str>) -> AppResult<EventPage>;
}

impl<T: EventSource + ?Sized> EventSource for Box<T> {
    fn list_page(&self, range: &DateRange, page_token: Option<&str>) -> AppResult<EventPage> {
        (**self).list_page(range, page_token)
    }
}

/// Result of a fetch: usable events plus the records that were dropped.
#[derive(Debug, Clone, Default)]
pub struct FetchOutcome {
    pub events: Vec<Event>,
    pub malformed: Vec<MalformedEvent>,
    /// true when the page limit cut the listing short
    pub truncated: bool,
}

/// Upper bound on pages, in case a source keeps handing out the same token.
const MAX_PAGES: usize = 1000;

pub struct EventFetcher {
    offset: FixedOffset,
}

impl EventFetcher {
    /// `offset` places all-day dates on the time line.
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Fetch every page for `range`, in source order.
    pub fn fetch<S: EventSource + ?Sized>(
        &self,
        source: &S,
        range: &DateRange,
    ) -> AppResult<FetchOutcome> {
        let mut outcome = FetchOutcome::default();
        let mut token: Option<String> = None;

        for page_no in 1..=MAX_PAGES {
            let page = source.list_page(range, token.as_deref())?;
            log::debug!("page {page_no}: {} raw events", page.items.len());

            for raw in page.items {
                if raw.status.as_deref() == Some("cancelled") {
                    log::debug!("skipping cancelled event {:?}", raw.id);
                    continue;
                }
                match self.normalize(raw) {
                    Ok(ev) => outcome.events.push(ev),
                    Err(bad) => {
                        log::warn!("dropping malformed event {bad}");
                        warning(format!("Skipping malformed event {bad}"));
                        outcome.malformed.push(bad);
                    }
                }
            }

            match page.next_page_token {
                Some(next) if !next.is_empty() => token = Some(next),
                _ => return Ok(outcome),
            }
        }

        log::warn!("stopped after {MAX_PAGES} pages");
        warning(format!(
            "Stopped after {MAX_PAGES} pages of events; later events are not included."
        ));
        outcome.truncated = true;
        Ok(outcome)
    }

    /// Turn one raw record into an [`Event`].
    pub fn normalize(&self, raw: RawEvent) -> Result<Event, MalformedEvent> {
        let summary = raw.summary.unwrap_or_default();
        let description = raw.description.unwrap_or_default();

        let (start, start_all_day) = match self.parse_time(raw.start.as_ref()) {
            Ok(v) => v,
            Err(reason) => {
                return Err(MalformedEvent {
                    summary,
                    reason: format!("start: {reason}"),
                });
            }
        };
        let (end, end_all_day) = match self.parse_time(raw.end.as_ref()) {
            Ok(v) => v,
            Err(reason) => {
                return Err(MalformedEvent {
                    summary,
                    reason: format!("end: {reason}"),
                });
            }
        };

        Event::new(start, end, summary, description, start_all_day && end_all_day)
    }

    fn parse_time(&self, t: Option<&RawEventTime>) -> Result<(DateTime<FixedOffset>, bool), String> {
        let t = t.ok_or_else(|| "missing".to_string())?;

        if let Some(dt) = t.date_time.as_deref() {
            let parsed = DateTime::parse_from_rfc3339(dt)
                .map_err(|e| format!("invalid dateTime '{dt}': {e}"))?;
            return Ok((parsed, false));
        }

        if let Some(d) = t.date.as_deref() {
            let day = NaiveDate::parse_from_str(d, "%Y-%m-%d")
                .map_err(|e| format!("invalid date '{d}': {e}"))?;
            let midnight = day
                .and_time(NaiveTime::MIN)
                .and_local_timezone(self.offset)
                .single()
                .ok_or_else(|| format!("date '{d}' does not map to the offset"))?;
            return Ok((midnight, true));
        }

        Err("neither dateTime nor date present".to_string())
    }
}
