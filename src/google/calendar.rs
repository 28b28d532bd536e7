use super::models::EventPage;
use super::{ApiClient, ClientProvider, Service};
use crate::config::Config;
use crate::core::fetcher::EventSource;
use crate::core::range::DateRange;
use crate::errors::AppResult;
use indexmap::IndexMap;

/// `events.list` on one calendar.
pub struct GoogleCalendarSource {
    client: ApiClient,
    calendar_id: String,
    page_size: u32,
}

impl GoogleCalendarSource {
    pub fn new(client: ApiClient, calendar_id: impl Into<String>, page_size: u32) -> Self {
        Self {
            client,
            calendar_id: calendar_id.into(),
            page_size,
        }
    }

    /// Authenticate through `provider` and bind to the configured calendar.
    pub fn connect<P: ClientProvider + ?Sized>(provider: &P, cfg: &Config) -> AppResult<Self> {
        let client = provider.get_client(Service::Calendar)?;
        Ok(Self::new(client, cfg.calendar_id.clone(), cfg.page_size))
    }
}

impl EventSource for GoogleCalendarSource {
    fn list_page(&self, range: &DateRange, page_token: Option<&str>) -> AppResult<EventPage> {
        let query = build_query_parameters(range, self.page_size, page_token);
        let page: EventPage = self
            .client
            .get(&["calendars", self.calendar_id.as_str(), "events"], &query)?;
        log::debug!(
            "fetched {} events from calendar '{}'",
            page.items.len(),
            self.calendar_id
        );
        Ok(page)
    }
}

fn build_query_parameters(
    range: &DateRange,
    page_size: u32,
    page_token: Option<&str>,
) -> IndexMap<&'static str, String> {
    let mut query_parameters: IndexMap<&'static str, String> = IndexMap::from([
        // expand recurring events into instances
        ("singleEvents", "true".to_owned()),
        ("orderBy", "startTime".to_owned()),
        ("timeMin", range.time_min()),
        ("timeMax", range.time_max()),
        ("maxResults", page_size.to_string()),
    ]);

    if let Some(token) = page_token {
        query_parameters.insert("pageToken", token.to_owned());
    }

    query_parameters
}
