//! Google Calendar and Gmail access: OAuth, HTTP plumbing and the event
//! sources built on top of them.

pub mod auth;
pub mod calendar;
pub mod gmail;
pub mod http;
pub mod models;
pub mod replay;

pub use auth::GoogleAuth;
pub use calendar::GoogleCalendarSource;
pub use gmail::{GmailSource, MailMessage};
pub use replay::FileEventSource;

use crate::errors::{AppError, AppResult};
use http::HttpClient;
use serde::Serialize;
use serde::de::DeserializeOwned;

pub const CALENDAR_SCOPE: &str = "https://www.googleapis.com/auth/calendar.readonly";
pub const GMAIL_SCOPE: &str = "https://www.googleapis.com/auth/gmail.readonly";

/// Every scope the tool asks for in one consent.
pub const SCOPES: &[&str] = &[CALENDAR_SCOPE, GMAIL_SCOPE];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Calendar,
    Gmail,
}

impl Service {
    pub fn base_url(&self) -> &'static str {
        match self {
            Service::Calendar => "https://www.googleapis.com/calendar/v3",
            Service::Gmail => "https://gmail.googleapis.com/gmail/v1",
        }
    }

    pub fn scope(&self) -> &'static str {
        match self {
            Service::Calendar => CALENDAR_SCOPE,
            Service::Gmail => GMAIL_SCOPE,
        }
    }
}

/// Hands out clients that are already authenticated for a service.
pub trait ClientProvider {
    fn get_client(&self, service: Service) -> AppResult<ApiClient>;
}

/// Bearer-authenticated JSON client bound to one API base URL.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: HttpClient,
    base_url: String,
    access_token: String,
}

impl ApiClient {
    pub fn new(http: HttpClient, base_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            access_token: access_token.into(),
        }
    }

    /// `GET base_url/segment/segment/...?query`. Segments are percent-encoded.
    pub fn get<T, Q>(&self, segments: &[&str], query: &Q) -> AppResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = self.url(segments)?;
        let request = self
            .http
            .get(url.as_str())
            .bearer_auth(&self.access_token)
            .query(query);
        self.http.send_json(request)
    }

    fn url(&self, segments: &[&str]) -> AppResult<url::Url> {
        let mut url = url::Url::parse(&self.base_url)
            .map_err(|e| AppError::Other(format!("bad base URL '{}': {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|_| AppError::Other(format!("base URL '{}' cannot take a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}
