//! Wire shapes of the Google Calendar and Gmail REST responses.
//! Only the fields the report needs are modelled; serde ignores the rest.

use serde::{Deserialize, Serialize};

/// `start` / `end` of an event: `dateTime` for timed events,
/// `date` (YYYY-MM-DD) for all-day ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEventTime {
    #[serde(default)]
    pub date_time: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEvent {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub start: Option<RawEventTime>,
    #[serde(default)]
    pub end: Option<RawEventTime>,
}

/// One page of `events.list`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPage {
    #[serde(default)]
    pub items: Vec<RawEvent>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// One page of `users.messages.list`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageListPage {
    #[serde(default)]
    pub messages: Vec<MessageRef>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRef {
    pub id: String,
}

/// `users.messages.get` with `format=metadata` or `format=full`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageMetadata {
    pub id: String,
    #[serde(default)]
    pub snippet: String,
    #[serde(default)]
    pub internal_date: Option<String>,
    #[serde(default)]
    pub payload: Option<MessagePayload>,
}

/// A MIME part. Only the top level carries the message headers.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagePayload {
    #[serde(default)]
    pub mime_type: String,
    #[serde(default)]
    pub headers: Vec<MessageHeader>,
    #[serde(default)]
    pub body: Option<MessageBody>,
    #[serde(default)]
    pub parts: Vec<MessagePayload>,
}

/// Part content, base64url encoded (`format=full` only).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageBody {
    #[serde(default)]
    pub data: Option<String>,
}

impl MessagePayload {
    /// Encoded text of the part to show: a single-part message's own body,
    /// otherwise the first `text/plain` part, otherwise the first part.
    pub fn body_data(&self) -> Option<&str> {
        if self.parts.is_empty() {
            return self.body.as_ref().and_then(|b| b.data.as_deref());
        }
        self.parts
            .iter()
            .find(|p| p.mime_type.starts_with("text/plain"))
            .or_else(|| self.parts.first())
            .and_then(|p| p.body_data())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageHeader {
    pub name: String,
    pub value: String,
}

impl MessageMetadata {
    /// First header called `name`, case-insensitive.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.payload.as_ref().and_then(|p| {
            p.headers
                .iter()
                .find(|h| h.name.eq_ignore_ascii_case(name))
                .map(|h| h.value.as_str())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_page_deserializes_timed_and_all_day_items() {
        let json = r#"{
            "kind": "calendar#events",
            "items": [
                {"id": "a", "summary": "demo sync",
                 "start": {"dateTime": "2024-03-04T10:00:00-05:00", "timeZone": "America/Bogota"},
                 "end": {"dateTime": "2024-03-04T11:30:00-05:00"}},
                {"id": "b", "summary": "offsite",
                 "start": {"date": "2024-03-05"}, "end": {"date": "2024-03-06"}}
            ],
            "nextPageToken": "tok"
        }"#;
        let page: EventPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.next_page_token.as_deref(), Some("tok"));
        assert_eq!(page.items[0].description, None);
        assert_eq!(
            page.items[1].start.as_ref().unwrap().date.as_deref(),
            Some("2024-03-05")
        );
    }

    #[test]
    fn body_prefers_the_plain_text_part() {
        let json = r#"{"id": "m2", "payload": {"mimeType": "multipart/alternative",
            "parts": [
              {"mimeType": "text/html", "body": {"data": "PHA-RGVtbzwvcD4="}},
              {"mimeType": "text/plain", "body": {"data": "cGxhaW4gb25seQ=="}}
            ]}}"#;
        let msg: MessageMetadata = serde_json::from_str(json).unwrap();
        let payload = msg.payload.unwrap();
        assert_eq!(payload.body_data(), Some("cGxhaW4gb25seQ=="));
    }

    #[test]
    fn message_headers_are_case_insensitive() {
        let json = r#"{"id": "m1", "snippet": "hi",
            "payload": {"headers": [{"name": "Subject", "value": "Weekly demo"}]}}"#;
        let msg: MessageMetadata = serde_json::from_str(json).unwrap();
        assert_eq!(msg.header("subject"), Some("Weekly demo"));
        assert_eq!(msg.header("Date"), None);
    }
}
