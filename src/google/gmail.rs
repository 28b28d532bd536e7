use super::models::{MessageListPage, MessageMetadata};
use super::{ApiClient, ClientProvider, Service};
use crate::core::range::DateRange;
use crate::errors::AppResult;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, FixedOffset, TimeZone, Utc};

const MAX_PAGES: usize = 100;

/// Header fields of one message, enough to list it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    pub id: String,
    pub subject: String,
    /// `Date` header as sent, or the server timestamp when it is missing
    pub date: String,
    pub snippet: String,
    /// decoded text, only when bodies were requested
    pub body: Option<String>,
}

pub struct GmailSource {
    client: ApiClient,
    page_size: u32,
}

impl GmailSource {
    pub fn new(client: ApiClient, page_size: u32) -> Self {
        Self { client, page_size }
    }

    pub fn connect<P: ClientProvider + ?Sized>(provider: &P, page_size: u32) -> AppResult<Self> {
        Ok(Self::new(provider.get_client(Service::Gmail)?, page_size))
    }

    /// Messages received within `range`, optionally narrowed by a Gmail
    /// search expression, newest first as Gmail returns them.
    /// `with_bodies` fetches every message in full and decodes its text.
    pub fn search(
        &self,
        range: &DateRange,
        extra: Option<&str>,
        with_bodies: bool,
    ) -> AppResult<Vec<MailMessage>> {
        let q = search_query(range, extra);
        log::debug!("gmail query: {q}");

        let mut ids = Vec::new();
        let mut token: Option<String> = None;
        for _ in 0..MAX_PAGES {
            let mut query = vec![("q", q.clone()), ("maxResults", self.page_size.to_string())];
            if let Some(t) = &token {
                query.push(("pageToken", t.clone()));
            }

            let page: MessageListPage = self.client.get(&["users", "me", "messages"], &query)?;
            ids.extend(page.messages.into_iter().map(|m| m.id));

            match page.next_page_token {
                Some(next) if !next.is_empty() => token = Some(next),
                _ => break,
            }
        }

        let offset = range.offset();
        let query: &[(&str, &str)] = if with_bodies {
            &[("format", "full")]
        } else {
            &[
                ("format", "metadata"),
                ("metadataHeaders", "Subject"),
                ("metadataHeaders", "Date"),
            ]
        };
        ids.iter()
            .map(|id| -> AppResult<MailMessage> {
                let meta: MessageMetadata =
                    self.client.get(&["users", "me", "messages", id.as_str()], query)?;
                Ok(to_mail_message(meta, &offset, with_bodies))
            })
            .collect()
    }
}

fn search_query(range: &DateRange, extra: Option<&str>) -> String {
    match extra.map(str::trim).filter(|e| !e.is_empty()) {
        Some(e) => format!("{} {e}", range.gmail_query()),
        None => range.gmail_query(),
    }
}

/// Decode a base64url part body; Gmail may or may not pad it.
fn decode_body(data: &str) -> Option<String> {
    match URL_SAFE_NO_PAD.decode(data.trim_end_matches('=')) {
        Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) => {
            log::warn!("undecodable message body: {e}");
            None
        }
    }
}

fn to_mail_message(meta: MessageMetadata, offset: &FixedOffset, with_body: bool) -> MailMessage {
    let date = match meta.header("Date") {
        Some(d) => d.to_string(),
        None => meta
            .internal_date
            .as_deref()
            .and_then(|ms| ms.parse::<i64>().ok())
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
            .map(|dt: DateTime<Utc>| dt.with_timezone(offset).format("%d/%m/%Y %H:%M").to_string())
            .unwrap_or_default(),
    };

    let body = if with_body {
        meta.payload
            .as_ref()
            .and_then(|p| p.body_data())
            .and_then(decode_body)
    } else {
        None
    };

    MailMessage {
        subject: meta.header("Subject").unwrap_or_default().to_string(),
        id: meta.id,
        date,
        snippet: meta.snippet,
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::range::DateRangeResolver;

    fn range() -> DateRange {
        DateRangeResolver::new(FixedOffset::east_opt(0).unwrap(), "ahora")
            .resolve_at("01/03/2024", "05/03/2024", Utc::now())
            .unwrap()
    }

    #[test]
    fn extra_terms_are_appended_to_the_date_filter() {
        assert_eq!(
            search_query(&range(), Some("from:boss ")),
            "after:2024/03/01 before:2024/03/06 from:boss"
        );
        assert_eq!(search_query(&range(), Some("  ")), "after:2024/03/01 before:2024/03/06");
        assert_eq!(search_query(&range(), None), "after:2024/03/01 before:2024/03/06");
    }

    #[test]
    fn metadata_maps_to_a_mail_message() {
        let meta: MessageMetadata = serde_json::from_str(
            r#"{"id":"m1","snippet":"see you at the demo","internalDate":"1709546400000",
                "payload":{"headers":[{"name":"subject","value":"Demo"}]}}"#,
        )
        .unwrap();
        let msg = to_mail_message(meta, &FixedOffset::east_opt(0).unwrap(), false);
        assert_eq!(msg.subject, "Demo");
        assert_eq!(msg.snippet, "see you at the demo");
        // no Date header: falls back to internalDate
        assert_eq!(msg.date, "04/03/2024 10:00");
        assert_eq!(msg.body, None);
    }

    #[test]
    fn full_messages_carry_their_decoded_text() {
        let meta: MessageMetadata = serde_json::from_str(
            r#"{"id":"m2","snippet":"Demo moved","payload":{
                "mimeType":"multipart/mixed",
                "headers":[{"name":"Subject","value":"Demo"},{"name":"Date","value":"Mon, 4 Mar 2024 10:00:00 +0000"}],
                "parts":[{"mimeType":"text/plain","body":{"data":"RGVtbyBtb3ZlZCB0byBGcmlkYXkuDQo="}}]}}"#,
        )
        .unwrap();
        let msg = to_mail_message(meta, &FixedOffset::east_opt(0).unwrap(), true);
        assert_eq!(msg.date, "Mon, 4 Mar 2024 10:00:00 +0000");
        assert_eq!(msg.body.as_deref(), Some("Demo moved to Friday.\r\n"));
    }

    #[test]
    fn bodies_decode_with_or_without_padding() {
        assert_eq!(decode_body("PHA-RGVtbzwvcD4=").as_deref(), Some("<p>Demo</p>"));
        assert_eq!(decode_body("PHA-RGVtbzwvcD4").as_deref(), Some("<p>Demo</p>"));
        assert_eq!(decode_body("%%%"), None);
    }
}
