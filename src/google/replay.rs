//! Offline event source: replays `events.list` responses saved to disk.

use super::models::EventPage;
use crate::core::fetcher::EventSource;
use crate::core::range::DateRange;
use crate::errors::{AppError, AppResult};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Deserialize)]
#[serde(untagged)]
enum Saved {
    Pages(Vec<EventPage>),
    Page(EventPage),
}

/// Pages loaded from a JSON file holding either one `events.list` response
/// or an array of them. Page tokens are page indexes; the range is not
/// applied, the file is served as recorded.
#[derive(Debug, Clone)]
pub struct FileEventSource {
    pages: Vec<EventPage>,
}

impl FileEventSource {
    pub fn open(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            AppError::SourceUnavailable(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> AppResult<Self> {
        let saved: Saved = serde_json::from_str(json)?;
        let mut pages = match saved {
            Saved::Pages(p) => p,
            Saved::Page(p) => vec![p],
        };

        // chain the pages by index, whatever tokens were recorded
        let last = pages.len().saturating_sub(1);
        for (i, page) in pages.iter_mut().enumerate() {
            page.next_page_token = (i < last).then(|| (i + 1).to_string());
        }

        Ok(Self { pages })
    }
}

impl EventSource for FileEventSource {
    fn list_page(&self, _range: &DateRange, page_token: Option<&str>) -> AppResult<EventPage> {
        let index = match page_token {
            None => 0,
            Some(t) => t
                .parse::<usize>()
                .map_err(|_| AppError::SourceUnavailable(format!("unknown page token '{t}'")))?,
        };
        match self.pages.get(index) {
            Some(page) => Ok(page.clone()),
            None if index == 0 => Ok(EventPage::default()),
            None => Err(AppError::SourceUnavailable(format!(
                "page {index} not found in saved events"
            ))),
        }
    }
}
