use crate::errors::{AppError, AppResult};
use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::thread;
use std::time::Duration;

/// Blocking HTTP client with a timeout and a single retry on transient
/// failures (connect errors, timeouts, 429 and 5xx answers).
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: Client,
    max_attempts: usize,
    backoff: Duration,
}

impl HttpClient {
    pub fn new(timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(format!("projtime/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::SourceUnavailable(format!("cannot build HTTP client: {e}")))?;

        Ok(Self {
            client,
            max_attempts: 2,
            backoff: Duration::from_millis(500),
        })
    }

    pub fn get(&self, url: &str) -> RequestBuilder {
        self.client.get(url)
    }

    pub fn post(&self, url: &str) -> RequestBuilder {
        self.client.post(url)
    }

    /// Send `builder` (retrying once if the failure looks transient) and
    /// decode a successful JSON body.
    pub fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> AppResult<T> {
        let response = self.send(builder)?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(AppError::SourceUnavailable(format!(
                "HTTP {status}: {}",
                body.trim()
            )));
        }

        response
            .json::<T>()
            .map_err(|e| AppError::SourceUnavailable(format!("unexpected response body: {e}")))
    }

    fn send(&self, builder: RequestBuilder) -> AppResult<Response> {
        let attempts = self.max_attempts.max(1);

        for attempt in 1..=attempts {
            let request = builder
                .try_clone()
                .ok_or_else(|| AppError::Other("request body cannot be retried".into()))?
                .build()
                .map_err(|e| AppError::SourceUnavailable(e.to_string()))?;

            let url = request.url().clone();
            log::debug!("attempt {attempt}: {} {}", request.method(), redacted(&url));

            match self.client.execute(request) {
                Ok(response) => {
                    let status = response.status();
                    log::debug!("attempt {attempt}: HTTP {status}");
                    if is_transient_status(status) && attempt < attempts {
                        thread::sleep(self.backoff);
                        continue;
                    }
                    return Ok(response);
                }
                Err(err) => {
                    log::debug!("attempt {attempt} failed: {err}");
                    if (err.is_timeout() || err.is_connect()) && attempt < attempts {
                        thread::sleep(self.backoff);
                        continue;
                    }
                    return Err(AppError::SourceUnavailable(format!(
                        "request to {} failed: {err}",
                        redacted(&url)
                    )));
                }
            }
        }

        Err(AppError::SourceUnavailable(
            "HTTP retries exhausted without a response".into(),
        ))
    }
}

fn is_transient_status(status: StatusCode) -> bool {
    status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS
}

/// URL without its query string, which may carry tokens.
fn redacted(url: &url::Url) -> String {
    let mut u = url.clone();
    u.set_query(None);
    u.to_string()
}
