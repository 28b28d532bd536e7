//! OAuth 2.0 for an installed application: client secrets, the cached token,
//! refresh, and the loopback consent flow.

use super::http::HttpClient;
use super::{ApiClient, ClientProvider, SCOPES, Service};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, warning};
use chrono::{DateTime, TimeDelta, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

const DEFAULT_AUTH_URI: &str = "https://accounts.google.com/o/oauth2/auth";
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Tokens this close to expiry are refreshed up front.
const EXPIRY_MARGIN_SECS: i64 = 60;

fn default_auth_uri() -> String {
    DEFAULT_AUTH_URI.to_string()
}
fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

/// OAuth client as downloaded from the Google Cloud console.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientSecrets {
    pub client_id: String,
    pub client_secret: String,
    #[serde(default = "default_auth_uri")]
    pub auth_uri: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

#[derive(Deserialize)]
struct ClientSecretsFile {
    installed: Option<ClientSecrets>,
    web: Option<ClientSecrets>,
}

impl ClientSecrets {
    /// Parse the console JSON; both the `installed` and `web` layouts work.
    pub fn from_json(json: &str) -> AppResult<Self> {
        let file: ClientSecretsFile = serde_json::from_str(json)?;
        file.installed.or(file.web).ok_or_else(|| {
            AppError::Config("client secrets need an 'installed' or 'web' section".into())
        })
    }

    pub fn load(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Err(AppError::Config(format!(
                "OAuth client secrets not found at {}. Download them from \
                 https://console.cloud.google.com/apis/credentials and set credentials_file.",
                path.display()
            )));
        }
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

/// Access token cached between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenCache {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub expires_at: DateTime<Utc>,
    #[serde(default)]
    pub scopes: Vec<String>,
}

impl TokenCache {
    /// `None` when no cache has been written yet.
    pub fn load(path: &Path) -> AppResult<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    /// Write the cache, readable by the owner only on Unix.
    pub fn save(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
        }
        Ok(())
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now + TimeDelta::seconds(EXPIRY_MARGIN_SECS) >= self.expires_at
    }

    /// true when every scope in `wanted` was granted
    pub fn covers(&self, wanted: &[&str]) -> bool {
        wanted.iter().all(|w| self.scopes.iter().any(|s| s == w))
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: i64,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    scope: Option<String>,
}

impl TokenResponse {
    /// Google usually omits the refresh token on refresh; keep the old one.
    fn into_cache(self, previous_refresh: Option<String>, requested: &[&str]) -> TokenCache {
        let scopes = match self.scope {
            Some(s) => s.split_whitespace().map(str::to_string).collect(),
            None => requested.iter().map(|s| s.to_string()).collect(),
        };
        TokenCache {
            access_token: self.access_token,
            refresh_token: self.refresh_token.or(previous_refresh),
            expires_at: Utc::now() + TimeDelta::seconds(self.expires_in),
            scopes,
        }
    }
}

/// Google sign-in backed by a client secrets file and a token cache.
pub struct GoogleAuth {
    secrets_path: PathBuf,
    token_path: PathBuf,
    http: HttpClient,
}

impl GoogleAuth {
    pub fn from_config(cfg: &Config) -> AppResult<Self> {
        Ok(Self {
            secrets_path: cfg.credentials_path(),
            token_path: cfg.token_path(),
            http: HttpClient::new(Duration::from_secs(cfg.http_timeout_secs))?,
        })
    }

    pub fn token_path(&self) -> &Path {
        &self.token_path
    }

    /// Forget the cached token so the next call asks for consent again.
    pub fn reset(&self) -> AppResult<()> {
        if self.token_path.exists() {
            fs::remove_file(&self.token_path)?;
            info(format!("Removed cached token {}", self.token_path.display()));
        }
        Ok(())
    }

    /// A valid access token, refreshing or asking for consent as needed.
    pub fn access_token(&self) -> AppResult<TokenCache> {
        let secrets = ClientSecrets::load(&self.secrets_path)?;
        let cached = TokenCache::load(&self.token_path).unwrap_or_else(|e| {
            warning(format!("Ignoring unreadable token cache: {e}"));
            None
        });

        let token = match cached {
            Some(c) if !c.covers(SCOPES) => {
                log::info!("cached token lacks a scope, asking for consent");
                self.consent(&secrets)?
            }
            Some(c) if !c.is_expired(Utc::now()) => return Ok(c),
            Some(TokenCache {
                refresh_token: Some(refresh),
                ..
            }) => {
                log::debug!("access token expired, refreshing");
                self.refresh(&secrets, &refresh)?
            }
            _ => self.consent(&secrets)?,
        };

        token.save(&self.token_path)?;
        Ok(token)
    }

    fn refresh(&self, secrets: &ClientSecrets, refresh_token: &str) -> AppResult<TokenCache> {
        let request = self.http.post(&secrets.token_uri).form(&[
            ("client_id", secrets.client_id.as_str()),
            ("client_secret", secrets.client_secret.as_str()),
            ("refresh_token", refresh_token),
            ("grant_type", "refresh_token"),
        ]);
        let response: TokenResponse = self
            .http
            .send_json(request)
            .map_err(|e| AppError::SourceUnavailable(format!("token refresh failed: {e}")))?;
        Ok(response.into_cache(Some(refresh_token.to_string()), SCOPES))
    }

    fn consent(&self, secrets: &ClientSecrets) -> AppResult<TokenCache> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let redirect_uri = format!("http://{}", listener.local_addr()?);
        let state = random_state();
        let url = consent_url(secrets, &redirect_uri, &state)?;

        info("Open this URL in your browser to grant read access:");
        println!("\n{url}\n");
        if open::that(url.as_str()).is_err() {
            warning("Could not open a browser automatically, copy the URL above.");
        }

        let (stream, _) = listener.accept()?;
        let code = answer_callback(stream, &state)?;
        info("Authorization code received, exchanging it for a token...");

        let request = self.http.post(&secrets.token_uri).form(&[
            ("client_id", secrets.client_id.as_str()),
            ("client_secret", secrets.client_secret.as_str()),
            ("code", code.as_str()),
            ("redirect_uri", redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ]);
        let response: TokenResponse = self
            .http
            .send_json(request)
            .map_err(|e| AppError::SourceUnavailable(format!("code exchange failed: {e}")))?;
        Ok(response.into_cache(None, SCOPES))
    }
}

impl ClientProvider for GoogleAuth {
    fn get_client(&self, service: Service) -> AppResult<ApiClient> {
        let token = self.access_token()?;
        log::debug!("client ready for {:?}", service);
        Ok(ApiClient::new(
            self.http.clone(),
            service.base_url(),
            token.access_token,
        ))
    }
}

/// Browser URL asking for offline access to every scope.
pub fn consent_url(secrets: &ClientSecrets, redirect_uri: &str, state: &str) -> AppResult<Url> {
    let scope = SCOPES.join(" ");
    Url::parse_with_params(
        &secrets.auth_uri,
        [
            ("client_id", secrets.client_id.as_str()),
            ("redirect_uri", redirect_uri),
            ("response_type", "code"),
            ("scope", scope.as_str()),
            ("access_type", "offline"),
            ("prompt", "consent"),
            ("state", state),
        ],
    )
    .map_err(|e| AppError::Config(format!("invalid auth_uri '{}': {e}", secrets.auth_uri)))
}

/// Pull the authorization code out of the callback's request line
/// (`GET /?state=..&code=.. HTTP/1.1`).
pub fn parse_callback(request_line: &str, expected_state: &str) -> AppResult<String> {
    let target = request_line
        .split_whitespace()
        .nth(1)
        .ok_or_else(|| AppError::SourceUnavailable("malformed OAuth callback".into()))?;
    let url = Url::parse(&format!("http://localhost{target}"))
        .map_err(|e| AppError::SourceUnavailable(format!("malformed OAuth callback: {e}")))?;

    let param = |name: &str| {
        url.query_pairs()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
    };

    if let Some(err) = param("error") {
        return Err(AppError::SourceUnavailable(format!(
            "authorization denied: {err}"
        )));
    }
    if param("state").as_deref() != Some(expected_state) {
        return Err(AppError::SourceUnavailable(
            "OAuth state mismatch, please retry".into(),
        ));
    }
    param("code").ok_or_else(|| AppError::SourceUnavailable("no code in OAuth callback".into()))
}

fn answer_callback(stream: TcpStream, state: &str) -> AppResult<String> {
    let mut reader = BufReader::new(stream);
    let mut request_line = String::new();
    reader.read_line(&mut request_line)?;

    let result = parse_callback(&request_line, state);
    let message = match &result {
        Ok(_) => "Authorization complete. You can close this window.",
        Err(_) => "Authorization failed. Check the terminal for details.",
    };
    let body = format!("<html><body><p>{message}</p></body></html>");
    let response = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );

    let mut stream = reader.into_inner();
    if let Err(e) = stream.write_all(response.as_bytes()).and_then(|_| stream.flush()) {
        log::debug!("could not answer the browser: {e}");
    }
    result
}

/// Anti-forgery value for the consent round-trip: 32 random bytes, hex encoded.
fn random_state() -> String {
    let mut rng = rand::thread_rng();
    (0..32).map(|_| format!("{:02x}", rng.r#gen::<u8>())).collect()
}
