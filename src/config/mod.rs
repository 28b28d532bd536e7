use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use chrono::FixedOffset;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// How project keywords are matched against event titles and descriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeywordMatch {
    /// Raw, case-sensitive substring match anywhere in the text.
    #[default]
    Substring,
    /// Case-sensitive whole-word match.
    Word,
}

/// What to do with a project whose keywords matched no event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyProjectPolicy {
    /// Stop the report with an error; nothing is exported.
    #[default]
    Abort,
    /// Drop the project from the table and keep going.
    Exclude,
}

/// Retry policy for prompted values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptModeSetting {
    /// Interactive when stdin is a terminal, batch otherwise.
    #[default]
    Auto,
    Interactive,
    Batch,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_credentials_file")]
    pub credentials_file: String,
    #[serde(default = "default_token_file")]
    pub token_file: String,
    #[serde(default = "default_calendar_id")]
    pub calendar_id: String,
    #[serde(default = "default_utc_offset")]
    pub utc_offset: String,
    #[serde(default = "default_now_keyword")]
    pub now_keyword: String,
    #[serde(default = "default_done_keyword")]
    pub done_keyword: String,
    #[serde(default)]
    pub keyword_match: KeywordMatch,
    #[serde(default)]
    pub empty_project: EmptyProjectPolicy,
    #[serde(default)]
    pub prompt_mode: PromptModeSetting,
    #[serde(default = "default_output_file")]
    pub output_file: String,
    #[serde(default = "default_sheet_name")]
    pub sheet_name: String,
    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_credentials_file() -> String {
    Config::config_dir()
        .join("credentials.json")
        .to_string_lossy()
        .to_string()
}
fn default_token_file() -> String {
    Config::config_dir()
        .join("token.json")
        .to_string_lossy()
        .to_string()
}
fn default_calendar_id() -> String {
    "primary".to_string()
}
fn default_utc_offset() -> String {
    "-05:00".to_string()
}
fn default_now_keyword() -> String {
    "ahora".to_string()
}
fn default_done_keyword() -> String {
    "Buscar".to_string()
}
fn default_output_file() -> String {
    "Time_spent_on_projects.xlsx".to_string()
}
fn default_sheet_name() -> String {
    "Time_spent".to_string()
}
fn default_http_timeout() -> u64 {
    30
}
fn default_page_size() -> u32 {
    250
}

impl Default for Config {
    fn default() -> Self {
        Self {
            credentials_file: default_credentials_file(),
            token_file: default_token_file(),
            calendar_id: default_calendar_id(),
            utc_offset: default_utc_offset(),
            now_keyword: default_now_keyword(),
            done_keyword: default_done_keyword(),
            keyword_match: KeywordMatch::default(),
            empty_project: EmptyProjectPolicy::default(),
            prompt_mode: PromptModeSetting::default(),
            output_file: default_output_file(),
            sheet_name: default_sheet_name(),
            http_timeout_secs: default_http_timeout(),
            page_size: default_page_size(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("projtime")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".projtime")
        }
    }

    /// Return the full path of the default config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("projtime.conf")
    }

    /// Load configuration from `path` (or the default location),
    /// returning defaults when the file does not exist.
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::config_file);

        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path).map_err(|e| {
            AppError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        let cfg: Config = serde_yaml::from_str(&content)?;
        // fail early on a bad offset rather than in the middle of a run
        cfg.offset()?;
        Ok(cfg)
    }

    /// Write the configuration to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let mut file = fs::File::create(path)?;
        file.write_all(yaml.as_bytes())?;
        Ok(())
    }

    /// Fixed UTC offset used for every timestamp of a run.
    pub fn offset(&self) -> AppResult<FixedOffset> {
        parse_offset(&self.utc_offset)
    }

    pub fn credentials_path(&self) -> PathBuf {
        expand_tilde(&self.credentials_file)
    }

    pub fn token_path(&self) -> PathBuf {
        expand_tilde(&self.token_file)
    }
}

/// Parse `Z`, `UTC`, `+HH:MM`, `-HH:MM` or `±HHMM`.
pub fn parse_offset(s: &str) -> AppResult<FixedOffset> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("z") || s.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0)
            .ok_or_else(|| AppError::Config(format!("invalid utc_offset '{s}'")));
    }

    let re = Regex::new(r"^([+-])(\d{2}):?(\d{2})$")
        .map_err(|e| AppError::Other(e.to_string()))?;
    let caps = re
        .captures(s)
        .ok_or_else(|| AppError::Config(format!("invalid utc_offset '{s}'")))?;

    let hours: i32 = caps[2]
        .parse()
        .map_err(|_| AppError::Config(format!("invalid utc_offset '{s}'")))?;
    let minutes: i32 = caps[3]
        .parse()
        .map_err(|_| AppError::Config(format!("invalid utc_offset '{s}'")))?;
    if hours > 23 || minutes > 59 {
        return Err(AppError::Config(format!("invalid utc_offset '{s}'")));
    }

    let secs = hours * 3600 + minutes * 60;
    let secs = if &caps[1] == "-" { -secs } else { secs };
    FixedOffset::east_opt(secs).ok_or_else(|| AppError::Config(format!("invalid utc_offset '{s}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_zulu_and_fixed_offsets() {
        assert_eq!(parse_offset("Z").unwrap().local_minus_utc(), 0);
        assert_eq!(parse_offset("-05:00").unwrap().local_minus_utc(), -5 * 3600);
        assert_eq!(parse_offset("+0530").unwrap().local_minus_utc(), 5 * 3600 + 1800);
    }

    #[test]
    fn rejects_garbage_offsets() {
        assert!(parse_offset("five").is_err());
        assert!(parse_offset("+25:00").is_err());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let cfg: Config = serde_yaml::from_str("utc_offset: Z\nkeyword_match: word\n").unwrap();
        assert_eq!(cfg.keyword_match, KeywordMatch::Word);
        assert_eq!(cfg.empty_project, EmptyProjectPolicy::Abort);
        assert_eq!(cfg.now_keyword, "ahora");
        assert_eq!(cfg.sheet_name, "Time_spent");
        assert_eq!(cfg.calendar_id, "primary");
    }
}
