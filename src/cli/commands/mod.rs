pub mod auth;
pub mod config;
pub mod events;
pub mod init;
pub mod mail;
pub mod report;

use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::fetcher::EventSource;
use crate::errors::AppResult;
use crate::google::{FileEventSource, GoogleAuth, GoogleCalendarSource};
use crate::utils::prompt::{PromptMode, Prompter};
use std::io;
use std::path::{Path, PathBuf};

/// Prompter on stdin/stdout with the retry policy from config and `--batch`.
pub(crate) fn stdio_prompter(cli: &Cli, cfg: &Config) -> Prompter<io::StdinLock<'static>, io::Stdout> {
    Prompter::stdio(PromptMode::resolve(cfg.prompt_mode, cli.batch))
}

/// A saved events file when given, Google Calendar otherwise.
pub(crate) fn open_event_source(
    cfg: &Config,
    events_file: Option<&Path>,
) -> AppResult<Box<dyn EventSource>> {
    match events_file {
        Some(path) => {
            log::debug!("replaying events from {}", path.display());
            Ok(Box::new(FileEventSource::open(path)?))
        }
        None => {
            let auth = GoogleAuth::from_config(cfg)?;
            Ok(Box::new(GoogleCalendarSource::connect(&auth, cfg)?))
        }
    }
}

/// Configuration file in use: `--config` or the default location.
pub(crate) fn config_path(cli: &Cli) -> PathBuf {
    cli.config.clone().unwrap_or_else(Config::config_file)
}
