//! projtime library root.
//! Exposes the CLI parser, the high-level run() function and the report
//! pipeline modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod export;
pub mod google;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(cli, cfg),
        Commands::Auth { .. } => cli::commands::auth::handle(cli, cfg),
        Commands::Report { .. } => cli::commands::report::handle(cli, cfg),
        Commands::Events { .. } => cli::commands::events::handle(cli, cfg),
        Commands::Mail { .. } => cli::commands::mail::handle(cli, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // `init` must work before any configuration exists, and with a broken one
    let cfg = match cli.command {
        Commands::Init => Config::default(),
        _ => Config::load(cli.config.as_deref())?,
    };
    log::debug!("utc offset {}, calendar '{}'", cfg.utc_offset, cfg.calendar_id);

    dispatch(&cli, &cfg)
}
