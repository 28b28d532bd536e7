use crate::cli::commands::{open_event_source, stdio_prompter};
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::report::ReportLogic;
use crate::errors::AppResult;
use crate::export::ExportFormat;
use crate::utils::path::expand_tilde;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Report {
        file,
        format,
        force,
        events_file,
    } = &cli.command
    {
        let path = file
            .clone()
            .unwrap_or_else(|| expand_tilde(&cfg.output_file));
        let format = format
            .or_else(|| ExportFormat::from_path(&path))
            .unwrap_or_default();

        let mut prompter = stdio_prompter(cli, cfg);
        ReportLogic::run(
            cfg,
            &mut prompter,
            || open_event_source(cfg, events_file.as_deref()),
            &path,
            format,
            *force,
        )?;
    }
    Ok(())
}
