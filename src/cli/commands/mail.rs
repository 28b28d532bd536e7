use crate::cli::commands::stdio_prompter;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::range::DateRangeResolver;
use crate::errors::AppResult;
use crate::google::{GmailSource, GoogleAuth, MailMessage};
use crate::ui::messages::{header, info, warning};
use crate::utils::table::Table;

const SNIPPET_CHARS: usize = 60;

/// Handle `mail`: list messages received in a prompted date range.
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Mail { query, body } = &cli.command {
        let offset = cfg.offset()?;
        let mut prompter = stdio_prompter(cli, cfg);

        let range = DateRangeResolver::new(offset, cfg.now_keyword.clone()).prompt(&mut prompter)?;
        range.ensure_not_empty()?;

        let auth = GoogleAuth::from_config(cfg)?;
        let gmail = GmailSource::connect(&auth, cfg.page_size)?;
        let messages = gmail.search(&range, query.as_deref(), *body)?;

        if messages.is_empty() {
            warning("No mail found for the selected range.");
            return Ok(());
        }

        header(format!(
            "Mail {} - {}",
            range.start_date().format("%d/%m/%Y"),
            range.end_date().format("%d/%m/%Y")
        ));
        println!("{}", mail_table(&messages).render());
        if *body {
            for m in &messages {
                println!("---- {} ({})", m.subject, m.date);
                println!("{}\n", m.body.as_deref().unwrap_or("(no text part)").trim_end());
            }
        }
        info(format!("{} message(s).", messages.len()));
    }
    Ok(())
}

fn mail_table(messages: &[MailMessage]) -> Table {
    let headers: Vec<String> = ["Date", "Subject", "Snippet"]
        .iter()
        .map(|h| h.to_string())
        .collect();
    let rows = messages
        .iter()
        .map(|m| vec![m.date.clone(), m.subject.clone(), shorten(&m.snippet)])
        .collect();
    Table::fitted(&headers, rows)
}

fn shorten(s: &str) -> String {
    if s.chars().count() <= SNIPPET_CHARS {
        return s.to_string();
    }
    let mut out: String = s.chars().take(SNIPPET_CHARS - 1).collect();
    out.push('…');
    out
}
