use crate::cli::commands::{open_event_source, stdio_prompter};
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::fetcher::EventFetcher;
use crate::core::range::DateRangeResolver;
use crate::errors::AppResult;
use crate::models::Event;
use crate::ui::messages::{header, info, warning};
use crate::utils::table::Table;
use crate::utils::time::format_minutes;
use chrono::FixedOffset;

/// Handle `events`: show what the report would classify.
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Events { events_file } = &cli.command {
        let offset = cfg.offset()?;
        let mut prompter = stdio_prompter(cli, cfg);

        let range = DateRangeResolver::new(offset, cfg.now_keyword.clone()).prompt(&mut prompter)?;
        range.ensure_not_empty()?;

        let source = open_event_source(cfg, events_file.as_deref())?;
        let outcome = EventFetcher::new(offset).fetch(&source, &range)?;

        if outcome.events.is_empty() {
            warning("No events found for the selected range.");
            return Ok(());
        }

        header(format!(
            "Events {} - {}",
            range.start_date().format("%d/%m/%Y"),
            range.end_date().format("%d/%m/%Y")
        ));
        println!("{}", event_table(&outcome.events, &offset).render());
        info(format!(
            "{} event(s), {} skipped as malformed.",
            outcome.events.len(),
            outcome.malformed.len()
        ));
    }
    Ok(())
}

fn event_table(events: &[Event], offset: &FixedOffset) -> Table {
    let headers: Vec<String> = ["Date", "Start", "End", "Duration", "Summary"]
        .iter()
        .map(|h| h.to_string())
        .collect();

    let rows = events
        .iter()
        .map(|e| {
            let start = e.start.with_timezone(offset);
            let end = e.end.with_timezone(offset);
            let (from, to) = if e.all_day {
                ("all day".to_string(), String::new())
            } else {
                (start.format("%H:%M").to_string(), end.format("%H:%M").to_string())
            };
            vec![
                start.format("%d/%m/%Y").to_string(),
                from,
                to,
                format_minutes(e.duration.num_minutes()),
                e.summary.clone(),
            ]
        })
        .collect();

    Table::fitted(&headers, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeDelta};

    #[test]
    fn rows_show_local_times_and_durations() {
        let start = DateTime::parse_from_rfc3339("2024-03-04T15:00:00Z").unwrap();
        let ev = Event::new(start, start + TimeDelta::minutes(90), "demo sync", "", false).unwrap();
        let t = event_table(&[ev], &FixedOffset::west_opt(5 * 3600).unwrap());
        assert_eq!(t.rows[0], ["04/03/2024", "10:00", "11:30", "01:30", "demo sync"]);
    }
}
