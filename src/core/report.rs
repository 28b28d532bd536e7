//! End-to-end report run: dates, events, projects, table, file.

use crate::config::{Config, EmptyProjectPolicy, KeywordMatch};
use crate::core::aggregator::TimeAggregator;
use crate::core::classifier::ProjectClassifier;
use crate::core::fetcher::{EventFetcher, EventSource};
use crate::core::formatter::ReportFormatter;
use crate::core::range::{DateRange, DateRangeResolver};
use crate::errors::{AppError, AppResult};
use crate::export::{self, ExportFormat};
use crate::models::{Event, Project, ReportTable};
use crate::ui::messages::{header, info, success};
use crate::utils::prompt::Prompter;
use crate::utils::table::Table;
use chrono::FixedOffset;
use std::io::{BufRead, Write};
use std::path::Path;

/// The knobs of the pure pipeline, lifted out of [`Config`].
#[derive(Debug, Clone, Copy)]
pub struct ReportSettings {
    pub offset: FixedOffset,
    pub keyword_match: KeywordMatch,
    pub empty_project: EmptyProjectPolicy,
}

impl ReportSettings {
    pub fn from_config(cfg: &Config) -> AppResult<Self> {
        Ok(Self {
            offset: cfg.offset()?,
            keyword_match: cfg.keyword_match,
            empty_project: cfg.empty_project,
        })
    }
}

/// Classify, aggregate and format already-fetched events.
pub fn build_report(
    events: &[Event],
    projects: &[Project],
    range: &DateRange,
    settings: ReportSettings,
) -> AppResult<ReportTable> {
    range.ensure_not_empty()?;

    let classification =
        ProjectClassifier::new(settings.keyword_match).classify(events, projects)?;
    let hours = TimeAggregator::new(settings.offset, settings.empty_project).aggregate(
        &classification,
        range.start_date(),
        range.end_date(),
    )?;

    Ok(ReportFormatter::format(&hours))
}

/// Read `(name, keywords)` pairs until `done_keyword`, a blank name or end of
/// input. At least one project is required.
pub fn prompt_projects<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    done_keyword: &str,
) -> AppResult<Vec<Project>> {
    let name_question = format!("Project name (or '{done_keyword}' to build the report): ");
    let mut projects = Vec::new();

    loop {
        let name = match prompter.ask(&name_question)? {
            Some(n) => n.trim().to_string(),
            None => break,
        };
        if name.is_empty() || name == done_keyword {
            break;
        }

        let project = prompter
            .ask_validated("Keywords (kw_1, kw_2, ...): ", |kw| Project::new(&name, kw))?;
        log::debug!("project '{}' keywords {:?}", project.name, project.keywords);
        projects.push(project);
    }

    if projects.is_empty() {
        return Err(AppError::InvalidProject(
            "at least one project is required".into(),
        ));
    }
    Ok(projects)
}

/// Console rendering of the report, same cells as the exported file.
pub fn preview(table: &ReportTable) -> String {
    Table::fitted(&table.headers(), table.string_rows()).render()
}

pub struct ReportLogic;

impl ReportLogic {
    /// Interactive report.
    ///
    /// `open_source` is only called once the date range is known to be
    /// non-empty and the output file can be written, so a bad answer or a bad
    /// sheet name never triggers an OAuth round-trip.
    pub fn run<R, W, F>(
        cfg: &Config,
        prompter: &mut Prompter<R, W>,
        open_source: F,
        file: &Path,
        format: ExportFormat,
        force: bool,
    ) -> AppResult<ReportTable>
    where
        R: BufRead,
        W: Write,
        F: FnOnce() -> AppResult<Box<dyn EventSource>>,
    {
        let settings = ReportSettings::from_config(cfg)?;

        let range = DateRangeResolver::new(settings.offset, cfg.now_keyword.clone()).prompt(prompter)?;
        range.ensure_not_empty()?;

        export::check_target(file, format, &cfg.sheet_name, range.days().len())?;
        export::ensure_writable(file, force, prompter)?;

        let source = open_source()?;
        let outcome = EventFetcher::new(settings.offset).fetch(&source, &range)?;
        info(format!(
            "Fetched {} event(s) between {} and {}.",
            outcome.events.len(),
            range.start_date().format("%d/%m/%Y"),
            range.end_date().format("%d/%m/%Y")
        ));

        let projects = prompt_projects(prompter, &cfg.done_keyword)?;
        let table = build_report(&outcome.events, &projects, &range, settings)?;

        header("Time spent on projects (hours)");
        println!("{}", preview(&table));

        export::write_report(&table, file, format, &cfg.sheet_name)?;
        success(format!("Report written to {}", file.display()));

        Ok(table)
    }
}
