//! Keyword tagging of events into projects.
//!
//! Matching is case-sensitive against the event summary and description.
//! In `Substring` mode a keyword matches anywhere in the text, so a short
//! keyword such as `a` tags nearly every event; `Word` mode requires the
//! keyword to stand on word boundaries.

use crate::config::KeywordMatch;
use crate::errors::{AppError, AppResult};
use crate::models::{Event, Project};
use indexmap::IndexMap;
use regex::Regex;

/// project name -> events tagged to it, in input order
pub type Classification<'a> = IndexMap<String, Vec<&'a Event>>;

enum Matcher {
    Substring(Vec<String>),
    Word(Vec<Regex>),
}

impl Matcher {
    fn build(project: &Project, mode: KeywordMatch) -> AppResult<Self> {
        match mode {
            KeywordMatch::Substring => Ok(Matcher::Substring(project.keywords.clone())),
            KeywordMatch::Word => {
                let regexes = project
                    .keywords
                    .iter()
                    .map(|k| {
                        Regex::new(&word_pattern(k)).map_err(|e| {
                            AppError::InvalidProject(format!("keyword '{k}': {e}"))
                        })
                    })
                    .collect::<AppResult<Vec<_>>>()?;
                Ok(Matcher::Word(regexes))
            }
        }
    }

    fn matches(&self, text: &str) -> bool {
        match self {
            Matcher::Substring(keywords) => keywords.iter().any(|k| text.contains(k.as_str())),
            Matcher::Word(regexes) => regexes.iter().any(|r| r.is_match(text)),
        }
    }

    fn matches_event(&self, ev: &Event) -> bool {
        self.matches(&ev.summary) || self.matches(&ev.description)
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Whole-token pattern for `keyword`. A `\b` needs a word character on the
/// keyword side, so edges like `#` or `+` use `\B` instead: the neighbour
/// must then be a non-word character or the end of the text.
fn word_pattern(keyword: &str) -> String {
    let edge = |c: Option<char>| match c {
        Some(c) if !is_word_char(c) => r"\B",
        _ => r"\b",
    };
    format!(
        "{}{}{}",
        edge(keyword.chars().next()),
        regex::escape(keyword),
        edge(keyword.chars().last())
    )
}

pub struct ProjectClassifier {
    mode: KeywordMatch,
}

impl ProjectClassifier {
    pub fn new(mode: KeywordMatch) -> Self {
        Self { mode }
    }

    /// Tag `events` to `projects`.
    ///
    /// Every project appears in the output, in definition order, even when
    /// nothing matched. An event is listed at most once per project and may be
    /// listed under several projects. A repeated project name replaces the
    /// earlier definition but keeps its position.
    pub fn classify<'a>(
        &self,
        events: &'a [Event],
        projects: &[Project],
    ) -> AppResult<Classification<'a>> {
        let mut defs: IndexMap<&str, &Project> = IndexMap::new();
        for p in projects {
            defs.insert(p.name.as_str(), p);
        }

        let mut out: Classification<'a> = IndexMap::with_capacity(defs.len());
        for (name, project) in defs {
            let matcher = Matcher::build(project, self.mode)?;
            // one pass over the events, so each event is pushed at most once
            let tagged: Vec<&Event> = events.iter().filter(|ev| matcher.matches_event(ev)).collect();
            log::debug!("project '{name}': {} events", tagged.len());
            out.insert(name.to_string(), tagged);
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn ev(summary: &str, description: &str) -> Event {
        Event::new(
            DateTime::parse_from_rfc3339("2024-03-04T10:00:00Z").unwrap(),
            DateTime::parse_from_rfc3339("2024-03-04T11:00:00Z").unwrap(),
            summary,
            description,
            false,
        )
        .unwrap()
    }

    fn names(list: &[&Event]) -> Vec<String> {
        list.iter().map(|e| e.summary.clone()).collect()
    }

    #[test]
    fn event_matching_several_keywords_is_listed_once() {
        let events = vec![ev("demo sync", "demo prep for the sync")];
        let projects = vec![Project::new("Alpha", "demo, sync, prep").unwrap()];
        let out = ProjectClassifier::new(KeywordMatch::Substring)
            .classify(&events, &projects)
            .unwrap();
        assert_eq!(out["Alpha"].len(), 1);
    }

    #[test]
    fn matches_summary_or_description_case_sensitively() {
        let events = vec![
            ev("demo sync", ""),
            ev("planning", "see demo notes"),
            ev("Demo", ""),
        ];
        let projects = vec![Project::new("Alpha", "demo").unwrap()];
        let out = ProjectClassifier::new(KeywordMatch::Substring)
            .classify(&events, &projects)
            .unwrap();
        assert_eq!(names(&out["Alpha"]), ["demo sync", "planning"]);
    }

    #[test]
    fn project_name_tokens_are_keywords() {
        let events = vec![ev("Beta kickoff", ""), ev("Gamma review", "")];
        let projects = vec![Project::new("Beta,Gamma", "").unwrap()];
        let out = ProjectClassifier::new(KeywordMatch::Substring)
            .classify(&events, &projects)
            .unwrap();
        assert_eq!(out["Beta,Gamma"].len(), 2);
    }

    #[test]
    fn events_can_belong_to_several_projects_and_order_is_kept() {
        let events = vec![ev("alpha beta", ""), ev("beta only", "")];
        let projects = vec![
            Project::new("beta", "").unwrap(),
            Project::new("alpha", "").unwrap(),
            Project::new("zeta", "").unwrap(),
        ];
        let out = ProjectClassifier::new(KeywordMatch::Substring)
            .classify(&events, &projects)
            .unwrap();
        let keys: Vec<_> = out.keys().cloned().collect();
        assert_eq!(keys, ["beta", "alpha", "zeta"]);
        assert_eq!(out["beta"].len(), 2);
        assert_eq!(out["alpha"].len(), 1);
        assert!(out["zeta"].is_empty());
    }

    #[test]
    fn substring_mode_over_matches_short_keywords() {
        let events = vec![ev("standup", ""), ev("lunch", "")];
        let projects = vec![Project::new("A", "a").unwrap()];
        let out = ProjectClassifier::new(KeywordMatch::Substring)
            .classify(&events, &projects)
            .unwrap();
        assert_eq!(out["A"].len(), 1);

        let out = ProjectClassifier::new(KeywordMatch::Word)
            .classify(&events, &projects)
            .unwrap();
        assert!(out["A"].is_empty());
    }

    #[test]
    fn word_mode_requires_word_boundaries() {
        let events = vec![ev("demo sync", ""), ev("demonstration", ""), ev("c++ demo", "")];
        let projects = vec![Project::new("Alpha", "demo").unwrap()];
        let out = ProjectClassifier::new(KeywordMatch::Word)
            .classify(&events, &projects)
            .unwrap();
        assert_eq!(names(&out["Alpha"]), ["demo sync", "c++ demo"]);
    }

    #[test]
    fn word_mode_handles_keywords_with_punctuation_edges() {
        let events = vec![
            ev("#standup daily", ""),
            ev("team#standup", ""),
            ev("notes", "moved to c++, sadly"),
            ev("c++x", ""),
        ];
        let projects = vec![
            Project::new("Team", "#standup").unwrap(),
            Project::new("Lang", "c++").unwrap(),
        ];
        let out = ProjectClassifier::new(KeywordMatch::Word)
            .classify(&events, &projects)
            .unwrap();
        assert_eq!(names(&out["Team"]), ["#standup daily"]);
        assert_eq!(names(&out["Lang"]), ["notes"]);
    }

    #[test]
    fn word_patterns_pick_the_boundary_per_edge() {
        assert_eq!(word_pattern("demo"), r"\bdemo\b");
        assert!(word_pattern("#standup").starts_with(r"\B"));
        assert!(word_pattern("#standup").ends_with(r"standup\b"));
        assert_eq!(word_pattern("c++"), r"\bc\+\+\B");
    }

    #[test]
    fn redefined_project_keeps_position_and_takes_new_keywords() {
        let events = vec![ev("demo", ""), ev("review", "")];
        let projects = vec![
            Project::new("Alpha", "demo").unwrap(),
            Project::new("Beta", "").unwrap(),
            Project::new("Alpha", "review").unwrap(),
        ];
        let out = ProjectClassifier::new(KeywordMatch::Substring)
            .classify(&events, &projects)
            .unwrap();
        let keys: Vec<_> = out.keys().cloned().collect();
        assert_eq!(keys, ["Alpha", "Beta"]);
        assert_eq!(names(&out["Alpha"]), ["review"]);
    }

    #[test]
    fn identical_events_are_distinct_entries() {
        let events = vec![ev("demo", ""), ev("demo", "")];
        let projects = vec![Project::new("Alpha", "demo").unwrap()];
        let out = ProjectClassifier::new(KeywordMatch::Substring)
            .classify(&events, &projects)
            .unwrap();
        assert_eq!(out["Alpha"].len(), 2);
    }
}
