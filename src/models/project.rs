use crate::errors::{AppError, AppResult};

/// A user-defined bucket of events selected by keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub name: String,
    /// explicit keywords followed by the name's comma-split tokens,
    /// trimmed, non-empty, first occurrence wins
    pub keywords: Vec<String>,
}

impl Project {
    /// Build a project from its name and a comma-separated keyword list
    /// (`"kw_1, kw_2, ..."`). The name itself always contributes keywords.
    pub fn new(name: &str, keywords: &str) -> AppResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::InvalidProject("project name is empty".into()));
        }

        let mut merged: Vec<String> = Vec::new();
        for token in keywords.split(',').chain(name.split(',')) {
            let token = token.trim();
            if !token.is_empty() && !merged.iter().any(|k| k == token) {
                merged.push(token.to_string());
            }
        }

        if merged.is_empty() {
            return Err(AppError::InvalidProject(format!(
                "project '{name}' has no usable keyword"
            )));
        }

        Ok(Self {
            name: name.to_string(),
            keywords: merged,
        })
    }
}
