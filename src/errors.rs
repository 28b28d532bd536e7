//! Unified application error type.
//! Every stage of the report pipeline (prompts, fetch, classification,
//! aggregation, export) returns AppError so the CLI can report failures
//! in one place.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO / serialization
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // ---------------------------
    // User input
    // ---------------------------
    #[error("Invalid date format: '{0}' (expected dd/mm/yyyy)")]
    InvalidDateFormat(String),

    #[error("Invalid project: {0}")]
    InvalidProject(String),

    #[error("Input closed before a value was provided")]
    InputClosed,

    // ---------------------------
    // Event data
    // ---------------------------
    #[error("Empty date range: end date {end} is before start date {start}")]
    EmptyRange { start: String, end: String },

    #[error("No events matched project '{0}'")]
    EmptyClassification(String),

    // ---------------------------
    // Infrastructure
    // ---------------------------
    #[error("Event source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Failed to write report to {path}: {cause}")]
    SinkWriteFailure { path: PathBuf, cause: String },

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
