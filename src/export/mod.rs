// src/export/mod.rs

mod fs_utils;
mod json_csv;
mod xlsx;

pub use fs_utils::ensure_writable;

use crate::errors::{AppError, AppResult};
use crate::models::ReportTable;
use crate::ui::messages::info;
use clap::ValueEnum;
use std::path::Path;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    #[default]
    Xlsx,
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    /// Format implied by the file extension, if any.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "xlsx" => Some(ExportFormat::Xlsx),
            "csv" => Some(ExportFormat::Csv),
            "json" => Some(ExportFormat::Json),
            _ => None,
        }
    }
}

/// Columns one XLSX sheet can hold.
const XLSX_MAX_COLUMNS: usize = 16_384;

/// Reject a target the chosen format cannot produce, before any event is
/// fetched: a sheet name Excel refuses, or more days than a sheet has columns.
pub fn check_target(
    path: &Path,
    format: ExportFormat,
    sheet_name: &str,
    day_count: usize,
) -> AppResult<()> {
    if format != ExportFormat::Xlsx {
        return Ok(());
    }

    let fail = |cause: String| AppError::SinkWriteFailure {
        path: path.to_path_buf(),
        cause,
    };
    xlsx::check_sheet_name(sheet_name).map_err(fail)?;

    // project column + one per day + Total
    if day_count + 2 > XLSX_MAX_COLUMNS {
        return Err(fail(format!(
            "{day_count} days do not fit in one XLSX sheet (at most {} day columns)",
            XLSX_MAX_COLUMNS - 2
        )));
    }
    Ok(())
}

/// Serialize `table` in `format` and write it to `path` in one step.
/// `sheet_name` only applies to XLSX.
pub fn write_report(
    table: &ReportTable,
    path: &Path,
    format: ExportFormat,
    sheet_name: &str,
) -> AppResult<()> {
    info(format!(
        "Exporting to {}: {}",
        format.as_str().to_ascii_uppercase(),
        path.display()
    ));

    let rendered = match format {
        ExportFormat::Xlsx => xlsx::render_xlsx(table, sheet_name),
        ExportFormat::Csv => json_csv::render_csv(table),
        ExportFormat::Json => json_csv::render_json(table),
    };
    let bytes = rendered.map_err(|cause| AppError::SinkWriteFailure {
        path: path.to_path_buf(),
        cause,
    })?;

    fs_utils::write_atomic(path, &bytes)?;
    log::debug!("wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}
