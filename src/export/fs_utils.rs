// src/export/fs_utils.rs

use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, warning};
use crate::utils::prompt::{PromptMode, Prompter};
use std::fs::{self, File};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

/// Check that the report file can be created or overwritten.
///
/// - file does not exist → Ok
/// - file exists and `force` → Ok
/// - file exists, interactive → ask the user
/// - file exists, batch → error, nothing is asked
pub fn ensure_writable<R: BufRead, W: Write>(
    path: &Path,
    force: bool,
    prompter: &mut Prompter<R, W>,
) -> AppResult<()> {
    if !path.exists() || force {
        return Ok(());
    }

    if prompter.mode() == PromptMode::Batch {
        return Err(AppError::SinkWriteFailure {
            path: path.to_path_buf(),
            cause: "file already exists (use --force to overwrite)".into(),
        });
    }

    warning(format!("The file '{}' already exists.", path.display()));
    if prompter.confirm("Overwrite? [y/N]: ")? {
        info("Existing file will be overwritten.");
        Ok(())
    } else {
        Err(AppError::SinkWriteFailure {
            path: path.to_path_buf(),
            cause: "export cancelled, existing file not overwritten".into(),
        })
    }
}

/// Write `bytes` to a hidden sibling first, then rename it over `path`.
/// On failure the temporary file is removed and `path` is left untouched.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> AppResult<()> {
    let tmp = temp_sibling(path);

    let result = File::create(&tmp)
        .and_then(|mut f| {
            f.write_all(bytes)?;
            f.sync_all()
        })
        .and_then(|_| fs::rename(&tmp, path));

    result.map_err(|e| {
        fs::remove_file(&tmp).ok();
        AppError::SinkWriteFailure {
            path: path.to_path_buf(),
            cause: e.to_string(),
        }
    })
}

fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "report".to_string());
    path.with_file_name(format!(".{name}.{}.tmp", std::process::id()))
}
