//! Line-based prompts with a caller-chosen retry policy.

use crate::config::PromptModeSetting;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::warning;
use std::io::{self, BufRead, IsTerminal, Write};

/// Retry policy for invalid answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptMode {
    /// Re-ask until the answer validates.
    Interactive,
    /// Fail on the first invalid answer.
    Batch,
}

impl PromptMode {
    /// Resolve the configured setting; `force_batch` comes from `--batch`.
    pub fn resolve(setting: PromptModeSetting, force_batch: bool) -> Self {
        if force_batch {
            return PromptMode::Batch;
        }
        match setting {
            PromptModeSetting::Interactive => PromptMode::Interactive,
            PromptModeSetting::Batch => PromptMode::Batch,
            PromptModeSetting::Auto => {
                if io::stdin().is_terminal() {
                    PromptMode::Interactive
                } else {
                    PromptMode::Batch
                }
            }
        }
    }
}

pub struct Prompter<R, W> {
    reader: R,
    writer: W,
    mode: PromptMode,
}

impl Prompter<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio(mode: PromptMode) -> Self {
        Prompter::new(io::stdin().lock(), io::stdout(), mode)
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(reader: R, writer: W, mode: PromptMode) -> Self {
        Self {
            reader,
            writer,
            mode,
        }
    }

    pub fn mode(&self) -> PromptMode {
        self.mode
    }

    /// Print `question` and read one line, without the line terminator.
    /// Returns `None` at end of input.
    pub fn ask(&mut self, question: &str) -> AppResult<Option<String>> {
        write!(self.writer, "{question}")?;
        self.writer.flush()?;

        let mut line = String::new();
        let n = self.reader.read_line(&mut line)?;
        if n == 0 {
            // keep the terminal tidy when input ends mid-prompt
            writeln!(self.writer)?;
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Ask until `parse` accepts the answer (interactive) or fail on the first
    /// rejection (batch). Only input errors are retried; anything else returned
    /// by `parse` propagates immediately.
    pub fn ask_validated<T, F>(&mut self, question: &str, parse: F) -> AppResult<T>
    where
        F: Fn(&str) -> AppResult<T>,
    {
        loop {
            let answer = self.ask(question)?.ok_or(AppError::InputClosed)?;
            match parse(answer.trim()) {
                Ok(v) => return Ok(v),
                Err(e @ (AppError::InvalidDateFormat(_) | AppError::InvalidProject(_)))
                    if self.mode == PromptMode::Interactive =>
                {
                    warning(format!("{e}. Please try again."));
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Yes/no confirmation, default no. Batch mode never confirms.
    pub fn confirm(&mut self, question: &str) -> AppResult<bool> {
        if self.mode == PromptMode::Batch {
            return Ok(false);
        }
        let answer = self.ask(question)?.unwrap_or_default();
        let ans = answer.trim().to_ascii_lowercase();
        Ok(ans == "y" || ans == "yes")
    }
}
