// 📋 Validation Report - structured result of one run
// Formatting to strings and saving are separate from validation itself

use crate::error::{FatalError, ValidationError};
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// Every record was read; `errors` holds violations in encounter order
    Checked {
        records: usize,
        errors: Vec<ValidationError>,
    },

    /// The run was aborted; nothing else is reported
    Fatal { error: FatalError },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    /// File the report is about (None for in-memory input)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    pub outcome: Outcome,

    /// Rendered messages, one per error; always derived from `outcome`
    messages: Vec<String>,
}

impl ValidationReport {
    pub fn checked(records: usize, errors: Vec<ValidationError>) -> Self {
        let messages = errors.iter().map(|e| e.to_string()).collect();
        ValidationReport {
            source: None,
            outcome: Outcome::Checked { records, errors },
            messages,
        }
    }

    pub fn fatal(error: FatalError) -> Self {
        let messages = vec![error.to_string()];
        ValidationReport {
            source: None,
            outcome: Outcome::Fatal { error },
            messages,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// True when nothing was reported
    pub fn is_valid(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self.outcome, Outcome::Fatal { .. })
    }

    /// Ordered report lines (empty = valid)
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn into_messages(self) -> Vec<String> {
        self.messages
    }

    pub fn error_count(&self) -> usize {
        self.messages.len()
    }

    /// Number of non-blank records read (0 for fatal runs)
    pub fn record_count(&self) -> usize {
        match &self.outcome {
            Outcome::Checked { records, .. } => *records,
            Outcome::Fatal { .. } => 0,
        }
    }

    pub fn summary(&self) -> String {
        if self.is_valid() {
            "No errors found.".to_string()
        } else {
            format!("{} errors found!", self.error_count())
        }
    }

    /// Report body as shown to the user
    pub fn to_text(&self) -> String {
        if self.is_valid() {
            "No errors found.".to_string()
        } else {
            self.messages.join("\n")
        }
    }

    /// Write the messages verbatim, one per line.
    ///
    /// Returns `Ok(false)` without touching the filesystem when there is nothing to save.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<bool> {
        if self.is_valid() {
            return Ok(false);
        }

        fs::write(path.as_ref(), self.messages.join("\n"))
            .with_context(|| format!("Failed to write errors to {:?}", path.as_ref()))?;

        Ok(true)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize report")
    }
}
