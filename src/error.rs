// 🚨 Validation Errors - Two tiers
// Record-level rule violations accumulate; fatal failures end the run with one message

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// RECORD-LEVEL VIOLATIONS
// ============================================================================

/// One rule violation, tagged by rule. `Display` renders the exact report line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum ValidationError {
    #[error("Line {line}: Incorrect number of fields (expected {expected}, got {count}).")]
    FieldCount {
        line: u64,
        expected: String,
        count: usize,
    },

    #[error("Line {line}: Invalid check type '{value}' (must be 'I' or 'C').")]
    CheckType { line: u64, value: String },

    #[error("Line {line}: Check # '{value}' must be an integer.")]
    CheckNumber { line: u64, value: String },

    #[error("Duplicate check # '{value}' found on lines {first_line} and {line}.")]
    DuplicateCheckNumber {
        line: u64,
        first_line: u64,
        value: String,
    },

    #[error("Line {line}: Invalid date format '{value}' (expected mmddyy).")]
    DateFormat { line: u64, value: String },

    // NaiveDate displays as YYYY-MM-DD
    #[error("Line {line}: Date '{value}' is not within ±{window_days} days of {reference} (parsed as {parsed}).")]
    DateWindow {
        line: u64,
        value: String,
        parsed: NaiveDate,
        reference: NaiveDate,
        window_days: i64,
    },

    #[error("Line {line}: Invalid amount '{value}' (must be a number with optional decimal).")]
    AmountFormat { line: u64, value: String },

    #[error("Line {line}: Amount '{value}' must be positive.")]
    AmountNotPositive { line: u64, value: String },

    #[error("Line {line}: Payee line {payee} exceeds {max} characters (length {length}).")]
    PayeeTooLong {
        line: u64,
        payee: u8,
        max: usize,
        length: usize,
    },

    #[error("File is empty—no checks found.")]
    EmptyFile,
}

// ============================================================================
// FATAL FAILURES
// ============================================================================

/// Failure that aborts the whole run; no per-line results are reported with it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum FatalError {
    #[error("File contains non-ASCII characters or invalid encoding (expected plain ASCII).")]
    NonAscii,

    #[error("CSV parsing error: {0}")]
    Csv(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl From<csv::Error> for FatalError {
    fn from(err: csv::Error) -> Self {
        match err.kind() {
            csv::ErrorKind::Io(io) => FatalError::Unexpected(io.to_string()),
            _ => FatalError::Csv(err.to_string()),
        }
    }
}

impl From<std::io::Error> for FatalError {
    fn from(err: std::io::Error) -> Self {
        FatalError::Unexpected(err.to_string())
    }
}

// ============================================================================
// TESTS
// ============================================================================
