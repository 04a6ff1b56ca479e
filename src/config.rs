// ⚙️ Validator Configuration - Constants as Data
// Reference date, date window, payee limit and field counts used by the rule engine

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

// ============================================================================
// DEFAULTS
// ============================================================================

/// Reference date checks are compared against
pub const REFERENCE_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2025, 9, 14) {
    Some(date) => date,
    None => panic!("invalid reference date"),
};

/// Maximum distance in days between a check date and the reference date
pub const DATE_WINDOW_DAYS: i64 = 60;

/// Maximum length of either payee line
pub const MAX_PAYEE_LENGTH: usize = 40;

/// Legal field counts per record (6 without payee line 2, 7 with it)
pub const FIELD_COUNTS: [usize; 2] = [6, 7];

/// Two-digit years below the pivot land in the 2000s, the rest in the 1900s
pub const CENTURY_PIVOT: u32 = 69;

// ============================================================================
// CONFIG
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Date the ±window is measured from
    pub reference_date: NaiveDate,

    /// Allowed distance (days) from the reference date, inclusive
    pub date_window_days: i64,

    /// Maximum length of payee line 1 and payee line 2
    pub max_payee_length: usize,

    /// Field counts a record may have
    pub field_counts: Vec<usize>,

    /// yy < pivot → 20yy, otherwise 19yy
    pub century_pivot: u32,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        ValidatorConfig {
            reference_date: REFERENCE_DATE,
            date_window_days: DATE_WINDOW_DAYS,
            max_payee_length: MAX_PAYEE_LENGTH,
            field_counts: FIELD_COUNTS.to_vec(),
            century_pivot: CENTURY_PIVOT,
        }
    }
}

impl ValidatorConfig {
    /// Load configuration from a JSON file; missing keys keep their defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        let config: ValidatorConfig =
            serde_json::from_str(&content).context("Failed to parse config JSON")?;

        config.validate()?;
        Ok(config)
    }

    /// Reject settings the record layout cannot honour
    pub fn validate(&self) -> Result<()> {
        if self.field_counts.is_empty() {
            bail!("field_counts must not be empty");
        }

        // Records are destructured into 6 mandatory fields plus an optional 7th
        if let Some(bad) = self.field_counts.iter().find(|c| !(6..=7).contains(*c)) {
            bail!("field_counts may only contain 6 or 7, got {}", bad);
        }

        if self.date_window_days < 0 {
            bail!("date_window_days must not be negative, got {}", self.date_window_days);
        }

        if self.century_pivot > 100 {
            bail!("century_pivot must be between 0 and 100, got {}", self.century_pivot);
        }

        Ok(())
    }

    /// Whether a record with `count` fields is accepted
    pub fn accepts_field_count(&self, count: usize) -> bool {
        self.field_counts.contains(&count)
    }

    /// "6 or 7" style description used in the field-count message
    pub fn field_counts_label(&self) -> String {
        match self.field_counts.as_slice() {
            [] => String::new(),
            [only] => only.to_string(),
            [init @ .., last] => {
                let head: Vec<String> = init.iter().map(|c| c.to_string()).collect();
                format!("{} or {}", head.join(", "), last)
            }
        }
    }

    /// Expand a two-digit year using the configured pivot
    pub fn expand_year(&self, yy: u32) -> i32 {
        if yy < self.century_pivot {
            2000 + yy as i32
        } else {
            1900 + yy as i32
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_constants() {
        let config = ValidatorConfig::default();

        assert_eq!(REFERENCE_DATE, NaiveDate::from_ymd_opt(2025, 9, 14).unwrap());
        assert_eq!(config.reference_date, REFERENCE_DATE);
        assert_eq!(config.date_window_days, 60);
        assert_eq!(config.max_payee_length, 40);
        assert_eq!(config.field_counts, vec![6, 7]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_field_counts_label() {
        let mut config = ValidatorConfig::default();
        assert_eq!(config.field_counts_label(), "6 or 7");

        config.field_counts = vec![7];
        assert_eq!(config.field_counts_label(), "7");
        assert!(config.accepts_field_count(7));
        assert!(!config.accepts_field_count(6));
    }

    #[test]
    fn test_expand_year_pivot() {
        let config = ValidatorConfig::default();

        assert_eq!(config.expand_year(0), 2000);
        assert_eq!(config.expand_year(25), 2025);
        assert_eq!(config.expand_year(68), 2068);
        assert_eq!(config.expand_year(69), 1969);
        assert_eq!(config.expand_year(99), 1999);
    }

    #[test]
    fn test_from_file_partial_override() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"date_window_days": 30, "reference_date": "2025-01-01"}}"#).unwrap();

        let config = ValidatorConfig::from_file(file.path()).unwrap();

        assert_eq!(config.date_window_days, 30);
        assert_eq!(config.reference_date, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(config.max_payee_length, 40);
    }

    #[test]
    fn test_from_file_rejects_bad_field_counts() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"field_counts": [5, 6]}}"#).unwrap();

        let err = ValidatorConfig::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("field_counts"));
    }

    #[test]
    fn test_from_file_missing() {
        let result = ValidatorConfig::from_file("/nonexistent/validator.json");
        assert!(result.is_err());
    }
}
