// ✅ Check Validator - rule engine over a whole file
// Reads, splits, checks every record, accumulates errors in encounter order

use crate::config::ValidatorConfig;
use crate::error::{FatalError, ValidationError};
use crate::reader::{read_records, SourceLine};
use crate::record::CheckRecord;
use crate::registry::CheckNumberRegistry;
use crate::report::ValidationReport;
use crate::rules;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

pub struct CheckValidator {
    config: ValidatorConfig,
}

impl CheckValidator {
    /// Validator with the fixed default constants
    pub fn new() -> Self {
        CheckValidator {
            config: ValidatorConfig::default(),
        }
    }

    pub fn with_config(config: ValidatorConfig) -> Self {
        CheckValidator { config }
    }

    /// Validate a file on disk. Open/read failures become a fatal "Unexpected error".
    pub fn validate_path<P: AsRef<Path>>(&self, path: P) -> ValidationReport {
        let path = path.as_ref();
        info!(path = %path.display(), "validating check file");

        let report = match fs::read(path) {
            Ok(content) => self.validate_bytes(&content),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to read check file");
                ValidationReport::fatal(FatalError::from(err))
            }
        };

        report.with_source(path.display().to_string())
    }

    /// Validate file content already in memory
    pub fn validate_bytes(&self, content: &[u8]) -> ValidationReport {
        let lines = match read_records(content) {
            Ok(lines) => lines,
            Err(fatal) => {
                warn!(error = %fatal, "validation aborted");
                return ValidationReport::fatal(fatal);
            }
        };

        let mut registry = CheckNumberRegistry::new();
        let mut errors = Vec::new();
        let mut records = 0usize;

        for source in lines.iter().filter(|l| !l.is_blank()) {
            records += 1;
            errors.extend(self.check_line(source, &mut registry));
        }

        if records == 0 {
            errors.push(ValidationError::EmptyFile);
        }

        info!(
            records,
            errors = errors.len(),
            distinct_check_numbers = registry.distinct_count(),
            "validation finished"
        );

        ValidationReport::checked(records, errors)
    }

    /// All violations for one CSV record, in report order
    pub fn check_line(
        &self,
        source: &SourceLine,
        registry: &mut CheckNumberRegistry,
    ) -> Vec<ValidationError> {
        match CheckRecord::from_source(source, &self.config) {
            Ok(record) => self.check_record(&record, registry),
            Err(err) => {
                debug!(line = source.line, fields = source.fields.len(), "wrong field count");
                vec![err]
            }
        }
    }

    /// type → check # → duplicate → date → window → amount → payee 1 → payee 2
    pub fn check_record(
        &self,
        record: &CheckRecord,
        registry: &mut CheckNumberRegistry,
    ) -> Vec<ValidationError> {
        let line = record.line;
        let config = &self.config;
        let mut errors = Vec::new();

        if let Err(err) = rules::check_type(line, &record.check_type) {
            errors.push(err);
        }

        match rules::check_number(line, &record.check_number) {
            Ok(()) => {
                if let Some(first_line) = registry.register(&record.check_number, line) {
                    errors.push(ValidationError::DuplicateCheckNumber {
                        line,
                        first_line,
                        value: record.check_number.clone(),
                    });
                }
            }
            Err(err) => errors.push(err),
        }

        match rules::parse_date(line, &record.check_date, config) {
            Ok(date) => {
                if let Err(err) = rules::check_date_window(line, &record.check_date, date, config) {
                    errors.push(err);
                }
            }
            Err(err) => errors.push(err),
        }

        match rules::parse_amount(line, &record.amount) {
            Ok(amount) => {
                if let Err(err) = rules::check_amount_positive(line, &record.amount, amount) {
                    errors.push(err);
                }
            }
            Err(err) => errors.push(err),
        }

        if let Err(err) = rules::check_payee(line, 1, &record.payee_line_1, config) {
            errors.push(err);
        }
        if let Err(err) = rules::check_payee(line, 2, &record.payee_line_2, config) {
            errors.push(err);
        }

        if !errors.is_empty() {
            debug!(line, count = errors.len(), "record has violations");
        }

        errors
    }
}

impl Default for CheckValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate a file with the default rules and return the report lines (empty = valid)
pub fn validate_file<P: AsRef<Path>>(path: P) -> Vec<String> {
    CheckValidator::new().validate_path(path).into_messages()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn messages(content: &str) -> Vec<String> {
        CheckValidator::new()
            .validate_bytes(content.as_bytes())
            .into_messages()
    }

    #[test]
    fn test_valid_file() {
        let content = "I,1001,500,091425,100.00,Acme Corp\n\
                       C,1001,501,100125,\"1,250.00\",Acme Corp,Attn: Payables\n\
                       i,2002,502,081025,0.01,Bob\n";

        assert!(messages(content).is_empty());
    }

    #[test]
    fn test_single_valid_line_without_trailing_newline() {
        assert!(messages("I,1001,500,091425,100.00,Acme Corp").is_empty());
    }

    #[test]
    fn test_every_field_wrong() {
        let errors = messages("X,1001,abc,131325,-5,P\n");

        assert_eq!(
            errors,
            vec![
                "Line 1: Invalid check type 'X' (must be 'I' or 'C').",
                "Line 1: Check # 'abc' must be an integer.",
                "Line 1: Invalid date format '131325' (expected mmddyy).",
                "Line 1: Amount '-5' must be positive.",
            ]
        );
    }

    #[test]
    fn test_invalid_check_number_keeps_other_checks() {
        let long = "P".repeat(41);
        let content = format!("I,1,12a,091425,abc,{}\n", long);
        let errors = messages(&content);

        assert_eq!(
            errors,
            vec![
                "Line 1: Check # '12a' must be an integer.".to_string(),
                "Line 1: Invalid amount 'abc' (must be a number with optional decimal).".to_string(),
                "Line 1: Payee line 1 exceeds 40 characters (length 41).".to_string(),
            ]
        );
    }

    #[test]
    fn test_field_count_skips_field_checks() {
        let content = "X,1,abc\nI,1001,500,091425,100.00,Acme,Line 2,extra\n";
        let errors = messages(content);

        assert_eq!(
            errors,
            vec![
                "Line 1: Incorrect number of fields (expected 6 or 7, got 3).",
                "Line 2: Incorrect number of fields (expected 6 or 7, got 8).",
            ]
        );
    }

    #[test]
    fn test_duplicates_cite_first_line() {
        let content = "I,1,500,091425,1.00,A\n\
                       I,1,501,091425,1.00,B\n\
                       I,1,500,091425,1.00,C\n\
                       \n\
                       I,1,500,091425,1.00,D\n";
        let errors = messages(content);

        assert_eq!(
            errors,
            vec![
                "Duplicate check # '500' found on lines 1 and 3.",
                "Duplicate check # '500' found on lines 1 and 5.",
            ]
        );
    }

    #[test]
    fn test_duplicate_compares_raw_strings() {
        let content = "I,1,500,091425,1.00,A\nI,1,0500,091425,1.00,B\n";
        assert!(messages(content).is_empty());
    }

    #[test]
    fn test_invalid_check_number_not_registered() {
        let content = "I,1,5 0,091425,1.00,A\nI,1,5 0,091425,1.00,B\n";
        let errors = messages(content);

        assert_eq!(
            errors,
            vec![
                "Line 1: Check # '5 0' must be an integer.",
                "Line 2: Check # '5 0' must be an integer.",
            ]
        );
    }

    #[test]
    fn test_error_order_within_line() {
        let content = format!(
            "I,1,7,091425,1.00,A\nz,1,7,010125,0,{},{}\n",
            "a".repeat(41),
            "b".repeat(42)
        );
        let errors = messages(&content);

        assert_eq!(
            errors,
            vec![
                "Line 2: Invalid check type 'z' (must be 'I' or 'C').".to_string(),
                "Duplicate check # '7' found on lines 1 and 2.".to_string(),
                "Line 2: Date '010125' is not within ±60 days of 2025-09-14 (parsed as 2025-01-01)."
                    .to_string(),
                "Line 2: Amount '0' must be positive.".to_string(),
                "Line 2: Payee line 1 exceeds 40 characters (length 41).".to_string(),
                "Line 2: Payee line 2 exceeds 40 characters (length 42).".to_string(),
            ]
        );
    }

    #[test]
    fn test_dates_without_leading_zeros() {
        let content = "I,1001,500,91425,100.00,Acme Corp\n\
                       I,1001,501,11525,1,B\n\
                       I,1001,502,1525,1,C\n";
        let errors = messages(content);

        assert_eq!(
            errors,
            vec!["Line 3: Date '1525' is not within ±60 days of 2025-09-14 (parsed as 2025-01-05)."]
        );
    }

    #[test]
    fn test_amount_boundaries() {
        let errors = messages("I,1,1,091425,0.00,A\nI,1,2,091425,0.01,A\n");
        assert_eq!(errors, vec!["Line 1: Amount '0.00' must be positive."]);
    }

    #[test]
    fn test_payee_boundaries() {
        let content = format!(
            "I,1,1,091425,1.00,{}\nI,1,2,091425,1.00,{}\n",
            "x".repeat(40),
            "x".repeat(41)
        );
        let errors = messages(&content);

        assert_eq!(errors, vec!["Line 2: Payee line 1 exceeds 40 characters (length 41)."]);
    }

    #[test]
    fn test_multiline_field_line_numbers() {
        let content = "I,1,1,091425,1.00,\"Acme\nCorp\"\nX,1,2,091425,1.00,B\n";
        let errors = messages(content);

        assert_eq!(errors, vec!["Line 3: Invalid check type 'X' (must be 'I' or 'C')."]);
    }

    #[test]
    fn test_empty_file() {
        assert_eq!(messages(""), vec!["File is empty—no checks found."]);
        assert_eq!(messages("\n\n\r\n"), vec!["File is empty—no checks found."]);
    }

    #[test]
    fn test_non_ascii_is_single_fatal_error() {
        let content = "X,1,abc,131325,-5,P\nI,1001,500,091425,100.00,Caf\u{e9}\n";
        let report = CheckValidator::new().validate_bytes(content.as_bytes());

        assert!(report.is_fatal());
        assert_eq!(
            report.into_messages(),
            vec!["File contains non-ASCII characters or invalid encoding (expected plain ASCII)."]
        );
    }

    #[test]
    fn test_unterminated_quote_is_csv_error() {
        let errors = messages("I,1,1,091425,1.00,\"Acme\n");
        assert_eq!(errors, vec!["CSV parsing error: unexpected end of data"]);
    }

    #[test]
    fn test_custom_config() {
        let config = ValidatorConfig {
            date_window_days: 5,
            max_payee_length: 3,
            ..ValidatorConfig::default()
        };
        let validator = CheckValidator::with_config(config);
        let errors = validator
            .validate_bytes(b"I,1,1,092125,1.00,ABCD\n")
            .into_messages();

        assert_eq!(
            errors,
            vec![
                "Line 1: Date '092125' is not within ±5 days of 2025-09-14 (parsed as 2025-09-21).",
                "Line 1: Payee line 1 exceeds 3 characters (length 4).",
            ]
        );
    }

    #[test]
    fn test_validate_path_idempotent() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "I,1001,500,091425,100.00,Acme Corp\nQ,1001,500,091425,100.00,Acme Corp\n"
        )
        .unwrap();

        let first = validate_file(file.path());
        let second = validate_file(file.path());

        assert_eq!(first, second);
        assert_eq!(
            first,
            vec![
                "Line 2: Invalid check type 'Q' (must be 'I' or 'C').",
                "Duplicate check # '500' found on lines 1 and 2.",
            ]
        );
    }

    #[test]
    fn test_validate_path_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let report = CheckValidator::new().validate_path(dir.path().join("missing.csv"));

        assert!(report.is_fatal());
        assert_eq!(report.error_count(), 1);
        assert!(report.messages()[0].starts_with("Unexpected error: "));
        assert!(report.source.as_deref().unwrap().ends_with("missing.csv"));
    }
}
