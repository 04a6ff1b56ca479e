// 🧾 Check Record - Fixed 6/7 field layout
// type, account, check #, date, amount, payee 1, [payee 2]

use crate::config::ValidatorConfig;
use crate::error::ValidationError;
use crate::reader::SourceLine;
use serde::Serialize;

/// One check as it appears in the file; every field is kept verbatim
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckRecord {
    pub line: u64,
    pub check_type: String,
    pub account: String,
    pub check_number: String,
    pub check_date: String,
    pub amount: String,
    pub payee_line_1: String,

    /// Empty when the record has only 6 fields
    pub payee_line_2: String,
}

impl CheckRecord {
    /// Destructure a CSV record, rejecting field counts the config does not allow
    pub fn from_source(
        source: &SourceLine,
        config: &ValidatorConfig,
    ) -> Result<Self, ValidationError> {
        let count = source.fields.len();
        if !config.accepts_field_count(count) {
            return Err(ValidationError::FieldCount {
                line: source.line,
                expected: config.field_counts_label(),
                count,
            });
        }

        match source.fields.as_slice() {
            [check_type, account, check_number, check_date, amount, payee_line_1, rest @ ..]
                if rest.len() <= 1 =>
            {
                Ok(CheckRecord {
                    line: source.line,
                    check_type: check_type.clone(),
                    account: account.clone(),
                    check_number: check_number.clone(),
                    check_date: check_date.clone(),
                    amount: amount.clone(),
                    payee_line_1: payee_line_1.clone(),
                    payee_line_2: rest.first().cloned().unwrap_or_default(),
                })
            }
            _ => Err(ValidationError::FieldCount {
                line: source.line,
                expected: config.field_counts_label(),
                count,
            }),
        }
    }
}
