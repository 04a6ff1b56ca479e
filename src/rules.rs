// 🏷️ Field Rules - one explicit check per field
// Each rule returns a Result; the validator composes them in report order

use crate::config::ValidatorConfig;
use crate::error::ValidationError;
use chrono::NaiveDate;

// ============================================================================
// CHECK TYPE
// ============================================================================

/// Type code must be `I` or `C`, in either case
pub fn check_type(line: u64, raw: &str) -> Result<(), ValidationError> {
    if raw.eq_ignore_ascii_case("I") || raw.eq_ignore_ascii_case("C") {
        Ok(())
    } else {
        Err(ValidationError::CheckType {
            line,
            value: raw.to_string(),
        })
    }
}

// ============================================================================
// CHECK NUMBER
// ============================================================================

/// Check number must be an integer: optional sign, then digits. Nothing is trimmed.
pub fn check_number(line: u64, raw: &str) -> Result<(), ValidationError> {
    let digits = raw.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(raw);

    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::CheckNumber {
            line,
            value: raw.to_string(),
        })
    }
}

// ============================================================================
// CHECK DATE
// ============================================================================

/// Month alternatives, tried in order: 10-12, 01-09, 1-9
fn month_prefixes(s: &[u8]) -> Vec<usize> {
    let mut out = Vec::new();
    if let [b'1', b'0'..=b'2', ..] = s {
        out.push(2);
    }
    if let [b'0', b'1'..=b'9', ..] = s {
        out.push(2);
    }
    if let [b'1'..=b'9', ..] = s {
        out.push(1);
    }
    out
}

/// Day alternatives, tried in order: 30-31, 10-29, 01-09, 1-9, space + 1-9
fn day_prefixes(s: &[u8]) -> Vec<usize> {
    let mut out = Vec::new();
    if let [b'3', b'0'..=b'1', ..] = s {
        out.push(2);
    }
    if let [b'1'..=b'2', b'0'..=b'9', ..] = s {
        out.push(2);
    }
    if let [b'0', b'1'..=b'9', ..] = s {
        out.push(2);
    }
    if let [b'1'..=b'9', ..] = s {
        out.push(1);
    }
    if let [b' ', b'1'..=b'9', ..] = s {
        out.push(2);
    }
    out
}

fn number(bytes: &[u8]) -> u32 {
    bytes
        .iter()
        .filter(|b| b.is_ascii_digit())
        .fold(0, |acc, b| acc * 10 + u32::from(b - b'0'))
}

/// Parse `mmddyy` the way `strptime("%m%d%y")` does.
///
/// Month and day take one or two digits (Excel drops leading zeros), the
/// year exactly two. The first month/day split followed by two year digits
/// wins; anything left after the year is an error, as is an impossible date.
pub fn parse_date(
    line: u64,
    raw: &str,
    config: &ValidatorConfig,
) -> Result<NaiveDate, ValidationError> {
    let invalid = || ValidationError::DateFormat {
        line,
        value: raw.to_string(),
    };

    let bytes = raw.as_bytes();
    let split = month_prefixes(bytes).into_iter().find_map(|m| {
        day_prefixes(&bytes[m..]).into_iter().find_map(|d| {
            match bytes.get(m + d..m + d + 2) {
                Some([y1, y2]) if y1.is_ascii_digit() && y2.is_ascii_digit() => Some((m, d)),
                _ => None,
            }
        })
    });

    let (m, d) = split.ok_or_else(invalid)?;
    if bytes.len() != m + d + 2 {
        return Err(invalid());
    }

    let month = number(&bytes[..m]);
    let day = number(&bytes[m..m + d]);
    let yy = number(&bytes[m + d..]);

    NaiveDate::from_ymd_opt(config.expand_year(yy), month, day).ok_or_else(invalid)
}

/// Parsed date must lie within ±window days of the reference date (inclusive)
pub fn check_date_window(
    line: u64,
    raw: &str,
    date: NaiveDate,
    config: &ValidatorConfig,
) -> Result<(), ValidationError> {
    let delta = (date - config.reference_date).num_days().abs();

    if delta <= config.date_window_days {
        Ok(())
    } else {
        Err(ValidationError::DateWindow {
            line,
            value: raw.to_string(),
            parsed: date,
            reference: config.reference_date,
            window_days: config.date_window_days,
        })
    }
}

// ============================================================================
// AMOUNT
// ============================================================================

fn is_quote(c: char) -> bool {
    c == '"' || c == '\''
}

/// Undo spreadsheet formatting: surrounding whitespace, one layer of quotes, thousands separators
pub fn clean_amount(raw: &str) -> String {
    let trimmed = raw.trim();
    let unquoted = trimmed.strip_prefix(is_quote).unwrap_or(trimmed);
    let unquoted = unquoted.strip_suffix(is_quote).unwrap_or(unquoted);

    unquoted.replace(',', "").trim().to_string()
}

pub fn parse_amount(line: u64, raw: &str) -> Result<f64, ValidationError> {
    clean_amount(raw)
        .parse::<f64>()
        .map_err(|_| ValidationError::AmountFormat {
            line,
            value: raw.to_string(),
        })
}

pub fn check_amount_positive(line: u64, raw: &str, amount: f64) -> Result<(), ValidationError> {
    // NaN compares false here and passes, as a float comparison would
    if amount <= 0.0 {
        Err(ValidationError::AmountNotPositive {
            line,
            value: raw.to_string(),
        })
    } else {
        Ok(())
    }
}

// ============================================================================
// PAYEE
// ============================================================================

/// Payee lines are limited by raw length; an empty line always passes
pub fn check_payee(
    line: u64,
    payee: u8,
    raw: &str,
    config: &ValidatorConfig,
) -> Result<(), ValidationError> {
    let length = raw.chars().count();

    if length > config.max_payee_length {
        Err(ValidationError::PayeeTooLong {
            line,
            payee,
            max: config.max_payee_length,
            length,
        })
    } else {
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
