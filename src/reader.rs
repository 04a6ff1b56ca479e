// 📂 CSV Reader - ASCII guard + record splitting with physical line numbers
// Turns raw file bytes into (line number, fields) pairs for the rule engine

use crate::error::FatalError;
use csv::ReaderBuilder;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Largest field (in characters, quotes excluded) the reader accepts
pub const FIELD_SIZE_LIMIT: usize = 131_072;

// ============================================================================
// SOURCE LINE
// ============================================================================

/// One CSV record as read from the file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// 1-based physical line on which the record ends
    pub line: u64,

    /// Raw field values, untrimmed
    pub fields: Vec<String>,
}

impl SourceLine {
    pub fn is_blank(&self) -> bool {
        self.fields.is_empty()
    }
}

// ============================================================================
// READING
// ============================================================================

/// Split file content into records.
///
/// Fails with a single [`FatalError`] when the content is not plain ASCII or
/// breaks the CSV grammar; no records are returned in that case.
pub fn read_records(content: &[u8]) -> Result<Vec<SourceLine>, FatalError> {
    if !content.is_ascii() {
        return Err(FatalError::NonAscii);
    }

    check_grammar(content)?;

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content);

    // (start byte, fields) for every non-blank record
    let mut raw = Vec::new();
    for result in reader.records() {
        let record = result?;
        let start = record
            .position()
            .map(|p| p.byte() as usize)
            .ok_or_else(|| FatalError::Unexpected("CSV record has no position".to_string()))?;
        let fields = record.iter().map(|f| f.to_string()).collect::<Vec<_>>();
        raw.push((start, fields));
    }

    let mut lines = Vec::with_capacity(raw.len());
    for (i, (start, fields)) in raw.iter().enumerate() {
        let end = raw.get(i + 1).map(|(next, _)| *next).unwrap_or(content.len());
        let line = record_end_line(content, *start, end);
        lines.push(SourceLine {
            line,
            fields: fields.clone(),
        });
    }

    Ok(lines)
}

/// Line on which the record spanning `content[start..end]` ends.
///
/// The reader's record position can sit before blank lines or a leftover
/// terminator byte, so the span is trimmed of line breaks on both sides first.
fn record_end_line(content: &[u8], start: usize, end: usize) -> u64 {
    let end = end.min(content.len());
    let start = start.min(end);
    let span = &content[start..end];

    let lead = span.iter().take_while(|b| is_line_break(**b)).count();
    let trail = span[lead..].iter().rev().take_while(|b| is_line_break(**b)).count();
    let body = &span[lead..span.len() - trail];

    let first_line = 1 + count_line_breaks(&content[..start + lead]);
    first_line + count_line_breaks(body)
}

fn is_line_break(b: u8) -> bool {
    b == b'\r' || b == b'\n'
}

/// Count line breaks the way a text reader does: `\r\n`, `\r` and `\n` each end one line
pub fn count_line_breaks(bytes: &[u8]) -> u64 {
    let mut count = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\r' => {
                count += 1;
                if bytes.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
            }
            b'\n' => count += 1,
            _ => {}
        }
        i += 1;
    }
    count
}

// ============================================================================
// GRAMMAR CHECK
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    StartField,
    Unquoted,
    Quoted,
    QuoteInQuoted,
}

/// Reject what the lenient record reader would silently accept:
/// a quoted field left open at end of input, or an oversized field.
fn check_grammar(content: &[u8]) -> Result<(), FatalError> {
    let mut state = ScanState::StartField;
    let mut field_len = 0usize;

    for &b in content {
        let (next, grows) = match (state, b) {
            (ScanState::StartField, b'"') => (ScanState::Quoted, false),
            (ScanState::StartField, b',') => (ScanState::StartField, false),
            (ScanState::StartField, b'\r' | b'\n') => (ScanState::StartField, false),
            (ScanState::StartField, _) => (ScanState::Unquoted, true),

            (ScanState::Unquoted, b',' | b'\r' | b'\n') => (ScanState::StartField, false),
            (ScanState::Unquoted, _) => (ScanState::Unquoted, true),

            (ScanState::Quoted, b'"') => (ScanState::QuoteInQuoted, false),
            (ScanState::Quoted, _) => (ScanState::Quoted, true),

            // "" inside quotes is a literal quote
            (ScanState::QuoteInQuoted, b'"') => (ScanState::Quoted, true),
            (ScanState::QuoteInQuoted, b',' | b'\r' | b'\n') => (ScanState::StartField, false),
            (ScanState::QuoteInQuoted, _) => (ScanState::Unquoted, true),
        };

        field_len = match (next, grows) {
            (ScanState::StartField, _) => 0,
            (_, true) => field_len + 1,
            (_, false) => field_len,
        };

        if field_len > FIELD_SIZE_LIMIT {
            return Err(FatalError::Csv(format!(
                "field larger than field limit ({})",
                FIELD_SIZE_LIMIT
            )));
        }

        state = next;
    }

    if state == ScanState::Quoted {
        return Err(FatalError::Csv("unexpected end of data".to_string()));
    }

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
