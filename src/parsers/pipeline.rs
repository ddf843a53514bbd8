//! Ordered fallback chain over the recovery tiers.
//!
//! Strict parse of the raw text, then strict parse of the sanitized text,
//! then the object scanner. First success wins and tiers never merge their
//! results, so the provenance of the returned records is always a single
//! [`Strategy`]. Malformed input is an expected condition here: it comes
//! back as `Err(ParseError::Malformed)`, never as a panic.

use thiserror::Error;

use super::sanitize::sanitize;
use super::scan::scan_records;
use crate::models::CommitRecord;

/// Which recovery tier produced the records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// The raw document was a well-formed JSON array.
    Strict,
    /// The document parsed after the sanitation passes.
    Sanitized,
    /// Records were salvaged one object at a time by the scanner.
    Scan,
}

impl Strategy {
    pub fn describe(self) -> &'static str {
        match self {
            Strategy::Strict => "strict parse",
            Strategy::Sanitized => "sanitized parse",
            Strategy::Scan => "object scan",
        }
    }
}

/// Successful pipeline outcome: the records in document order, plus which
/// tier produced them. A well-formed empty array is a valid outcome with
/// zero records, not an error.
#[derive(Debug, Clone, PartialEq)]
pub struct Recovery {
    pub records: Vec<CommitRecord>,
    pub strategy: Strategy,
}

/// Terminal pipeline failure. Fetch failures live in
/// [`crate::source::FetchError`]; this type only covers documents that
/// survived fetching but defeated every recovery tier.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error(
        "document unparseable after all recovery attempts \
         ({document_len} bytes; last strict-parse error at line {line}, column {column})"
    )]
    Malformed { document_len: usize, line: usize, column: usize },
}

/// Run the fallback chain over a raw document.
pub fn recover_commits(raw: &str) -> Result<Recovery, ParseError> {
    let mut last_error = match strict_parse(raw) {
        Ok(records) => return Ok(Recovery { records, strategy: Strategy::Strict }),
        Err(e) => e,
    };

    match strict_parse(&sanitize(raw)) {
        Ok(records) => return Ok(Recovery { records, strategy: Strategy::Sanitized }),
        Err(e) => last_error = e,
    }

    let records = scan_records(raw);
    if !records.is_empty() {
        return Ok(Recovery { records, strategy: Strategy::Scan });
    }

    Err(ParseError::Malformed {
        document_len: raw.len(),
        line: last_error.line(),
        column: last_error.column(),
    })
}

/// Convenience wrapper when the caller does not care about provenance.
pub fn parse_commits(raw: &str) -> Result<Vec<CommitRecord>, ParseError> {
    recover_commits(raw).map(|recovery| recovery.records)
}

/// Standard JSON grammar, no tolerance: the document must be an array of
/// objects for this tier to succeed.
fn strict_parse(text: &str) -> Result<Vec<CommitRecord>, serde_json::Error> {
    serde_json::from_str(text)
}
