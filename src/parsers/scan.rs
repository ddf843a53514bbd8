//! Balanced-object recovery scanner.
//!
//! Last-resort tier: walk the document left to right, pull out every
//! brace-balanced top-level object literal, and keep the ones that parse on
//! their own and look like commit records. Surrounding garbage, a truncated
//! tail, or one broken object in the middle cost only the affected spans.

use serde_json::{Map, Value};

use crate::models::CommitRecord;

/// Keys that make a recovered candidate plausibly a commit record.
/// Strict-parse tiers trust the whole document; individually recovered
/// objects are untrusted and must show at least one of these.
const COMMIT_KEYS: [&str; 3] = ["commit", "message", "author"];

/// Extract every recoverable commit record from `raw`, in document order.
/// Never fails; returns an empty vec when nothing is recoverable.
pub fn scan_records(raw: &str) -> Vec<CommitRecord> {
    let mut records = Vec::new();
    collect_candidates(raw, &mut records);
    records
}

/// Single pass with brace depth, in-string and one-shot escape state. A
/// candidate buffer opens on the 0 -> 1 depth transition and becomes a
/// candidate when the matching `}` brings the depth back to 0. A `}` seen
/// at depth 0 is garbage and ignored; an object still open at end of input
/// is a truncated tail and dropped.
///
/// A raw newline inside a string means the string was never terminated: no
/// legal JSON string contains one, so the current candidate can never
/// parse. The candidate is abandoned on the spot and the scan resumes
/// fresh after the newline. Without this the dangling quote flips the
/// in-string phase for the rest of the document and every later object is
/// swallowed as string content.
fn collect_candidates(text: &str, records: &mut Vec<CommitRecord>) {
    let mut inside_string = false;
    let mut escape_next = false;
    let mut brace_depth = 0usize;
    let mut start = 0usize;

    for (i, c) in text.char_indices() {
        if inside_string {
            if c == '\n' || c == '\r' {
                inside_string = false;
                escape_next = false;
                brace_depth = 0;
            } else if escape_next {
                escape_next = false;
            } else if c == '\\' {
                escape_next = true;
            } else if c == '"' {
                inside_string = false;
            }
            continue;
        }
        match c {
            '"' => inside_string = true,
            '{' => {
                if brace_depth == 0 {
                    start = i;
                }
                brace_depth += 1;
            }
            '}' => {
                if brace_depth > 0 {
                    brace_depth -= 1;
                    if brace_depth == 0 {
                        admit_candidate(&text[start..=i], records);
                    }
                }
            }
            _ => {}
        }
    }
}

/// Strict-parse one candidate in isolation. Parse failures are swallowed:
/// a single bad candidate must not lose the rest of the document. A
/// candidate that parses but carries none of the expected keys is usually
/// noise, except when it is a wrapper object holding the records one level
/// down, so its body gets one rescan before being dropped.
fn admit_candidate(candidate: &str, records: &mut Vec<CommitRecord>) {
    let Ok(value) = serde_json::from_str::<Value>(candidate) else {
        return;
    };
    let Value::Object(object) = value else {
        return;
    };
    if looks_like_commit(&object) {
        if let Ok(record) = serde_json::from_value::<CommitRecord>(Value::Object(object)) {
            records.push(record);
        }
    } else {
        collect_candidates(&candidate[1..candidate.len() - 1], records);
    }
}

fn looks_like_commit(object: &Map<String, Value>) -> bool {
    COMMIT_KEYS.iter().any(|key| object.contains_key(*key))
}
