//! Tolerant recovery pipeline for changelog JSON documents.
//!
//! # Error Handling Strategy
//!
//! Changelog documents in the wild are not guaranteed to be well-formed:
//! generators truncate them mid-write, shell escaping mangles backslashes,
//! editors leave BOMs and stray control bytes behind. This module follows
//! a **graceful degradation** approach:
//!
//! - **Strict first**: a well-formed document is parsed directly and the
//!   more aggressive tiers never run, so clean input pays nothing.
//!
//! - **Sanitize and retry**: character-level and string-aware repairs
//!   (BOM, control characters, bad escapes, unescaped quotes, oversized
//!   arrays) followed by one more strict parse.
//!
//! - **Per-object salvage**: as a last resort, brace-balanced objects are
//!   extracted one at a time; a single broken object costs only itself,
//!   never the rest of the document. Candidate-level failures are
//!   swallowed silently and never surfaced individually.
//!
//! Only a total failure of all three tiers crosses the library boundary,
//! as [`pipeline::ParseError`]. Malformed input is an expected condition,
//! not an exceptional one: nothing in this module panics on bad text.

pub mod pipeline;
pub mod sanitize;
pub mod scan;

pub use pipeline::{ParseError, Recovery, Strategy, parse_commits, recover_commits};
pub use sanitize::sanitize;
pub use scan::scan_records;
