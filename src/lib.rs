//! Changelog Viewer - Render commit history from a JSON document
//!
//! This library loads a `commits.json` document (an array of commit objects
//! with optional `message`, `author`, `date` and `files` fields) and turns
//! it into a changelog listing. Its core is a tolerant recovery pipeline
//! for documents that are not guaranteed to be well-formed:
//!
//! - Strict parsing of the raw document
//! - Sanitation passes (BOM, control characters, bad escapes, unescaped
//!   quotes, oversized arrays) followed by a strict re-parse
//! - A balanced-object scanner that salvages individual records out of a
//!   broken document
//!
//! # Example
//!
//! ```no_run
//! use changelog_viewer::parse_commits;
//!
//! let raw = std::fs::read_to_string("commits.json")?;
//! let commits = parse_commits(&raw)?;
//! println!("Loaded {} commits", commits.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cli;
pub mod models;
pub mod parsers;
pub mod render;
pub mod source;

// Re-export commonly used types
pub use models::CommitRecord;
pub use parsers::{ParseError, Recovery, Strategy, parse_commits, recover_commits};
pub use parsers::{sanitize, scan_records};
pub use render::{RenderOptions, render_changelog};
pub use source::{FetchError, fetch_document};
