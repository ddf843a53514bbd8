//! Data models for changelog documents.
//!
//! - [`CommitRecord`] - A single commit entry (message, author, date,
//!   changed files), all fields optional.
//!
//! Records are deserialized with serde; the recovery pipeline in
//! [`crate::parsers`] owns their construction and the renderer in
//! [`crate::render`] consumes them without mutation.

pub mod commit;

pub use commit::CommitRecord;
