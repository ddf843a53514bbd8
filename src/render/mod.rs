//! Plain-text changelog rendering.
//!
//! The consuming side of the pipeline: records arrive in document order
//! (oldest first, the order the generator appends them) and are shown
//! newest first. Absent fields are defaulted to readable placeholders
//! here and only here; the pipeline never invents values.

use crate::models::CommitRecord;

#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Expand the changed-file list under each commit.
    pub show_files: bool,
}

/// Format records into the changelog listing.
pub fn render_changelog(records: &[CommitRecord], options: &RenderOptions) -> String {
    if records.is_empty() {
        return "No commits available\n".to_string();
    }

    let mut out = String::new();
    for record in records.iter().rev() {
        let message = record.message.as_deref().unwrap_or("no message");
        let author = record.author.as_deref().unwrap_or("unknown author");
        let date = record.date.as_deref().unwrap_or("no date");
        out.push_str(&format!("* {message} - {author} ({date})\n"));

        if options.show_files {
            match record.files.as_deref() {
                Some(files) if !files.is_empty() => {
                    for file in files {
                        out.push_str(&format!("    {file}\n"));
                    }
                }
                _ => out.push_str("    (no changed files)\n"),
            }
        }
    }
    out
}
