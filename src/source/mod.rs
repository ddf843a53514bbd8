//! Fetch boundary for changelog documents.
//!
//! The pipeline is a pure function over text; everything I/O-shaped lives
//! here. A fetch either yields the raw document byte-for-byte (including a
//! BOM if one is present, which the sanitizer handles later) or fails with
//! a [`FetchError`]. Fetch failures are surfaced immediately and are a
//! different animal from parse failures: a missing or unreadable file is
//! not a malformed document.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Size cap checked against file metadata before reading, so a runaway
/// document cannot exhaust memory.
pub const MAX_DOCUMENT_BYTES: u64 = 50 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to read changelog document {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("changelog document too large: {path} ({size} bytes, max {} bytes)", MAX_DOCUMENT_BYTES)]
    TooLarge { path: PathBuf, size: u64 },
    #[error("changelog document is not valid UTF-8: {path}")]
    NotUtf8 { path: PathBuf },
}

/// Read a changelog document from disk.
pub fn fetch_document(path: &Path) -> Result<String, FetchError> {
    let io_err = |source| FetchError::Io { path: path.to_path_buf(), source };

    let mut file = File::open(path).map_err(io_err)?;
    let metadata = file.metadata().map_err(io_err)?;
    if metadata.len() > MAX_DOCUMENT_BYTES {
        return Err(FetchError::TooLarge { path: path.to_path_buf(), size: metadata.len() });
    }

    let mut bytes = Vec::with_capacity(metadata.len() as usize);
    file.read_to_end(&mut bytes).map_err(io_err)?;
    String::from_utf8(bytes).map_err(|_| FetchError::NotUtf8 { path: path.to_path_buf() })
}
