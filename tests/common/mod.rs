//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

/// Builder for test directories holding a `commits.json` document
pub struct ChangelogDirBuilder {
    temp_dir: TempDir,
}

impl ChangelogDirBuilder {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    /// Write a commits.json document with the given raw content
    pub fn with_document(self, content: &str) -> Self {
        fs::write(self.document_path(), content).expect("Failed to write commits.json");
        self
    }

    /// Write a commits.json document built from [`CommitBuilder`] entries
    pub fn with_commits(self, commits: &[CommitBuilder]) -> Self {
        let body = commits.iter().map(CommitBuilder::to_json).collect::<Vec<_>>().join(",");
        self.with_document(&format!("[{body}]"))
    }

    /// Path to the commits.json document
    pub fn document_path(&self) -> PathBuf {
        self.temp_dir.path().join("commits.json")
    }

    /// Build and return the temp directory (consumes self)
    pub fn build(self) -> (TempDir, PathBuf) {
        let path = self.document_path();
        (self.temp_dir, path)
    }
}

/// Builder for individual commit objects
pub struct CommitBuilder {
    pub message: Option<String>,
    pub author: Option<String>,
    pub date: Option<String>,
    pub files: Option<Vec<String>>,
}

impl CommitBuilder {
    pub fn new(message: &str) -> Self {
        Self { message: Some(message.to_string()), author: None, date: None, files: None }
    }

    pub fn author(mut self, author: &str) -> Self {
        self.author = Some(author.to_string());
        self
    }

    pub fn date(mut self, date: &str) -> Self {
        self.date = Some(date.to_string());
        self
    }

    pub fn files(mut self, files: &[&str]) -> Self {
        self.files = Some(files.iter().map(|f| f.to_string()).collect());
        self
    }

    pub fn to_json(&self) -> String {
        let mut object = serde_json::Map::new();
        if let Some(message) = &self.message {
            object.insert("message".to_string(), message.clone().into());
        }
        if let Some(author) = &self.author {
            object.insert("author".to_string(), author.clone().into());
        }
        if let Some(date) = &self.date {
            object.insert("date".to_string(), date.clone().into());
        }
        if let Some(files) = &self.files {
            object.insert("files".to_string(), files.clone().into());
        }
        serde_json::Value::Object(object).to_string()
    }
}
