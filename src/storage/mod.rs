//! Document persistence.
//!
//! The entire application state is one JSON document in the workspace
//! directory. Loading always succeeds: unreadable or malformed content
//! falls back to seed data, and anything parseable is routed through the
//! document normalizer. Writes go through a temp-file-then-rename so a
//! crash mid-write cannot corrupt the document.

use crate::error::Result;
use crate::model::Document;
use crate::normalize;
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};

/// Document file name inside the workspace directory.
pub const DOCUMENT_FILE: &str = "document.json";

/// Store for the single persisted document.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    dir: PathBuf,
}

impl DocumentStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn document_path(&self) -> PathBuf {
        self.dir.join(DOCUMENT_FILE)
    }

    /// Load and normalize the persisted document.
    ///
    /// Total: a missing file, unreadable bytes or malformed JSON all yield
    /// seed data instead of an error, so corruption never blocks startup.
    /// Note that malformed JSON bypasses the normalizer entirely; only
    /// parseable content is normalized.
    #[must_use]
    pub fn load(&self, now: DateTime<Utc>) -> Document {
        let path = self.document_path();
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) => {
                if err.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(path = %path.display(), error = %err, "document unreadable, using seed data");
                }
                return normalize::seed_document(now);
            }
        };

        match serde_json::from_str::<serde_json::Value>(&raw) {
            Ok(value) => normalize::normalize_document(&value, now),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "document corrupted, using seed data");
                normalize::seed_document(now)
            }
        }
    }

    /// Serialize and atomically write the document.
    pub fn save(&self, doc: &Document) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(doc)?;
        write_atomic(&self.document_path(), &bytes)?;
        tracing::debug!(path = %self.document_path().display(), issues = doc.issues.len(), "document saved");
        Ok(())
    }
}

/// Write a file via temp-file-then-rename in the same directory.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir)?;
    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, bytes)?;
    fs::rename(&temp_path, path)
}
