//! Error types for capitask.
//!
//! The normalization and layout layers are total and never produce errors;
//! everything here exists for the CLI surface (unknown ids, missing
//! workspace, invalid flag values) and for I/O.

use std::path::PathBuf;
use thiserror::Error;

/// Primary error type for capitask operations.
#[derive(Error, Debug)]
pub enum CapitaskError {
    // === Workspace errors ===
    /// Workspace not initialized (no .capitask directory found).
    #[error("Capitask not initialized: run 'ct init' first")]
    NotInitialized,

    /// Already initialized.
    #[error("Already initialized at '{path}'")]
    AlreadyInitialized { path: PathBuf },

    // === Issue errors ===
    /// Issue with the specified ID was not found.
    #[error("Issue not found: {id}")]
    IssueNotFound { id: String },

    // === Input errors ===
    /// Field validation failed.
    #[error("Validation failed: {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Invalid status value.
    #[error("Invalid status: {status}")]
    InvalidStatus { status: String },

    /// Invalid issue type value.
    #[error("Invalid issue type: {issue_type}")]
    InvalidType { issue_type: String },

    /// Invalid priority value.
    #[error("Invalid priority: {priority}")]
    InvalidPriority { priority: String },

    /// Invalid relation type value.
    #[error("Invalid relation type: {relation}")]
    InvalidRelation { relation: String },

    // === I/O errors ===
    /// File system I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Wrapped anyhow error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CapitaskError {
    /// Human-friendly suggestion for fixing this error.
    #[must_use]
    pub const fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::NotInitialized => Some("Run: ct init"),
            Self::AlreadyInitialized { .. } => Some("Use --force to reseed"),
            Self::IssueNotFound { .. } => Some("List known issues with: ct list"),
            Self::InvalidStatus { .. } => Some("Valid statuses: 'To Do', 'In Progress', 'Done'"),
            Self::InvalidType { .. } => Some("Valid types: Task, Bug, Story"),
            Self::InvalidPriority { .. } => Some("Valid priorities: High, Medium, Low"),
            Self::InvalidRelation { .. } => {
                Some("Valid relation types: related, blocks, subtask")
            }
            _ => None,
        }
    }

    /// Get the exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        1
    }

    /// Create a validation error for a specific field.
    #[must_use]
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Result type using `CapitaskError`.
pub type Result<T> = std::result::Result<T, CapitaskError>;
