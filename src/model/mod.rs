//! Core data types for capitask.
//!
//! This module defines the persisted document and its entities:
//! - `Document` - the entire persisted application state
//! - `Issue` - the core work item
//! - `Sprint` / `Epic` - grouping entities owned by the document
//! - `Comment` - issue comments
//! - `RelationLink` - one side of a typed, symmetric edge between issues
//!
//! Serde attributes pin the original camelCase wire format so documents
//! written by earlier versions of the app keep round-tripping.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Issue lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Status {
    #[default]
    #[serde(rename = "To Do")]
    ToDo,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Done")]
    Done,
}

impl Status {
    pub const ALL: [Self; 3] = [Self::ToDo, Self::InProgress, Self::Done];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ToDo => "To Do",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
        }
    }

    /// Done issues drop out of the active sprint and the Gantt view.
    #[must_use]
    pub const fn is_active(self) -> bool {
        !matches!(self, Self::Done)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Status {
    type Err = crate::error::CapitaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "to do" | "todo" | "to-do" => Ok(Self::ToDo),
            "in progress" | "in-progress" | "inprogress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            other => Err(crate::error::CapitaskError::InvalidStatus {
                status: other.to_string(),
            }),
        }
    }
}

/// Issue type category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum IssueType {
    #[default]
    Task,
    Bug,
    Story,
}

impl IssueType {
    pub const ALL: [Self; 3] = [Self::Task, Self::Bug, Self::Story];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Task => "Task",
            Self::Bug => "Bug",
            Self::Story => "Story",
        }
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for IssueType {
    type Err = crate::error::CapitaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "task" => Ok(Self::Task),
            "bug" => Ok(Self::Bug),
            "story" => Ok(Self::Story),
            other => Err(crate::error::CapitaskError::InvalidType {
                issue_type: other.to_string(),
            }),
        }
    }
}

/// Issue priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Priority {
    High,
    Medium,
    #[default]
    Low,
}

impl Priority {
    pub const ALL: [Self; 3] = [Self::High, Self::Medium, Self::Low];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Priority {
    type Err = crate::error::CapitaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            other => Err(crate::error::CapitaskError::InvalidPriority {
                priority: other.to_string(),
            }),
        }
    }
}

/// Relation edge type between two issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RelationType {
    #[default]
    Related,
    Blocks,
    Subtask,
}

impl RelationType {
    pub const ALL: [Self; 3] = [Self::Related, Self::Blocks, Self::Subtask];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Related => "related",
            Self::Blocks => "blocks",
            Self::Subtask => "subtask",
        }
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RelationType {
    type Err = crate::error::CapitaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "related" => Ok(Self::Related),
            "blocks" => Ok(Self::Blocks),
            "subtask" => Ok(Self::Subtask),
            other => Err(crate::error::CapitaskError::InvalidRelation {
                relation: other.to_string(),
            }),
        }
    }
}

/// One side of a typed, symmetric edge between two issues.
///
/// The mirrored entry on the target issue is maintained by
/// [`crate::relations`], never by hand.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct RelationLink {
    pub target_issue_id: String,
    #[serde(rename = "type")]
    pub relation_type: RelationType,
}

/// A comment on an issue. Comments are ordered newest last.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub text: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

/// The primary issue entity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Unique ID (e.g., "PROJ-12"). Immutable after creation.
    pub id: String,

    /// Title (non-empty, single line, max 120 chars).
    pub title: String,

    /// Detailed description (max 3000 chars).
    #[serde(default)]
    pub description: String,

    /// Issue type (Task, Bug, Story).
    #[serde(rename = "type", default)]
    pub issue_type: IssueType,

    #[serde(default)]
    pub priority: Priority,

    #[serde(default)]
    pub status: Status,

    /// Assigned user; empty means unassigned.
    #[serde(default)]
    pub assignee: String,

    /// Reporter, defaults to "Admin".
    #[serde(default)]
    pub reporter: String,

    /// Estimate in story points (0-100).
    #[serde(default)]
    pub story_points: i64,

    /// Due date as `YYYY-MM-DD`, or empty when unset.
    #[serde(default)]
    pub due_date: String,

    /// Sprint this issue belongs to, if any.
    #[serde(default)]
    pub sprint_id: Option<String>,

    /// Epic this issue belongs to, if any.
    #[serde(default)]
    pub epic_id: Option<String>,

    #[serde(default)]
    pub comments: Vec<Comment>,

    #[serde(default)]
    pub relation_links: Vec<RelationLink>,
}

impl Issue {
    /// Numeric suffix of a `PROJ-<n>` id, if the id has that shape.
    ///
    /// Suffixes above [`MAX_ID_SUFFIX`] are not recognized: the counter
    /// never chases them, so `next_issue_id` cannot approach overflow.
    #[must_use]
    pub fn id_suffix(id: &str) -> Option<i64> {
        let digits = id.strip_prefix(ISSUE_ID_PREFIX)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok().filter(|&n| n <= MAX_ID_SUFFIX)
    }

    /// True if this issue already carries the given relation link.
    #[must_use]
    pub fn has_relation(&self, target_id: &str, relation_type: RelationType) -> bool {
        self.relation_links
            .iter()
            .any(|l| l.target_issue_id == target_id && l.relation_type == relation_type)
    }
}

/// Prefix of every generated issue id.
pub const ISSUE_ID_PREFIX: &str = "PROJ-";

/// Ceiling on recognized id suffixes and the persisted id counter.
///
/// A tampered document can carry an arbitrary `lastId` or id suffix;
/// capping both keeps the counter far away from `i64` overflow.
pub const MAX_ID_SUFFIX: i64 = 1_000_000_000_000;

/// The single sprint owned by the document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Sprint {
    pub id: String,
    pub name: String,
    pub goal: String,
    pub start_date: String,
    pub end_date: String,
    pub is_active: bool,
}

/// An epic grouping issues.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Epic {
    pub id: String,
    pub title: String,
    pub color: String,
}

/// The entire persisted application state.
///
/// Mutations replace fields in place; callers persist the whole value
/// afterwards. There is no incremental diffing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub epics: Vec<Epic>,
    pub sprint: Sprint,
    pub issues: Vec<Issue>,
    pub last_id: i64,
}

impl Document {
    #[must_use]
    pub fn issue(&self, id: &str) -> Option<&Issue> {
        self.issues.iter().find(|i| i.id == id)
    }

    #[must_use]
    pub fn issue_mut(&mut self, id: &str) -> Option<&mut Issue> {
        self.issues.iter_mut().find(|i| i.id == id)
    }

    /// Reserve the next issue id and advance the counter.
    ///
    /// `last_id` is kept >= the numeric suffix of every existing issue id
    /// by the document normalizer, so the generated id cannot collide.
    pub fn next_issue_id(&mut self) -> String {
        self.last_id += 1;
        format!("{ISSUE_ID_PREFIX}{}", self.last_id)
    }
}
