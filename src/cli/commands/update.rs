use crate::cli::UpdateArgs;
use crate::config::CliOverrides;
use crate::error::{CapitaskError, Result};
use crate::model::{IssueType, Priority, Status};
use crate::normalize::{
    MAX_DESCRIPTION_LEN, MAX_PERSON_LEN, MAX_STORY_POINTS, MAX_TITLE_LEN,
};
use crate::sanitize;
use serde_json::Value;
use std::str::FromStr;

/// Execute the update command.
///
/// # Errors
///
/// Returns an error if the issue does not exist, a field value is
/// invalid, or the document cannot be written.
#[allow(clippy::too_many_lines)]
pub fn execute(args: UpdateArgs, json: bool, cli: &CliOverrides) -> Result<()> {
    let mut ws = super::open(cli)?;

    // Parse typed fields before taking a mutable borrow on the issue.
    let issue_type = args
        .issue_type
        .as_deref()
        .map(IssueType::from_str)
        .transpose()?;
    let priority = args
        .priority
        .as_deref()
        .map(Priority::from_str)
        .transpose()?;
    let status = args.status.as_deref().map(Status::from_str).transpose()?;
    let due_date = match args.due.as_deref().map(str::trim) {
        None => None,
        Some("") => Some(String::new()),
        Some(raw) => match sanitize::parse_date(raw) {
            Some(date) => Some(date.format("%Y-%m-%d").to_string()),
            None => {
                return Err(CapitaskError::validation("due", "expected YYYY-MM-DD"));
            }
        },
    };

    let issue = ws
        .doc
        .issue_mut(&args.id)
        .ok_or_else(|| CapitaskError::IssueNotFound {
            id: args.id.clone(),
        })?;

    if let Some(title) = args.title {
        let title = sanitize::single_line_text(&Value::from(title), MAX_TITLE_LEN);
        if title.is_empty() {
            return Err(CapitaskError::validation("title", "cannot be empty"));
        }
        issue.title = title;
    }
    if let Some(description) = args.description {
        issue.description = sanitize::multiline_text(&Value::from(description), MAX_DESCRIPTION_LEN);
    }
    if let Some(t) = issue_type {
        issue.issue_type = t;
    }
    if let Some(p) = priority {
        issue.priority = p;
    }
    if let Some(s) = status {
        issue.status = s;
    }
    if let Some(points) = args.points {
        issue.story_points = points.clamp(0, MAX_STORY_POINTS);
    }
    if let Some(due) = due_date {
        issue.due_date = due;
    }
    if let Some(assignee) = args.assignee {
        issue.assignee = sanitize::single_line_text(&Value::from(assignee), MAX_PERSON_LEN);
    }

    let snapshot = issue.clone();
    ws.store.save(&ws.doc)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        println!("Updated {}", snapshot.id);
    }
    Ok(())
}
