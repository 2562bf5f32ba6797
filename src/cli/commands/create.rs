use crate::cli::CreateArgs;
use crate::config::CliOverrides;
use crate::error::{CapitaskError, Result};
use crate::model::{Issue, IssueType, Priority, Status};
use crate::normalize::{
    DEFAULT_REPORTER, MAX_DESCRIPTION_LEN, MAX_PERSON_LEN, MAX_STORY_POINTS, MAX_TITLE_LEN,
};
use crate::sanitize;
use serde_json::Value;
use std::str::FromStr;

/// Execute the create command.
///
/// # Errors
///
/// Returns an error if validation fails or the document cannot be written.
pub fn execute(args: CreateArgs, json: bool, cli: &CliOverrides) -> Result<()> {
    let mut ws = super::open(cli)?;

    let title = sanitize::single_line_text(&Value::from(args.title), MAX_TITLE_LEN);
    if title.is_empty() {
        return Err(CapitaskError::validation("title", "cannot be empty"));
    }

    let issue_type = match args.issue_type {
        Some(ref t) => IssueType::from_str(t)?,
        None => IssueType::Task,
    };
    let priority = match args.priority {
        Some(ref p) => Priority::from_str(p)?,
        None => Priority::Low,
    };
    let story_points = args
        .points
        .map_or(0, |p| p.clamp(0, MAX_STORY_POINTS));
    let due_date = match args.due {
        Some(ref d) if !d.trim().is_empty() => match sanitize::parse_date(d.trim()) {
            Some(date) => date.format("%Y-%m-%d").to_string(),
            None => {
                return Err(CapitaskError::validation("due", "expected YYYY-MM-DD"));
            }
        },
        _ => String::new(),
    };
    let assignee = args
        .assignee
        .map(|a| sanitize::single_line_text(&Value::from(a), MAX_PERSON_LEN))
        .unwrap_or_default();
    let description = args
        .description
        .map(|d| sanitize::multiline_text(&Value::from(d), MAX_DESCRIPTION_LEN))
        .unwrap_or_default();

    // New issues join the active sprint under the first epic.
    let sprint_id = Some(ws.doc.sprint.id.clone());
    let epic_id = ws.doc.epics.first().map(|e| e.id.clone());

    let id = ws.doc.next_issue_id();
    let issue = Issue {
        id: id.clone(),
        title,
        description,
        issue_type,
        priority,
        status: Status::ToDo,
        assignee,
        reporter: DEFAULT_REPORTER.to_string(),
        story_points,
        due_date,
        sprint_id,
        epic_id,
        comments: Vec::new(),
        relation_links: Vec::new(),
    };
    ws.doc.issues.push(issue);
    ws.store.save(&ws.doc)?;

    if json {
        let created = ws.doc.issue(&id).ok_or(CapitaskError::IssueNotFound {
            id: id.clone(),
        })?;
        println!("{}", serde_json::to_string_pretty(created)?);
    } else {
        println!("Created {id}");
    }
    Ok(())
}
