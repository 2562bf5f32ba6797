use crate::config::CliOverrides;
use crate::error::{CapitaskError, Result};
use crate::model::Comment;
use crate::normalize::{MAX_COMMENTS, MAX_COMMENT_LEN, MAX_PERSON_LEN};
use crate::sanitize;
use chrono::Utc;
use serde_json::Value;

/// Execute the comment command.
///
/// # Errors
///
/// Returns an error if the issue does not exist, the text is empty, or
/// the document cannot be written.
pub fn execute(id: &str, text: &str, author: &str, cli: &CliOverrides) -> Result<()> {
    let mut ws = super::open(cli)?;

    let text = sanitize::multiline_text(&Value::from(text), MAX_COMMENT_LEN);
    if text.is_empty() {
        return Err(CapitaskError::validation("text", "cannot be empty"));
    }
    let author = sanitize::single_line_text(&Value::from(author), MAX_PERSON_LEN);

    let issue = ws
        .doc
        .issue_mut(id)
        .ok_or_else(|| CapitaskError::IssueNotFound { id: id.to_string() })?;

    let next = issue
        .comments
        .iter()
        .filter_map(|c| c.id.strip_prefix("C-").and_then(|s| s.parse::<i64>().ok()))
        .max()
        .unwrap_or(0)
        + 1;
    issue.comments.push(Comment {
        id: format!("C-{next}"),
        text,
        author,
        created_at: Utc::now(),
    });
    if issue.comments.len() > MAX_COMMENTS {
        let excess = issue.comments.len() - MAX_COMMENTS;
        issue.comments.drain(..excess);
    }

    ws.store.save(&ws.doc)?;
    println!("Commented on {id}");
    Ok(())
}
