use crate::config::CliOverrides;
use crate::error::{CapitaskError, Result};
use crate::model::Document;

/// Execute the show command.
///
/// # Errors
///
/// Returns an error if the issue does not exist.
pub fn execute(id: &str, json: bool, cli: &CliOverrides) -> Result<()> {
    let ws = super::open(cli)?;
    let lang = crate::config::effective_language(&ws.prefs, cli);

    let issue = ws
        .doc
        .issue(id)
        .ok_or_else(|| CapitaskError::IssueNotFound { id: id.to_string() })?;

    if json {
        println!("{}", serde_json::to_string_pretty(issue)?);
        return Ok(());
    }

    println!("{}  {}", issue.id, issue.title);
    println!(
        "  type: {}  priority: {}  status: {}",
        lang.issue_type_label(issue.issue_type),
        issue.priority,
        lang.status_label(issue.status)
    );
    println!("  points: {}", issue.story_points);
    if !issue.due_date.is_empty() {
        println!("  due: {}", issue.due_date);
    }
    if !issue.assignee.is_empty() {
        println!("  assignee: {}", issue.assignee);
    }
    println!("  reporter: {}", issue.reporter);
    if let Some(ref epic_id) = issue.epic_id {
        println!("  epic: {epic_id}");
    }
    if let Some(ref sprint_id) = issue.sprint_id {
        println!("  sprint: {sprint_id}");
    }
    if !issue.description.is_empty() {
        println!("\n{}", issue.description);
    }

    print_relations(&ws.doc, issue.id.as_str());

    if !issue.comments.is_empty() {
        println!("\nComments:");
        for comment in &issue.comments {
            println!(
                "  {} [{}] {}",
                comment.created_at.format("%Y-%m-%d %H:%M"),
                comment.author,
                comment.text
            );
        }
    }
    Ok(())
}

/// Links whose target no longer exists are skipped, not pruned.
fn print_relations(doc: &Document, id: &str) {
    let Some(issue) = doc.issue(id) else { return };
    let live: Vec<_> = issue
        .relation_links
        .iter()
        .filter(|l| doc.issue(&l.target_issue_id).is_some())
        .collect();
    if live.is_empty() {
        return;
    }
    println!("\nLinks:");
    for link in live {
        println!("  {} {}", link.relation_type, link.target_issue_id);
    }
}
