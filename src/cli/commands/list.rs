use crate::cli::ListArgs;
use crate::config::{CliOverrides, ViewMode};
use crate::error::Result;
use crate::i18n::Language;
use crate::model::{Issue, IssueType, Priority, Status};
use std::str::FromStr;

/// Execute the list command.
///
/// # Errors
///
/// Returns an error if a filter value is invalid or the workspace is
/// missing.
pub fn execute(args: ListArgs, json: bool, cli: &CliOverrides) -> Result<()> {
    let type_filter = args
        .issue_type
        .as_deref()
        .map(IssueType::from_str)
        .transpose()?;
    let priority_filter = args
        .priority
        .as_deref()
        .map(Priority::from_str)
        .transpose()?;

    let ws = super::open(cli)?;
    let lang = crate::config::effective_language(&ws.prefs, cli);
    let view = args.view.unwrap_or(ws.prefs.view_mode);

    let needle = args.search.as_deref().map(str::to_lowercase);
    let issues: Vec<&Issue> = ws
        .doc
        .issues
        .iter()
        .filter(|i| type_filter.is_none_or(|t| i.issue_type == t))
        .filter(|i| priority_filter.is_none_or(|p| i.priority == p))
        .filter(|i| {
            needle.as_deref().is_none_or(|n| {
                i.title.to_lowercase().contains(n) || i.id.to_lowercase().contains(n)
            })
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&issues)?);
        return Ok(());
    }

    match view {
        ViewMode::Board => print_board(&issues, lang),
        ViewMode::List => print_list(&issues, lang),
    }
    Ok(())
}

fn print_board(issues: &[&Issue], lang: Language) {
    for status in Status::ALL {
        let column: Vec<&&Issue> = issues.iter().filter(|i| i.status == status).collect();
        println!("{} ({})", lang.status_label(status), column.len());
        for issue in column {
            println!(
                "  {}  [{}] {}  {}pt",
                issue.id,
                lang.issue_type_label(issue.issue_type),
                issue.title,
                issue.story_points
            );
        }
        println!();
    }
}

fn print_list(issues: &[&Issue], lang: Language) {
    for issue in issues {
        let assignee = if issue.assignee.is_empty() {
            "-"
        } else {
            &issue.assignee
        };
        println!(
            "{}  {}  {}  {}  {}  {}",
            issue.id,
            lang.issue_type_label(issue.issue_type),
            issue.priority,
            lang.status_label(issue.status),
            assignee,
            issue.title
        );
    }
}
