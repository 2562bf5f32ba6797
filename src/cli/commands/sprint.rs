use crate::cli::SprintArgs;
use crate::config::CliOverrides;
use crate::error::{CapitaskError, Result};
use crate::model::{Issue, Priority, Status};

/// Execute the sprint command.
///
/// # Errors
///
/// Returns an error if the sort field is unknown or the workspace is
/// missing.
pub fn execute(args: &SprintArgs, json: bool, cli: &CliOverrides) -> Result<()> {
    let ws = super::open(cli)?;
    let lang = crate::config::effective_language(&ws.prefs, cli);
    let sprint = &ws.doc.sprint;

    let needle = args.search.as_deref().map(str::to_lowercase);
    let mut issues: Vec<&Issue> = ws
        .doc
        .issues
        .iter()
        .filter(|i| i.sprint_id.as_deref() == Some(sprint.id.as_str()))
        .filter(|i| {
            needle
                .as_deref()
                .is_none_or(|n| i.title.to_lowercase().contains(n))
        })
        .collect();

    if let Some(field) = args.sort.as_deref() {
        sort_issues(&mut issues, field)?;
    }

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "sprint": sprint,
                "issues": issues,
            }))?
        );
        return Ok(());
    }

    let total_points: i64 = issues.iter().map(|i| i.story_points).sum();
    println!("{}  ({} - {})", sprint.name, sprint.start_date, sprint.end_date);
    if !sprint.goal.is_empty() {
        println!("Goal: {}", sprint.goal);
    }
    println!("{} issues, {total_points} story points\n", issues.len());

    for issue in issues {
        println!(
            "{}  {}  {}  {}pt  {}",
            issue.id,
            issue.priority,
            lang.status_label(issue.status),
            issue.story_points,
            issue.title
        );
    }
    Ok(())
}

fn sort_issues(issues: &mut [&Issue], field: &str) -> Result<()> {
    match field {
        "id" => issues.sort_by_key(|i| Issue::id_suffix(&i.id).unwrap_or(i64::MAX)),
        "title" => issues.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase())),
        "priority" => issues.sort_by_key(|i| priority_rank(i.priority)),
        "status" => issues.sort_by_key(|i| status_rank(i.status)),
        other => {
            return Err(CapitaskError::validation(
                "sort",
                format!("unknown field '{other}' (expected id, title, priority, status)"),
            ));
        }
    }
    Ok(())
}

const fn priority_rank(priority: Priority) -> u8 {
    match priority {
        Priority::High => 0,
        Priority::Medium => 1,
        Priority::Low => 2,
    }
}

const fn status_rank(status: Status) -> u8 {
    match status {
        Status::ToDo => 0,
        Status::InProgress => 1,
        Status::Done => 2,
    }
}
