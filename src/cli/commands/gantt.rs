use crate::cli::GanttArgs;
use crate::config::CliOverrides;
use crate::error::Result;
use crate::gantt::{self, GanttLayout, TimelineLayout};
use chrono::Utc;

/// Execute the gantt command.
///
/// # Errors
///
/// Returns an error if the workspace is missing.
pub fn execute(args: &GanttArgs, json: bool, cli: &CliOverrides) -> Result<()> {
    let ws = super::open(cli)?;
    let today = Utc::now().date_naive();

    let layout = gantt::build_layout(&ws.doc.issues, today, args.group_by, args.arrows);

    if json {
        println!("{}", serde_json::to_string_pretty(&layout)?);
        return Ok(());
    }

    match layout {
        GanttLayout::Empty => println!("No active issues to schedule."),
        GanttLayout::Timeline(timeline) => print_timeline(&timeline),
    }
    Ok(())
}

fn print_timeline(timeline: &TimelineLayout) {
    println!(
        "{} .. {} ({} days)",
        timeline.timeline_start,
        timeline.timeline_end,
        timeline.days.len()
    );
    for group in &timeline.groups {
        println!("\n{}", group.label);
        for row in &group.rows {
            let offset = (row.start_date - timeline.timeline_start).num_days().max(0);
            let pad = " ".repeat(usize::try_from(offset).unwrap_or(0));
            let bar = "#".repeat(usize::try_from(row.duration_days).unwrap_or(1).max(1));
            println!(
                "  {:<9} {pad}{bar}  {} -> {} ({}d)  {}",
                row.issue_id, row.start_date, row.end_date, row.duration_days, row.title
            );
        }
    }
    if !timeline.connectors.is_empty() {
        println!("\nArrows:");
        for connector in &timeline.connectors {
            println!(
                "  {} -> {}  [{}]",
                connector.from_issue_id, connector.to_issue_id, connector.path
            );
        }
    }
}
