//! Gantt timeline layout engine.
//!
//! Turns the set of non-Done issues into a render-ready layout model:
//! a day-column timeline, grouped rows, per-issue bar geometry and
//! orthogonal connector paths for related issues. The whole computation is
//! a deterministic pure function of the issue list, the current date, the
//! grouping mode and the arrows toggle; no side effects, no errors.

use crate::model::Issue;
use crate::sanitize;
use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Width of one day column, px.
pub const DAY_WIDTH: i64 = 40;
/// Height of every group-header and issue row, px.
pub const ROW_HEIGHT: i64 = 36;
/// Height of the timeline header above the first group, px.
pub const TIMELINE_HEADER_HEIGHT: i64 = 48;
/// Minimum horizontal gap before a connector turns right after its source.
pub const CONNECTOR_MIN_GAP: i64 = 40;
/// How far past a bar the connector's vertical segment runs.
pub const CONNECTOR_STUB: i64 = 12;

/// Fallback window: issues without a due date end this many days from today.
const DEFAULT_DUE_OFFSET_DAYS: i64 = 5;
/// Duration when story points are zero or unusable.
const DEFAULT_DURATION_DAYS: i64 = 3;
const MAX_DURATION_DAYS: i64 = 14;

/// Group label for issues without an assignee.
pub const UNASSIGNED_LABEL: &str = "Unassigned";

/// How issue rows are grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum GroupBy {
    #[default]
    Assignee,
    Type,
}

/// Pixel geometry of one issue bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bar {
    pub start_x: i64,
    pub end_x: i64,
    pub center_y: i64,
}

/// One laid-out issue row.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GanttRow {
    pub issue_id: String,
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration_days: i64,
    pub bar: Bar,
}

/// A group header plus its issue rows, in render order.
#[derive(Debug, Clone, Serialize)]
pub struct GanttGroup {
    pub label: String,
    pub rows: Vec<GanttRow>,
}

/// An orthogonal connector between two related issues' bars.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Connector {
    pub from_issue_id: String,
    pub to_issue_id: String,
    /// SVG-style path: H to the turn point, V to the target center, H in.
    pub path: String,
}

/// The computed timeline model.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineLayout {
    pub timeline_start: NaiveDate,
    pub timeline_end: NaiveDate,
    pub days: Vec<NaiveDate>,
    pub groups: Vec<GanttGroup>,
    pub connectors: Vec<Connector>,
}

/// Layout result; zero active issues yields the explicit empty state
/// instead of a degenerate timeline.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GanttLayout {
    Empty,
    Timeline(TimelineLayout),
}

/// Derived schedule of one issue: due date (or the default window) pinned
/// as the end, duration from story points, start walked back from the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub duration_days: i64,
}

/// Compute an issue's schedule relative to `today`.
#[must_use]
pub fn schedule(issue: &Issue, today: NaiveDate) -> Schedule {
    let end = sanitize::parse_date(&issue.due_date)
        .unwrap_or(today + Duration::days(DEFAULT_DUE_OFFSET_DAYS));
    let duration_days = if issue.story_points >= 1 {
        issue.story_points.min(MAX_DURATION_DAYS)
    } else {
        DEFAULT_DURATION_DAYS
    };
    Schedule {
        start: end - Duration::days(duration_days - 1),
        end,
        duration_days,
    }
}

/// Lay out the Gantt view for the given issues.
///
/// Done issues are skipped; relation links whose target did not make it
/// into the layout are skipped too (dangling references are a render-time
/// concern, not an error).
#[must_use]
pub fn build_layout(
    issues: &[Issue],
    today: NaiveDate,
    group_by: GroupBy,
    with_arrows: bool,
) -> GanttLayout {
    let scheduled: Vec<(&Issue, Schedule)> = issues
        .iter()
        .filter(|i| i.status.is_active())
        .map(|i| (i, schedule(i, today)))
        .collect();

    if scheduled.is_empty() {
        return GanttLayout::Empty;
    }

    // One spare day column on each side of the extremes.
    let min_start = scheduled.iter().map(|(_, s)| s.start).min().unwrap_or(today);
    let max_end = scheduled.iter().map(|(_, s)| s.end).max().unwrap_or(today);
    let timeline_start = min_start - Duration::days(1);
    let timeline_end = max_end + Duration::days(1);

    let day_count = (timeline_end - timeline_start).num_days();
    let days: Vec<NaiveDate> = (0..=day_count)
        .map(|d| timeline_start + Duration::days(d))
        .collect();

    let groups = group_rows(&scheduled, timeline_start, group_by);

    let connectors = if with_arrows {
        route_connectors(&groups, &scheduled)
    } else {
        Vec::new()
    };

    GanttLayout::Timeline(TimelineLayout {
        timeline_start,
        timeline_end,
        days,
        groups,
        connectors,
    })
}

fn group_label(issue: &Issue, group_by: GroupBy) -> String {
    match group_by {
        GroupBy::Assignee => {
            let name = issue.assignee.trim();
            if name.is_empty() {
                UNASSIGNED_LABEL.to_string()
            } else {
                name.to_string()
            }
        }
        GroupBy::Type => issue.issue_type.as_str().to_string(),
    }
}

fn group_rows(
    scheduled: &[(&Issue, Schedule)],
    timeline_start: NaiveDate,
    group_by: GroupBy,
) -> Vec<GanttGroup> {
    let mut by_label: HashMap<String, Vec<(&Issue, Schedule)>> = HashMap::new();
    for &(issue, sched) in scheduled {
        by_label
            .entry(group_label(issue, group_by))
            .or_default()
            .push((issue, sched));
    }

    let mut labels: Vec<String> = by_label.keys().cloned().collect();
    // Locale-aware ordering, approximated as case-insensitive Unicode
    // comparison with the raw label as tiebreaker.
    labels.sort_by(|a, b| {
        a.to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b))
    });

    let mut y = TIMELINE_HEADER_HEIGHT;
    let mut groups = Vec::with_capacity(labels.len());
    for label in labels {
        let mut members = by_label.remove(&label).unwrap_or_default();
        members.sort_by(|(ia, sa), (ib, sb)| sa.start.cmp(&sb.start).then_with(|| ia.id.cmp(&ib.id)));

        y += ROW_HEIGHT; // group header row
        let rows = members
            .into_iter()
            .map(|(issue, sched)| {
                let start_index = (sched.start - timeline_start).num_days();
                let end_index = (sched.end - timeline_start).num_days();
                let start_x = start_index * DAY_WIDTH;
                // A bar is never narrower than one day column.
                let end_x = (end_index + 1).max(start_index + 1) * DAY_WIDTH;
                let row = GanttRow {
                    issue_id: issue.id.clone(),
                    title: issue.title.clone(),
                    start_date: sched.start,
                    end_date: sched.end,
                    duration_days: sched.duration_days,
                    bar: Bar {
                        start_x,
                        end_x,
                        center_y: y + ROW_HEIGHT / 2,
                    },
                };
                y += ROW_HEIGHT;
                row
            })
            .collect();

        groups.push(GanttGroup { label, rows });
    }
    groups
}

fn route_connectors(groups: &[GanttGroup], scheduled: &[(&Issue, Schedule)]) -> Vec<Connector> {
    let bars: HashMap<&str, Bar> = groups
        .iter()
        .flat_map(|g| g.rows.iter())
        .map(|r| (r.issue_id.as_str(), r.bar))
        .collect();
    let links: HashMap<&str, &Issue> = scheduled.iter().map(|&(i, _)| (i.id.as_str(), i)).collect();

    let mut seen_pairs: HashSet<(String, String)> = HashSet::new();
    let mut connectors = Vec::new();

    // Walk rows in render order so output is deterministic.
    for row in groups.iter().flat_map(|g| g.rows.iter()) {
        let Some(issue) = links.get(row.issue_id.as_str()) else {
            continue;
        };
        for link in &issue.relation_links {
            let Some(&target_bar) = bars.get(link.target_issue_id.as_str()) else {
                continue; // dangling or Done target: filtered at render time
            };

            let mut pair = [row.issue_id.clone(), link.target_issue_id.clone()];
            pair.sort();
            let [lo, hi] = pair;
            if !seen_pairs.insert((lo, hi)) {
                continue; // one arrow per unordered pair, whatever the types
            }

            connectors.push(Connector {
                from_issue_id: row.issue_id.clone(),
                to_issue_id: link.target_issue_id.clone(),
                path: connector_path(row.bar, target_bar),
            });
        }
    }
    connectors
}

/// Route one orthogonal path from the source bar's right edge into the
/// target bar's left edge.
///
/// The turn point sits just past the source when there is a comfortable
/// horizontal gap to the target; otherwise it is pushed past whichever bar
/// extends further, so the vertical segment avoids crossing bar content.
fn connector_path(source: Bar, target: Bar) -> String {
    let turn_x = if target.start_x - source.end_x >= CONNECTOR_MIN_GAP {
        source.end_x + CONNECTOR_STUB
    } else {
        source.end_x.max(target.end_x) + CONNECTOR_STUB
    };
    format!(
        "M {} {} H {} V {} H {}",
        source.end_x, source.center_y, turn_x, target.center_y, target.start_x
    )
}
