//! Data normalization: untrusted persisted JSON in, valid [`Document`] out.
//!
//! Every function here is total. Whatever shape the persisted blob has,
//! the result satisfies all document invariants: unique `PROJ-<n>` issue
//! ids, clamped fields, validated dates, deduplicated relation links and a
//! monotonic id counter. A top-level value that is not recognizably a
//! document is discarded wholesale in favor of seed data, so corruption
//! never blocks startup.
//!
//! Relation symmetry is deliberately NOT restored here; the normalizer
//! only deduplicates each issue's own side. Both sides of an edge are
//! owned by [`crate::relations`].

use crate::model::{
    Comment, Document, Epic, ISSUE_ID_PREFIX, Issue, IssueType, MAX_ID_SUFFIX, Priority,
    RelationLink, RelationType, Sprint, Status,
};
use crate::sanitize;
use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use std::collections::HashSet;

/// At most this many persisted issues are retained.
pub const MAX_ISSUES: usize = 2000;
pub const MAX_TITLE_LEN: usize = 120;
pub const MAX_DESCRIPTION_LEN: usize = 3000;
pub const MAX_PERSON_LEN: usize = 80;
pub const MAX_COMMENT_LEN: usize = 1000;
/// Only the most recent comments are retained.
pub const MAX_COMMENTS: usize = 300;
pub const MAX_RELATION_LINKS: usize = 100;
pub const MAX_EPICS: usize = 50;
pub const MAX_EPIC_TITLE_LEN: usize = 80;
pub const MAX_GOAL_LEN: usize = 240;
pub const MAX_SPRINT_NAME_LEN: usize = 120;
/// Short reference tokens: issue/sprint ids and epic ids.
pub const MAX_SPRINT_REF_LEN: usize = 24;
pub const MAX_EPIC_REF_LEN: usize = 32;

/// Upper bound for story point estimates.
pub const MAX_STORY_POINTS: i64 = 100;

pub const DEFAULT_REPORTER: &str = "Admin";
const DEFAULT_EPIC_COLOR: &str = "#000000";
const SEED_LAST_ID: i64 = 15;

/// Build the seed document used on first start and on corruption.
///
/// Contents mirror the classic seed set: two epics, one active sprint and
/// fifteen sample issues. Issue fields cycle deterministically so tests
/// can rely on the exact output.
#[must_use]
pub fn seed_document(now: DateTime<Utc>) -> Document {
    let today = now.date_naive();
    let types = IssueType::ALL;
    let priorities = Priority::ALL;
    let statuses = Status::ALL;

    let issues = (1..=15)
        .map(|i: i64| {
            let assignee = if i % 3 == 0 {
                "Alex"
            } else if i % 2 == 0 {
                "Maria"
            } else {
                "John"
            };
            let idx = usize::try_from(i).unwrap_or(0);
            Issue {
                id: format!("{ISSUE_ID_PREFIX}{i}"),
                title: format!("Sample Issue {i}"),
                description: "This is a detailed description of the task.".to_string(),
                issue_type: types[idx % 3],
                priority: priorities[(idx / 3) % 3],
                status: statuses[idx % 3],
                assignee: assignee.to_string(),
                reporter: DEFAULT_REPORTER.to_string(),
                story_points: i % 8 + 1,
                due_date: (today + Duration::days(i % 10 - 5))
                    .format("%Y-%m-%d")
                    .to_string(),
                sprint_id: (i < 10).then(|| "S-1".to_string()),
                epic_id: Some(if i % 2 == 0 { "E-1" } else { "E-2" }.to_string()),
                comments: Vec::new(),
                relation_links: Vec::new(),
            }
        })
        .collect();

    Document {
        epics: seed_epics(),
        sprint: seed_sprint(),
        issues,
        last_id: SEED_LAST_ID,
    }
}

fn seed_epics() -> Vec<Epic> {
    vec![
        Epic {
            id: "E-1".to_string(),
            title: "Design System".to_string(),
            color: "#000000".to_string(),
        },
        Epic {
            id: "E-2".to_string(),
            title: "Backend API".to_string(),
            color: "#EFEF00".to_string(),
        },
    ]
}

fn seed_sprint() -> Sprint {
    Sprint {
        id: "S-1".to_string(),
        name: "Sprint Alpha".to_string(),
        goal: "Implement core functionality".to_string(),
        start_date: "2023-10-01".to_string(),
        end_date: "2023-10-14".to_string(),
        is_active: true,
    }
}

/// Normalize a whole persisted document.
///
/// The value must at least be an object carrying an `issues` array and a
/// `sprint` object; anything else is replaced by seed data.
#[must_use]
pub fn normalize_document(raw: &Value, now: DateTime<Utc>) -> Document {
    let (Some(raw_issues), true) = (raw["issues"].as_array(), raw["sprint"].is_object()) else {
        return seed_document(now);
    };

    let sprint = normalize_sprint(&raw["sprint"]);
    let epics = normalize_epics(&raw["epics"]);

    let mut issues: Vec<Issue> = Vec::with_capacity(raw_issues.len().min(MAX_ISSUES));
    let mut seen = HashSet::new();
    for (index, raw_issue) in raw_issues.iter().take(MAX_ISSUES).enumerate() {
        let mut issue = normalize_issue(raw_issue, index, now);
        if !seen.insert(issue.id.clone()) {
            issue.id = next_free_id(&seen, index);
            seen.insert(issue.id.clone());
        }
        issues.push(issue);
    }

    // Resolve cross-references against the validated epic/sprint sets.
    let epic_ids: HashSet<&str> = epics.iter().map(|e| e.id.as_str()).collect();
    let first_epic_id = epics[0].id.clone();
    for issue in &mut issues {
        let known_epic = issue
            .epic_id
            .as_deref()
            .is_some_and(|id| epic_ids.contains(id));
        if !known_epic {
            issue.epic_id = Some(first_epic_id.clone());
        }
        if issue.sprint_id.as_deref() != Some(sprint.id.as_str()) {
            issue.sprint_id = None;
        }
    }

    // The counter must dominate every recognized suffix, even when the
    // persisted value was stale or tampered with. A missing or invalid
    // counter falls back to the seed default, and both sides of the
    // comparison are capped at MAX_ID_SUFFIX so incrementing the counter
    // can never overflow.
    let max_suffix = issues
        .iter()
        .filter_map(|i| Issue::id_suffix(&i.id))
        .max()
        .unwrap_or(0);
    let persisted = sanitize::clamp_integer(&raw["lastId"], 0, MAX_ID_SUFFIX, SEED_LAST_ID);
    let last_id = persisted.max(max_suffix);

    Document {
        epics,
        sprint,
        issues,
        last_id,
    }
}

/// Normalize a single persisted issue record.
///
/// `index` is the record's position in the persisted array; it provides
/// the fallback id `PROJ-<index+1>`. Never fails: the worst input yields a
/// minimally valid placeholder issue.
#[must_use]
pub fn normalize_issue(raw: &Value, index: usize, now: DateTime<Utc>) -> Issue {
    let id = sanitize::opt_token(&raw["id"], MAX_SPRINT_REF_LEN)
        .unwrap_or_else(|| format!("{ISSUE_ID_PREFIX}{}", index + 1));

    let title = {
        let t = sanitize::single_line_text(&raw["title"], MAX_TITLE_LEN);
        if t.is_empty() { id.clone() } else { t }
    };

    let reporter = {
        let r = sanitize::single_line_text(&raw["reporter"], MAX_PERSON_LEN);
        if r.is_empty() {
            DEFAULT_REPORTER.to_string()
        } else {
            r
        }
    };

    let relation_links = normalize_relation_links(raw, &id);

    Issue {
        title,
        description: sanitize::multiline_text(&raw["description"], MAX_DESCRIPTION_LEN),
        issue_type: resolve_variant(&raw["type"], &IssueType::ALL, IssueType::as_str),
        priority: resolve_variant(&raw["priority"], &Priority::ALL, Priority::as_str),
        status: resolve_variant(&raw["status"], &Status::ALL, Status::as_str),
        assignee: sanitize::single_line_text(&raw["assignee"], MAX_PERSON_LEN),
        reporter,
        story_points: sanitize::clamp_integer(&raw["storyPoints"], 0, MAX_STORY_POINTS, 0),
        due_date: sanitize::date_string(&raw["dueDate"]),
        sprint_id: sanitize::opt_token(&raw["sprintId"], MAX_SPRINT_REF_LEN),
        epic_id: sanitize::opt_token(&raw["epicId"], MAX_EPIC_REF_LEN),
        comments: normalize_comments(&raw["comments"], now),
        relation_links,
        id,
    }
}

/// Normalize an issue's relation links.
///
/// Prefers the `relationLinks` shape; falls back to the legacy
/// `relatesTo: string[]` shape (all edges typed `related`). Self-links are
/// rejected and `(target, type)` pairs are deduplicated, so the same two
/// issues may still be linked under multiple distinct types.
#[must_use]
pub fn normalize_relation_links(raw_issue: &Value, own_id: &str) -> Vec<RelationLink> {
    let candidates: Vec<RelationLink> = if let Some(entries) = raw_issue["relationLinks"].as_array()
    {
        entries
            .iter()
            .filter_map(|entry| {
                let target = sanitize::opt_token(&entry["targetIssueId"], MAX_SPRINT_REF_LEN)?;
                let relation_type = resolve_variant(
                    &entry["type"],
                    &RelationType::ALL,
                    RelationType::as_str,
                );
                Some(RelationLink {
                    target_issue_id: target,
                    relation_type,
                })
            })
            .collect()
    } else if let Some(targets) = raw_issue["relatesTo"].as_array() {
        targets
            .iter()
            .filter_map(|t| sanitize::opt_token(t, MAX_SPRINT_REF_LEN))
            .map(|target| RelationLink {
                target_issue_id: target,
                relation_type: RelationType::Related,
            })
            .collect()
    } else {
        Vec::new()
    };

    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|link| link.target_issue_id != own_id)
        .filter(|link| seen.insert((link.target_issue_id.clone(), link.relation_type)))
        .take(MAX_RELATION_LINKS)
        .collect()
}

fn normalize_comments(raw: &Value, now: DateTime<Utc>) -> Vec<Comment> {
    let Some(entries) = raw.as_array() else {
        return Vec::new();
    };

    let mut comments: Vec<Comment> = entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| normalize_comment(entry, index, now))
        .collect();

    // Newest last; keep only the most recent tail.
    if comments.len() > MAX_COMMENTS {
        comments.drain(..comments.len() - MAX_COMMENTS);
    }
    comments
}

fn normalize_comment(raw: &Value, index: usize, now: DateTime<Utc>) -> Option<Comment> {
    let text = sanitize::multiline_text(&raw["text"], MAX_COMMENT_LEN);
    if text.is_empty() {
        return None;
    }

    let created_at = raw["createdAt"]
        .as_str()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map_or(now, |dt| dt.with_timezone(&Utc));

    Some(Comment {
        id: sanitize::opt_token(&raw["id"], MAX_SPRINT_REF_LEN)
            .unwrap_or_else(|| format!("C-{}", index + 1)),
        text,
        author: sanitize::single_line_text(&raw["author"], MAX_PERSON_LEN),
        created_at,
    })
}

fn normalize_sprint(raw: &Value) -> Sprint {
    let seed = seed_sprint();
    Sprint {
        id: sanitize::opt_token(&raw["id"], MAX_SPRINT_REF_LEN).unwrap_or(seed.id),
        name: merge_text(&raw["name"], MAX_SPRINT_NAME_LEN, seed.name),
        goal: merge_text(&raw["goal"], MAX_GOAL_LEN, seed.goal),
        start_date: merge_date(&raw["startDate"], seed.start_date),
        end_date: merge_date(&raw["endDate"], seed.end_date),
        is_active: raw["isActive"].as_bool().unwrap_or(seed.is_active),
    }
}

fn merge_text(raw: &Value, max_len: usize, seed: String) -> String {
    let text = sanitize::single_line_text(raw, max_len);
    if text.is_empty() { seed } else { text }
}

fn merge_date(raw: &Value, seed: String) -> String {
    let date = sanitize::date_string(raw);
    if date.is_empty() { seed } else { date }
}

fn normalize_epics(raw: &Value) -> Vec<Epic> {
    let epics: Vec<Epic> = raw
        .as_array()
        .map(|entries| {
            entries
                .iter()
                .take(MAX_EPICS)
                .filter_map(|entry| {
                    let id = sanitize::opt_token(&entry["id"], MAX_EPIC_REF_LEN)?;
                    let title = sanitize::opt_token(&entry["title"], MAX_EPIC_TITLE_LEN)?;
                    Some(Epic {
                        id,
                        title,
                        color: normalize_color(&entry["color"]),
                    })
                })
                .collect()
        })
        .unwrap_or_default();

    if epics.is_empty() { seed_epics() } else { epics }
}

fn normalize_color(raw: &Value) -> String {
    let Some(s) = raw.as_str() else {
        return DEFAULT_EPIC_COLOR.to_string();
    };
    let is_hex = s.len() == 7
        && s.starts_with('#')
        && s[1..].bytes().all(|b| b.is_ascii_hexdigit());
    if is_hex {
        s.to_string()
    } else {
        DEFAULT_EPIC_COLOR.to_string()
    }
}

fn resolve_variant<T: Copy + Default>(raw: &Value, variants: &[T], as_str: fn(T) -> &'static str) -> T {
    raw.as_str()
        .and_then(|s| variants.iter().copied().find(|&v| as_str(v) == s))
        .unwrap_or_default()
}

fn next_free_id(seen: &HashSet<String>, index: usize) -> String {
    let mut n = i64::try_from(index).unwrap_or(0) + 1;
    loop {
        let candidate = format!("{ISSUE_ID_PREFIX}{n}");
        if !seen.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}
