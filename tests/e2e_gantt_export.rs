mod common;

use common::{CtWorkspace, init_workspace, parse_created_id, run_ct};
use serde_json::Value;
use std::fs;

#[test]
fn gantt_layout_groups_by_assignee() {
    let workspace = CtWorkspace::new();
    init_workspace(&workspace);

    let gantt = run_ct(&workspace, ["gantt", "--json"]);
    assert!(gantt.status.success(), "stderr: {}", gantt.stderr);
    let layout: Value = serde_json::from_str(&gantt.stdout).expect("json layout");
    assert_eq!(layout["kind"], "timeline");

    let groups = layout["groups"].as_array().expect("groups");
    let labels: Vec<&str> = groups
        .iter()
        .filter_map(|g| g["label"].as_str())
        .collect();
    let mut sorted = labels.clone();
    sorted.sort_by_key(|l| l.to_lowercase());
    assert_eq!(labels, sorted, "groups are sorted by label");

    // Done issues never get a bar.
    for group in groups {
        for row in group["rows"].as_array().expect("rows") {
            assert!(row["durationDays"].as_i64().unwrap_or(0) >= 1);
            let bar = &row["bar"];
            assert!(bar["endX"].as_i64().unwrap() > bar["startX"].as_i64().unwrap());
        }
    }
}

#[test]
fn gantt_empty_when_everything_is_done() {
    let workspace = CtWorkspace::new();
    init_workspace(&workspace);

    let list = run_ct(&workspace, ["list", "--json"]);
    let issues: Vec<Value> = serde_json::from_str(&list.stdout).expect("json list");
    for issue in &issues {
        let id = issue["id"].as_str().expect("id");
        let done = run_ct(&workspace, ["move", id, "Done"]);
        assert!(done.status.success(), "stderr: {}", done.stderr);
    }

    let gantt = run_ct(&workspace, ["gantt", "--json"]);
    let layout: Value = serde_json::from_str(&gantt.stdout).expect("json layout");
    assert_eq!(layout["kind"], "empty");
}

#[test]
fn gantt_arrows_draw_one_connector_per_pair() {
    let workspace = CtWorkspace::new();
    init_workspace(&workspace);

    // PROJ-1 (In Progress) and PROJ-3 (To Do) are both active in the seed set.
    let link = run_ct(&workspace, ["link", "PROJ-1", "PROJ-3", "--type", "blocks"]);
    assert!(link.status.success(), "stderr: {}", link.stderr);

    let gantt = run_ct(&workspace, ["gantt", "--json", "--arrows"]);
    let layout: Value = serde_json::from_str(&gantt.stdout).expect("json layout");
    let connectors = layout["connectors"].as_array().expect("connectors");
    assert_eq!(connectors.len(), 1, "one connector per unordered pair");
    let path = connectors[0]["path"].as_str().expect("path");
    assert!(path.starts_with("M "), "path: {path}");
    assert!(path.contains(" H "), "path: {path}");
    assert!(path.contains(" V "), "path: {path}");

    let no_arrows = run_ct(&workspace, ["gantt", "--json"]);
    let layout: Value = serde_json::from_str(&no_arrows.stdout).expect("json layout");
    assert_eq!(layout["connectors"].as_array().expect("connectors").len(), 0);
}

#[test]
fn export_quotes_every_cell_and_neutralizes_formulas() {
    let workspace = CtWorkspace::new();
    init_workspace(&workspace);

    let create = run_ct(&workspace, ["create", "=1+1 injection attempt"]);
    let id = parse_created_id(&create.stdout);
    let export = run_ct(&workspace, ["export"]);
    assert!(export.status.success(), "stderr: {}", export.stderr);

    let lines: Vec<&str> = export.stdout.lines().collect();
    assert_eq!(lines[0], "\"ID\",\"Title\",\"Type\",\"Status\",\"Points\",\"Assignee\"");
    // Seed sprint S-1 holds PROJ-1 through PROJ-9, plus the new issue:
    // created issues join the active sprint.
    assert_eq!(lines.len(), 11);
    assert!(export.stdout.contains(&id), "created issue missing from export");
    assert!(
        export.stdout.contains("\"'=1+1 injection attempt\""),
        "stdout: {}",
        export.stdout
    );
    for line in &lines[1..] {
        assert!(line.starts_with('"') && line.ends_with('"'), "line: {line}");
    }
}

#[test]
fn export_localizes_headers_and_writes_files() {
    let workspace = CtWorkspace::new();
    init_workspace(&workspace);

    let path = workspace.root.join("sprint.csv");
    let export = run_ct(
        &workspace,
        [
            "export",
            "--lang",
            "ru",
            "--output",
            path.to_str().expect("utf8 path"),
        ],
    );
    assert!(export.status.success(), "stderr: {}", export.stderr);

    let body = fs::read_to_string(&path).expect("csv file");
    let header = body.lines().next().expect("header");
    assert_eq!(
        header,
        "\"ID\",\"Название\",\"Тип\",\"Статус\",\"Поинты\",\"Исполнитель\""
    );
    assert!(body.contains("\"Задача\"") || body.contains("\"Баг\"") || body.contains("\"История\""));
}

#[test]
fn formula_title_gets_apostrophe_prefix() {
    let workspace = CtWorkspace::new();
    init_workspace(&workspace);

    // Move a formula-titled issue into the sprint by replacing a seed title.
    let update = run_ct(&workspace, ["update", "PROJ-1", "--title", "@SUM(A1:A9)"]);
    assert!(update.status.success(), "stderr: {}", update.stderr);

    let export = run_ct(&workspace, ["export"]);
    assert!(
        export.stdout.contains("\"'@SUM(A1:A9)\""),
        "stdout: {}",
        export.stdout
    );
}
