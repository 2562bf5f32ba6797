mod common;

use assert_cmd::Command;
use common::{CtWorkspace, init_workspace, parse_created_id, run_ct};
use predicates::prelude::*;
use serde_json::Value;

#[test]
fn help_lists_every_command() {
    Command::new(assert_cmd::cargo::cargo_bin!("ct"))
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("gantt")
                .and(predicate::str::contains("export"))
                .and(predicate::str::contains("sprint"))
                .and(predicate::str::contains("link")),
        );
}

#[test]
fn init_seeds_and_refuses_second_run() {
    let workspace = CtWorkspace::new();
    init_workspace(&workspace);
    assert!(workspace.document_path().exists());

    let again = run_ct(&workspace, ["init"]);
    assert!(!again.status.success());
    assert!(again.stderr.contains("--force"), "stderr: {}", again.stderr);

    let forced = run_ct(&workspace, ["init", "--force"]);
    assert!(forced.status.success(), "stderr: {}", forced.stderr);
}

#[test]
fn discovery_walks_up_from_a_nested_directory() {
    let workspace = CtWorkspace::new();
    init_workspace(&workspace);

    let list = common::run_ct_from(&workspace, std::path::Path::new("src/deep"), ["list", "--json"]);
    assert!(list.status.success(), "stderr: {}", list.stderr);
    let issues: Vec<Value> = serde_json::from_str(&list.stdout).expect("json list");
    assert_eq!(issues.len(), 15);

    // Mutations from a subdirectory land in the discovered workspace,
    // not in a new one next to the cwd.
    let create = common::run_ct_from(
        &workspace,
        std::path::Path::new("src/deep"),
        ["create", "nested create"],
    );
    assert!(create.status.success(), "stderr: {}", create.stderr);
    assert!(workspace.document_path().exists());
    assert!(!workspace.root.join("src/deep/.capitask").exists());
}

#[test]
fn commands_without_workspace_suggest_init() {
    let workspace = CtWorkspace::new();
    let list = run_ct(&workspace, ["list"]);
    assert!(!list.status.success());
    assert!(list.stderr.contains("ct init"), "stderr: {}", list.stderr);
}

#[test]
fn create_update_move_show_roundtrip() {
    let workspace = CtWorkspace::new();
    init_workspace(&workspace);

    let create = run_ct(
        &workspace,
        [
            "create",
            "Fix the flaky pipeline",
            "--type",
            "bug",
            "--priority",
            "high",
            "--points",
            "5",
            "--due",
            "2026-09-15",
        ],
    );
    assert!(create.status.success(), "stderr: {}", create.stderr);
    let id = parse_created_id(&create.stdout);
    assert_eq!(id, "PROJ-16", "seed data ends at PROJ-15");

    let update = run_ct(
        &workspace,
        ["update", &id, "--assignee", "Alex", "--points", "8"],
    );
    assert!(update.status.success(), "stderr: {}", update.stderr);

    let mv = run_ct(&workspace, ["move", &id, "In Progress"]);
    assert!(mv.status.success(), "stderr: {}", mv.stderr);

    let show = run_ct(&workspace, ["show", &id, "--json"]);
    assert!(show.status.success(), "stderr: {}", show.stderr);
    let issue: Value = serde_json::from_str(&show.stdout).expect("json issue");
    assert_eq!(issue["id"], id);
    assert_eq!(issue["type"], "Bug");
    assert_eq!(issue["priority"], "High");
    assert_eq!(issue["status"], "In Progress");
    assert_eq!(issue["storyPoints"], 8);
    assert_eq!(issue["assignee"], "Alex");
    assert_eq!(issue["dueDate"], "2026-09-15");
    // Created issues join the active sprint under the first epic.
    assert_eq!(issue["sprintId"], "S-1");
    assert_eq!(issue["epicId"], "E-1");

    let sprint = run_ct(&workspace, ["sprint"]);
    assert!(sprint.status.success(), "stderr: {}", sprint.stderr);
    assert!(sprint.stdout.contains(&id), "stdout: {}", sprint.stdout);
}

#[test]
fn create_rejects_empty_title_and_bad_date() {
    let workspace = CtWorkspace::new();
    init_workspace(&workspace);

    let empty = run_ct(&workspace, ["create", "   "]);
    assert!(!empty.status.success());
    assert!(empty.stderr.contains("title"), "stderr: {}", empty.stderr);

    let bad_date = run_ct(&workspace, ["create", "ok", "--due", "2026-02-30"]);
    assert!(!bad_date.status.success());
    assert!(
        bad_date.stderr.contains("YYYY-MM-DD"),
        "stderr: {}",
        bad_date.stderr
    );
}

#[test]
fn control_characters_are_stripped_from_titles() {
    let workspace = CtWorkspace::new();
    init_workspace(&workspace);

    let create = run_ct(&workspace, ["create", "line\u{1}break\ttab  end"]);
    assert!(create.status.success(), "stderr: {}", create.stderr);
    let id = parse_created_id(&create.stdout);

    let show = run_ct(&workspace, ["show", &id, "--json"]);
    let issue: Value = serde_json::from_str(&show.stdout).expect("json issue");
    assert_eq!(issue["title"], "line break tab end");
}

#[test]
fn list_filters_by_type_and_search() {
    let workspace = CtWorkspace::new();
    init_workspace(&workspace);

    let create = run_ct(
        &workspace,
        ["create", "Very unique haystack title", "--type", "story"],
    );
    let id = parse_created_id(&create.stdout);

    let search = run_ct(&workspace, ["list", "--search", "unique haystack", "--json"]);
    assert!(search.status.success(), "stderr: {}", search.stderr);
    let issues: Vec<Value> = serde_json::from_str(&search.stdout).expect("json list");
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0]["id"], id);

    let typed = run_ct(&workspace, ["list", "--type", "story", "--json"]);
    let issues: Vec<Value> = serde_json::from_str(&typed.stdout).expect("json list");
    assert!(issues.iter().all(|i| i["type"] == "Story"));
    assert!(issues.iter().any(|i| i["id"] == id.as_str()));

    let bad = run_ct(&workspace, ["list", "--type", "chore"]);
    assert!(!bad.status.success());
    assert!(
        bad.stderr.contains("Task, Bug, Story"),
        "stderr: {}",
        bad.stderr
    );
}

#[test]
fn unknown_issue_reports_not_found() {
    let workspace = CtWorkspace::new();
    init_workspace(&workspace);

    let show = run_ct(&workspace, ["show", "PROJ-999"]);
    assert!(!show.status.success());
    assert!(show.stderr.contains("PROJ-999"), "stderr: {}", show.stderr);
    assert!(show.stderr.contains("ct list"), "stderr: {}", show.stderr);
}

#[test]
fn comment_appends_and_shows() {
    let workspace = CtWorkspace::new();
    init_workspace(&workspace);

    let comment = run_ct(
        &workspace,
        ["comment", "PROJ-1", "Looks done to me", "--author", "Maria"],
    );
    assert!(comment.status.success(), "stderr: {}", comment.stderr);

    let show = run_ct(&workspace, ["show", "PROJ-1", "--json"]);
    let issue: Value = serde_json::from_str(&show.stdout).expect("json issue");
    let comments = issue["comments"].as_array().expect("comments array");
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0]["text"], "Looks done to me");
    assert_eq!(comments[0]["author"], "Maria");
}
