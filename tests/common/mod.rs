#![allow(dead_code)]

use assert_cmd::Command;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[derive(Debug)]
pub struct CtRun {
    pub stdout: String,
    pub stderr: String,
    pub status: std::process::ExitStatus,
}

pub struct CtWorkspace {
    pub temp_dir: TempDir,
    pub root: PathBuf,
}

impl CtWorkspace {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("temp dir");
        let root = temp_dir.path().to_path_buf();
        Self { temp_dir, root }
    }

    pub fn document_path(&self) -> PathBuf {
        self.root.join(".capitask").join("document.json")
    }

    pub fn prefs_path(&self) -> PathBuf {
        self.root.join(".capitask").join("prefs.json")
    }
}

pub fn run_ct<I, S>(workspace: &CtWorkspace, args: I) -> CtRun
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    run_ct_from(workspace, Path::new(""), args)
}

/// Run `ct` from a subdirectory of the workspace root (created if needed).
pub fn run_ct_from<I, S>(workspace: &CtWorkspace, subdir: &Path, args: I) -> CtRun
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let cwd = workspace.root.join(subdir);
    std::fs::create_dir_all(&cwd).expect("cwd");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("ct"));
    cmd.current_dir(&cwd);
    cmd.args(args);
    cmd.env("NO_COLOR", "1");
    cmd.env("RUST_LOG", "capitask=debug");
    cmd.env("HOME", &workspace.root);
    cmd.env_remove("LANG");

    let output = cmd.output().expect("run ct");
    CtRun {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        status: output.status,
    }
}

/// Init a workspace and assert it succeeded.
pub fn init_workspace(workspace: &CtWorkspace) {
    let run = run_ct(workspace, ["init"]);
    assert!(run.status.success(), "init failed: {}", run.stderr);
}

/// Parse the id out of a `Created PROJ-n` line.
pub fn parse_created_id(stdout: &str) -> String {
    stdout
        .lines()
        .next()
        .and_then(|line| line.strip_prefix("Created "))
        .unwrap_or("")
        .trim()
        .to_string()
}
