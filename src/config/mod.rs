//! Workspace discovery and persisted preferences.
//!
//! A capitask workspace is a `.capitask` directory discovered by walking
//! up from the current directory (or pinned by `--data`). Next to the
//! document it holds a small prefs file: interface language and the
//! backlog view mode. Preferences are as untrusted as the document, so
//! loading them also never fails.

use crate::error::{CapitaskError, Result};
use crate::i18n::Language;
use crate::storage::write_atomic;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Workspace directory name.
pub const WORKSPACE_DIR: &str = ".capitask";
/// Preferences file name inside the workspace directory.
pub const PREFS_FILE: &str = "prefs.json";

/// Global CLI overrides applied on top of discovery and preferences.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    /// Explicit workspace directory (skips discovery).
    pub data: Option<PathBuf>,
    /// Explicit interface language for this invocation.
    pub lang: Option<Language>,
}

/// How the backlog is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Board,
    List,
}

impl ViewMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Board => "board",
            Self::List => "list",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = CapitaskError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "board" => Ok(Self::Board),
            "list" => Ok(Self::List),
            other => Err(CapitaskError::validation(
                "viewMode",
                format!("unknown view mode '{other}' (expected board or list)"),
            )),
        }
    }
}

/// Persisted user preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    /// Interface language; `None` defers to the environment locale.
    pub language: Option<Language>,
    pub view_mode: ViewMode,
}

/// Find the workspace directory.
///
/// An explicit `--data` path wins; otherwise walk up from `start` (the
/// current directory when `None`) looking for a `.capitask` directory.
/// The start is resolved to an absolute path first, so the walk can
/// actually ascend past a relative cwd.
pub fn discover_workspace(start: Option<&Path>, overrides: &CliOverrides) -> Result<PathBuf> {
    if let Some(dir) = &overrides.data {
        if dir.is_dir() {
            return Ok(dir.clone());
        }
        return Err(CapitaskError::NotInitialized);
    }

    let mut current = match start {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir()?,
    };

    loop {
        let candidate = current.join(WORKSPACE_DIR);
        if candidate.is_dir() {
            return Ok(candidate);
        }
        if !current.pop() {
            break;
        }
    }
    Err(CapitaskError::NotInitialized)
}

/// The workspace directory `ct init` would create under `base`.
#[must_use]
pub fn workspace_path(base: &Path, overrides: &CliOverrides) -> PathBuf {
    overrides
        .data
        .clone()
        .unwrap_or_else(|| base.join(WORKSPACE_DIR))
}

/// Load preferences, falling back to defaults on any problem.
#[must_use]
pub fn load_prefs(workspace: &Path) -> Preferences {
    let path = workspace.join(PREFS_FILE);
    match std::fs::read_to_string(&path) {
        Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
            tracing::warn!(path = %path.display(), error = %err, "prefs corrupted, using defaults");
            Preferences::default()
        }),
        Err(_) => Preferences::default(),
    }
}

/// Persist preferences atomically.
pub fn save_prefs(workspace: &Path, prefs: &Preferences) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(prefs)?;
    write_atomic(&workspace.join(PREFS_FILE), &bytes)?;
    Ok(())
}

/// Effective language for an invocation: CLI flag, then stored
/// preference, then the `LANG` environment locale, then English.
#[must_use]
pub fn effective_language(prefs: &Preferences, overrides: &CliOverrides) -> Language {
    if let Some(lang) = overrides.lang {
        return lang;
    }
    let env_locale = std::env::var("LANG").ok();
    Language::resolve(prefs.language, env_locale.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn discovery_walks_up() {
        let temp = TempDir::new().unwrap();
        let workspace = temp.path().join(WORKSPACE_DIR);
        std::fs::create_dir_all(&workspace).unwrap();
        let nested = temp.path().join("a/b/c");
        std::fs::create_dir_all(&nested).unwrap();

        let found = discover_workspace(Some(&nested), &CliOverrides::default()).unwrap();
        assert_eq!(found, workspace);
    }

    #[test]
    fn discovery_fails_without_workspace() {
        let temp = TempDir::new().unwrap();
        let err = discover_workspace(Some(temp.path()), &CliOverrides::default()).unwrap_err();
        assert!(matches!(err, CapitaskError::NotInitialized));
    }

    #[test]
    fn explicit_data_dir_wins() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("elsewhere");
        std::fs::create_dir_all(&dir).unwrap();
        let overrides = CliOverrides {
            data: Some(dir.clone()),
            lang: None,
        };
        assert_eq!(
            discover_workspace(Some(temp.path()), &overrides).unwrap(),
            dir
        );
    }

    #[test]
    fn prefs_roundtrip_and_fallback() {
        let temp = TempDir::new().unwrap();
        let prefs = Preferences {
            language: Some(Language::Ru),
            view_mode: ViewMode::List,
        };
        save_prefs(temp.path(), &prefs).unwrap();
        assert_eq!(load_prefs(temp.path()), prefs);

        std::fs::write(temp.path().join(PREFS_FILE), "{broken").unwrap();
        assert_eq!(load_prefs(temp.path()), Preferences::default());
    }

    #[test]
    fn prefs_wire_format_is_camel_case() {
        let prefs = Preferences {
            language: Some(Language::En),
            view_mode: ViewMode::List,
        };
        let json = serde_json::to_string(&prefs).unwrap();
        assert!(json.contains("\"viewMode\":\"list\""));
        assert!(json.contains("\"language\":\"en\""));
    }
}
