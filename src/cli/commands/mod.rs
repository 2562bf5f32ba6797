//! Command implementations.

pub mod comment;
pub mod config;
pub mod create;
pub mod export;
pub mod gantt;
pub mod init;
pub mod link;
pub mod list;
pub mod mv;
pub mod show;
pub mod sprint;
pub mod update;

use crate::config::{CliOverrides, Preferences};
use crate::error::Result;
use crate::model::Document;
use crate::storage::DocumentStore;
use chrono::Utc;

/// An opened workspace: store handle, normalized document, and stored
/// preferences.
pub(crate) struct Workspace {
    pub store: DocumentStore,
    pub doc: Document,
    pub prefs: Preferences,
}

/// Discover the workspace and load everything a command needs.
pub(crate) fn open(cli: &CliOverrides) -> Result<Workspace> {
    let dir = crate::config::discover_workspace(None, cli)?;
    let store = DocumentStore::new(&dir);
    let doc = store.load(Utc::now());
    let prefs = crate::config::load_prefs(&dir);
    Ok(Workspace { store, doc, prefs })
}
