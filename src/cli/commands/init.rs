use crate::config::{self, CliOverrides, Preferences};
use crate::error::{CapitaskError, Result};
use crate::normalize::seed_document;
use crate::storage::DocumentStore;
use chrono::Utc;
use std::fs;
use std::path::Path;

/// Execute the init command.
///
/// # Errors
///
/// Returns an error if the workspace already exists (without `--force`)
/// or the document cannot be written.
pub fn execute(force: bool, cli: &CliOverrides) -> Result<()> {
    let workspace = config::workspace_path(Path::new("."), cli);

    let store = DocumentStore::new(&workspace);
    if store.document_path().exists() && !force {
        return Err(CapitaskError::AlreadyInitialized {
            path: store.document_path(),
        });
    }
    if !workspace.exists() {
        fs::create_dir_all(&workspace)?;
    }

    let doc = seed_document(Utc::now());
    store.save(&doc)?;
    config::save_prefs(&workspace, &Preferences::default())?;

    println!(
        "Initialized workspace in {} ({} issues seeded)",
        workspace.display(),
        doc.issues.len()
    );
    Ok(())
}
