use crate::config::CliOverrides;
use crate::error::{CapitaskError, Result};
use crate::model::Status;
use std::str::FromStr;

/// Execute the move command.
///
/// # Errors
///
/// Returns an error if the issue or status is unknown, or the document
/// cannot be written.
pub fn execute(id: &str, status: &str, cli: &CliOverrides) -> Result<()> {
    let status = Status::from_str(status)?;
    let mut ws = super::open(cli)?;

    let issue = ws
        .doc
        .issue_mut(id)
        .ok_or_else(|| CapitaskError::IssueNotFound { id: id.to_string() })?;
    issue.status = status;

    ws.store.save(&ws.doc)?;
    println!("{id} -> {status}");
    Ok(())
}
