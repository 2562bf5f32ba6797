use crate::cli::ExportArgs;
use crate::config::CliOverrides;
use crate::error::Result;
use crate::format::csv;
use crate::model::Issue;
use crate::storage::write_atomic;
use std::io::{self, Write};

/// Execute the export command.
///
/// # Errors
///
/// Returns an error if the workspace is missing or the output file
/// cannot be written.
pub fn execute(args: &ExportArgs, cli: &CliOverrides) -> Result<()> {
    let ws = super::open(cli)?;
    let lang = crate::config::effective_language(&ws.prefs, cli);

    let sprint_id = ws.doc.sprint.id.as_str();
    let issues: Vec<Issue> = ws
        .doc
        .issues
        .iter()
        .filter(|i| i.sprint_id.as_deref() == Some(sprint_id))
        .cloned()
        .collect();

    let body = csv::format_csv(&issues, lang);
    match args.output {
        Some(ref path) => {
            write_atomic(path, body.as_bytes())?;
            eprintln!("Exported {} issues to {}", issues.len(), path.display());
        }
        None => {
            io::stdout().write_all(body.as_bytes())?;
        }
    }
    Ok(())
}
