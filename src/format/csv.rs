//! CSV export of sprint issues.
//!
//! Every cell is quote-wrapped with inner quotes doubled, and cells that
//! start with a spreadsheet formula prefix are neutralized with a leading
//! apostrophe so an exported title like `=1+1` cannot execute on import.

use crate::i18n::Language;
use crate::model::Issue;
use std::io::{self, Write};

/// Cell prefixes that spreadsheets interpret as formulas.
pub const FORMULA_PREFIXES: [char; 4] = ['=', '+', '-', '@'];

/// Escape a single CSV cell.
///
/// Always quote-wraps; doubles inner quotes; prefixes formula-looking
/// values with an apostrophe.
#[must_use]
pub fn escape_cell(value: &str) -> String {
    let neutralized = if value.starts_with(FORMULA_PREFIXES) {
        format!("'{value}")
    } else {
        value.to_string()
    };
    format!("\"{}\"", neutralized.replace('"', "\"\""))
}

/// Format a single issue as an export row.
#[must_use]
pub fn format_issue_row(issue: &Issue, lang: Language) -> String {
    [
        issue.id.as_str(),
        issue.title.as_str(),
        lang.issue_type_label(issue.issue_type),
        lang.status_label(issue.status),
        &issue.story_points.to_string(),
        issue.assignee.as_str(),
    ]
    .iter()
    .map(|cell| escape_cell(cell))
    .collect::<Vec<_>>()
    .join(",")
}

/// Write issues as CSV to the given writer.
pub fn write_csv<W: Write>(writer: &mut W, issues: &[Issue], lang: Language) -> io::Result<()> {
    let header = lang
        .csv_headers()
        .iter()
        .map(|cell| escape_cell(cell))
        .collect::<Vec<_>>()
        .join(",");
    writeln!(writer, "{header}")?;
    for issue in issues {
        writeln!(writer, "{}", format_issue_row(issue, lang))?;
    }
    Ok(())
}

/// Format issues as a complete CSV string.
///
/// # Panics
///
/// Panics if writing to the in-memory buffer fails (which should not happen).
#[must_use]
pub fn format_csv(issues: &[Issue], lang: Language) -> String {
    let mut output = Vec::new();
    write_csv(&mut output, issues, lang).expect("writing to Vec should not fail");
    String::from_utf8_lossy(&output).into_owned()
}
