use crate::cli::RelationArgs;
use crate::config::CliOverrides;
use crate::error::{CapitaskError, Result};
use crate::model::RelationType;
use crate::relations;
use std::str::FromStr;

/// Execute the link command.
///
/// # Errors
///
/// Returns an error if either issue is unknown, the relation type is
/// invalid, or the document cannot be written.
pub fn link(args: &RelationArgs, cli: &CliOverrides) -> Result<()> {
    let relation = RelationType::from_str(&args.relation_type)?;
    let mut ws = super::open(cli)?;

    ensure_known(&ws.doc, &args.a)?;
    ensure_known(&ws.doc, &args.b)?;
    if args.a == args.b {
        return Err(CapitaskError::validation(
            "target",
            "cannot link an issue to itself",
        ));
    }

    if relations::link(&mut ws.doc, &args.a, &args.b, relation) {
        ws.store.save(&ws.doc)?;
        println!("{} <-{relation}-> {}", args.a, args.b);
    } else {
        println!("{} and {} are already linked ({relation})", args.a, args.b);
    }
    Ok(())
}

/// Execute the unlink command.
///
/// # Errors
///
/// Returns an error if either issue is unknown, the relation type is
/// invalid, or the document cannot be written.
pub fn unlink(args: &RelationArgs, cli: &CliOverrides) -> Result<()> {
    let relation = RelationType::from_str(&args.relation_type)?;
    let mut ws = super::open(cli)?;

    ensure_known(&ws.doc, &args.a)?;
    ensure_known(&ws.doc, &args.b)?;

    if relations::unlink(&mut ws.doc, &args.a, &args.b, relation) {
        ws.store.save(&ws.doc)?;
        println!("Removed {relation} link between {} and {}", args.a, args.b);
    } else {
        println!("No {relation} link between {} and {}", args.a, args.b);
    }
    Ok(())
}

fn ensure_known(doc: &crate::model::Document, id: &str) -> Result<()> {
    if doc.issue(id).is_none() {
        return Err(CapitaskError::IssueNotFound { id: id.to_string() });
    }
    Ok(())
}
