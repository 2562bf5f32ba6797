//! Relation graph maintenance.
//!
//! Relations between issues are symmetric edges: a link of type `blocks`
//! between A and B is stored as `(B, blocks)` on A and `(A, blocks)` on B.
//! This module is the only writer of `relation_links`, which is what keeps
//! the two sides consistent.
//!
//! Both operations report whether anything changed, so callers can skip
//! the persistence write on no-ops.

use crate::model::{Document, RelationLink, RelationType};

/// Add a symmetric relation edge between two issues.
///
/// Idempotent. Self-links and links naming an unknown issue are silently
/// ignored. Returns true if either side was mutated.
pub fn link(doc: &mut Document, a: &str, b: &str, relation_type: RelationType) -> bool {
    if a == b || doc.issue(a).is_none() || doc.issue(b).is_none() {
        return false;
    }

    let mut changed = false;
    changed |= add_side(doc, a, b, relation_type);
    changed |= add_side(doc, b, a, relation_type);
    changed
}

/// Remove a symmetric relation edge between two issues.
///
/// Idempotent. Returns true if either side was mutated.
pub fn unlink(doc: &mut Document, a: &str, b: &str, relation_type: RelationType) -> bool {
    let mut changed = false;
    changed |= remove_side(doc, a, b, relation_type);
    changed |= remove_side(doc, b, a, relation_type);
    changed
}

fn add_side(doc: &mut Document, from: &str, to: &str, relation_type: RelationType) -> bool {
    let Some(issue) = doc.issue_mut(from) else {
        return false;
    };
    if issue.has_relation(to, relation_type) {
        return false;
    }
    issue.relation_links.push(RelationLink {
        target_issue_id: to.to_string(),
        relation_type,
    });
    true
}

fn remove_side(doc: &mut Document, from: &str, to: &str, relation_type: RelationType) -> bool {
    let Some(issue) = doc.issue_mut(from) else {
        return false;
    };
    let before = issue.relation_links.len();
    issue
        .relation_links
        .retain(|l| !(l.target_issue_id == to && l.relation_type == relation_type));
    issue.relation_links.len() != before
}
