//! Property-based tests for the document normalizer.
//!
//! The normalizer consumes whatever was persisted, so it must be total:
//! any JSON value in, a valid document out, with the repair invariants
//! holding regardless of input shape.

use std::collections::HashSet;

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use serde_json::{Value, json};

use capitask::model::Issue;
use capitask::normalize::{
    MAX_ISSUES, MAX_RELATION_LINKS, MAX_STORY_POINTS, MAX_TITLE_LEN, normalize_document,
};

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 27, 12, 0, 0).unwrap()
}

/// Arbitrary JSON values, a few levels deep.
fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        any::<f64>().prop_map(|f| serde_json::Number::from_f64(f)
            .map_or(Value::Null, Value::Number)),
        "\\PC{0,40}".prop_map(Value::from),
    ];
    leaf.prop_recursive(3, 32, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..8).prop_map(Value::from),
            prop::collection::hash_map("\\PC{0,12}", inner, 0..8)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

/// A document-shaped value whose field contents are still arbitrary.
fn arb_document_shape() -> impl Strategy<Value = Value> {
    (
        prop::collection::vec(arb_json(), 0..20),
        arb_json(),
        arb_json(),
        arb_json(),
    )
        .prop_map(|(issues, sprint, epics, last_id)| {
            json!({
                "issues": issues,
                "sprint": json!({"id": sprint.clone(), "name": sprint}),
                "epics": epics,
                "lastId": last_id,
            })
        })
}

fn assert_invariants(doc: &capitask::model::Document) {
    assert!(doc.issues.len() <= MAX_ISSUES);
    assert!(!doc.epics.is_empty());

    let ids: HashSet<&str> = doc.issues.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids.len(), doc.issues.len(), "issue ids are unique");

    let epic_ids: HashSet<&str> = doc.epics.iter().map(|e| e.id.as_str()).collect();
    let max_suffix = doc
        .issues
        .iter()
        .filter_map(|i| Issue::id_suffix(&i.id))
        .max()
        .unwrap_or(0);
    assert!(doc.last_id >= max_suffix, "counter dominates suffixes");

    for issue in &doc.issues {
        assert!(!issue.title.is_empty());
        assert!(issue.title.chars().count() <= MAX_TITLE_LEN);
        assert!((0..=MAX_STORY_POINTS).contains(&issue.story_points));
        assert!(!issue.reporter.is_empty());
        assert!(
            issue
                .epic_id
                .as_deref()
                .is_some_and(|id| epic_ids.contains(id)),
            "epic reference resolves"
        );
        if let Some(sprint_id) = issue.sprint_id.as_deref() {
            assert_eq!(sprint_id, doc.sprint.id);
        }

        assert!(issue.relation_links.len() <= MAX_RELATION_LINKS);
        let mut pairs = HashSet::new();
        for link in &issue.relation_links {
            assert_ne!(link.target_issue_id, issue.id, "no self links");
            assert!(
                pairs.insert((link.target_issue_id.as_str(), link.relation_type)),
                "no duplicate (target, type) pairs"
            );
        }
    }
}

proptest! {
    /// Any JSON at all: never panics, output always valid.
    #[test]
    fn normalizer_is_total(raw in arb_json()) {
        let doc = normalize_document(&raw, now());
        assert_invariants(&doc);
    }

    /// Document-shaped garbage exercises the repair paths instead of the
    /// seed fallback.
    #[test]
    fn normalizer_repairs_document_shapes(raw in arb_document_shape()) {
        let doc = normalize_document(&raw, now());
        assert_invariants(&doc);
    }

    /// Normalizing is idempotent: a normalized document re-serializes and
    /// normalizes to itself.
    #[test]
    fn normalizer_is_idempotent(raw in arb_document_shape()) {
        let first = normalize_document(&raw, now());
        let reloaded = serde_json::to_value(&first).expect("document serializes");
        let second = normalize_document(&reloaded, now());
        prop_assert_eq!(
            serde_json::to_value(&second).expect("document serializes"),
            serde_json::to_value(&first).expect("document serializes")
        );
    }
}
