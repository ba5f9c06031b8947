//! Composite inference, deduplication and statistics over match lists.

use std::collections::{BTreeSet, HashSet};

use crate::types::{ConfidenceLevel, ElementDetails, ElementStats, MatchMetadata, UiElementMatch};

struct PairRule {
    kind: &'static str,
    requires: [&'static str; 2],
    level: ConfidenceLevel,
    description: &'static str,
}

const PAIR_RULES: &[PairRule] = &[
    PairRule {
        kind: "filterable-table",
        requires: ["filter", "table"],
        level: ConfidenceLevel::High,
        description: "Table with filtering controls",
    },
    PairRule {
        kind: "modal-form",
        requires: ["form", "modal"],
        level: ConfidenceLevel::High,
        description: "Form presented in a modal dialog",
    },
    PairRule {
        kind: "action-table",
        requires: ["button", "table"],
        level: ConfidenceLevel::Medium,
        description: "Table with row or bulk actions",
    },
];

const CRUD_KINDS: [&str; 4] = ["form", "table", "button", "modal"];
const CRUD_MIN: usize = 3;

fn composite(
    kind: &str,
    composed_of: Vec<String>,
    level: ConfidenceLevel,
    description: &str,
) -> UiElementMatch {
    UiElementMatch {
        element_type: kind.to_string(),
        confidence_score: None,
        confidence_level: level,
        instances: Vec::new(),
        details: ElementDetails::Composite {
            description: description.to_string(),
        },
        metadata: MatchMetadata::default(),
        composed_of: Some(composed_of),
    }
}

/// Composite patterns implied by the base kinds present in `matches`.
/// Composite entries already in the list are ignored.
pub fn infer_composites(matches: &[UiElementMatch]) -> Vec<UiElementMatch> {
    let present: HashSet<&str> = matches
        .iter()
        .filter(|m| !m.is_composite())
        .map(|m| m.element_type.as_str())
        .collect();

    let mut composites: Vec<UiElementMatch> = PAIR_RULES
        .iter()
        .filter(|rule| rule.requires.iter().all(|kind| present.contains(kind)))
        .map(|rule| {
            composite(
                rule.kind,
                rule.requires.iter().map(|k| k.to_string()).collect(),
                rule.level,
                rule.description,
            )
        })
        .collect();

    let crud: Vec<String> = CRUD_KINDS
        .iter()
        .filter(|kind| present.contains(*kind))
        .map(|kind| kind.to_string())
        .collect();
    if crud.len() >= CRUD_MIN {
        composites.push(composite(
            "crud-interface",
            crud,
            ConfidenceLevel::Medium,
            "Create, read, update and delete surface",
        ));
    }

    composites
}

/// Keep the first entry for each `(type, details)` pair, preserving order.
pub fn dedupe_matches(matches: Vec<UiElementMatch>) -> Vec<UiElementMatch> {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    matches
        .into_iter()
        .filter(|m| {
            let details = serde_json::to_string(&m.details).unwrap_or_default();
            seen.insert((m.element_type.clone(), details))
        })
        .collect()
}

/// Feature-wide list: every base match of every component, composites
/// re-inferred over the union, deduplicated.
pub fn merge_feature_elements<'a>(
    per_component: impl IntoIterator<Item = &'a [UiElementMatch]>,
) -> Vec<UiElementMatch> {
    let mut base: Vec<UiElementMatch> = per_component
        .into_iter()
        .flatten()
        .filter(|m| !m.is_composite())
        .cloned()
        .collect();
    let composites = infer_composites(&base);
    base.extend(composites);
    dedupe_matches(base)
}

pub fn element_stats(matches: &[UiElementMatch]) -> ElementStats {
    let mut stats = ElementStats {
        total: matches.len(),
        ..ElementStats::default()
    };
    let mut composites = BTreeSet::new();
    for m in matches {
        *stats.by_type.entry(m.element_type.clone()).or_insert(0) += 1;
        *stats
            .by_confidence
            .entry(m.confidence_level.as_str().to_string())
            .or_insert(0) += 1;
        if m.is_composite() {
            composites.insert(m.element_type.clone());
        }
    }
    stats.composite_patterns = composites;
    stats
}
