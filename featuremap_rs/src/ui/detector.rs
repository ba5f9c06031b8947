//! Weighted-evidence classification of UI elements in one component.

use std::path::Path;

use tracing::{debug, warn};

use crate::analyzer::text::snippet;
use crate::error::read_source;
use crate::types::{ComponentRecord, ConfidenceLevel, MatchMetadata, UiElementMatch};

use super::catalog::{ElementCatalog, ElementSpec};
use super::composite::{dedupe_matches, infer_composites};
use super::details::{contextual_clues, extract_details};

pub const PATTERN_WEIGHT: u32 = 2;
pub const KEYWORD_WEIGHT: u32 = 1;
pub const PROP_WEIGHT: u32 = 3;

const INSTANCE_CHARS: usize = 120;

/// Scores element kinds against a [`ElementCatalog`].
///
/// Holds no state of its own; the same detector can be shared across files.
#[derive(Clone, Copy, Debug)]
pub struct UiElementDetector<'a> {
    catalog: &'a ElementCatalog,
}

impl Default for UiElementDetector<'static> {
    fn default() -> Self {
        Self::new(ElementCatalog::builtin())
    }
}

/// Raw evidence counts for one kind.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Evidence {
    pub pattern_matches: usize,
    pub keyword_matches: usize,
    pub prop_matches: usize,
    pub instances: Vec<String>,
}

impl Evidence {
    pub fn score(&self) -> u32 {
        PATTERN_WEIGHT * self.pattern_matches as u32
            + KEYWORD_WEIGHT * self.keyword_matches as u32
            + PROP_WEIGHT * self.prop_matches as u32
    }
}

impl<'a> UiElementDetector<'a> {
    pub fn new(catalog: &'a ElementCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &'a ElementCatalog {
        self.catalog
    }

    /// Classify the file at `path`. An unreadable file yields no elements.
    pub fn detect_elements(&self, path: &Path, component: &ComponentRecord) -> Vec<UiElementMatch> {
        match read_source(path) {
            Ok(source) => self.detect_in_source(&source, component),
            Err(err) => {
                warn!("skipping UI detection: {err}");
                Vec::new()
            }
        }
    }

    /// Base matches in catalog order, then composites, deduplicated.
    pub fn detect_in_source(&self, source: &str, component: &ComponentRecord) -> Vec<UiElementMatch> {
        let clues = contextual_clues(source);
        let mut matches = Vec::new();

        for spec in self.catalog.specs() {
            let evidence = gather_evidence(spec, source, component);
            let score = evidence.score();
            if score == 0 {
                continue;
            }
            debug!(
                component = %component.name,
                kind = %spec.kind,
                score,
                "ui element detected"
            );
            matches.push(UiElementMatch {
                element_type: spec.kind.clone(),
                confidence_score: Some(score),
                confidence_level: ConfidenceLevel::from_score(score),
                details: extract_details(&spec.kind, source, &evidence.instances, component),
                instances: evidence.instances,
                metadata: MatchMetadata {
                    pattern_matches: evidence.pattern_matches,
                    contextual_clues: clues.clone(),
                },
                composed_of: None,
            });
        }

        let composites = infer_composites(&matches);
        matches.extend(composites);
        dedupe_matches(matches)
    }
}

/// Pattern, keyword and corroborating-prop counts of one kind.
pub fn gather_evidence(spec: &ElementSpec, source: &str, component: &ComponentRecord) -> Evidence {
    let mut evidence = Evidence::default();
    for pattern in &spec.patterns {
        for m in pattern.find_iter(source) {
            evidence.pattern_matches += 1;
            evidence.instances.push(snippet(m.as_str(), INSTANCE_CHARS));
        }
    }
    evidence.keyword_matches = spec
        .keywords
        .iter()
        .map(|k| k.matcher.find_iter(source).count())
        .sum();
    evidence.prop_matches = component
        .props
        .iter()
        .filter(|p| spec.props.contains(&p.name))
        .count();
    evidence
}
