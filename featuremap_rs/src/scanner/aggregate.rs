//! Feature-level summaries computed once all files are classified.

use std::collections::HashMap;

use crate::types::{ComplexityLevel, ComponentRecord, FeatureRecord};
use crate::ui::merge_feature_elements;

const CRUD_WORDS: [&str; 5] = ["create", "edit", "list", "view", "delete"];
const CRUD_MIN_COMPONENTS: usize = 2;

/// Fill complexity, pattern tags and the feature-wide UI element list.
pub fn finalize(record: &mut FeatureRecord) {
    record.metadata.complexity = ComplexityLevel::from_component_count(record.components.len());
    record.metadata.patterns = architecture_patterns(record);
    record.ui_elements =
        merge_feature_elements(record.components.iter().map(|c| c.ui_elements.as_slice()));
    record.metadata.ui_patterns = ui_patterns(&record.components);
}

/// Architectural tags, in fixed order.
pub fn architecture_patterns(record: &FeatureRecord) -> Vec<String> {
    let crud_components = record
        .components
        .iter()
        .filter(|c| {
            let lower = c.name.to_lowercase();
            CRUD_WORDS.iter().any(|w| lower.contains(w))
        })
        .count();

    [
        (!record.hooks.is_empty(), "Custom Hooks"),
        (!record.services.is_empty(), "Service Layer"),
        (!record.types.is_empty(), "Type Definitions"),
        (!record.tests.is_empty(), "Unit Tests"),
        (crud_components >= CRUD_MIN_COMPONENTS, "CRUD"),
    ]
    .into_iter()
    .filter(|(present, _)| *present)
    .map(|(_, tag)| tag.to_string())
    .collect()
}

/// UI tags from element counts summed over every component's own list.
pub fn ui_patterns(components: &[ComponentRecord]) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for element in components.iter().flat_map(|c| &c.ui_elements) {
        *counts.entry(element.element_type.as_str()).or_insert(0) += 1;
    }
    let count = |kind: &str| counts.get(kind).copied().unwrap_or(0);

    [
        (count("filter") >= 2, "Data Filtering"),
        (count("table") >= 1, "Data Tables"),
        (count("form") >= 2, "Form Management"),
        (count("modal") + count("dialog") >= 1, "Modal Dialogs"),
        (count("button") >= 5, "Action-Heavy Interface"),
    ]
    .into_iter()
    .filter(|(present, _)| *present)
    .map(|(_, tag)| tag.to_string())
    .collect()
}
