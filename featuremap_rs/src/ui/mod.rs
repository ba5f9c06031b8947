//! UI element classification.
//!
//! A component is scored against every kind in the [`ElementCatalog`]:
//! `2 x pattern matches + 1 x keyword matches + 3 x corroborating props`.
//! Kinds scoring above zero are reported with a confidence level, composite
//! patterns are inferred from co-occurring kinds, and the list is
//! deduplicated by `(type, details)`.

pub mod catalog;
pub mod composite;
mod details;
pub mod detector;

pub use catalog::{ElementCatalog, ElementSpec};
pub use composite::{dedupe_matches, element_stats, infer_composites, merge_feature_elements};
pub use detector::UiElementDetector;
