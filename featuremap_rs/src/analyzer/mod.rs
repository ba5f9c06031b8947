//! Per-file structural extraction.
//!
//! - [`component`] - React/JS components, dispatching `.vue` files to [`vue`]
//! - [`props`] - `*Props` interfaces and destructured props
//! - [`hooks`] - custom hook files
//! - [`modules`] - services, type declarations, config constants and test files
//!
//! Every extractor is a pure function of the file text; the `analyze_*`
//! wrappers read the file, log a warning and return `None` when that fails.

pub mod component;
pub mod hooks;
pub mod modules;
pub mod props;
pub(crate) mod regexes;
pub(crate) mod text;
pub mod vue;

pub use component::{analyze_component, analyze_component_source};
pub use hooks::analyze_hook_file;
pub use modules::{analyze_config_file, analyze_service_file, analyze_test_file, analyze_type_file};

/// Local names bound by an import brace list: `a, b as c, type D` -> `a, c, D`.
pub(super) fn brace_list_to_names(raw: &str) -> Vec<String> {
    raw.split(',')
        .filter_map(|item| {
            let trimmed = item.trim();
            if trimmed.is_empty() {
                return None;
            }
            let trimmed = trimmed.strip_prefix("type ").unwrap_or(trimmed).trim();
            if let Some((_, alias)) = trimmed.split_once(" as ") {
                Some(alias.trim().to_string())
            } else {
                Some(trimmed.to_string())
            }
        })
        .collect()
}
