//! # featuremap
//!
//! **Feature-oriented structural map of a front-end** for documentation tooling.
//!
//! Every immediate subdirectory of a features root is treated as one feature.
//! Its files are classified into components, hooks, services, type
//! definitions, tests, assets, an entry point and a config module. Each
//! component is analyzed with lightweight regex heuristics (props, hooks,
//! methods, imports, exports, complexity) and scored against a catalog of UI
//! element kinds (filter, table, modal, ...), from which composite patterns
//! such as `filterable-table` are inferred.
//!
//! No parsing and no type checking: results are approximate by design and
//! meant for generated documentation, not for refactoring.
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust,no_run
//! use featuremap::scan_features;
//! use std::path::Path;
//!
//! let features = scan_features(Path::new("src/features"), None);
//! for feature in &features {
//!     println!("{}: {} components", feature.name, feature.components.len());
//! }
//! ```
//!
//! ## Single Component
//!
//! ```rust,no_run
//! use featuremap::{UiElementDetector, analyze_component};
//! use std::path::Path;
//!
//! let path = Path::new("src/features/cart/components/CartList.tsx");
//! if let Some(component) = analyze_component(path) {
//!     let elements = UiElementDetector::default().detect_elements(path, &component);
//!     println!("{} -> {} UI elements", component.name, elements.len());
//! }
//! ```
//!
//! ## CLI Usage
//!
//! ```bash
//! featuremap scan src/features                 # JSON array of features
//! featuremap scan src/features --changed src/features/cart/index.ts
//! featuremap scan src/features --stats         # per-feature UI statistics
//! featuremap component src/App.tsx             # one component record
//! ```

/// Per-file analyzers: components (React and Vue), hook files, services,
/// type modules, config modules and test files.
pub mod analyzer;

/// Optional `.featuremap/config.toml`.
pub mod config;

pub mod error;

/// Directory walk, file routing and feature-level aggregation.
pub mod scanner;

/// Output records.
pub mod types;

/// UI element catalog, detector and composite inference.
pub mod ui;

pub use analyzer::{analyze_component, analyze_component_source};
pub use config::FeaturemapConfig;
pub use error::{Result, ScanError};
pub use scanner::{FeatureScanner, scan_features};
pub use types::{ComponentRecord, FeatureRecord, UiElementMatch};
pub use ui::{ElementCatalog, UiElementDetector};
