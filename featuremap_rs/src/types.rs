//! Records produced by a scan.
//!
//! Everything here is recomputed on every invocation and handed to callers
//! read-only. All list fields are always present in the JSON output (possibly
//! empty) so downstream renderers only ever need emptiness checks.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const CODE_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx"];
pub const COMPONENT_EXTENSIONS: &[&str] = &["tsx", "jsx", "vue", "ts", "js"];
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "svg", "webp", "ico", "avif"];
pub const STYLE_EXTENSIONS: &[&str] = &["css", "scss", "sass", "less", "styl"];
pub const TEST_SUFFIXES: &[&str] = &[".test.ts", ".test.tsx", ".spec.ts", ".spec.tsx"];

/// One file seen during traversal. Never stored in the output.
#[derive(Clone, Debug)]
pub struct FileEntry {
    pub name: String,
    pub full_path: PathBuf,
    /// Root-relative, always `/`-separated.
    pub relative_path: String,
    /// Last extension, lower-cased, without the dot.
    pub extension: String,
}

impl FileEntry {
    pub fn new(full_path: PathBuf, root: &std::path::Path) -> Self {
        let name = full_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let extension = full_path
            .extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_lowercase())
            .unwrap_or_default();
        let relative_path = full_path
            .strip_prefix(root)
            .unwrap_or(&full_path)
            .to_string_lossy()
            .replace('\\', "/");
        Self {
            name,
            full_path,
            relative_path,
            extension,
        }
    }

    /// File name up to the first dot (`Button.test.tsx` -> `Button`).
    pub fn base_name(&self) -> &str {
        self.name.split('.').next().unwrap_or(&self.name)
    }

    pub fn is_test(&self) -> bool {
        let lower = self.name.to_lowercase();
        TEST_SUFFIXES.iter().any(|suffix| lower.ends_with(suffix))
    }

    pub fn is_declaration(&self) -> bool {
        self.name.to_lowercase().ends_with(".d.ts")
    }

    pub fn has_extension(&self, allowed: &[&str]) -> bool {
        allowed.contains(&self.extension.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    React,
    Vue,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentType {
    Class,
    Functional,
    Unknown,
    /// Vue options API (`export default { ... }` / `defineComponent({ ... })`)
    Options,
    /// Vue `<script setup>` or `setup()` based component
    Composition,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplexityLevel {
    Low,
    Medium,
    High,
}

impl ComplexityLevel {
    pub fn from_score(score: usize) -> Self {
        if score < 5 {
            Self::Low
        } else if score < 15 {
            Self::Medium
        } else {
            Self::High
        }
    }

    /// Feature bucket derived from the number of components.
    pub fn from_component_count(count: usize) -> Self {
        if count > 10 {
            Self::High
        } else if count > 5 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub prop_type: String,
    pub optional: bool,
    pub description: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HookKind {
    Builtin,
    Custom,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookRecord {
    pub name: String,
    pub kind: HookKind,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodKind {
    Arrow,
    Function,
    /// Entry of a Vue `methods:` block
    Method,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodRecord {
    pub name: String,
    pub kind: MethodKind,
    #[serde(rename = "async")]
    pub is_async: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportKind {
    Relative,
    External,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRecord {
    pub source: String,
    pub kind: ImportKind,
    pub specifiers: Vec<String>,
}

impl ImportRecord {
    pub fn new(source: String, specifiers: Vec<String>) -> Self {
        let kind = if source.starts_with('.') || source.starts_with('/') {
            ImportKind::Relative
        } else {
            ImportKind::External
        };
        Self {
            source,
            kind,
            specifiers,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportKind {
    Default,
    Named,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRecord {
    pub name: String,
    pub kind: ExportKind,
    /// `const`, `function`, `class`, or `expression` for anonymous defaults
    pub declaration: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsxShape {
    pub root_tag: String,
    pub has_conditional_rendering: bool,
    pub has_list_rendering: bool,
    pub uses_fragment: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VueDetails {
    pub version: u8,
    pub template: Option<String>,
    pub script: Option<String>,
    pub style: Option<String>,
    pub data: Vec<String>,
    pub computed: Vec<String>,
    pub watchers: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentMetadata {
    pub extension: String,
    pub lines: usize,
    pub complexity_score: usize,
    pub has_default_export: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentRecord {
    pub name: String,
    pub path: String,
    pub kind: ComponentKind,
    pub component_type: ComponentType,
    pub props: Vec<PropRecord>,
    pub hooks: Vec<HookRecord>,
    pub methods: Vec<MethodRecord>,
    pub imports: Vec<ImportRecord>,
    pub exports: Vec<ExportRecord>,
    /// Class components and Vue components only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lifecycle: Option<Vec<String>>,
    /// Functional React components only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_hooks: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jsx_shape: Option<JsxShape>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vue: Option<VueDetails>,
    pub complexity: ComplexityLevel,
    pub ui_elements: Vec<UiElementMatch>,
    pub metadata: ComponentMetadata,
}

// ---------------------------------------------------------------------------
// UI elements
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConfidenceLevel {
    VeryLow,
    Low,
    Medium,
    High,
}

impl ConfidenceLevel {
    pub fn from_score(score: u32) -> Self {
        if score >= 10 {
            Self::High
        } else if score >= 5 {
            Self::Medium
        } else if score >= 2 {
            Self::Low
        } else {
            Self::VeryLow
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VeryLow => "very-low",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableFeatures {
    pub sorting: bool,
    pub pagination: bool,
    pub filtering: bool,
    pub selection: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModalSize {
    Small,
    Medium,
    Large,
    Fullscreen,
}

/// Kind-specific structural detail. Serialized untagged, so the JSON shape is
/// the bare field set of the variant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged, rename_all_fields = "camelCase")]
pub enum ElementDetails {
    Filter {
        filter_types: Vec<String>,
        search_placeholders: Vec<String>,
    },
    Button {
        actions: Vec<String>,
    },
    Table {
        columns: Vec<String>,
        features: TableFeatures,
    },
    Modal {
        triggers: Vec<String>,
        size: ModalSize,
    },
    Composite {
        description: String,
    },
    Generic {
        has_props: bool,
        has_children: bool,
        has_class_name: bool,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchMetadata {
    pub pattern_matches: usize,
    pub contextual_clues: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiElementMatch {
    #[serde(rename = "type")]
    pub element_type: String,
    /// Absent on composite entries, which only carry a fixed level.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_score: Option<u32>,
    pub confidence_level: ConfidenceLevel,
    pub instances: Vec<String>,
    pub details: ElementDetails,
    pub metadata: MatchMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub composed_of: Option<Vec<String>>,
}

impl UiElementMatch {
    pub fn is_composite(&self) -> bool {
        self.composed_of.is_some()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementStats {
    pub total: usize,
    pub by_type: BTreeMap<String, usize>,
    pub by_confidence: BTreeMap<String, usize>,
    pub composite_patterns: BTreeSet<String>,
}

// ---------------------------------------------------------------------------
// Auxiliary file records
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HookFileRecord {
    pub name: String,
    pub path: String,
    pub parameters: Vec<String>,
    pub returns: Vec<String>,
    pub dependencies: Vec<String>,
    pub uses_hooks: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRecord {
    pub name: String,
    pub path: String,
    pub exports: Vec<ExportRecord>,
    pub functions: Vec<MethodRecord>,
    pub endpoints: Vec<String>,
    pub http_methods: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeDeclarationKind {
    Interface,
    Type,
    Enum,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDeclaration {
    pub name: String,
    pub kind: TypeDeclarationKind,
    pub exported: bool,
    pub body: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeFileRecord {
    pub name: String,
    pub path: String,
    pub declarations: Vec<TypeDeclaration>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstantRecord {
    pub name: String,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigRecord {
    pub name: String,
    pub path: String,
    pub exports: Vec<ExportRecord>,
    pub constants: Vec<ConstantRecord>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestFileRecord {
    pub name: String,
    pub path: String,
    pub suites: Vec<String>,
    pub test_count: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Image,
    Style,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRecord {
    pub name: String,
    pub path: String,
    pub kind: AssetKind,
}

// ---------------------------------------------------------------------------
// Features
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureMetadata {
    pub total_files: usize,
    pub complexity: ComplexityLevel,
    pub patterns: Vec<String>,
    pub ui_patterns: Vec<String>,
}

impl Default for FeatureMetadata {
    fn default() -> Self {
        Self {
            total_files: 0,
            complexity: ComplexityLevel::Low,
            patterns: Vec::new(),
            ui_patterns: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureRecord {
    pub name: String,
    pub path: String,
    pub components: Vec<ComponentRecord>,
    pub hooks: Vec<HookFileRecord>,
    pub services: Vec<ServiceRecord>,
    pub types: Vec<TypeFileRecord>,
    pub assets: Vec<AssetRecord>,
    pub tests: Vec<TestFileRecord>,
    pub entry_point: Option<String>,
    pub config: Option<ConfigRecord>,
    /// Feature-wide UI classification, composites re-inferred over all components.
    pub ui_elements: Vec<UiElementMatch>,
    pub metadata: FeatureMetadata,
}

impl FeatureRecord {
    pub fn new(name: String, path: String) -> Self {
        Self {
            name,
            path,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn complexity_levels_follow_thresholds() {
        assert_eq!(ComplexityLevel::from_score(0), ComplexityLevel::Low);
        assert_eq!(ComplexityLevel::from_score(4), ComplexityLevel::Low);
        assert_eq!(ComplexityLevel::from_score(5), ComplexityLevel::Medium);
        assert_eq!(ComplexityLevel::from_score(14), ComplexityLevel::Medium);
        assert_eq!(ComplexityLevel::from_score(15), ComplexityLevel::High);

        assert_eq!(ComplexityLevel::from_component_count(5), ComplexityLevel::Low);
        assert_eq!(ComplexityLevel::from_component_count(6), ComplexityLevel::Medium);
        assert_eq!(ComplexityLevel::from_component_count(11), ComplexityLevel::High);
    }

    #[test]
    fn confidence_levels_follow_thresholds() {
        assert_eq!(ConfidenceLevel::from_score(1), ConfidenceLevel::VeryLow);
        assert_eq!(ConfidenceLevel::from_score(2), ConfidenceLevel::Low);
        assert_eq!(ConfidenceLevel::from_score(5), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::from_score(10), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::High.as_str(), "high");
    }

    #[test]
    fn file_entry_classifies_names() {
        let root = Path::new("/app/features");
        let entry = FileEntry::new(root.join("cart/components/Cart.test.tsx"), root);
        assert_eq!(entry.relative_path, "cart/components/Cart.test.tsx");
        assert_eq!(entry.extension, "tsx");
        assert_eq!(entry.base_name(), "Cart");
        assert!(entry.is_test());

        let decl = FileEntry::new(root.join("cart/types/api.d.ts"), root);
        assert!(decl.is_declaration());
        assert!(!decl.is_test());
    }

    #[test]
    fn feature_record_serializes_every_list() {
        let record = FeatureRecord::new("cart".into(), "features/cart".into());
        let json = serde_json::to_value(&record).expect("serialize");
        for key in [
            "components",
            "hooks",
            "services",
            "types",
            "assets",
            "tests",
            "uiElements",
        ] {
            assert!(json[key].as_array().is_some_and(|a| a.is_empty()), "{key}");
        }
        assert_eq!(json["metadata"]["complexity"], "low");
        assert_eq!(json["metadata"]["totalFiles"], 0);
    }

    #[test]
    fn composite_match_omits_score() {
        let m = UiElementMatch {
            element_type: "modal-form".into(),
            confidence_score: None,
            confidence_level: ConfidenceLevel::High,
            instances: Vec::new(),
            details: ElementDetails::Composite {
                description: "Form rendered inside a modal".into(),
            },
            metadata: MatchMetadata::default(),
            composed_of: Some(vec!["form".into(), "modal".into()]),
        };
        let json = serde_json::to_value(&m).expect("serialize");
        assert!(json.get("confidenceScore").is_none());
        assert_eq!(json["type"], "modal-form");
        assert_eq!(json["confidenceLevel"], "high");
        assert_eq!(json["composedOf"][1], "modal");
    }
}
