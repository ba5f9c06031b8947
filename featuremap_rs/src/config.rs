//! Configuration file support for featuremap.
//!
//! Loads optional `.featuremap/config.toml` from the scan root.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::Deserialize;
use tracing::warn;

use crate::error::{Result, ScanError};
use crate::ui::ElementCatalog;

pub const CONFIG_DIR: &str = ".featuremap";
pub const CONFIG_FILE: &str = "config.toml";

/// Root configuration structure
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct FeaturemapConfig {
    pub scan: ScanConfig,
    pub ui: UiConfig,
    /// Where this configuration was read from, if anywhere.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

/// How `--changed` paths select features.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeMatch {
    /// Symmetric substring containment on normalised, lower-cased paths.
    #[default]
    Loose,
    /// Path segment equal to the feature name, or a path under the feature.
    Segment,
}

/// Directory walking options.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Glob patterns matched against entry names and root-relative paths.
    pub ignore: Vec<String>,
    /// Descend into dot-directories and read dot-files.
    pub include_hidden: bool,
    pub change_match: ChangeMatch,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            ignore: ["node_modules", "dist", "build", "coverage"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            include_hidden: false,
            change_match: ChangeMatch::Loose,
        }
    }
}

/// Extensions to the built-in UI element catalog, keyed by element kind.
/// Example: `extra_keywords = { table = ["grid"] }`
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub extra_keywords: BTreeMap<String, Vec<String>>,
    pub extra_props: BTreeMap<String, Vec<String>>,
}

impl FeaturemapConfig {
    /// Load config from `.featuremap/config.toml` in the given root directory.
    /// Returns default config if file doesn't exist or is invalid.
    pub fn load(root: &Path) -> Self {
        let config_path = root.join(CONFIG_DIR).join(CONFIG_FILE);
        Self::load_from_path(&config_path)
    }

    /// Load config from a specific path, falling back to defaults.
    pub fn load_from_path(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load_strict(path) {
            Ok(config) => config,
            Err(err) => {
                warn!("{err}; using defaults");
                Self::default()
            }
        }
    }

    /// Load config from a path the user asked for explicitly: failures are
    /// errors rather than defaults.
    pub fn load_strict(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ScanError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Self = toml::from_str(&content).map_err(|e| ScanError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// Built-in catalog extended with the `[ui]` section.
    pub fn catalog(&self) -> Result<ElementCatalog> {
        let origin = self
            .source
            .clone()
            .unwrap_or_else(|| Path::new(CONFIG_DIR).join(CONFIG_FILE));
        ElementCatalog::builtin().with_overrides(
            &self.ui.extra_keywords,
            &self.ui.extra_props,
            &origin,
        )
    }

    /// Compiled `[scan] ignore` globs. Invalid patterns are skipped with a warning.
    pub fn ignore_set(&self) -> Option<GlobSet> {
        build_globset(&self.scan.ignore)
    }

    pub fn has_ui_overrides(&self) -> bool {
        !self.ui.extra_keywords.is_empty() || !self.ui.extra_props.is_empty()
    }
}

pub fn build_globset(patterns: &[String]) -> Option<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    let mut added = false;
    for pat in patterns {
        if pat.trim().is_empty() {
            continue;
        }
        match Glob::new(pat) {
            Ok(glob) => {
                builder.add(glob);
                added = true;
            }
            Err(err) => warn!("invalid ignore glob '{pat}': {err}"),
        }
    }
    if !added { None } else { builder.build().ok() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_config(root: &Path, body: &str) -> PathBuf {
        let dir = root.join(CONFIG_DIR);
        std::fs::create_dir_all(&dir).expect("create .featuremap");
        let path = dir.join(CONFIG_FILE);
        let mut file = std::fs::File::create(&path).expect("create config");
        writeln!(file, "{body}").expect("write config");
        path
    }

    #[test]
    fn test_default_config() {
        let config = FeaturemapConfig::default();
        assert_eq!(config.scan.ignore, vec!["node_modules", "dist", "build", "coverage"]);
        assert!(!config.scan.include_hidden);
        assert_eq!(config.scan.change_match, ChangeMatch::Loose);
        assert!(!config.has_ui_overrides());
        assert!(config.source.is_none());
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().expect("temp dir");
        let config = FeaturemapConfig::load(temp.path());
        assert_eq!(config.scan.ignore.len(), 4);
        assert!(config.source.is_none());
    }

    #[test]
    fn test_load_valid_config() {
        let temp = TempDir::new().expect("temp dir");
        let path = write_config(
            temp.path(),
            r#"
[scan]
ignore = ["legacy", "**/*.stories.tsx"]
include_hidden = true
change_match = "segment"

[ui.extra_keywords]
table = ["grid"]

[ui.extra_props]
modal = ["show"]
"#,
        );

        let config = FeaturemapConfig::load(temp.path());
        assert_eq!(config.scan.ignore, vec!["legacy", "**/*.stories.tsx"]);
        assert!(config.scan.include_hidden);
        assert_eq!(config.scan.change_match, ChangeMatch::Segment);
        assert!(config.has_ui_overrides());
        assert_eq!(config.source.as_deref(), Some(path.as_path()));

        let catalog = config.catalog().expect("catalog");
        let table = catalog.get("table").expect("table");
        assert!(table.keywords.iter().any(|k| k.word == "grid"));

        let ignore = config.ignore_set().expect("globs");
        assert!(ignore.is_match("legacy"));
        assert!(ignore.is_match("cart/components/Cart.stories.tsx"));
        assert!(!ignore.is_match("cart/components/Cart.tsx"));
    }

    #[test]
    fn test_load_empty_config() {
        let temp = TempDir::new().expect("temp dir");
        write_config(temp.path(), "");
        let config = FeaturemapConfig::load(temp.path());
        assert_eq!(config.scan.ignore.len(), 4);
        assert_eq!(config.scan.change_match, ChangeMatch::Loose);
    }

    #[test]
    fn test_invalid_config_falls_back_or_errors() {
        let temp = TempDir::new().expect("temp dir");
        let path = write_config(temp.path(), "[scan]\nchange_match = \"fuzzy\"\n");

        let config = FeaturemapConfig::load(temp.path());
        assert_eq!(config.scan.change_match, ChangeMatch::Loose);

        let err = FeaturemapConfig::load_strict(&path).expect_err("strict load");
        assert!(matches!(err, ScanError::Config { .. }));
        let err = FeaturemapConfig::load_strict(&temp.path().join("nope.toml")).expect_err("missing");
        assert!(matches!(err, ScanError::FileRead { .. }));
    }

    #[test]
    fn test_unknown_ui_kind_is_rejected() {
        let temp = TempDir::new().expect("temp dir");
        let path = write_config(temp.path(), "[ui.extra_props]\ncarousel = [\"slides\"]\n");
        let config = FeaturemapConfig::load_strict(&path).expect("parses");
        let err = config.catalog().expect_err("unknown kind");
        assert!(err.to_string().contains(&path.display().to_string()));
    }

    #[test]
    fn test_invalid_glob_is_skipped() {
        let set = build_globset(&["[".to_string(), "dist".to_string()]).expect("one valid glob");
        assert!(set.is_match("dist"));
        assert!(build_globset(&["  ".to_string()]).is_none());
    }
}
