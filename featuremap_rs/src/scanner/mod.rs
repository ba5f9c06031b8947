//! Feature discovery.
//!
//! Every immediate subdirectory of the scan root is one feature. Its tree is
//! walked once: well-known directories (`components`, `hooks`, `services`,
//! `types`, `__tests__`, `tests`) go to dedicated sub-scans, anything else is
//! recursed into, and loose files are routed by name and extension.

pub mod aggregate;
pub mod changes;
mod classify;

use std::path::{Path, PathBuf};

use globset::GlobSet;
use tracing::{debug, info, warn};

use crate::config::{ChangeMatch, FeaturemapConfig};
use crate::error::{Result, ScanError};
use crate::types::FeatureRecord;
use crate::ui::UiElementDetector;

use classify::FeatureWalk;

pub struct FeatureScanner<'a> {
    detector: UiElementDetector<'a>,
    ignore: Option<GlobSet>,
    include_hidden: bool,
    change_match: ChangeMatch,
}

impl Default for FeatureScanner<'static> {
    fn default() -> Self {
        Self::new(UiElementDetector::default(), &FeaturemapConfig::default())
    }
}

impl<'a> FeatureScanner<'a> {
    pub fn new(detector: UiElementDetector<'a>, config: &FeaturemapConfig) -> Self {
        Self {
            detector,
            ignore: config.ignore_set(),
            include_hidden: config.scan.include_hidden,
            change_match: config.scan.change_match,
        }
    }

    /// Scan `root`. With `changed`, only features touched by one of the
    /// paths are included. A missing root yields an empty list.
    pub fn scan(&self, root: &Path, changed: Option<&[String]>) -> Vec<FeatureRecord> {
        if !root.is_dir() {
            debug!(root = %root.display(), "scan root missing, nothing to do");
            return Vec::new();
        }
        let entries = match list_dir(root) {
            Ok(entries) => entries,
            Err(err) => {
                warn!("{err}");
                return Vec::new();
            }
        };

        let mut features = Vec::new();
        for dir in entries.into_iter().filter(|p| p.is_dir()) {
            let name = file_name(&dir);
            if self.is_skipped(&name, &name) {
                debug!(feature = %name, "skipping ignored directory");
                continue;
            }
            let path = normalized(&dir);
            if let Some(changed) = changed {
                if !changes::feature_selected(self.change_match, &name, &path, changed) {
                    debug!(feature = %name, "unchanged, skipped");
                    continue;
                }
            }

            let mut record = FeatureRecord::new(name, path);
            FeatureWalk::new(self, root, &mut record).walk_dir(&dir);
            aggregate::finalize(&mut record);
            debug!(
                feature = %record.name,
                components = record.components.len(),
                files = record.metadata.total_files,
                "feature scanned"
            );
            features.push(record);
        }

        sort_features(&mut features);
        info!(root = %root.display(), features = features.len(), "scan complete");
        features
    }

    /// Hidden entries (unless enabled) and entries matching an ignore glob
    /// by name or root-relative path.
    fn is_skipped(&self, name: &str, relative: &str) -> bool {
        if !self.include_hidden && name.starts_with('.') {
            return true;
        }
        self.ignore
            .as_ref()
            .is_some_and(|set| set.is_match(name) || set.is_match(relative))
    }
}

/// Scan with the built-in catalog and default configuration.
pub fn scan_features(root: &Path, changed: Option<&[String]>) -> Vec<FeatureRecord> {
    FeatureScanner::default().scan(root, changed)
}

/// Ascending by name, case-insensitively, ties broken by the exact name.
pub fn sort_features(features: &mut [FeatureRecord]) {
    features.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
    });
}

/// Directory entries sorted by lower-cased file name.
fn list_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    let read = std::fs::read_dir(dir).map_err(|source| ScanError::DirectoryRead {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut entries: Vec<PathBuf> = read.filter_map(|e| e.ok()).map(|e| e.path()).collect();
    entries.sort_by_key(|p| file_name(p).to_lowercase());
    Ok(entries)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn normalized(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    use crate::types::ComplexityLevel;

    fn write(root: &Path, relative: &str, body: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        fs::write(path, body).expect("write fixture");
    }

    fn names(features: &[FeatureRecord]) -> Vec<&str> {
        features.iter().map(|f| f.name.as_str()).collect()
    }

    const FORM: &str = r#"
export default function EditForm({ onSubmit }) {
  return (<form onSubmit={handleSubmit(onSubmit)}><input name="title" /></form>);
}
"#;

    const MODAL: &str = r#"
export default function ConfirmModal({ isOpen, onClose }) {
  return (<Modal open={isOpen} onClose={onClose}>Sure?</Modal>);
}
"#;

    #[test]
    fn missing_root_is_empty() {
        let features = scan_features(Path::new("/definitely/not/a/root"), None);
        assert!(features.is_empty());
    }

    #[test]
    fn root_without_subdirectories_is_empty() {
        let temp = TempDir::new().expect("temp dir");
        write(temp.path(), "README.md", "# nothing here");
        assert!(scan_features(temp.path(), None).is_empty());
    }

    #[test]
    fn form_and_modal_components_compose_a_modal_form() {
        let temp = TempDir::new().expect("temp dir");
        write(temp.path(), "posts/components/EditForm.tsx", FORM);
        write(temp.path(), "posts/components/ConfirmModal.tsx", MODAL);

        let features = scan_features(temp.path(), None);
        assert_eq!(names(&features), vec!["posts"]);
        let feature = &features[0];
        assert_eq!(feature.components.len(), 2);

        let modal_form = feature
            .ui_elements
            .iter()
            .find(|m| m.element_type == "modal-form")
            .expect("modal-form composite");
        assert_eq!(modal_form.confidence_level, crate::types::ConfidenceLevel::High);
        assert!(feature.metadata.ui_patterns.contains(&"Modal Dialogs".to_string()));
    }

    #[test]
    fn features_sorted_case_insensitively() {
        let temp = TempDir::new().expect("temp dir");
        for name in ["orders", "Billing", "cart", "Accounts"] {
            write(temp.path(), &format!("{name}/index.ts"), "export {};");
        }
        let features = scan_features(temp.path(), None);
        assert_eq!(names(&features), vec!["Accounts", "Billing", "cart", "orders"]);
        assert!(features.iter().all(|f| f.entry_point.is_some()));
    }

    #[test]
    fn incremental_scan_filters_features() {
        let temp = TempDir::new().expect("temp dir");
        write(temp.path(), "user/components/UserCard.tsx", "export const UserCard = () => null;");
        write(temp.path(), "superuser/index.ts", "export {};");
        write(temp.path(), "billing/index.ts", "export {};");

        let changed = vec!["src/superuser/index.ts".to_string()];
        let loose = scan_features(temp.path(), Some(&changed));
        assert_eq!(names(&loose), vec!["superuser", "user"]);

        let config: FeaturemapConfig =
            toml::from_str("[scan]\nchange_match = \"segment\"").expect("config");
        let scanner = FeatureScanner::new(UiElementDetector::default(), &config);
        let segment = scanner.scan(temp.path(), Some(&changed));
        assert_eq!(names(&segment), vec!["superuser"]);

        assert!(scan_features(temp.path(), Some(&[])).is_empty());
    }

    #[test]
    fn ignored_and_hidden_directories_are_skipped() {
        let temp = TempDir::new().expect("temp dir");
        write(temp.path(), "node_modules/pkg/index.js", "module.exports = {};");
        write(temp.path(), ".cache/index.ts", "export {};");
        write(temp.path(), "cart/dist/bundle.js", "var a;");
        write(temp.path(), "cart/index.ts", "export {};");

        let features = scan_features(temp.path(), None);
        assert_eq!(names(&features), vec!["cart"]);
        assert_eq!(features[0].metadata.total_files, 1);
    }

    #[test]
    fn unreadable_component_is_skipped() {
        let temp = TempDir::new().expect("temp dir");
        write(temp.path(), "shop/components/Good.tsx", "export const Good = () => <div/>;");
        let broken = temp.path().join("shop/components/Broken.tsx");
        fs::write(&broken, [0xff, 0xfe, 0xfd]).expect("write bytes");

        let features = scan_features(temp.path(), None);
        let shop = &features[0];
        let components: Vec<_> = shop.components.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(components, vec!["Good"]);
        assert_eq!(shop.metadata.total_files, 2);
        assert_eq!(shop.metadata.complexity, ComplexityLevel::Low);
    }
}
