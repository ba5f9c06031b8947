//! Routing of a feature's files to the analyzers.

use std::cmp::Ordering;
use std::path::Path;

use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::analyzer::{
    analyze_component_source, analyze_config_file, analyze_hook_file, analyze_service_file,
    analyze_test_file, analyze_type_file,
};
use crate::error::read_source;
use crate::types::{
    AssetKind, AssetRecord, CODE_EXTENSIONS, COMPONENT_EXTENSIONS, FeatureRecord, FileEntry,
    IMAGE_EXTENSIONS, STYLE_EXTENSIONS,
};

use super::{FeatureScanner, list_dir, normalized};

const HOOK_EXTENSIONS: &[&str] = &["ts", "tsx", "js"];
const SERVICE_EXTENSIONS: &[&str] = &["ts", "js"];
const LOOSE_COMPONENT_EXTENSIONS: &[&str] = &["tsx", "jsx", "vue"];

/// Directories with a dedicated sub-scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Section {
    Components,
    Hooks,
    Services,
    Types,
    Tests,
}

impl Section {
    fn from_dir_name(name: &str) -> Option<Self> {
        match name {
            "components" => Some(Self::Components),
            "hooks" => Some(Self::Hooks),
            "services" => Some(Self::Services),
            "types" => Some(Self::Types),
            "__tests__" | "tests" => Some(Self::Tests),
            _ => None,
        }
    }
}

/// One pass over a feature directory, filling `record`.
pub(super) struct FeatureWalk<'s, 'a> {
    scanner: &'s FeatureScanner<'a>,
    root: &'s Path,
    record: &'s mut FeatureRecord,
}

impl<'s, 'a> FeatureWalk<'s, 'a> {
    pub(super) fn new(
        scanner: &'s FeatureScanner<'a>,
        root: &'s Path,
        record: &'s mut FeatureRecord,
    ) -> Self {
        Self {
            scanner,
            root,
            record,
        }
    }

    pub(super) fn walk_dir(&mut self, dir: &Path) {
        let entries = match list_dir(dir) {
            Ok(entries) => entries,
            Err(err) => {
                warn!("{err}");
                return;
            }
        };

        for path in entries {
            let entry = FileEntry::new(path, self.root);
            if self.scanner.is_skipped(&entry.name, &entry.relative_path) {
                debug!(path = %entry.relative_path, "skipped");
                continue;
            }
            let file_type = match std::fs::symlink_metadata(&entry.full_path) {
                Ok(meta) => meta.file_type(),
                Err(err) => {
                    warn!("cannot stat {}: {err}", entry.full_path.display());
                    continue;
                }
            };
            if file_type.is_symlink() {
                debug!(path = %entry.relative_path, "symlink not followed");
                continue;
            }
            if file_type.is_dir() {
                match Section::from_dir_name(&entry.name) {
                    Some(section) => self.scan_section(section, &entry.full_path),
                    None => self.walk_dir(&entry.full_path),
                }
            } else if file_type.is_file() {
                self.record.metadata.total_files += 1;
                self.route_loose_file(&entry);
            }
        }
    }

    fn scan_section(&mut self, section: Section, dir: &Path) {
        for entry in self.section_files(dir) {
            self.record.metadata.total_files += 1;
            match section {
                Section::Components => self.route_component_file(&entry),
                Section::Hooks => {
                    if entry.is_test() {
                        self.add_test(&entry);
                    } else if is_hook_file(&entry) {
                        self.add_hook(&entry);
                    }
                }
                Section::Services => {
                    if entry.is_test() {
                        self.add_test(&entry);
                    } else if entry.has_extension(SERVICE_EXTENSIONS) {
                        self.add_service(&entry);
                    }
                }
                Section::Types => {
                    if entry.extension == "ts" && !entry.is_test() {
                        self.add_types(&entry);
                    }
                }
                Section::Tests => {
                    if entry.is_test() {
                        self.add_test(&entry);
                    }
                }
            }
        }
    }

    /// Every file below `dir`, sorted, with skipped entries pruned.
    fn section_files(&self, dir: &Path) -> Vec<FileEntry> {
        let scanner = self.scanner;
        let root = self.root;
        let walker = WalkDir::new(dir)
            .follow_links(false)
            .sort_by(by_lowercase_name)
            .into_iter()
            .filter_entry(|e| {
                if e.depth() == 0 {
                    return true;
                }
                let entry = FileEntry::new(e.path().to_path_buf(), root);
                !scanner.is_skipped(&entry.name, &entry.relative_path)
            });

        let mut files = Vec::new();
        for item in walker {
            let item = match item {
                Ok(item) => item,
                Err(err) => {
                    warn!("walk error under {}: {err}", dir.display());
                    continue;
                }
            };
            if item.file_type().is_file() {
                files.push(FileEntry::new(item.into_path(), root));
            }
        }
        files
    }

    fn route_component_file(&mut self, entry: &FileEntry) {
        if entry.is_test() {
            self.add_test(entry);
        } else if entry.has_extension(COMPONENT_EXTENSIONS) && !entry.is_declaration() {
            self.add_component(entry);
        } else if let Some(kind) = asset_kind(entry) {
            self.add_asset(entry, kind);
        }
    }

    /// First matching rule wins: test, entry point, asset, config,
    /// component, hook. Anything else is only counted.
    fn route_loose_file(&mut self, entry: &FileEntry) {
        if entry.is_test() {
            self.add_test(entry);
            return;
        }
        if entry.base_name() == "index" && entry.has_extension(CODE_EXTENSIONS) {
            if self.record.entry_point.is_none() {
                self.record.entry_point = Some(normalized(&entry.full_path));
            }
            return;
        }
        if let Some(kind) = asset_kind(entry) {
            self.add_asset(entry, kind);
            return;
        }
        if is_config_file(entry) {
            if self.record.config.is_none() {
                self.record.config = analyze_config_file(&entry.full_path);
            }
            return;
        }
        if entry.has_extension(LOOSE_COMPONENT_EXTENSIONS) {
            self.add_component(entry);
            return;
        }
        if entry.has_extension(SERVICE_EXTENSIONS) && entry.name.starts_with("use") {
            self.add_hook(entry);
        }
    }

    fn add_component(&mut self, entry: &FileEntry) {
        let source = match read_source(&entry.full_path) {
            Ok(source) => source,
            Err(err) => {
                warn!("skipping component: {err}");
                return;
            }
        };
        let mut component = analyze_component_source(&source, &entry.full_path);
        component.ui_elements = self.scanner.detector.detect_in_source(&source, &component);
        self.record.components.push(component);
    }

    fn add_hook(&mut self, entry: &FileEntry) {
        if let Some(hook) = analyze_hook_file(&entry.full_path) {
            self.record.hooks.push(hook);
        }
    }

    fn add_service(&mut self, entry: &FileEntry) {
        if let Some(service) = analyze_service_file(&entry.full_path) {
            self.record.services.push(service);
        }
    }

    fn add_types(&mut self, entry: &FileEntry) {
        if let Some(types) = analyze_type_file(&entry.full_path) {
            self.record.types.push(types);
        }
    }

    fn add_test(&mut self, entry: &FileEntry) {
        if let Some(test) = analyze_test_file(&entry.full_path) {
            self.record.tests.push(test);
        }
    }

    fn add_asset(&mut self, entry: &FileEntry, kind: AssetKind) {
        self.record.assets.push(AssetRecord {
            name: entry.name.clone(),
            path: normalized(&entry.full_path),
            kind,
        });
    }
}

fn by_lowercase_name(a: &DirEntry, b: &DirEntry) -> Ordering {
    a.file_name()
        .to_string_lossy()
        .to_lowercase()
        .cmp(&b.file_name().to_string_lossy().to_lowercase())
}

fn asset_kind(entry: &FileEntry) -> Option<AssetKind> {
    if entry.has_extension(IMAGE_EXTENSIONS) {
        Some(AssetKind::Image)
    } else if entry.has_extension(STYLE_EXTENSIONS) {
        Some(AssetKind::Style)
    } else {
        None
    }
}

fn is_hook_file(entry: &FileEntry) -> bool {
    let lower = entry.name.to_lowercase();
    entry.has_extension(HOOK_EXTENSIONS) && (entry.name.starts_with("use") || lower.contains("hook"))
}

/// `config` or `constant` in the name without its last extension, so
/// `cart.config.ts` qualifies.
fn is_config_file(entry: &FileEntry) -> bool {
    let base = entry
        .full_path
        .file_stem()
        .map(|s| s.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    entry.has_extension(CODE_EXTENSIONS) && (base.contains("config") || base.contains("constant"))
}
