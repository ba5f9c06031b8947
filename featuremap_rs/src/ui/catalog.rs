//! The element-kind table: what each UI element looks like in source.
//!
//! Built once, then shared read-only. Configuration can extend a copy of the
//! built-in table with extra keywords and corroborating props, never mutate
//! the shared one.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{Result, ScanError};

/// A keyword and its word-boundary, case-insensitive matcher.
#[derive(Clone, Debug)]
pub struct Keyword {
    pub word: String,
    pub matcher: Regex,
}

impl Keyword {
    pub fn new(kind: &str, word: &str) -> Result<Self> {
        let matcher = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(word))).map_err(|source| {
            ScanError::Pattern {
                kind: kind.to_string(),
                source,
            }
        })?;
        Ok(Self {
            word: word.to_string(),
            matcher,
        })
    }
}

/// Evidence for one element kind.
#[derive(Clone, Debug)]
pub struct ElementSpec {
    pub kind: String,
    pub patterns: Vec<Regex>,
    pub keywords: Vec<Keyword>,
    /// Prop names that corroborate the kind when a component declares them.
    pub props: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct ElementCatalog {
    specs: Vec<ElementSpec>,
}

struct Builtin {
    kind: &'static str,
    patterns: &'static [&'static str],
    keywords: &'static [&'static str],
    props: &'static [&'static str],
}

const BUILTIN: &[Builtin] = &[
    Builtin {
        kind: "filter",
        patterns: &[
            r#"<input[^>]*type=["']search["']"#,
            r#"<(?:Filter|SearchBar|SearchInput|FilterBar|FilterPanel|DateRangePicker)\b"#,
            r#"\bset(?:Filter|Filters|Search|SearchTerm|Query)\s*\("#,
        ],
        keywords: &["filter", "filtering", "facet", "refine"],
        props: &[
            "onFilter",
            "onFilterChange",
            "filters",
            "filterValue",
            "onSearch",
            "searchTerm",
            "searchQuery",
        ],
    },
    Builtin {
        kind: "button",
        patterns: &[
            r#"<button\b[^>]*>[^<]*"#,
            r#"<(?:Button|IconButton|LoadingButton)\b[^>]*>[^<]*"#,
            r#"<input[^>]*type=["'](?:submit|button|reset)["'][^>]*>"#,
        ],
        keywords: &["button", "click", "submit"],
        props: &["onClick", "disabled", "variant", "size", "icon"],
    },
    Builtin {
        kind: "modal",
        patterns: &[
            r#"<(?:Modal|Dialog|Drawer|Popup)\b"#,
            r#"role=["']dialog["']"#,
            r#"\bset(?:Is)?(?:Modal)?Open\s*\("#,
        ],
        keywords: &["modal", "dialog", "popup", "overlay"],
        props: &["isOpen", "open", "onClose", "visible", "onCancel", "onOk"],
    },
    Builtin {
        kind: "form",
        patterns: &[
            r#"<form\b"#,
            r#"<(?:Form|FormField|FormItem|Field)\b"#,
            r#"\bonSubmit\s*="#,
            r#"\bhandleSubmit\s*\("#,
        ],
        keywords: &["form", "submit", "validation", "validate"],
        props: &["onSubmit", "initialValues", "validationSchema", "defaultValues"],
    },
    Builtin {
        kind: "table",
        patterns: &[
            r#"<table\b"#,
            r#"<(?:Table|DataGrid|DataTable|TableRow|TableCell)\b"#,
            r#"<(?:th|tr)\b"#,
        ],
        keywords: &["table", "column", "columns", "row", "rows"],
        props: &["columns", "rows", "data", "dataSource", "pagination", "onSort"],
    },
    Builtin {
        kind: "input",
        patterns: &[
            r#"<input\b"#,
            r#"<textarea\b"#,
            r#"<(?:Input|TextField|TextInput|Textarea)\b"#,
        ],
        keywords: &["input", "value", "placeholder"],
        props: &["value", "onChange", "placeholder", "defaultValue"],
    },
    Builtin {
        kind: "select",
        patterns: &[
            r#"<select\b"#,
            r#"<(?:Select|Dropdown|Autocomplete|Combobox)\b"#,
            r#"<option\b"#,
        ],
        keywords: &["select", "dropdown", "option", "options"],
        props: &["options", "onSelect", "multiple", "selected"],
    },
    Builtin {
        kind: "card",
        patterns: &[
            r#"<(?:Card|CardHeader|CardContent|CardBody|CardActions)\b"#,
            r#"class(?:Name)?=["'][^"']*\bcard\b"#,
        ],
        keywords: &["card"],
        props: &["title", "subtitle", "footer", "header"],
    },
    Builtin {
        kind: "navigation",
        patterns: &[
            r#"<(?:nav|Nav|Navbar|NavLink|Link|RouterLink|router-link|Menu|MenuItem|Tabs|Tab|Breadcrumbs?|Sidebar)\b"#,
            r#"\b(?:useNavigate|useRouter|useHistory)\s*\("#,
            r#"\b(?:history|router)\.push\s*\("#,
        ],
        keywords: &["navigation", "navigate", "menu", "route", "link"],
        props: &["to", "href", "items", "activeKey", "onNavigate"],
    },
    Builtin {
        kind: "loading",
        patterns: &[
            r#"<(?:Spinner|Loader|Skeleton|CircularProgress|LinearProgress|Loading)\b"#,
            r#"\b(?:isLoading|loading)\s*(?:&&|\?)"#,
        ],
        keywords: &["loading", "spinner", "skeleton"],
        props: &["loading", "isLoading"],
    },
    Builtin {
        kind: "alert",
        patterns: &[
            r#"<(?:Alert|Toast|Notification|Snackbar|Banner|Message)\b"#,
            r#"role=["']alert["']"#,
            r#"\b(?:toast|message|notification)\.(?:success|error|warning|warn|info)\s*\("#,
        ],
        keywords: &["alert", "error", "warning", "notification", "toast"],
        props: &["message", "severity", "onDismiss", "error"],
    },
];

impl ElementCatalog {
    /// The shared built-in table.
    pub fn builtin() -> &'static ElementCatalog {
        static CATALOG: OnceLock<ElementCatalog> = OnceLock::new();
        CATALOG.get_or_init(|| {
            let specs = BUILTIN
                .iter()
                .map(|b| ElementSpec {
                    kind: b.kind.to_string(),
                    patterns: b
                        .patterns
                        .iter()
                        .map(|p| Regex::new(p).expect("valid regex literal"))
                        .collect(),
                    keywords: b
                        .keywords
                        .iter()
                        .map(|w| Keyword::new(b.kind, w).expect("valid keyword literal"))
                        .collect(),
                    props: b.props.iter().map(|p| p.to_string()).collect(),
                })
                .collect();
            ElementCatalog { specs }
        })
    }

    /// A copy of this catalog with extra keywords and props merged in.
    ///
    /// `origin` names the configuration the overrides came from, for errors.
    pub fn with_overrides(
        &self,
        extra_keywords: &BTreeMap<String, Vec<String>>,
        extra_props: &BTreeMap<String, Vec<String>>,
        origin: &Path,
    ) -> Result<Self> {
        let mut catalog = self.clone();
        for (kind, words) in extra_keywords {
            let spec = catalog.spec_mut(kind, origin)?;
            for word in words {
                if spec.keywords.iter().any(|k| k.word == *word) {
                    continue;
                }
                let keyword = Keyword::new(kind, word)?;
                spec.keywords.push(keyword);
            }
        }
        for (kind, props) in extra_props {
            let spec = catalog.spec_mut(kind, origin)?;
            for prop in props {
                if !spec.props.contains(prop) {
                    spec.props.push(prop.clone());
                }
            }
        }
        Ok(catalog)
    }

    fn spec_mut(&mut self, kind: &str, origin: &Path) -> Result<&mut ElementSpec> {
        self.specs
            .iter_mut()
            .find(|s| s.kind == kind)
            .ok_or_else(|| ScanError::Config {
                path: origin.to_path_buf(),
                message: format!("unknown UI element kind '{kind}'"),
            })
    }

    pub fn specs(&self) -> &[ElementSpec] {
        &self.specs
    }

    pub fn get(&self, kind: &str) -> Option<&ElementSpec> {
        self.specs.iter().find(|s| s.kind == kind)
    }
}
