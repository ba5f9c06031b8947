//! Kind-specific detail extraction and contextual clues.

use std::sync::OnceLock;

use regex::Regex;

use crate::analyzer::text::{push_unique, snippet};
use crate::types::{ComponentRecord, ElementDetails, ModalSize, TableFeatures};

const MAX_COLUMNS: usize = 5;
const MAX_TRIGGERS: usize = 5;

fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid regex literal")
}

macro_rules! cached_regex {
    ($name:ident, $pattern:expr) => {
        fn $name() -> &'static Regex {
            static RE: OnceLock<Regex> = OnceLock::new();
            RE.get_or_init(|| regex($pattern))
        }
    };
}

cached_regex!(regex_filter_search, r#"(?i)type=["']search["']|\bsearch"#);
cached_regex!(
    regex_filter_date,
    r#"(?i)type=["'](?:date|datetime-local)["']|DatePicker|DateRange"#
);
cached_regex!(regex_filter_select, r#"<(?:select|Select)\b"#);
cached_regex!(regex_filter_checkbox, r#"type=["']checkbox["']|<Checkbox\b"#);
cached_regex!(regex_placeholder, r#"placeholder=["']([^"']*)["']"#);

cached_regex!(
    regex_column_key,
    r#"\b(?:dataIndex|accessorKey|field|key)\s*:\s*["']([\w.]+)["']"#
);
cached_regex!(regex_th_text, r#"<th\b[^>]*>\s*([^<{]+?)\s*</th>"#);
cached_regex!(regex_sorting, r#"(?i)sort"#);
cached_regex!(regex_pagination, r#"(?i)paginat"#);
cached_regex!(regex_filtering, r#"(?i)filter"#);
cached_regex!(regex_selection, r#"(?i)select(?:ed|ion)|checkbox"#);

cached_regex!(
    regex_modal_trigger,
    r#"\bset\w*(?:Open|Visible|Show)\w*\(\s*true\s*\)|onClick=\{[^}]*(?i:open|show)[^}]*\}"#
);
cached_regex!(regex_size_fullscreen, r#"(?i)\bfull-?screen\b"#);
cached_regex!(
    regex_size_large,
    r#"(?i)\b(?:size|maxWidth)=["'{]+(?:lg|large|xl)["'}]"#
);
cached_regex!(regex_size_small, r#"(?i)\bsize=["'{]+(?:sm|small|xs)["'}]"#);

/// Structural detail for one reported kind.
pub(crate) fn extract_details(
    kind: &str,
    source: &str,
    instances: &[String],
    component: &ComponentRecord,
) -> ElementDetails {
    match kind {
        "filter" => filter_details(source),
        "button" => button_details(instances),
        "table" => table_details(source),
        "modal" => modal_details(source),
        _ => ElementDetails::Generic {
            has_props: !component.props.is_empty(),
            has_children: source.contains("children"),
            has_class_name: source.contains("className"),
        },
    }
}

fn filter_details(source: &str) -> ElementDetails {
    let checks = [
        ("search", regex_filter_search()),
        ("date", regex_filter_date()),
        ("select", regex_filter_select()),
        ("checkbox", regex_filter_checkbox()),
    ];
    let filter_types = checks
        .iter()
        .filter(|(_, re)| re.is_match(source))
        .map(|(name, _)| name.to_string())
        .collect();

    let mut search_placeholders = Vec::new();
    for caps in regex_placeholder().captures_iter(source) {
        let text = &caps[1];
        if text.to_lowercase().contains("search") {
            push_unique(&mut search_placeholders, text);
        }
    }

    ElementDetails::Filter {
        filter_types,
        search_placeholders,
    }
}

fn button_details(instances: &[String]) -> ElementDetails {
    let mut actions = Vec::new();
    for instance in instances {
        let lower = instance.to_lowercase();
        let action = if lower.contains("submit") {
            "submit"
        } else if lower.contains("delete") || lower.contains("remove") {
            "delete"
        } else if lower.contains("save") {
            "save"
        } else if lower.contains("cancel") {
            "cancel"
        } else {
            "action"
        };
        push_unique(&mut actions, action);
    }
    ElementDetails::Button { actions }
}

fn table_details(source: &str) -> ElementDetails {
    let mut columns = Vec::new();
    for caps in regex_column_key().captures_iter(source) {
        push_unique(&mut columns, &caps[1]);
    }
    if columns.is_empty() {
        for caps in regex_th_text().captures_iter(source) {
            push_unique(&mut columns, caps[1].trim());
        }
    }
    columns.truncate(MAX_COLUMNS);

    ElementDetails::Table {
        columns,
        features: TableFeatures {
            sorting: regex_sorting().is_match(source),
            pagination: regex_pagination().is_match(source),
            filtering: regex_filtering().is_match(source),
            selection: regex_selection().is_match(source),
        },
    }
}

fn modal_details(source: &str) -> ElementDetails {
    let mut triggers = Vec::new();
    for m in regex_modal_trigger().find_iter(source) {
        if triggers.len() == MAX_TRIGGERS {
            break;
        }
        push_unique(&mut triggers, snippet(m.as_str(), 80));
    }

    let size = if regex_size_fullscreen().is_match(source) {
        ModalSize::Fullscreen
    } else if regex_size_large().is_match(source) {
        ModalSize::Large
    } else if regex_size_small().is_match(source) {
        ModalSize::Small
    } else {
        ModalSize::Medium
    };

    ElementDetails::Modal { triggers, size }
}

const ECOSYSTEM_CLUES: &[(&str, &[&str])] = &[
    (
        "form-library",
        &["react-hook-form", "formik", "yup", "zod", "vee-validate"],
    ),
    (
        "ui-kit",
        &[
            "@mui/material",
            "antd",
            "@chakra-ui",
            "react-bootstrap",
            "@headlessui",
            "@radix-ui",
            "vuetify",
            "element-plus",
        ],
    ),
    (
        "table-library",
        &["@tanstack/react-table", "react-table", "ag-grid", "@mui/x-data-grid"],
    ),
];

const BEHAVIOR_CLUES: &[(&str, &[&str])] = &[
    (
        "state-management",
        &["useState", "useReducer", "redux", "zustand", "pinia", "ref(", "reactive("],
    ),
    ("side-effects", &["useEffect", "watch(", "onMounted"]),
    ("async-operations", &["async ", "await ", "fetch(", "axios", ".then("]),
];

/// Ecosystem fingerprints (`ui-kit:antd`) followed by behavioural ones
/// (`state-management`), each at most once.
pub(crate) fn contextual_clues(source: &str) -> Vec<String> {
    let mut clues = Vec::new();
    for (category, needles) in ECOSYSTEM_CLUES {
        for needle in *needles {
            if mentions_module(source, needle) {
                push_unique(&mut clues, format!("{category}:{needle}"));
            }
        }
    }
    for (clue, needles) in BEHAVIOR_CLUES {
        if needles.iter().any(|needle| source.contains(needle)) {
            push_unique(&mut clues, *clue);
        }
    }
    clues
}

/// `needle` appears as a quoted module specifier or a prefix of one.
fn mentions_module(source: &str, needle: &str) -> bool {
    ['\'', '"'].iter().any(|quote| {
        let exact = format!("{quote}{needle}{quote}");
        let nested = format!("{quote}{needle}/");
        source.contains(&exact) || source.contains(&nested)
    })
}
