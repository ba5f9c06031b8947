//! Structural extraction for one component source file.
//!
//! `.vue` files go to the Vue branch, everything else is treated as React
//! (or plain JS/TS that happens to live in a components directory).

use std::path::Path;

use tracing::{debug, warn};

use crate::error::read_source;
use crate::types::{
    ComplexityLevel, ComponentKind, ComponentMetadata, ComponentRecord, ComponentType,
    ExportKind, ExportRecord, HookKind, HookRecord, ImportRecord, JsxShape, MethodKind,
    MethodRecord,
};

use super::props::extract_props;
use super::regexes::{
    complexity_regexes, regex_arrow_method, regex_async_word, regex_class_extends,
    regex_component_token, regex_default_export_decl, regex_export_default,
    regex_export_named_decl, regex_function_decl, regex_function_name, regex_hook_assignment,
    regex_hook_call, regex_import, regex_jsx_return, regex_name_literal,
    regex_side_effect_import,
};
use super::text::{block_body, push_unique};
use super::vue::analyze_vue;

/// The ten hooks React ships with.
pub const BUILTIN_HOOKS: &[&str] = &[
    "useState",
    "useEffect",
    "useContext",
    "useReducer",
    "useCallback",
    "useMemo",
    "useRef",
    "useLayoutEffect",
    "useImperativeHandle",
    "useDebugValue",
];

pub const REACT_LIFECYCLE: &[&str] = &[
    "constructor",
    "render",
    "componentDidMount",
    "shouldComponentUpdate",
    "getSnapshotBeforeUpdate",
    "componentDidUpdate",
    "componentWillUnmount",
    "componentDidCatch",
];

/// Analyze a component file. `None` when the file cannot be read.
pub fn analyze_component(path: &Path) -> Option<ComponentRecord> {
    match read_source(path) {
        Ok(source) => Some(analyze_component_source(&source, path)),
        Err(err) => {
            warn!("skipping component: {err}");
            None
        }
    }
}

/// Analyze already-loaded source. `path` drives dispatch and name fallback.
pub fn analyze_component_source(source: &str, path: &Path) -> ComponentRecord {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();
    let name = resolve_component_name(source, path);
    debug!(component = %name, path = %path.display(), "analyzing component");

    if extension == "vue" {
        return analyze_vue(source, path, name);
    }

    let component_type = detect_react_type(source);
    let (lifecycle, custom_hooks) = match component_type {
        ComponentType::Class => (Some(lifecycle_methods(source)), None),
        ComponentType::Functional => (None, Some(custom_hooks(source))),
        _ => (None, None),
    };
    let complexity_score = complexity_score(source);
    let exports = extract_exports(source);

    ComponentRecord {
        name,
        path: path.to_string_lossy().replace('\\', "/"),
        kind: ComponentKind::React,
        component_type,
        props: extract_props(source),
        hooks: extract_hooks(source),
        methods: extract_methods(source),
        imports: extract_imports(source),
        lifecycle,
        custom_hooks,
        jsx_shape: jsx_shape(source),
        vue: None,
        complexity: ComplexityLevel::from_score(complexity_score),
        ui_elements: Vec::new(),
        metadata: ComponentMetadata {
            extension,
            lines: source.lines().count(),
            complexity_score,
            has_default_export: exports.iter().any(|e| e.kind == ExportKind::Default),
        },
        exports,
    }
}

/// File base name unless it is `index`, then the first declaration that
/// looks like the component, then the base name anyway.
pub fn resolve_component_name(source: &str, path: &Path) -> String {
    let base = base_name(path);
    if !base.is_empty() && base != "index" {
        return base;
    }

    let candidates = [
        regex_default_export_decl(),
        regex_function_name(),
        regex_class_extends(),
        regex_name_literal(),
    ];
    candidates
        .iter()
        .find_map(|re| re.captures(source).map(|caps| caps[1].to_string()))
        .unwrap_or(base)
}

pub(crate) fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy())
        .and_then(|n| n.split('.').next().map(str::to_string))
        .unwrap_or_default()
}

fn detect_react_type(source: &str) -> ComponentType {
    if regex_component_token().is_match(source) {
        ComponentType::Class
    } else if source.contains("function") || source.contains("=>") {
        ComponentType::Functional
    } else {
        ComponentType::Unknown
    }
}

/// Lifecycle methods defined as `name(...) {` in a class body.
fn lifecycle_methods(source: &str) -> Vec<String> {
    REACT_LIFECYCLE
        .iter()
        .filter(|method| defines_method(source, method))
        .map(|m| m.to_string())
        .collect()
}

fn defines_method(source: &str, method: &str) -> bool {
    source.match_indices(method).any(|(pos, _)| {
        let before_ok = source[..pos]
            .chars()
            .next_back()
            .is_none_or(|c| !(c.is_alphanumeric() || c == '_' || c == '$' || c == '.'));
        let rest = source[pos + method.len()..].trim_start();
        let Some(args) = rest.strip_prefix('(') else {
            return false;
        };
        let Some(close) = args.find(')') else {
            return false;
        };
        let after = args[close + 1..].trim_start();
        let after = match after.strip_prefix(':') {
            // return type annotation, e.g. `render(): ReactNode {`
            Some(typed) => typed.trim_start_matches(|c: char| c != '{' && c != ';' && c != '\n'),
            None => after,
        };
        before_ok && after.starts_with('{')
    })
}

pub fn extract_hooks(source: &str) -> Vec<HookRecord> {
    let mut hooks: Vec<HookRecord> = Vec::new();
    for caps in regex_hook_call().captures_iter(source) {
        let name = &caps[1];
        if hooks.iter().any(|h| h.name == name) {
            continue;
        }
        let kind = if BUILTIN_HOOKS.contains(&name) {
            HookKind::Builtin
        } else {
            HookKind::Custom
        };
        hooks.push(HookRecord {
            name: name.to_string(),
            kind,
        });
    }
    hooks
}

/// Custom hooks of a functional component.
///
/// Assigned `use*` identifiers (minus `useState`/`useEffect`) followed by
/// `use*(` call sites that are not built-in hooks. A name can appear once
/// from each pass.
pub fn custom_hooks(source: &str) -> Vec<String> {
    let mut assigned: Vec<String> = Vec::new();
    for caps in regex_hook_assignment().captures_iter(source) {
        let name = &caps[1];
        if name != "useState" && name != "useEffect" {
            push_unique(&mut assigned, name);
        }
    }

    let mut called: Vec<String> = Vec::new();
    for caps in regex_hook_call().captures_iter(source) {
        let name = &caps[1];
        if !BUILTIN_HOOKS.contains(&name) {
            push_unique(&mut called, name);
        }
    }

    assigned.extend(called);
    assigned
}

pub fn extract_methods(source: &str) -> Vec<MethodRecord> {
    let mut methods: Vec<MethodRecord> = Vec::new();
    let passes = [
        (regex_arrow_method(), MethodKind::Arrow),
        (regex_function_decl(), MethodKind::Function),
    ];
    for (re, kind) in passes {
        for caps in re.captures_iter(source) {
            let name = caps[1].to_string();
            if methods.iter().any(|m| m.name == name) {
                continue;
            }
            methods.push(MethodRecord {
                name,
                kind,
                is_async: regex_async_word().is_match(&caps[0]),
            });
        }
    }
    methods
}

pub fn jsx_shape(source: &str) -> Option<JsxShape> {
    let caps = regex_jsx_return().captures(source)?;
    let whole = caps.get(0)?;
    let tag = &caps[1];
    let root_tag = if tag == ">" {
        "Fragment".to_string()
    } else {
        tag.to_string()
    };

    let paren = whole.start() + whole.as_str().find('(')?;
    let segment = block_body(source, paren).unwrap_or(&source[paren..]);

    let uses_fragment = root_tag == "Fragment"
        || root_tag == "React.Fragment"
        || segment.contains("<>")
        || segment.contains("<Fragment")
        || segment.contains("<React.Fragment");

    Some(JsxShape {
        has_conditional_rendering: segment.contains("&&") || segment.contains(" ? "),
        has_list_rendering: segment.contains(".map("),
        uses_fragment,
        root_tag,
    })
}

/// Sum of branch/loop/iteration/hook pattern counts.
pub fn complexity_score(source: &str) -> usize {
    complexity_regexes()
        .iter()
        .map(|re| re.find_iter(source).count())
        .sum()
}

pub fn extract_imports(source: &str) -> Vec<ImportRecord> {
    let mut imports = Vec::new();
    for caps in regex_import().captures_iter(source) {
        imports.push(ImportRecord::new(
            caps[2].to_string(),
            import_specifiers(&caps[1]),
        ));
    }
    for caps in regex_side_effect_import().captures_iter(source) {
        imports.push(ImportRecord::new(caps[1].to_string(), Vec::new()));
    }
    imports
}

fn import_specifiers(clause: &str) -> Vec<String> {
    let clause = clause.trim();
    let mut specifiers = Vec::new();
    let (head, braced) = match (clause.find('{'), clause.rfind('}')) {
        (Some(open), Some(close)) if open < close => {
            (&clause[..open], Some(&clause[open + 1..close]))
        }
        _ => (clause, None),
    };
    for part in head.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        specifiers.push(part.split_whitespace().collect::<Vec<_>>().join(" "));
    }
    if let Some(list) = braced {
        specifiers.extend(super::brace_list_to_names(list));
    }
    specifiers
}

pub fn extract_exports(source: &str) -> Vec<ExportRecord> {
    let mut exports = Vec::new();
    if let Some(caps) = regex_export_default().captures(source) {
        let (name, declaration) = match (caps.get(1), caps.get(2), caps.get(3)) {
            (Some(decl), Some(name), _) => (name.as_str().to_string(), decl.as_str().to_string()),
            (_, _, Some(ident)) => (ident.as_str().to_string(), "expression".to_string()),
            _ => ("default".to_string(), "expression".to_string()),
        };
        exports.push(ExportRecord {
            name,
            kind: ExportKind::Default,
            declaration,
        });
    }
    for caps in regex_export_named_decl().captures_iter(source) {
        exports.push(ExportRecord {
            name: caps[2].to_string(),
            kind: ExportKind::Named,
            declaration: caps[1].to_string(),
        });
    }
    exports
}
