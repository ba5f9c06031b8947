use std::sync::OnceLock;

use regex::Regex;

fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid regex literal")
}

pub(crate) fn regex_import() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r#"(?m)^\s*import\s+(?:type\s+)?([^;]+?)\s+from\s+["']([^"']+)["']"#))
}

pub(crate) fn regex_side_effect_import() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r#"(?m)^\s*import\s+["']([^"']+)["']"#))
}

pub(crate) fn regex_export_named_decl() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        regex(r#"(?m)^\s*export\s+(?:async\s+)?(const|function|class)\s+([A-Za-z_$][\w$]*)"#)
    })
}

pub(crate) fn regex_export_default() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        regex(r#"(?m)^\s*export\s+default(?:\s+(?:async\s+)?(function|class|const)\s+([A-Za-z_$][\w$]*)|\s+([A-Za-z_$][\w$]*)\s*;?\s*$)?"#)
    })
}

// --- component name resolution --------------------------------------------

pub(crate) fn regex_default_export_decl() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        regex(r#"export\s+default\s+(?:async\s+)?(?:function|const|class)\s+([A-Za-z_$][\w$]*)"#)
    })
}

pub(crate) fn regex_function_name() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r#"\bfunction\s+([A-Za-z_$][\w$]*)\s*\("#))
}

pub(crate) fn regex_class_extends() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r#"\bclass\s+([A-Za-z_$][\w$]*)\s+extends\b"#))
}

pub(crate) fn regex_name_literal() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r#"\bname\s*:\s*["']([A-Za-z_$][\w$-]*)["']"#))
}

// --- react structure ---------------------------------------------------------

pub(crate) fn regex_component_token() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r#"\b(?:Pure)?Component\b"#))
}

pub(crate) fn regex_props_interface() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        regex(r#"\binterface\s+(?:[A-Za-z_$][\w$]*)?Props\s*(?:<[^>{]*>)?\s*(?:extends\s+[^{]+)?\{"#)
    })
}

pub(crate) fn regex_prop_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        regex(r#"^\s*(?:readonly\s+)?["']?([A-Za-z_$][\w$-]*)["']?\s*(\?)?\s*:\s*(.+?)\s*[;,]?\s*$"#)
    })
}

pub(crate) fn regex_props_destructure() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r#"\{([^{}]*)\}\s*=\s*props\b"#))
}

pub(crate) fn regex_hook_call() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r#"(?:\bReact\.|\b)(use[A-Z][\w$]*)\s*(?:<[^>()]*>)?\("#))
}

pub(crate) fn regex_hook_assignment() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r#"\b(?:const|let|var)\s+(use[A-Z][\w$]*)\s*="#))
}

pub(crate) fn regex_arrow_method() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        regex(r#"\b(?:const|let)\s+([A-Za-z_$][\w$]*)\s*(?::\s*[^=;]+?)?=\s*(?:async\s*)?(?:\([^()]*\)|[A-Za-z_$][\w$]*)\s*(?::\s*[^=;]+?)?=>"#)
    })
}

pub(crate) fn regex_function_decl() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r#"(?:\basync\s+)?\bfunction\s*\*?\s*([A-Za-z_$][\w$]*)\s*\("#))
}

pub(crate) fn regex_async_word() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r#"\basync\b"#))
}

pub(crate) fn regex_jsx_return() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r#"return\s*\(\s*<([A-Za-z][\w.]*|>)"#))
}

/// Patterns whose match counts add up to the complexity score.
pub(crate) fn complexity_regexes() -> &'static [Regex] {
    static RE: OnceLock<Vec<Regex>> = OnceLock::new();
    RE.get_or_init(|| {
        vec![
            regex(r#"\bif\s*\("#),
            // `a ? b : c` with spaces, so `age?: number` is not a ternary
            regex(r#"\s\?\s[^:;\n]*\s:\s"#),
            regex(r#"\bswitch\s*\("#),
            regex(r#"\bfor\s*\("#),
            regex(r#"\bwhile\s*\("#),
            regex(r#"\.map\("#),
            regex(r#"\.filter\("#),
            regex(r#"\buseEffect\("#),
            regex(r#"\buseState\("#),
        ]
    })
    .as_slice()
}

// --- vue ---------------------------------------------------------------------

pub(crate) fn regex_vue_template() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r#"(?s)<template[^>]*>(.*?)</template>"#))
}

pub(crate) fn regex_vue_script() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r#"(?s)<script[^>]*>(.*?)</script>"#))
}

pub(crate) fn regex_vue_style() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r#"(?s)<style[^>]*>(.*?)</style>"#))
}

pub(crate) fn regex_vue_script_setup() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r#"<script\b[^>]*\bsetup\b"#))
}

pub(crate) fn regex_vue_setup_fn() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r#"\bsetup\s*\("#))
}

fn regex_vue_option_block(option: &str) -> Regex {
    let pattern = format!(r#"\b{option}\s*:\s*([\[{{])"#);
    regex(&pattern)
}

/// Options-API block opener (`props: {`, `methods: {`, ...), one per option.
pub(crate) fn regex_vue_option(option: &str) -> Option<&'static Regex> {
    static RE: OnceLock<Vec<(&'static str, Regex)>> = OnceLock::new();
    RE.get_or_init(|| {
        ["props", "methods", "computed", "watch"]
            .into_iter()
            .map(|name| (name, regex_vue_option_block(name)))
            .collect()
    })
    .iter()
    .find(|(name, _)| *name == option)
    .map(|(_, re)| re)
}

pub(crate) fn regex_vue_define_props() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r#"defineProps\s*(?:<\s*\{|\(\s*([\[{]))"#))
}

pub(crate) fn regex_vue_data_return() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r#"\bdata\s*(?::\s*function\s*)?\(\s*\)\s*\{"#))
}

pub(crate) fn regex_vue_setup_computed() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r#"\b(?:const|let)\s+([A-Za-z_$][\w$]*)\s*=\s*computed\s*\("#))
}

pub(crate) fn regex_vue_setup_watch() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r#"\bwatch\s*\(\s*(?:\(\s*\)\s*=>\s*)?([A-Za-z_$][\w$.]*)"#))
}

// --- auxiliary files -----------------------------------------------------------

pub(crate) fn regex_hook_function_decl() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        regex(r#"(?m)^[ \t]*(?:export\s+)?(?:default\s+)?(?:async\s+)?function\s+(use[\w$]*)\s*(?:<[^>()]*>)?\(([^)]*)\)"#)
    })
}

pub(crate) fn regex_hook_arrow_decl() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        regex(r#"(?m)^[ \t]*(?:export\s+)?const\s+(use[\w$]*)\s*(?::\s*[^=]+?)?=\s*(?:async\s*)?(?:<[^>()]*>)?\(([^)]*)\)"#)
    })
}

pub(crate) fn regex_return_object() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r#"\breturn\s*([\[{])"#))
}

pub(crate) fn regex_endpoint_literal() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r#"["'`]((?:/api/|https?://)[^"'`\s]*)["'`]"#))
}

pub(crate) fn regex_http_client_call() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        regex(r#"\b(?:axios|api|http|client|request)\.(get|post|put|patch|delete)\s*(?:<[^>()]*>)?\("#)
    })
}

pub(crate) fn regex_fetch_call() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r#"\bfetch\s*\("#))
}

pub(crate) fn regex_fetch_method() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r#"\bmethod\s*:\s*["'`]([A-Za-z]+)["'`]"#))
}

pub(crate) fn regex_constant() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        regex(r#"(?m)^\s*(?:export\s+)?const\s+([A-Z][A-Z0-9_]*)\s*(?::\s*[^=]+?)?=\s*([^;\n]+)"#)
    })
}

pub(crate) fn regex_interface_decl() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        regex(r#"(?m)^\s*(export\s+)?(?:declare\s+)?interface\s+([A-Za-z_$][\w$]*)[^{]*\{"#)
    })
}

pub(crate) fn regex_type_alias_decl() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        regex(r#"(?m)^\s*(export\s+)?(?:declare\s+)?type\s+([A-Za-z_$][\w$]*)\s*(?:<[^=]*>)?\s*="#)
    })
}

pub(crate) fn regex_enum_decl() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        regex(r#"(?m)^\s*(export\s+)?(?:declare\s+)?(?:const\s+)?enum\s+([A-Za-z_$][\w$]*)\s*\{"#)
    })
}

pub(crate) fn regex_test_suite() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r#"\bdescribe(?:\.\w+)?\s*\(\s*["'`]([^"'`]+)["'`]"#))
}

pub(crate) fn regex_test_case() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r#"\b(?:it|test)(?:\.\w+)?\s*\(\s*["'`]"#))
}
