//! Single-file component extraction.
//!
//! Both the Options API (`props:`, `data()`, `methods:`, `computed:`,
//! `watch:`) and `<script setup>` (`defineProps`, `computed(`, `watch(`) are
//! read from the first `<script>` block.

use std::path::Path;

use crate::types::{
    ComplexityLevel, ComponentKind, ComponentMetadata, ComponentRecord, ComponentType,
    ExportKind, MethodKind, MethodRecord, PropRecord, VueDetails,
};

use super::component::{
    complexity_score, extract_exports, extract_hooks, extract_imports, extract_methods,
};
use super::props::props_from_type_body;
use super::regexes::{
    regex_return_object, regex_vue_data_return, regex_vue_define_props, regex_vue_option,
    regex_vue_script, regex_vue_script_setup, regex_vue_setup_computed, regex_vue_setup_fn,
    regex_vue_setup_watch, regex_vue_style, regex_vue_template,
};
use super::text::{
    block_body, contains_word, entry_key, object_keys, push_unique, split_top_level,
};

pub const VUE_LIFECYCLE: &[&str] = &[
    "beforeCreate",
    "created",
    "beforeMount",
    "mounted",
    "beforeUpdate",
    "updated",
    "beforeUnmount",
    "unmounted",
];

pub(crate) fn analyze_vue(source: &str, path: &Path, name: String) -> ComponentRecord {
    let template = first_block(regex_vue_template(), source);
    let script = first_block(regex_vue_script(), source);
    let style = first_block(regex_vue_style(), source);
    let body = script.as_deref().unwrap_or("");

    let is_setup = regex_vue_script_setup().is_match(source);
    let version = if is_setup || source.contains("defineComponent") {
        3
    } else {
        2
    };
    let component_type = if is_setup || regex_vue_setup_fn().is_match(body) {
        ComponentType::Composition
    } else {
        ComponentType::Options
    };

    let lifecycle = VUE_LIFECYCLE
        .iter()
        .filter(|hook| contains_word(body, hook))
        .map(|hook| hook.to_string())
        .collect();

    let mut computed = option_keys(body, "computed");
    for caps in regex_vue_setup_computed().captures_iter(body) {
        push_unique(&mut computed, &caps[1]);
    }
    let mut watchers = option_keys(body, "watch");
    for caps in regex_vue_setup_watch().captures_iter(body) {
        push_unique(&mut watchers, &caps[1]);
    }

    let score = complexity_score(body);
    let exports = extract_exports(body);
    let props = vue_props(body);
    let hooks = extract_hooks(body);
    let methods = vue_methods(body);
    let imports = extract_imports(body);
    let data = data_keys(body);

    ComponentRecord {
        name,
        path: path.to_string_lossy().replace('\\', "/"),
        kind: ComponentKind::Vue,
        component_type,
        props,
        hooks,
        methods,
        imports,
        lifecycle: Some(lifecycle),
        custom_hooks: None,
        jsx_shape: None,
        vue: Some(VueDetails {
            version,
            template,
            script,
            style,
            data,
            computed,
            watchers,
        }),
        complexity: ComplexityLevel::from_score(score),
        ui_elements: Vec::new(),
        metadata: ComponentMetadata {
            extension: "vue".to_string(),
            lines: source.lines().count(),
            complexity_score: score,
            has_default_export: exports.iter().any(|e| e.kind == ExportKind::Default),
        },
        exports,
    }
}

fn first_block(re: &regex::Regex, source: &str) -> Option<String> {
    re.captures(source)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Body of an Options-API block such as `methods: { ... }`.
fn option_block<'a>(script: &'a str, option: &str) -> Option<&'a str> {
    let caps = regex_vue_option(option)?.captures(script)?;
    block_body(script, caps.get(1)?.start())
}

fn option_keys(script: &str, option: &str) -> Vec<String> {
    option_block(script, option)
        .map(object_keys)
        .unwrap_or_default()
}

/// Value part of `key: value`, if the entry has one.
fn entry_value(entry: &str) -> Option<&str> {
    let key_end = entry.find([':', '(', '{'])?;
    entry[key_end..].strip_prefix(':').map(str::trim)
}

/// Top-level keys of the object returned from `data() { return { ... } }`.
fn data_keys(script: &str) -> Vec<String> {
    let Some(m) = regex_vue_data_return().find(script) else {
        return Vec::new();
    };
    let Some(function_body) = block_body(script, m.end() - 1) else {
        return Vec::new();
    };
    let Some(caps) = regex_return_object().captures(function_body) else {
        return Vec::new();
    };
    let Some(open) = caps.get(1).filter(|g| g.as_str() == "{") else {
        return Vec::new();
    };
    block_body(function_body, open.start())
        .map(object_keys)
        .unwrap_or_default()
}

fn vue_props(script: &str) -> Vec<PropRecord> {
    if let Some(caps) = regex_vue_define_props().captures(script) {
        let whole = caps.get(0).map(|m| m.end()).unwrap_or_default();
        let props = match caps.get(1) {
            Some(open) => block_body(script, open.start())
                .map(|body| declared_props(body, open.as_str() == "["))
                .unwrap_or_default(),
            None => block_body(script, whole - 1)
                .map(props_from_type_body)
                .unwrap_or_default(),
        };
        if !props.is_empty() {
            return props;
        }
    }

    let Some(caps) = regex_vue_option("props").and_then(|re| re.captures(script)) else {
        return Vec::new();
    };
    let Some(open) = caps.get(1) else {
        return Vec::new();
    };
    block_body(script, open.start())
        .map(|body| declared_props(body, open.as_str() == "["))
        .unwrap_or_default()
}

/// Props from `['a', 'b']` or `{ a: String, b: { type: Number, required: true } }`.
fn declared_props(body: &str, is_array: bool) -> Vec<PropRecord> {
    let mut props: Vec<PropRecord> = Vec::new();
    for entry in split_top_level(body, b',') {
        let Some(name) = entry_key(entry) else {
            continue;
        };
        if props.iter().any(|p| p.name == name) {
            continue;
        }
        let (prop_type, required) = if is_array {
            ("unknown".to_string(), false)
        } else {
            entry_value(entry).map(prop_shape).unwrap_or(("unknown".to_string(), false))
        };
        props.push(PropRecord {
            name,
            prop_type,
            optional: !required,
            description: String::new(),
        });
    }
    props
}

/// Type name and `required` flag of one object-form prop value.
fn prop_shape(value: &str) -> (String, bool) {
    if value.starts_with('{') {
        let Some(inner) = block_body(value, 0) else {
            return ("unknown".to_string(), false);
        };
        let mut prop_type = "unknown".to_string();
        let mut required = false;
        for entry in split_top_level(inner, b',') {
            match (entry_key(entry).as_deref(), entry_value(entry)) {
                (Some("type"), Some(v)) => prop_type = constructor_list(v),
                (Some("required"), Some(v)) => required = v == "true",
                _ => {}
            }
        }
        (prop_type, required)
    } else {
        (constructor_list(value), false)
    }
}

/// `String` stays as is, `[String, Number]` becomes `String | Number`.
fn constructor_list(value: &str) -> String {
    match value.strip_prefix('[').and_then(|v| v.strip_suffix(']')) {
        Some(list) => split_top_level(list, b',').join(" | "),
        None => value.to_string(),
    }
}

fn vue_methods(script: &str) -> Vec<MethodRecord> {
    let mut methods: Vec<MethodRecord> = Vec::new();
    if let Some(body) = option_block(script, "methods") {
        for entry in split_top_level(body, b',') {
            let Some(name) = entry_key(entry) else {
                continue;
            };
            if methods.iter().any(|m| m.name == name) {
                continue;
            }
            let is_async = entry.trim_start().starts_with("async")
                || entry_value(entry).is_some_and(|v| v.starts_with("async"));
            methods.push(MethodRecord {
                name,
                kind: MethodKind::Method,
                is_async,
            });
        }
    }
    for method in extract_methods(script) {
        if !methods.iter().any(|m| m.name == method.name) {
            methods.push(method);
        }
    }
    methods
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::component::analyze_component_source;

    const OPTIONS_SFC: &str = r#"<template>
  <div class="user-list">
    <input v-model="query" placeholder="Search users" />
  </div>
</template>

<script>
export default {
  name: 'user-list',
  props: {
    users: { type: Array, required: true },
    pageSize: Number,
    label: [String, Number],
  },
  data() {
    const seed = { ignored: true };
    return {
      query: '',
      page: 1,
    };
  },
  computed: {
    filtered() {
      return this.users.filter(u => u.name.includes(this.query));
    },
    total() { return this.users.length; },
  },
  watch: {
    query(value) { this.page = 1; },
    'page'(value) {},
  },
  methods: {
    async reload() { await this.$emit('reload'); },
    reset() { this.query = ''; },
  },
  mounted() {
    this.reload();
  },
  beforeUnmount() {},
};
</script>

<style scoped>
.user-list { display: flex; }
</style>
"#;

    #[test]
    fn options_api_is_extracted() {
        let record = analyze_component_source(OPTIONS_SFC, Path::new("features/users/UserList.vue"));
        assert_eq!(record.name, "UserList");
        assert_eq!(record.kind, ComponentKind::Vue);
        assert_eq!(record.component_type, ComponentType::Options);
        assert!(record.custom_hooks.is_none());
        assert!(record.jsx_shape.is_none());

        let props: Vec<_> = record
            .props
            .iter()
            .map(|p| (p.name.as_str(), p.prop_type.as_str(), p.optional))
            .collect();
        assert_eq!(
            props,
            vec![
                ("users", "Array", false),
                ("pageSize", "Number", true),
                ("label", "String | Number", true),
            ]
        );

        let vue = record.vue.expect("vue details");
        assert_eq!(vue.version, 2);
        assert_eq!(vue.data, vec!["query", "page"]);
        assert_eq!(vue.computed, vec!["filtered", "total"]);
        assert_eq!(vue.watchers, vec!["query", "page"]);
        assert!(vue.template.as_deref().is_some_and(|t| t.contains("user-list")));
        assert!(vue.style.as_deref().is_some_and(|s| s.contains("display: flex")));
        assert!(vue.script.as_deref().is_some_and(|s| s.contains("export default")));

        let methods: Vec<_> = record
            .methods
            .iter()
            .map(|m| (m.name.as_str(), m.is_async))
            .collect();
        assert_eq!(methods, vec![("reload", true), ("reset", false)]);

        assert_eq!(
            record.lifecycle.as_deref(),
            Some(&["mounted".to_string(), "beforeUnmount".to_string()][..])
        );
        assert!(record.metadata.has_default_export);
    }

    #[test]
    fn script_setup_is_composition() {
        let src = r#"<script setup lang="ts">
import { ref, computed, watch, onMounted } from 'vue';
import { useCartStore } from '@/stores/cart';

const props = defineProps<{
  // Items in the cart
  items: CartItem[];
  currency?: string;
}>();

const store = useCartStore();
const open = ref(false);
const total = computed(() => props.items.length);
watch(open, (value) => console.log(value));
watch(() => props.currency, () => {});
const toggle = () => { open.value = !open.value; };
onMounted(() => store.load());
</script>

<template><button @click="toggle">{{ total }}</button></template>
"#;
        let record = analyze_component_source(src, Path::new("CartButton.vue"));
        assert_eq!(record.component_type, ComponentType::Composition);
        let vue = record.vue.as_ref().expect("vue details");
        assert_eq!(vue.version, 3);
        assert!(vue.style.is_none());
        assert_eq!(vue.computed, vec!["total"]);
        assert_eq!(vue.watchers, vec!["open", "props.currency"]);
        assert!(vue.data.is_empty());

        assert_eq!(record.props.len(), 2);
        assert_eq!(record.props[0].name, "items");
        assert_eq!(record.props[0].prop_type, "CartItem[]");
        assert_eq!(record.props[0].description, "Items in the cart");
        assert!(record.props[1].optional);

        assert!(record.methods.iter().any(|m| m.name == "toggle"));
        assert!(record.hooks.iter().any(|h| h.name == "useCartStore"));
        assert_eq!(record.lifecycle.as_deref(), Some(&[][..]));
    }

    #[test]
    fn define_props_call_forms() {
        let array = "<script setup>\nconst props = defineProps(['title', 'subtitle'])\n</script>";
        let names: Vec<_> = vue_props(array).into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["title", "subtitle"]);

        let object = "<script setup>\ndefineProps({ visible: { type: Boolean, required: true } })\n</script>";
        let props = vue_props(object);
        assert_eq!(props[0].name, "visible");
        assert_eq!(props[0].prop_type, "Boolean");
        assert!(!props[0].optional);
    }

    #[test]
    fn define_component_is_version_three() {
        let src = "<script>\nimport { defineComponent } from 'vue';\nexport default defineComponent({\n  setup() { return {}; },\n});\n</script>";
        let record = analyze_component_source(src, Path::new("Panel.vue"));
        assert_eq!(record.vue.map(|v| v.version), Some(3));
        assert_eq!(record.component_type, ComponentType::Composition);
    }

    #[test]
    fn empty_sfc_degrades_to_empty_lists() {
        let record = analyze_component_source("<template><div/></template>", Path::new("Empty.vue"));
        assert!(record.props.is_empty());
        assert!(record.methods.is_empty());
        let vue = record.vue.expect("vue details");
        assert!(vue.script.is_none());
        assert!(vue.data.is_empty() && vue.computed.is_empty() && vue.watchers.is_empty());
    }
}
