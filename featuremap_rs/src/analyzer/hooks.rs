//! Custom hook files (`hooks/useCart.ts` and friends).

use std::path::Path;

use tracing::warn;

use crate::error::read_source;
use crate::types::HookFileRecord;

use super::component::{base_name, extract_hooks, extract_imports};
use super::regexes::{regex_hook_arrow_decl, regex_hook_function_decl, regex_return_object};
use super::text::{
    block_body, comment_above, object_keys, offset_to_line, parameter_names, split_top_level,
};

/// Imports that say nothing about what a hook depends on.
const FRAMEWORK_CORES: &[&str] = &["react", "vue", "react-dom"];

pub fn analyze_hook_file(path: &Path) -> Option<HookFileRecord> {
    match read_source(path) {
        Ok(source) => Some(analyze_hook_source(&source, path)),
        Err(err) => {
            warn!("skipping hook file: {err}");
            None
        }
    }
}

pub fn analyze_hook_source(source: &str, path: &Path) -> HookFileRecord {
    let declaration = [regex_hook_function_decl(), regex_hook_arrow_decl()]
        .iter()
        .filter_map(|re| re.captures(source))
        .min_by_key(|caps| caps.get(0).map(|m| m.start()).unwrap_or(usize::MAX));

    let (name, parameters, description, returns) = match declaration {
        Some(caps) => {
            let whole = caps.get(0).map(|m| (m.start(), m.end())).unwrap_or_default();
            let lines: Vec<&str> = source.lines().collect();
            let decl_line = offset_to_line(source, whole.0 + leading_ws(&source[whole.0..])) - 1;
            (
                caps[1].to_string(),
                parameter_names(&caps[2]),
                comment_above(&lines, decl_line, 0),
                returned_keys(source, whole.1),
            )
        }
        None => (base_name(path), Vec::new(), None, Vec::new()),
    };

    let dependencies = extract_imports(source)
        .into_iter()
        .map(|import| import.source)
        .filter(|source| !FRAMEWORK_CORES.contains(&source.as_str()))
        .collect();

    let uses_hooks = extract_hooks(source)
        .into_iter()
        .map(|hook| hook.name)
        .filter(|hook| *hook != name)
        .collect();

    HookFileRecord {
        name,
        path: path.to_string_lossy().replace('\\', "/"),
        parameters,
        returns,
        dependencies,
        uses_hooks,
        description,
    }
}

fn leading_ws(text: &str) -> usize {
    text.len() - text.trim_start().len()
}

/// Keys (object) or names (tuple) of the last `return {`/`return [` in the
/// body that follows the declaration ending at `decl_end`.
fn returned_keys(source: &str, decl_end: usize) -> Vec<String> {
    let Some(open) = source[decl_end..].find('{').map(|idx| decl_end + idx) else {
        return Vec::new();
    };
    let Some(body) = block_body(source, open) else {
        return Vec::new();
    };
    let Some(caps) = regex_return_object().captures_iter(body).last() else {
        return Vec::new();
    };
    let Some(bracket) = caps.get(1) else {
        return Vec::new();
    };
    let Some(inner) = block_body(body, bracket.start()) else {
        return Vec::new();
    };
    if bracket.as_str() == "{" {
        object_keys(inner)
    } else {
        split_top_level(inner, b',')
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn function_hook_with_description() {
        let src = r#"
import { useState, useEffect } from 'react';
import { fetchCart } from '../services/cartService';
import debounce from 'lodash/debounce';

/**
 * Loads the cart and keeps it fresh.
 */
export function useCart(userId: string, { poll = false }: Options = {}) {
  const [items, setItems] = useState<Item[]>([]);
  useEffect(() => {
    fetchCart(userId).then(setItems);
    return () => {};
  }, [userId]);
  const refresh = useRefresh();
  return { items, refresh, count: items.length };
}
"#;
        let record = analyze_hook_source(src, Path::new("hooks/useCart.ts"));
        assert_eq!(record.name, "useCart");
        assert_eq!(record.parameters, vec!["userId", "{ poll = false }"]);
        assert_eq!(record.returns, vec!["items", "refresh", "count"]);
        assert_eq!(record.dependencies, vec!["../services/cartService", "lodash/debounce"]);
        assert_eq!(record.uses_hooks, vec!["useState", "useEffect", "useRefresh"]);
        assert_eq!(record.description.as_deref(), Some("Loads the cart and keeps it fresh."));
    }

    #[test]
    fn arrow_hook_returning_tuple() {
        let src = r#"
// Boolean toggle
export const useToggle = (initial = false) => {
  const [on, setOn] = useState(initial);
  const toggle = useCallback(() => setOn(v => !v), []);
  return [on, toggle] as const;
};
"#;
        let record = analyze_hook_source(src, Path::new("useToggle.ts"));
        assert_eq!(record.name, "useToggle");
        assert_eq!(record.parameters, vec!["initial"]);
        assert_eq!(record.returns, vec!["on", "toggle"]);
        assert_eq!(record.description.as_deref(), Some("Boolean toggle"));
        assert!(record.dependencies.is_empty());
    }

    #[test]
    fn file_without_declaration_uses_base_name() {
        let record = analyze_hook_source("export default {};", Path::new("x/hookHelpers.js"));
        assert_eq!(record.name, "hookHelpers");
        assert!(record.parameters.is_empty());
        assert!(record.description.is_none());
    }

    #[test]
    fn missing_file_is_none() {
        assert!(analyze_hook_file(Path::new("/no/such/useThing.ts")).is_none());
    }
}
