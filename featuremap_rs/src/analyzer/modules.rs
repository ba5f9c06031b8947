//! Lightweight analyzers for the non-component files of a feature.

use std::path::Path;

use tracing::warn;

use crate::error::read_source;
use crate::types::{
    ConfigRecord, ConstantRecord, ServiceRecord, TestFileRecord, TypeDeclaration,
    TypeDeclarationKind, TypeFileRecord,
};

use super::component::{base_name, extract_exports, extract_methods};
use super::regexes::{
    regex_constant, regex_endpoint_literal, regex_enum_decl, regex_fetch_call,
    regex_fetch_method, regex_http_client_call, regex_interface_decl, regex_test_case,
    regex_test_suite, regex_type_alias_decl,
};
use super::text::{block_body, matching_close, push_unique, snippet};

fn normalized(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Read `path` and run `analyze`, logging and skipping unreadable files.
fn with_source<T>(path: &Path, what: &str, analyze: impl FnOnce(&str) -> T) -> Option<T> {
    match read_source(path) {
        Ok(source) => Some(analyze(&source)),
        Err(err) => {
            warn!("skipping {what}: {err}");
            None
        }
    }
}

// --- services ------------------------------------------------------------------

pub fn analyze_service_file(path: &Path) -> Option<ServiceRecord> {
    with_source(path, "service", |source| analyze_service_source(source, path))
}

pub fn analyze_service_source(source: &str, path: &Path) -> ServiceRecord {
    let mut endpoints = Vec::new();
    for caps in regex_endpoint_literal().captures_iter(source) {
        push_unique(&mut endpoints, &caps[1]);
    }

    let mut http_methods = Vec::new();
    for caps in regex_http_client_call().captures_iter(source) {
        push_unique(&mut http_methods, caps[1].to_uppercase());
    }
    if regex_fetch_call().is_match(source) {
        let explicit: Vec<String> = regex_fetch_method()
            .captures_iter(source)
            .map(|caps| caps[1].to_uppercase())
            .collect();
        if explicit.is_empty() {
            push_unique(&mut http_methods, "GET");
        }
        for method in explicit {
            push_unique(&mut http_methods, method);
        }
    }

    ServiceRecord {
        name: base_name(path),
        path: normalized(path),
        exports: extract_exports(source),
        functions: extract_methods(source),
        endpoints,
        http_methods,
    }
}

// --- type declarations ---------------------------------------------------------

pub fn analyze_type_file(path: &Path) -> Option<TypeFileRecord> {
    with_source(path, "type file", |source| analyze_type_source(source, path))
}

pub fn analyze_type_source(source: &str, path: &Path) -> TypeFileRecord {
    let mut found: Vec<(usize, TypeDeclaration)> = Vec::new();

    let braced = [
        (regex_interface_decl(), TypeDeclarationKind::Interface),
        (regex_enum_decl(), TypeDeclarationKind::Enum),
    ];
    for (re, kind) in braced {
        for caps in re.captures_iter(source) {
            let Some(whole) = caps.get(0) else { continue };
            let body = block_body(source, whole.end() - 1).unwrap_or_default();
            found.push((
                whole.start(),
                TypeDeclaration {
                    name: caps[2].to_string(),
                    kind,
                    exported: caps.get(1).is_some(),
                    body: body.trim().to_string(),
                },
            ));
        }
    }

    for caps in regex_type_alias_decl().captures_iter(source) {
        let Some(whole) = caps.get(0) else { continue };
        found.push((
            whole.start(),
            TypeDeclaration {
                name: caps[2].to_string(),
                kind: TypeDeclarationKind::Type,
                exported: caps.get(1).is_some(),
                body: alias_body(source, whole.end()),
            },
        ));
    }

    found.sort_by_key(|(offset, _)| *offset);
    TypeFileRecord {
        name: base_name(path),
        path: normalized(path),
        declarations: found.into_iter().map(|(_, decl)| decl).collect(),
    }
}

/// Right-hand side of `type X = ...`, up to the first top-level `;` or the
/// end of a line that leaves nothing open.
fn alias_body(source: &str, start: usize) -> String {
    let rest = &source[start..];
    let trimmed = rest.trim_start();
    let offset = rest.len() - trimmed.len();
    if trimmed.starts_with('{') {
        if let Some(close) = matching_close(rest, offset) {
            return rest[offset..=close].trim().to_string();
        }
    }

    let mut depth = 0i32;
    for (idx, ch) in trimmed.char_indices() {
        match ch {
            '{' | '(' | '[' | '<' => depth += 1,
            '}' | ')' | ']' => depth -= 1,
            '>' if !trimmed[..idx].ends_with('=') => depth -= 1,
            ';' if depth <= 0 => return trimmed[..idx].trim().to_string(),
            '\n' if depth <= 0 && !trimmed[..idx].trim_end().ends_with(['|', '&', '=']) => {
                let next = trimmed[idx..].trim_start();
                if !next.starts_with(['|', '&']) {
                    return trimmed[..idx].trim().to_string();
                }
            }
            _ => {}
        }
    }
    trimmed.trim().to_string()
}

// --- config / constants --------------------------------------------------------

pub fn analyze_config_file(path: &Path) -> Option<ConfigRecord> {
    with_source(path, "config", |source| analyze_config_source(source, path))
}

pub fn analyze_config_source(source: &str, path: &Path) -> ConfigRecord {
    let mut constants = Vec::new();
    for caps in regex_constant().captures_iter(source) {
        let Some(value) = caps.get(2) else { continue };
        let raw = value.as_str().trim();
        let value = if raw.starts_with(['{', '[']) {
            matching_close(source, value.start())
                .map(|close| snippet(&source[value.start()..=close], 80))
                .unwrap_or_else(|| raw.to_string())
        } else {
            raw.trim_end_matches(',').to_string()
        };
        constants.push(ConstantRecord {
            name: caps[1].to_string(),
            value,
        });
    }

    ConfigRecord {
        name: base_name(path),
        path: normalized(path),
        exports: extract_exports(source),
        constants,
    }
}

// --- tests -----------------------------------------------------------------------

pub fn analyze_test_file(path: &Path) -> Option<TestFileRecord> {
    with_source(path, "test file", |source| analyze_test_source(source, path))
}

pub fn analyze_test_source(source: &str, path: &Path) -> TestFileRecord {
    let mut suites = Vec::new();
    for caps in regex_test_suite().captures_iter(source) {
        push_unique(&mut suites, &caps[1]);
    }
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    TestFileRecord {
        name,
        path: normalized(path),
        suites,
        test_count: regex_test_case().find_iter(source).count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_endpoints_and_methods() {
        let src = r#"
import axios from 'axios';

const BASE = '/api/cart';

export async function fetchCart(userId) {
  const res = await axios.get(`/api/cart/${userId}`);
  return res.data;
}

export const addItem = async (item) => axios.post('/api/cart/items', item);
export const removeItem = (id) => axios.delete('/api/cart/items/' + id);

export function legacy() {
  return fetch('https://legacy.example.com/cart', { method: 'put' });
}
"#;
        let record = analyze_service_source(src, Path::new("services/cartService.ts"));
        assert_eq!(record.name, "cartService");
        assert_eq!(record.http_methods, vec!["GET", "POST", "DELETE", "PUT"]);
        assert_eq!(
            record.endpoints,
            vec![
                "/api/cart",
                "/api/cart/${userId}",
                "/api/cart/items",
                "/api/cart/items/",
                "https://legacy.example.com/cart"
            ]
        );
        let functions: Vec<_> = record.functions.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(functions, vec!["addItem", "removeItem", "fetchCart", "legacy"]);
        let exports: Vec<_> = record.exports.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(exports, vec!["fetchCart", "addItem", "removeItem", "legacy"]);
    }

    #[test]
    fn bare_fetch_counts_as_get() {
        let record =
            analyze_service_source("export const load = () => fetch(url);", Path::new("api.js"));
        assert_eq!(record.http_methods, vec!["GET"]);
        assert!(record.endpoints.is_empty());
    }

    #[test]
    fn type_declarations_in_source_order() {
        let src = r#"
export interface CartItem {
  id: string;
  qty: number;
}

type Status = 'idle'
  | 'loading'
  | 'error';

export type Totals = { sum: number; tax: number };

export enum Currency { EUR = 'EUR', USD = 'USD' }
"#;
        let record = analyze_type_source(src, Path::new("types/cart.d.ts"));
        assert_eq!(record.name, "cart");
        let summary: Vec<_> = record
            .declarations
            .iter()
            .map(|d| (d.name.as_str(), d.kind, d.exported))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("CartItem", TypeDeclarationKind::Interface, true),
                ("Status", TypeDeclarationKind::Type, false),
                ("Totals", TypeDeclarationKind::Type, true),
                ("Currency", TypeDeclarationKind::Enum, true),
            ]
        );
        assert_eq!(record.declarations[0].body, "id: string;\n  qty: number;");
        assert_eq!(record.declarations[1].body, "'idle'\n  | 'loading'\n  | 'error'");
        assert_eq!(record.declarations[2].body, "{ sum: number; tax: number }");
        assert_eq!(record.declarations[3].body, "EUR = 'EUR', USD = 'USD'");
    }

    #[test]
    fn config_constants() {
        let src = r#"
export const PAGE_SIZE = 20;
export const API_ROOT: string = '/api';
const COLUMNS = [
  'name',
  'price',
];
export const lowerCase = 1;
export default { PAGE_SIZE };
"#;
        let record = analyze_config_source(src, Path::new("cart.config.ts"));
        assert_eq!(record.name, "cart");
        let constants: Vec<_> = record
            .constants
            .iter()
            .map(|c| (c.name.as_str(), c.value.as_str()))
            .collect();
        assert_eq!(
            constants,
            vec![
                ("PAGE_SIZE", "20"),
                ("API_ROOT", "'/api'"),
                ("COLUMNS", "[ 'name', 'price', ]"),
            ]
        );
        assert!(record.exports.iter().any(|e| e.name == "PAGE_SIZE"));
    }

    #[test]
    fn test_suites_and_cases() {
        let src = r#"
describe('CartSummary', () => {
  it('renders totals', () => {});
  it.skip('handles empty cart', () => {});
  describe.each([1, 2])('with %i items', () => {
    test("counts", () => {});
  });
});
"#;
        let record = analyze_test_source(src, Path::new("__tests__/CartSummary.test.tsx"));
        assert_eq!(record.name, "CartSummary.test.tsx");
        assert_eq!(record.suites, vec!["CartSummary"]);
        assert_eq!(record.test_count, 3);
    }

    #[test]
    fn unreadable_files_are_skipped() {
        let missing = Path::new("/no/such/file.ts");
        assert!(analyze_service_file(missing).is_none());
        assert!(analyze_type_file(missing).is_none());
        assert!(analyze_config_file(missing).is_none());
        assert!(analyze_test_file(missing).is_none());
    }
}
