//! Component property extraction.
//!
//! Two independent passes: the `*Props` interface (types, optionality and
//! comment descriptions) and `{ a, b } = props` destructuring (names only).
//! The interface pass wins when both produce the same name.

use crate::types::PropRecord;

use super::regexes::{regex_prop_line, regex_props_destructure, regex_props_interface};
use super::text::{block_body, comment_above, split_top_level};

pub fn extract_props(source: &str) -> Vec<PropRecord> {
    let mut props = interface_props(source);
    for prop in destructured_props(source) {
        if !props.iter().any(|p| p.name == prop.name) {
            props.push(prop);
        }
    }
    props
}

/// Props declared in the first `interface *Props { ... }` block.
pub fn interface_props(source: &str) -> Vec<PropRecord> {
    let Some(m) = regex_props_interface().find(source) else {
        return Vec::new();
    };
    let Some(body) = block_body(source, m.end() - 1) else {
        return Vec::new();
    };
    props_from_type_body(body)
}

/// Props of a type-literal body such as an interface or `defineProps<{ ... }>`.
///
/// Line oriented: one member per line (or several separated by `;` on one
/// line). Members of nested object types are skipped.
pub(crate) fn props_from_type_body(body: &str) -> Vec<PropRecord> {
    let lines: Vec<&str> = body.lines().collect();
    let mut props: Vec<PropRecord> = Vec::new();
    let mut depth = 0i32;

    for (idx, line) in lines.iter().enumerate() {
        let trimmed = line.trim();
        let is_comment = trimmed.starts_with("//")
            || trimmed.starts_with("/*")
            || trimmed.starts_with('*')
            || trimmed.ends_with("*/");

        if depth == 0 && !trimmed.is_empty() && !is_comment {
            for member in split_top_level(trimmed, b';') {
                let Some(caps) = regex_prop_line().captures(member) else {
                    continue;
                };
                let name = caps[1].to_string();
                if props.iter().any(|p| p.name == name) {
                    continue;
                }
                let mut prop_type = caps[3].trim_end_matches([';', ',']).trim().to_string();
                // inline object type continued on the following lines
                if prop_type.starts_with('{') && bracket_delta(&prop_type) > 0 {
                    prop_type = "object".to_string();
                }
                props.push(PropRecord {
                    name,
                    prop_type,
                    optional: caps.get(2).is_some(),
                    description: comment_above(&lines, idx, 0).unwrap_or_default(),
                });
            }
        }

        if !is_comment {
            depth += bracket_delta(trimmed);
        }
    }

    props
}

fn bracket_delta(line: &str) -> i32 {
    line.bytes().fold(0, |acc, b| match b {
        b'{' => acc + 1,
        b'}' => acc - 1,
        _ => acc,
    })
}

/// Identifiers from `{ a, b: renamed, c = 1, ...rest } = props`.
pub fn destructured_props(source: &str) -> Vec<PropRecord> {
    let mut props: Vec<PropRecord> = Vec::new();
    for caps in regex_props_destructure().captures_iter(source) {
        for item in split_top_level(&caps[1], b',') {
            if item.starts_with("...") {
                continue;
            }
            let name: String = item
                .chars()
                .take_while(|c| c.is_alphanumeric() || matches!(c, '_' | '$'))
                .collect();
            if name.is_empty() || props.iter().any(|p| p.name == name) {
                continue;
            }
            props.push(PropRecord {
                name,
                prop_type: "unknown".to_string(),
                optional: false,
                description: String::new(),
            });
        }
    }
    props
}
