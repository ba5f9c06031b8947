//! Small text-scanning helpers shared by the extractors.
//!
//! Nothing here understands the language; brackets are balanced while
//! skipping string literals and comments, which is enough to cut a block out
//! of well-formed source and degrades to `None` on anything else.

/// Index of the bracket closing the one at `open_idx`.
pub(crate) fn matching_close(source: &str, open_idx: usize) -> Option<usize> {
    let bytes = source.as_bytes();
    let open = *bytes.get(open_idx)?;
    let close = match open {
        b'{' => b'}',
        b'[' => b']',
        b'(' => b')',
        b'<' => b'>',
        _ => return None,
    };

    let mut depth = 0usize;
    let mut i = open_idx;
    while i < bytes.len() {
        let b = bytes[i];
        match b {
            b'"' | b'\'' | b'`' => {
                i = skip_string(bytes, i);
                continue;
            }
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
                continue;
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i += 2;
                while i + 1 < bytes.len() && !(bytes[i] == b'*' && bytes[i + 1] == b'/') {
                    i += 1;
                }
                i += 2;
                continue;
            }
            _ if b == open => depth += 1,
            _ if b == close => {
                // `=>` inside a generic argument list is not a closing angle
                if close == b'>' && i > 0 && bytes[i - 1] == b'=' {
                    i += 1;
                    continue;
                }
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

fn skip_string(bytes: &[u8], start: usize) -> usize {
    let quote = bytes[start];
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => return i + 1,
            b'\n' if quote != b'`' => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

/// Text between the bracket at `open_idx` and its partner.
pub(crate) fn block_body(source: &str, open_idx: usize) -> Option<&str> {
    let close = matching_close(source, open_idx)?;
    source.get(open_idx + 1..close)
}

/// Split on `sep` where no bracket or string is open.
pub(crate) fn split_top_level(text: &str, sep: u8) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0usize;
    let mut i = 0usize;
    while i < bytes.len() {
        match bytes[i] {
            b'"' | b'\'' | b'`' => {
                i = skip_string(bytes, i);
                continue;
            }
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
                continue;
            }
            b'{' | b'[' | b'(' => depth += 1,
            b'}' | b']' | b')' => depth -= 1,
            b'<' => depth += 1,
            b'>' if i > 0 && bytes[i - 1] != b'=' => depth -= 1,
            b if b == sep && depth <= 0 => {
                parts.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    if start < text.len() {
        parts.push(&text[start..]);
    }
    parts
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

/// Key of an object-literal entry: `foo: 1`, `foo() {}`, `async foo()`,
/// `'foo-bar': x`, or a shorthand `foo`. Spreads yield `None`.
pub(crate) fn entry_key(segment: &str) -> Option<String> {
    let mut rest = strip_line_comments(segment);
    rest = rest.trim_start();
    if rest.starts_with("...") {
        return None;
    }
    for prefix in ["async ", "get ", "set ", "*"] {
        if let Some(stripped) = rest.strip_prefix(prefix) {
            rest = stripped.trim_start();
        }
    }
    let rest = rest.trim_start_matches(['"', '\'']);
    let key: String = rest
        .chars()
        .take_while(|c| c.is_alphanumeric() || matches!(c, '_' | '$' | '-' | '.'))
        .collect();
    if key.is_empty() { None } else { Some(key) }
}

/// Distinct keys of an object-literal body, in source order.
pub(crate) fn object_keys(body: &str) -> Vec<String> {
    let mut keys = Vec::new();
    for entry in split_top_level(body, b',') {
        if let Some(key) = entry_key(entry) {
            push_unique(&mut keys, key);
        }
    }
    keys
}

fn strip_line_comments(segment: &str) -> &str {
    let mut rest = segment.trim_start();
    loop {
        if rest.starts_with("//") {
            match rest.find('\n') {
                Some(nl) => rest = rest[nl + 1..].trim_start(),
                None => return "",
            }
        } else if rest.starts_with("/*") {
            match rest.find("*/") {
                Some(end) => rest = rest[end + 2..].trim_start(),
                None => return "",
            }
        } else {
            return rest;
        }
    }
}

/// Parameter names of a parameter list, types and defaults stripped.
/// Destructured parameters are kept as their (whitespace-normalised) pattern.
pub(crate) fn parameter_names(params: &str) -> Vec<String> {
    split_top_level(params, b',')
        .into_iter()
        .filter_map(|param| {
            if param.starts_with('{') || param.starts_with('[') {
                let end = matching_close(param, 0).unwrap_or(param.len() - 1);
                let pattern = &param[..=end.min(param.len() - 1)];
                return Some(pattern.split_whitespace().collect::<Vec<_>>().join(" "));
            }
            let name: String = param
                .trim_start_matches("...")
                .chars()
                .take_while(|c| c.is_alphanumeric() || matches!(c, '_' | '$'))
                .collect();
            if name.is_empty() { None } else { Some(name) }
        })
        .collect()
}

/// Line comment or block comment sitting directly above `lines[idx]`,
/// never looking above `lines[floor]`.
///
/// Consecutive `//` lines are joined; a block comment is collected up to its
/// opening marker. Scanning stops at the first line that is neither.
pub(crate) fn comment_above(lines: &[&str], idx: usize, floor: usize) -> Option<String> {
    let mut collected: Vec<String> = Vec::new();
    let mut in_block = false;
    let mut i = idx;

    while i > floor {
        i -= 1;
        let trimmed = lines[i].trim();

        if in_block {
            let opens = trimmed.starts_with("/*");
            let text = trimmed
                .trim_start_matches("/**")
                .trim_start_matches("/*")
                .trim_start_matches('*')
                .trim();
            if !text.is_empty() {
                collected.push(text.to_string());
            }
            if opens {
                break;
            }
            continue;
        }

        if let Some(text) = trimmed.strip_prefix("//") {
            let text = text.trim_start_matches('/').trim();
            if !text.is_empty() {
                collected.push(text.to_string());
            }
            continue;
        }

        if trimmed.ends_with("*/") {
            let inner = trimmed.trim_end_matches("*/");
            if inner.trim_start().starts_with("/*") {
                let text = inner
                    .trim()
                    .trim_start_matches("/**")
                    .trim_start_matches("/*")
                    .trim();
                if !text.is_empty() {
                    collected.push(text.to_string());
                }
                break;
            }
            in_block = true;
            let text = inner.trim().trim_start_matches('*').trim();
            if !text.is_empty() {
                collected.push(text.to_string());
            }
            continue;
        }

        break;
    }

    if collected.is_empty() {
        return None;
    }
    collected.reverse();
    Some(collected.join(" "))
}

/// `word` occurs in `text` with no identifier character on either side.
pub(crate) fn contains_word(text: &str, word: &str) -> bool {
    let is_ident = |c: char| c.is_alphanumeric() || c == '_' || c == '$';
    text.match_indices(word).any(|(pos, _)| {
        let before = text[..pos].chars().next_back();
        let after = text[pos + word.len()..].chars().next();
        !before.is_some_and(is_ident) && !after.is_some_and(is_ident)
    })
}

pub(crate) fn offset_to_line(content: &str, offset: usize) -> usize {
    content[..offset].bytes().filter(|b| *b == b'\n').count() + 1
}

/// Collapse whitespace and cap at `max` characters.
pub(crate) fn snippet(text: &str, max: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max {
        collapsed
    } else {
        let cut: String = collapsed.chars().take(max).collect();
        format!("{cut}...")
    }
}

pub(crate) fn push_unique(list: &mut Vec<String>, value: impl Into<String>) {
    let value = value.into();
    if !list.contains(&value) {
        list.push(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_close_skips_strings_and_comments() {
        let src = r#"{ a: "}", b: { c: '{' }, // }
 d: `}` }"#;
        let close = matching_close(src, 0).expect("balanced");
        assert_eq!(close, src.len() - 1);
    }

    #[test]
    fn unbalanced_block_is_none() {
        assert!(block_body("{ a: { b: 1 }", 0).is_none());
        assert!(matching_close("abc", 0).is_none());
    }

    #[test]
    fn split_top_level_respects_nesting() {
        let parts = split_top_level("a, b: { c, d }, fn(x, y), e: Map<K, V>", b',');
        assert_eq!(parts, vec!["a", "b: { c, d }", "fn(x, y)", "e: Map<K, V>"]);
    }

    #[test]
    fn entry_keys() {
        assert_eq!(entry_key("count: 0").as_deref(), Some("count"));
        assert_eq!(entry_key("async save() {}").as_deref(), Some("save"));
        assert_eq!(entry_key("'user.name'(v) {}").as_deref(), Some("user.name"));
        assert_eq!(entry_key("// note\n total() {}").as_deref(), Some("total"));
        assert_eq!(entry_key("...mapState(['a'])"), None);
    }

    #[test]
    fn object_keys_skip_spreads_and_duplicates() {
        let keys = object_keys("items, total: sum(items), ...rest, reload() {}, items");
        assert_eq!(keys, vec!["items", "total", "reload"]);
    }

    #[test]
    fn parameter_names_strip_types_and_defaults() {
        assert_eq!(
            parameter_names("id: string, limit = 10, ...rest: unknown[]"),
            vec!["id", "limit", "rest"]
        );
        assert_eq!(
            parameter_names("{ page,\n size }: Paging"),
            vec!["{ page, size }"]
        );
        assert!(parameter_names("").is_empty());
    }

    #[test]
    fn comment_above_reads_line_and_block_comments() {
        let lines = vec![
            "interface P {",
            "  // The user name",
            "  name: string;",
            "  /**",
            "   * Age in years",
            "   */",
            "  age?: number;",
            "",
            "  flag: boolean;",
            "  /* inline */",
            "  other: string;",
        ];
        assert_eq!(comment_above(&lines, 2, 0).as_deref(), Some("The user name"));
        assert_eq!(comment_above(&lines, 6, 0).as_deref(), Some("Age in years"));
        assert_eq!(comment_above(&lines, 8, 0), None);
        assert_eq!(comment_above(&lines, 10, 0).as_deref(), Some("inline"));
    }

    #[test]
    fn comment_above_respects_floor() {
        let lines = vec!["// outside", "body line", "name: string"];
        assert_eq!(comment_above(&lines, 2, 1), None);
        assert_eq!(comment_above(&lines, 1, 0).as_deref(), Some("outside"));
    }

    #[test]
    fn contains_word_checks_boundaries() {
        assert!(contains_word("mounted() {}", "mounted"));
        assert!(!contains_word("unmounted() {}", "mounted"));
        assert!(!contains_word("onMounted(() => {})", "mounted"));
        assert!(contains_word("a.created", "created"));
    }

    #[test]
    fn snippet_caps_length() {
        assert_eq!(snippet("<button\n   type=\"submit\">", 80), "<button type=\"submit\">");
        assert_eq!(snippet("abcdef", 3), "abc...");
    }
}
