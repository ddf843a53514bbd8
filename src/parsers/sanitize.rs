//! Best-effort sanitation passes applied before a strict re-parse.
//!
//! Each pass feeds the next; the order matters because later passes assume
//! the earlier cleanup has already happened. None of the passes can fail,
//! and sanitizing an already-clean document is a no-op. The output is a
//! heuristic repair, not a validity guarantee: a document can come out of
//! here still unparseable, in which case the object scanner takes over.

/// Bracketed `"files"` arrays larger than this are split and re-quoted
/// element by element, so one broken element cannot poison the whole array.
const OVERSIZED_ARRAY_THRESHOLD: usize = 32 * 1024;

/// Run the full sanitation sequence over a raw document.
pub fn sanitize(raw: &str) -> String {
    let text = strip_bom(raw);
    let text = strip_stray_controls(text);
    let text = neutralize_invalid_escapes(&text);
    let text = repair_string_boundaries(&text);
    isolate_oversized_array(&text, "files", OVERSIZED_ARRAY_THRESHOLD)
}

fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{FEFF}').unwrap_or(text)
}

/// Control characters that are never meaningful in a JSON document. Tab,
/// newline and carriage return are kept: they carry structure in multi-line
/// commit messages and get re-escaped later if they sit inside a string.
fn is_stray_control(c: char) -> bool {
    matches!(c,
        '\u{0000}'..='\u{0008}'
        | '\u{000B}'
        | '\u{000C}'
        | '\u{000E}'..='\u{001F}'
        | '\u{007F}'..='\u{009F}')
}

fn strip_stray_controls(text: &str) -> String {
    text.chars().filter(|c| !is_stray_control(*c)).collect()
}

/// A backslash not followed by one of `" \ / b f n r t u` is not a legal
/// JSON escape. The backslash is dropped and the following character kept,
/// which preserves the author-visible text at the cost of losing the
/// (already broken) escape. A trailing lone backslash is dropped outright.
fn neutralize_invalid_escapes(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '\\' {
            match chars.get(i + 1) {
                Some(next) if is_escapable(*next) => {
                    out.push('\\');
                    out.push(*next);
                    i += 2;
                }
                Some(next) => {
                    out.push(*next);
                    i += 2;
                }
                None => {
                    i += 1;
                }
            }
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }
    out
}

fn is_escapable(c: char) -> bool {
    matches!(c, '"' | '\\' | '/' | 'b' | 'f' | 'n' | 'r' | 't' | 'u')
}

/// Single linear scan tracking whether we are inside a string, with a
/// one-character escape state so `\\"` does not double-toggle. Two repairs
/// happen inside strings:
///
/// - an unescaped quote whose next non-space character is not a structural
///   token is treated as embedded content and re-escaped in place;
/// - literal tab / newline / carriage return become `\t` / `\n` / `\r`,
///   keeping the content while making the string legal again.
///
/// Commas, colons and brackets inside a string are ordinary content and
/// pass through untouched.
fn repair_string_boundaries(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut inside_string = false;
    let mut escape_next = false;
    for (i, &c) in chars.iter().enumerate() {
        if !inside_string {
            if c == '"' {
                inside_string = true;
            }
            out.push(c);
            continue;
        }
        if escape_next {
            escape_next = false;
            out.push(c);
            continue;
        }
        match c {
            '\\' => {
                escape_next = true;
                out.push(c);
            }
            '"' => {
                if closes_string(&chars, i + 1) {
                    inside_string = false;
                    out.push(c);
                } else {
                    out.push_str("\\\"");
                }
            }
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}

/// A quote legitimately ends a string when the next non-space character is
/// a structural token (or the document ends). Anything else means the quote
/// sits in the middle of content.
fn closes_string(chars: &[char], mut i: usize) -> bool {
    while i < chars.len() && matches!(chars[i], ' ' | '\t' | '\n' | '\r') {
        i += 1;
    }
    match chars.get(i) {
        None => true,
        Some(c) => matches!(c, ',' | ':' | '}' | ']'),
    }
}

/// Locate `"<field>": [ ... ]` occurrences whose bracketed content exceeds
/// `threshold` bytes, split the content on top-level commas (string- and
/// depth-aware, same state tracking as above), and re-quote each element
/// independently. One malformed element deep inside a giant array then
/// breaks only itself, not the enclosing object.
fn isolate_oversized_array(text: &str, field: &str, threshold: usize) -> String {
    let needle = format!("\"{field}\"");
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;

    while let Some(rel) = text[pos..].find(&needle) {
        let key_start = pos + rel;
        let key_end = key_start + needle.len();
        out.push_str(&text[pos..key_end]);
        pos = key_end;

        let mut i = key_end;
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if bytes.get(i) != Some(&b':') {
            continue;
        }
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if bytes.get(i) != Some(&b'[') {
            continue;
        }

        let Some(close) = matching_bracket(text, i) else {
            continue;
        };
        let content = &text[i + 1..close];
        if content.len() <= threshold {
            continue;
        }

        out.push_str(&text[key_end..i]);
        out.push('[');
        let elements = split_top_level(content);
        for (n, element) in elements.iter().enumerate() {
            if n > 0 {
                out.push_str(", ");
            }
            out.push_str(&requote_element(element));
        }
        out.push(']');
        pos = close + 1;
    }

    out.push_str(&text[pos..]);
    out
}

/// Byte index of the `]` matching the `[` at `open`, honouring strings,
/// escapes and nested brackets. `None` if the array never closes.
fn matching_bracket(text: &str, open: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut inside_string = false;
    let mut escape_next = false;
    let mut depth = 0usize;
    for (i, &b) in bytes.iter().enumerate().skip(open) {
        if inside_string {
            if escape_next {
                escape_next = false;
            } else if b == b'\\' {
                escape_next = true;
            } else if b == b'"' {
                inside_string = false;
            }
            continue;
        }
        match b {
            b'"' => inside_string = true,
            b'[' => depth += 1,
            b']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Split array content on commas that are neither inside a string nor
/// inside a nested bracket.
fn split_top_level(content: &str) -> Vec<&str> {
    let bytes = content.as_bytes();
    let mut elements = Vec::new();
    let mut inside_string = false;
    let mut escape_next = false;
    let mut depth = 0usize;
    let mut start = 0;
    for (i, &b) in bytes.iter().enumerate() {
        if inside_string {
            if escape_next {
                escape_next = false;
            } else if b == b'\\' {
                escape_next = true;
            } else if b == b'"' {
                inside_string = false;
            }
            continue;
        }
        match b {
            b'"' => inside_string = true,
            b'[' | b'{' => depth += 1,
            b']' | b'}' => depth = depth.saturating_sub(1),
            b',' if depth == 0 => {
                elements.push(&content[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    elements.push(&content[start..]);
    elements
}

/// Trim an element, strip one layer of surrounding quotes if present, then
/// re-emit it as a repaired string literal by running the escape and
/// boundary passes over it in isolation.
fn requote_element(element: &str) -> String {
    let trimmed = element.trim();
    let inner = trimmed
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(trimmed);
    repair_string_boundaries(&neutralize_invalid_escapes(&format!("\"{inner}\"")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_document_is_untouched() {
        let clean = r#"[{"message":"fix bug","author":"alice","files":["a.ts"]}]"#;
        assert_eq!(sanitize(clean), clean);
    }

    #[test]
    fn test_idempotent_on_malformed_input() {
        let dirty = "\u{FEFF}[{\"message\":\"fix\u{0001} \\q bug\"}]";
        let once = sanitize(dirty);
        assert_eq!(sanitize(&once), once);
    }

    #[test]
    fn test_strips_leading_bom() {
        let doc = "\u{FEFF}[{\"message\":\"m\"}]";
        assert_eq!(sanitize(doc), "[{\"message\":\"m\"}]");
    }

    #[test]
    fn test_strips_stray_controls_but_keeps_whitespace_structure() {
        let doc = "[\u{0000}{\"a\":1},\n{\"b\":2}\u{009F}]";
        assert_eq!(sanitize(doc), "[{\"a\":1},\n{\"b\":2}]");
    }

    #[test]
    fn test_tab_inside_string_becomes_escape() {
        let doc = "[{\"message\":\"fix\tbug\"}]";
        let cleaned = sanitize(doc);
        assert_eq!(cleaned, r#"[{"message":"fix\tbug"}]"#);
        let parsed: serde_json::Value = serde_json::from_str(&cleaned).unwrap();
        assert_eq!(parsed[0]["message"], "fix\tbug");
    }

    #[test]
    fn test_invalid_escape_backslash_is_dropped() {
        let doc = r#"[{"message":"C:\path"}]"#;
        assert_eq!(sanitize(doc), r#"[{"message":"C:path"}]"#);
    }

    #[test]
    fn test_valid_escapes_survive() {
        let doc = r#"[{"message":"say \"hi\"\nbye \\ /"}]"#;
        assert_eq!(sanitize(doc), doc);
    }

    #[test]
    fn test_embedded_quote_is_escaped() {
        let doc = r#"[{"author":"bo"b"}]"#;
        let cleaned = sanitize(doc);
        assert_eq!(cleaned, r#"[{"author":"bo\"b"}]"#);
        let parsed: serde_json::Value = serde_json::from_str(&cleaned).unwrap();
        assert_eq!(parsed[0]["author"], "bo\"b");
    }

    #[test]
    fn test_quote_before_structural_token_still_closes() {
        let doc = r#"{"a":"x" , "b":"y"}"#;
        assert_eq!(sanitize(doc), doc);
    }

    #[test]
    fn test_commas_and_brackets_inside_strings_are_content() {
        let doc = r#"[{"message":"a, b: [c] {d}"}]"#;
        assert_eq!(sanitize(doc), doc);
    }

    #[test]
    fn test_oversized_files_array_is_requoted_per_element() {
        let mut files = Vec::new();
        for i in 0..2000 {
            files.push(format!("\"src/module_{i}/some/deep/path/file_{i}.ts\""));
        }
        // One element with a bare embedded quote in the middle.
        files[1000] = "\"bad\"name.ts\"".to_string();
        let doc = format!("[{{\"message\":\"big\",\"files\":[{}]}}]", files.join(","));
        assert!(doc.len() > OVERSIZED_ARRAY_THRESHOLD);

        let cleaned = sanitize(&doc);
        let parsed: serde_json::Value = serde_json::from_str(&cleaned).unwrap();
        let recovered = parsed[0]["files"].as_array().unwrap();
        assert_eq!(recovered.len(), 2000);
        assert_eq!(recovered[1000], "bad\"name.ts");
        assert_eq!(recovered[0], "src/module_0/some/deep/path/file_0.ts");
    }

    #[test]
    fn test_small_files_array_is_left_alone() {
        let doc = r#"[{"files":["a.ts","b.ts"]}]"#;
        assert_eq!(sanitize(doc), doc);
    }

    #[test]
    fn test_unterminated_array_is_left_for_the_scanner() {
        // No closing bracket to match: the pass must not panic or truncate.
        let doc = r#"{"files":["a.ts","b.ts"#;
        assert_eq!(sanitize(doc), doc);
    }
}
