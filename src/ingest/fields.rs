//! Keyed field extraction from flat record documents.
//!
//! Documents are flat `"key": value` records where a value is a string,
//! a bare token (number, `null`), or a one-level array of strings. Each
//! lookup is a single forward pass over the buffer; no tree is built and
//! nothing here returns an error. Malformed input degrades to `None`, `0`
//! or an empty vector and validation is left to the record builder.
//!
//! Quote and escape state is tracked everywhere a delimiter is searched
//! for, so a `\"`, a comma or a bracket inside a quoted value never ends
//! the value early.

/// Locate the first `"key"` token and return the offset just past it.
fn find_key(buffer: &str, key: &str) -> Option<usize> {
    let token = format!("\"{key}\"");
    buffer.find(&token).map(|pos| pos + token.len())
}

/// Offset of the first significant byte of the value for `key`.
fn value_start(buffer: &str, key: &str) -> Option<usize> {
    let after_key = find_key(buffer, key)?;
    let colon = after_key + buffer[after_key..].find(':')?;

    let bytes = buffer.as_bytes();
    let mut pos = colon + 1;
    while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
        pos += 1;
    }

    (pos < bytes.len()).then_some(pos)
}

/// Whether `rest` begins with the bare `null` token.
fn starts_with_null(rest: &str) -> bool {
    rest.strip_prefix("null")
        .is_some_and(|tail| !tail.starts_with(|c: char| c.is_alphanumeric() || c == '_'))
}

/// Index of the first unescaped `"` at or after `from`.
///
/// A quote preceded by an odd run of backslashes is escaped.
fn closing_quote(bytes: &[u8], from: usize) -> Option<usize> {
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate().skip(from) {
        if escaped {
            escaped = false;
            continue;
        }
        match b {
            b'\\' => escaped = true,
            b'"' => return Some(i),
            _ => {}
        }
    }

    None
}

/// Index of the first unescaped `,`, `}` or `]` in `bytes`.
fn bare_value_end(bytes: &[u8]) -> Option<usize> {
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate() {
        if escaped {
            escaped = false;
            continue;
        }
        match b {
            b'\\' => escaped = true,
            b',' | b'}' | b']' => return Some(i),
            _ => {}
        }
    }

    None
}

/// Index of the `]` matching the `[` at `open`, ignoring brackets inside quotes.
fn matching_bracket(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 1usize;
    let mut in_quotes = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate().skip(open + 1) {
        if escaped {
            escaped = false;
            continue;
        }
        match b {
            b'\\' => escaped = true,
            b'"' => in_quotes = !in_quotes,
            b'[' if !in_quotes => depth += 1,
            b']' if !in_quotes => {
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

/// Replace the recognized escape sequences; anything else passes through.
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('/') => out.push('/'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}

/// Split on commas that are outside quoted spans.
fn split_top_level(inner: &str) -> Vec<&str> {
    let bytes = inner.as_bytes();
    let mut parts = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate() {
        if escaped {
            escaped = false;
            continue;
        }
        match b {
            b'\\' => escaped = true,
            b'"' => in_quotes = !in_quotes,
            b',' if !in_quotes => {
                parts.push(&inner[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&inner[start..]);

    parts
}

/// Trim an array element and strip one layer of surrounding quotes.
fn unwrap_element(element: &str) -> String {
    let element = element.trim();
    if element.len() >= 2 && element.starts_with('"') && element.ends_with('"') {
        element[1..element.len() - 1].to_string()
    } else {
        element.to_string()
    }
}

/// Whether the buffer contains the quoted `"key"` token at all.
pub fn has_key(buffer: &str, key: &str) -> bool {
    find_key(buffer, key).is_some()
}

/// Extract the value of `key` as a string.
///
/// Quoted values are unescaped (`\" \\ \/ \n \r \t`); bare values are
/// read up to the next unescaped `,`, `}` or `]` and trimmed. Returns
/// `None` for a missing key, a `null` value, or an unterminated value.
pub fn extract_string(buffer: &str, key: &str) -> Option<String> {
    let start = value_start(buffer, key)?;
    let rest = &buffer[start..];

    if rest.starts_with('"') {
        let end = closing_quote(rest.as_bytes(), 1)?;
        return Some(unescape(&rest[1..end]));
    }

    if starts_with_null(rest) {
        return None;
    }

    let end = bare_value_end(rest.as_bytes())?;
    Some(rest[..end].trim().to_string())
}

/// Extract the value of `key` as a base-10 integer, `0` on any failure.
pub fn extract_int(buffer: &str, key: &str) -> i64 {
    extract_string(buffer, key)
        .and_then(|value| value.trim().parse::<i64>().ok())
        .unwrap_or(0)
}

/// Extract the value of `key` as an array of strings.
///
/// Elements are trimmed and lose one layer of quotes but are not
/// unescaped. A missing key, a non-array value or an unbalanced bracket
/// yields an empty vector.
pub fn extract_string_array(buffer: &str, key: &str) -> Vec<String> {
    let Some(start) = value_start(buffer, key) else {
        return Vec::new();
    };

    let bytes = buffer.as_bytes();
    if bytes[start] != b'[' {
        return Vec::new();
    }

    let Some(end) = matching_bracket(bytes, start) else {
        return Vec::new();
    };

    let inner = buffer[start + 1..end].trim();
    if inner.is_empty() {
        return Vec::new();
    }

    split_top_level(inner)
        .into_iter()
        .map(unwrap_element)
        .collect()
}
