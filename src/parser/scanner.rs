//! Byte-level scanning helpers
//!
//! All delimiters that matter here (`{`, `}`, `"`, `=`, `,`, `\`) are ASCII,
//! so scanning bytes is safe on UTF-8 input.

use memchr::memrchr;

/// A brace or quote preceded by a backslash is a literal character,
/// not a nesting change.
fn is_escaped(bytes: &[u8], pos: usize) -> bool {
    pos > 0 && bytes[pos - 1] == b'\\'
}

/// Net count of unescaped `{` minus unescaped `}` over the whole text
pub(crate) fn brace_surplus(text: &str) -> i64 {
    let bytes = text.as_bytes();
    let mut open = 0i64;
    for i in 0..bytes.len() {
        match bytes[i] {
            b'{' if !is_escaped(bytes, i) => open += 1,
            b'}' if !is_escaped(bytes, i) => open -= 1,
            _ => {}
        }
    }
    open
}

/// True iff the unescaped braces in `text` balance out
pub(crate) fn braces_balanced(text: &str) -> bool {
    brace_surplus(text) == 0
}

/// Rightmost unescaped occurrence of `needle` in `text`
pub(crate) fn find_last_unescaped(text: &str, needle: u8) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut end = bytes.len();
    while let Some(pos) = memrchr(needle, &bytes[..end]) {
        if !is_escaped(bytes, pos) {
            return Some(pos);
        }
        end = pos;
    }
    None
}

/// Decide whether the `=` at `pos` separates a field name from a value.
///
/// The scan from `pos` to the end of the remaining entry must contain
/// balanced braces, otherwise the `=` sits inside a braced value (an
/// equation in an abstract, say). Quote-delimited values can contain
/// balanced-looking content that defeats the brace check, so when the
/// remaining text ends in `"` the `=` is only accepted if exactly two
/// unescaped quotes follow it: the value's closing and opening delimiters.
pub(crate) fn equals_is_separator(entry: &str, pos: usize) -> bool {
    if !braces_balanced(&entry[pos..]) {
        return false;
    }

    let trimmed = entry.trim_end();
    let bytes = trimmed.as_bytes();
    let mut last = bytes.last().copied();
    if last == Some(b',') && bytes.len() >= 2 {
        last = Some(bytes[bytes.len() - 2]);
    }
    if last != Some(b'"') {
        return true;
    }

    let bytes = entry.as_bytes();
    let mut found = 0;
    let mut i = bytes.len();
    while i > pos {
        i -= 1;
        if bytes[i] == b'"' && !is_escaped(bytes, i) {
            found += 1;
            if found == 2 {
                return true;
            }
        }
    }
    false
}

/// Rightmost `=` that is unescaped and accepted by [`equals_is_separator`];
/// candidates failing the check are retried further left.
pub(crate) fn find_value_equals(entry: &str) -> Option<usize> {
    let bytes = entry.as_bytes();
    let mut end = bytes.len();
    while let Some(pos) = memrchr(b'=', &bytes[..end]) {
        if !is_escaped(bytes, pos) && equals_is_separator(entry, pos) {
            return Some(pos);
        }
        end = pos;
    }
    None
}

/// Probe whether an `@` seen while inside an entry sits inside a still-open
/// value, in which case it is legitimate content rather than the start of
/// the next entry.
pub(crate) fn at_inside_value(buffer: &str) -> bool {
    let Some(pos) = find_last_unescaped(buffer, b'=') else {
        return false;
    };
    let value = buffer[pos + 1..].trim_start();
    let bytes = value.as_bytes();
    let mut open = 0i64;
    let mut in_quote = false;
    for i in 0..bytes.len() {
        if is_escaped(bytes, i) {
            continue;
        }
        match bytes[i] {
            b'{' => open += 1,
            b'}' => open -= 1,
            b'"' if open == 0 => in_quote = !in_quote,
            _ => {}
        }
    }
    open > 0 || in_quote
}
