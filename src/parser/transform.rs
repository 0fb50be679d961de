//! Optional post-processing of field values

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
    static ref INNER_BRACES: Regex = Regex::new(r"([^\\])\{(.*?[^\\])\}").unwrap();
}

/// True when `value` starts and ends with one matching delimiter pair
fn has_delimiter_pair(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() >= 2
        && ((bytes[0] == b'{' && bytes[bytes.len() - 1] == b'}')
            || (bytes[0] == b'"' && bytes[bytes.len() - 1] == b'"'))
}

/// Remove matching enclosing delimiters, layer by layer, until the first
/// and last characters no longer form a recognized pair
pub(crate) fn strip_delimiter(value: &str) -> String {
    let mut inner = value;
    while has_delimiter_pair(inner) {
        inner = &inner[1..inner.len() - 1];
    }
    inner.to_string()
}

/// Collapse whitespace runs to a single space and trim the ends
pub(crate) fn unwrap(value: &str) -> String {
    WHITESPACE_RUN.replace_all(value, " ").trim().to_string()
}

/// Remove one layer of inner `{...}` wrapping, keeping the value's own
/// enclosing delimiters intact
pub(crate) fn remove_curly_braces(value: &str) -> String {
    let mut begin = String::new();
    let mut end = String::new();
    let mut inner = value;
    while has_delimiter_pair(inner) {
        begin.push(inner.as_bytes()[0] as char);
        end.insert(0, inner.as_bytes()[inner.len() - 1] as char);
        inner = &inner[1..inner.len() - 1];
    }
    format!("{begin}{}{end}", INNER_BRACES.replace_all(inner, "$1$2"))
}

/// Break each line of `text` at or before `width` characters.
///
/// With `cut` set a break is forced exactly at the width; otherwise the
/// break lands on the nearest preceding whitespace, with a hard break only
/// when the window contains none. A width below 1 leaves the text alone.
pub(crate) fn word_wrap(text: &str, width: usize, break_str: &str, cut: bool) -> String {
    if width < 1 {
        return text.to_string();
    }
    text.split('\n')
        .map(|line| wrap_line(line, width, break_str, cut))
        .collect::<Vec<_>>()
        .join("\n")
}

fn wrap_line(line: &str, width: usize, break_str: &str, cut: bool) -> String {
    let chars: Vec<char> = line.chars().collect();
    let mut out = String::new();
    let mut start = 0;
    while chars.len() - start > width {
        // A space exactly at the width boundary still fits the line
        let window = &chars[start..start + width + 1];
        let break_at = if cut {
            None
        } else {
            window.iter().rposition(char::is_ascii_whitespace)
        };
        match break_at {
            // Break on the whitespace and consume it
            Some(pos) if pos > 0 => {
                out.extend(&chars[start..start + pos]);
                start += pos + 1;
            }
            // No usable whitespace in the window: hard break
            _ => {
                out.extend(&chars[start..start + width]);
                start += width;
            }
        }
        out.push_str(break_str);
    }
    out.extend(&chars[start..]);
    out
}
