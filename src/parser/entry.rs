//! Field extraction for a single raw entry
//!
//! An entry is parsed backwards: the rightmost valid `=` marks the last
//! field's value, the last `,` before it the field name, and the remaining
//! text shrinks until only the `@type{cite` header is left.

use lazy_static::lazy_static;
use regex::Regex;

use super::{author, scanner, transform};
use crate::model::{is_allowed_entry_type, Entry, Field};
use crate::options::Options;
use crate::warning::{Warning, WarningKind};

lazy_static! {
    static ref AT_IN_BRACES: Regex = Regex::new(r"^\{.*@.*\}").unwrap();
    static ref ESCAPED_QUOTE_IN_QUOTES: Regex = Regex::new(r#"^".*\\".*""#).unwrap();
}

/// Parse one raw entry (the text between the entry's outer braces,
/// including the leading `@type{cite,` header).
///
/// Returns `None` for recognized but unsupported `@string` and `@preamble`
/// blocks, which are reported as warnings instead when validation is on.
pub(crate) fn parse_entry(
    raw: &str,
    options: &Options,
    warnings: &mut Vec<Warning>,
) -> Option<Entry> {
    if starts_with_ignore_case(raw, "@string") {
        if options.validate {
            warnings.push(Warning::new(
                WarningKind::StringEntryNotSupported,
                "",
                format!("{raw}}}"),
            ));
        }
        return None;
    }
    if starts_with_ignore_case(raw, "@preamble") {
        if options.validate {
            warnings.push(Warning::new(
                WarningKind::PreambleEntryNotSupported,
                "",
                format!("{raw}}}"),
            ));
        }
        return None;
    }

    let mut rest = raw.to_string();
    let mut fields: Vec<Field> = Vec::new();

    while let Some(eq) = scanner::find_value_equals(&rest) {
        let mut value = rest[eq + 1..].trim().to_string();
        rest.truncate(eq);
        if value.ends_with(',') {
            value.pop();
        }
        if options.validate {
            validate_value(&value, raw, warnings);
        }
        if options.strip_delimiter {
            value = transform::strip_delimiter(&value);
        }
        if options.unwrap {
            value = transform::unwrap(&value);
        }
        if options.remove_curly_braces {
            value = transform::remove_curly_braces(&value);
        }

        let Some(comma) = scanner::find_last_unescaped(&rest, b',') else {
            // No field-name boundary left; what remains is the header
            break;
        };
        let name = rest[comma + 1..].trim().to_ascii_lowercase();
        rest.truncate(comma);
        if !name.is_empty() {
            set_field(&mut fields, name, value);
        }
    }

    // Fields were collected back to front
    fields.reverse();

    let (head, cite) = match rest.split_once('{') {
        Some((head, cite)) => (head, cite),
        None => (rest.as_str(), ""),
    };
    let entry_type = head
        .trim()
        .trim_start_matches('@')
        .trim()
        .to_ascii_lowercase();
    let cite = cite.trim().to_string();

    if options.validate && !is_allowed_entry_type(&entry_type) {
        warnings.push(Warning::new(
            WarningKind::NotAllowedEntryType,
            &entry_type,
            format!("{raw}}}"),
        ));
    }

    let mut authors = None;
    if options.extract_authors {
        if let Some(pos) = fields.iter().position(|f| f.name == "author") {
            let raw_authors = fields.remove(pos).value;
            authors = Some(author::decompose_list(&raw_authors));
        }
    }

    Some(Entry {
        entry_type,
        cite,
        fields,
        authors,
    })
}

fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.len() >= prefix.len() && text[..prefix.len()].eq_ignore_ascii_case(prefix)
}

/// Replace an existing field of the same name or append a new one.
///
/// Parsing runs back to front, so on duplicate names the occurrence
/// earliest in the source wins.
fn set_field(fields: &mut Vec<Field>, name: String, value: String) {
    if let Some(field) = fields.iter_mut().find(|f| f.name == name) {
        field.value = value;
    } else {
        fields.push(Field { name, value });
    }
}

/// Check a value for problems that do not break parsing
fn validate_value(value: &str, whole_entry: &str, warnings: &mut Vec<Warning>) {
    if AT_IN_BRACES.is_match(value) {
        warnings.push(Warning::new(WarningKind::AtInBraces, value, whole_entry));
    }
    if ESCAPED_QUOTE_IN_QUOTES.is_match(value) {
        warnings.push(Warning::new(
            WarningKind::EscapedQuoteInQuotedValue,
            value,
            whole_entry,
        ));
    }
    if !scanner::braces_balanced(value) {
        warnings.push(Warning::new(
            WarningKind::UnbalancedBracesInValue,
            value,
            whole_entry,
        ));
    }
}
