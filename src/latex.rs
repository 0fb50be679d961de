//! LaTeX accent decoding for display output
//!
//! Publication fields in the corpus carry LaTeX accent macros and brace
//! groups. These helpers fold the common macros into HTML entities or
//! percent-encoded UTF-8 so the HTML serializer and the JSON export emit
//! readable text. Braced forms must be folded before the bare ones, and
//! leftover braces are stripped last.

/// Accent macros mapped to HTML entities
const HTML_ACCENTS: [(&str, &str); 11] = [
    (r#"\"{a}"#, "&auml;"),
    (r"{\aa}", "&aring;"),
    (r"\aa{}", "&aring;"),
    (r#"\"{o}"#, "&ouml;"),
    (r"\'{e}", "&eacute;"),
    (r#"\"a"#, "&auml;"),
    (r#"\"o"#, "&ouml;"),
    (r"\'e", "&eacute;"),
    (r"\'a", "&aacute;"),
    (r"\'A", "&Aacute;"),
    (r"\ss{}", "&szlig;"),
];

/// Accent macros mapped to percent-encoded UTF-8
const URI_ACCENTS: [(&str, &str); 11] = [
    (r#"\"{a}"#, "%C3%A4"),
    (r"{\aa}", "%C3%A5"),
    (r"\aa{}", "%C3%A5"),
    (r#"\"{o}"#, "%C3%B6"),
    (r"\'{e}", "%C3%A9"),
    (r#"\"a"#, "%C3%A4"),
    (r#"\"o"#, "%C3%B6"),
    (r"\'e", "%C3%A9"),
    (r"\'a", "%C3%A1"),
    (r"\'A", "%C3%81"),
    (r"\ss{}", "%C3%9F"),
];

fn fold(text: &str, accents: &[(&str, &str)], amp: &str, dash: &str) -> String {
    let mut out = text.to_string();
    for (macro_text, replacement) in accents {
        out = out.replace(macro_text, replacement);
    }
    out = out.replace('{', "").replace('}', "");
    out.replace(r"\&", amp).replace("--", dash)
}

/// Decode LaTeX accent macros to HTML entities and strip leftover braces
#[must_use]
pub fn htmlify(text: &str) -> String {
    fold(text, &HTML_ACCENTS, "&", "&ndash;")
}

/// Decode LaTeX accent macros to percent-encoded UTF-8, for use in URLs
#[must_use]
pub fn uriencode(text: &str) -> String {
    fold(text, &URI_ACCENTS, "%26", "%E2%80%93")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_htmlify_accents() {
        assert_eq!(htmlify(r"K{\aa}rhus"), "K&aring;rhus");
        assert_eq!(htmlify(r#"M\"obius"#), "M&ouml;bius");
        assert_eq!(htmlify(r"\'Alvarez"), "&Aacute;lvarez");
        assert_eq!(htmlify(r"Caf\'e"), "Caf&eacute;");
        assert_eq!(htmlify(r"Wei\ss{}"), "Wei&szlig;");
    }

    #[test]
    fn test_htmlify_braces_and_folds() {
        assert_eq!(htmlify("{The} {TeXbook}"), "The TeXbook");
        assert_eq!(htmlify(r"Gauss \& Jordan"), "Gauss & Jordan");
        assert_eq!(htmlify("pages 10--20"), "pages 10&ndash;20");
    }

    #[test]
    fn test_braced_forms_take_precedence() {
        // The braced form must not decay to the bare macro plus stray braces
        assert_eq!(htmlify(r#"\"{a}"#), "&auml;");
        assert_eq!(htmlify(r"\'{e}"), "&eacute;");
    }

    #[test]
    fn test_uriencode() {
        assert_eq!(uriencode(r#"M\"obius"#), "M%C3%B6bius");
        assert_eq!(uriencode(r"A \& B"), "A %26 B");
        assert_eq!(uriencode("10--20"), "10%E2%80%9320");
        assert_eq!(uriencode("plain"), "plain");
    }
}
