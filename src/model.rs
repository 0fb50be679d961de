//! Data models for parsed BibTeX entries

use serde::Serialize;

/// Entry types accepted by the validator.
///
/// Anything else is still parsed and kept, but flagged with a warning when
/// validation is enabled.
pub const ALLOWED_ENTRY_TYPES: [&str; 14] = [
    "article",
    "book",
    "booklet",
    "conference",
    "inbook",
    "incollection",
    "inproceedings",
    "manual",
    "masterthesis",
    "misc",
    "phdthesis",
    "proceedings",
    "techreport",
    "unpublished",
];

/// Check whether an entry type belongs to the allowed set
#[must_use]
pub fn is_allowed_entry_type(entry_type: &str) -> bool {
    ALLOWED_ENTRY_TYPES.contains(&entry_type)
}

/// A bibliographic entry parsed from one `@type{...}` block
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Entry {
    /// Entry type (article, book, inproceedings, etc.), lowercased
    pub entry_type: String,
    /// Citation key
    pub cite: String,
    /// Fields (title, year, journal, etc.) in source order, names lowercased
    pub fields: Vec<Field>,
    /// Decomposed authors, present when author extraction was requested
    /// and the entry carried an `author` field
    pub authors: Option<Vec<Author>>,
}

impl Entry {
    /// Create a new entry with no fields
    #[must_use]
    pub fn new(entry_type: impl Into<String>, cite: impl Into<String>) -> Self {
        Self {
            entry_type: entry_type.into(),
            cite: cite.into(),
            ..Self::default()
        }
    }

    /// Get a field value by name (case-insensitive)
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(name))
            .map(|f| f.value.as_str())
    }

    /// Check whether a field is present (case-insensitive)
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Set a field value, replacing any existing field of the same name
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(field) = self
            .fields
            .iter_mut()
            .find(|f| f.name.eq_ignore_ascii_case(&name))
        {
            field.value = value;
        } else {
            self.fields.push(Field { name, value });
        }
    }
}

/// A single field of an entry
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Field {
    /// Field name, lowercased
    pub name: String,
    /// Raw or transformed value, depending on the parse options
    pub value: String,
}

impl Field {
    /// Create a new field
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A personal name decomposed into its BibTeX components
///
/// `last` is the only component guaranteed non-empty for well-formed input;
/// every other component may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Author {
    /// Given name(s)
    pub first: String,
    /// Lowercase particle(s) such as "van" or "de"
    pub von: String,
    /// Family name
    pub last: String,
    /// Suffix such as "Jr" or "III"
    pub jr: String,
}

impl Author {
    /// Create an author from its four components, trimming each
    #[must_use]
    pub fn new(first: &str, von: &str, last: &str, jr: &str) -> Self {
        Self {
            first: first.trim().to_string(),
            von: von.trim().to_string(),
            last: last.trim().to_string(),
            jr: jr.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_entry_types() {
        assert!(is_allowed_entry_type("article"));
        assert!(is_allowed_entry_type("phdthesis"));
        assert!(!is_allowed_entry_type("blogpost"));
        assert!(!is_allowed_entry_type("Article"));
    }

    #[test]
    fn test_entry_get_is_case_insensitive() {
        let mut entry = Entry::new("article", "knuth1984");
        entry.set("title", "The TeXbook");
        assert_eq!(entry.get("TITLE"), Some("The TeXbook"));
        assert!(entry.has("Title"));
        assert!(!entry.has("year"));
    }

    #[test]
    fn test_entry_set_replaces() {
        let mut entry = Entry::new("article", "k1");
        entry.set("year", "1983");
        entry.set("year", "1984");
        assert_eq!(entry.fields.len(), 1);
        assert_eq!(entry.get("year"), Some("1984"));
    }
}
