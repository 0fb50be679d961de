//! Serializers: BibTeX, RTF and HTML output
//!
//! Each serializer walks the entry list and substitutes display fields into
//! a template string. Missing fields render as empty text; only an entry
//! with no title, journal, year and authors at all is skipped, with a
//! [`WarningKind::LineNotConverted`] warning.

use crate::bibliography::Bibliography;
use crate::model::{Author, Entry};
use crate::parser::transform;
use crate::warning::{Warning, WarningKind};

/// Template strings used by the serializers, placeholders substituted
/// verbatim
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Templates {
    /// Per-author format, placeholders `VON`, `LAST`, `JR`, `FIRST`
    pub author: String,
    /// Per-entry RTF line, placeholders `AUTHORS`, `TITLE`, `JOURNAL`, `YEAR`
    pub rtf: String,
    /// Per-entry HTML line, same placeholders as the RTF template
    pub html: String,
}

impl Default for Templates {
    fn default() -> Self {
        Self {
            author: "VON LAST, JR, FIRST".to_string(),
            rtf: r#"AUTHORS, "{\b TITLE}", {\i JOURNAL}, YEAR"#.to_string(),
            html: "AUTHORS, \"<strong>TITLE</strong>\", <em>JOURNAL</em>, YEAR<br />".to_string(),
        }
    }
}

/// Format one decomposed author through the author template
fn format_author(author: &Author, template: &str) -> String {
    template
        .replace("VON", &author.von)
        .replace("LAST", &author.last)
        .replace("JR", &author.jr)
        .replace("FIRST", &author.first)
        .trim()
        .to_string()
}

/// Join an entry's authors for display, through the author template when
/// they were decomposed, raw otherwise
fn joined_authors(entry: &Entry, template: &str, separator: &str) -> String {
    match &entry.authors {
        Some(authors) => authors
            .iter()
            .map(|a| format_author(a, template))
            .collect::<Vec<_>>()
            .join(separator),
        None => entry.get("author").unwrap_or_default().to_string(),
    }
}

/// The four display fields of an entry, whitespace-unwrapped
fn display_fields(entry: &Entry, author_template: &str) -> (String, String, String, String) {
    let title = transform::unwrap(entry.get("title").unwrap_or_default());
    let journal = transform::unwrap(entry.get("journal").unwrap_or_default());
    let year = transform::unwrap(entry.get("year").unwrap_or_default());
    let authors = joined_authors(entry, author_template, ", ");
    (title, journal, year, authors)
}

impl Bibliography {
    /// Serialize all entries back to BibTeX text
    ///
    /// The author field is always emitted last, rebuilt through the author
    /// template when authors were decomposed.
    #[must_use]
    pub fn to_bibtex(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            out.push('@');
            out.push_str(&entry.entry_type);
            out.push_str(" { ");
            out.push_str(&entry.cite);
            out.push_str(",\n");
            for field in &entry.fields {
                if field.name == "author" {
                    continue;
                }
                let value = if self.options.word_wrap_width > 0 {
                    transform::word_wrap(
                        &field.value,
                        self.options.word_wrap_width,
                        &self.options.word_wrap_break,
                        self.options.word_wrap_cut,
                    )
                } else {
                    field.value.clone()
                };
                out.push('\t');
                out.push_str(&field.name);
                out.push_str(" = {");
                out.push_str(&value);
                out.push_str("},\n");
            }
            let author = joined_authors(entry, &self.templates.author, " and ");
            out.push_str("\tauthor = {");
            out.push_str(&author);
            out.push_str("}\n}\n\n");
        }
        out
    }

    /// Serialize all entries to a minimal RTF document
    ///
    /// Entries with none of the display fields are skipped with a warning.
    pub fn to_rtf(&mut self) -> String {
        let mut out = String::from("{\\rtf\n");
        for i in 0..self.entries.len() {
            let entry = &self.entries[i];
            let (title, journal, year, authors) = display_fields(entry, &self.templates.author);
            if title.is_empty() && journal.is_empty() && year.is_empty() && authors.is_empty() {
                self.warnings.push(Warning::new(
                    WarningKind::LineNotConverted,
                    "",
                    format!("{entry:?}"),
                ));
                continue;
            }
            let line = self
                .templates
                .rtf
                .replace("TITLE", &title)
                .replace("JOURNAL", &journal)
                .replace("YEAR", &year)
                .replace("AUTHORS", &authors);
            out.push_str(&line);
            out.push_str("\n\\par\n");
        }
        out.push('}');
        out
    }

    /// Serialize all entries to an HTML fragment wrapped in `<p>...</p>`
    pub fn to_html(&mut self) -> String {
        self.to_html_range(0, self.entries.len())
    }

    /// Serialize the entry subrange `[min, max)` to an HTML fragment
    pub fn to_html_range(&mut self, min: usize, max: usize) -> String {
        let max = max.min(self.entries.len());
        let mut out = String::from("<p>\n");
        for i in min..max {
            let entry = &self.entries[i];
            let (title, journal, year, authors) = display_fields(entry, &self.templates.author);
            if title.is_empty() && journal.is_empty() && year.is_empty() && authors.is_empty() {
                self.warnings.push(Warning::new(
                    WarningKind::LineNotConverted,
                    "",
                    format!("{entry:?}"),
                ));
                continue;
            }
            let line = self
                .templates
                .html
                .replace("TITLE", &title)
                .replace("JOURNAL", &journal)
                .replace("YEAR", &year)
                .replace("AUTHORS", &authors);
            out.push_str(&line);
            out.push('\n');
        }
        out.push_str("</p>\n");
        out
    }
}
