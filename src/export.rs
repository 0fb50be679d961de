//! Publication JSON export
//!
//! Flattens parsed entries into the records the publication list front end
//! consumes: display author names, venue fields, normalized URL, a human
//! type label and normalized topic tags. Field names serialize in
//! camelCase to match the consumer.

use serde::Serialize;
use std::path::Path;

use crate::bibliography::Bibliography;
use crate::error::Result;
use crate::model::{Author, Entry};

/// One publication as consumed by the site front end
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicationRecord {
    /// Citation key
    pub cite: String,
    /// Title, raw
    pub title: String,
    /// Display author names in source order
    pub authors: Vec<String>,
    /// Publication year
    pub year: String,
    /// Venue and provenance fields, empty when absent
    pub journal: String,
    /// Book title for collection and proceedings papers
    pub booktitle: String,
    /// Publisher
    pub publisher: String,
    /// Free-form publication note (preprints)
    pub howpublished: String,
    /// Institution for technical reports
    pub institution: String,
    /// Organization for proceedings
    pub organization: String,
    /// School for theses
    pub school: String,
    /// Series
    pub series: String,
    /// Note
    pub note: String,
    /// Normalized URL
    pub url: String,
    /// DOI
    pub doi: String,
    /// Human-readable entry type label
    pub type_label: String,
    /// Raw topic tags from the keywords field
    pub topics: Vec<String>,
    /// Topic tags lowercased with spaces dashed, for filtering
    pub topics_normalized: Vec<String>,
    /// Position in the parsed entry list
    pub position: usize,
}

impl PublicationRecord {
    /// Flatten one entry into a front-end record
    #[must_use]
    pub fn from_entry(entry: &Entry, position: usize) -> Self {
        let field = |name: &str| entry.get(name).unwrap_or_default().to_string();
        let (topics, topics_normalized) = extract_topics(entry);
        Self {
            cite: entry.cite.clone(),
            title: field("title"),
            authors: author_names(entry),
            year: field("year"),
            journal: field("journal"),
            booktitle: field("booktitle"),
            publisher: field("publisher"),
            howpublished: field("howpublished"),
            institution: field("institution"),
            organization: field("organization"),
            school: field("school"),
            series: field("series"),
            note: field("note"),
            url: normalize_url(entry.get("url").unwrap_or_default()),
            doi: field("doi"),
            type_label: type_label(&entry.entry_type).to_string(),
            topics,
            topics_normalized,
            position,
        }
    }
}

/// Map an entry type to the label shown on the publication list
#[must_use]
pub fn type_label(entry_type: &str) -> &'static str {
    match entry_type.to_ascii_lowercase().as_str() {
        "article" => "Journal article",
        "inproceedings" | "conference" => "Conference paper",
        "proceedings" => "Edited volume",
        "incollection" => "Workshop paper",
        "phdthesis" => "PhD thesis",
        "masterthesis" | "mastersthesis" => "Master's thesis",
        "techreport" | "manual" => "Technical report",
        "misc" | "unpublished" => "Preprint",
        "book" => "Book",
        _ => "Other",
    }
}

/// Site-relative paper links are served from the root
fn normalize_url(url: &str) -> String {
    let trimmed = url.trim();
    match trimmed.strip_prefix("./papers") {
        Some(rest) => format!("/papers{rest}"),
        None => trimmed.to_string(),
    }
}

/// Display name in natural "First von Last, Jr" order
fn display_name(author: &Author) -> String {
    let mut name = [
        author.first.as_str(),
        author.von.as_str(),
        author.last.as_str(),
    ]
    .iter()
    .filter(|part| !part.is_empty())
    .copied()
    .collect::<Vec<_>>()
    .join(" ");
    if !author.jr.is_empty() {
        name.push_str(", ");
        name.push_str(&author.jr);
    }
    name
}

fn author_names(entry: &Entry) -> Vec<String> {
    match &entry.authors {
        Some(authors) => authors.iter().map(display_name).collect(),
        None => entry
            .get("author")
            .unwrap_or_default()
            .replace('\n', " ")
            .split(" and ")
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect(),
    }
}

/// Raw and normalized topic tags from the keywords (or topic) field
fn extract_topics(entry: &Entry) -> (Vec<String>, Vec<String>) {
    let raw = entry
        .get("keywords")
        .or_else(|| entry.get("topic"))
        .unwrap_or_default();
    let topics: Vec<String> = raw
        .replace(';', ",")
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect();
    let normalized = topics
        .iter()
        .map(|topic| topic.to_lowercase().replace(' ', "-"))
        .collect();
    (topics, normalized)
}

/// Flatten every entry of a bibliography into front-end records
#[must_use]
pub fn to_records(bibliography: &Bibliography) -> Vec<PublicationRecord> {
    bibliography
        .entries()
        .iter()
        .enumerate()
        .map(|(position, entry)| PublicationRecord::from_entry(entry, position))
        .collect()
}

/// Serialize a bibliography's publication records to pretty JSON
pub fn to_json(bibliography: &Bibliography) -> Result<String> {
    Ok(serde_json::to_string_pretty(&to_records(bibliography))?)
}

/// Write a bibliography's publication records to a JSON file
pub fn to_json_file(bibliography: &Bibliography, path: impl AsRef<Path>) -> Result<()> {
    std::fs::write(path, to_json(bibliography)?)?;
    Ok(())
}
