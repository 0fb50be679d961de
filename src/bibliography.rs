//! Parsed bibliography: the result of one parse run
//!
//! A [`Bibliography`] owns the entries and warnings of exactly one run,
//! together with the options the run was parsed with and the templates its
//! serializers use. Parsing again produces a fresh value; nothing leaks
//! between runs.

use ahash::AHashMap;
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::Entry;
use crate::options::Options;
use crate::parser;
use crate::render::Templates;
use crate::warning::Warning;

/// A parsed BibTeX bibliography
#[derive(Debug, Clone, Default)]
pub struct Bibliography {
    pub(crate) entries: Vec<Entry>,
    pub(crate) warnings: Vec<Warning>,
    pub(crate) options: Options,
    pub(crate) templates: Templates,
}

impl Bibliography {
    /// Create an empty bibliography with default options
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a BibTeX source string with default options
    pub fn parse(input: &str) -> Result<Self> {
        Self::parse_with_options(input, Options::default())
    }

    /// Parse a BibTeX source string with the given options
    ///
    /// A terminal brace imbalance deeper than the tolerated single missing
    /// end brace fails with [`Error::UnbalancedBraces`]; the error carries
    /// everything parsed up to that point, so partial results stay
    /// renderable.
    pub fn parse_with_options(input: &str, options: Options) -> Result<Self> {
        let outcome = parser::scan_source(input, &options);
        let bibliography = Self {
            entries: outcome.entries,
            warnings: outcome.warnings,
            options,
            templates: Templates::default(),
        };
        if outcome.balanced {
            Ok(bibliography)
        } else {
            Err(Error::UnbalancedBraces {
                partial: Box::new(bibliography),
            })
        }
    }

    /// Parse a BibTeX file with default options
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse a BibTeX file with the given options
    pub fn from_file_with_options(path: impl AsRef<Path>, options: Options) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_with_options(&content, options)
    }

    /// All parsed entries, in source order
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// All warnings accumulated so far, in the order they were generated
    #[must_use]
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// The options this bibliography was parsed with
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The templates used by the serializers
    #[must_use]
    pub fn templates(&self) -> &Templates {
        &self.templates
    }

    /// Replace the serializer templates
    pub fn set_templates(&mut self, templates: Templates) {
        self.templates = templates;
    }

    /// Append an entry built programmatically
    pub fn add_entry(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no entries were parsed or added
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when at least one warning accumulated
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Drop all accumulated warnings
    pub fn clear_warnings(&mut self) {
        self.warnings.clear();
    }

    /// Find an entry by citation key
    #[must_use]
    pub fn find_by_key(&self, cite: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.cite == cite)
    }

    /// All entries of the given type
    #[must_use]
    pub fn find_by_type(&self, entry_type: &str) -> Vec<&Entry> {
        self.entries
            .iter()
            .filter(|e| e.entry_type.eq_ignore_ascii_case(entry_type))
            .collect()
    }

    /// Entry counts keyed by entry type
    #[must_use]
    pub fn statistics(&self) -> AHashMap<String, usize> {
        let mut counts = AHashMap::new();
        for entry in &self.entries {
            *counts.entry(entry.entry_type.clone()).or_insert(0) += 1;
        }
        counts
    }
}
