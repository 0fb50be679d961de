//! Tolerant single-pass BibTeX parsing
//!
//! The segmenter walks the source once with an explicit two-state machine
//! and a brace-depth counter, carving out one `@type{...}` block at a time
//! and handing each to the field parser. Text outside `@`-initiated blocks
//! is ignored, which tolerates comments between entries.

pub(crate) mod author;
pub(crate) mod entry;
pub(crate) mod scanner;
pub(crate) mod transform;

use ahash::AHashMap;

use crate::model::Entry;
use crate::options::Options;
use crate::warning::{Warning, WarningKind};

/// Raw outcome of one scan over the source text
#[derive(Debug)]
pub(crate) struct ScanOutcome {
    pub entries: Vec<Entry>,
    pub warnings: Vec<Warning>,
    /// False when the source ended with an unrecoverable depth imbalance
    pub balanced: bool,
}

/// Scanner state: either between entries or buffering one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    OutsideEntry,
    InsideEntry,
}

/// Scan the whole source, segmenting and parsing every entry
pub(crate) fn scan_source(input: &str, options: &Options) -> ScanOutcome {
    let chars: Vec<char> = input.chars().collect();
    let mut entries = Vec::new();
    let mut warnings = Vec::new();
    let mut balanced = true;
    let mut state = ScanState::OutsideEntry;
    let mut depth = 0i64;
    let mut buffer = String::new();
    let mut last = '\0';
    let mut i = 0;

    while i < chars.len() {
        let mut ch = chars[i];
        let mut advance = true;

        if depth != 0 && ch == '@' && !scanner::at_inside_value(&buffer) {
            // The previous entry is missing its end brace. Synthesize one
            // and reprocess the '@' as the start of the next entry.
            warnings.push(Warning::new(WarningKind::MissingEndBrace, "", &buffer));
            ch = '}';
            advance = false;
        }

        if depth == 0 && ch == '@' {
            state = ScanState::InsideEntry;
        } else if state == ScanState::InsideEntry && ch == '{' && last != '\\' {
            depth += 1;
        } else if state == ScanState::InsideEntry && ch == '}' && last != '\\' {
            depth -= 1;
            if depth < 0 {
                // More braces closed than opened
                balanced = false;
            }
            if depth == 0 {
                state = ScanState::OutsideEntry;
                if let Some(parsed) = entry::parse_entry(&buffer, options, &mut warnings) {
                    entries.push(parsed);
                }
                buffer.clear();
            }
        }
        if state == ScanState::InsideEntry {
            buffer.push(ch);
        }
        last = ch;
        if advance {
            i += 1;
        }
    }

    // A terminal depth of exactly one usually means the very last end brace
    // is missing; close the entry anyway.
    if depth == 1 {
        if let Some(parsed) = entry::parse_entry(&buffer, options, &mut warnings) {
            entries.push(parsed);
        }
        depth = 0;
    }
    if depth != 0 {
        balanced = false;
    }

    if options.validate {
        check_duplicate_cites(&entries, &mut warnings);
    }

    ScanOutcome {
        entries,
        warnings,
        balanced,
    }
}

/// Report every citation key used by two or more entries, once, in
/// first-occurrence order
fn check_duplicate_cites(entries: &[Entry], warnings: &mut Vec<Warning>) {
    let mut counts: AHashMap<&str, usize> = AHashMap::new();
    let mut order: Vec<&str> = Vec::new();
    for entry in entries {
        let count = counts.entry(entry.cite.as_str()).or_insert(0);
        if *count == 0 {
            order.push(&entry.cite);
        }
        *count += 1;
    }
    let duplicates: Vec<&str> = order
        .into_iter()
        .filter(|cite| counts[cite] >= 2)
        .collect();
    if !duplicates.is_empty() {
        warnings.push(Warning::new(
            WarningKind::MultipleEntries,
            duplicates.join(","),
            "",
        ));
    }
}
