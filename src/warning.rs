//! Non-fatal diagnostics accumulated during a parse run

use serde::Serialize;
use std::fmt;

/// Category of a parse or render warning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum WarningKind {
    /// An `@` turned up inside an open entry; a closing brace was synthesized
    MissingEndBrace,
    /// Two or more entries share a citation key
    MultipleEntries,
    /// The entry type is not in [`crate::model::ALLOWED_ENTRY_TYPES`]
    NotAllowedEntryType,
    /// A brace-delimited value contains an `@`
    AtInBraces,
    /// A quote-delimited value contains an escaped double quote
    EscapedQuoteInQuotedValue,
    /// A value contains an unbalanced amount of braces
    UnbalancedBracesInValue,
    /// An entry had none of title, journal, year or authors and was skipped
    /// by a display serializer
    LineNotConverted,
    /// `@string` blocks are recognized but not parsed
    StringEntryNotSupported,
    /// `@preamble` blocks are recognized but not parsed
    PreambleEntryNotSupported,
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::MissingEndBrace => "missing end brace",
            Self::MultipleEntries => "multiple entries with the same citation key",
            Self::NotAllowedEntryType => "entry type is not allowed",
            Self::AtInBraces => "at sign inside a braced value",
            Self::EscapedQuoteInQuotedValue => "escaped double quote inside a quoted value",
            Self::UnbalancedBracesInValue => "unbalanced amount of braces in value",
            Self::LineNotConverted => "line was not converted",
            Self::StringEntryNotSupported => "string entries are not supported",
            Self::PreambleEntryNotSupported => "preamble entries are not supported",
        };
        f.write_str(text)
    }
}

/// A single warning with enough raw context for diagnosis
///
/// Warnings never abort parsing; they accumulate in order on the run that
/// produced them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    /// What went wrong
    pub kind: WarningKind,
    /// The offending fragment (value, entry type or key list)
    pub entry: String,
    /// The whole raw entry the fragment came from, when available
    pub whole_entry: String,
}

impl Warning {
    /// Create a new warning
    #[must_use]
    pub fn new(kind: WarningKind, entry: impl Into<String>, whole_entry: impl Into<String>) -> Self {
        Self {
            kind,
            entry: entry.into(),
            whole_entry: whole_entry.into(),
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.entry.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}: {}", self.kind, self.entry)
        }
    }
}
