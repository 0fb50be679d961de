//! Error types for the bib-list crate

use crate::bibliography::Bibliography;
use thiserror::Error;

/// Result type for bib-list operations
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for bib-list
#[derive(Error, Debug)]
pub enum Error {
    /// The source text ended with an unresolved brace-depth imbalance.
    ///
    /// Everything parsed before the imbalance is still available in
    /// `partial`, warnings included. Partial results are intentional: a
    /// caller can render whatever was recovered.
    #[error("unbalanced braces in input")]
    UnbalancedBraces {
        /// Entries and warnings recovered before the failure
        partial: Box<Bibliography>,
    },

    /// Unknown configuration option name
    #[error("unknown option '{0}'")]
    UnknownOption(String),

    /// A configuration option was given a value of the wrong shape
    #[error("invalid value for option '{option}', expected {expected}")]
    InvalidOptionValue {
        /// The option that was being set
        option: String,
        /// The expected value shape
        expected: &'static str,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Recover the partially parsed bibliography, if this error carries one
    #[must_use]
    pub fn into_partial(self) -> Option<Bibliography> {
        match self {
            Self::UnbalancedBraces { partial } => Some(*partial),
            _ => None,
        }
    }
}
