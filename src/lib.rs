//! # bib-list
//!
//! A tolerant BibTeX parser and publication-list formatter.
//!
//! The parser trades strictness for recovery: it segments loosely
//! structured BibTeX text in a single pass, repairs missing end braces,
//! extracts fields by scanning for the rightmost valid `=` sign, and
//! decomposes author names into first/von/last/jr components. Problems
//! surface as accumulated [`Warning`]s rather than hard failures, and even
//! a fatally unbalanced input still yields the entries recovered before
//! the imbalance.
//!
//! ## Example
//!
//! ```
//! use bib_list::Bibliography;
//!
//! let input = r#"
//!     @article{einstein1905,
//!         author = {Albert Einstein},
//!         title = {Zur Elektrodynamik bewegter Koerper},
//!         journal = {Annalen der Physik},
//!         year = {1905}
//!     }
//! "#;
//!
//! let bib = Bibliography::parse(input)?;
//! assert_eq!(bib.len(), 1);
//!
//! let entry = &bib.entries()[0];
//! assert_eq!(entry.cite, "einstein1905");
//! assert_eq!(entry.get("title"), Some("Zur Elektrodynamik bewegter Koerper"));
//!
//! let authors = entry.authors.as_ref().unwrap();
//! assert_eq!(authors[0].first, "Albert");
//! assert_eq!(authors[0].last, "Einstein");
//! # Ok::<(), bib_list::Error>(())
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    missing_debug_implementations
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod error;
pub mod export;
pub mod latex;
pub mod model;
pub mod options;
pub mod warning;

mod bibliography;
mod parser;
mod render;

pub use bibliography::Bibliography;
pub use error::{Error, Result};
pub use export::PublicationRecord;
pub use model::{Author, Entry, Field};
pub use options::{OptionValue, Options};
pub use render::Templates;
pub use warning::{Warning, WarningKind};

/// Commonly used types
pub mod prelude {
    pub use crate::{
        Author, Bibliography, Entry, Error, Options, Result, Templates, Warning, WarningKind,
    };
}

/// Parse a BibTeX source string with default options
pub fn parse(input: &str) -> Result<Bibliography> {
    Bibliography::parse(input)
}

/// Parse a BibTeX file with default options
pub fn parse_file(path: impl AsRef<std::path::Path>) -> Result<Bibliography> {
    Bibliography::from_file(path)
}
