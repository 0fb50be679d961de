//! Run-time configuration for a parse run

use crate::error::{Error, Result};

/// Options controlling parsing, validation and value transforms
///
/// The set is fixed per run: a [`crate::Bibliography`] keeps the options it
/// was parsed with and the serializers consult the same set.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// Strip matching outer delimiters (`{...}` or `"..."`) from values
    pub strip_delimiter: bool,
    /// Emit warnings for suspicious values, entry types and duplicate keys
    pub validate: bool,
    /// Collapse whitespace runs in values to a single space
    pub unwrap: bool,
    /// Wrap values at this width in the BibTeX serializer; 0 disables
    pub word_wrap_width: usize,
    /// String inserted at each wrap point
    pub word_wrap_break: String,
    /// Break words longer than the width instead of overflowing
    pub word_wrap_cut: bool,
    /// Remove one layer of inner curly braces from values
    pub remove_curly_braces: bool,
    /// Decompose the `author` field into name components
    pub extract_authors: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            strip_delimiter: true,
            validate: true,
            unwrap: false,
            word_wrap_width: 0,
            word_wrap_break: "\n".to_string(),
            word_wrap_cut: false,
            remove_curly_braces: false,
            extract_authors: true,
        }
    }
}

/// A dynamically typed option value for [`Options::set`]
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    /// Boolean switch
    Bool(bool),
    /// Numeric value (word wrap width)
    Number(usize),
    /// Text value (word wrap break)
    Text(String),
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<usize> for OptionValue {
    fn from(value: usize) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl OptionValue {
    fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    fn as_number(&self) -> Option<usize> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl Options {
    /// Set an option by name
    ///
    /// Unknown names fail with [`Error::UnknownOption`]; a value of the
    /// wrong shape fails with [`Error::InvalidOptionValue`]. Neither affects
    /// any option already set.
    pub fn set(&mut self, name: &str, value: impl Into<OptionValue>) -> Result<()> {
        let value = value.into();
        match name {
            "strip_delimiter" => self.strip_delimiter = expect_bool(name, &value)?,
            "validate" => self.validate = expect_bool(name, &value)?,
            "unwrap" => self.unwrap = expect_bool(name, &value)?,
            "word_wrap_width" => self.word_wrap_width = expect_number(name, &value)?,
            "word_wrap_break" => self.word_wrap_break = expect_text(name, &value)?.to_string(),
            "word_wrap_cut" => self.word_wrap_cut = expect_bool(name, &value)?,
            "remove_curly_braces" => self.remove_curly_braces = expect_bool(name, &value)?,
            "extract_authors" => self.extract_authors = expect_bool(name, &value)?,
            other => return Err(Error::UnknownOption(other.to_string())),
        }
        Ok(())
    }
}

fn expect_bool(name: &str, value: &OptionValue) -> Result<bool> {
    value.as_bool().ok_or_else(|| Error::InvalidOptionValue {
        option: name.to_string(),
        expected: "boolean",
    })
}

fn expect_number(name: &str, value: &OptionValue) -> Result<usize> {
    value.as_number().ok_or_else(|| Error::InvalidOptionValue {
        option: name.to_string(),
        expected: "number",
    })
}

fn expect_text<'v>(name: &str, value: &'v OptionValue) -> Result<&'v str> {
    value.as_text().ok_or_else(|| Error::InvalidOptionValue {
        option: name.to_string(),
        expected: "string",
    })
}
