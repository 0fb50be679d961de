//! Author-name decomposition
//!
//! Splits a raw `author` field into persons and each person into the
//! first/von/last/jr components of BibTeX convention. Word class is decided
//! by letter case, with a lookahead to tell a capitalized von particle from
//! the start of a multi-word last name.

use super::transform;
use crate::model::Author;

/// Letter-case class of a name token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenCase {
    /// First letter outside brace nesting is uppercase
    Upper,
    /// First letter outside brace nesting is lowercase
    Lower,
    /// No letter outside brace nesting at all
    Caseless,
}

/// Classify a token by the first ASCII letter found outside brace nesting
fn token_case(word: &str) -> TokenCase {
    let mut depth = 0i64;
    for byte in word.trim().bytes() {
        match byte {
            b'{' => depth += 1,
            b'}' => depth -= 1,
            b'A'..=b'Z' if depth == 0 => return TokenCase::Upper,
            b'a'..=b'z' if depth == 0 => return TokenCase::Lower,
            _ => {}
        }
    }
    TokenCase::Caseless
}

/// Split a raw author field on `" and "` and decompose each name
pub(crate) fn decompose_list(raw: &str) -> Vec<Author> {
    transform::unwrap(raw)
        .split(" and ")
        .map(|name| decompose(name.trim()))
        .collect()
}

/// Decompose a single name, choosing the grammar by the presence of a comma
fn decompose(name: &str) -> Author {
    if name.contains(',') {
        comma_form(name)
    } else {
        plain_form(name)
    }
}

/// "First von Last": no comma, word class decides the buckets
fn plain_form(name: &str) -> Author {
    let tokens: Vec<&str> = name.split_whitespace().collect();
    match tokens.len() {
        0 => Author::default(),
        1 => Author::new("", "", tokens[0], ""),
        2 => Author::new(tokens[0], "", tokens[1], ""),
        len => {
            let mut first: Vec<&str> = Vec::new();
            let mut von: Vec<&str> = Vec::new();
            let mut last: Vec<&str> = Vec::new();
            let mut in_von = false;
            let mut in_last = false;
            for (j, &token) in tokens.iter().enumerate().take(len - 1) {
                if in_last {
                    last.push(token);
                } else if in_von {
                    let case = token_case(token);
                    if case == TokenCase::Upper {
                        von.push(token);
                        continue;
                    }
                    // A lowercase or caseless token only flips to the last
                    // name when no lowercase token remains ahead
                    if lowercase_ahead(&tokens, j + 1) {
                        von.push(token);
                    } else {
                        in_last = true;
                        if case == TokenCase::Caseless {
                            last.push(token);
                        } else {
                            von.push(token);
                        }
                    }
                } else if token_case(token) == TokenCase::Lower {
                    in_von = true;
                    von.push(token);
                } else {
                    first.push(token);
                }
            }
            // The final token is always part of the last name
            last.push(tokens[len - 1]);
            Author::new(&first.join(" "), &von.join(" "), &last.join(" "), "")
        }
    }
}

/// "von Last, First" or "von Last, Jr, First"
fn comma_form(name: &str) -> Author {
    let segments: Vec<&str> = name.split(',').collect();
    let (von, last) = split_von_last(segments[0]);
    let jr = if segments.len() == 3 { segments[1] } else { "" };
    let first = segments.last().copied().unwrap_or_default();
    Author::new(first, &von, &last, jr)
}

/// Decompose the leading "von Last" segment of the comma form
fn split_von_last(segment: &str) -> (String, String) {
    let tokens: Vec<&str> = segment.split_whitespace().collect();
    match tokens.len() {
        0 => (String::new(), String::new()),
        1 => (String::new(), tokens[0].to_string()),
        len => {
            let mut von: Vec<&str> = Vec::new();
            let mut last: Vec<&str> = Vec::new();
            let mut in_last = false;
            for (j, &token) in tokens.iter().enumerate().take(len - 1) {
                if in_last {
                    last.push(token);
                } else if token_case(token) != TokenCase::Lower {
                    if lowercase_ahead(&tokens, j + 1) {
                        von.push(token);
                    } else {
                        in_last = true;
                        last.push(token);
                    }
                } else {
                    von.push(token);
                }
            }
            last.push(tokens[len - 1]);
            (von.join(" "), last.join(" "))
        }
    }
}

/// True when any token in `tokens[from..len-1]` is lowercase, meaning the
/// von particle run has not ended yet
fn lowercase_ahead(tokens: &[&str], from: usize) -> bool {
    tokens[from..tokens.len() - 1]
        .iter()
        .any(|t| token_case(t) == TokenCase::Lower)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_token_case() {
        assert_eq!(token_case("Albert"), TokenCase::Upper);
        assert_eq!(token_case("von"), TokenCase::Lower);
        assert_eq!(token_case("123"), TokenCase::Caseless);
        assert_eq!(token_case("{-}"), TokenCase::Caseless);
        // Braced prefix is skipped, the first letter outside decides
        assert_eq!(token_case("{\\'E}cole"), TokenCase::Lower);
        assert_eq!(token_case("{von}Neumann"), TokenCase::Upper);
    }

    #[test]
    fn test_single_and_double_token_names() {
        assert_eq!(decompose("Plato"), Author::new("", "", "Plato", ""));
        assert_eq!(
            decompose("Albert Einstein"),
            Author::new("Albert", "", "Einstein", "")
        );
    }

    #[test]
    fn test_von_particle() {
        assert_eq!(
            decompose("Ludwig van Beethoven"),
            Author::new("Ludwig", "van", "Beethoven", "")
        );
    }

    #[test]
    fn test_capitalized_particle_resolved_by_lookahead() {
        // "La" follows a lowercase particle and no lowercase token remains
        // before the final one, yet it still belongs to the particle run
        assert_eq!(
            decompose("Jean de La Fontaine"),
            Author::new("Jean", "de La", "Fontaine", "")
        );
    }

    #[test]
    fn test_multi_word_last_after_particle() {
        assert_eq!(
            decompose("Johannes van der Waals"),
            Author::new("Johannes", "van der", "Waals", "")
        );
    }

    #[test]
    fn test_comma_form() {
        assert_eq!(
            decompose("von Neumann, John"),
            Author::new("John", "von", "Neumann", "")
        );
        assert_eq!(
            decompose("Fontaine, Jean de La"),
            Author::new("Jean de La", "", "Fontaine", "")
        );
    }

    #[test]
    fn test_comma_form_with_jr() {
        assert_eq!(
            decompose("Davis, Jr, Sammy"),
            Author::new("Sammy", "", "Davis", "Jr"),
        );
    }

    #[test]
    fn test_list_split_and_unwrap() {
        let authors = decompose_list("Albert Einstein and\n    von Neumann, John");
        assert_eq!(
            authors,
            vec![
                Author::new("Albert", "", "Einstein", ""),
                Author::new("John", "von", "Neumann", ""),
            ]
        );
    }

    #[test]
    fn test_caseless_token_joins_last_on_flip() {
        // "123" is caseless; nothing lowercase remains, so it flips to last
        assert_eq!(
            decompose("Jean de 123 Fontaine"),
            Author::new("Jean", "de", "123 Fontaine", "")
        );
    }
}
