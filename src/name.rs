//! Name canonicalization
//!
//! Every entry is keyed by a canonical name: ASCII letters only, single
//! spaces between words, each word title-cased. Free-form input such as
//! `"chicken-soup_2!"` becomes `"Chicken Soup"`.

use crate::error::{CookbookError, Result};
use serde::Serialize;
use std::borrow::Borrow;
use std::fmt;

/// A name that has passed through [`canonicalize`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CanonicalName(String);

impl CanonicalName {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CanonicalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CanonicalName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for CanonicalName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for CanonicalName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for CanonicalName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Normalize a free-form name into its canonical form.
///
/// The steps run in a fixed order: reject input without letters, turn `-`
/// and `_` into spaces, drop everything that is not a letter or space,
/// lowercase, collapse spaces, then title-case each word.
pub fn canonicalize(raw: &str) -> Result<CanonicalName> {
    if !raw.chars().any(|c| c.is_ascii_alphabetic()) {
        return Err(CookbookError::NameRejected(raw.to_string()));
    }

    let letters: String = raw
        .chars()
        .map(|c| if c == '-' || c == '_' { ' ' } else { c })
        .filter(|c| c.is_ascii_alphabetic() || *c == ' ')
        .map(|c| c.to_ascii_lowercase())
        .collect();

    let words: Vec<String> = letters.split_whitespace().map(title_case).collect();

    Ok(CanonicalName(words.join(" ")))
}

/// Uppercase the first letter of an already-lowercase word.
fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_digits_and_punctuation() {
        assert_eq!(canonicalize("chicken-soup_2!").unwrap(), "Chicken Soup");
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(
            canonicalize("  mashed   potatoes  ").unwrap(),
            "Mashed Potatoes"
        );
    }

    #[test]
    fn test_mixed_case_input() {
        assert_eq!(canonicalize("Riz@z RISO00tto!").unwrap(), "Rizz Risotto");
        assert_eq!(canonicalize("alpHa-alFRedo").unwrap(), "Alpha Alfredo");
    }

    #[test]
    fn test_separator_runs_become_one_space() {
        assert_eq!(canonicalize("--beef__wellington--").unwrap(), "Beef Wellington");
        assert_eq!(canonicalize("a - b").unwrap(), "A B");
    }

    #[test]
    fn test_removed_characters_join_words() {
        // Stripping happens before collapsing, so "ri$ce" is one word
        assert_eq!(canonicalize("ri$ce").unwrap(), "Rice");
    }

    #[test]
    fn test_tabs_and_newlines_are_stripped() {
        assert_eq!(canonicalize("fried\trice").unwrap(), "Friedrice");
        assert_eq!(canonicalize("fried \n rice").unwrap(), "Fried Rice");
    }

    #[test]
    fn test_rejects_no_letters() {
        for raw in ["", "   ", "123", "!@#$%", "-_-", "42 - 7"] {
            let err = canonicalize(raw).unwrap_err();
            assert!(matches!(err, CookbookError::NameRejected(_)), "{raw:?}");
        }
    }

    #[test]
    fn test_non_ascii_letters_do_not_count() {
        assert!(canonicalize("ñ").is_err());
        assert_eq!(canonicalize("jalapeño").unwrap(), "Jalapeo");
    }

    #[test]
    fn test_idempotent() {
        for raw in [
            "chicken-soup_2!",
            "  mashed   potatoes  ",
            "Riz@z RISO00tto!",
            "x",
            "ALL CAPS NAME",
        ] {
            let once = canonicalize(raw).unwrap();
            let twice = canonicalize(once.as_str()).unwrap();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let name = canonicalize("egg").unwrap();
        assert_eq!(serde_json::to_string(&name).unwrap(), "\"Egg\"");
    }
}
