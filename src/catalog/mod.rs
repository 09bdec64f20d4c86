//! Book catalog and alias index.
//!
//! The catalog is a static-after-load mapping from canonical book identity
//! to metadata. The alias index inverts it: every normalized spelling
//! variant ("gen", "1 john", "Cantique des Cantiques") points back at its
//! canonical book. Both are built once at startup from a [`NameSource`]
//! and shared immutably by reference into every pipeline invocation.
//!
//! [`NameSource`]: crate::stores::NameSource

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::constants::MAX_ALIAS_TOKENS;
use crate::error::{Error, Result};

/// Stable identifier of a canonical book, distinct from any display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BookId(pub u16);

impl std::fmt::Display for BookId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which testament a book belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Testament {
    /// Old Testament.
    Old,
    /// New Testament.
    New,
    /// Deuterocanonical / apocryphal books.
    Deuterocanon,
}

/// Display names and aliases for one book in one language.
///
/// The first entry is the preferred display name; every entry is a
/// recognized alias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookNames {
    /// Language tag (e.g., "english").
    pub language: String,
    /// Display name first, then abbreviations and variants.
    pub names: Vec<String>,
}

/// The language-independent identity of a scripture book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalBook {
    /// Stable ordinal identifier.
    pub id: BookId,
    /// Testament the book belongs to.
    pub testament: Testament,
    /// Native chapter count, when the name source provides it.
    pub chapters: Option<u16>,
    /// Per-language display names and aliases.
    pub names: Vec<BookNames>,
}

impl CanonicalBook {
    /// Preferred display name for a language, falling back to the first
    /// language the name source listed.
    pub fn display_name(&self, language: &str) -> &str {
        self.names
            .iter()
            .find(|n| n.language.eq_ignore_ascii_case(language))
            .or_else(|| self.names.first())
            .and_then(|n| n.names.first())
            .map_or("", String::as_str)
    }
}

/// Normalize an alias for comparison: lowercase, internal whitespace
/// collapsed to single spaces. Diacritics are preserved; an unaccented
/// variant must come from the name source itself.
pub fn normalize_alias(raw: &str) -> String {
    raw.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Inverted index from every normalized alias to its canonical book.
///
/// Immutable after [`AliasIndex::build`]; safe for unsynchronized
/// concurrent reads from any number of tasks.
#[derive(Debug, Clone)]
pub struct AliasIndex {
    books: HashMap<BookId, CanonicalBook>,
    aliases: HashMap<String, BookId>,
    max_alias_tokens: usize,
}

impl AliasIndex {
    /// Build the index from a loaded catalog.
    ///
    /// Fails with [`Error::CatalogLoad`] if the catalog is empty, a book
    /// carries no aliases at all, or two books share an id.
    pub fn build(catalog: Vec<CanonicalBook>) -> Result<Self> {
        if catalog.is_empty() {
            return Err(Error::catalog("name source returned no books"));
        }

        let mut books = HashMap::new();
        let mut aliases: HashMap<String, BookId> = HashMap::new();
        let mut max_alias_tokens = 1;

        for book in catalog {
            let id = book.id;
            let mut alias_count = 0;

            for names in &book.names {
                for raw in &names.names {
                    let alias = normalize_alias(raw);
                    if alias.is_empty() {
                        continue;
                    }
                    let tokens = alias.split(' ').count();
                    if tokens > MAX_ALIAS_TOKENS {
                        // The matcher never tries slices this long, so an
                        // indexed entry would be unreachable.
                        tracing::warn!(alias, tokens, "alias exceeds matcher limit, skipping");
                        continue;
                    }
                    alias_count += 1;
                    max_alias_tokens = max_alias_tokens.max(tokens);

                    match aliases.get(&alias).copied() {
                        Some(owner) if owner != id => {
                            // First book to claim an alias keeps it.
                            tracing::warn!(
                                alias,
                                first = %owner,
                                second = %id,
                                "duplicate alias, keeping first"
                            );
                        }
                        _ => {
                            aliases.insert(alias, id);
                        }
                    }
                }
            }

            if alias_count == 0 {
                return Err(Error::catalog(format!("book {id} has no aliases")));
            }
            if books.insert(id, book).is_some() {
                return Err(Error::catalog(format!("duplicate book id {id}")));
            }
        }

        Ok(Self { books, aliases, max_alias_tokens })
    }

    /// Look up a book by id.
    pub fn book(&self, id: BookId) -> Option<&CanonicalBook> {
        self.books.get(&id)
    }

    /// Longest alias match starting at the first of `words`.
    ///
    /// Words are whole whitespace tokens, so an alias can never match
    /// inside a larger word. Returns the matched book and how many words
    /// the alias consumed; prefers the longest alias ("1 John" over
    /// "John" when both fit).
    pub fn longest_match(&self, words: &[&str]) -> Option<(BookId, usize)> {
        let limit = self.max_alias_tokens.min(words.len());
        for take in (1..=limit).rev() {
            if words[..take].iter().any(|w| w.is_empty()) {
                continue;
            }
            let key = normalize_alias(&words[..take].join(" "));
            if let Some(&id) = self.aliases.get(&key) {
                return Some((id, take));
            }
        }
        None
    }

    /// Number of books in the catalog.
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Whether the catalog is empty (never true for a built index).
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    fn book(id: u16, names: &[&str]) -> CanonicalBook {
        CanonicalBook {
            id: BookId(id),
            testament: Testament::New,
            chapters: Some(21),
            names: vec![BookNames {
                language: "english".to_string(),
                names: names.iter().map(ToString::to_string).collect(),
            }],
        }
    }

    #[test]
    fn build_rejects_empty_catalog() {
        let err = AliasIndex::build(Vec::new()).unwrap_err();
        assert!(matches!(err, Error::CatalogLoad(_)));
    }

    #[test]
    fn build_rejects_book_without_aliases() {
        let err = AliasIndex::build(vec![book(1, &[])]).unwrap_err();
        assert!(matches!(err, Error::CatalogLoad(_)));
    }

    #[test]
    fn overlong_alias_is_skipped_not_indexed() {
        let index = AliasIndex::build(vec![book(
            64,
            &["3 John", "The Third Epistle of John"],
        )])
        .unwrap();
        assert_eq!(index.longest_match(&["3", "John"]), Some((BookId(64), 2)));
        assert_eq!(
            index.longest_match(&["The", "Third", "Epistle", "of", "John"]),
            None
        );
    }

    #[test]
    fn book_with_only_overlong_aliases_fails_the_build() {
        let err = AliasIndex::build(vec![book(64, &["The Third Epistle of John"])]).unwrap_err();
        assert!(matches!(err, Error::CatalogLoad(_)));
    }

    #[test]
    fn lookup_is_case_insensitive_and_collapses_whitespace() {
        let index = AliasIndex::build(vec![book(62, &["1 John", "1 Jn"])]).unwrap();
        assert_eq!(index.longest_match(&["1", "JOHN"]), Some((BookId(62), 2)));
        assert_eq!(normalize_alias("  1   John "), "1 john");
    }

    #[test]
    fn longest_alias_wins_over_prefix() {
        let index = AliasIndex::build(vec![
            book(43, &["John"]),
            book(62, &["1 John"]),
        ])
        .unwrap();
        assert_eq!(index.longest_match(&["1", "John", "3:16"]), Some((BookId(62), 2)));
        assert_eq!(index.longest_match(&["John", "3:16"]), Some((BookId(43), 1)));
    }

    #[test]
    fn alias_never_matches_inside_larger_word() {
        let index = AliasIndex::build(vec![book(43, &["John"])]).unwrap();
        assert_eq!(index.longest_match(&["Johnson"]), None);
    }

    #[test]
    fn display_name_prefers_requested_language() {
        let mut b = book(1, &["Genesis", "Gen"]);
        b.names.push(BookNames {
            language: "french".to_string(),
            names: vec!["Genèse".to_string()],
        });
        assert_eq!(b.display_name("french"), "Genèse");
        assert_eq!(b.display_name("german"), "Genesis");
    }
}
