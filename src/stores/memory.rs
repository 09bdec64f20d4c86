//! In-memory stores.
//!
//! Fixture-friendly implementations used by tests and small deployments;
//! everything lives in maps built up front.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::catalog::{BookId, CanonicalBook};
use crate::error::Result;
use crate::stores::{ChapterText, NameSource, VerseStore, VersionStore};
use crate::types::{Verse, Version};

/// Name source over a pre-built book list.
#[derive(Debug, Clone, Default)]
pub struct MemoryNameSource {
    books: Vec<CanonicalBook>,
}

impl MemoryNameSource {
    /// Wrap an existing book list.
    pub const fn new(books: Vec<CanonicalBook>) -> Self {
        Self { books }
    }
}

#[async_trait]
impl NameSource for MemoryNameSource {
    async fn books(&self) -> Result<Vec<CanonicalBook>> {
        Ok(self.books.clone())
    }
}

/// Version store over a pre-built abbreviation map.
#[derive(Debug, Clone, Default)]
pub struct MemoryVersionStore {
    versions: HashMap<String, Version>,
}

impl MemoryVersionStore {
    /// Build from a list of versions, keyed by abbreviation.
    pub fn new(versions: impl IntoIterator<Item = Version>) -> Self {
        Self {
            versions: versions
                .into_iter()
                .map(|v| (v.abbreviation.clone(), v))
                .collect(),
        }
    }
}

#[async_trait]
impl VersionStore for MemoryVersionStore {
    async fn version(&self, abbreviation: &str) -> Result<Option<Version>> {
        Ok(self.versions.get(abbreviation).cloned())
    }
}

/// Verse store over pre-loaded chapters keyed by (version, book, chapter).
#[derive(Debug, Clone, Default)]
pub struct MemoryVerseStore {
    chapters: HashMap<(String, BookId, u16), Vec<String>>,
}

impl MemoryVerseStore {
    /// Empty store; populate with [`MemoryVerseStore::insert_chapter`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert one chapter's verses in order, verse 1 first.
    pub fn insert_chapter(
        &mut self,
        version: &str,
        book: BookId,
        chapter: u16,
        verses: impl IntoIterator<Item = impl Into<String>>,
    ) {
        self.chapters.insert(
            (version.to_string(), book, chapter),
            verses.into_iter().map(Into::into).collect(),
        );
    }
}

#[async_trait]
impl VerseStore for MemoryVerseStore {
    async fn chapter(
        &self,
        version: &Version,
        book: &CanonicalBook,
        chapter: u16,
    ) -> Result<Option<ChapterText>> {
        let key = (version.abbreviation.clone(), book.id, chapter);
        Ok(self.chapters.get(&key).map(|texts| ChapterText {
            verses: texts
                .iter()
                .enumerate()
                .map(|(i, text)| Verse {
                    number: u16::try_from(i + 1).unwrap_or(u16::MAX),
                    text: text.clone(),
                })
                .collect(),
        }))
    }
}
