//! External store collaborators.
//!
//! The engine owns no storage or wire format; books, versions, and verse
//! text all come in through these traits. File-backed and in-memory
//! implementations live in the submodules, plus an HTTP name source for
//! the startup book-name fetch.

pub mod http;
pub mod json;
pub mod memory;

use async_trait::async_trait;

use crate::catalog::CanonicalBook;
use crate::error::Result;
use crate::types::{Verse, Version};

/// Ordered verse texts for one chapter of one translation.
///
/// The number of verses here is authoritative for that translation;
/// per-translation verse counts can differ from the catalog's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterText {
    /// Verses in ascending order.
    pub verses: Vec<Verse>,
}

impl ChapterText {
    /// Authoritative verse count for this chapter.
    pub fn verse_count(&self) -> u16 {
        u16::try_from(self.verses.len()).unwrap_or(u16::MAX)
    }

    /// Text of one verse by number, if present.
    pub fn verse(&self, number: u16) -> Option<&str> {
        self.verses
            .iter()
            .find(|v| v.number == number)
            .map(|v| v.text.as_str())
    }
}

/// Startup-time source of the full canonical book list.
#[async_trait]
pub trait NameSource: Send + Sync {
    /// Fetch every canonical book with its per-language names.
    async fn books(&self) -> Result<Vec<CanonicalBook>>;
}

/// Keyed lookup of translation records by abbreviation.
#[async_trait]
pub trait VersionStore: Send + Sync {
    /// Look up a version; `None` on a clean miss.
    async fn version(&self, abbreviation: &str) -> Result<Option<Version>>;
}

/// Keyed lookup of verse text by (version, book, chapter).
#[async_trait]
pub trait VerseStore: Send + Sync {
    /// Fetch one chapter's ordered verses; `None` on a clean miss.
    async fn chapter(
        &self,
        version: &Version,
        book: &CanonicalBook,
        chapter: u16,
    ) -> Result<Option<ChapterText>>;
}
