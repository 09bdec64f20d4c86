//! File-backed stores.
//!
//! Reads the same JSON shapes the bundled data ships in: `books.json` for
//! the catalog, `versions.json` for translation records, and one
//! `{ABBREV}.json` per translation holding a
//! `Book -> Chapter -> Verse -> Text` map. Translation files are loaded
//! lazily and cached for the process lifetime.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use async_trait::async_trait;

use crate::catalog::CanonicalBook;
use crate::error::{Error, Result};
use crate::stores::{ChapterText, NameSource, VerseStore, VersionStore};
use crate::types::{Verse, Version};

/// `Book -> Chapter -> Verse -> Text`, as stored on disk.
type BibleData = HashMap<String, HashMap<String, HashMap<String, String>>>;

/// Name source reading `books.json` from a data directory.
#[derive(Debug, Clone)]
pub struct FileNameSource {
    path: PathBuf,
}

impl FileNameSource {
    /// Point at a `books.json` file.
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl NameSource for FileNameSource {
    async fn books(&self) -> Result<Vec<CanonicalBook>> {
        let content = fs_err::read_to_string(&self.path)
            .map_err(|e| Error::catalog(format!("failed to read book names: {e}")))?;
        serde_json::from_str(&content)
            .map_err(|e| Error::catalog(format!("failed to parse {}: {e}", self.path.display())))
    }
}

/// Version store reading `versions.json` once at construction.
#[derive(Debug, Clone)]
pub struct FileVersionStore {
    versions: HashMap<String, Version>,
}

impl FileVersionStore {
    /// Load and index a `versions.json` file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs_err::read_to_string(path)
            .map_err(|e| Error::Io { source: e, path: Some(path.to_path_buf()) })?;
        let list: Vec<Version> = serde_json::from_str(&content)
            .map_err(|e| Error::store(format!("failed to parse {}: {e}", path.display())))?;
        Ok(Self {
            versions: list
                .into_iter()
                .map(|v| (v.abbreviation.clone(), v))
                .collect(),
        })
    }
}

#[async_trait]
impl VersionStore for FileVersionStore {
    async fn version(&self, abbreviation: &str) -> Result<Option<Version>> {
        Ok(self.versions.get(abbreviation).cloned())
    }
}

/// Verse store reading one `{ABBREV}.json` per translation, cached after
/// first use.
#[derive(Debug)]
pub struct FileVerseStore {
    data_path: PathBuf,
    cache: RwLock<HashMap<String, BibleData>>,
}

impl FileVerseStore {
    /// Point at the directory holding per-translation JSON files.
    pub fn new(data_path: PathBuf) -> Self {
        Self { data_path, cache: RwLock::new(HashMap::new()) }
    }

    /// Load a translation file into the cache if it is not there yet.
    ///
    /// The lock is never held across the read; a concurrent load of the
    /// same translation just overwrites the cache entry with equal data.
    async fn ensure_loaded(&self, abbreviation: &str) -> Result<()> {
        {
            let cache = self
                .cache
                .read()
                .map_err(|_| Error::store("verse cache poisoned"))?;
            if cache.contains_key(abbreviation) {
                return Ok(());
            }
        }

        let path = self.data_path.join(format!("{}.json", abbreviation.to_uppercase()));
        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| Error::Io { source: e, path: Some(path.clone()) })?;
        let data: BibleData = serde_json::from_str(&content)
            .map_err(|e| Error::store(format!("failed to parse {}: {e}", path.display())))?;

        self.cache
            .write()
            .map_err(|_| Error::store("verse cache poisoned"))?
            .insert(abbreviation.to_string(), data);
        Ok(())
    }
}

#[async_trait]
impl VerseStore for FileVerseStore {
    async fn chapter(
        &self,
        version: &Version,
        book: &CanonicalBook,
        chapter: u16,
    ) -> Result<Option<ChapterText>> {
        self.ensure_loaded(&version.abbreviation).await?;

        let cache = self
            .cache
            .read()
            .map_err(|_| Error::store("verse cache poisoned"))?;
        let Some(data) = cache.get(&version.abbreviation) else {
            return Ok(None);
        };

        // Translation files are keyed by English display name.
        let Some(chapter_map) = data
            .get(book.display_name("english"))
            .and_then(|b| b.get(&chapter.to_string()))
        else {
            return Ok(None);
        };

        let mut verses: Vec<Verse> = chapter_map
            .iter()
            .filter_map(|(number, text)| {
                number.parse::<u16>().ok().map(|number| Verse {
                    number,
                    text: text.clone(),
                })
            })
            .collect();
        verses.sort_unstable_by_key(|v| v.number);

        Ok(Some(ChapterText { verses }))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::catalog::{BookId, BookNames, Testament};
    use std::io::Write;

    fn john() -> CanonicalBook {
        CanonicalBook {
            id: BookId(43),
            testament: Testament::New,
            chapters: Some(21),
            names: vec![BookNames {
                language: "english".to_string(),
                names: vec!["John".to_string(), "Jn".to_string()],
            }],
        }
    }

    #[tokio::test]
    async fn verse_store_reads_and_orders_chapter() {
        let dir = tempfile::tempdir().unwrap();
        let mut f = fs_err::File::create(dir.path().join("RSV.json")).unwrap();
        write!(
            f,
            r#"{{"John": {{"3": {{"17": "seventeenth", "16": "sixteenth"}}}}}}"#
        )
        .unwrap();

        let store = FileVerseStore::new(dir.path().to_path_buf());
        let version = Version::new("RSV", "Revised Standard Version", "english", "local");
        let chapter = store.chapter(&version, &john(), 3).await.unwrap().unwrap();
        assert_eq!(chapter.verse_count(), 2);
        assert_eq!(chapter.verses[0].number, 16);
        assert_eq!(chapter.verse(17), Some("seventeenth"));

        // Clean miss, not an error.
        assert!(store.chapter(&version, &john(), 4).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn missing_translation_file_is_a_store_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileVerseStore::new(dir.path().to_path_buf());
        let version = Version::new("NEB", "New English Bible", "english", "local");
        assert!(store.chapter(&version, &john(), 1).await.is_err());
    }

    #[tokio::test]
    async fn name_source_parses_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("books.json");
        let books = vec![john()];
        fs_err::write(&path, serde_json::to_string(&books).unwrap()).unwrap();

        let source = FileNameSource::new(path);
        let loaded = source.books().await.unwrap();
        assert_eq!(loaded, books);
    }

    #[tokio::test]
    async fn version_store_loads_index() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("versions.json");
        let versions = vec![Version::new("RSV", "Revised Standard Version", "english", "local")];
        fs_err::write(&path, serde_json::to_string(&versions).unwrap()).unwrap();

        let store = FileVersionStore::load(&path).unwrap();
        assert!(store.version("RSV").await.unwrap().is_some());
        assert!(store.version("KJV").await.unwrap().is_none());
    }
}
