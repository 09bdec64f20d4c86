//! Verse renderer.
//!
//! Fetches verse text for a resolved reference and formats it per user
//! preferences. Whole-chapter references expand against the verse store's
//! count for that translation, never the catalog's, since verse counts
//! differ between translations.

use crate::catalog::AliasIndex;
use crate::error::{Error, Result};
use crate::parse::Reference;
use crate::stores::{ChapterText, VerseStore};
use crate::types::{UserPreferences, Version};

/// The rendered form of one reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedReference {
    /// Heading line, present when the headings preference is on.
    pub heading: Option<String>,
    /// Concatenated verse text in ascending verse order.
    pub body: String,
    /// Span label ("John 3:16"), independent of the heading preference.
    pub label: String,
}

/// Render one resolved reference.
///
/// A missing verse within a present chapter is skipped with a debug log;
/// a missing chapter fails the whole reference (recoverable by the
/// caller, sibling references are unaffected).
pub async fn render(
    reference: &Reference,
    version: &Version,
    prefs: &UserPreferences,
    index: &AliasIndex,
    verses: &dyn VerseStore,
) -> Result<RenderedReference> {
    let book = index
        .book(reference.book)
        .ok_or_else(|| Error::render(format!("unknown book id {}", reference.book)))?;
    let label = reference.label(book.display_name(&prefs.language));

    let mut parts: Vec<String> = Vec::new();
    for chapter in reference.chapter_start..=reference.chapter_end {
        let text = verses
            .chapter(version, book, chapter)
            .await?
            .ok_or_else(|| {
                Error::render(format!(
                    "{} {chapter} not found in {}",
                    book.display_name("english"),
                    version.abbreviation
                ))
            })?;

        for number in verse_numbers(reference, chapter, &text) {
            let Some(verse_text) = text.verse(number) else {
                tracing::debug!(%label, chapter, number, "verse missing, skipping");
                continue;
            };
            if prefs.verse_numbers {
                parts.push(format!("[{number}] {verse_text}"));
            } else {
                parts.push(verse_text.to_string());
            }
        }
    }

    if parts.is_empty() {
        return Err(Error::render(format!("no verse text found for {label}")));
    }

    Ok(RenderedReference {
        heading: prefs.headings.then(|| version.heading(&label)),
        body: parts.join(" "),
        label,
    })
}

/// Effective ascending verse numbers for one chapter of the reference.
fn verse_numbers(reference: &Reference, chapter: u16, text: &ChapterText) -> Vec<u16> {
    let count = text.verse_count();
    if reference.whole_chapter {
        return (1..=count).collect();
    }

    if reference.is_cross_chapter() {
        let (start, end) = reference.verses.first().copied().unwrap_or((1, 1));
        let from = if chapter == reference.chapter_start { start } else { 1 };
        let to = if chapter == reference.chapter_end { end } else { count };
        return (from..=to).collect();
    }

    let mut numbers: Vec<u16> = reference
        .verses
        .iter()
        .flat_map(|&(a, b)| a..=b)
        .collect();
    numbers.sort_unstable();
    numbers.dedup();
    numbers
}
