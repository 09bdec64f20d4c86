//! Reference parser.
//!
//! Turns the raw locator text behind a matched book name into a structured
//! reference. Grammar:
//!
//! ```text
//! locator   := chapter ':' verseList | chapter
//! verseList := verseItem (',' verseItem)*
//! verseItem := verse | verse '-' verse
//! ```
//!
//! Cross-chapter ranges ("3:16-4:2") are two colon-delimited groups joined
//! by a hyphen. Parse failures are per candidate and never fatal to the
//! rest of the message.

use lazy_static::lazy_static;
use regex::Regex;

use crate::catalog::{AliasIndex, BookId};
use crate::constants::MAX_LOCATOR_NUMBER;
use crate::error::ParseError;
use crate::scan::Candidate;

lazy_static! {
    static ref LOCATOR_RE: Regex =
        Regex::new(r"^\d+(:\d+(-\d+(:\d+)?)?(,\d+(-\d+)?)*)?$").unwrap();
}

/// A resolved reference, read-only once produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// Canonical book the reference points into.
    pub book: BookId,
    /// First chapter.
    pub chapter_start: u16,
    /// Last chapter; equals `chapter_start` unless cross-chapter.
    pub chapter_end: u16,
    /// Ascending, de-duplicated verse sub-ranges. For a cross-chapter
    /// reference this holds one pair: start verse in the first chapter and
    /// end verse in the last. Empty iff `whole_chapter`.
    pub verses: Vec<(u16, u16)>,
    /// Whole-chapter reference (no verse locator at all).
    pub whole_chapter: bool,
}

impl Reference {
    /// Whether the reference spans more than one chapter.
    pub const fn is_cross_chapter(&self) -> bool {
        self.chapter_start != self.chapter_end
    }

    /// Human-readable span, e.g. "John 3:16-18" or "Psalms 23".
    pub fn label(&self, book_name: &str) -> String {
        if self.whole_chapter {
            return format!("{} {}", book_name, self.chapter_start);
        }
        if self.is_cross_chapter() {
            let (start, end) = self.verses.first().copied().unwrap_or((1, 1));
            return format!(
                "{} {}:{}-{}:{}",
                book_name, self.chapter_start, start, self.chapter_end, end
            );
        }
        let spans = self
            .verses
            .iter()
            .map(|&(a, b)| {
                if a == b {
                    a.to_string()
                } else {
                    format!("{a}-{b}")
                }
            })
            .collect::<Vec<_>>()
            .join(",");
        format!("{} {}:{}", book_name, self.chapter_start, spans)
    }
}

/// Parse a candidate's locator into a [`Reference`].
///
/// The catalog's chapter count, when known, bounds the chapter number;
/// all numerals must be in `1..=999`.
pub fn parse(candidate: &Candidate, index: &AliasIndex) -> Result<Reference, ParseError> {
    let locator = candidate.locator.as_str();
    if !LOCATOR_RE.is_match(locator) {
        return Err(ParseError::Malformed);
    }

    let known_chapters = index.book(candidate.book).and_then(|b| b.chapters);

    let Some((chapter, rest)) = locator.split_once(':') else {
        // Bare chapter: whole-chapter reference.
        let chapter = number(locator)?;
        check_chapter(chapter, known_chapters)?;
        return Ok(Reference {
            book: candidate.book,
            chapter_start: chapter,
            chapter_end: chapter,
            verses: Vec::new(),
            whole_chapter: true,
        });
    };

    let chapter = number(chapter)?;
    check_chapter(chapter, known_chapters)?;

    if rest.contains(':') {
        return cross_chapter(candidate.book, chapter, rest, known_chapters);
    }

    let mut verses = Vec::new();
    for item in rest.split(',') {
        match item.split_once('-') {
            Some((a, b)) => {
                let a = number(a)?;
                let b = number(b)?;
                if b < a {
                    return Err(ParseError::InvalidRange);
                }
                verses.push((a, b));
            }
            None => {
                let v = number(item)?;
                verses.push((v, v));
            }
        }
    }
    verses.sort_unstable();
    verses.dedup();

    Ok(Reference {
        book: candidate.book,
        chapter_start: chapter,
        chapter_end: chapter,
        verses,
        whole_chapter: false,
    })
}

/// Parse the tail of "c1:v1-c2:v2" once the second colon group is known
/// to exist.
fn cross_chapter(
    book: BookId,
    chapter_start: u16,
    rest: &str,
    known_chapters: Option<u16>,
) -> Result<Reference, ParseError> {
    let (first_verse, tail) = rest.split_once('-').ok_or(ParseError::Malformed)?;
    let (end_chapter, end_verse) = tail.split_once(':').ok_or(ParseError::Malformed)?;

    let verse_start = number(first_verse)?;
    let chapter_end = number(end_chapter)?;
    let verse_end = number(end_verse)?;

    if chapter_end < chapter_start {
        return Err(ParseError::InvalidRange);
    }
    if chapter_end == chapter_start && verse_end < verse_start {
        return Err(ParseError::InvalidRange);
    }
    check_chapter(chapter_end, known_chapters)?;

    Ok(Reference {
        book,
        chapter_start,
        chapter_end,
        verses: vec![(verse_start, verse_end)],
        whole_chapter: false,
    })
}

/// Parse one locator numeral, bounded to `1..=999`.
fn number(text: &str) -> Result<u16, ParseError> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::Malformed);
    }
    let n: u16 = text.parse().map_err(|_| ParseError::OutOfBounds)?;
    if n == 0 || n > MAX_LOCATOR_NUMBER {
        return Err(ParseError::OutOfBounds);
    }
    Ok(n)
}

/// Chapter number must not exceed the book's chapter count when known.
fn check_chapter(chapter: u16, known: Option<u16>) -> Result<(), ParseError> {
    match known {
        Some(count) if chapter > count => Err(ParseError::ChapterOverflow),
        _ => Ok(()),
    }
}
