//! Reference scanner.
//!
//! Walks message text token by token, matching book-name aliases against
//! the [`AliasIndex`] and pairing each match with the chapter/verse
//! locator that follows it. A bare book name with no locator is not a
//! reference. Candidates come out non-overlapping, in ascending offset
//! order.

use crate::catalog::{AliasIndex, BookId};
use crate::types::InputMode;

/// A candidate reference found in a message, before parsing.
///
/// `start..end` is the byte span of the match within the scanned message;
/// `locator` is the normalized chapter/verse text with surrounding
/// punctuation stripped and comma continuations joined ("1:1-3,5").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Matched canonical book.
    pub book: BookId,
    /// Byte offset where the book name starts.
    pub start: usize,
    /// Byte offset one past the end of the locator.
    pub end: usize,
    /// Raw chapter/verse text following the book name.
    pub locator: String,
}

/// One whitespace-delimited token with its byte offset.
#[derive(Debug, Clone, Copy)]
struct Token<'a> {
    start: usize,
    text: &'a str,
}

/// Scan a message for candidate references.
///
/// Fast-reject: a message with no colon contains no locator, so scanning
/// short-circuits to an empty list. Bare chapter numbers ("Psalm 23") are
/// only accepted as whole-chapter candidates in erasmus mode.
pub fn scan(message: &str, index: &AliasIndex, mode: InputMode) -> Vec<Candidate> {
    if !message.contains(':') {
        return Vec::new();
    }

    let tokens = tokenize(message);
    let cores: Vec<&str> = tokens.iter().map(|t| alias_core(t.text).1).collect();
    let mut candidates = Vec::new();

    let mut i = 0;
    while i < tokens.len() {
        let Some((book, consumed)) = index.longest_match(&cores[i..]) else {
            i += 1;
            continue;
        };

        let locator_at = i + consumed;
        let Some(candidate) = locate(message, &tokens, i, locator_at, book, mode) else {
            i += 1;
            continue;
        };

        // Earlier span wins; advancing past the locator keeps candidates
        // non-overlapping by construction.
        i = candidate.1;
        candidates.push(candidate.0);
    }

    candidates
}

/// Try to build a candidate from the alias at `alias_at` and the locator
/// token expected at `locator_at`. Returns the candidate and the index of
/// the first token after it.
fn locate(
    message: &str,
    tokens: &[Token<'_>],
    alias_at: usize,
    locator_at: usize,
    book: BookId,
    mode: InputMode,
) -> Option<(Candidate, usize)> {
    let first = tokens.get(locator_at)?;
    let (rel, core) = locator_core(first.text);
    if core.is_empty() {
        return None;
    }

    let bare_number = core.chars().all(|c| c.is_ascii_digit());
    if !core.contains(':') {
        // Whole-chapter bare references are opt-in by mode.
        if !(bare_number && mode == InputMode::Erasmus) {
            return None;
        }
    }

    let (start_rel, _) = alias_core(tokens[alias_at].text);
    let start = tokens[alias_at].start + start_rel;
    let mut end = first.start + rel + core.len();
    let mut locator = core.to_string();

    // Absorb comma continuations: "Gen 1:1-3, 5" spans two tokens. A
    // colon group after the comma is a new locator, not a verse item.
    let mut k = locator_at;
    while ends_with_comma(tokens[k].text) {
        let Some(next) = tokens.get(k + 1) else { break };
        let (nrel, ncore) = locator_core(next.text);
        if ncore.is_empty()
            || ncore.contains(':')
            || !ncore.starts_with(|c: char| c.is_ascii_digit())
        {
            break;
        }
        locator.push(',');
        locator.push_str(ncore);
        end = next.start + nrel + ncore.len();
        k += 1;
    }

    Some((Candidate { book, start, end, locator }, k + 1))
}

/// Split on whitespace, keeping byte offsets.
fn tokenize(message: &str) -> Vec<Token<'_>> {
    let mut out = Vec::new();
    let mut start = None;
    for (i, c) in message.char_indices() {
        if c.is_whitespace() {
            if let Some(s) = start.take() {
                out.push(Token { start: s, text: &message[s..i] });
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        out.push(Token { start: s, text: &message[s..] });
    }
    out
}

/// Strip leading/trailing punctuation from a token, leaving the word the
/// alias comparison sees. "[Gen" and "Gen." both yield "Gen".
fn alias_core(token: &str) -> (usize, &str) {
    let Some(begin) = token
        .char_indices()
        .find(|(_, c)| c.is_alphanumeric())
        .map(|(i, _)| i)
    else {
        return (0, "");
    };
    let end = token
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_alphanumeric())
        .map_or(token.len(), |(i, c)| i + c.len_utf8());
    (begin, &token[begin..end])
}

/// Trim a locator token to its digit-delimited core: "(3:16)." → "3:16".
fn locator_core(token: &str) -> (usize, &str) {
    let Some(begin) = token.find(|c: char| c.is_ascii_digit()) else {
        return (0, "");
    };
    let end = token
        .rfind(|c: char| c.is_ascii_digit())
        .map_or(token.len(), |i| i + 1);
    (begin, &token[begin..end])
}

/// Whether a locator token continues into the next one ("1:1-3," + "5").
fn ends_with_comma(token: &str) -> bool {
    token
        .trim_end_matches(|c: char| !(c.is_ascii_digit() || c == ','))
        .ends_with(',')
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::catalog::{AliasIndex, BookNames, CanonicalBook, Testament};

    fn fixture_index() -> AliasIndex {
        let mk = |id: u16, testament: Testament, chapters: u16, names: &[&str]| CanonicalBook {
            id: BookId(id),
            testament,
            chapters: Some(chapters),
            names: vec![BookNames {
                language: "english".to_string(),
                names: names.iter().map(ToString::to_string).collect(),
            }],
        };
        AliasIndex::build(vec![
            mk(1, Testament::Old, 50, &["Genesis", "Gen"]),
            mk(9, Testament::Old, 31, &["1 Samuel", "1 Sam"]),
            mk(19, Testament::Old, 150, &["Psalms", "Psalm", "Ps"]),
            mk(43, Testament::New, 21, &["John", "Jn"]),
            mk(62, Testament::New, 5, &["1 John", "1 Jn"]),
        ])
        .unwrap()
    }

    #[test]
    fn message_without_colon_is_fast_rejected() {
        let index = fixture_index();
        assert!(scan("no references here at all", &index, InputMode::Default).is_empty());
        assert!(scan("John 3 is great", &index, InputMode::Default).is_empty());
    }

    #[test]
    fn finds_simple_reference_with_span() {
        let index = fixture_index();
        let msg = "Check out John 3:16 please";
        let found = scan(msg, &index, InputMode::Default);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].book, BookId(43));
        assert_eq!(found[0].locator, "3:16");
        assert_eq!(&msg[found[0].start..found[0].end], "John 3:16");
    }

    #[test]
    fn multi_token_alias_prefers_longest() {
        let index = fixture_index();
        let found = scan("see 1 John 4:8 here", &index, InputMode::Default);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].book, BookId(62));

        let found = scan("1 Samuel 3:10", &index, InputMode::Default);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].book, BookId(9));
    }

    #[test]
    fn bare_book_name_is_not_a_reference() {
        let index = fixture_index();
        // Colon elsewhere keeps the fast-reject from hiding the real check.
        let found = scan("John said: nothing", &index, InputMode::Default);
        assert!(found.is_empty());
    }

    #[test]
    fn punctuation_around_match_is_excluded_from_span() {
        let index = fixture_index();
        let msg = "[Gen 1:1]";
        let found = scan(msg, &index, InputMode::Default);
        assert_eq!(found.len(), 1);
        assert_eq!(&msg[found[0].start..found[0].end], "Gen 1:1");
    }

    #[test]
    fn comma_continuation_joins_verse_list() {
        let index = fixture_index();
        let msg = "Gen 1:1-3, 5 and more: yes";
        let found = scan(msg, &index, InputMode::Default);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].locator, "1:1-3,5");
        assert_eq!(&msg[found[0].start..found[0].end], "Gen 1:1-3, 5");
    }

    #[test]
    fn comma_continuation_stops_at_colon_group() {
        let index = fixture_index();
        let msg = "Gen 1:1, 2:3 tonight";
        let found = scan(msg, &index, InputMode::Default);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].locator, "1:1");
        assert_eq!(&msg[found[0].start..found[0].end], "Gen 1:1");
    }

    #[test]
    fn bare_chapter_needs_erasmus_mode() {
        let index = fixture_index();
        let msg = "read Psalm 23 tonight: ok";
        assert!(scan(msg, &index, InputMode::Default).is_empty());
        let found = scan(msg, &index, InputMode::Erasmus);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].locator, "23");
    }

    #[test]
    fn candidates_come_out_in_ascending_order() {
        let index = fixture_index();
        let found = scan("Gen 1:1 then John 3:16", &index, InputMode::Default);
        assert_eq!(found.len(), 2);
        assert!(found[0].start < found[1].start);
        assert_eq!(found[0].book, BookId(1));
        assert_eq!(found[1].book, BookId(43));
    }

    #[test]
    fn alias_inside_larger_word_does_not_match() {
        let index = fixture_index();
        assert!(scan("Johnson 3:16", &index, InputMode::Default).is_empty());
    }
}
