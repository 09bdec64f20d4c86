//! Suppression filter.
//!
//! Decides whether a candidate match should be ignored based on the text
//! around its span. Two mutually exclusive rules, selected by input mode:
//! default mode drops matches enclosed in the guild's ignore markers,
//! erasmus mode drops matches *not* enclosed in square brackets.

use crate::constants::ERASMUS_MARKERS;
use crate::scan::Candidate;
use crate::types::{IgnoreMarkers, InputMode};

/// Whether a candidate must be discarded before parsing.
pub fn is_suppressed(
    candidate: &Candidate,
    message: &str,
    mode: InputMode,
    markers: IgnoreMarkers,
) -> bool {
    match mode {
        InputMode::Default => enclosed(candidate, message, markers.open, markers.close),
        InputMode::Erasmus => {
            let (open, close) = ERASMUS_MARKERS;
            !enclosed(candidate, message, open, close)
        }
    }
}

/// Whether the span sits inside a marker pair with no unmatched marker of
/// the same kind between the pair and the span. The nearest marker before
/// the span must be the opener and the nearest after it the closer.
fn enclosed(candidate: &Candidate, message: &str, open: char, close: char) -> bool {
    let Some(before) = message.get(..candidate.start) else {
        return false;
    };
    let Some(after) = message.get(candidate.end..) else {
        return false;
    };

    let opened = before
        .chars()
        .rev()
        .find(|c| *c == open || *c == close)
        .is_some_and(|c| c == open);
    let closed = after
        .chars()
        .find(|c| *c == open || *c == close)
        .is_some_and(|c| c == close);

    opened && closed
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::catalog::BookId;

    fn candidate_in(message: &str, span: &str) -> Candidate {
        let start = message.find(span).unwrap();
        Candidate {
            book: BookId(1),
            start,
            end: start + span.len(),
            locator: "1:1".to_string(),
        }
    }

    #[test]
    fn default_mode_suppresses_bracketed_match() {
        let msg = "[Gen 1:1]";
        let c = candidate_in(msg, "Gen 1:1");
        assert!(is_suppressed(&c, msg, InputMode::Default, IgnoreMarkers::default()));
    }

    #[test]
    fn default_mode_keeps_unbracketed_match() {
        let msg = "Gen 1:1 is first";
        let c = candidate_in(msg, "Gen 1:1");
        assert!(!is_suppressed(&c, msg, InputMode::Default, IgnoreMarkers::default()));
    }

    #[test]
    fn unmatched_marker_between_pair_and_span_breaks_enclosure() {
        // The nearest marker before the span is a closer, not an opener.
        let msg = "[note] Gen 1:1 ]";
        let c = candidate_in(msg, "Gen 1:1");
        assert!(!is_suppressed(&c, msg, InputMode::Default, IgnoreMarkers::default()));
    }

    #[test]
    fn guild_configured_markers_apply() {
        let msg = "<Gen 1:1>";
        let c = candidate_in(msg, "Gen 1:1");
        let angle = IgnoreMarkers { open: '<', close: '>' };
        assert!(is_suppressed(&c, msg, InputMode::Default, angle));
        // Square brackets are no longer special for this guild.
        let msg2 = "[Gen 1:1]";
        let c2 = candidate_in(msg2, "Gen 1:1");
        assert!(!is_suppressed(&c2, msg2, InputMode::Default, angle));
    }

    #[test]
    fn erasmus_mode_inverts_polarity() {
        let plain = "$Gen 1:1";
        let c = candidate_in(plain, "Gen 1:1");
        assert!(is_suppressed(&c, plain, InputMode::Erasmus, IgnoreMarkers::default()));

        let bracketed = "$[Gen 1:1]";
        let c = candidate_in(bracketed, "Gen 1:1");
        assert!(!is_suppressed(&c, bracketed, InputMode::Erasmus, IgnoreMarkers::default()));
    }
}
