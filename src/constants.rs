//! Engine-wide constants.

/// Maximum number of surviving references in one message before the whole
/// message is rejected with a spam notice instead of any verse text.
pub const MAX_REFERENCES_PER_MESSAGE: usize = 10;

/// Upper bound for any chapter or verse numeral in a locator.
pub const MAX_LOCATOR_NUMBER: u16 = 999;

/// Longest book alias in whitespace tokens ("The Song of Solomon").
pub const MAX_ALIAS_TOKENS: usize = 4;

/// Translation substituted when a user's configured abbreviation is unknown.
pub const DEFAULT_VERSION: &str = "RSV";

/// Bracket pair required around a match in restrictive (erasmus) input mode.
pub const ERASMUS_MARKERS: (char, char) = ('[', ']');
