//! Shared domain types read by the engine.
//!
//! Preference records are owned by the calling collaborator (per-user and
//! per-guild stores); the engine only reads them.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_VERSION;

/// How a user's messages are scanned for references.
///
/// Exactly one suppression rule is active per mode: `Default` honors every
/// match unless it is enclosed in the guild's ignore markers, `Erasmus`
/// ignores every match unless it is enclosed in square brackets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    /// Opt-out scanning: every reference is honored unless marked ignored.
    #[default]
    Default,
    /// Opt-in scanning: only bracketed references are honored, and bare
    /// chapter numbers are accepted as whole-chapter references.
    Erasmus,
}

/// Per-user display preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreferences {
    /// Input mode for scanning and suppression.
    pub input: InputMode,
    /// Preferred translation abbreviation (e.g., "RSV", "KJV").
    pub version: String,
    /// Display language for book names.
    pub language: String,
    /// Whether rendered references include a heading line.
    pub headings: bool,
    /// Whether each verse is prefixed with its number in brackets.
    pub verse_numbers: bool,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            input: InputMode::Default,
            version: DEFAULT_VERSION.to_string(),
            language: "english".to_string(),
            headings: true,
            verse_numbers: true,
        }
    }
}

/// Guild-configured marker pair that hides a reference from the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IgnoreMarkers {
    /// Opening marker character.
    pub open: char,
    /// Closing marker character.
    pub close: char,
}

impl Default for IgnoreMarkers {
    fn default() -> Self {
        Self { open: '[', close: ']' }
    }
}

impl IgnoreMarkers {
    /// Parse a stored two-character pair such as `"[]"` or `"<>"`.
    ///
    /// Returns `None` unless the string is exactly two characters.
    pub fn from_pair(pair: &str) -> Option<Self> {
        let mut chars = pair.chars();
        let open = chars.next()?;
        let close = chars.next()?;
        chars.next().is_none().then_some(Self { open, close })
    }
}

/// A translation/edition of the text, identified by abbreviation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    /// Unique abbreviation key (e.g., "RSV").
    pub abbreviation: String,
    /// Full display name (e.g., "Revised Standard Version").
    pub name: String,
    /// Language tag of the translation.
    pub language: String,
    /// Backend source the verse text is fetched from.
    pub source: String,
    /// Heading template with `{reference}` and `{name}` placeholders.
    #[serde(default = "default_heading_template")]
    pub heading_template: String,
}

fn default_heading_template() -> String {
    "{reference} - {name}".to_string()
}

impl Version {
    /// Create a version with the default heading template.
    pub fn new(
        abbreviation: impl Into<String>,
        name: impl Into<String>,
        language: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            abbreviation: abbreviation.into(),
            name: name.into(),
            language: language.into(),
            source: source.into(),
            heading_template: default_heading_template(),
        }
    }

    /// Expand the heading template for a reference label.
    pub fn heading(&self, reference_label: &str) -> String {
        self.heading_template
            .replace("{reference}", reference_label)
            .replace("{name}", &self.name)
    }
}

/// A single verse with its text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
    /// Verse number within its chapter.
    pub number: u16,
    /// Verse text.
    pub text: String,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn default_preferences_match_new_user_record() {
        let prefs = UserPreferences::default();
        assert_eq!(prefs.input, InputMode::Default);
        assert_eq!(prefs.version, "RSV");
        assert_eq!(prefs.language, "english");
        assert!(prefs.headings);
        assert!(prefs.verse_numbers);
    }

    #[test]
    fn ignore_markers_parse_two_char_pairs_only() {
        assert_eq!(
            IgnoreMarkers::from_pair("<>"),
            Some(IgnoreMarkers { open: '<', close: '>' })
        );
        assert!(IgnoreMarkers::from_pair("[").is_none());
        assert!(IgnoreMarkers::from_pair("[-]").is_none());
    }

    #[test]
    fn heading_template_expands_placeholders() {
        let version = Version::new("RSV", "Revised Standard Version", "english", "local");
        assert_eq!(
            version.heading("John 3:16"),
            "John 3:16 - Revised Standard Version"
        );
    }
}
