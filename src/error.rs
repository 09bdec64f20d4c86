//! Engine error types.
//!
//! Only catalog build failure is fatal; every other error is recoverable
//! per candidate reference and never aborts the rest of the message.

use thiserror::Error;

/// Engine result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Engine error types
#[derive(Debug, Error)]
pub enum Error {
    /// The book catalog could not be built (fatal at startup)
    #[error("Catalog load failed: {0}")]
    CatalogLoad(String),

    /// A candidate locator could not be parsed into a reference
    #[error("Reference parse failed: {0}")]
    Parse(#[from] ParseError),

    /// A translation abbreviation resolved to nothing, default included
    #[error("Unknown version: {0}")]
    VersionNotFound(String),

    /// Verse text could not be rendered for one reference
    #[error("Render failed: {0}")]
    Render(String),

    /// An external store lookup failed (network, decode, missing file)
    #[error("Store error: {0}")]
    Store(String),

    /// IO error with path context
    #[error("IO error at {path:?}: {source}")]
    Io {
        /// The underlying IO error.
        source: std::io::Error,
        /// File path where the error occurred, if known.
        path: Option<std::path::PathBuf>,
    },

    /// Configuration error with guidance
    #[error("Configuration error: {message}. {hint}")]
    Config {
        /// Description of the configuration problem.
        message: String,
        /// Actionable guidance for fixing the issue.
        hint: &'static str,
    },
}

/// Why a candidate locator was rejected by the parser.
///
/// All variants are recoverable: the offending candidate is discarded and
/// processing continues with the remaining candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Range end precedes range start (verse or chapter)
    #[error("range end precedes start")]
    InvalidRange,

    /// A chapter or verse number falls outside 1..=999
    #[error("number outside permitted bounds")]
    OutOfBounds,

    /// Chapter number exceeds the book's known chapter count
    #[error("chapter exceeds book's chapter count")]
    ChapterOverflow,

    /// The locator is not chapter:verse syntax at all
    #[error("malformed locator")]
    Malformed,
}

impl Error {
    /// Create a catalog load error
    pub fn catalog(message: impl Into<String>) -> Self {
        Self::CatalogLoad(message.into())
    }

    /// Create a render error
    pub fn render(message: impl Into<String>) -> Self {
        Self::Render(message.into())
    }

    /// Create a store error
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store(message.into())
    }

    /// Create a config error with actionable hint
    pub fn config(message: impl Into<String>, hint: &'static str) -> Self {
        Self::Config { message: message.into(), hint }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io { source: e, path: None }
    }
}
