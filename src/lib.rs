//! `VerseBot` - scripture reference resolution and rendering engine.
//!
//! Scans free-form chat messages for embedded scripture references
//! ("John 3:16", "Gen 1:1-3, 5"), resolves them against a catalog of
//! canonical books and translation editions, fetches the underlying verse
//! text through injected stores, and renders it per user preferences.


// Re-export public modules for use in integration tests and as a library
pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod parse;
pub mod pipeline;
pub mod render;
pub mod scan;
pub mod stores;
pub mod suppress;
pub mod types;
