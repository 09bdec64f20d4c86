//! Per-message orchestration.
//!
//! One inbound message runs one independent pipeline: scan, suppress,
//! parse, resolve the user's version, render. The alias index is shared
//! read-only; no state crosses messages. Verse lookups for the surviving
//! references run concurrently, but output keeps the scanner's ascending
//! offset order.

use std::sync::Arc;

use futures::future;

use crate::catalog::AliasIndex;
use crate::constants::MAX_REFERENCES_PER_MESSAGE;
use crate::error::{Error, Result};
use crate::parse::{parse, Reference};
use crate::render::{render, RenderedReference};
use crate::scan::{scan, Candidate};
use crate::stores::{NameSource, VerseStore, VersionStore};
use crate::suppress::is_suppressed;
use crate::types::{IgnoreMarkers, UserPreferences, Version};

/// What a message produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// No references survived; say nothing.
    Quiet,
    /// Too many references; emit one spam notice instead of verse text.
    SpamWarning,
    /// Rendered references, in the order they appeared in the message.
    Rendered(Vec<RenderedReference>),
}

/// The reference resolution and rendering engine.
///
/// Built once at startup from a [`NameSource`]; the catalog and alias
/// index never change afterward, so one engine serves any number of
/// concurrent messages.
pub struct Engine {
    index: AliasIndex,
    versions: Arc<dyn VersionStore>,
    verses: Arc<dyn VerseStore>,
    default_version: String,
}

impl Engine {
    /// Build the engine, fetching and indexing the book catalog.
    ///
    /// Fails with [`Error::CatalogLoad`] when the name source is unusable;
    /// that failure is fatal, the engine cannot start without a catalog.
    pub async fn new(
        names: &dyn NameSource,
        versions: Arc<dyn VersionStore>,
        verses: Arc<dyn VerseStore>,
        default_version: impl Into<String>,
    ) -> Result<Self> {
        let index = AliasIndex::build(names.books().await?)?;
        tracing::info!(books = index.len(), "catalog loaded");
        Ok(Self {
            index,
            versions,
            verses,
            default_version: default_version.into(),
        })
    }

    /// The shared alias index (read-only).
    pub const fn alias_index(&self) -> &AliasIndex {
        &self.index
    }

    /// Run the full pipeline for one message.
    pub async fn process_message(
        &self,
        message: &str,
        prefs: &UserPreferences,
        markers: IgnoreMarkers,
    ) -> Result<Outcome> {
        let flat = flatten(message);
        if !flat.contains(' ') {
            return Ok(Outcome::Quiet);
        }

        let surviving: Vec<Candidate> = scan(&flat, &self.index, prefs.input)
            .into_iter()
            .filter(|c| !is_suppressed(c, &flat, prefs.input, markers))
            .collect();
        if surviving.is_empty() {
            return Ok(Outcome::Quiet);
        }

        // Suppressed candidates are already gone; only survivors count
        // toward the cap. Checked once per message.
        if surviving.len() > MAX_REFERENCES_PER_MESSAGE {
            tracing::warn!(
                count = surviving.len(),
                "spam attempt, refusing to render message"
            );
            return Ok(Outcome::SpamWarning);
        }

        let version = self.resolve_version(&prefs.version).await?;

        let references: Vec<Reference> = surviving
            .iter()
            .filter_map(|c| match parse(c, &self.index) {
                Ok(r) => Some(r),
                Err(e) => {
                    tracing::debug!(locator = %c.locator, error = %e, "discarding candidate");
                    None
                }
            })
            .collect();

        // join_all keeps input order, so rendering order follows the
        // scanner regardless of which lookup completes first.
        let results = future::join_all(
            references
                .iter()
                .map(|r| render(r, &version, prefs, &self.index, self.verses.as_ref())),
        )
        .await;

        let mut rendered = Vec::new();
        for result in results {
            match result {
                Ok(r) => rendered.push(r),
                Err(e) => tracing::warn!(error = %e, "failed to render reference"),
            }
        }

        if rendered.is_empty() {
            Ok(Outcome::Quiet)
        } else {
            Ok(Outcome::Rendered(rendered))
        }
    }

    /// Resolve the user's translation, substituting the default on a miss.
    async fn resolve_version(&self, abbreviation: &str) -> Result<Version> {
        if let Some(version) = self.versions.version(abbreviation).await? {
            return Ok(version);
        }
        tracing::debug!(abbreviation, "unknown version, substituting default");
        self.versions
            .version(&self.default_version)
            .await?
            .ok_or_else(|| Error::VersionNotFound(self.default_version.clone()))
    }
}

/// Join message lines with single spaces before scanning.
fn flatten(message: &str) -> String {
    message
        .lines()
        .collect::<Vec<_>>()
        .join(" ")
}
