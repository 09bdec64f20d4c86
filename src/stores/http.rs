//! HTTP-backed name source.
//!
//! The original deployment fetches the canonical book list from a remote
//! endpoint once at startup, before serving any traffic. The endpoint
//! returns the same JSON shape as `books.json`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::catalog::CanonicalBook;
use crate::error::{Error, Result};
use crate::stores::NameSource;

/// Name source fetching the book list over HTTP.
#[derive(Debug, Clone)]
pub struct HttpNameSource {
    url: String,
    client: Client,
}

impl HttpNameSource {
    /// Point at a book-list endpoint.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
        }
    }
}

#[async_trait]
impl NameSource for HttpNameSource {
    async fn books(&self) -> Result<Vec<CanonicalBook>> {
        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::catalog(format!("name fetch from {} failed: {e}", self.url)))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::catalog(format!(
                "name fetch from {} returned {status}",
                self.url
            )));
        }

        resp.json()
            .await
            .map_err(|e| Error::catalog(format!("invalid book list from {}: {e}", self.url)))
    }
}
