//! Application configuration.
//!
//! Handles loading configuration from environment variables and .env files.

use dotenv::dotenv;
use std::env;
use std::path::PathBuf;

use crate::constants::DEFAULT_VERSION;
use crate::error::Result;

/// Configuration for the engine host process.
#[derive(Debug, Clone)]
pub struct Config {
    /// The application name
    app_name: String,
    /// The application version
    app_version: String,
    /// Directory holding books.json, versions.json, and translation files
    pub data_path: Option<PathBuf>,
    /// Remote endpoint for the startup book-name fetch
    pub names_url: Option<String>,
    /// Translation substituted when a user's abbreviation is unknown
    pub default_version: String,
    /// Skip the remote name fetch and use the bundled books.json
    pub dry: bool,
}

impl Config {
    /// Get the application name.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Get the application version.
    #[must_use]
    pub fn app_version(&self) -> &str {
        &self.app_version
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: env!("CARGO_PKG_NAME").to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            data_path: None,
            names_url: None,
            default_version: DEFAULT_VERSION.to_string(),
            dry: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    #[allow(clippy::unnecessary_wraps)] // Returns Result for forward-compatible API
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        dotenv().ok();

        let mut config = Self::default();

        if let Ok(path) = env::var("VERSEBOT_DATA_PATH") {
            config.data_path = Some(PathBuf::from(path));
        }

        if let Ok(url) = env::var("VERSEBOT_NAMES_URL") {
            config.names_url = Some(url);
        }

        if let Ok(version) = env::var("VERSEBOT_DEFAULT_VERSION") {
            if !version.is_empty() {
                config.default_version = version;
            }
        }

        if let Ok(dry) = env::var("VERSEBOT_DRY") {
            config.dry = matches!(dry.as_str(), "1" | "true" | "yes");
        }

        Ok(config)
    }
}
