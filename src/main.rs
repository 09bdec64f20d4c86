//! `VerseBot` - run the reference pipeline over lines from stdin.
//!
//! Each line is treated as one chat message; rendered references are
//! printed to stdout. Chat-platform connectivity lives outside this
//! binary.

use std::io::BufRead;
use std::sync::Arc;

use anyhow::Context;

use versebot::config::Config;
use versebot::error::Error;
use versebot::pipeline::{Engine, Outcome};
use versebot::stores::http::HttpNameSource;
use versebot::stores::json::{FileNameSource, FileVerseStore, FileVersionStore};
use versebot::stores::NameSource;
use versebot::types::{IgnoreMarkers, UserPreferences};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = Config::load()?;
    tracing::info!("{} v{} starting", config.app_name(), config.app_version());

    let data_path = config.data_path.clone().ok_or_else(|| {
        Error::config(
            "no data path configured",
            "Set VERSEBOT_DATA_PATH to the directory holding books.json, versions.json, and translation files",
        )
    })?;

    let names: Box<dyn NameSource> = match (&config.names_url, config.dry) {
        (Some(url), false) => Box::new(HttpNameSource::new(url)),
        _ => Box::new(FileNameSource::new(data_path.join("books.json"))),
    };
    let versions = Arc::new(FileVersionStore::load(&data_path.join("versions.json"))?);
    let verses = Arc::new(FileVerseStore::new(data_path));

    let engine = Engine::new(
        names.as_ref(),
        versions,
        verses,
        config.default_version.clone(),
    )
    .await
    .context("engine startup failed")?;

    let prefs = UserPreferences {
        version: config.default_version.clone(),
        ..UserPreferences::default()
    };
    let markers = IgnoreMarkers::default();

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        match engine.process_message(&line, &prefs, markers).await {
            Ok(Outcome::Quiet) => {}
            Ok(Outcome::SpamWarning) => {
                println!("That's too many references in one message.");
            }
            Ok(Outcome::Rendered(references)) => {
                for reference in references {
                    if let Some(heading) = reference.heading {
                        println!("{heading}");
                    }
                    println!("{}", reference.body);
                }
            }
            Err(e) => tracing::error!(error = %e, "message processing failed"),
        }
    }

    Ok(())
}
