use anyhow::Context;
use chrono::NaiveDate;
use expedientes_core::{config::Config, store::PostgrestStore};
use std::path::Path;

pub mod mcp;
pub mod search;
pub mod timeline;

/// Load and validate configuration, then connect the record store.
pub fn open_store(config_path: Option<&Path>) -> anyhow::Result<(Config, PostgrestStore)> {
    let config = Config::load(config_path).with_context(|| match config_path {
        Some(p) => format!("failed to load config from {}", p.display()),
        None => "failed to load config".to_string(),
    })?;
    config.validate()?;
    let store = PostgrestStore::new(&config.store).context("failed to build HTTP client")?;
    Ok((config, store))
}

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
