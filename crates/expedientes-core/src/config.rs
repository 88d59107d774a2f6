use crate::error::{ExpedienteError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const ENV_URL: &str = "SUPABASE_URL";
pub const ENV_KEY: &str = "SUPABASE_KEY";

// ---------------------------------------------------------------------------
// Collections
// ---------------------------------------------------------------------------

/// Names of the record-store collections the engine reads and writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collections {
    #[serde(default = "default_cases")]
    pub cases: String,
    #[serde(default = "default_judicial_movements")]
    pub judicial_movements: String,
    #[serde(default = "default_administrative_movements")]
    pub administrative_movements: String,
    #[serde(default = "default_follow_ups")]
    pub follow_ups: String,
}

fn default_cases() -> String {
    "expedientes".to_string()
}

fn default_judicial_movements() -> String {
    "movimientos".to_string()
}

fn default_administrative_movements() -> String {
    "movimientos_srt".to_string()
}

fn default_follow_ups() -> String {
    "seguimientos".to_string()
}

impl Default for Collections {
    fn default() -> Self {
        Self {
            cases: default_cases(),
            judicial_movements: default_judicial_movements(),
            administrative_movements: default_administrative_movements(),
            follow_ups: default_follow_ups(),
        }
    }
}

// ---------------------------------------------------------------------------
// StoreConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Base URL of the PostgREST endpoint, without trailing slash.
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing)]
    pub key: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub collections: Collections,
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            key: String::new(),
            timeout_secs: default_timeout_secs(),
            collections: Collections::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// TimelinePolicy
// ---------------------------------------------------------------------------

/// Thresholds used by the timeline builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelinePolicy {
    /// Silence after the newest real movement that triggers a fill up to today.
    #[serde(default = "default_recent_gap_days")]
    pub recent_gap_days: i64,
    /// Distance between two real movements that triggers a fill between them.
    #[serde(default = "default_between_gap_days")]
    pub between_gap_days: i64,
    /// Window filled for a case with no history at all.
    #[serde(default = "default_cold_window_days")]
    pub cold_window_days: i64,
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
    #[serde(default = "default_movement_limit")]
    pub movement_limit: usize,
}

fn default_recent_gap_days() -> i64 {
    12
}

fn default_between_gap_days() -> i64 {
    30
}

fn default_cold_window_days() -> i64 {
    90
}

fn default_max_entries() -> usize {
    20
}

fn default_movement_limit() -> usize {
    50
}

impl Default for TimelinePolicy {
    fn default() -> Self {
        Self {
            recent_gap_days: default_recent_gap_days(),
            between_gap_days: default_between_gap_days(),
            cold_window_days: default_cold_window_days(),
            max_entries: default_max_entries(),
            movement_limit: default_movement_limit(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub timeline: TimelinePolicy,
}

impl Config {
    /// Load from an optional YAML file, then apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let base = match path {
            Some(p) => {
                let data = std::fs::read_to_string(p)?;
                serde_yaml::from_str(&data)?
            }
            None => Config::default(),
        };
        Ok(base.with_overrides(|name| std::env::var(name).ok()))
    }

    /// Apply `SUPABASE_URL` / `SUPABASE_KEY` from `lookup`. Values are
    /// trimmed; blank values leave the current setting untouched.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(ENV_URL).map(|v| v.trim().to_string()) {
            if !url.is_empty() {
                self.store.url = url;
            }
        }
        if let Some(key) = lookup(ENV_KEY).map(|v| v.trim().to_string()) {
            if !key.is_empty() {
                self.store.key = key;
            }
        }
        self.store.url = self.store.url.trim().trim_end_matches('/').to_string();
        self
    }

    /// Fail fast when connection parameters are missing.
    pub fn validate(&self) -> Result<()> {
        if self.store.url.is_empty() {
            return Err(ExpedienteError::MissingConfig(ENV_URL));
        }
        if self.store.key.is_empty() {
            return Err(ExpedienteError::MissingConfig(ENV_KEY));
        }
        Ok(())
    }
}
