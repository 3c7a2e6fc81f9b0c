// src/config.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Default published-sheet CSV export feed.
const DEFAULT_SOURCE_URL: &str =
    "https://docs.google.com/spreadsheets/d/1tEQKsVOcB58VleOgFuKWy-PTuv1R9MMG1dVRzcQfAOk/export?format=csv&gid=670473458";

/// Runtime configuration, loaded from YAML. Every field falls back to its
/// default, so a partial file only overrides what it names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the CSV text is fetched from.
    pub source_url: String,
    /// Directory holding the record cache.
    pub cache_dir: PathBuf,
    /// Fixed cache name; the cache file is `<cache_dir>/<cache_name>.json`.
    pub cache_name: String,
    /// Records per page.
    pub page_size: usize,
    /// Quiet period before the ranking is recomputed.
    pub debounce_ms: u64,
    /// Reverse row order after parsing so the newest entries come first.
    pub newest_first: bool,
    /// Column ranked by title containment.
    pub title_field: String,
    /// Column ranked by word overlap.
    pub description_field: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            cache_dir: PathBuf::from("cache"),
            cache_name: "blog_records".to_string(),
            page_size: 12,
            debounce_ms: 400,
            newest_first: true,
            title_field: "Heading".to_string(),
            description_field: "Description".to_string(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_yaml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Load `path` if it exists; otherwise return the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.is_file() {
            Self::load(path)
        } else {
            info!(path = %path.display(), "no config file; using defaults");
            Ok(Self::default())
        }
    }
}
