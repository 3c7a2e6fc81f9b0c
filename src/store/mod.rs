// src/store/mod.rs
use crate::fetch;
use crate::parse::{self, Record};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// One serialized record set, as written to the cache file.
#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    fetched_at: DateTime<Utc>,
    headers: Vec<String>,
    records: Vec<Record>,
}

/// Handle to a single JSON cache file under a fixed name.
///
/// Owned by whichever store it is injected into, so tests (and independent
/// datasets) get independent caches instead of sharing process-wide state.
pub struct RecordCache {
    path: PathBuf,
}

impl RecordCache {
    /// Point at `<dir>/<name>.json`, creating `dir` if needed.
    pub fn new(dir: impl AsRef<Path>, name: &str) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)
            .with_context(|| format!("creating cache directory {}", dir.display()))?;
        Ok(Self {
            path: dir.join(format!("{}.json", name)),
        })
    }

    /// Read the cached record set. A missing file is a normal cold start;
    /// a corrupt one is logged and treated the same.
    fn load(&self) -> Option<CacheEntry> {
        let file = fs::File::open(&self.path).ok()?;
        match serde_json::from_reader(file) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(path = %self.path.display(), "skipping corrupt cache: {}", e);
                None
            }
        }
    }

    /// Persist a record set, tmp-file then rename so a crash mid-write never
    /// leaves a truncated cache behind.
    fn save(&self, headers: &[String], records: &[Record]) -> Result<()> {
        let entry = CacheEntry {
            fetched_at: Utc::now(),
            headers: headers.to_vec(),
            records: records.to_vec(),
        };

        let tmp_path = self.path.with_extension("json.tmp");
        let tmp = fs::File::create(&tmp_path)
            .with_context(|| format!("creating {}", tmp_path.display()))?;
        serde_json::to_writer(tmp, &entry).context("serializing record cache")?;
        fs::rename(&tmp_path, &self.path).with_context(|| {
            format!(
                "renaming {} to {}",
                tmp_path.display(),
                self.path.display()
            )
        })?;
        Ok(())
    }
}

/// The in-memory record set for one dataset, backed by a `RecordCache`.
///
/// Populated once per session: cached rows are read at open, then `refresh`
/// replaces them with freshly fetched ones. The rows are immutable between
/// refreshes; search and pagination only ever borrow them.
pub struct RecordStore {
    cache: RecordCache,
    newest_first: bool,
    headers: Vec<String>,
    records: Vec<Record>,
}

impl RecordStore {
    /// Open the store, seeding it from the cache when one exists.
    pub fn open(cache: RecordCache, newest_first: bool) -> Self {
        let (headers, records) = match cache.load() {
            Some(entry) => {
                info!(
                    rows = entry.records.len(),
                    fetched_at = %entry.fetched_at,
                    "loaded records from cache"
                );
                (entry.headers, entry.records)
            }
            None => (Vec::new(), Vec::new()),
        };
        Self {
            cache,
            newest_first,
            headers,
            records,
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Fetch, parse, and adopt a fresh record set, rewriting the cache.
    ///
    /// On fetch failure the previous rows (cached or from an earlier refresh)
    /// stay in place and the error is returned for the caller to surface. A
    /// cache write failure is only logged; the fresh rows are kept.
    pub async fn refresh(&mut self, client: &Client, url: &str) -> Result<usize> {
        let text = fetch::fetch_text(client, url)
            .await
            .context("fetching dataset")?;

        let mut table = parse::parse(&text);
        if self.newest_first {
            table.records.reverse();
        }

        if let Err(e) = self.cache.save(&table.headers, &table.records) {
            warn!("cache write failed: {:#}", e);
        }

        self.headers = table.headers;
        self.records = table.records;
        Ok(self.records.len())
    }
}
