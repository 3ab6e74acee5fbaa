//! Small file cache with a time-to-live
//!
//! Entries live under one directory, one JSON file per key. The file name is
//! derived from a hash of the key, so URLs can be used directly as keys.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

/// Envelope stored on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedEntry<T> {
    /// When the entry was written (Unix timestamp)
    pub cached_at: u64,

    /// The cached value
    pub body: T,
}

/// Directory-backed cache
#[derive(Debug, Clone)]
pub struct FileCache {
    dir: PathBuf,
}

pub(crate) fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

impl FileCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing a key
    pub fn entry_path(&self, key: &str) -> PathBuf {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        let hash = hasher.finish();

        self.dir.join(format!("entry_{hash:016x}.json"))
    }

    /// Load an entry regardless of age
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<CachedEntry<T>>> {
        let path = self.entry_path(key);

        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read cache: {}", path.display()))?;

        let entry: CachedEntry<T> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse cache: {}", path.display()))?;

        Ok(Some(entry))
    }

    /// Load an entry if it is younger than `ttl`
    pub fn load_fresh<T: DeserializeOwned>(&self, key: &str, ttl: Duration) -> Result<Option<T>> {
        self.load_fresh_at(key, ttl, unix_now())
    }

    /// Load an entry if it is younger than `ttl` at time `now`
    pub fn load_fresh_at<T: DeserializeOwned>(
        &self,
        key: &str,
        ttl: Duration,
        now: u64,
    ) -> Result<Option<T>> {
        let Some(entry) = self.load::<T>(key)? else {
            return Ok(None);
        };

        let age = Duration::from_secs(now.saturating_sub(entry.cached_at));

        if age > ttl {
            tracing::debug!("Cache expired for {} (age: {:?})", key, age);
            return Ok(None);
        }

        tracing::debug!("Using cached entry for {} (age: {:?})", key, age);
        Ok(Some(entry.body))
    }

    /// Write an entry stamped with the current time
    pub fn store<T: Serialize + ?Sized>(&self, key: &str, body: &T) -> Result<()> {
        self.store_at(key, body, unix_now())
    }

    /// Write an entry stamped with `cached_at`
    pub fn store_at<T: Serialize + ?Sized>(&self, key: &str, body: &T, cached_at: u64) -> Result<()> {
        std::fs::create_dir_all(&self.dir).with_context(|| {
            format!("Failed to create cache directory: {}", self.dir.display())
        })?;

        let path = self.entry_path(key);
        let content = serde_json::to_string(&CachedEntry { cached_at, body })
            .context("Failed to serialize cache entry")?;

        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write cache: {}", path.display()))?;

        tracing::debug!("Saved cache entry: {}", path.display());
        Ok(())
    }

    /// Remove one entry; missing entries are not an error
    pub fn remove(&self, key: &str) -> Result<()> {
        let path = self.entry_path(key);
        if path.exists() {
            std::fs::remove_file(&path)
                .with_context(|| format!("Failed to remove cache: {}", path.display()))?;
        }
        Ok(())
    }

    /// Remove every cache entry
    pub fn clear(&self) -> Result<usize> {
        if !self.dir.exists() {
            return Ok(0);
        }

        let mut removed = 0;
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();

            let is_entry = path
                .file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.starts_with("entry_") && n.ends_with(".json"))
                .unwrap_or(false);

            if path.is_file() && is_entry {
                std::fs::remove_file(&path)?;
                removed += 1;
            }
        }

        Ok(removed)
    }
}
