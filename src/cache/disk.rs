// src/cache/disk.rs
//! TTL-based JSON file cache, one file per key.
//!
//! Cache operations are best-effort: read and write failures are logged and
//! ignored so a broken cache never prevents fresh fetches. Entries that fail
//! to parse, or carry no usable timestamp, count as misses and are deleted.

use crate::clock::Clock;
use crate::error::AppError;
use chrono::Duration;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Upper bound on a configured TTL; anything longer is effectively forever.
const MAX_TTL_DAYS: u64 = 1_000_000;

/// A persisted cache record stamped with its last write time.
pub trait TimestampedEntry: Serialize + DeserializeOwned + Send + Sync {
    /// Milliseconds since the Unix epoch.
    fn timestamp(&self) -> i64;

    /// Restamps the entry after a read hit.
    fn touch(&mut self, now_ms: i64);
}

/// Sliding-TTL file cache for one entry type.
pub struct DiskCache<E> {
    dir: PathBuf,
    /// `None` disables expiry.
    ttl: Option<Duration>,
    clock: Arc<dyn Clock>,
    _entry: PhantomData<fn() -> E>,
}

impl<E: TimestampedEntry> DiskCache<E> {
    /// Opens (creating if needed) a cache directory and purges expired entries.
    ///
    /// A TTL of zero days disables expiry.
    pub async fn open(
        dir: impl Into<PathBuf>,
        ttl_days: u64,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, AppError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;

        let ttl = match ttl_days {
            0 => None,
            days => Some(Duration::days(days.min(MAX_TTL_DAYS) as i64)),
        };
        let cache = Self {
            dir,
            ttl,
            clock,
            _entry: PhantomData,
        };

        let purged = cache.purge_expired().await;
        if purged > 0 {
            log::debug!("Purged {} expired entries from {}", purged, cache.dir.display());
        }
        Ok(cache)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn now_ms(&self) -> i64 {
        self.clock.now().timestamp_millis()
    }

    /// Returns a fresh entry and extends its lifetime.
    ///
    /// Expired and corrupt entries are deleted and reported as misses.
    pub async fn get(&self, key: &str) -> Option<E> {
        let path = self.key_to_path(key);
        let content = tokio::fs::read_to_string(&path).await.ok()?;

        let mut entry = match self.parse(&content) {
            Some(entry) => entry,
            None => {
                log::warn!("Discarding corrupt cache entry {}", path.display());
                remove_quietly(&path).await;
                return None;
            }
        };

        if self.is_expired(entry.timestamp()) {
            log::debug!("Cache entry {} expired", key);
            remove_quietly(&path).await;
            return None;
        }

        entry.touch(self.now_ms());
        self.write(&path, &entry).await;
        Some(entry)
    }

    /// Stores an entry as is. Errors are logged and ignored.
    pub async fn set(&self, key: &str, entry: &E) {
        self.write(&self.key_to_path(key), entry).await;
    }

    pub async fn remove(&self, key: &str) {
        remove_quietly(&self.key_to_path(key)).await;
    }

    /// Removes every entry file in the cache directory.
    pub async fn clear(&self) {
        for path in self.entry_files().await {
            remove_quietly(&path).await;
        }
    }

    /// Removes expired and corrupt entries, returning how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let mut purged = 0;
        for path in self.entry_files().await {
            let Ok(content) = tokio::fs::read_to_string(&path).await else {
                continue;
            };
            let stale = match self.parse(&content) {
                Some(entry) => self.is_expired(entry.timestamp()),
                None => true,
            };
            if stale {
                remove_quietly(&path).await;
                purged += 1;
            }
        }
        purged
    }

    fn parse(&self, content: &str) -> Option<E> {
        serde_json::from_str::<E>(content)
            .ok()
            .filter(|entry| entry.timestamp() > 0)
    }

    /// Fresh up to and including `timestamp + ttl`.
    pub fn is_expired(&self, timestamp: i64) -> bool {
        match self.ttl {
            None => false,
            Some(ttl) => self.now_ms().saturating_sub(timestamp) > ttl.num_milliseconds(),
        }
    }

    async fn write(&self, path: &Path, entry: &E) {
        let json = match serde_json::to_string(entry) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not serialize cache entry {}: {}", path.display(), e);
                return;
            }
        };
        if let Err(e) = tokio::fs::write(path, json).await {
            log::warn!("Could not write cache entry {}: {}", path.display(), e);
        }
    }

    async fn entry_files(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();
        let Ok(mut dir) = tokio::fs::read_dir(&self.dir).await else {
            return files;
        };
        while let Ok(Some(entry)) = dir.next_entry().await {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some("json") {
                files.push(path);
            }
        }
        files
    }

    fn key_to_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", sanitize_key(key)))
    }
}

/// Maps a cache key onto a portable file stem.
pub fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

async fn remove_quietly(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            log::debug!("Could not remove cache entry {}: {}", path.display(), e);
        }
    }
}
