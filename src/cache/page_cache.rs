// src/cache/page_cache.rs
//! Rendered documents, one `{timestamp, state}` file per object id.

use super::disk::{DiskCache, TimestampedEntry};
use crate::clock::Clock;
use crate::error::AppError;
use crate::formatting::RenderedDocument;
use crate::types::NotionId;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageCacheEntry {
    pub timestamp: i64,
    pub state: RenderedDocument,
}

impl TimestampedEntry for PageCacheEntry {
    fn timestamp(&self) -> i64 {
        self.timestamp
    }

    fn touch(&mut self, now_ms: i64) {
        self.timestamp = now_ms;
    }
}

pub struct PageCache {
    disk: DiskCache<PageCacheEntry>,
}

impl PageCache {
    pub async fn open(
        dir: impl Into<PathBuf>,
        ttl_days: u64,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, AppError> {
        Ok(Self {
            disk: DiskCache::open(dir, ttl_days, clock).await?,
        })
    }

    pub async fn get(&self, id: &NotionId) -> Option<RenderedDocument> {
        let entry = self.disk.get(&Self::key(id)).await?;
        log::debug!("Page cache hit for {}", id);
        Some(entry.state)
    }

    pub async fn put(&self, id: &NotionId, document: &RenderedDocument) {
        let entry = PageCacheEntry {
            timestamp: self.disk.now_ms(),
            state: document.clone(),
        };
        self.disk.set(&Self::key(id), &entry).await;
    }

    pub async fn invalidate(&self, id: &NotionId) {
        self.disk.remove(&Self::key(id)).await;
    }

    pub async fn clear(&self) {
        self.disk.clear().await;
    }

    fn key(id: &NotionId) -> String {
        format!("page_{}", id.as_str())
    }
}
