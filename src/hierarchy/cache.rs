// src/hierarchy/cache.rs
//! Children lists keyed by `(kind, id)`: memory first, then disk, then origin.
//!
//! Each layer that missed is filled on the way back. The disk layer is
//! optional so the viewer can run without touching the filesystem. With a
//! disk layer, memory entries carry the same timestamp and TTL as their
//! files: a memory hit restamps both, and an expired one goes back to origin.
//! Without it, memory entries live until invalidated.

use super::discovery::discover_children;
use super::node::{HierarchyNode, NodeKind};
use crate::api::NotionRepository;
use crate::cache::{DiskCache, TimestampedEntry};
use crate::clock::Clock;
use crate::error::AppError;
use crate::types::NotionId;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

/// On-disk record: `{timestamp, data}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HierarchyEntry {
    pub timestamp: i64,
    pub data: Vec<HierarchyNode>,
}

impl TimestampedEntry for HierarchyEntry {
    fn timestamp(&self) -> i64 {
        self.timestamp
    }

    fn touch(&mut self, now_ms: i64) {
        self.timestamp = now_ms;
    }
}

type CacheKey = (NodeKind, NotionId);

pub struct HierarchyCache {
    repository: Arc<dyn NotionRepository>,
    disk: Option<DiskCache<HierarchyEntry>>,
    memory: Mutex<HashMap<CacheKey, HierarchyEntry>>,
}

impl HierarchyCache {
    /// Cache backed by files under `dir`.
    pub async fn open(
        repository: Arc<dyn NotionRepository>,
        dir: impl Into<PathBuf>,
        ttl_days: u64,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, AppError> {
        let disk = DiskCache::open(dir, ttl_days, clock).await?;
        Ok(Self::with_disk(repository, Some(disk)))
    }

    /// Memory-only cache.
    pub fn in_memory(repository: Arc<dyn NotionRepository>) -> Self {
        Self::with_disk(repository, None)
    }

    fn with_disk(
        repository: Arc<dyn NotionRepository>,
        disk: Option<DiskCache<HierarchyEntry>>,
    ) -> Self {
        Self {
            repository,
            disk,
            memory: Mutex::new(HashMap::new()),
        }
    }

    pub async fn get_children(
        &self,
        kind: NodeKind,
        id: &NotionId,
    ) -> Result<Vec<HierarchyNode>, AppError> {
        let key = (kind, id.clone());

        let remembered = self.memory.lock().get(&key).cloned();
        if let Some(entry) = remembered {
            match &self.disk {
                None => return Ok(entry.data),
                Some(disk) if !disk.is_expired(entry.timestamp) => {
                    let entry = self.restamp(disk, key, entry);
                    disk.set(&disk_key(kind, id), &entry).await;
                    return Ok(entry.data);
                }
                Some(disk) => {
                    log::debug!("Hierarchy entry for {} {} expired", kind, id);
                    self.memory.lock().remove(&key);
                    disk.remove(&disk_key(kind, id)).await;
                }
            }
        }

        if let Some(disk) = &self.disk {
            if let Some(entry) = disk.get(&disk_key(kind, id)).await {
                log::debug!("Hierarchy disk hit for {} {}", kind, id);
                self.memory.lock().insert(key, entry.clone());
                return Ok(entry.data);
            }
        }

        log::debug!("Hierarchy miss for {} {}, fetching from origin", kind, id);
        let children = discover_children(self.repository.as_ref(), kind, id).await?;

        let entry = HierarchyEntry {
            timestamp: self.disk.as_ref().map_or(0, |disk| disk.now_ms()),
            data: children.clone(),
        };
        if let Some(disk) = &self.disk {
            disk.set(&disk_key(kind, id), &entry).await;
        }
        self.memory.lock().insert(key, entry);
        Ok(children)
    }

    fn restamp(
        &self,
        disk: &DiskCache<HierarchyEntry>,
        key: CacheKey,
        mut entry: HierarchyEntry,
    ) -> HierarchyEntry {
        entry.touch(disk.now_ms());
        self.memory.lock().insert(key, entry.clone());
        entry
    }

    /// Drops one node's children from both layers.
    pub async fn invalidate(&self, kind: NodeKind, id: &NotionId) {
        self.memory.lock().remove(&(kind, id.clone()));
        if let Some(disk) = &self.disk {
            disk.remove(&disk_key(kind, id)).await;
        }
    }

    pub async fn clear_all(&self) {
        self.memory.lock().clear();
        if let Some(disk) = &self.disk {
            disk.clear().await;
        }
    }
}

fn disk_key(kind: NodeKind, id: &NotionId) -> String {
    format!("{}_{}", kind, id.as_str())
}
