// src/cache/mod.rs
//! Persistent caches: a generic TTL file cache and the rendered-document cache
//! built on it. The hierarchy cache lives in [`crate::hierarchy`].

mod disk;
mod page_cache;

pub use disk::{sanitize_key, DiskCache, TimestampedEntry};
pub use page_cache::{PageCache, PageCacheEntry};

use crate::constants::CACHE_DIR_NAME;
use std::path::PathBuf;

/// `$XDG_CACHE_HOME/notion-docview`, else `~/.cache/notion-docview`.
pub fn default_cache_dir() -> PathBuf {
    std::env::var("XDG_CACHE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".cache")
        })
        .join(CACHE_DIR_NAME)
}
