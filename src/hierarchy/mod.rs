// src/hierarchy/mod.rs
//! Workspace hierarchy: which pages and databases sit under which.
//!
//! Children are discovered by scanning a page's blocks (or a database's rows)
//! and cached with a sliding TTL. Ancestor chains are reconstructed upward
//! from parent references and confirmed downward against the cached lists.

mod cache;
mod chain;
mod discovery;
mod node;
mod provider;

pub use cache::{HierarchyCache, HierarchyEntry};
pub use chain::{ChainItem, ChainResolver};
pub use discovery::{discover_children, scan_blocks};
pub use node::{HierarchyNode, NodeKind};
pub use provider::HierarchyProvider;
