// src/hierarchy/chain.rs
//! Ancestor chains: from any node up to a configured root.
//!
//! The walk reads each node's `parent` lazily and memoizes what it learns in
//! an item cache that tree listings also feed. Running off the top of the
//! workspace, revisiting a node, or exceeding [`MAX_ANCESTOR_HOPS`] all end
//! the walk with `None`; none of them is an error.

use super::node::HierarchyNode;
use crate::api::NotionRepository;
use crate::constants::MAX_ANCESTOR_HOPS;
use crate::error::AppError;
use crate::model::Parent;
use crate::types::NotionId;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// A node plus the id it sits under; `parent` is `None` at the workspace top.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainItem {
    pub node: HierarchyNode,
    pub parent: Option<NotionId>,
}

pub struct ChainResolver {
    repository: Arc<dyn NotionRepository>,
    items: Mutex<HashMap<NotionId, ChainItem>>,
}

impl ChainResolver {
    pub fn new(repository: Arc<dyn NotionRepository>) -> Self {
        Self {
            repository,
            items: Mutex::new(HashMap::new()),
        }
    }

    /// Records a node seen in a listing under `parent`.
    pub fn remember(&self, node: HierarchyNode, parent: Option<NotionId>) {
        self.items
            .lock()
            .insert(node.id.clone(), ChainItem { node, parent });
    }

    pub fn lookup(&self, id: &NotionId) -> Option<ChainItem> {
        self.items.lock().get(id).cloned()
    }

    pub fn forget(&self, id: &NotionId) {
        self.items.lock().remove(id);
    }

    pub fn clear(&self) {
        self.items.lock().clear();
    }

    /// The memoized item for `id`, fetched from origin when unknown.
    ///
    /// `Ok(None)` means the id is not a reachable page or database. Missing
    /// credentials are the only failure reported as an error.
    pub async fn describe(&self, id: &NotionId) -> Result<Option<ChainItem>, AppError> {
        if let Some(item) = self.lookup(id) {
            return Ok(Some(item));
        }

        let object = match self.repository.resolve_object(id).await {
            Ok(object) => object,
            Err(e) if e.is_not_configured() => return Err(e),
            Err(e) => {
                log::debug!("{} is not reachable: {}", id, e);
                return Ok(None);
            }
        };

        let parent = match object.parent() {
            Some(parent) => self.parent_object_id(parent).await?,
            None => None,
        };
        let item = ChainItem {
            node: HierarchyNode::from_object(&object),
            parent,
        };
        self.items.lock().insert(id.clone(), item.clone());
        Ok(Some(item))
    }

    /// Root-to-node path, or `None` when `node_id` cannot be walked up to
    /// `root_id`.
    pub async fn resolve_chain(
        &self,
        node_id: &NotionId,
        root_id: &NotionId,
    ) -> Result<Option<Vec<HierarchyNode>>, AppError> {
        let mut path = Vec::new();
        let mut visited = HashSet::new();
        let mut current = node_id.clone();

        for _ in 0..=MAX_ANCESTOR_HOPS {
            if !visited.insert(current.clone()) {
                log::debug!("Cycle at {} while climbing from {}", current, node_id);
                return Ok(None);
            }

            let Some(item) = self.describe(&current).await? else {
                return Ok(None);
            };
            path.push(item.node);

            if &current == root_id {
                path.reverse();
                return Ok(Some(path));
            }

            match item.parent {
                Some(parent) => current = parent,
                None => {
                    log::debug!("{} reached the workspace top without meeting the root", node_id);
                    return Ok(None);
                }
            }
        }

        log::debug!("Gave up climbing from {} after {} hops", node_id, MAX_ANCESTOR_HOPS);
        Ok(None)
    }

    /// The page or database a parent reference leads to.
    ///
    /// Block parents are climbed block by block until a child page or child
    /// database block appears; its id is the object's id.
    async fn parent_object_id(&self, parent: &Parent) -> Result<Option<NotionId>, AppError> {
        let block_id = match parent {
            Parent::Page(id) => return Ok(Some(NotionId::from(id))),
            Parent::Database(id) => return Ok(Some(NotionId::from(id))),
            Parent::Workspace => return Ok(None),
            Parent::Block(id) => NotionId::from(id),
        };

        let mut current = block_id;
        for _ in 0..MAX_ANCESTOR_HOPS {
            let block = match self.repository.retrieve_block(&current).await {
                Ok(block) => block,
                Err(e) if e.is_not_configured() => return Err(e),
                Err(e) => {
                    log::debug!("Could not climb through block {}: {}", current, e);
                    return Ok(None);
                }
            };
            if block.is_child_reference() {
                return Ok(Some(current));
            }
            match block.parent_id() {
                Some(next) => current = NotionId::from(next),
                None => return Ok(None),
            }
        }
        Ok(None)
    }
}

