// src/hierarchy/provider.rs
//! The tree a viewer browses: children, parents, refresh, and locating a
//! node somewhere below the root.

use super::cache::HierarchyCache;
use super::chain::ChainResolver;
use super::node::{HierarchyNode, NodeKind};
use crate::error::AppError;
use crate::types::NotionId;
use std::sync::Arc;

pub struct HierarchyProvider {
    cache: Arc<HierarchyCache>,
    resolver: Arc<ChainResolver>,
    root: NotionId,
}

impl HierarchyProvider {
    pub fn new(cache: Arc<HierarchyCache>, resolver: Arc<ChainResolver>, root: NotionId) -> Self {
        Self {
            cache,
            resolver,
            root,
        }
    }

    pub fn root_id(&self) -> &NotionId {
        &self.root
    }

    /// The root as a node; an unreachable root is an error.
    pub async fn root_node(&self) -> Result<HierarchyNode, AppError> {
        self.node(&self.root)
            .await?
            .ok_or_else(|| AppError::KindMismatch {
                id: self.root.to_string(),
            })
    }

    /// Any page or database as a node, whether or not it is below the root.
    pub async fn node(&self, id: &NotionId) -> Result<Option<HierarchyNode>, AppError> {
        Ok(self.resolver.describe(id).await?.map(|item| item.node))
    }

    /// Children of `node`, or of the root when `node` is `None`.
    pub async fn get_children(
        &self,
        node: Option<&HierarchyNode>,
    ) -> Result<Vec<HierarchyNode>, AppError> {
        let parent = match node {
            Some(node) => node.clone(),
            None => self.root_node().await?,
        };

        let children = self.cache.get_children(parent.kind, &parent.id).await?;
        for child in &children {
            self.resolver.remember(child.clone(), Some(parent.id.clone()));
        }
        Ok(children)
    }

    /// The node `node` sits under, `None` at the root or the workspace top.
    pub async fn get_parent(
        &self,
        node: &HierarchyNode,
    ) -> Result<Option<HierarchyNode>, AppError> {
        if node.id == self.root {
            return Ok(None);
        }
        let Some(item) = self.resolver.describe(&node.id).await? else {
            return Ok(None);
        };
        let Some(parent_id) = item.parent else {
            return Ok(None);
        };
        Ok(self
            .resolver
            .describe(&parent_id)
            .await?
            .map(|parent| parent.node))
    }

    /// Forgets everything cached.
    pub async fn refresh(&self) {
        self.cache.clear_all().await;
        self.resolver.clear();
    }

    /// Forgets one node's children, whichever kind it is.
    pub async fn refresh_item(&self, id: &NotionId) {
        self.cache.invalidate(NodeKind::Page, id).await;
        self.cache.invalidate(NodeKind::Database, id).await;
        self.resolver.forget(id);
    }

    /// Root-to-node path confirmed from both directions.
    ///
    /// The upward walk proposes a path; each step is then accepted only if
    /// the child shows up when its parent's children are listed.
    pub async fn locate(&self, id: &NotionId) -> Result<Option<Vec<HierarchyNode>>, AppError> {
        let Some(chain) = self.resolver.resolve_chain(id, &self.root).await? else {
            log::debug!("{} is not below root {}", id, self.root);
            return Ok(None);
        };

        let mut confirmed = Vec::with_capacity(chain.len());
        let mut nodes = chain.into_iter();
        let Some(root) = nodes.next() else {
            return Ok(None);
        };
        confirmed.push(root);

        for step in nodes {
            let parent = confirmed.last().cloned();
            let children = self.get_children(parent.as_ref()).await?;
            match children.into_iter().find(|child| child.id == step.id) {
                Some(listed) => confirmed.push(listed),
                None => {
                    log::debug!(
                        "{} claims a parent that does not list it; not visible",
                        step.id
                    );
                    return Ok(None);
                }
            }
        }
        Ok(Some(confirmed))
    }

    /// The node for `id` once it is confirmed reachable from the root.
    pub async fn ensure_visible(&self, id: &NotionId) -> Result<Option<HierarchyNode>, AppError> {
        Ok(self.locate(id).await?.and_then(|mut chain| chain.pop()))
    }
}
