// src/hierarchy/discovery.rs
//! Child discovery from origin.
//!
//! A page's children are the pages and databases its top-level blocks refer
//! to: child page and child database blocks, link-to-page blocks, and
//! mentions or workspace links inside rich text. A database's children are
//! its rows.

use super::node::{HierarchyNode, NodeKind};
use crate::api::NotionRepository;
use crate::error::AppError;
use crate::formatting::presentation::{database_title, page_title, UNTITLED};
use crate::model::{Block, LinkTarget};
use crate::types::{MentionTarget, NotionId};

/// Fetches and scans the children of a node.
pub async fn discover_children<R>(
    repository: &R,
    kind: NodeKind,
    id: &NotionId,
) -> Result<Vec<HierarchyNode>, AppError>
where
    R: NotionRepository + ?Sized,
{
    match kind {
        NodeKind::Database => {
            let rows = repository.query_rows(id).await?;
            log::debug!("Database {} has {} rows", id, rows.len());
            Ok(rows
                .iter()
                .map(|row| HierarchyNode::page(NotionId::from(&row.id), page_title(row)))
                .collect())
        }
        NodeKind::Page => {
            let blocks = repository.retrieve_children(id).await?;
            let mut nodes = scan_blocks(&blocks, id);
            fill_missing_titles(repository, &mut nodes).await;
            log::debug!(
                "Page {} references {} pages/databases in {} blocks",
                id,
                nodes.len(),
                blocks.len()
            );
            Ok(nodes)
        }
    }
}

/// References found in a block list, deduplicated by id in first-seen order.
///
/// Nodes whose title is not carried by the block itself get an empty title.
pub fn scan_blocks(blocks: &[Block], owner: &NotionId) -> Vec<HierarchyNode> {
    let mut found = Discovered::new(owner);

    for block in blocks {
        match block {
            Block::ChildPage(child) => found.add(HierarchyNode::page(
                NotionId::from(block.id()),
                child.title.clone(),
            )),
            Block::ChildDatabase(child) => found.add(HierarchyNode::database(
                NotionId::from(block.id()),
                child.title.clone(),
            )),
            Block::LinkToPage(link) => match &link.target {
                LinkTarget::Page(id) => found.add(HierarchyNode::page(id.clone(), "")),
                LinkTarget::Database(id) => found.add(HierarchyNode::database(id.clone(), "")),
            },
            _ => {}
        }

        for run in block.rich_text_runs() {
            for item in run {
                let title = item.plain_text.trim();
                match item.mention_target() {
                    Some(MentionTarget::Page(id)) => found.add(HierarchyNode::page(id, title)),
                    Some(MentionTarget::Database(id)) => {
                        found.add(HierarchyNode::database(id, title))
                    }
                    None => {}
                }
            }
        }
    }

    found.nodes
}

struct Discovered<'a> {
    owner: &'a NotionId,
    nodes: Vec<HierarchyNode>,
}

impl<'a> Discovered<'a> {
    fn new(owner: &'a NotionId) -> Self {
        Self {
            owner,
            nodes: Vec::new(),
        }
    }

    fn add(&mut self, node: HierarchyNode) {
        if &node.id == self.owner {
            return;
        }
        match self.nodes.iter_mut().find(|n| n.id == node.id) {
            Some(existing) if existing.title.is_empty() => existing.title = node.title,
            Some(_) => {}
            None => self.nodes.push(node),
        }
    }
}

/// Looks up titles that the referring blocks did not carry.
async fn fill_missing_titles<R>(repository: &R, nodes: &mut [HierarchyNode])
where
    R: NotionRepository + ?Sized,
{
    for node in nodes.iter_mut().filter(|n| n.title.is_empty()) {
        let fetched = match node.kind {
            NodeKind::Page => repository
                .retrieve_page(&node.id)
                .await
                .map(|page| page_title(&page)),
            NodeKind::Database => repository
                .retrieve_database(&node.id)
                .await
                .map(|database| database_title(&database)),
        };
        node.title = fetched.unwrap_or_else(|e| {
            log::debug!("No title for {} {}: {}", node.kind, node.id, e);
            UNTITLED.to_string()
        });
    }
}
