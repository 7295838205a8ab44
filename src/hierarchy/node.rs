// src/hierarchy/node.rs
//! Tree nodes: pages and databases, identified by id alone.

use crate::formatting::presentation::object_title;
use crate::model::NotionObject;
use crate::types::NotionId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Page,
    Database,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Page => "page",
            NodeKind::Database => "database",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A page or database as shown in the tree.
///
/// Equality and hashing use the id only, so the same object listed under two
/// titles is still one node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HierarchyNode {
    pub id: NotionId,
    pub title: String,
    pub kind: NodeKind,
}

impl HierarchyNode {
    pub fn new(id: NotionId, title: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id,
            title: title.into(),
            kind,
        }
    }

    pub fn page(id: NotionId, title: impl Into<String>) -> Self {
        Self::new(id, title, NodeKind::Page)
    }

    pub fn database(id: NotionId, title: impl Into<String>) -> Self {
        Self::new(id, title, NodeKind::Database)
    }

    pub fn from_object(object: &NotionObject) -> Self {
        let kind = match object {
            NotionObject::Page(_) => NodeKind::Page,
            NotionObject::Database(_) => NodeKind::Database,
        };
        Self::new(object.id(), object_title(object), kind)
    }
}

impl PartialEq for HierarchyNode {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for HierarchyNode {}

impl Hash for HierarchyNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for HierarchyNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let icon = match self.kind {
            NodeKind::Page => "📄",
            NodeKind::Database => "🗄️",
        };
        write!(f, "{} {} ({})", icon, self.title, self.id)
    }
}
