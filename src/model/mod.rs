//! Domain model: pages, databases, blocks and their property values.

mod block;
pub mod blocks;
pub mod common;
mod property_value;

pub use block::Block;
pub use blocks::*;
pub use common::*;
pub use property_value::{PropertyKind, PropertyTypeValue, PropertyValue};

use crate::types::{BlockId, DatabaseId, NotionId, PageId, PropertyName, RichTextItem};
use indexmap::IndexMap;

/// The objects that can stand at the top of a rendered document
#[derive(Debug, Clone, PartialEq)]
pub enum NotionObject {
    Page(Page),
    Database(Database),
}

impl NotionObject {
    pub fn id(&self) -> NotionId {
        match self {
            NotionObject::Page(page) => NotionId::from(&page.id),
            NotionObject::Database(database) => NotionId::from(&database.id),
        }
    }

    pub fn parent(&self) -> Option<&Parent> {
        match self {
            NotionObject::Page(page) => page.parent.as_ref(),
            NotionObject::Database(database) => database.parent.as_ref(),
        }
    }
}

/// A Notion page, or a row of a database.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub id: PageId,
    pub url: String,
    /// Property values in the order Notion returned them.
    pub properties: IndexMap<PropertyName, PropertyValue>,
    pub parent: Option<Parent>,
    pub archived: bool,
    pub cover: Option<FileObject>,
    pub icon: Option<Icon>,
}

impl Page {
    pub fn new(id: PageId) -> Self {
        Self {
            url: format!("https://www.notion.so/{}", id.as_str()),
            id,
            properties: IndexMap::new(),
            parent: None,
            archived: false,
            cover: None,
            icon: None,
        }
    }

    pub fn with_property(mut self, name: &str, value: PropertyValue) -> Self {
        self.properties.insert(PropertyName::new(name), value);
        self
    }
}

/// A Notion database
#[derive(Debug, Clone, PartialEq)]
pub struct Database {
    pub id: DatabaseId,
    pub title: Vec<RichTextItem>,
    pub description: Vec<RichTextItem>,
    pub url: String,
    /// Column schema in natural order.
    pub schema: IndexMap<PropertyName, DatabaseProperty>,
    pub parent: Option<Parent>,
    /// Inline databases live inside a page; full-page databases are pages of their own.
    pub is_inline: bool,
    pub archived: bool,
    pub cover: Option<FileObject>,
    pub icon: Option<Icon>,
}

impl Database {
    pub fn new(id: DatabaseId, title: &str) -> Self {
        Self {
            url: format!("https://www.notion.so/{}", id.as_str()),
            id,
            title: vec![RichTextItem::plain_text(title)],
            description: Vec::new(),
            schema: IndexMap::new(),
            parent: None,
            is_inline: false,
            archived: false,
            cover: None,
            icon: None,
        }
    }

    pub fn with_column(mut self, name: &str, kind: PropertyKind) -> Self {
        self.schema.insert(
            PropertyName::new(name),
            DatabaseProperty {
                id: name.to_string(),
                name: PropertyName::new(name),
                kind,
            },
        );
        self
    }
}

/// Database column definition
#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseProperty {
    pub id: String,
    pub name: PropertyName,
    pub kind: PropertyKind,
}

/// Parent reference with typed IDs
#[derive(Debug, Clone, PartialEq)]
pub enum Parent {
    Page(PageId),
    Database(DatabaseId),
    Block(BlockId),
    Workspace,
}

impl Parent {
    /// The referenced ancestor id; `None` for the workspace.
    pub fn id(&self) -> Option<NotionId> {
        match self {
            Parent::Page(id) => Some(NotionId::from(id)),
            Parent::Database(id) => Some(NotionId::from(id)),
            Parent::Block(id) => Some(NotionId::from(id)),
            Parent::Workspace => None,
        }
    }
}
