// src/api/responses.rs
//! Wire shapes of Notion API responses.
//!
//! These structs mirror the JSON the API sends and stay permissive: every
//! payload field defaults, so an unfamiliar block degrades to an unsupported
//! block instead of failing the whole page. Conversion into the domain model
//! lives in [`super::adapter`].

use crate::error::AppError;
use crate::model::{ExternalFile, NotionFile};
use crate::types::Color;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Paginated list envelope (`blocks/{id}/children`, `databases/{id}/query`).
#[derive(Debug, Deserialize)]
pub struct WireList<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub has_more: bool,
}

/// Error body returned with non-2xx statuses.
#[derive(Debug, Deserialize)]
pub struct NotionError {
    #[serde(default)]
    pub status: u16,
    pub code: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct WireBlock {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub has_children: bool,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub in_trash: bool,
    #[serde(default)]
    pub parent: Option<Value>,
    /// Everything else, including the payload keyed by `kind`.
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

/// Union of the payload fields used by the block kinds we render.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WireBlockPayload {
    pub rich_text: Vec<WireRichText>,
    pub color: Option<Color>,
    pub is_toggleable: bool,
    pub checked: bool,
    pub icon: Option<Value>,
    pub language: Option<String>,
    pub caption: Vec<WireRichText>,
    pub expression: Option<String>,
    pub url: Option<String>,
    pub title: Option<String>,
    pub name: Option<String>,
    pub table_width: usize,
    pub has_column_header: bool,
    pub has_row_header: bool,
    pub cells: Vec<Vec<WireRichText>>,
    pub synced_from: Option<WireSyncedFrom>,
    /// Hosting variant of media payloads, or target kind of link_to_page.
    #[serde(rename = "type")]
    pub variant: Option<String>,
    pub external: Option<ExternalFile>,
    pub file: Option<NotionFile>,
    pub page_id: Option<String>,
    pub database_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WireSyncedFrom {
    pub block_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WireParent {
    PageId {
        page_id: String,
    },
    DatabaseId {
        database_id: String,
    },
    BlockId {
        block_id: String,
    },
    Workspace,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireRichText {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub plain_text: String,
    #[serde(default)]
    pub href: Option<String>,
    #[serde(default)]
    pub annotations: WireAnnotations,
    #[serde(default)]
    pub text: Option<WireText>,
    #[serde(default)]
    pub mention: Option<Value>,
    #[serde(default)]
    pub equation: Option<WireEquation>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WireAnnotations {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub code: bool,
    pub color: Color,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireText {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub link: Option<WireLink>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireLink {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireEquation {
    #[serde(default)]
    pub expression: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireDate {
    pub start: String,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub time_zone: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireSelect {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub color: Color,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireUser {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub person: Option<WirePerson>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WirePerson {
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WirePage {
    pub id: String,
    #[serde(default)]
    pub url: String,
    /// Kept as an ordered map so columns come out in the API's order.
    #[serde(default)]
    pub properties: IndexMap<String, Value>,
    #[serde(default)]
    pub parent: Option<Value>,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub in_trash: bool,
    #[serde(default)]
    pub cover: Option<Value>,
    #[serde(default)]
    pub icon: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct WireDatabase {
    pub id: String,
    #[serde(default)]
    pub title: Vec<WireRichText>,
    #[serde(default)]
    pub description: Vec<WireRichText>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub properties: IndexMap<String, WireSchemaProperty>,
    #[serde(default)]
    pub parent: Option<Value>,
    #[serde(default)]
    pub is_inline: bool,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub in_trash: bool,
    #[serde(default)]
    pub cover: Option<Value>,
    #[serde(default)]
    pub icon: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct WireSchemaProperty {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Trait for converting wire types to domain types
pub trait ToDomain<T> {
    fn to_domain(self) -> Result<T, AppError>;
}

impl ToDomain<crate::model::Page> for WirePage {
    fn to_domain(self) -> Result<crate::model::Page, AppError> {
        Ok(super::adapter::convert_page(self))
    }
}

impl ToDomain<crate::model::Database> for WireDatabase {
    fn to_domain(self) -> Result<crate::model::Database, AppError> {
        Ok(super::adapter::convert_database(self))
    }
}

impl ToDomain<crate::model::Block> for WireBlock {
    fn to_domain(self) -> Result<crate::model::Block, AppError> {
        Ok(super::adapter::convert_block(self))
    }
}

impl<W, T> ToDomain<Vec<T>> for Vec<W>
where
    W: ToDomain<T>,
{
    fn to_domain(self) -> Result<Vec<T>, AppError> {
        self.into_iter().map(ToDomain::to_domain).collect()
    }
}
