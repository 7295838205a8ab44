// src/api/mod.rs
//! Notion API interaction: the ability to retrieve content from a workspace.
//!
//! Business logic depends on [`NotionRepository`], never on HTTP details. The
//! HTTP implementation lives in [`client`]; wire parsing in [`parser`] and
//! [`adapter`].

pub mod adapter;
pub mod client;
mod pagination;
pub mod parser;
pub mod responses;
mod retry;
pub mod types;

use crate::error::AppError;
use crate::model::{Block, Database, NotionObject, Page};
use crate::types::NotionId;

pub use client::NotionHttpClient;
pub use pagination::fetch_all_pages;
pub use retry::retry_with_backoff;

/// The ability to retrieve content from a Notion workspace.
#[async_trait::async_trait]
pub trait NotionRepository: Send + Sync {
    async fn retrieve_page(&self, id: &NotionId) -> Result<Page, AppError>;
    async fn retrieve_database(&self, id: &NotionId) -> Result<Database, AppError>;
    async fn retrieve_block(&self, id: &NotionId) -> Result<Block, AppError>;
    /// Every child block of `parent`, in document order, across all result pages.
    async fn retrieve_children(&self, parent: &NotionId) -> Result<Vec<Block>, AppError>;
    /// Every row of a database, across all result pages.
    async fn query_rows(&self, database: &NotionId) -> Result<Vec<Page>, AppError>;

    /// Resolves an id of unknown kind by trying page first, then database.
    ///
    /// A page failure is read as "not a page". Missing credentials are never
    /// masked: they surface from the first attempt.
    async fn resolve_object(&self, id: &NotionId) -> Result<NotionObject, AppError> {
        match self.retrieve_page(id).await {
            Ok(page) => return Ok(NotionObject::Page(page)),
            Err(e) if e.is_not_configured() => return Err(e),
            Err(e) => log::debug!("{} is not a page ({}), trying database", id, e),
        }

        match self.retrieve_database(id).await {
            Ok(database) => Ok(NotionObject::Database(database)),
            Err(e) if e.is_not_found() => Err(AppError::KindMismatch { id: id.to_string() }),
            Err(e) => Err(e),
        }
    }
}
