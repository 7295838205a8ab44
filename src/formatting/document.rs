// src/formatting/document.rs
//! Document rendering: everything needed to paint one page or database.
//!
//! Pages are assembled block by block and their inline tables resolved
//! afterwards. Databases become a table plus their description.

use super::assembler::assemble;
use super::databases::{
    resolve_placeholders, InlineDatabaseDescriptor, StatusColorMap, TableBuilder, TableData,
    ViewKind,
};
use super::presentation::{self, PageIcon};
use crate::api::NotionRepository;
use crate::cache::PageCache;
use crate::error::AppError;
use crate::model::{Database, NotionObject, Page};
use crate::types::NotionId;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// The flat render result handed to a viewer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedDocument {
    pub id: String,
    pub markdown: String,
    pub title: String,
    #[serde(default)]
    pub cover_url: Option<String>,
    #[serde(default)]
    pub icon: Option<PageIcon>,
    #[serde(default)]
    pub description: Option<String>,
    /// Set for database documents only.
    #[serde(default)]
    pub table_data: Option<TableData>,
    #[serde(default)]
    pub view_kind: Option<ViewKind>,
    #[serde(default)]
    pub date_property_name: Option<String>,
    #[serde(default)]
    pub status_color_map: Option<StatusColorMap>,
    #[serde(default)]
    pub inline_databases: Vec<InlineDatabaseDescriptor>,
}

impl RenderedDocument {
    pub fn is_database(&self) -> bool {
        self.table_data.is_some()
    }
}

/// Renders pages and databases, optionally through a [`PageCache`].
pub struct DocumentRenderer {
    repository: Arc<dyn NotionRepository>,
    cache: Option<Arc<PageCache>>,
}

impl DocumentRenderer {
    pub fn new(repository: Arc<dyn NotionRepository>) -> Self {
        Self {
            repository,
            cache: None,
        }
    }

    pub fn with_cache(mut self, cache: Arc<PageCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Renders an id of unknown kind, serving a cached result when fresh.
    pub async fn render(&self, id: &NotionId) -> Result<RenderedDocument, AppError> {
        if let Some(cache) = &self.cache {
            if let Some(document) = cache.get(id).await {
                return Ok(document);
            }
        }
        self.render_fresh(id).await
    }

    /// Renders from origin and rewrites the cached copy.
    pub async fn render_fresh(&self, id: &NotionId) -> Result<RenderedDocument, AppError> {
        let document = match self.repository.resolve_object(id).await? {
            NotionObject::Page(page) => self.render_page(&page).await?,
            NotionObject::Database(database) => self.render_database(&database).await?,
        };

        if let Some(cache) = &self.cache {
            cache.put(id, &document).await;
        }
        Ok(document)
    }

    pub async fn render_page(&self, page: &Page) -> Result<RenderedDocument, AppError> {
        log::info!("Rendering page {}", page.id);
        let repository = self.repository.as_ref();

        let blocks = repository
            .retrieve_children(&NotionId::from(&page.id))
            .await?;
        let assembled = assemble(&blocks, repository).await;
        let resolved = resolve_placeholders(&assembled, repository, Some(repository)).await;

        Ok(RenderedDocument {
            id: page.id.as_str().to_string(),
            markdown: resolved.markdown,
            title: presentation::page_title(page),
            cover_url: presentation::cover_url(page.cover.as_ref()),
            icon: presentation::icon(page.icon.as_ref()),
            description: None,
            inline_databases: resolved.inline_databases,
            ..RenderedDocument::default()
        })
    }

    pub async fn render_database(
        &self,
        database: &Database,
    ) -> Result<RenderedDocument, AppError> {
        log::info!("Rendering database {}", database.id);
        let rows = self
            .repository
            .query_rows(&NotionId::from(&database.id))
            .await?;
        let table = TableBuilder::new(&rows).with_schema(database).build();
        let description = presentation::description(database);

        Ok(RenderedDocument {
            id: database.id.as_str().to_string(),
            markdown: description.clone().unwrap_or_default(),
            title: presentation::database_title(database),
            cover_url: presentation::cover_url(database.cover.as_ref()),
            icon: presentation::icon(database.icon.as_ref()),
            description,
            table_data: Some(table.data),
            view_kind: Some(table.view_kind),
            date_property_name: table.date_property_name,
            status_color_map: table.status_color_map,
            inline_databases: Vec::new(),
        })
    }
}
