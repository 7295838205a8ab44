// src/formatting/databases/resolver.rs
//! Deferred inline-table resolution.
//!
//! Assembly leaves a `__PLACEHOLDER__{id}__{title}__` token wherever a child
//! database sits. This pass finds the tokens in text order and replaces each
//! one with either an expanded table or a plain link. Identical tokens are
//! resolved once. Nothing here fails the document: any fetch error degrades
//! the token to its link form.

use super::builder::TableBuilder;
use super::render::render_markdown;
use super::types::{InlineDatabaseDescriptor, TableData};
use crate::api::NotionRepository;
use crate::constants::PLACEHOLDER_PREFIX;
use crate::error::{classify_database_fetch_failure, AppError};
use crate::formatting::block_renderer::database_link;
use crate::formatting::presentation::{database_title, UNTITLED};
use crate::model::{Database, Page};
use crate::types::{DatabaseId, NotionId};
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::collections::HashMap;

lazy_static! {
    static ref PLACEHOLDER: Regex = Regex::new(&format!(
        r"{}([0-9A-Za-z]+)__(.*?)__",
        regex::escape(PLACEHOLDER_PREFIX)
    ))
    .expect("placeholder regex is valid");
}

/// Supplier of database rows.
#[async_trait::async_trait]
pub trait TableSource: Send + Sync {
    async fn fetch_rows(&self, database_id: &DatabaseId) -> Result<Vec<Page>, AppError>;
}

/// Supplier of database metadata, used to tell inline from full-page databases.
#[async_trait::async_trait]
pub trait DatabaseMetaSource: Send + Sync {
    async fn fetch_database(&self, database_id: &DatabaseId) -> Result<Database, AppError>;
}

#[async_trait::async_trait]
impl<R: NotionRepository + ?Sized> TableSource for R {
    async fn fetch_rows(&self, database_id: &DatabaseId) -> Result<Vec<Page>, AppError> {
        self.query_rows(&NotionId::from(database_id)).await
    }
}

#[async_trait::async_trait]
impl<R: NotionRepository + ?Sized> DatabaseMetaSource for R {
    async fn fetch_database(&self, database_id: &DatabaseId) -> Result<Database, AppError> {
        self.retrieve_database(&NotionId::from(database_id)).await
    }
}

/// Markdown with every placeholder replaced, plus the tables expanded in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedDocument {
    pub markdown: String,
    pub inline_databases: Vec<InlineDatabaseDescriptor>,
}

enum Resolution {
    Expanded(InlineDatabaseDescriptor),
    Linked { title: String },
}

/// Replaces every placeholder token in `markdown`.
///
/// Without a metadata source every database is treated as inline and
/// expanded when its rows can be fetched.
pub async fn resolve_placeholders<R, M>(
    markdown: &str,
    rows: &R,
    meta: Option<&M>,
) -> ResolvedDocument
where
    R: TableSource + ?Sized,
    M: DatabaseMetaSource + ?Sized,
{
    let tokens: Vec<(String, String, String)> = PLACEHOLDER
        .captures_iter(markdown)
        .map(|caps| (caps[0].to_string(), caps[1].to_string(), caps[2].to_string()))
        .collect();

    if tokens.is_empty() {
        return ResolvedDocument {
            markdown: markdown.to_string(),
            inline_databases: Vec::new(),
        };
    }

    let mut replacements: HashMap<String, String> = HashMap::new();
    let mut inline_databases = Vec::new();

    for (token, raw_id, title) in tokens {
        if replacements.contains_key(&token) {
            continue;
        }
        let database_id = DatabaseId::new(&raw_id);

        let replacement = match resolve_one(&database_id, &title, rows, meta).await {
            Resolution::Expanded(descriptor) => {
                let text = inline_table_markdown(&descriptor.title, &descriptor.table_data);
                inline_databases.push(descriptor);
                text
            }
            Resolution::Linked { title } => {
                database_link(&NotionId::from(&database_id), &title)
            }
        };
        replacements.insert(token, replacement);
    }

    let markdown = PLACEHOLDER
        .replace_all(markdown, |caps: &Captures| {
            replacements.get(&caps[0]).cloned().unwrap_or_default()
        })
        .into_owned();

    log::debug!(
        "Resolved {} placeholder(s), {} expanded inline",
        replacements.len(),
        inline_databases.len()
    );

    ResolvedDocument {
        markdown,
        inline_databases,
    }
}

async fn resolve_one<R, M>(
    database_id: &DatabaseId,
    placeholder_title: &str,
    rows: &R,
    meta: Option<&M>,
) -> Resolution
where
    R: TableSource + ?Sized,
    M: DatabaseMetaSource + ?Sized,
{
    let mut schema: Option<Database> = None;
    if let Some(meta) = meta {
        match meta.fetch_database(database_id).await {
            Ok(database) if !database.is_inline => {
                log::debug!("Database {} is a full page, linking", database_id);
                return Resolution::Linked {
                    title: database_title(&database),
                };
            }
            Ok(database) => schema = Some(database),
            Err(e) => log::warn!(
                "Metadata of database {} unavailable ({}), treating it as inline",
                database_id,
                classify_database_fetch_failure(&e)
            ),
        }
    }

    let title = match &schema {
        Some(database) => database_title(database),
        None if placeholder_title.trim().is_empty() => UNTITLED.to_string(),
        None => placeholder_title.to_string(),
    };

    let pages = match rows.fetch_rows(database_id).await {
        Ok(pages) => pages,
        Err(e) => {
            log::warn!(
                "Inline database {} degraded to a link: {}",
                database_id,
                classify_database_fetch_failure(&e)
            );
            return Resolution::Linked { title };
        }
    };

    let builder = TableBuilder::new(&pages);
    let built = match &schema {
        Some(database) => builder.with_schema(database).build(),
        None => builder.build(),
    };

    Resolution::Expanded(InlineDatabaseDescriptor {
        database_id: database_id.as_str().to_string(),
        title,
        view_kind: built.view_kind,
        date_property_name: built.date_property_name,
        status_color_map: built.status_color_map,
        table_data: built.data,
    })
}

fn inline_table_markdown(title: &str, table: &TableData) -> String {
    format!("🗄️ **{}**\n\n{}", title, render_markdown(table))
}
