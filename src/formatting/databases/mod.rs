// src/formatting/databases/mod.rs
//! Database tables: row-to-table construction, Markdown rendering, and the
//! deferred resolution of inline tables inside assembled pages.
//!
//! Table structure is kept apart from rendering, so the same [`TableData`]
//! feeds a full-database document, an inline expansion, and the JSON result.

mod builder;
mod render;
mod resolver;
mod types;

pub use builder::TableBuilder;
pub use render::{render_markdown, EMPTY_TABLE_TEXT};
pub use resolver::{resolve_placeholders, DatabaseMetaSource, ResolvedDocument, TableSource};
pub use types::{
    BuiltTable, CellValue, InlineDatabaseDescriptor, Row, StatusColorMap, TableData, ViewKind,
};
