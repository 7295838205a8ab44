// src/lib.rs
//! notion-docview library: renders Notion pages and databases to Markdown and
//! browses the workspace hierarchy through a TTL disk cache.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `ValidationError`
//! - **Configuration**: `ViewerConfig`, `CommandLineInput`
//! - **Domain model**: `NotionObject`, `Page`, `Database`, `Block`, etc.
//! - **Domain types**: `NotionId`, `ApiKey`, `BlockId`, `PageId`, etc.
//! - **API client**: `NotionRepository`, `NotionHttpClient`
//! - **Rendering**: `DocumentRenderer`, `assemble`, `resolve_placeholders`, `TableBuilder`
//! - **Hierarchy**: `HierarchyProvider`, `HierarchyCache`, `ChainResolver`

pub mod api;
pub mod cache;
pub mod clock;
pub mod config;
pub mod constants;
pub mod error;
pub mod formatting;
pub mod hierarchy;
pub mod model;
pub mod types;

// --- Error Handling ---
pub use crate::error::{classify_database_fetch_failure, AppError, DatabaseFetchFailure};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{CommandLineInput, ViewerCommand, ViewerConfig};

// --- Domain Model ---
pub use crate::model::{
    Block, BlockCommon, Database, DatabaseProperty, NotionObject, Page, Parent, PropertyKind,
    PropertyTypeValue, PropertyValue,
};

// --- Domain Types ---
pub use crate::types::{
    ApiKey, BlockId, Color, DatabaseId, DateValue, MentionType, NotionId, PageId, PropertyName,
    RichTextItem, SelectOption,
};

// --- API Client ---
pub use crate::api::{NotionHttpClient, NotionRepository};

// --- Rendering ---
pub use crate::formatting::databases::{
    resolve_placeholders, InlineDatabaseDescriptor, ResolvedDocument, TableBuilder, TableData,
    ViewKind,
};
pub use crate::formatting::properties::{extract_date_range, extract_value, DateRange};
pub use crate::formatting::{assemble, render_block, DocumentRenderer, RenderedDocument};

// --- Caching and Hierarchy ---
pub use crate::cache::{DiskCache, PageCache};
pub use crate::clock::{Clock, MockClock, SystemClock};
pub use crate::hierarchy::{
    ChainResolver, HierarchyCache, HierarchyNode, HierarchyProvider, NodeKind,
};
