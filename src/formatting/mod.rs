// src/formatting/mod.rs
//! Renders Notion data structures into Markdown documents.
//!
//! Leaves first: property and rich text extraction, per-block fragments,
//! the assembler that walks block trees, inline-table resolution, and the
//! document renderer that ties them together.

pub mod assembler;
pub mod block_renderer;
pub mod databases;
mod document;
pub mod embed;
pub mod presentation;
pub mod properties;
pub mod rich_text;

pub use assembler::{assemble, ChildSource};
pub use block_renderer::render_block;
pub use document::{DocumentRenderer, RenderedDocument};
