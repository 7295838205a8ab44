use super::common::BlockCommon;
use crate::types::{BlockId, Color, NotionId, RichTextItem};
use serde::{Deserialize, Serialize};

/// Text content block
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextBlockContent {
    pub rich_text: Vec<RichTextItem>,
    pub color: Color,
}

impl TextBlockContent {
    pub fn new(rich_text: Vec<RichTextItem>) -> Self {
        Self {
            rich_text,
            color: Color::Default,
        }
    }
}

/// Paragraph, list items, quote: blocks that carry nothing but text.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
}

/// Heading block, shared by all three levels.
///
/// A toggleable heading opens a disclosure region whose body is the
/// heading's children.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HeadingBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
    pub is_toggleable: bool,
}

/// Toggle block
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ToggleBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
}

/// To-do block
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ToDoBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
    pub checked: bool,
}

/// Callout block
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CalloutBlock {
    pub common: BlockCommon,
    pub icon: Option<Icon>,
    pub content: TextBlockContent,
}

/// Page, database and callout icon: exactly one of three shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Icon {
    #[serde(rename = "emoji")]
    Emoji { emoji: String },
    #[serde(rename = "external")]
    External { external: ExternalFile },
    #[serde(rename = "file")]
    File { file: NotionFile },
}

/// Code block
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CodeBlock {
    pub common: BlockCommon,
    pub language: String,
    pub caption: Vec<RichTextItem>,
    pub content: TextBlockContent,
}

/// Equation block
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EquationBlock {
    pub common: BlockCommon,
    pub expression: String,
}

/// Blocks with no payload of their own: divider, breadcrumb, table of
/// contents, column list, column.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MarkerBlock {
    pub common: BlockCommon,
}

/// Image, video, file and pdf blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaBlock {
    pub common: BlockCommon,
    pub source: FileObject,
    pub caption: Vec<RichTextItem>,
    /// Uploaded file name, when Notion reports one.
    pub name: Option<String>,
}

/// Bookmark block
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BookmarkBlock {
    pub common: BlockCommon,
    pub url: String,
    pub caption: Vec<RichTextItem>,
}

/// Embed and link preview blocks
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EmbedBlock {
    pub common: BlockCommon,
    pub url: String,
    pub caption: Vec<RichTextItem>,
}

/// Child page block. Its block id is the page id.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChildPageBlock {
    pub common: BlockCommon,
    pub title: String,
}

/// Child database block. Its block id is the database id.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChildDatabaseBlock {
    pub common: BlockCommon,
    pub title: String,
}

/// Where a link_to_page block points.
#[derive(Debug, Clone, PartialEq)]
pub enum LinkTarget {
    Page(NotionId),
    Database(NotionId),
}

/// Link to page block
#[derive(Debug, Clone, PartialEq)]
pub struct LinkToPageBlock {
    pub common: BlockCommon,
    pub target: LinkTarget,
}

/// Table block
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableBlock {
    pub common: BlockCommon,
    pub table_width: usize,
    pub has_column_header: bool,
    pub has_row_header: bool,
}

/// Table row block
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableRowBlock {
    pub common: BlockCommon,
    pub cells: Vec<Vec<RichTextItem>>,
}

/// Synced block. `synced_from` is set on references to an original block.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SyncedBlock {
    pub common: BlockCommon,
    pub synced_from: Option<BlockId>,
}

/// A block kind this crate does not render.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UnsupportedBlock {
    pub common: BlockCommon,
    pub block_type: String,
}

/// File object types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FileObject {
    #[serde(rename = "external")]
    External { external: ExternalFile },
    #[serde(rename = "file")]
    File { file: NotionFile },
}

impl FileObject {
    pub fn external(url: impl Into<String>) -> Self {
        FileObject::External {
            external: ExternalFile { url: url.into() },
        }
    }

    /// The URL regardless of where the file is hosted.
    pub fn url(&self) -> &str {
        match self {
            FileObject::External { external } => &external.url,
            FileObject::File { file } => &file.url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalFile {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotionFile {
    pub url: String,
    #[serde(default)]
    pub expiry_time: Option<chrono::DateTime<chrono::Utc>>,
}
