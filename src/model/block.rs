use super::blocks::*;
use super::common::BlockCommon;
use crate::types::{BlockId, RichTextItem};

/// Macro to reduce boilerplate in Block enum methods
macro_rules! match_all_blocks {
    ($self:expr, $pattern:pat => $result:expr) => {
        match $self {
            Block::Paragraph($pattern) => $result,
            Block::Heading1($pattern) => $result,
            Block::Heading2($pattern) => $result,
            Block::Heading3($pattern) => $result,
            Block::BulletedListItem($pattern) => $result,
            Block::NumberedListItem($pattern) => $result,
            Block::ToDo($pattern) => $result,
            Block::Toggle($pattern) => $result,
            Block::Quote($pattern) => $result,
            Block::Callout($pattern) => $result,
            Block::Code($pattern) => $result,
            Block::Equation($pattern) => $result,
            Block::Divider($pattern) => $result,
            Block::Breadcrumb($pattern) => $result,
            Block::TableOfContents($pattern) => $result,
            Block::Image($pattern) => $result,
            Block::Video($pattern) => $result,
            Block::File($pattern) => $result,
            Block::Pdf($pattern) => $result,
            Block::Bookmark($pattern) => $result,
            Block::Embed($pattern) => $result,
            Block::LinkPreview($pattern) => $result,
            Block::ChildPage($pattern) => $result,
            Block::ChildDatabase($pattern) => $result,
            Block::LinkToPage($pattern) => $result,
            Block::Table($pattern) => $result,
            Block::TableRow($pattern) => $result,
            Block::ColumnList($pattern) => $result,
            Block::Column($pattern) => $result,
            Block::Synced($pattern) => $result,
            Block::Unsupported($pattern) => $result,
        }
    };
}

/// Block represents all Notion block kinds this crate understands
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph(TextBlock),
    Heading1(HeadingBlock),
    Heading2(HeadingBlock),
    Heading3(HeadingBlock),
    BulletedListItem(TextBlock),
    NumberedListItem(TextBlock),
    ToDo(ToDoBlock),
    Toggle(ToggleBlock),
    Quote(TextBlock),
    Callout(CalloutBlock),
    Code(CodeBlock),
    Equation(EquationBlock),
    Divider(MarkerBlock),
    Breadcrumb(MarkerBlock),
    TableOfContents(MarkerBlock),
    Image(MediaBlock),
    Video(MediaBlock),
    File(MediaBlock),
    Pdf(MediaBlock),
    Bookmark(BookmarkBlock),
    Embed(EmbedBlock),
    LinkPreview(EmbedBlock),
    ChildPage(ChildPageBlock),
    ChildDatabase(ChildDatabaseBlock),
    LinkToPage(LinkToPageBlock),
    Table(TableBlock),
    TableRow(TableRowBlock),
    ColumnList(MarkerBlock),
    Column(MarkerBlock),
    Synced(SyncedBlock),
    Unsupported(UnsupportedBlock),
}

impl Block {
    /// Get the block's ID
    pub fn id(&self) -> &BlockId {
        &self.common().id
    }

    /// Id of whatever this block sits under, when known.
    pub fn parent_id(&self) -> Option<&BlockId> {
        self.common().parent_id.as_ref()
    }

    /// Check if block has children
    pub fn has_children(&self) -> bool {
        self.common().has_children
    }

    /// Get common block data
    pub fn common(&self) -> &BlockCommon {
        match_all_blocks!(self, b => &b.common)
    }

    /// Whether rendering this block opens a `<details>` region that has to be
    /// closed once its children are written.
    pub fn opens_disclosure(&self) -> bool {
        match self {
            Block::Toggle(_) => true,
            Block::Heading1(h) | Block::Heading2(h) | Block::Heading3(h) => h.is_toggleable,
            _ => false,
        }
    }

    /// Child page and child database blocks point at separate documents.
    pub fn is_child_reference(&self) -> bool {
        matches!(self, Block::ChildPage(_) | Block::ChildDatabase(_))
    }

    /// Every rich text run carried by this block, in display order.
    pub fn rich_text_runs(&self) -> Vec<&[RichTextItem]> {
        match self {
            Block::Paragraph(b)
            | Block::BulletedListItem(b)
            | Block::NumberedListItem(b)
            | Block::Quote(b) => vec![b.content.rich_text.as_slice()],
            Block::Heading1(b) | Block::Heading2(b) | Block::Heading3(b) => {
                vec![b.content.rich_text.as_slice()]
            }
            Block::ToDo(b) => vec![b.content.rich_text.as_slice()],
            Block::Toggle(b) => vec![b.content.rich_text.as_slice()],
            Block::Callout(b) => vec![b.content.rich_text.as_slice()],
            Block::Code(b) => vec![b.caption.as_slice()],
            Block::Image(b) | Block::Video(b) | Block::File(b) | Block::Pdf(b) => {
                vec![b.caption.as_slice()]
            }
            Block::Bookmark(b) => vec![b.caption.as_slice()],
            Block::Embed(b) | Block::LinkPreview(b) => vec![b.caption.as_slice()],
            Block::TableRow(b) => b.cells.iter().map(Vec::as_slice).collect(),
            _ => Vec::new(),
        }
    }

    /// Get block type name
    pub fn block_type(&self) -> &str {
        match self {
            Block::Paragraph(_) => "paragraph",
            Block::Heading1(_) => "heading_1",
            Block::Heading2(_) => "heading_2",
            Block::Heading3(_) => "heading_3",
            Block::BulletedListItem(_) => "bulleted_list_item",
            Block::NumberedListItem(_) => "numbered_list_item",
            Block::ToDo(_) => "to_do",
            Block::Toggle(_) => "toggle",
            Block::Quote(_) => "quote",
            Block::Callout(_) => "callout",
            Block::Code(_) => "code",
            Block::Equation(_) => "equation",
            Block::Divider(_) => "divider",
            Block::Breadcrumb(_) => "breadcrumb",
            Block::TableOfContents(_) => "table_of_contents",
            Block::Image(_) => "image",
            Block::Video(_) => "video",
            Block::File(_) => "file",
            Block::Pdf(_) => "pdf",
            Block::Bookmark(_) => "bookmark",
            Block::Embed(_) => "embed",
            Block::LinkPreview(_) => "link_preview",
            Block::ChildPage(_) => "child_page",
            Block::ChildDatabase(_) => "child_database",
            Block::LinkToPage(_) => "link_to_page",
            Block::Table(_) => "table",
            Block::TableRow(_) => "table_row",
            Block::ColumnList(_) => "column_list",
            Block::Column(_) => "column",
            Block::Synced(_) => "synced_block",
            Block::Unsupported(b) => &b.block_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heading(is_toggleable: bool) -> Block {
        Block::Heading2(HeadingBlock {
            is_toggleable,
            ..Default::default()
        })
    }

    #[test]
    fn test_disclosure_blocks() {
        assert!(Block::Toggle(ToggleBlock::default()).opens_disclosure());
        assert!(heading(true).opens_disclosure());
        assert!(!heading(false).opens_disclosure());
        assert!(!Block::Paragraph(TextBlock::default()).opens_disclosure());
    }

    #[test]
    fn test_child_references() {
        assert!(Block::ChildPage(ChildPageBlock::default()).is_child_reference());
        assert!(Block::ChildDatabase(ChildDatabaseBlock::default()).is_child_reference());
        assert!(!Block::Toggle(ToggleBlock::default()).is_child_reference());
    }

    #[test]
    fn test_unsupported_keeps_its_type_name() {
        let block = Block::Unsupported(UnsupportedBlock {
            common: BlockCommon::default(),
            block_type: "ai_block".to_string(),
        });
        assert_eq!(block.block_type(), "ai_block");
    }

    #[test]
    fn test_table_row_runs_cover_every_cell() {
        let row = Block::TableRow(TableRowBlock {
            common: BlockCommon::default(),
            cells: vec![
                vec![RichTextItem::plain_text("a")],
                vec![RichTextItem::plain_text("b")],
            ],
        });
        assert_eq!(row.rich_text_runs().len(), 2);
    }
}
