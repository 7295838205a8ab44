// src/formatting/assembler.rs
//! Document assembly: depth-first walk over a block list that concatenates
//! rendered fragments, fetching children on demand.
//!
//! Two pieces of state span the walk. The table state tracks the parent of
//! the table whose rows are being written, so the separator row follows the
//! first row of each table and only that row. Disclosure regions need no
//! stack: a region is closed right after its own fragment when the block has
//! no children, otherwise right after its assembled children.

use super::block_renderer::{render_block, render_table_row, table_separator, DISCLOSURE_CLOSE};
use crate::api::NotionRepository;
use crate::constants::{BLOCK_MAX_RENDER_DEPTH, CHARS_PER_BLOCK_ESTIMATE};
use crate::error::AppError;
use crate::model::Block;
use crate::types::{BlockId, NotionId};
use futures::future::{BoxFuture, FutureExt};

/// Supplier of child blocks during assembly.
#[async_trait::async_trait]
pub trait ChildSource: Send + Sync {
    /// The complete, ordered children of a block.
    async fn fetch_children(&self, block_id: &BlockId) -> Result<Vec<Block>, AppError>;
}

#[async_trait::async_trait]
impl<R: NotionRepository + ?Sized> ChildSource for R {
    async fn fetch_children(&self, block_id: &BlockId) -> Result<Vec<Block>, AppError> {
        self.retrieve_children(&NotionId::from(block_id)).await
    }
}

/// Assembles blocks into one Markdown document.
///
/// Child fetch failures are logged and skipped; the parent's own fragment is
/// kept, so a failing subtree yields a partial document instead of an error.
pub async fn assemble<S>(blocks: &[Block], source: &S) -> String
where
    S: ChildSource + ?Sized,
{
    let mut assembly = Assembly {
        source,
        out: String::with_capacity(blocks.len() * CHARS_PER_BLOCK_ESTIMATE),
        table: TableState::Outside,
    };
    assembly.walk(blocks, 0).await;
    assembly.finish()
}

#[derive(Debug, Clone, PartialEq)]
enum TableState {
    Outside,
    /// Writing rows whose parent is the given block (or unknown).
    Inside(Option<BlockId>),
}

struct Assembly<'s, S: ?Sized> {
    source: &'s S,
    out: String,
    table: TableState,
}

impl<'s, S: ChildSource + ?Sized> Assembly<'s, S> {
    fn walk<'a>(&'a mut self, blocks: &'a [Block], depth: usize) -> BoxFuture<'a, ()>
    where
        's: 'a,
    {
        async move {
            for block in blocks {
                if let Block::TableRow(row) = block {
                    let parent = block.parent_id().cloned();
                    let first_row = match &self.table {
                        TableState::Outside => true,
                        TableState::Inside(current) => *current != parent,
                    };
                    self.out.push_str(&render_table_row(row));
                    if first_row {
                        self.out.push_str(&table_separator(row.cells.len()));
                        self.table = TableState::Inside(parent);
                    }
                    continue;
                }

                self.leave_table();
                self.write_block(block);

                let expand = block.has_children() && !block.is_child_reference();
                if expand {
                    self.expand_children(block, depth).await;
                }
                if block.opens_disclosure() {
                    self.leave_table();
                    self.out.push_str(DISCLOSURE_CLOSE);
                }
            }
        }
        .boxed()
    }

    fn write_block(&mut self, block: &Block) {
        match block {
            Block::Unsupported(u) => {
                log::debug!("Skipping unsupported block type '{}' ({})", u.block_type, u.common.id)
            }
            Block::Breadcrumb(_) | Block::TableOfContents(_) => {
                log::debug!("No Markdown form for {} block {}", block.block_type(), block.id())
            }
            _ => {}
        }
        self.out.push_str(&render_block(block));
        self.out.push_str("\n\n");
    }

    async fn expand_children(&mut self, block: &Block, depth: usize) {
        if depth + 1 >= BLOCK_MAX_RENDER_DEPTH {
            log::warn!(
                "Not expanding children of {} block {}: nesting deeper than {}",
                block.block_type(),
                block.id(),
                BLOCK_MAX_RENDER_DEPTH
            );
            return;
        }

        // A synced copy shows the original block's children.
        let source_id = match block {
            Block::Synced(synced) => synced.synced_from.as_ref().unwrap_or(block.id()),
            _ => block.id(),
        };

        match self.source.fetch_children(source_id).await {
            Ok(children) => self.walk(&children, depth + 1).await,
            Err(e) => log::warn!(
                "Failed to fetch children of {} block {}: {}",
                block.block_type(),
                block.id(),
                e
            ),
        }
    }

    /// A blank line ends a table before any other content.
    fn leave_table(&mut self) {
        if self.table != TableState::Outside {
            self.out.push('\n');
            self.table = TableState::Outside;
        }
    }

    fn finish(mut self) -> String {
        self.leave_table();
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::*;
    use crate::types::RichTextItem;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MapSource {
        children: HashMap<BlockId, Vec<Block>>,
    }

    #[async_trait::async_trait]
    impl ChildSource for MapSource {
        async fn fetch_children(&self, block_id: &BlockId) -> Result<Vec<Block>, AppError> {
            self.children
                .get(block_id)
                .cloned()
                .ok_or_else(|| AppError::MalformedResponse(format!("no children for {}", block_id)))
        }
    }

    fn paragraph(id: &str, text: &str) -> Block {
        Block::Paragraph(TextBlock {
            common: BlockCommon::new(BlockId::new(id)),
            content: TextBlockContent::new(vec![RichTextItem::plain_text(text)]),
        })
    }

    fn toggle(id: &str, text: &str, has_children: bool) -> Block {
        Block::Toggle(ToggleBlock {
            common: BlockCommon::new(BlockId::new(id)).with_children(has_children),
            content: TextBlockContent::new(vec![RichTextItem::plain_text(text)]),
        })
    }

    fn row(id: &str, parent: &str, cells: &[&str]) -> Block {
        Block::TableRow(TableRowBlock {
            common: BlockCommon::new(BlockId::new(id)).with_parent(BlockId::new(parent)),
            cells: cells
                .iter()
                .map(|c| vec![RichTextItem::plain_text(c)])
                .collect(),
        })
    }

    #[tokio::test]
    async fn test_single_paragraph() {
        let out = assemble(&[paragraph("p", "Hello")], &MapSource::default()).await;
        assert_eq!(out, "Hello\n\n");
    }

    #[tokio::test]
    async fn test_toggle_without_children_closes_immediately() {
        let out = assemble(&[toggle("t", "More", false)], &MapSource::default()).await;
        assert_eq!(out, "<details>\n<summary>More</summary>\n\n</details>\n");
    }

    #[tokio::test]
    async fn test_toggleable_heading_without_children() {
        let heading = Block::Heading1(HeadingBlock {
            common: BlockCommon::new(BlockId::new("h")),
            content: TextBlockContent::new(vec![RichTextItem::plain_text("FAQ")]),
            is_toggleable: true,
        });
        let out = assemble(&[heading], &MapSource::default()).await;
        assert_eq!(out, "<details>\n<summary><h1>FAQ</h1></summary>\n\n</details>\n");
    }

    #[tokio::test]
    async fn test_toggle_closes_after_children() {
        let mut source = MapSource::default();
        source
            .children
            .insert(BlockId::new("t"), vec![paragraph("c", "Inside")]);
        let out = assemble(&[toggle("t", "More", true)], &source).await;
        assert_eq!(
            out,
            "<details>\n<summary>More</summary>\n\nInside\n\n</details>\n"
        );
    }

    #[tokio::test]
    async fn test_failed_child_fetch_keeps_parent_and_balances_disclosure() {
        let out = assemble(&[toggle("t", "Broken", true)], &MapSource::default()).await;
        assert_eq!(out, "<details>\n<summary>Broken</summary>\n\n</details>\n");
    }

    #[tokio::test]
    async fn test_intervening_block_restarts_table() {
        let blocks = vec![
            row("r1", "T1", &["a", "b"]),
            row("r2", "T1", &["c", "d"]),
            paragraph("p", "between"),
            row("r3", "T1", &["e", "f"]),
            row("r4", "T1", &["g", "h"]),
        ];
        let out = assemble(&blocks, &MapSource::default()).await;
        assert_eq!(
            out,
            "| a | b |\n| --- | --- |\n| c | d |\n\nbetween\n\n| e | f |\n| --- | --- |\n| g | h |\n\n"
        );
        assert_eq!(out.matches("| --- | --- |").count(), 2);
    }

    #[tokio::test]
    async fn test_table_block_expands_rows() {
        let table = Block::Table(TableBlock {
            common: BlockCommon::new(BlockId::new("T1")).with_children(true),
            table_width: 1,
            has_column_header: true,
            has_row_header: false,
        });
        let mut source = MapSource::default();
        source.children.insert(
            BlockId::new("T1"),
            vec![row("r1", "T1", &["x"]), row("r2", "T1", &["y"])],
        );
        let out = assemble(&[table, paragraph("p", "after")], &source).await;
        assert_eq!(out, "\n\n| x |\n| --- |\n| y |\n\nafter\n\n");
    }

    #[tokio::test]
    async fn test_child_page_is_not_expanded() {
        let page = Block::ChildPage(ChildPageBlock {
            common: BlockCommon::new(BlockId::new("cp")).with_children(true),
            title: "Sub".into(),
        });
        let mut source = MapSource::default();
        source
            .children
            .insert(BlockId::new("cp"), vec![paragraph("x", "hidden")]);
        let out = assemble(&[page], &source).await;
        assert!(!out.contains("hidden"));
        assert!(out.starts_with("📄 [Sub]"));
    }

    #[tokio::test]
    async fn test_synced_copy_uses_original_children() {
        let synced = Block::Synced(SyncedBlock {
            common: BlockCommon::new(BlockId::new("copy")).with_children(true),
            synced_from: Some(BlockId::new("orig")),
        });
        let mut source = MapSource::default();
        source
            .children
            .insert(BlockId::new("orig"), vec![paragraph("x", "shared")]);
        let out = assemble(&[synced], &source).await;
        assert_eq!(out, "\n\nshared\n\n");
    }
}
