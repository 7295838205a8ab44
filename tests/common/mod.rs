// tests/common/mod.rs
//! In-memory workspace shared by the integration tests.
#![allow(dead_code)]

use notion_docview::error::NotionErrorCode;
use notion_docview::model::*;
use notion_docview::types::{BlockId, DatabaseId, NotionId, PageId, RichTextItem};
use notion_docview::{AppError, NotionRepository};
use parking_lot::Mutex;
use std::collections::HashMap;

/// A 32-hex id made from a small number, e.g. `hex(1)`.
pub fn hex(n: u32) -> String {
    format!("{:032x}", n)
}

pub fn id(n: u32) -> NotionId {
    NotionId::parse(&hex(n)).expect("hex ids are valid")
}

pub fn not_found(id: &NotionId) -> AppError {
    AppError::NotionService {
        code: NotionErrorCode::ObjectNotFound,
        message: format!("Could not find object with ID: {}", id),
        status: 404,
    }
}

pub fn title_property(text: &str) -> PropertyValue {
    PropertyValue::new(
        "title",
        PropertyTypeValue::Title {
            title: vec![RichTextItem::plain_text(text)],
        },
    )
}

pub fn page(n: u32, title: &str, parent: Parent) -> Page {
    let mut page = Page::new(PageId::new(hex(n))).with_property("Name", title_property(title));
    page.parent = Some(parent);
    page
}

pub fn database(n: u32, title: &str, parent: Parent, inline: bool) -> Database {
    let mut database = Database::new(DatabaseId::new(hex(n)), title)
        .with_column("Name", PropertyKind::Title);
    database.parent = Some(parent);
    database.is_inline = inline;
    database
}

pub fn under_page(n: u32) -> Parent {
    Parent::Page(PageId::new(hex(n)))
}

pub fn under_database(n: u32) -> Parent {
    Parent::Database(DatabaseId::new(hex(n)))
}

pub fn paragraph(text: &str) -> Block {
    Block::Paragraph(TextBlock {
        common: BlockCommon::default(),
        content: TextBlockContent::new(vec![RichTextItem::plain_text(text)]),
    })
}

pub fn child_page(n: u32, title: &str, parent: u32) -> Block {
    Block::ChildPage(ChildPageBlock {
        common: BlockCommon::new(BlockId::new(hex(n))).with_parent(BlockId::new(hex(parent))),
        title: title.to_string(),
    })
}

pub fn child_database(n: u32, title: &str, parent: u32) -> Block {
    Block::ChildDatabase(ChildDatabaseBlock {
        common: BlockCommon::new(BlockId::new(hex(n))).with_parent(BlockId::new(hex(parent))),
        title: title.to_string(),
    })
}

pub fn row(n: u32, name: &str, database: u32) -> Page {
    page(n, name, under_database(database))
}

/// Counts origin calls per method so tests can tell cache hits from fetches.
#[derive(Default)]
pub struct FixtureRepository {
    pages: Mutex<HashMap<NotionId, Page>>,
    databases: Mutex<HashMap<NotionId, Database>>,
    blocks: Mutex<HashMap<NotionId, Block>>,
    children: Mutex<HashMap<NotionId, Vec<Block>>>,
    rows: Mutex<HashMap<NotionId, Vec<Page>>>,
    calls: Mutex<HashMap<&'static str, usize>>,
    unconfigured: bool,
}

impl FixtureRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails as if no API key was set.
    pub fn unconfigured() -> Self {
        Self {
            unconfigured: true,
            ..Self::default()
        }
    }

    pub fn add_page(&self, page: Page) {
        self.pages.lock().insert(NotionId::from(&page.id), page);
    }

    pub fn add_database(&self, database: Database) {
        self.databases
            .lock()
            .insert(NotionId::from(&database.id), database);
    }

    pub fn add_block(&self, block: Block) {
        self.blocks.lock().insert(NotionId::from(block.id()), block);
    }

    pub fn set_children(&self, parent: u32, blocks: Vec<Block>) {
        self.children.lock().insert(id(parent), blocks);
    }

    pub fn set_rows(&self, database: u32, rows: Vec<Page>) {
        self.rows.lock().insert(id(database), rows);
    }

    pub fn remove_rows(&self, database: u32) {
        self.rows.lock().remove(&id(database));
    }

    pub fn calls(&self, method: &str) -> usize {
        self.calls.lock().get(method).copied().unwrap_or(0)
    }

    fn record(&self, method: &'static str) -> Result<(), AppError> {
        *self.calls.lock().entry(method).or_insert(0) += 1;
        if self.unconfigured {
            return Err(AppError::NotConfigured("NOTION_API_KEY is not set".into()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl NotionRepository for FixtureRepository {
    async fn retrieve_page(&self, id: &NotionId) -> Result<Page, AppError> {
        self.record("retrieve_page")?;
        self.pages.lock().get(id).cloned().ok_or_else(|| not_found(id))
    }

    async fn retrieve_database(&self, id: &NotionId) -> Result<Database, AppError> {
        self.record("retrieve_database")?;
        self.databases
            .lock()
            .get(id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    async fn retrieve_block(&self, id: &NotionId) -> Result<Block, AppError> {
        self.record("retrieve_block")?;
        self.blocks.lock().get(id).cloned().ok_or_else(|| not_found(id))
    }

    async fn retrieve_children(&self, parent: &NotionId) -> Result<Vec<Block>, AppError> {
        self.record("retrieve_children")?;
        Ok(self.children.lock().get(parent).cloned().unwrap_or_default())
    }

    async fn query_rows(&self, database: &NotionId) -> Result<Vec<Page>, AppError> {
        self.record("query_rows")?;
        self.rows
            .lock()
            .get(database)
            .cloned()
            .ok_or_else(|| not_found(database))
    }
}
