// src/formatting/presentation.rs
//! Page-level presentation metadata: title, cover, icon, description.
//!
//! Pure projections over pages and databases.

use super::rich_text::rich_text_to_plain;
use crate::model::{Database, FileObject, Icon, NotionObject, Page, PropertyTypeValue};
use serde::{Deserialize, Serialize};

pub const UNTITLED: &str = "Untitled";

/// Icon in one of its three shapes, flattened for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PageIcon {
    Emoji { emoji: String },
    External { url: String },
    File { url: String },
}

impl From<&Icon> for PageIcon {
    fn from(icon: &Icon) -> Self {
        match icon {
            Icon::Emoji { emoji } => PageIcon::Emoji {
                emoji: emoji.clone(),
            },
            Icon::External { external } => PageIcon::External {
                url: external.url.clone(),
            },
            Icon::File { file } => PageIcon::File {
                url: file.url.clone(),
            },
        }
    }
}

/// Title of a page: the property with id `title`, else the first title-typed
/// property, else "Untitled".
pub fn page_title(page: &Page) -> String {
    let title_of = |value: &crate::model::PropertyValue| match &value.type_specific_value {
        PropertyTypeValue::Title { title } => Some(rich_text_to_plain(title)),
        _ => None,
    };

    page.properties
        .values()
        .find(|v| v.id == "title")
        .and_then(title_of)
        .or_else(|| page.properties.values().find_map(title_of))
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| UNTITLED.to_string())
}

pub fn database_title(database: &Database) -> String {
    let title = rich_text_to_plain(&database.title);
    if title.trim().is_empty() {
        UNTITLED.to_string()
    } else {
        title
    }
}

pub fn cover_url(cover: Option<&FileObject>) -> Option<String> {
    cover.map(|c| c.url().to_string()).filter(|u| !u.is_empty())
}

pub fn icon(icon: Option<&Icon>) -> Option<PageIcon> {
    icon.map(PageIcon::from)
}

/// A database's free-text description; `None` when it has none.
pub fn description(database: &Database) -> Option<String> {
    let text = rich_text_to_plain(&database.description);
    (!text.trim().is_empty()).then_some(text)
}

pub fn object_title(object: &NotionObject) -> String {
    match object {
        NotionObject::Page(page) => page_title(page),
        NotionObject::Database(database) => database_title(database),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ExternalFile, NotionFile, PropertyValue};
    use crate::types::{DatabaseId, PageId, RichTextItem};

    fn title_value(id: &str, text: &str) -> PropertyValue {
        PropertyValue::new(
            id,
            PropertyTypeValue::Title {
                title: vec![RichTextItem::plain_text(text)],
            },
        )
    }

    #[test]
    fn test_page_title_prefers_title_id() {
        let page = Page::new(PageId::new("p"))
            .with_property("Alias", title_value("xyz", "Other"))
            .with_property("Name", title_value("title", "Roadmap"));
        assert_eq!(page_title(&page), "Roadmap");
    }

    #[test]
    fn test_page_title_falls_back() {
        assert_eq!(page_title(&Page::new(PageId::new("p"))), "Untitled");
        let page = Page::new(PageId::new("p")).with_property("Name", title_value("abc", "Only"));
        assert_eq!(page_title(&page), "Only");
    }

    #[test]
    fn test_icon_shapes() {
        let emoji = Icon::Emoji {
            emoji: "🚀".into(),
        };
        assert_eq!(
            icon(Some(&emoji)),
            Some(PageIcon::Emoji {
                emoji: "🚀".into()
            })
        );
        let uploaded = Icon::File {
            file: NotionFile {
                url: "https://s3/icon.png".into(),
                expiry_time: None,
            },
        };
        assert_eq!(
            icon(Some(&uploaded)),
            Some(PageIcon::File {
                url: "https://s3/icon.png".into()
            })
        );
        assert_eq!(icon(None), None);
    }

    #[test]
    fn test_cover_and_description() {
        let cover = FileObject::External {
            external: ExternalFile {
                url: "https://img/cover.jpg".into(),
            },
        };
        assert_eq!(
            cover_url(Some(&cover)).as_deref(),
            Some("https://img/cover.jpg")
        );

        let mut db = Database::new(DatabaseId::new("d"), "Tasks");
        assert_eq!(description(&db), None);
        db.description = vec![
            RichTextItem::plain_text("Team "),
            RichTextItem::plain_text("backlog"),
        ];
        assert_eq!(description(&db).as_deref(), Some("Team backlog"));
        assert_eq!(database_title(&db), "Tasks");
    }
}
