// src/types/properties.rs
//! Value types shared by rich text and property values.

use super::{Color, NotionId};
use std::fmt;

/// The content variant of a rich text item.
///
/// Each variant carries its specific data, so a mention always has a target
/// and an equation always has an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum RichTextType {
    Text { content: String, link: Option<Link> },
    Mention(MentionType),
    Equation { expression: String },
}

/// Rich text item with formatting annotations.
///
/// `plain_text` is the fallback rendering for any variant; concatenating the
/// `plain_text` of a run of items yields the raw text of a block.
#[derive(Debug, Clone, PartialEq)]
pub struct RichTextItem {
    pub text_type: RichTextType,
    pub annotations: Annotations,
    pub plain_text: String,
    pub href: Option<String>,
}

impl RichTextItem {
    /// Create a plain text item, the most common rich text variant.
    pub fn plain_text(text: &str) -> Self {
        Self {
            text_type: RichTextType::Text {
                content: text.to_string(),
                link: None,
            },
            annotations: Annotations::default(),
            plain_text: text.to_string(),
            href: None,
        }
    }

    /// Create a text item that links somewhere.
    pub fn link(text: &str, url: &str) -> Self {
        Self {
            text_type: RichTextType::Text {
                content: text.to_string(),
                link: Some(Link {
                    url: url.to_string(),
                }),
            },
            annotations: Annotations::default(),
            plain_text: text.to_string(),
            href: Some(url.to_string()),
        }
    }

    /// Create a mention item.
    pub fn mention(mention: MentionType, plain_text: &str) -> Self {
        Self {
            text_type: RichTextType::Mention(mention),
            annotations: Annotations::default(),
            plain_text: plain_text.to_string(),
            href: None,
        }
    }

    /// The id of the page or database this item points at, if any.
    ///
    /// Covers explicit mentions as well as plain links whose href embeds a
    /// Notion id (absolute URLs and workspace-relative paths).
    pub fn mention_target(&self) -> Option<MentionTarget> {
        match &self.text_type {
            RichTextType::Mention(MentionType::Page { id }) => Some(MentionTarget::Page(id.clone())),
            RichTextType::Mention(MentionType::Database { id }) => {
                Some(MentionTarget::Database(id.clone()))
            }
            _ => {
                let href = self.href.as_deref().or(match &self.text_type {
                    RichTextType::Text {
                        link: Some(link), ..
                    } => Some(link.url.as_str()),
                    _ => None,
                })?;
                is_workspace_link(href)
                    .then(|| NotionId::find_in_link(href))
                    .flatten()
                    .map(MentionTarget::Page)
            }
        }
    }
}

/// What a rich text item refers to inside the workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MentionTarget {
    Page(NotionId),
    Database(NotionId),
}

fn is_workspace_link(href: &str) -> bool {
    href.starts_with('/') || href.contains("notion.so") || href.contains("notion.site")
}

#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Annotations {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub code: bool,
    pub color: Color,
}

/// Different types of mentions in rich text
#[derive(Debug, Clone, PartialEq)]
pub enum MentionType {
    User { user: PartialUser },
    Page { id: NotionId },
    Database { id: NotionId },
    Date { date: DateValue },
    LinkPreview { url: String },
    LinkMention { url: String },
    Unknown,
}

/// Select, multi-select and status option
#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption {
    pub id: String,
    pub name: String,
    pub color: Color,
}

/// Date value as Notion sends it: ISO-8601 date or datetime strings.
#[derive(Debug, Clone, PartialEq)]
pub struct DateValue {
    pub start: String,
    pub end: Option<String>,
    pub time_zone: Option<String>,
}

impl fmt::Display for DateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.end {
            Some(end) => write!(f, "{} → {}", self.start, end),
            None => write!(f, "{}", self.start),
        }
    }
}

/// Formula result types
#[derive(Debug, Clone, PartialEq)]
pub enum FormulaResult {
    String(Option<String>),
    Number(Option<f64>),
    Boolean(Option<bool>),
    Date(Option<DateValue>),
}

/// Rollup result types
#[derive(Debug, Clone, PartialEq)]
pub enum RollupResult {
    Number(Option<f64>),
    Date(Option<DateValue>),
    Array(Vec<RollupArrayItem>),
    Unsupported,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RollupArrayItem {
    Title(Vec<RichTextItem>),
    Number(f64),
    Date(DateValue),
    /// Catch-all for property types without a dedicated variant
    Text(String),
}

/// User representation
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.name, &self.email) {
            (Some(name), _) => write!(f, "{}", name),
            (None, Some(email)) => write!(f, "{}", email),
            (None, None) => write!(f, "User {}", self.id),
        }
    }
}

/// Partial user representation (used in mentions)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialUser {
    pub id: String,
    pub name: Option<String>,
}

impl fmt::Display for PartialUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "User {}", self.id),
        }
    }
}

/// File attached to a files property
#[derive(Debug, Clone, PartialEq)]
pub struct File {
    pub name: String,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "550e8400e29b41d4a716446655440000";

    #[test]
    fn test_date_value_display() {
        let single = DateValue {
            start: "2024-01-01".into(),
            end: None,
            time_zone: None,
        };
        assert_eq!(single.to_string(), "2024-01-01");

        let range = DateValue {
            end: Some("2024-01-05".into()),
            ..single
        };
        assert_eq!(range.to_string(), "2024-01-01 → 2024-01-05");
    }

    #[test]
    fn test_mention_target_from_explicit_mention() {
        let id = NotionId::parse(ID).unwrap();
        let item = RichTextItem::mention(MentionType::Database { id: id.clone() }, "Tasks");
        assert_eq!(item.mention_target(), Some(MentionTarget::Database(id)));
    }

    #[test]
    fn test_mention_target_from_workspace_links() {
        let relative = RichTextItem::link("Roadmap", &format!("/{}", ID));
        assert!(matches!(
            relative.mention_target(),
            Some(MentionTarget::Page(id)) if id.as_str() == ID
        ));

        let absolute =
            RichTextItem::link("Roadmap", &format!("https://www.notion.so/Roadmap-{}", ID));
        assert!(absolute.mention_target().is_some());

        let external = RichTextItem::link("Docs", &format!("https://example.com/{}", ID));
        assert_eq!(external.mention_target(), None);
    }
}
