// src/formatting/rich_text/mod.rs
//! Formatting of rich text runs into Markdown or plain text.

mod annotations;

pub use annotations::TextStyle;

use crate::constants::NOTION_WEB_BASE_URL;
use crate::types::{MentionType, RichTextItem, RichTextType};
use annotations::{annotations_to_style, MarkdownStyleRenderer};

/// Concatenated `plain_text` of a run: the raw text of a block.
pub fn rich_text_to_plain(items: &[RichTextItem]) -> String {
    items.iter().map(|item| item.plain_text.as_str()).collect()
}

/// Formats a run of rich text items into Markdown.
pub fn rich_text_to_markdown(items: &[RichTextItem]) -> String {
    items.iter().map(format_single_item).collect()
}

fn format_single_item(item: &RichTextItem) -> String {
    let mut style = annotations_to_style(&item.annotations);

    match &item.text_type {
        RichTextType::Equation { expression } => format!("${}$", expression),

        RichTextType::Mention(mention) => {
            let base = render_mention(mention, &item.plain_text);
            // Mentions that already render as links keep only non-link styling
            if style.has_styling() {
                MarkdownStyleRenderer::apply_styles(&base, &style)
            } else {
                base
            }
        }

        RichTextType::Text { content, link } => {
            style.link = link
                .as_ref()
                .map(|l| l.url.as_str())
                .or(item.href.as_deref())
                .map(absolute_link);
            MarkdownStyleRenderer::apply_styles(content, &style)
        }
    }
}

fn render_mention(mention: &MentionType, plain_text: &str) -> String {
    match mention {
        MentionType::User { user } => format!("@{}", user),
        MentionType::Page { id } | MentionType::Database { id } => {
            let title = if plain_text.is_empty() {
                "Untitled"
            } else {
                plain_text
            };
            format!("[{}]({}/{})", title, NOTION_WEB_BASE_URL, id.as_str())
        }
        MentionType::Date { date } => date.to_string(),
        MentionType::LinkPreview { url } | MentionType::LinkMention { url } => {
            if plain_text.is_empty() || plain_text == url {
                format!("<{}>", url)
            } else {
                format!("[{}]({})", plain_text, url)
            }
        }
        MentionType::Unknown => plain_text.to_string(),
    }
}

/// Workspace-relative links (`/Title-<id>`) are made absolute.
fn absolute_link(url: &str) -> String {
    if url.starts_with('/') {
        format!("{}{}", NOTION_WEB_BASE_URL, url)
    } else {
        url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Annotations, DateValue, NotionId, PartialUser};

    #[test]
    fn test_plain_text_formatting() {
        let items = vec![RichTextItem::plain_text("Hello World")];
        assert_eq!(rich_text_to_markdown(&items), "Hello World");
    }

    #[test]
    fn test_bold_italic_formatting() {
        let items = vec![RichTextItem {
            annotations: Annotations {
                bold: true,
                italic: true,
                ..Default::default()
            },
            ..RichTextItem::plain_text("Bold Italic")
        }];
        assert_eq!(rich_text_to_markdown(&items), "***Bold Italic***");
    }

    #[test]
    fn test_equation_formatting() {
        let items = vec![RichTextItem {
            text_type: RichTextType::Equation {
                expression: "E = mc^2".to_string(),
            },
            ..RichTextItem::plain_text("E = mc^2")
        }];
        assert_eq!(rich_text_to_markdown(&items), "$E = mc^2$");
    }

    #[test]
    fn test_relative_link_made_absolute() {
        let items = vec![RichTextItem::link(
            "Spec",
            "/Spec-550e8400e29b41d4a716446655440000",
        )];
        assert_eq!(
            rich_text_to_markdown(&items),
            "[Spec](https://www.notion.so/Spec-550e8400e29b41d4a716446655440000)"
        );
    }

    #[test]
    fn test_mentions() {
        let page_id = NotionId::parse("550e8400e29b41d4a716446655440000").unwrap();
        let items = vec![
            RichTextItem::mention(
                MentionType::User {
                    user: PartialUser {
                        id: "u1".into(),
                        name: Some("Ada".into()),
                    },
                },
                "@Ada",
            ),
            RichTextItem::plain_text(" see "),
            RichTextItem::mention(MentionType::Page { id: page_id }, "Roadmap"),
            RichTextItem::plain_text(" by "),
            RichTextItem::mention(
                MentionType::Date {
                    date: DateValue {
                        start: "2024-01-01".into(),
                        end: Some("2024-01-05".into()),
                        time_zone: None,
                    },
                },
                "",
            ),
        ];
        assert_eq!(
            rich_text_to_markdown(&items),
            "@Ada see [Roadmap](https://www.notion.so/550e8400e29b41d4a716446655440000) by 2024-01-01 → 2024-01-05"
        );
    }

    #[test]
    fn test_plain_concatenation() {
        let items = vec![
            RichTextItem::plain_text("Hel"),
            RichTextItem::link("lo", "https://example.com"),
        ];
        assert_eq!(rich_text_to_plain(&items), "Hello");
    }
}
