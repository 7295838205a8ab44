// src/formatting/block_renderer.rs
//! Block rendering: converts one Notion block into a Markdown fragment.
//!
//! Rendering is pure and total. A fragment depends only on the block's own
//! payload; spacing between fragments, separator rows and disclosure closing
//! belong to the [assembler](super::assembler). Unsupported kinds render as
//! the empty string.

use super::embed::{embed_frame, normalize_embed_url};
use super::properties::escape_for_table_cell;
use super::rich_text::{rich_text_to_markdown, rich_text_to_plain};
use crate::constants::{CODE_DEFAULT_LANGUAGE, NOTION_WEB_BASE_URL, PLACEHOLDER_PREFIX};
use crate::model::*;
use crate::types::{DatabaseId, NotionId};

/// Closing tag of a disclosure fragment opened by a toggle or toggleable heading.
pub const DISCLOSURE_CLOSE: &str = "</details>\n";

/// Renders a single block to its Markdown fragment, without trailing spacing.
pub fn render_block(block: &Block) -> String {
    match block {
        Block::Paragraph(b) => render_paragraph(&b.content),
        Block::Heading1(h) => render_heading(1, h),
        Block::Heading2(h) => render_heading(2, h),
        Block::Heading3(h) => render_heading(3, h),
        Block::BulletedListItem(b) => format!("- {}", text_of(&b.content)),
        Block::NumberedListItem(b) => format!("1. {}", text_of(&b.content)),
        Block::Quote(b) => quote_lines(&text_of(&b.content)),
        Block::ToDo(todo) => {
            let checked = if todo.checked { " checked" } else { "" };
            format!(
                "<input type=\"checkbox\" disabled{} /> {}",
                checked,
                text_of(&todo.content)
            )
        }
        Block::Toggle(toggle) => {
            format!("<details>\n<summary>{}</summary>", text_of(&toggle.content))
        }
        Block::Callout(callout) => render_callout(callout),
        Block::Code(code) => render_code(code),
        Block::Equation(eq) => format!("$$\n{}\n$$", eq.expression),
        Block::Divider(_) => "---".to_string(),
        Block::Image(media) => {
            let alt = rich_text_to_plain(&media.caption);
            format!("![{}]({})", alt, media.source.url())
        }
        Block::Video(media) => with_caption(
            embed_frame(&normalize_embed_url(media.source.url())),
            &media.caption,
        ),
        Block::File(media) | Block::Pdf(media) => render_attachment(media),
        Block::Bookmark(bookmark) => {
            let label = rich_text_to_markdown(&bookmark.caption);
            let label = if label.trim().is_empty() {
                bookmark.url.as_str()
            } else {
                label.trim()
            };
            format!("[{}]({})", label, bookmark.url)
        }
        Block::Embed(embed) => with_caption(
            embed_frame(&normalize_embed_url(&embed.url)),
            &embed.caption,
        ),
        Block::LinkPreview(preview) => format!("<{}>", preview.url),
        Block::ChildPage(page) => format!(
            "📄 [{}]({})",
            display_title(&page.title),
            web_url(page.common.id.as_str())
        ),
        Block::ChildDatabase(db) => {
            placeholder_token(&DatabaseId::new(db.common.id.as_str()), &db.title)
        }
        Block::LinkToPage(link) => match &link.target {
            LinkTarget::Page(id) => format!("📄 [Linked page]({})", web_url(id.as_str())),
            LinkTarget::Database(id) => {
                format!("🗄️ [Linked database]({})", web_url(id.as_str()))
            }
        },
        Block::TableRow(row) => render_table_row(row),
        Block::Table(_)
        | Block::ColumnList(_)
        | Block::Column(_)
        | Block::Synced(_)
        | Block::Breadcrumb(_)
        | Block::TableOfContents(_)
        | Block::Unsupported(_) => String::new(),
    }
}

fn text_of(content: &TextBlockContent) -> String {
    rich_text_to_markdown(&content.rich_text)
}

/// A blank line inside the text is a hard paragraph break.
fn render_paragraph(content: &TextBlockContent) -> String {
    text_of(content)
        .split("\n\n")
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn render_heading(level: usize, heading: &HeadingBlock) -> String {
    let text = text_of(&heading.content);
    if heading.is_toggleable {
        format!(
            "<details>\n<summary><h{level}>{text}</h{level}></summary>",
            level = level,
            text = text
        )
    } else {
        format!("{} {}", "#".repeat(level), text)
    }
}

fn quote_lines(text: &str) -> String {
    text.lines()
        .map(|line| format!("> {}", line))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_callout(callout: &CalloutBlock) -> String {
    let text = text_of(&callout.content);
    let body = match &callout.icon {
        Some(Icon::Emoji { emoji }) => format!("{} {}", emoji, text),
        _ => text,
    };
    quote_lines(&body)
}

fn render_code(code: &CodeBlock) -> String {
    let language = match code.language.trim() {
        "" | "plain text" => CODE_DEFAULT_LANGUAGE,
        other => other,
    };
    let source = rich_text_to_plain(&code.content.rich_text);
    with_caption(format!("```{}\n{}\n```", language, source), &code.caption)
}

fn render_attachment(media: &MediaBlock) -> String {
    let caption = rich_text_to_plain(&media.caption);
    let name = media
        .name
        .clone()
        .filter(|n| !n.is_empty())
        .or_else(|| (!caption.is_empty()).then(|| caption.clone()))
        .unwrap_or_else(|| "Attachment".to_string());
    format!("📎 [{}]({})", name, media.source.url())
}

fn with_caption(fragment: String, caption: &[crate::types::RichTextItem]) -> String {
    let caption = rich_text_to_markdown(caption);
    if caption.trim().is_empty() {
        fragment
    } else {
        format!("{}\n*{}*", fragment, caption.trim())
    }
}

/// One `| cell | cell |` line, newline-terminated.
pub fn render_table_row(row: &TableRowBlock) -> String {
    let cells: Vec<String> = row
        .cells
        .iter()
        .map(|cell| escape_for_table_cell(&rich_text_to_markdown(cell)))
        .collect();
    format!("| {} |\n", cells.join(" | "))
}

/// Header separator sized to a row of `cells` columns.
pub fn table_separator(cells: usize) -> String {
    let mut line = String::from("|");
    for _ in 0..cells.max(1) {
        line.push_str(" --- |");
    }
    line.push('\n');
    line
}

/// Deferred inline-table marker: `__PLACEHOLDER__{databaseId}__{title}__`.
///
/// The title is sanitized so it cannot end the token early: underscore runs
/// collapse to one underscore, edge underscores and line breaks are dropped.
pub fn placeholder_token(database_id: &DatabaseId, title: &str) -> String {
    format!(
        "{}{}__{}__",
        PLACEHOLDER_PREFIX,
        database_id.as_str(),
        sanitize_placeholder_title(title)
    )
}

fn sanitize_placeholder_title(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    for c in title.chars() {
        let c = if c == '\n' || c == '\r' { ' ' } else { c };
        if c == '_' && out.ends_with('_') {
            continue;
        }
        out.push(c);
    }
    out.trim_matches('_').to_string()
}

fn display_title(title: &str) -> &str {
    if title.trim().is_empty() {
        "Untitled"
    } else {
        title
    }
}

/// Public web address of a workspace object.
pub fn web_url(id: &str) -> String {
    format!("{}/{}", NOTION_WEB_BASE_URL, id)
}

/// Link-form fragment of a database that is not expanded in place.
pub fn database_link(id: &NotionId, title: &str) -> String {
    format!("🗄️ [{}]({})", display_title(title), web_url(id.as_str()))
}
