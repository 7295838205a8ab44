// src/formatting/rich_text/annotations.rs
//! Annotation processing for rich text.

use crate::types::Annotations;

/// Markdown-relevant styling of one text segment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextStyle {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub code: bool,
    pub link: Option<String>,
}

impl TextStyle {
    pub fn has_styling(&self) -> bool {
        self.bold || self.italic || self.strikethrough || self.underline || self.code
    }
}

/// Converts model annotations to text style. Colors have no Markdown form
/// and are dropped.
pub fn annotations_to_style(annotations: &Annotations) -> TextStyle {
    TextStyle {
        bold: annotations.bold,
        italic: annotations.italic,
        strikethrough: annotations.strikethrough,
        underline: annotations.underline,
        code: annotations.code,
        link: None,
    }
}

/// Renderer for text styles to Markdown.
pub struct MarkdownStyleRenderer;

impl MarkdownStyleRenderer {
    /// Applies styles to text content for Markdown output.
    ///
    /// Surrounding whitespace stays outside the markers: `** bold**` is not
    /// bold in Markdown.
    pub fn apply_styles(content: &str, style: &TextStyle) -> String {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return content.to_string();
        }
        let leading = &content[..content.len() - content.trim_start().len()];
        let trailing = &content[content.trim_end().len()..];

        let mut result = trimmed.to_string();

        // Code first: other markers are literal inside backticks
        if style.code {
            result = format!("`{}`", result);
        }
        if style.strikethrough {
            result = format!("~~{}~~", result);
        }
        if style.bold {
            result = format!("**{}**", result);
        }
        if style.italic {
            result = format!("*{}*", result);
        }
        if style.underline {
            result = format!("<u>{}</u>", result);
        }
        if let Some(url) = &style.link {
            result = format!("[{}]({})", result, url);
        }

        format!("{}{}{}", leading, result, trailing)
    }
}
