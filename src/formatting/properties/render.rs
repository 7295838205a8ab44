// src/formatting/properties/render.rs
//! Rendering of formatted properties to display text.

use super::types::*;

/// Glyph shown for a ticked checkbox; an unticked one renders empty.
pub const CHECKMARK: &str = "✓";

impl Renderable for FormattedProperty {
    fn render_text(&self) -> String {
        match self {
            FormattedProperty::Text(s)
            | FormattedProperty::Select(s)
            | FormattedProperty::Url(s)
            | FormattedProperty::Email(s)
            | FormattedProperty::Phone(s)
            | FormattedProperty::UniqueId(s) => s.clone(),
            FormattedProperty::Number(n) => format_number_auto(*n),
            FormattedProperty::Boolean(b) => if *b { CHECKMARK } else { "" }.to_string(),
            FormattedProperty::Date(d) => d.to_string(),
            FormattedProperty::Status(s) => s.name.clone(),
            FormattedProperty::MultiSelect(items)
            | FormattedProperty::People(items)
            | FormattedProperty::Relation(items) => items.join(", "),
            FormattedProperty::Files(files) => files
                .iter()
                .map(|f| f.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            FormattedProperty::List(items) => items
                .iter()
                .map(Renderable::render_text)
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(", "),
            FormattedProperty::Empty => String::new(),
        }
    }
}

/// Formats a number with automatic precision.
fn format_number_auto(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{:.0}", n)
    } else {
        format!("{:.2}", n)
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    }
}

/// Escapes text for use in a Markdown table cell.
pub fn escape_for_table_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', "<br>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_precision() {
        assert_eq!(format_number_auto(3.0), "3");
        assert_eq!(format_number_auto(2.5), "2.5");
        assert_eq!(format_number_auto(1.239), "1.24");
    }

    #[test]
    fn test_list_skips_empty_items() {
        let list = FormattedProperty::List(vec![
            FormattedProperty::Text("a".into()),
            FormattedProperty::Empty,
            FormattedProperty::Number(2.0),
        ]);
        assert_eq!(list.render_text(), "a, 2");
    }
}
