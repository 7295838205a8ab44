// src/formatting/properties/mod.rs
//! Property extraction: display strings, date ranges and status values from
//! typed Notion property values.
//!
//! Every function here is total. Unknown or empty values produce the empty
//! string (or an empty range, or `None`), never an error.

mod formatters;
mod render;
mod types;

pub use formatters::format_property_value;
pub use render::{escape_for_table_cell, CHECKMARK};
pub use types::{DateRange, FileLink, FormattedProperty, Renderable, StatusValue};

use crate::model::{PropertyTypeValue, PropertyValue};
use crate::types::{FormulaResult, RollupArrayItem, RollupResult};

/// Display string of a property value.
pub fn extract_value(value: &PropertyValue) -> String {
    format_property_value(value).render_text()
}

/// Like [`extract_value`], for a property that may be missing from a row.
pub fn extract_optional_value(value: Option<&PropertyValue>) -> String {
    value.map(extract_value).unwrap_or_default()
}

/// Raw start/end pair of a date-bearing property.
///
/// Covers native dates, formula dates and rollup dates; anything else yields
/// an empty range.
pub fn extract_date_range(value: &PropertyValue) -> DateRange {
    let date = match &value.type_specific_value {
        PropertyTypeValue::Date { date } => date.as_ref(),
        PropertyTypeValue::Formula {
            formula: FormulaResult::Date(date),
        } => date.as_ref(),
        PropertyTypeValue::Rollup {
            rollup: RollupResult::Date(date),
        } => date.as_ref(),
        PropertyTypeValue::Rollup {
            rollup: RollupResult::Array(items),
        } => items.iter().find_map(|item| match item {
            RollupArrayItem::Date(d) => Some(d),
            _ => None,
        }),
        _ => None,
    };
    date.map(formatters::date_range).unwrap_or_default()
}

/// Name and color token of a status property, when it has a value.
pub fn extract_status(value: &PropertyValue) -> Option<StatusValue> {
    match &value.type_specific_value {
        PropertyTypeValue::Status { status: Some(option) } => Some(StatusValue {
            name: option.name.clone(),
            color: option.color,
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, DateValue, RichTextItem, SelectOption, User};

    fn prop(value: PropertyTypeValue) -> PropertyValue {
        PropertyValue::new("p", value)
    }

    fn date(start: &str, end: Option<&str>) -> DateValue {
        DateValue {
            start: start.into(),
            end: end.map(str::to_string),
            time_zone: None,
        }
    }

    fn option(name: &str, color: Color) -> SelectOption {
        SelectOption {
            id: name.to_lowercase(),
            name: name.into(),
            color,
        }
    }

    #[test]
    fn test_date_range_value() {
        let p = prop(PropertyTypeValue::Date {
            date: Some(date("2024-01-01", Some("2024-01-05"))),
        });
        assert_eq!(extract_value(&p), "2024-01-01 → 2024-01-05");
        assert_eq!(
            extract_date_range(&p),
            DateRange::new("2024-01-01", Some("2024-01-05".into()))
        );
    }

    #[test]
    fn test_multi_select_joins_names() {
        let p = prop(PropertyTypeValue::MultiSelect {
            multi_select: vec![option("Rust", Color::Red), option("Go", Color::Blue)],
        });
        assert_eq!(extract_value(&p), "Rust, Go");
    }

    #[test]
    fn test_checkbox_glyph() {
        assert_eq!(
            extract_value(&prop(PropertyTypeValue::Checkbox { checkbox: true })),
            "✓"
        );
        assert_eq!(
            extract_value(&prop(PropertyTypeValue::Checkbox { checkbox: false })),
            ""
        );
    }

    #[test]
    fn test_unknown_and_missing_are_empty() {
        assert_eq!(
            extract_value(&prop(PropertyTypeValue::Unsupported {
                type_name: "button".into()
            })),
            ""
        );
        assert_eq!(extract_optional_value(None), "");
        assert_eq!(
            extract_value(&prop(PropertyTypeValue::Select { select: None })),
            ""
        );
    }

    #[test]
    fn test_text_people_and_number() {
        assert_eq!(
            extract_value(&prop(PropertyTypeValue::Title {
                title: vec![RichTextItem::plain_text("Launch")]
            })),
            "Launch"
        );
        let people = prop(PropertyTypeValue::People {
            people: vec![User {
                id: "u1".into(),
                name: Some("Ada".into()),
                email: None,
            }],
        });
        assert_eq!(extract_value(&people), "Ada");
        assert_eq!(
            extract_value(&prop(PropertyTypeValue::Number { number: Some(42.0) })),
            "42"
        );
    }

    #[test]
    fn test_date_range_of_non_date_is_empty() {
        let p = prop(PropertyTypeValue::Number { number: Some(1.0) });
        assert!(extract_date_range(&p).is_empty());
    }

    #[test]
    fn test_status_carries_color_token() {
        let p = prop(PropertyTypeValue::Status {
            status: Some(option("In progress", Color::Blue)),
        });
        assert_eq!(
            extract_status(&p),
            Some(StatusValue {
                name: "In progress".into(),
                color: Color::Blue
            })
        );
        assert_eq!(extract_value(&p), "In progress");
        assert_eq!(
            extract_status(&prop(PropertyTypeValue::Status { status: None })),
            None
        );
    }
}
