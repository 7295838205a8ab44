// src/formatting/properties/formatters.rs
//! Type-specific formatting of Notion property values, dispatched on the
//! declared type tag.

use super::types::*;
use crate::formatting::rich_text::rich_text_to_plain;
use crate::model::{PropertyTypeValue, PropertyValue};
use crate::types::{
    DateValue, File, FormulaResult, RichTextItem, RollupArrayItem, RollupResult, SelectOption,
};

/// Formats a property value into a structured representation.
pub fn format_property_value(value: &PropertyValue) -> FormattedProperty {
    use PropertyTypeValue::*;

    log::trace!("Formatting property {} of type {}", value.id, value.kind());

    match &value.type_specific_value {
        Title { title } => format_text(title),
        RichText { rich_text } => format_text(rich_text),
        Number { number } => number.map_or(FormattedProperty::Empty, FormattedProperty::Number),
        Select { select } => format_option(select.as_ref(), FormattedProperty::Select),
        MultiSelect { multi_select } => format_multi_select(multi_select),
        Status { status } => match status {
            Some(opt) => FormattedProperty::Status(StatusValue {
                name: opt.name.clone(),
                color: opt.color,
            }),
            None => FormattedProperty::Empty,
        },
        Date { date } => format_date(date.as_ref()),
        People { people } => format_list(people.iter().map(|u| u.to_string()).collect())
            .map_or(FormattedProperty::Empty, FormattedProperty::People),
        Files { files } => format_files(files),
        Checkbox { checkbox } => FormattedProperty::Boolean(*checkbox),
        Url { url } => format_string(url.as_deref(), FormattedProperty::Url),
        Email { email } => format_string(email.as_deref(), FormattedProperty::Email),
        PhoneNumber { phone_number } => {
            format_string(phone_number.as_deref(), FormattedProperty::Phone)
        }
        Formula { formula } => format_formula(formula),
        Relation { relation } => format_list(relation.iter().map(|id| id.to_string()).collect())
            .map_or(FormattedProperty::Empty, FormattedProperty::Relation),
        Rollup { rollup } => format_rollup(rollup),
        CreatedTime { created_time } => FormattedProperty::Text(created_time.clone()),
        LastEditedTime { last_edited_time } => FormattedProperty::Text(last_edited_time.clone()),
        CreatedBy { created_by } => FormattedProperty::Text(created_by.to_string()),
        LastEditedBy { last_edited_by } => FormattedProperty::Text(last_edited_by.to_string()),
        UniqueId { prefix, number } => match (prefix, number) {
            (Some(prefix), Some(n)) => FormattedProperty::UniqueId(format!("{}-{}", prefix, n)),
            (None, Some(n)) => FormattedProperty::UniqueId(n.to_string()),
            _ => FormattedProperty::Empty,
        },
        Unsupported { type_name } => {
            log::debug!("No formatter for property type '{}'", type_name);
            FormattedProperty::Empty
        }
    }
}

fn format_text(items: &[RichTextItem]) -> FormattedProperty {
    let text = rich_text_to_plain(items);
    if text.is_empty() {
        FormattedProperty::Empty
    } else {
        FormattedProperty::Text(text)
    }
}

fn format_option(
    option: Option<&SelectOption>,
    wrap: fn(String) -> FormattedProperty,
) -> FormattedProperty {
    option.map_or(FormattedProperty::Empty, |opt| wrap(opt.name.clone()))
}

fn format_multi_select(options: &[SelectOption]) -> FormattedProperty {
    format_list(options.iter().map(|opt| opt.name.clone()).collect())
        .map_or(FormattedProperty::Empty, FormattedProperty::MultiSelect)
}

fn format_string(value: Option<&str>, wrap: fn(String) -> FormattedProperty) -> FormattedProperty {
    match value {
        Some(s) if !s.is_empty() => wrap(s.to_string()),
        _ => FormattedProperty::Empty,
    }
}

fn format_list(items: Vec<String>) -> Option<Vec<String>> {
    (!items.is_empty()).then_some(items)
}

fn format_date(date: Option<&DateValue>) -> FormattedProperty {
    date.map_or(FormattedProperty::Empty, |d| {
        FormattedProperty::Date(date_range(d))
    })
}

pub(super) fn date_range(date: &DateValue) -> DateRange {
    DateRange::new(date.start.clone(), date.end.clone())
}

fn format_files(files: &[File]) -> FormattedProperty {
    if files.is_empty() {
        return FormattedProperty::Empty;
    }
    FormattedProperty::Files(
        files
            .iter()
            .map(|f| FileLink {
                name: f.name.clone(),
                url: f.url.clone(),
            })
            .collect(),
    )
}

fn format_formula(formula: &FormulaResult) -> FormattedProperty {
    match formula {
        FormulaResult::String(s) => format_string(s.as_deref(), FormattedProperty::Text),
        FormulaResult::Number(n) => n.map_or(FormattedProperty::Empty, FormattedProperty::Number),
        FormulaResult::Boolean(b) => b.map_or(FormattedProperty::Empty, FormattedProperty::Boolean),
        FormulaResult::Date(d) => format_date(d.as_ref()),
    }
}

fn format_rollup(rollup: &RollupResult) -> FormattedProperty {
    match rollup {
        RollupResult::Number(n) => n.map_or(FormattedProperty::Empty, FormattedProperty::Number),
        RollupResult::Date(d) => format_date(d.as_ref()),
        RollupResult::Array(items) if items.is_empty() => FormattedProperty::Empty,
        RollupResult::Array(items) => FormattedProperty::List(
            items
                .iter()
                .map(|item| match item {
                    RollupArrayItem::Title(text) => format_text(text),
                    RollupArrayItem::Number(n) => FormattedProperty::Number(*n),
                    RollupArrayItem::Date(d) => FormattedProperty::Date(date_range(d)),
                    RollupArrayItem::Text(s) => FormattedProperty::Text(s.clone()),
                })
                .collect(),
        ),
        RollupResult::Unsupported => FormattedProperty::Empty,
    }
}
