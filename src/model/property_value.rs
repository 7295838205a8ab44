use crate::types::*;
use std::fmt;

/// Property value: a typed value together with its property id.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyValue {
    /// Notion's property id. The title property always has id `title`.
    pub id: String,
    pub type_specific_value: PropertyTypeValue,
}

impl PropertyValue {
    pub fn new(id: impl Into<String>, value: PropertyTypeValue) -> Self {
        Self {
            id: id.into(),
            type_specific_value: value,
        }
    }

    /// The declared type tag of this value.
    pub fn kind(&self) -> PropertyKind {
        use PropertyTypeValue::*;
        match &self.type_specific_value {
            Title { .. } => PropertyKind::Title,
            RichText { .. } => PropertyKind::RichText,
            Number { .. } => PropertyKind::Number,
            Select { .. } => PropertyKind::Select,
            MultiSelect { .. } => PropertyKind::MultiSelect,
            Status { .. } => PropertyKind::Status,
            Date { .. } => PropertyKind::Date,
            Formula { .. } => PropertyKind::Formula,
            Relation { .. } => PropertyKind::Relation,
            Rollup { .. } => PropertyKind::Rollup,
            People { .. } => PropertyKind::People,
            Files { .. } => PropertyKind::Files,
            Checkbox { .. } => PropertyKind::Checkbox,
            Url { .. } => PropertyKind::Url,
            Email { .. } => PropertyKind::Email,
            PhoneNumber { .. } => PropertyKind::PhoneNumber,
            CreatedTime { .. } => PropertyKind::CreatedTime,
            CreatedBy { .. } => PropertyKind::CreatedBy,
            LastEditedTime { .. } => PropertyKind::LastEditedTime,
            LastEditedBy { .. } => PropertyKind::LastEditedBy,
            UniqueId { .. } => PropertyKind::UniqueId,
            Unsupported { .. } => PropertyKind::Unsupported,
        }
    }
}

/// The specific value types for properties
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyTypeValue {
    Title { title: Vec<RichTextItem> },
    RichText { rich_text: Vec<RichTextItem> },
    Number { number: Option<f64> },
    Select { select: Option<SelectOption> },
    MultiSelect { multi_select: Vec<SelectOption> },
    Status { status: Option<SelectOption> },
    Date { date: Option<DateValue> },
    Formula { formula: FormulaResult },
    Relation { relation: Vec<PageId> },
    Rollup { rollup: RollupResult },
    People { people: Vec<User> },
    Files { files: Vec<File> },
    Checkbox { checkbox: bool },
    Url { url: Option<String> },
    Email { email: Option<String> },
    PhoneNumber { phone_number: Option<String> },
    CreatedTime { created_time: String },
    CreatedBy { created_by: User },
    LastEditedTime { last_edited_time: String },
    LastEditedBy { last_edited_by: User },
    UniqueId { prefix: Option<String>, number: Option<i64> },
    /// A type this crate does not know; the raw tag is kept for diagnostics.
    Unsupported { type_name: String },
}

/// Property type tags, shared by page values and database schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    Title,
    RichText,
    Number,
    Select,
    MultiSelect,
    Status,
    Date,
    Formula,
    Relation,
    Rollup,
    People,
    Files,
    Checkbox,
    Url,
    Email,
    PhoneNumber,
    CreatedTime,
    CreatedBy,
    LastEditedTime,
    LastEditedBy,
    UniqueId,
    Unsupported,
}

impl PropertyKind {
    /// Parse the Notion API type name.
    pub fn from_type_name(name: &str) -> Self {
        match name {
            "title" => Self::Title,
            "rich_text" => Self::RichText,
            "number" => Self::Number,
            "select" => Self::Select,
            "multi_select" => Self::MultiSelect,
            "status" => Self::Status,
            "date" => Self::Date,
            "formula" => Self::Formula,
            "relation" => Self::Relation,
            "rollup" => Self::Rollup,
            "people" => Self::People,
            "files" => Self::Files,
            "checkbox" => Self::Checkbox,
            "url" => Self::Url,
            "email" => Self::Email,
            "phone_number" => Self::PhoneNumber,
            "created_time" => Self::CreatedTime,
            "created_by" => Self::CreatedBy,
            "last_edited_time" => Self::LastEditedTime,
            "last_edited_by" => Self::LastEditedBy,
            "unique_id" => Self::UniqueId,
            _ => Self::Unsupported,
        }
    }

    /// The Notion API type name.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::RichText => "rich_text",
            Self::Number => "number",
            Self::Select => "select",
            Self::MultiSelect => "multi_select",
            Self::Status => "status",
            Self::Date => "date",
            Self::Formula => "formula",
            Self::Relation => "relation",
            Self::Rollup => "rollup",
            Self::People => "people",
            Self::Files => "files",
            Self::Checkbox => "checkbox",
            Self::Url => "url",
            Self::Email => "email",
            Self::PhoneNumber => "phone_number",
            Self::CreatedTime => "created_time",
            Self::CreatedBy => "created_by",
            Self::LastEditedTime => "last_edited_time",
            Self::LastEditedBy => "last_edited_by",
            Self::UniqueId => "unique_id",
            Self::Unsupported => "unsupported",
        }
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trips_type_names() {
        for name in ["title", "status", "date", "multi_select", "unique_id"] {
            assert_eq!(PropertyKind::from_type_name(name).type_name(), name);
        }
        assert_eq!(
            PropertyKind::from_type_name("button"),
            PropertyKind::Unsupported
        );
    }

    #[test]
    fn test_value_kind() {
        let value = PropertyValue::new(
            "abc",
            PropertyTypeValue::Status {
                status: None,
            },
        );
        assert_eq!(value.kind(), PropertyKind::Status);
    }
}
