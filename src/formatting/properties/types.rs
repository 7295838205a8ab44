// src/formatting/properties/types.rs
//! Domain types for formatted properties.

use crate::types::Color;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A property value with its semantic type preserved.
#[derive(Debug, Clone, PartialEq)]
pub enum FormattedProperty {
    Text(String),
    Number(f64),
    Boolean(bool),
    Date(DateRange),
    Select(String),
    MultiSelect(Vec<String>),
    Status(StatusValue),
    People(Vec<String>),
    Files(Vec<FileLink>),
    Url(String),
    Email(String),
    Phone(String),
    Relation(Vec<String>),
    UniqueId(String),
    /// Rollup arrays: one formatted value per aggregated item.
    List(Vec<FormattedProperty>),
    Empty,
}

/// Raw start/end pair of a date-bearing property.
///
/// Either side may be absent; a missing `end` means a single date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl DateRange {
    pub fn new(start: impl Into<String>, end: Option<String>) -> Self {
        Self {
            start: Some(start.into()),
            end,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.start, &self.end) {
            (Some(start), Some(end)) => write!(f, "{} → {}", start, end),
            (Some(start), None) => write!(f, "{}", start),
            (None, Some(end)) => write!(f, "{}", end),
            (None, None) => Ok(()),
        }
    }
}

/// Status option as the presentation layer needs it: a name and Notion's
/// color token. Mapping the token to a paint color happens downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusValue {
    pub name: String,
    pub color: Color,
}

/// A file with name and URL.
#[derive(Debug, Clone, PartialEq)]
pub struct FileLink {
    pub name: String,
    pub url: String,
}

/// Rendering of formatted values to display text.
pub trait Renderable {
    fn render_text(&self) -> String;
}
