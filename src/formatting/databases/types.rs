// src/formatting/databases/types.rs
//! Type definitions for table structures.
//!
//! Tables are plain data: the builder produces them, the renderer and the
//! document result consume them.

use crate::formatting::properties::DateRange;
use crate::types::Color;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

// --- Table Structure ---

/// Columns and rows of a database, cell-aligned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableData {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl TableData {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Every row carries exactly one cell per column.
    pub fn is_aligned(&self) -> bool {
        self.rows.iter().all(|row| row.cells.len() == self.columns.len())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub id: String,
    pub cells: Vec<CellValue>,
}

/// A table cell: display text, or a raw date range for date columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Date(DateRange),
}

impl CellValue {
    pub fn as_date(&self) -> Option<&DateRange> {
        match self {
            CellValue::Date(range) => Some(range),
            CellValue::Text(_) => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(text) => f.write_str(text),
            CellValue::Date(range) => write!(f, "{}", range),
        }
    }
}

// --- View Semantics ---

/// How a table is best presented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewKind {
    #[default]
    Table,
    /// Single dates only.
    Calendar,
    /// At least one row spans a range.
    Timeline,
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ViewKind::Table => "table",
            ViewKind::Calendar => "calendar",
            ViewKind::Timeline => "timeline",
        };
        f.write_str(name)
    }
}

/// Status name to color token, in first-seen order.
pub type StatusColorMap = IndexMap<String, Color>;

/// A table plus the view hints derived from its rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuiltTable {
    pub data: TableData,
    pub view_kind: ViewKind,
    pub date_property_name: Option<String>,
    pub status_color_map: Option<StatusColorMap>,
}

/// An inline database expanded in place while rendering a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineDatabaseDescriptor {
    pub database_id: String,
    pub title: String,
    pub view_kind: ViewKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_property_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_color_map: Option<StatusColorMap>,
    pub table_data: TableData,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cells_serialize_untagged() {
        let row = Row {
            id: "r1".into(),
            cells: vec![
                CellValue::Text("Launch".into()),
                CellValue::Date(DateRange::new("2024-01-01", None)),
            ],
        };
        assert_eq!(
            serde_json::to_value(&row).unwrap(),
            json!({"id": "r1", "cells": ["Launch", {"start": "2024-01-01", "end": null}]})
        );
    }

    #[test]
    fn test_descriptor_uses_camel_case() {
        let mut colors = StatusColorMap::new();
        colors.insert("Done".into(), Color::Green);
        let descriptor = InlineDatabaseDescriptor {
            database_id: "abc".into(),
            title: "Tasks".into(),
            view_kind: ViewKind::Timeline,
            date_property_name: Some("Due".into()),
            status_color_map: Some(colors),
            table_data: TableData::default(),
        };
        let value = serde_json::to_value(&descriptor).unwrap();
        assert_eq!(value["viewKind"], "timeline");
        assert_eq!(value["datePropertyName"], "Due");
        assert_eq!(value["statusColorMap"]["Done"], "green");
        assert_eq!(value["tableData"]["columns"], json!([]));
    }
}
