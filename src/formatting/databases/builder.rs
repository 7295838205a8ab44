// src/formatting/databases/builder.rs
//! Builder for constructing tables from database rows.
//!
//! Columns come from the database schema when it is known, otherwise from the
//! properties the rows carry. The title column always leads.

use super::types::*;
use crate::formatting::properties::{extract_date_range, extract_status, extract_value};
use crate::model::{Database, Page, PropertyKind};
use crate::types::PropertyName;

/// A column as the builder sees it: name plus declared kind.
#[derive(Debug, Clone, PartialEq)]
struct Column {
    name: PropertyName,
    kind: PropertyKind,
}

/// Builds [`BuiltTable`]s from database rows.
pub struct TableBuilder<'a> {
    rows: &'a [Page],
    schema: Option<&'a Database>,
}

impl<'a> TableBuilder<'a> {
    pub fn new(rows: &'a [Page]) -> Self {
        Self { rows, schema: None }
    }

    /// Uses the database's column schema for ordering and kinds.
    pub fn with_schema(mut self, database: &'a Database) -> Self {
        self.schema = Some(database);
        self
    }

    pub fn build(&self) -> BuiltTable {
        let columns = self.build_columns();
        log::debug!(
            "Building table with {} columns and {} rows",
            columns.len(),
            self.rows.len()
        );

        let rows: Vec<Row> = self
            .rows
            .iter()
            .map(|page| self.build_row(page, &columns))
            .collect();

        let date_column = select_date_column(&columns, &rows);
        let view_kind = determine_view_kind(date_column, &rows);
        let status_color_map = self.build_status_colors(&columns);

        BuiltTable {
            data: TableData {
                columns: columns.iter().map(|c| c.name.to_string()).collect(),
                rows,
            },
            view_kind,
            date_property_name: date_column.map(|index| columns[index].name.to_string()),
            status_color_map,
        }
    }

    /// Title column first, remaining columns in natural order.
    fn build_columns(&self) -> Vec<Column> {
        let mut columns: Vec<Column> = match self.schema {
            Some(database) if !database.schema.is_empty() => database
                .schema
                .iter()
                .map(|(name, property)| Column {
                    name: name.clone(),
                    kind: property.kind,
                })
                .collect(),
            _ => self.columns_from_rows(),
        };

        if let Some(index) = columns.iter().position(|c| c.kind == PropertyKind::Title) {
            let title = columns.remove(index);
            columns.insert(0, title);
        }
        columns
    }

    /// Union of the rows' properties in first-seen order.
    fn columns_from_rows(&self) -> Vec<Column> {
        let mut columns: Vec<Column> = Vec::new();
        for page in self.rows {
            for (name, value) in &page.properties {
                if !columns.iter().any(|c| &c.name == name) {
                    columns.push(Column {
                        name: name.clone(),
                        kind: value.kind(),
                    });
                }
            }
        }
        columns
    }

    fn build_row(&self, page: &Page, columns: &[Column]) -> Row {
        Row {
            id: page.id.as_str().to_string(),
            cells: columns
                .iter()
                .map(|column| build_cell(page, column))
                .collect(),
        }
    }

    /// Status colors from the first status-typed column, `None` when there is
    /// no such column or no row has a status set.
    fn build_status_colors(&self, columns: &[Column]) -> Option<StatusColorMap> {
        let column = columns.iter().find(|c| c.kind == PropertyKind::Status)?;

        let mut colors = StatusColorMap::new();
        for page in self.rows {
            let status = page
                .properties
                .get(column.name.as_str())
                .and_then(extract_status);
            if let Some(status) = status {
                colors.entry(status.name).or_insert(status.color);
            }
        }

        if colors.is_empty() {
            None
        } else {
            Some(colors)
        }
    }
}

fn build_cell(page: &Page, column: &Column) -> CellValue {
    let value = page.properties.get(column.name.as_str());
    match column.kind {
        PropertyKind::Date => {
            CellValue::Date(value.map(extract_date_range).unwrap_or_default())
        }
        _ => CellValue::Text(value.map(extract_value).unwrap_or_default()),
    }
}

/// First date-typed column with at least one start value.
fn select_date_column(columns: &[Column], rows: &[Row]) -> Option<usize> {
    columns.iter().enumerate().find_map(|(index, column)| {
        let has_start = rows.iter().any(|row| {
            row.cells
                .get(index)
                .and_then(CellValue::as_date)
                .is_some_and(|range| range.start.is_some())
        });
        (column.kind == PropertyKind::Date && has_start).then_some(index)
    })
}

fn determine_view_kind(date_column: Option<usize>, rows: &[Row]) -> ViewKind {
    let Some(index) = date_column else {
        return ViewKind::Table;
    };
    let spans_range = rows.iter().any(|row| {
        row.cells
            .get(index)
            .and_then(CellValue::as_date)
            .is_some_and(|range| range.end.is_some())
    });
    if spans_range {
        ViewKind::Timeline
    } else {
        ViewKind::Calendar
    }
}
