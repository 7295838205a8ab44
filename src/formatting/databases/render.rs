// src/formatting/databases/render.rs
//! Markdown rendering for tables.

use super::types::*;
use crate::formatting::properties::escape_for_table_cell;
use std::fmt::Write;

/// Placeholder text for a table with no rows.
pub const EMPTY_TABLE_TEXT: &str = "*No data available.*";

/// Renders a table as a Markdown pipe table, without a trailing newline.
pub fn render_markdown(table: &TableData) -> String {
    if table.columns.is_empty() || table.is_empty() {
        return EMPTY_TABLE_TEXT.to_string();
    }

    let mut output = String::new();
    render_line(&mut output, table.columns.iter().map(String::as_str));
    render_separator(&mut output, table.columns.len());
    for row in &table.rows {
        let cells: Vec<String> = row.cells.iter().map(CellValue::to_string).collect();
        render_line(&mut output, cells.iter().map(String::as_str));
    }

    output.truncate(output.trim_end_matches('\n').len());
    output
}

fn render_line<'a>(output: &mut String, cells: impl Iterator<Item = &'a str>) {
    output.push('|');
    for cell in cells {
        let _ = write!(output, " {} |", escape_for_table_cell(cell));
    }
    output.push('\n');
}

fn render_separator(output: &mut String, columns: usize) {
    output.push('|');
    for _ in 0..columns {
        output.push_str(" --- |");
    }
    output.push('\n');
}
