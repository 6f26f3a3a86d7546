use serde::{Deserialize, Serialize};

use crate::models::colors::RgbColor;
use crate::models::common::Dimension;
use crate::models::shape_properties::{ContentAlignment, Outline};
use crate::models::text::TextContent;

/// The properties of a table cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCellProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_fill: Option<RgbColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<Outline>,
    pub content_alignment: ContentAlignment,
}

/// Properties and contents of each cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCell {
    /// Column span of the cell.
    pub column_span: u32,
    pub text: TextContent,
    pub table_cell_properties: TableCellProperties,
}

/// Properties and contents of each row in a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_height: Option<Dimension>,
    pub table_cells: Vec<TableCell>,
}

/// A PageElement kind representing a native table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    /// Number of rows in the table.
    pub rows: usize,
    /// Number of columns in the table.
    pub columns: usize,
    /// Width of each column.
    pub column_widths: Vec<Dimension>,
    pub table_rows: Vec<TableRow>,
}
