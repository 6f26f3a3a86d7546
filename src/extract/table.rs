//! `table` extraction into a native table description.

use indexmap::IndexMap;

use crate::extract::css;
use crate::extract::slide_data::{CellStyle, LineStyle, TableCellData, TableData, TableElement, TableOptions};
use crate::extract::snapshot::DomNode;
use crate::models::common::Rect;
use crate::units::{px_to_in, round_to};

pub fn extract_table(node: &DomNode, position: Rect) -> TableElement {
    let mut row_nodes = Vec::new();
    collect_rows(node, &mut row_nodes);

    let rows: Vec<Vec<TableCellData>> = row_nodes
        .iter()
        .map(|row| cells(row).map(cell_data).collect())
        .collect();

    let cell_at = |row: usize, col: usize| row_nodes.get(row).and_then(|r| cells(r).nth(col));
    let first_cell = cell_at(0, 0);

    let mut row_styles = IndexMap::new();
    for (index, row) in row_nodes.iter().enumerate().skip(1) {
        if css::is_visible_color(&row.style.background_color) {
            let text = cells(row).next().map_or(&row.style, |cell| &cell.style);
            row_styles.insert(
                index,
                CellStyle {
                    fill: Some(css::rgb_to_hex(&row.style.background_color)),
                    color: Some(css::rgb_to_hex(&text.color)),
                    bold: Some(css::is_bold(&text.font_weight, &text.font_family)),
                },
            );
        }
    }

    let options = TableOptions {
        col_w: column_widths(&row_nodes),
        font_size: first_cell.map_or(0.0, |cell| css::points(&cell.style.font_size)),
        font_face: first_cell
            .map(|cell| css::first_font_family(&cell.style.font_family))
            .unwrap_or_default(),
        border: first_cell.and_then(border),
        header: cell_at(0, 0).and_then(painted_style),
        label: cell_at(1, 0).and_then(painted_style),
        data: cell_at(1, 1).and_then(painted_style),
        row_styles,
    };

    TableElement {
        table_data: TableData { rows, options },
        position,
    }
}

fn collect_rows<'a>(node: &'a DomNode, rows: &mut Vec<&'a DomNode>) {
    for child in node.element_children() {
        match child.tag.as_str() {
            "tr" => rows.push(child),
            "thead" | "tbody" | "tfoot" => collect_rows(child, rows),
            _ => {}
        }
    }
}

fn cells(row: &DomNode) -> impl Iterator<Item = &DomNode> {
    row.element_children()
        .filter(|child| matches!(child.tag.as_str(), "td" | "th"))
}

fn colspan(cell: &DomNode) -> u32 {
    cell.attribute("colspan")
        .and_then(|span| span.trim().parse::<u32>().ok())
        .filter(|span| *span > 0)
        .unwrap_or(1)
}

fn cell_data(cell: &DomNode) -> TableCellData {
    TableCellData {
        text: crate::extract::inline::rendered_text(cell),
        colspan: colspan(cell),
        align: css::text_align(&cell.style.text_align),
    }
}

/// Column widths of the widest row, splitting spanned cells evenly.
fn column_widths(rows: &[&DomNode]) -> Vec<f64> {
    let Some(row) = rows
        .iter()
        .max_by_key(|row| cells(row).map(colspan).sum::<u32>())
    else {
        return Vec::new();
    };
    cells(row)
        .flat_map(|cell| {
            let span = colspan(cell);
            let width = round_to(px_to_in(cell.rect.w) / span as f64, 4);
            std::iter::repeat(width).take(span as usize)
        })
        .collect()
}

fn border(cell: &DomNode) -> Option<LineStyle> {
    let width = css::px_to_points(&cell.style.border_top_width);
    (width > 0.0).then(|| LineStyle {
        color: css::rgb_to_hex(&cell.style.border_top_color),
        width,
    })
}

/// Style of a cell that paints its own background.
fn painted_style(cell: &DomNode) -> Option<CellStyle> {
    let style = &cell.style;
    css::is_visible_color(&style.background_color).then(|| CellStyle {
        fill: Some(css::rgb_to_hex(&style.background_color)),
        color: Some(css::rgb_to_hex(&style.color)),
        bold: Some(css::is_bold(&style.font_weight, &style.font_family)),
    })
}
