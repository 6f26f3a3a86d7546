//! Native tables. The first row is the header, the first column of the
//! other rows is the label column; per-row styles override both.

use crate::config::{CellColors, Theme};
use crate::extract::slide_data::{CellStyle, TableElement, TextAlign};
use crate::models::colors::RgbColor;
use crate::models::common::Dimension;
use crate::models::elements::PageElementKind;
use crate::models::page::Slide;
use crate::models::properties::{Alignment, ParagraphStyle, TextStyle};
use crate::models::shape_properties::{ContentAlignment, Outline};
use crate::models::table::{Table, TableCell, TableCellProperties, TableRow};
use crate::models::text::{ParagraphMarker, TextContent};

const DEFAULT_BORDER_PT: f64 = 0.75;

/// Resolved colors for one cell.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCell {
    pub fill: RgbColor,
    pub color: RgbColor,
    pub bold: bool,
}

fn layered(page: Option<&CellStyle>, theme: &CellColors) -> ResolvedCell {
    ResolvedCell {
        fill: page.and_then(|style| style.fill).unwrap_or(theme.fill),
        color: page.and_then(|style| style.color).unwrap_or(theme.color),
        bold: page.and_then(|style| style.bold).unwrap_or(theme.bold),
    }
}

/// Row override, then header/label/data styles from the page, then theme.
pub fn resolve_cell(element: &TableElement, theme: &Theme, row: usize, column: usize) -> ResolvedCell {
    let options = &element.table_data.options;
    let tier = if row == 0 {
        layered(options.header.as_ref(), &theme.table_header)
    } else if column == 0 {
        layered(options.label.as_ref(), &theme.table_label)
    } else {
        layered(options.data.as_ref(), &theme.table_data)
    };
    match options.row_styles.get(&row) {
        Some(over) => ResolvedCell {
            fill: over.fill.unwrap_or(tier.fill),
            color: over.color.unwrap_or(tier.color),
            bold: over.bold.unwrap_or(tier.bold),
        },
        None => tier,
    }
}

fn alignment(align: Option<TextAlign>) -> Option<Alignment> {
    align.map(|align| match align {
        TextAlign::Left => Alignment::Start,
        TextAlign::Center => Alignment::Center,
        TextAlign::Right => Alignment::End,
        TextAlign::Justify => Alignment::Justified,
    })
}

pub fn table_kind(element: &TableElement, theme: &Theme) -> PageElementKind {
    let data = &element.table_data;
    let options = &data.options;
    let columns = if options.col_w.is_empty() {
        data.rows
            .iter()
            .map(|row| row.iter().map(|cell| cell.colspan as usize).sum::<usize>())
            .max()
            .unwrap_or(0)
    } else {
        options.col_w.len()
    };
    let column_widths = if options.col_w.is_empty() && columns > 0 {
        vec![Dimension::inches(element.position.w / columns as f64); columns]
    } else {
        options.col_w.iter().map(|w| Dimension::inches(*w)).collect()
    };
    let row_height = (!data.rows.is_empty()).then(|| Dimension::inches(element.position.h / data.rows.len() as f64));
    let border = Outline {
        color: options
            .border
            .as_ref()
            .map_or(theme.table_border, |line| line.color),
        weight: Dimension::pt(options.border.as_ref().map_or(DEFAULT_BORDER_PT, |line| line.width)),
    };

    let table_rows = data
        .rows
        .iter()
        .enumerate()
        .map(|(row_index, row)| {
            let mut column = 0;
            let table_cells = row
                .iter()
                .map(|cell| {
                    let resolved = resolve_cell(element, theme, row_index, column);
                    column += cell.colspan as usize;
                    let mut text = TextContent::default();
                    text.push_paragraph(ParagraphMarker {
                        style: ParagraphStyle {
                            alignment: alignment(cell.align),
                            ..ParagraphStyle::default()
                        },
                        bullet: None,
                    });
                    text.push_run(
                        cell.text.clone(),
                        TextStyle {
                            font_family: (!options.font_face.is_empty()).then(|| options.font_face.clone()),
                            font_size: (options.font_size > 0.0).then(|| Dimension::pt(options.font_size)),
                            foreground_color: Some(resolved.color),
                            bold: Some(resolved.bold),
                            ..TextStyle::default()
                        },
                    );
                    TableCell {
                        column_span: cell.colspan,
                        text,
                        table_cell_properties: TableCellProperties {
                            background_fill: Some(resolved.fill),
                            border: Some(border.clone()),
                            content_alignment: ContentAlignment::Middle,
                        },
                    }
                })
                .collect();
            TableRow {
                row_height,
                table_cells,
            }
        })
        .collect();

    PageElementKind::Table(Table {
        rows: data.rows.len(),
        columns,
        column_widths,
        table_rows,
    })
}

pub fn add_table(slide: &mut Slide, element: &TableElement, theme: &Theme) {
    slide.add_element(element.position, table_kind(element, theme));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::slide_data::{TableCellData, TableData, TableOptions};
    use crate::models::common::Rect;
    use indexmap::IndexMap;

    fn cell(text: &str) -> TableCellData {
        TableCellData {
            text: text.into(),
            colspan: 1,
            align: None,
        }
    }

    fn element(row_styles: IndexMap<usize, CellStyle>) -> TableElement {
        TableElement {
            table_data: TableData {
                rows: vec![
                    vec![cell("Metric"), cell("Q1")],
                    vec![cell("Revenue"), cell("$4M")],
                    vec![cell("Pain points"), cell("Churn")],
                ],
                options: TableOptions {
                    col_w: vec![2.0, 3.0],
                    font_size: 12.0,
                    font_face: "Calibri".into(),
                    row_styles,
                    ..TableOptions::default()
                },
            },
            position: Rect::new(1.0, 1.0, 5.0, 1.5),
        }
    }

    #[test]
    fn theme_supplies_header_label_and_data_defaults() {
        let theme = Theme::default();
        let table = element(IndexMap::new());
        let header = resolve_cell(&table, &theme, 0, 1);
        assert_eq!(header.fill, RgbColor::from_hex("1F4E79").unwrap());
        assert!(header.bold);
        let label = resolve_cell(&table, &theme, 1, 0);
        assert_eq!(label.fill, RgbColor::from_hex("DEEAF6").unwrap());
        let data = resolve_cell(&table, &theme, 1, 1);
        assert_eq!(data.fill, RgbColor::WHITE);
        assert!(!data.bold);
    }

    #[test]
    fn row_styles_take_precedence() {
        let warning = RgbColor::new(255, 230, 230);
        let mut styles = IndexMap::new();
        styles.insert(
            2,
            CellStyle {
                fill: Some(warning),
                color: None,
                bold: Some(true),
            },
        );
        let table = element(styles);
        let theme = Theme::default();
        let label = resolve_cell(&table, &theme, 2, 0);
        let data = resolve_cell(&table, &theme, 2, 1);
        assert_eq!(label.fill, warning);
        assert_eq!(data.fill, warning);
        assert!(data.bold);
        assert_eq!(data.color, RgbColor::from_hex("333333").unwrap());
    }

    #[test]
    fn builds_rows_with_widths_and_borders() {
        let PageElementKind::Table(table) = table_kind(&element(IndexMap::new()), &Theme::default()) else {
            panic!("expected table")
        };
        assert_eq!((table.rows, table.columns), (3, 2));
        assert_eq!(table.column_widths[1], Dimension::inches(3.0));
        assert_eq!(table.table_rows[0].row_height, Some(Dimension::inches(0.5)));
        let cell = &table.table_rows[2].table_cells[1];
        assert_eq!(cell.text.plain_text(), "Churn");
        assert_eq!(
            cell.table_cell_properties.border.as_ref().unwrap().color,
            RgbColor::from_hex("BFBFBF").unwrap()
        );
    }

    #[test]
    fn custom_theme_colors_reach_cells_and_borders() {
        let mut theme = Theme::default();
        theme.table_header.fill = RgbColor::new(0x2E, 0x7D, 0x32);
        theme.table_border = RgbColor::new(0x10, 0x20, 0x30);
        let table = element(IndexMap::new());
        assert_eq!(resolve_cell(&table, &theme, 0, 0).fill, RgbColor::new(0x2E, 0x7D, 0x32));
        let PageElementKind::Table(built) = table_kind(&table, &theme) else {
            panic!("expected table")
        };
        let border = built.table_rows[1].table_cells[0].table_cell_properties.border.as_ref().unwrap();
        assert_eq!(border.color, RgbColor::new(0x10, 0x20, 0x30));
    }
}
