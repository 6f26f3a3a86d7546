//! `ul`/`ol` extraction. Nesting depth is kept as a bullet level per item so
//! sub-bullets survive as their own tier.

use crate::extract::css;
use crate::extract::inline::{self, collect_runs, text_style};
use crate::extract::slide_data::{BulletOptions, ListElement, TextRun, TextStyle};
use crate::extract::snapshot::DomNode;
use crate::models::common::Rect;

/// Deepest tier a presentation bullet style distinguishes.
pub const MAX_LEVEL: u8 = 2;

pub fn extract_list(node: &DomNode, position: Rect, errors: &mut Vec<String>) -> ListElement {
    let first_item = node.element_children().find(|child| child.tag == "li");
    let mut style = text_style(&first_item.unwrap_or(node).style);
    // Indentation comes from the list's own padding; item margins do not apply.
    let indent = css::points(&node.style.padding_left) * 0.5;
    style.margin = Some([indent, 0.0, 0.0, 0.0]);
    style.para_space_before = 0.0;
    style.para_space_after = first_item.map_or(0.0, |li| css::points(&li.style.margin_bottom));
    style.align = None;

    let mut items = Vec::new();
    collect_items(node, 0, indent, &style, &mut items, errors);
    if let Some(last) = items.last_mut() {
        last.options.break_line = false;
    }

    if let Some(spacing) = style.line_spacing {
        let largest = inline::max_run_font_size(&items, style.font_size);
        if style.font_size > 0.0 && largest > style.font_size {
            style.line_spacing = Some(spacing * largest / style.font_size);
        }
    }

    ListElement {
        items,
        style,
        position,
    }
}

fn collect_items(
    list: &DomNode,
    level: u8,
    indent: f64,
    base: &TextStyle,
    items: &mut Vec<TextRun>,
    errors: &mut Vec<String>,
) {
    for li in list.element_children().filter(|child| child.tag == "li") {
        let mut runs = collect_runs(li, base, errors);
        if let Some(first) = runs.first_mut() {
            first.text = inline::strip_bullet(&first.text).to_string();
        }
        runs.retain(|run| !run.text.is_empty() || run.options.break_line);
        if let Some(first) = runs.first_mut() {
            first.options.bullet = Some(BulletOptions { indent, level });
        }
        if let Some(last) = runs.last_mut() {
            last.options.break_line = true;
        }
        items.extend(runs);

        for nested in li.element_children().filter(|child| matches!(child.tag.as_str(), "ul" | "ol")) {
            let nested_indent = css::points(&nested.style.padding_left) * 0.5;
            collect_items(
                nested,
                (level + 1).min(MAX_LEVEL),
                nested_indent,
                base,
                items,
                errors,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::snapshot::{ComputedStyle, DomChild};

    fn style() -> ComputedStyle {
        ComputedStyle {
            font_size: "16px".into(),
            font_family: "Arial".into(),
            font_weight: "400".into(),
            color: "rgb(0, 0, 0)".into(),
            opacity: "1".into(),
            padding_left: "40px".into(),
            ..ComputedStyle::default()
        }
    }

    fn node(tag: &str, children: Vec<DomChild>) -> DomChild {
        DomChild::Element(DomNode {
            node_id: tag.to_string(),
            tag: tag.to_string(),
            style: style(),
            children,
            ..DomNode::default()
        })
    }

    fn li(text: &str, nested: Option<DomChild>) -> DomChild {
        let mut children = vec![DomChild::Text(text.to_string())];
        children.extend(nested);
        node("li", children)
    }

    #[test]
    fn nested_lists_keep_their_tiers() {
        let deepest = node("ul", vec![li("deeper", Some(node("ul", vec![li("deepest", None)])))]);
        let inner = node("ul", vec![li("child", Some(deepest))]);
        let DomChild::Element(list) = node("ul", vec![li("• top", Some(inner)), li("second", None)]) else {
            unreachable!()
        };
        let mut errors = Vec::new();
        let element = extract_list(&list, Rect::new(0.5, 1.0, 4.0, 2.0), &mut errors);
        assert!(errors.is_empty());

        let levels: Vec<(String, u8)> = element
            .items
            .iter()
            .map(|run| (run.text.clone(), run.options.bullet.map(|b| b.level).unwrap_or(99)))
            .collect();
        assert_eq!(
            levels,
            vec![
                ("top".to_string(), 0),
                ("child".to_string(), 1),
                ("deeper".to_string(), 2),
                ("deepest".to_string(), 2),
                ("second".to_string(), 0),
            ]
        );
        assert!(element.items[..4].iter().all(|run| run.options.break_line));
        assert!(!element.items[4].options.break_line);
        assert_eq!(element.style.margin, Some([15.0, 0.0, 0.0, 0.0]));
    }
}
