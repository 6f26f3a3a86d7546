//! Serialized view of the rendered DOM, as returned by the in-page helper's
//! `snapshot` call. Geometry is in CSS pixels relative to the viewport.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The attribute stamped on every body element by the helper's `init` hook.
pub const NODE_ATTR: &str = "data-h2p-node";

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PxRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl PxRect {
    pub fn is_empty(&self) -> bool {
        self.w == 0.0 || self.h == 0.0
    }
}

/// The subset of `getComputedStyle` the extractor reads. Values are the
/// browser's resolved strings (`"16px"`, `"rgb(0, 0, 0)"`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComputedStyle {
    pub background_color: String,
    pub background_image: String,
    pub border_top_width: String,
    pub border_right_width: String,
    pub border_bottom_width: String,
    pub border_left_width: String,
    pub border_top_color: String,
    pub border_right_color: String,
    pub border_bottom_color: String,
    pub border_left_color: String,
    pub border_top_style: String,
    pub border_radius: String,
    pub box_shadow: String,
    pub color: String,
    pub font_size: String,
    pub font_family: String,
    pub font_weight: String,
    pub font_style: String,
    pub text_decoration_line: String,
    pub text_align: String,
    pub text_transform: String,
    pub line_height: String,
    pub margin_top: String,
    pub margin_right: String,
    pub margin_bottom: String,
    pub margin_left: String,
    pub padding_top: String,
    pub padding_right: String,
    pub padding_bottom: String,
    pub padding_left: String,
    pub transform: String,
    pub writing_mode: String,
    pub opacity: String,
    pub display: String,
}

/// A child of an element: either a nested element or a raw text node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomChild {
    Element(DomNode),
    Text(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomNode {
    /// Value of [`NODE_ATTR`].
    pub node_id: String,
    /// Lowercase tag name.
    pub tag: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub attributes: HashMap<String, String>,
    pub rect: PxRect,
    /// Layout size before transforms; equals the rect size when unrotated.
    pub offset_width: f64,
    pub offset_height: f64,
    pub style: ComputedStyle,
    /// Empty for `svg` and `canvas`, which the helper reports as leaves.
    #[serde(default)]
    pub children: Vec<DomChild>,
}

impl DomNode {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Selector matching exactly this node in the live page.
    pub fn selector(&self) -> String {
        node_selector(&self.node_id)
    }

    pub fn element_children(&self) -> impl Iterator<Item = &DomNode> {
        self.children.iter().filter_map(|child| match child {
            DomChild::Element(node) => Some(node),
            DomChild::Text(_) => None,
        })
    }

    pub fn direct_text(&self) -> impl Iterator<Item = &str> {
        self.children.iter().filter_map(|child| match child {
            DomChild::Text(text) => Some(text.as_str()),
            DomChild::Element(_) => None,
        })
    }

    /// Equivalent of `textContent`.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                DomChild::Text(text) => out.push_str(text),
                DomChild::Element(node) => node.collect_text(out),
            }
        }
    }

    /// Depth-first search over descendants (not including `self`).
    pub fn find_descendant(&self, predicate: &dyn Fn(&DomNode) -> bool) -> Option<&DomNode> {
        for child in self.element_children() {
            if predicate(child) {
                return Some(child);
            }
            if let Some(found) = child.find_descendant(predicate) {
                return Some(found);
            }
        }
        None
    }
}

pub fn node_selector(node_id: &str) -> String {
    format!("[{NODE_ATTR}=\"{node_id}\"]")
}

/// Full response of the helper's `snapshot` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomSnapshot {
    pub body: DomNode,
    /// `document.documentElement.outerHTML` at snapshot time.
    pub html: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_helper_payload() {
        let json = r#"{
            "body": {
                "nodeId": "0", "tag": "body", "classes": [],
                "rect": {"x": 0, "y": 0, "w": 960, "h": 540},
                "offsetWidth": 960, "offsetHeight": 540,
                "style": {"backgroundColor": "rgb(255, 255, 255)", "fontSize": "16px"},
                "children": [
                    {"text": "\n  "},
                    {"element": {
                        "nodeId": "1", "tag": "h1", "classes": ["title"],
                        "rect": {"x": 48, "y": 40, "w": 600, "h": 58},
                        "offsetWidth": 600, "offsetHeight": 58,
                        "style": {"color": "rgb(17, 17, 17)"},
                        "children": [{"text": "Quarterly review"}]
                    }}
                ]
            },
            "html": "<html></html>"
        }"#;
        let snapshot: DomSnapshot = serde_json::from_str(json).unwrap();
        let heading = snapshot.body.element_children().next().unwrap();
        assert_eq!(heading.tag, "h1");
        assert!(heading.has_class("title"));
        assert_eq!(heading.text_content(), "Quarterly review");
        assert_eq!(heading.selector(), "[data-h2p-node=\"1\"]");
        assert_eq!(snapshot.body.style.font_size, "16px");
        assert_eq!(snapshot.body.style.border_radius, "");
    }
}
