//! Text styling and inline run parsing for paragraphs, headings and list items.

use crate::extract::css;
use crate::extract::slide_data::{RunOptions, TextRun, TextStyle};
use crate::extract::snapshot::{ComputedStyle, DomChild, DomNode};
use crate::units::round_to;

/// Tags that carry inline formatting inside a text element.
pub const INLINE_TAGS: &[&str] = &["b", "strong", "i", "em", "u", "span", "br"];

/// Leading glyphs authors type instead of using a real list.
pub const BULLET_GLYPHS: &[char] = &['•', '-', '*', '▪', '▸', '○', '●', '◆', '◇', '■', '□'];

/// Element-level text style from computed CSS.
pub fn text_style(style: &ComputedStyle) -> TextStyle {
    let padding = [
        css::points(&style.padding_left),
        css::points(&style.padding_right),
        css::points(&style.padding_bottom),
        css::points(&style.padding_top),
    ];
    TextStyle {
        font_size: css::points(&style.font_size),
        font_face: css::first_font_family(&style.font_family),
        color: Some(css::rgb_to_hex(&style.color)),
        bold: css::is_bold(&style.font_weight, &style.font_family),
        italic: is_italic(style),
        underline: is_underlined(style),
        align: css::text_align(&style.text_align),
        line_spacing: crate::units::parse_px(&style.line_height)
            .map(|px| round_to(crate::units::px_to_pt(px), 2)),
        para_space_before: css::points(&style.margin_top),
        para_space_after: css::points(&style.margin_bottom),
        margin: padding.iter().any(|p| *p != 0.0).then_some(padding),
        rotate: css::rotation(&style.transform, &style.writing_mode),
        transparency: css::transparency(&style.color, &style.opacity),
    }
}

fn is_italic(style: &ComputedStyle) -> bool {
    matches!(style.font_style.trim(), "italic" | "oblique")
}

fn is_underlined(style: &ComputedStyle) -> bool {
    style.text_decoration_line.contains("underline")
}

/// Whether a text element needs run-level formatting rather than one string.
pub fn has_inline_formatting(node: &DomNode) -> bool {
    node.find_descendant(&|child| INLINE_TAGS.contains(&child.tag.as_str()))
        .is_some()
}

/// The manual bullet an element's text starts with (`"• item"`), if any.
pub fn leading_bullet(text: &str) -> Option<char> {
    let mut chars = text.trim_start().chars();
    let first = chars.next()?;
    let followed_by_space = chars.next().is_some_and(char::is_whitespace);
    (BULLET_GLYPHS.contains(&first) && followed_by_space).then_some(first)
}

/// Removes a leading manual bullet glyph and the whitespace after it.
pub fn strip_bullet(text: &str) -> &str {
    let trimmed = text.trim_start();
    match trimmed.chars().next() {
        Some(first) if BULLET_GLYPHS.contains(&first) => trimmed[first.len_utf8()..].trim_start(),
        _ => trimmed,
    }
}

/// Plain text of an element the way the browser renders it.
pub fn rendered_text(node: &DomNode) -> String {
    let collapsed = css::collapse_whitespace(&node.text_content());
    css::apply_text_transform(collapsed.trim(), &node.style.text_transform)
}

/// Collects styled runs for the children of `node`. Nested `ul`/`ol`
/// subtrees are left to the list extractor. Unsupported inline spacing is
/// reported into `errors`.
pub fn collect_runs(node: &DomNode, base: &TextStyle, errors: &mut Vec<String>) -> Vec<TextRun> {
    let mut collector = RunCollector {
        base,
        runs: Vec::new(),
        errors,
    };
    collector.walk(node, base.underline);
    normalize_runs(collector.runs)
}

struct RunCollector<'a> {
    base: &'a TextStyle,
    runs: Vec<TextRun>,
    errors: &'a mut Vec<String>,
}

impl RunCollector<'_> {
    fn walk(&mut self, node: &DomNode, underline: bool) {
        for child in &node.children {
            match child {
                DomChild::Text(text) => {
                    let text = css::collapse_whitespace(text);
                    if text.is_empty() {
                        continue;
                    }
                    let text = css::apply_text_transform(&text, &node.style.text_transform);
                    let options = self.options(&node.style, underline);
                    self.runs.push(TextRun::new(text, options));
                }
                DomChild::Element(element) => match element.tag.as_str() {
                    "br" => self.line_break(),
                    "ul" | "ol" => {}
                    tag => {
                        if INLINE_TAGS.contains(&tag) {
                            self.check_spacing(element);
                        }
                        self.walk(element, underline || is_underlined(&element.style));
                    }
                },
            }
        }
    }

    fn line_break(&mut self) {
        match self.runs.last_mut() {
            Some(last) if !last.options.break_line => last.options.break_line = true,
            _ => self.runs.push(TextRun::new(
                "",
                RunOptions {
                    break_line: true,
                    ..RunOptions::default()
                },
            )),
        }
    }

    fn check_spacing(&mut self, element: &DomNode) {
        let style = &element.style;
        let sides = [
            ("margin-left", &style.margin_left),
            ("margin-right", &style.margin_right),
            ("margin-top", &style.margin_top),
            ("margin-bottom", &style.margin_bottom),
            ("padding-left", &style.padding_left),
            ("padding-right", &style.padding_right),
            ("padding-top", &style.padding_top),
            ("padding-bottom", &style.padding_bottom),
        ];
        let offending: Vec<&str> = sides
            .iter()
            .filter(|(_, value)| css::px_to_points(value) != 0.0)
            .map(|(name, _)| *name)
            .collect();
        if !offending.is_empty() {
            self.errors.push(format!(
                "Inline element <{}> has {} which is not supported in PowerPoint. Remove margin and padding from inline elements.",
                element.tag,
                offending.join(", ")
            ));
        }
    }

    /// Run options that differ from the element's base style.
    fn options(&self, style: &ComputedStyle, underline: bool) -> RunOptions {
        let base = self.base;
        let bold = css::is_bold(&style.font_weight, &style.font_family);
        let italic = is_italic(style);
        let color = css::rgb_to_hex(&style.color);
        let transparency = css::transparency(&style.color, "1");
        let font_size = css::points(&style.font_size);
        RunOptions {
            bold: (bold != base.bold).then_some(bold),
            italic: (italic != base.italic).then_some(italic),
            underline: (underline != base.underline).then_some(underline),
            color: (Some(color) != base.color).then_some(color),
            transparency: if transparency != base.transparency { transparency } else { None },
            font_size: (font_size != base.font_size && font_size > 0.0).then_some(font_size),
            break_line: false,
            bullet: None,
        }
    }
}

/// Trims whitespace at paragraph edges and drops empty runs.
fn normalize_runs(runs: Vec<TextRun>) -> Vec<TextRun> {
    let mut out: Vec<TextRun> = Vec::with_capacity(runs.len());
    let mut at_line_start = true;
    for mut run in runs {
        if at_line_start {
            run.text = run.text.trim_start().to_string();
        } else if run.text.starts_with(' ')
            && out.last().is_some_and(|prev| prev.text.ends_with(' '))
        {
            run.text.remove(0);
        }
        if run.options.break_line {
            run.text = run.text.trim_end().to_string();
        }
        at_line_start = run.options.break_line;
        if run.text.is_empty() && !run.options.break_line {
            continue;
        }
        out.push(run);
    }
    if let Some(last) = out.last_mut() {
        let trimmed = last.text.trim_end().len();
        last.text.truncate(trimmed);
    }
    out
}

/// Largest run font size, for rescaling exact line spacing.
pub fn max_run_font_size(runs: &[TextRun], base: f64) -> f64 {
    runs.iter()
        .filter_map(|run| run.options.font_size)
        .fold(base, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::snapshot::ComputedStyle;

    fn element(tag: &str, style: ComputedStyle, children: Vec<DomChild>) -> DomNode {
        DomNode {
            node_id: tag.to_string(),
            tag: tag.to_string(),
            style,
            children,
            ..DomNode::default()
        }
    }

    fn base_style() -> ComputedStyle {
        ComputedStyle {
            font_size: "16px".into(),
            font_family: "Arial".into(),
            font_weight: "400".into(),
            font_style: "normal".into(),
            color: "rgb(0, 0, 0)".into(),
            opacity: "1".into(),
            line_height: "normal".into(),
            ..ComputedStyle::default()
        }
    }

    fn text(value: &str) -> DomChild {
        DomChild::Text(value.to_string())
    }

    #[test]
    fn style_conversion_uses_points() {
        let mut style = base_style();
        style.line_height = "24px".into();
        style.margin_bottom = "8px".into();
        style.text_align = "center".into();
        let text_style = text_style(&style);
        assert_eq!(text_style.font_size, 12.0);
        assert_eq!(text_style.line_spacing, Some(18.0));
        assert_eq!(text_style.para_space_after, 6.0);
        assert_eq!(text_style.margin, None);
        assert_eq!(text_style.font_face, "Arial");
    }

    #[test]
    fn bold_span_becomes_its_own_run() {
        let mut bold = base_style();
        bold.font_weight = "700".into();
        let p = element(
            "p",
            base_style(),
            vec![
                text("  Revenue "),
                DomChild::Element(element("strong", bold, vec![text("grew 12%")])),
                text(" this quarter\n"),
            ],
        );
        let base = text_style(&p.style);
        let mut errors = Vec::new();
        let runs = collect_runs(&p, &base, &mut errors);
        assert!(errors.is_empty());
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[0].text, "Revenue ");
        assert_eq!(runs[1].options.bold, Some(true));
        assert_eq!(runs[2].text, " this quarter");
        assert_eq!(runs[2].options.bold, None);
    }

    #[test]
    fn br_marks_line_break_and_inline_padding_is_rejected() {
        let mut padded = base_style();
        padded.padding_left = "4px".into();
        let p = element(
            "p",
            base_style(),
            vec![
                text("first"),
                DomChild::Element(element("br", base_style(), vec![])),
                DomChild::Element(element("span", padded, vec![text("second")])),
            ],
        );
        let base = text_style(&p.style);
        let mut errors = Vec::new();
        let runs = collect_runs(&p, &base, &mut errors);
        assert!(runs[0].options.break_line);
        assert_eq!(runs[1].text, "second");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("Inline element <span> has padding-left"));
    }

    #[test]
    fn bullet_glyph_detection() {
        assert_eq!(leading_bullet("• item"), Some('•'));
        assert_eq!(leading_bullet("-5 degrees"), None);
        assert_eq!(leading_bullet("Plain"), None);
        assert_eq!(strip_bullet("•  item"), "item");
        assert_eq!(strip_bullet("item"), "item");
    }
}
