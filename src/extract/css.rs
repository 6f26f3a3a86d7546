//! Parsing of computed CSS values into presentation-ready numbers and colors.

use crate::extract::slide_data::{ShadowStyle, TextAlign};
use crate::extract::snapshot::PxRect;
use crate::models::colors::RgbColor;
use crate::units::{parse_px, parse_px_or_zero, px_to_in, px_to_pt, round_to, PT_PER_IN, PX_PER_IN};

/// Fonts that ship a single weight; asking for bold makes renderers fake it.
const SINGLE_WEIGHT_FONTS: &[&str] = &["impact"];

/// A color with alpha in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub rgb: RgbColor,
    pub alpha: f64,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba {
        rgb: RgbColor::BLACK,
        alpha: 0.0,
    };

    fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self {
            rgb: RgbColor::new(r, g, b),
            alpha: 1.0,
        }
    }
}

/// Parses `rgb()`, `rgba()`, hex and a handful of named colors.
pub fn parse_color(value: &str) -> Option<Rgba> {
    let value = value.trim().to_ascii_lowercase();
    if value.is_empty() {
        return None;
    }
    if value == "transparent" {
        return Some(Rgba::TRANSPARENT);
    }
    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex_color(hex);
    }
    if let Some(args) = value
        .strip_prefix("rgba(")
        .or_else(|| value.strip_prefix("rgb("))
        .and_then(|rest| rest.strip_suffix(')'))
    {
        return parse_rgb_args(args);
    }
    named_color(&value)
}

fn parse_hex_color(hex: &str) -> Option<Rgba> {
    match hex.len() {
        3 | 6 => RgbColor::from_hex(hex).map(|rgb| Rgba { rgb, alpha: 1.0 }),
        8 => {
            let rgb = RgbColor::from_hex(&hex[..6])?;
            let alpha = u8::from_str_radix(&hex[6..], 16).ok()? as f64 / 255.0;
            Some(Rgba { rgb, alpha })
        }
        _ => None,
    }
}

fn parse_rgb_args(args: &str) -> Option<Rgba> {
    let parts: Vec<&str> = args
        .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect();
    if parts.len() < 3 {
        return None;
    }
    let channel = |raw: &str| -> Option<u8> {
        let number = match raw.strip_suffix('%') {
            Some(pct) => pct.parse::<f64>().ok()? * 2.55,
            None => raw.parse::<f64>().ok()?,
        };
        Some(number.round().clamp(0.0, 255.0) as u8)
    };
    let alpha = match parts.get(3) {
        Some(raw) => match raw.strip_suffix('%') {
            Some(pct) => pct.parse::<f64>().ok()? / 100.0,
            None => raw.parse::<f64>().ok()?,
        },
        None => 1.0,
    };
    Some(Rgba {
        rgb: RgbColor::new(channel(parts[0])?, channel(parts[1])?, channel(parts[2])?),
        alpha: alpha.clamp(0.0, 1.0),
    })
}

fn named_color(name: &str) -> Option<Rgba> {
    Some(match name {
        "black" => Rgba::opaque(0, 0, 0),
        "white" => Rgba::opaque(255, 255, 255),
        "red" => Rgba::opaque(255, 0, 0),
        "green" => Rgba::opaque(0, 128, 0),
        "blue" => Rgba::opaque(0, 0, 255),
        "yellow" => Rgba::opaque(255, 255, 0),
        "orange" => Rgba::opaque(255, 165, 0),
        "purple" => Rgba::opaque(128, 0, 128),
        "gray" | "grey" => Rgba::opaque(128, 128, 128),
        "silver" => Rgba::opaque(192, 192, 192),
        "navy" => Rgba::opaque(0, 0, 128),
        "teal" => Rgba::opaque(0, 128, 128),
        _ => return None,
    })
}

/// Computed color → hex. Transparent or unparseable colors map to white.
pub fn rgb_to_hex(value: &str) -> RgbColor {
    match parse_color(value) {
        Some(color) if color.alpha > 0.0 => color.rgb,
        _ => RgbColor::WHITE,
    }
}

/// Whether a computed background color paints anything.
pub fn is_visible_color(value: &str) -> bool {
    parse_color(value).is_some_and(|color| color.alpha > 0.0)
}

/// Transparency percentage (0 opaque … 100 invisible) from a color's alpha
/// and the element's `opacity`. `None` when fully opaque.
pub fn transparency(color: &str, opacity: &str) -> Option<f64> {
    let alpha = parse_color(color).map_or(1.0, |c| c.alpha);
    let opacity = opacity.trim().parse::<f64>().unwrap_or(1.0).clamp(0.0, 1.0);
    let effective = alpha * opacity;
    if effective >= 1.0 {
        None
    } else {
        Some(((1.0 - effective) * 100.0).round())
    }
}

pub fn px_to_points(value: &str) -> f64 {
    px_to_pt(parse_px_or_zero(value))
}

/// First family of a `font-family` list, unquoted.
pub fn first_font_family(value: &str) -> String {
    value
        .split(',')
        .next()
        .unwrap_or("")
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .trim()
        .to_string()
}

pub fn is_bold(font_weight: &str, font_family: &str) -> bool {
    let weight = font_weight.trim();
    let bold = weight == "bold" || weight == "bolder" || weight.parse::<u32>().is_ok_and(|w| w >= 600);
    bold && !is_single_weight_font(font_family)
}

fn is_single_weight_font(font_family: &str) -> bool {
    let family = first_font_family(font_family).to_ascii_lowercase();
    SINGLE_WEIGHT_FONTS.contains(&family.as_str())
}

pub fn text_align(value: &str) -> Option<TextAlign> {
    match value.trim() {
        "left" | "start" | "-webkit-left" => Some(TextAlign::Left),
        "center" | "-webkit-center" => Some(TextAlign::Center),
        "right" | "end" | "-webkit-right" => Some(TextAlign::Right),
        "justify" => Some(TextAlign::Justify),
        _ => None,
    }
}

/// Applies `text-transform` the way the browser renders it.
pub fn apply_text_transform(text: &str, transform: &str) -> String {
    match transform.trim() {
        "uppercase" => text.to_uppercase(),
        "lowercase" => text.to_lowercase(),
        "capitalize" => {
            let mut out = String::with_capacity(text.len());
            let mut at_word_start = true;
            for c in text.chars() {
                if at_word_start && c.is_alphabetic() {
                    out.extend(c.to_uppercase());
                    at_word_start = false;
                } else {
                    out.push(c);
                    if c.is_whitespace() {
                        at_word_start = true;
                    } else if c.is_alphabetic() {
                        at_word_start = false;
                    }
                }
            }
            out
        }
        _ => text.to_string(),
    }
}

/// Collapses runs of whitespace to single spaces, like HTML rendering does.
pub fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}

/// Clockwise rotation in whole degrees, from `writing-mode` and `transform`.
/// `None` when the element is upright.
pub fn rotation(transform: &str, writing_mode: &str) -> Option<f64> {
    let mut angle = match writing_mode.trim() {
        "vertical-rl" => 90.0,
        "vertical-lr" => 270.0,
        _ => 0.0,
    };
    let transform = transform.trim();
    if !transform.is_empty() && transform != "none" {
        if let Some(deg) = function_args(transform, "rotate(") {
            angle += deg.trim().trim_end_matches("deg").parse::<f64>().unwrap_or(0.0);
        } else if let Some(args) = function_args(transform, "matrix(") {
            let values: Vec<f64> = args
                .split(',')
                .filter_map(|v| v.trim().parse::<f64>().ok())
                .collect();
            if values.len() >= 2 {
                angle += values[1].atan2(values[0]).to_degrees().round();
            }
        }
    }
    let normalized = angle.rem_euclid(360.0);
    if normalized == 0.0 {
        None
    } else {
        Some(normalized)
    }
}

fn function_args<'a>(value: &'a str, prefix: &str) -> Option<&'a str> {
    let start = value.find(prefix)? + prefix.len();
    let end = value[start..].find(')')? + start;
    Some(&value[start..end])
}

/// Splits a comma-separated list at top level (ignoring commas inside parentheses).
pub fn split_top_level(value: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (index, c) in value.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(value[start..index].trim());
                start = index + 1;
            }
            _ => {}
        }
    }
    parts.push(value[start..].trim());
    parts.retain(|part| !part.is_empty());
    parts
}

/// Parses the first outer shadow of a computed `box-shadow`.
pub fn parse_box_shadow(value: &str) -> Option<ShadowStyle> {
    let value = value.trim();
    if value.is_empty() || value == "none" {
        return None;
    }
    let first = *split_top_level(value).first()?;
    if first.contains("inset") {
        return None;
    }

    let (color, rest) = split_color(first);
    let lengths: Vec<f64> = rest.split_whitespace().filter_map(parse_px).collect();
    if lengths.len() < 2 {
        return None;
    }
    let (offset_x, offset_y) = (lengths[0], lengths[1]);
    let blur = lengths.get(2).copied().unwrap_or(0.0);

    let mut angle = 0.0;
    if offset_x != 0.0 || offset_y != 0.0 {
        angle = offset_y.atan2(offset_x).to_degrees();
        if angle < 0.0 {
            angle += 360.0;
        }
    }
    let parsed = color.and_then(parse_color);
    Some(ShadowStyle {
        angle: angle.round(),
        blur: px_to_pt(blur),
        color: parsed.map_or(RgbColor::BLACK, |c| c.rgb),
        offset: px_to_pt((offset_x * offset_x + offset_y * offset_y).sqrt()),
        opacity: parsed.map_or(0.5, |c| c.alpha),
    })
}

/// Separates a color token from the lengths of a shadow declaration.
fn split_color(shadow: &str) -> (Option<&str>, String) {
    if let Some(start) = shadow.find("rgb") {
        if let Some(len) = shadow[start..].find(')') {
            let end = start + len + 1;
            let rest = format!("{} {}", &shadow[..start], &shadow[end..]);
            return (Some(&shadow[start..end]), rest);
        }
    }
    let mut color = None;
    let mut rest = Vec::new();
    for token in shadow.split_whitespace() {
        if color.is_none() && parse_px(token).is_none() && parse_color(token).is_some() {
            color = Some(token);
        } else {
            rest.push(token);
        }
    }
    (color, rest.join(" "))
}

/// Corner radius in inches. Percentages ≥ 50% mean fully rounded (1").
pub fn border_radius_inches(radius: &str, rect: &PxRect) -> f64 {
    let radius = radius.trim();
    let first = radius.split_whitespace().next().unwrap_or("");
    if let Some(pct) = first.strip_suffix('%') {
        let value = pct.parse::<f64>().unwrap_or(0.0);
        if value >= 50.0 {
            return 1.0;
        }
        return value / 100.0 * px_to_in(rect.w.min(rect.h));
    }
    if let Some(pt) = first.strip_suffix("pt") {
        return pt.parse::<f64>().unwrap_or(0.0) / PT_PER_IN;
    }
    parse_px_or_zero(first) / PX_PER_IN
}

/// The path inside `url(...)` of a background image, quotes removed.
pub fn extract_url(background_image: &str) -> Option<String> {
    let args = function_args(background_image, "url(")?;
    let path = args.trim().trim_matches(|c| c == '"' || c == '\'');
    if path.is_empty() {
        None
    } else {
        Some(path.to_string())
    }
}

/// Points rounded for stable output.
pub fn points(value: &str) -> f64 {
    round_to(px_to_points(value), 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_computed_colors() {
        assert_eq!(rgb_to_hex("rgb(31, 78, 121)"), RgbColor::new(31, 78, 121));
        assert_eq!(rgb_to_hex("rgba(0, 0, 0, 0)"), RgbColor::WHITE);
        assert_eq!(rgb_to_hex("transparent"), RgbColor::WHITE);
        assert_eq!(parse_color("rgb(10 20 30 / 0.5)").unwrap().alpha, 0.5);
        assert_eq!(parse_color("#ff000080").unwrap().rgb, RgbColor::new(255, 0, 0));
        assert!(!is_visible_color("rgba(0, 0, 0, 0)"));
        assert!(is_visible_color("rgb(255, 255, 255)"));
    }

    #[test]
    fn transparency_combines_alpha_and_opacity() {
        assert_eq!(transparency("rgb(0, 0, 0)", "1"), None);
        assert_eq!(transparency("rgba(0, 0, 0, 0.25)", "1"), Some(75.0));
        assert_eq!(transparency("rgb(0, 0, 0)", "0.5"), Some(50.0));
    }

    #[test]
    fn rotation_from_matrix_and_writing_mode() {
        assert_eq!(rotation("none", "horizontal-tb"), None);
        assert_eq!(rotation("none", "vertical-rl"), Some(90.0));
        assert_eq!(rotation("matrix(0, 1, -1, 0, 0, 0)", "horizontal-tb"), Some(90.0));
        assert_eq!(rotation("rotate(-45deg)", ""), Some(315.0));
    }

    #[test]
    fn box_shadow_in_computed_form() {
        let shadow = parse_box_shadow("rgba(0, 0, 0, 0.3) 0px 4px 8px 0px").unwrap();
        assert_eq!(shadow.angle, 90.0);
        assert_eq!(shadow.offset, 3.0);
        assert_eq!(shadow.blur, 6.0);
        assert_eq!(shadow.opacity, 0.3);
        assert_eq!(shadow.color, RgbColor::BLACK);
        assert!(parse_box_shadow("rgb(0, 0, 0) 0px 0px 4px 0px inset").is_none());
        assert!(parse_box_shadow("none").is_none());
    }

    #[test]
    fn border_radius_units() {
        let rect = PxRect { x: 0.0, y: 0.0, w: 192.0, h: 96.0 };
        assert_eq!(border_radius_inches("0px", &rect), 0.0);
        assert_eq!(border_radius_inches("12px", &rect), 0.125);
        assert_eq!(border_radius_inches("50%", &rect), 1.0);
        assert_eq!(border_radius_inches("25%", &rect), 0.25);
        assert_eq!(border_radius_inches("18pt", &rect), 0.25);
    }

    #[test]
    fn text_helpers() {
        assert_eq!(first_font_family("\"Segoe UI\", Arial, sans-serif"), "Segoe UI");
        assert!(is_bold("700", "Arial"));
        assert!(!is_bold("700", "Impact, sans-serif"));
        assert!(!is_bold("400", "Arial"));
        assert_eq!(apply_text_transform("hello big world", "capitalize"), "Hello Big World");
        assert_eq!(collapse_whitespace("a \n\t b"), "a b");
        assert_eq!(extract_url("url(\"file:///tmp/bg.png\")").as_deref(), Some("file:///tmp/bg.png"));
        assert_eq!(text_align("start"), Some(TextAlign::Left));
        assert_eq!(split_top_level("rgb(0, 0, 0) 1px, red 2px"), vec!["rgb(0, 0, 0) 1px", "red 2px"]);
    }
}
