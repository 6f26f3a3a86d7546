//! CSS `linear-gradient()` / `radial-gradient()` parsing and PNG rendering,
//! for slide backgrounds a presentation cannot express natively.

use std::io::Cursor;

use image::{ImageFormat, Rgba as Pixel, RgbaImage};

use crate::errors::{ConversionError, Result};
use crate::extract::css::{parse_color, split_top_level, Rgba};

/// Whether a `background-image` value paints a CSS gradient.
pub fn is_gradient(value: &str) -> bool {
    value.contains("linear-gradient(") || value.contains("radial-gradient(")
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColorStop {
    pub color: Rgba,
    /// Offset along the gradient line, `0.0..=1.0`.
    pub position: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RadialShape {
    Circle,
    Ellipse,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Gradient {
    /// `angle` in degrees, CSS convention: 0 points up, 90 points right.
    Linear { angle: f64, stops: Vec<ColorStop> },
    /// Center as fractions of the box; farthest-corner sizing.
    Radial {
        shape: RadialShape,
        center: (f64, f64),
        stops: Vec<ColorStop>,
    },
}

impl Gradient {
    /// Parses the first gradient in a `background-image` value.
    pub fn parse(value: &str) -> Result<Self> {
        let unsupported = || ConversionError::Gradient(value.to_string());
        let (radial, args) = if let Some(args) = function_body(value, "linear-gradient(") {
            (false, args)
        } else if let Some(args) = function_body(value, "radial-gradient(") {
            (true, args)
        } else {
            return Err(unsupported());
        };

        let mut parts = split_top_level(args);
        if parts.is_empty() {
            return Err(unsupported());
        }
        let first = parts[0];
        let gradient = if radial {
            let (shape, center) = match parse_stop(first) {
                Some(_) => (RadialShape::Ellipse, (0.5, 0.5)),
                None => {
                    parts.remove(0);
                    parse_radial_prelude(first)
                }
            };
            Gradient::Radial {
                shape,
                center,
                stops: resolve_stops(&parts).ok_or_else(unsupported)?,
            }
        } else {
            let angle = match parse_angle(first) {
                Some(angle) => {
                    parts.remove(0);
                    angle
                }
                None => 180.0,
            };
            Gradient::Linear {
                angle,
                stops: resolve_stops(&parts).ok_or_else(unsupported)?,
            }
        };
        Ok(gradient)
    }

    pub fn stops(&self) -> &[ColorStop] {
        match self {
            Gradient::Linear { stops, .. } | Gradient::Radial { stops, .. } => stops,
        }
    }

    pub fn render(&self, width: u32, height: u32) -> RgbaImage {
        let (w, h) = (width.max(1) as f64, height.max(1) as f64);
        match self {
            Gradient::Linear { angle, stops } => {
                let radians = angle.to_radians();
                let (dx, dy) = (radians.sin(), -radians.cos());
                let length = (w * dx).abs() + (h * dy).abs();
                RgbaImage::from_fn(width.max(1), height.max(1), |x, y| {
                    let px = x as f64 + 0.5 - w / 2.0;
                    let py = y as f64 + 0.5 - h / 2.0;
                    let t = if length > 0.0 { (px * dx + py * dy) / length + 0.5 } else { 0.0 };
                    to_pixel(color_at(stops, t))
                })
            }
            Gradient::Radial { shape, center, stops } => {
                let (cx, cy) = (center.0 * w, center.1 * h);
                let far_x = cx.max(w - cx);
                let far_y = cy.max(h - cy);
                let (rx, ry) = match shape {
                    RadialShape::Circle => {
                        let r = far_x.hypot(far_y);
                        (r, r)
                    }
                    RadialShape::Ellipse => (far_x * std::f64::consts::SQRT_2, far_y * std::f64::consts::SQRT_2),
                };
                RgbaImage::from_fn(width.max(1), height.max(1), |x, y| {
                    let nx = (x as f64 + 0.5 - cx) / rx.max(f64::EPSILON);
                    let ny = (y as f64 + 0.5 - cy) / ry.max(f64::EPSILON);
                    to_pixel(color_at(stops, nx.hypot(ny)))
                })
            }
        }
    }

    pub fn to_png(&self, width: u32, height: u32) -> Result<Vec<u8>> {
        let mut bytes = Cursor::new(Vec::new());
        self.render(width, height).write_to(&mut bytes, ImageFormat::Png)?;
        Ok(bytes.into_inner())
    }
}

/// Content between `prefix` and its matching close paren.
fn function_body<'a>(value: &'a str, prefix: &str) -> Option<&'a str> {
    let start = value.find(prefix)? + prefix.len();
    let mut depth = 1usize;
    for (offset, c) in value[start..].char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&value[start..start + offset]);
                }
            }
            _ => {}
        }
    }
    None
}

fn parse_angle(part: &str) -> Option<f64> {
    let part = part.trim();
    if let Some(direction) = part.strip_prefix("to ") {
        let mut words: Vec<&str> = direction.split_whitespace().collect();
        words.sort_unstable();
        return Some(match words.as_slice() {
            ["top"] => 0.0,
            ["right"] => 90.0,
            ["bottom"] => 180.0,
            ["left"] => 270.0,
            ["right", "top"] => 45.0,
            ["bottom", "right"] => 135.0,
            ["bottom", "left"] => 225.0,
            ["left", "top"] => 315.0,
            _ => return None,
        });
    }
    let number = |suffix: &str| part.strip_suffix(suffix).and_then(|n| n.trim().parse::<f64>().ok());
    if let Some(deg) = number("deg") {
        return Some(deg);
    }
    if let Some(turn) = number("turn") {
        return Some(turn * 360.0);
    }
    if let Some(grad) = number("grad") {
        return Some(grad * 0.9);
    }
    number("rad").map(f64::to_degrees)
}

fn parse_radial_prelude(part: &str) -> (RadialShape, (f64, f64)) {
    let shape = if part.contains("circle") {
        RadialShape::Circle
    } else {
        RadialShape::Ellipse
    };
    let center = part
        .split_once(" at ")
        .or_else(|| part.strip_prefix("at ").map(|rest| ("", rest)))
        .map_or((0.5, 0.5), |(_, position)| {
            let mut coords = position.split_whitespace().map(keyword_or_percent);
            let x = coords.next().flatten().unwrap_or(0.5);
            let y = coords.next().flatten().unwrap_or(0.5);
            (x, y)
        });
    (shape, center)
}

fn keyword_or_percent(token: &str) -> Option<f64> {
    match token {
        "left" | "top" => Some(0.0),
        "center" => Some(0.5),
        "right" | "bottom" => Some(1.0),
        other => other.strip_suffix('%')?.parse::<f64>().ok().map(|p| p / 100.0),
    }
}

/// One `color [position]` entry. Only percentage positions are honored.
fn parse_stop(part: &str) -> Option<(Rgba, Option<f64>)> {
    let part = part.trim();
    let (color, rest) = match part.find(')') {
        Some(end) if part.starts_with("rgb") || part.starts_with("hsl") => (&part[..=end], &part[end + 1..]),
        _ => match part.split_once(char::is_whitespace) {
            Some((color, rest)) => (color, rest),
            None => (part, ""),
        },
    };
    let color = parse_color(color)?;
    let position = rest
        .split_whitespace()
        .next()
        .and_then(|token| token.strip_suffix('%'))
        .and_then(|pct| pct.parse::<f64>().ok())
        .map(|pct| (pct / 100.0).clamp(0.0, 1.0));
    Some((color, position))
}

/// Parses stops and fills in missing positions the way CSS does: ends
/// default to 0 and 1, gaps are spread evenly, positions never decrease.
fn resolve_stops(parts: &[&str]) -> Option<Vec<ColorStop>> {
    let parsed: Vec<(Rgba, Option<f64>)> = parts.iter().map(|part| parse_stop(part)).collect::<Option<_>>()?;
    if parsed.len() < 2 {
        return None;
    }
    let mut positions: Vec<Option<f64>> = parsed.iter().map(|(_, pos)| *pos).collect();
    let last = positions.len() - 1;
    positions[0] = positions[0].or(Some(0.0));
    positions[last] = positions[last].or(Some(1.0));

    let mut index = 0;
    while index < last {
        let next_known = (index + 1..=last).find(|i| positions[*i].is_some()).unwrap_or(last);
        let start = positions[index].unwrap_or(0.0);
        let end = positions[next_known].unwrap_or(1.0);
        let gap = (next_known - index) as f64;
        for between in index + 1..next_known {
            positions[between] = Some(start + (end - start) * (between - index) as f64 / gap);
        }
        index = next_known;
    }

    let mut floor = 0.0f64;
    Some(
        parsed
            .into_iter()
            .zip(positions)
            .map(|((color, _), position)| {
                floor = floor.max(position.unwrap_or(floor));
                ColorStop { color, position: floor }
            })
            .collect(),
    )
}

fn color_at(stops: &[ColorStop], t: f64) -> Rgba {
    let Some(first) = stops.first() else {
        return Rgba::TRANSPARENT;
    };
    if t <= first.position {
        return first.color;
    }
    for pair in stops.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        if t <= b.position {
            let span = b.position - a.position;
            let f = if span > 0.0 { (t - a.position) / span } else { 1.0 };
            return mix(a.color, b.color, f);
        }
    }
    stops[stops.len() - 1].color
}

fn mix(a: Rgba, b: Rgba, f: f64) -> Rgba {
    let lerp = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * f).round().clamp(0.0, 255.0) as u8;
    Rgba {
        rgb: crate::models::colors::RgbColor::new(
            lerp(a.rgb.red, b.rgb.red),
            lerp(a.rgb.green, b.rgb.green),
            lerp(a.rgb.blue, b.rgb.blue),
        ),
        alpha: a.alpha + (b.alpha - a.alpha) * f,
    }
}

fn to_pixel(color: Rgba) -> Pixel<u8> {
    Pixel([
        color.rgb.red,
        color.rgb.green,
        color.rgb.blue,
        (color.alpha * 255.0).round().clamp(0.0, 255.0) as u8,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_gradients() {
        assert!(is_gradient("linear-gradient(rgb(0, 0, 0), rgb(255, 255, 255))"));
        assert!(is_gradient("radial-gradient(circle, red, blue)"));
        assert!(!is_gradient("url(\"bg.png\")"));
        assert!(!is_gradient("none"));
    }

    #[test]
    fn parses_direction_and_fills_positions() {
        let gradient = Gradient::parse("linear-gradient(to right, rgb(255, 0, 0), rgba(0, 255, 0, 0.5) 25%, #00f)").unwrap();
        let Gradient::Linear { angle, stops } = &gradient else {
            panic!("expected linear")
        };
        assert_eq!(*angle, 90.0);
        let positions: Vec<f64> = stops.iter().map(|s| s.position).collect();
        assert_eq!(positions, vec![0.0, 0.25, 1.0]);
        assert_eq!(stops[1].color.alpha, 0.5);

        let even = Gradient::parse("linear-gradient(135deg, red, white, blue, black)").unwrap();
        let positions: Vec<f64> = even.stops().iter().map(|s| (s.position * 3.0).round()).collect();
        assert_eq!(positions, vec![0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn rejects_unparseable_gradients() {
        assert!(matches!(
            Gradient::parse("conic-gradient(red, blue)"),
            Err(ConversionError::Gradient(_))
        ));
        assert!(Gradient::parse("linear-gradient(90deg, red)").is_err());
    }

    #[test]
    fn linear_render_runs_from_start_to_end_color() {
        let gradient = Gradient::parse("linear-gradient(90deg, rgb(255, 0, 0), rgb(0, 0, 255))").unwrap();
        let image = gradient.render(100, 10);
        let left = image.get_pixel(0, 5);
        let right = image.get_pixel(99, 5);
        assert!(left[0] > 250 && left[2] < 5);
        assert!(right[2] > 250 && right[0] < 5);
        assert_eq!(left[3], 255);
    }

    #[test]
    fn radial_render_is_start_color_at_center() {
        let gradient = Gradient::parse("radial-gradient(circle at 50% 50%, white, black)").unwrap();
        let image = gradient.render(101, 101);
        assert!(image.get_pixel(50, 50)[0] > 250);
        assert!(image.get_pixel(0, 0)[0] < 80);
    }

    #[test]
    fn encodes_png() {
        let gradient = Gradient::parse("linear-gradient(red, blue)").unwrap();
        let bytes = gradient.to_png(8, 8).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
    }
}
