//! Unit conversion between browser pixels and presentation units.
//!
//! These three constants are the only numeric truth for geometry crossing
//! the browser/presentation boundary. Everything else derives from them.

/// Points per CSS pixel (72 pt / 96 px).
pub const PT_PER_PX: f64 = 0.75;
/// CSS pixels per inch.
pub const PX_PER_IN: f64 = 96.0;
/// English Metric Units per inch. 1 EMU = 1/914400 inch.
pub const EMU_PER_IN: f64 = 914400.0;

pub const PT_PER_IN: f64 = PX_PER_IN * PT_PER_PX;

pub fn px_to_pt(px: f64) -> f64 {
    px * PT_PER_PX
}

pub fn px_to_in(px: f64) -> f64 {
    px / PX_PER_IN
}

pub fn pt_to_in(pt: f64) -> f64 {
    pt / PT_PER_IN
}

pub fn in_to_px(inches: f64) -> f64 {
    inches * PX_PER_IN
}

/// Converts inches to EMU, rounding to the nearest whole unit.
pub fn in_to_emu(inches: f64) -> i64 {
    (inches * EMU_PER_IN).round() as i64
}

pub fn emu_to_in(emu: i64) -> f64 {
    emu as f64 / EMU_PER_IN
}

pub fn pt_to_emu(pt: f64) -> i64 {
    in_to_emu(pt_to_in(pt))
}

/// Parses a CSS pixel length such as `"12.5px"` into a number.
/// Unparseable values (`"normal"`, `""`, `"auto"`) yield `None`.
pub fn parse_px(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    let number = trimmed.strip_suffix("px").unwrap_or(trimmed).trim();
    number.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Like [`parse_px`] but treats anything unparseable as zero.
pub fn parse_px_or_zero(value: &str) -> f64 {
    parse_px(value).unwrap_or(0.0)
}

/// Rounds to `digits` decimal places.
pub fn round_to(value: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    (value * factor).round() / factor
}
