//! Value interpolation for animated properties.
//!
//! Property values are either plain numbers or strings. Strings may carry a
//! unit (`"10px"`), a color (`"#ff0000"`, `"rgb(255, 0, 0)"`, `"hsl(0, 100%, 50%)"`)
//! or a single transform call (`"rotate(45deg)"`). [`interpolate`] picks the
//! first rule that matches both endpoints and falls back to a discrete step at
//! the halfway point when the shapes don't line up.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

/// A property value: a number or a CSS-like string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Text(String),
}

impl Value {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Text(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Number(_) => None,
            Value::Text(s) => Some(s),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

/// RGBA color with float channels; r, g, b in `0..=255`, alpha in `0..=1`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Parse hex, `rgb()`/`rgba()` or `hsl()`/`hsla()` notation
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if let Some(hex) = input.strip_prefix('#') {
            return Self::from_hex(hex);
        }

        let caps = color_function_regex().captures(input)?;
        let function = caps[1].to_ascii_lowercase();
        let args: Vec<&str> = caps[2]
            .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .collect();
        if args.len() < 3 || args.len() > 4 {
            return None;
        }

        let alpha = match args.get(3) {
            Some(raw) => parse_alpha(raw)?,
            None => 1.0,
        };

        match function.as_str() {
            "rgb" | "rgba" => Some(Self::new(
                parse_channel(args[0])?,
                parse_channel(args[1])?,
                parse_channel(args[2])?,
                alpha,
            )),
            "hsl" | "hsla" => {
                let hue = args[0].trim_end_matches("deg").parse::<f64>().ok()?;
                let saturation = parse_percent(args[1])?;
                let lightness = parse_percent(args[2])?;
                let (r, g, b) = hsl_to_rgb(hue, saturation, lightness);
                Some(Self::new(r, g, b, alpha))
            }
            _ => None,
        }
    }

    fn from_hex(hex: &str) -> Option<Self> {
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let expanded: String = match hex.len() {
            3 => hex.chars().flat_map(|c| [c, c]).collect(),
            6 | 8 => hex.to_string(),
            _ => return None,
        };
        let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).ok().map(f64::from);
        let alpha = if expanded.len() == 8 {
            channel(6)? / 255.0
        } else {
            1.0
        };
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?, alpha))
    }

    /// Channel-wise blend; r, g, b are rounded to whole numbers, alpha is not
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        Self {
            r: lerp(self.r, other.r, t).round(),
            g: lerp(self.g, other.g, t).round(),
            b: lerp(self.b, other.b, t).round(),
            a: lerp(self.a, other.a, t),
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

fn parse_channel(raw: &str) -> Option<f64> {
    if let Some(percent) = raw.strip_suffix('%') {
        return percent.parse::<f64>().ok().map(|p| (p / 100.0 * 255.0).clamp(0.0, 255.0));
    }
    raw.parse::<f64>().ok().map(|v| v.clamp(0.0, 255.0))
}

fn parse_alpha(raw: &str) -> Option<f64> {
    if let Some(percent) = raw.strip_suffix('%') {
        return percent.parse::<f64>().ok().map(|p| (p / 100.0).clamp(0.0, 1.0));
    }
    raw.parse::<f64>().ok().map(|v| v.clamp(0.0, 1.0))
}

fn parse_percent(raw: &str) -> Option<f64> {
    raw.trim_end_matches('%')
        .parse::<f64>()
        .ok()
        .map(|p| (p / 100.0).clamp(0.0, 1.0))
}

fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> (f64, f64, f64) {
    let h = hue.rem_euclid(360.0);
    let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = lightness - c / 2.0;

    let (r, g, b) = if h < 60.0 {
        (c, x, 0.0)
    } else if h < 120.0 {
        (x, c, 0.0)
    } else if h < 180.0 {
        (0.0, c, x)
    } else if h < 240.0 {
        (0.0, x, c)
    } else if h < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    (
        ((r + m) * 255.0).round(),
        ((g + m) * 255.0).round(),
        ((b + m) * 255.0).round(),
    )
}

fn unit_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([+-]?[\d.]+)([a-zA-Z%]*)$").expect("unit pattern is valid"))
}

fn color_function_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?i)(rgba?|hsla?)\(\s*([^)]*)\)$").expect("color pattern is valid")
    })
}

fn transform_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*([a-zA-Z][a-zA-Z0-9]*)\(\s*([+-]?[\d.]+)([a-zA-Z%]*)\s*\)\s*$")
            .expect("transform pattern is valid")
    })
}

const TRANSFORM_KEYWORDS: &[&str] = &["translate", "rotate", "scale"];

/// A number with its unit suffix, e.g. `("10", "px")` for `"10px"`
fn split_unit(input: &str) -> Option<(f64, &str)> {
    let caps = unit_regex().captures(input.trim())?;
    let number = caps.get(1)?.as_str().parse::<f64>().ok()?;
    Some((number, caps.get(2)?.as_str()))
}

/// A single transform call, e.g. `("rotate", 45.0, "deg")`
fn split_transform(input: &str) -> Option<(&str, f64, &str)> {
    let caps = transform_regex().captures(input)?;
    let number = caps.get(2)?.as_str().parse::<f64>().ok()?;
    Some((caps.get(1)?.as_str(), number, caps.get(3)?.as_str()))
}

fn has_transform_keyword(input: &str) -> bool {
    TRANSFORM_KEYWORDS.iter().any(|keyword| input.contains(keyword))
}

fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Interpolate between two property values.
///
/// Rules, first match wins:
/// 1. two numbers blend linearly
/// 2. two unit strings with the same unit blend their numeric part
/// 3. two colors blend per channel and render as `rgba(r, g, b, a)`
/// 4. two single transform calls with the same function and unit blend their argument
/// 5. anything else steps from `from` to `to` at `progress == 0.5`
pub fn interpolate(from: &Value, to: &Value, progress: f64) -> Value {
    match (from, to) {
        (Value::Number(a), Value::Number(b)) => Value::Number(lerp(*a, *b, progress)),
        (Value::Text(a), Value::Text(b)) => interpolate_text(a, b, progress)
            .unwrap_or_else(|| discrete(from, to, progress)),
        _ => discrete(from, to, progress),
    }
}

fn interpolate_text(from: &str, to: &str, progress: f64) -> Option<Value> {
    if let (Some((a, unit_a)), Some((b, unit_b))) = (split_unit(from), split_unit(to)) {
        if unit_a == unit_b {
            return Some(Value::Text(format!("{}{}", lerp(a, b, progress), unit_a)));
        }
        return None;
    }

    if let (Some(a), Some(b)) = (Rgba::parse(from), Rgba::parse(to)) {
        return Some(Value::Text(a.lerp(&b, progress).to_string()));
    }

    if has_transform_keyword(from) && has_transform_keyword(to) {
        let (func_a, a, unit_a) = split_transform(from)?;
        let (func_b, b, unit_b) = split_transform(to)?;
        if func_a == func_b && unit_a == unit_b {
            return Some(Value::Text(format!("{}({}{})", func_a, lerp(a, b, progress), unit_a)));
        }
    }

    None
}

fn discrete(from: &Value, to: &Value, progress: f64) -> Value {
    if progress < 0.5 {
        from.clone()
    } else {
        to.clone()
    }
}

/// Interpolate across an ordered list of waypoints.
///
/// `N + 1` waypoints split `[0, 1]` into `N` equal segments; the segment under
/// `progress` is blended with [`interpolate`]. A single waypoint is returned
/// as is; an empty list yields `None`.
pub fn interpolate_steps(waypoints: &[Value], progress: f64) -> Option<Value> {
    match waypoints {
        [] => None,
        [only] => Some(only.clone()),
        _ => {
            let segments = waypoints.len() - 1;
            let width = 1.0 / segments as f64;
            let index = ((progress / width).floor().max(0.0) as usize).min(segments - 1);
            let local = (progress - index as f64 * width) / width;
            Some(interpolate(&waypoints[index], &waypoints[index + 1], local))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Value {
        Value::from(s)
    }

    #[test]
    fn test_number_interpolation() {
        assert_eq!(interpolate(&0.0.into(), &10.0.into(), 0.0), Value::Number(0.0));
        assert_eq!(interpolate(&0.0.into(), &10.0.into(), 0.5), Value::Number(5.0));
        assert_eq!(interpolate(&0.0.into(), &10.0.into(), 1.0), Value::Number(10.0));
        // Overshooting progress extrapolates
        assert_eq!(interpolate(&0.0.into(), &10.0.into(), 1.5), Value::Number(15.0));
    }

    #[test]
    fn test_unit_interpolation() {
        assert_eq!(interpolate(&text("10px"), &text("20px"), 0.5), text("15px"));
        assert_eq!(interpolate(&text("10px"), &text("20px"), 0.0), text("10px"));
        assert_eq!(interpolate(&text("10px"), &text("20px"), 1.0), text("20px"));
        assert_eq!(interpolate(&text("0deg"), &text("90deg"), 0.25), text("22.5deg"));
        assert_eq!(interpolate(&text("-10%"), &text("10%"), 0.5), text("0%"));
    }

    #[test]
    fn test_unit_mismatch_steps() {
        assert_eq!(interpolate(&text("10px"), &text("20%"), 0.3), text("10px"));
        assert_eq!(interpolate(&text("10px"), &text("20%"), 0.5), text("20%"));
    }

    #[test]
    fn test_shape_mismatch_steps() {
        assert_eq!(interpolate(&0.0.into(), &text("100px"), 0.49), Value::Number(0.0));
        assert_eq!(interpolate(&0.0.into(), &text("100px"), 0.5), text("100px"));
        assert_eq!(interpolate(&text("auto"), &text("none"), 0.7), text("none"));
    }

    #[test]
    fn test_color_parsing() {
        assert_eq!(Rgba::parse("#f00"), Some(Rgba::new(255.0, 0.0, 0.0, 1.0)));
        assert_eq!(Rgba::parse("#00ff00"), Some(Rgba::new(0.0, 255.0, 0.0, 1.0)));
        assert_eq!(Rgba::parse("#0000ff80").map(|c| c.b), Some(255.0));
        assert_eq!(Rgba::parse("rgb(1, 2, 3)"), Some(Rgba::new(1.0, 2.0, 3.0, 1.0)));
        assert_eq!(Rgba::parse("rgba(1, 2, 3, 0.5)"), Some(Rgba::new(1.0, 2.0, 3.0, 0.5)));
        assert_eq!(Rgba::parse("hsl(120, 100%, 50%)"), Some(Rgba::new(0.0, 255.0, 0.0, 1.0)));
        assert_eq!(
            Rgba::parse("hsla(240, 100%, 50%, 0.25)"),
            Some(Rgba::new(0.0, 0.0, 255.0, 0.25))
        );
        assert_eq!(Rgba::parse("#ggg"), None);
        assert_eq!(Rgba::parse("#12345"), None);
        assert_eq!(Rgba::parse("cmyk(1, 2, 3)"), None);
    }

    #[test]
    fn test_color_interpolation() {
        let red = text("#ff0000");
        let blue = text("rgb(0, 0, 255)");
        assert_eq!(interpolate(&red, &blue, 0.5), text("rgba(128, 0, 128, 1)"));
        assert_eq!(interpolate(&red, &blue, 0.0), text("rgba(255, 0, 0, 1)"));
        assert_eq!(interpolate(&red, &blue, 1.0), text("rgba(0, 0, 255, 1)"));

        let faded = interpolate(&text("rgba(0, 0, 0, 0)"), &text("#000"), 0.25);
        assert_eq!(faded, text("rgba(0, 0, 0, 0.25)"));
    }

    #[test]
    fn test_transform_interpolation() {
        assert_eq!(
            interpolate(&text("rotate(0deg)"), &text("rotate(90deg)"), 0.5),
            text("rotate(45deg)")
        );
        assert_eq!(
            interpolate(&text("translateX(0px)"), &text("translateX(-100px)"), 0.25),
            text("translateX(-25px)")
        );
        assert_eq!(interpolate(&text("scale(1)"), &text("scale(2)"), 0.5), text("scale(1.5)"));
    }

    #[test]
    fn test_transform_mismatch_steps() {
        // Different functions
        assert_eq!(
            interpolate(&text("rotate(0deg)"), &text("scale(2)"), 0.2),
            text("rotate(0deg)")
        );
        // Different units
        assert_eq!(
            interpolate(&text("rotate(0deg)"), &text("rotate(1turn)"), 0.2),
            text("rotate(0deg)")
        );
        // Multiple transform calls are not blended
        let from = text("translateX(0px) rotate(0deg)");
        let to = text("translateX(10px) rotate(90deg)");
        assert_eq!(interpolate(&from, &to, 0.4), from);
        assert_eq!(interpolate(&from, &to, 0.6), to);
    }

    #[test]
    fn test_interpolate_steps() {
        let points: Vec<Value> = vec![0.0.into(), 50.0.into(), 100.0.into()];
        assert_eq!(interpolate_steps(&points, 0.0), Some(Value::Number(0.0)));
        assert_eq!(interpolate_steps(&points, 0.25), Some(Value::Number(25.0)));
        assert_eq!(interpolate_steps(&points, 0.5), Some(Value::Number(50.0)));
        assert_eq!(interpolate_steps(&points, 0.75), Some(Value::Number(75.0)));
        assert_eq!(interpolate_steps(&points, 1.0), Some(Value::Number(100.0)));
    }

    #[test]
    fn test_interpolate_steps_edges() {
        assert_eq!(interpolate_steps(&[], 0.5), None);
        assert_eq!(interpolate_steps(&[text("5px")], 0.9), Some(text("5px")));

        let points = vec![text("0px"), text("10px"), text("0px")];
        assert_eq!(interpolate_steps(&points, 0.5), Some(text("10px")));
        // Overshoot past the end extrapolates the last segment
        assert_eq!(interpolate_steps(&points, 1.25), Some(text("-5px")));
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Number(15.0).to_string(), "15");
        assert_eq!(Value::Number(0.5).to_string(), "0.5");
        assert_eq!(text("10px").to_string(), "10px");
    }
}
