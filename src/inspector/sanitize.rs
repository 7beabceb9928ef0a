//! Color and numeric input sanitizers.
//!
//! Configuration is user input. These helpers never fail: anything they
//! cannot accept is replaced by the caller's default.

// ============================================================================
// Imports
// ============================================================================

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

// ============================================================================
// Constants
// ============================================================================

/// `#rgb` or `#rrggbb`.
static HEX_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#([A-Fa-f0-9]{6}|[A-Fa-f0-9]{3})$").expect("hex color pattern is valid")
});

/// Any `rgb(...)` / `rgba(...)` shape.
static RGB_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^rgba?\([^)]+\)$").expect("rgb color pattern is valid"));

/// Named colors accepted as-is (compared case-insensitively).
pub const NAMED_COLORS: &[&str] = &[
    "red",
    "blue",
    "green",
    "black",
    "white",
    "yellow",
    "orange",
    "purple",
    "pink",
    "gray",
    "transparent",
];

// ============================================================================
// NumberValue
// ============================================================================

/// A loosely typed numeric input, as it arrives from JSON or a host.
///
/// Coerced with the usual number-conversion rules before clamping:
/// booleans become `0`/`1`, text is trimmed and parsed, blank text is `0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberValue {
    /// Numeric input.
    Number(f64),
    /// Boolean input.
    Bool(bool),
    /// Textual input such as `"12"` or `"abc"`.
    Text(String),
}

impl NumberValue {
    /// Converts to a number, `NaN` when the input is not numeric.
    #[must_use]
    pub fn to_number(&self) -> f64 {
        match self {
            NumberValue::Number(n) => *n,
            NumberValue::Bool(b) => f64::from(u8::from(*b)),
            NumberValue::Text(text) => parse_numeric_text(text),
        }
    }
}

fn parse_numeric_text(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    if let Some(hex) = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        return u64::from_str_radix(hex, 16).map_or(f64::NAN, |n| n as f64);
    }
    // Rust also accepts "inf" and "nan", which are not numbers here.
    if trimmed
        .chars()
        .any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E')
    {
        return f64::NAN;
    }
    trimmed.parse().unwrap_or(f64::NAN)
}

impl From<f64> for NumberValue {
    fn from(value: f64) -> Self {
        NumberValue::Number(value)
    }
}

impl From<f32> for NumberValue {
    fn from(value: f32) -> Self {
        NumberValue::Number(f64::from(value))
    }
}

impl From<i32> for NumberValue {
    fn from(value: i32) -> Self {
        NumberValue::Number(f64::from(value))
    }
}

impl From<u32> for NumberValue {
    fn from(value: u32) -> Self {
        NumberValue::Number(f64::from(value))
    }
}

impl From<bool> for NumberValue {
    fn from(value: bool) -> Self {
        NumberValue::Bool(value)
    }
}

impl From<&str> for NumberValue {
    fn from(value: &str) -> Self {
        NumberValue::Text(value.to_string())
    }
}

impl From<String> for NumberValue {
    fn from(value: String) -> Self {
        NumberValue::Text(value)
    }
}

// ============================================================================
// Sanitizers
// ============================================================================

/// Returns `color` if it is a hex, `rgb()`/`rgba()` or allow-listed named
/// color, `default_color` otherwise.
///
/// # Example
///
/// ```ignore
/// assert_eq!(sanitize_color("#abc123", "#ff0000"), "#abc123");
/// assert_eq!(sanitize_color("#zzzzzz", "#ff0000"), "#ff0000");
/// ```
#[must_use]
pub fn sanitize_color(color: &str, default_color: &str) -> String {
    let accepted = HEX_COLOR.is_match(color)
        || RGB_COLOR.is_match(color)
        || NAMED_COLORS
            .iter()
            .any(|named| named.eq_ignore_ascii_case(color));

    if accepted {
        color.to_string()
    } else {
        default_color.to_string()
    }
}

/// Coerces `value` to a number and clamps it into `[min, max]`.
///
/// Non-numeric input yields `default_value`.
///
/// # Example
///
/// ```ignore
/// assert_eq!(sanitize_number(500, 1.0, 10.0, 2.0), 10.0);
/// assert_eq!(sanitize_number("x", 1.0, 10.0, 2.0), 2.0);
/// ```
#[must_use]
pub fn sanitize_number(value: impl Into<NumberValue>, min: f64, max: f64, default_value: f64) -> f64 {
    let number = value.into().to_number();
    if number.is_nan() {
        return default_value;
    }
    number.max(min).min(max)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    #[test]
    fn test_hex_colors() {
        assert_eq!(sanitize_color("#abc123", "#ff0000"), "#abc123");
        assert_eq!(sanitize_color("#ABC", "#ff0000"), "#ABC");
        assert_eq!(sanitize_color("#zzzzzz", "#ff0000"), "#ff0000");
        assert_eq!(sanitize_color("#abcd", "#ff0000"), "#ff0000");
        assert_eq!(sanitize_color("abc123", "#ff0000"), "#ff0000");
    }

    #[test]
    fn test_rgb_colors_are_loosely_accepted() {
        assert_eq!(sanitize_color("rgb(1, 2, 3)", "red"), "rgb(1, 2, 3)");
        assert_eq!(sanitize_color("rgba(0,0,0,0.1)", "red"), "rgba(0,0,0,0.1)");
        assert_eq!(sanitize_color("rgba(anything)", "red"), "rgba(anything)");
        assert_eq!(sanitize_color("rgb()", "red"), "red");
        assert_eq!(sanitize_color("rgb(1,2,3); x", "red"), "red");
    }

    #[test]
    fn test_named_colors() {
        assert_eq!(sanitize_color("Transparent", "red"), "Transparent");
        assert_eq!(sanitize_color("GRAY", "red"), "GRAY");
        assert_eq!(sanitize_color("rebeccapurple", "red"), "red");
        assert_eq!(sanitize_color("", "red"), "red");
    }

    #[test]
    fn test_sanitize_number_clamps() {
        assert_eq!(sanitize_number(500, 1.0, 10.0, 2.0), 10.0);
        assert_eq!(sanitize_number(-3, 1.0, 10.0, 2.0), 1.0);
        assert_eq!(sanitize_number(4.5, 1.0, 10.0, 2.0), 4.5);
    }

    #[test]
    fn test_sanitize_number_non_numeric_falls_back() {
        assert_eq!(sanitize_number("x", 1.0, 10.0, 2.0), 2.0);
        assert_eq!(sanitize_number(f64::NAN, 1.0, 10.0, 2.0), 2.0);
        assert_eq!(sanitize_number("inf", 1.0, 10.0, 2.0), 2.0);
    }

    #[test]
    fn test_number_coercion() {
        assert_eq!(sanitize_number("7", 1.0, 10.0, 2.0), 7.0);
        assert_eq!(sanitize_number(" 3.5 ", 1.0, 10.0, 2.0), 3.5);
        assert_eq!(sanitize_number("", 0.0, 10.0, 2.0), 0.0);
        assert_eq!(sanitize_number(true, 0.0, 10.0, 2.0), 1.0);
        assert_eq!(sanitize_number("0x0A", 0.0, 100.0, 2.0), 10.0);
        assert_eq!(sanitize_number("1e1", 0.0, 100.0, 2.0), 10.0);
        assert_eq!(sanitize_number("Infinity", 0.0, 100.0, 2.0), 100.0);
        assert_eq!(sanitize_number(f64::NEG_INFINITY, 0.0, 100.0, 2.0), 0.0);
    }

    #[test]
    fn test_number_value_deserializes_untagged() {
        let values: Vec<NumberValue> = serde_json::from_str(r#"[3, "4", true]"#).unwrap();
        assert_eq!(
            values,
            vec![
                NumberValue::Number(3.0),
                NumberValue::Text("4".into()),
                NumberValue::Bool(true)
            ]
        );
    }

    proptest! {
        #[test]
        fn prop_sanitized_number_stays_in_range(value in any::<f64>(), lo in -1000.0f64..1000.0, span in 0.0f64..1000.0) {
            let hi = lo + span;
            let out = sanitize_number(value, lo, hi, lo);
            prop_assert!(out >= lo && out <= hi);
        }

        #[test]
        fn prop_in_range_numbers_are_unchanged(value in 1.0f64..=10.0) {
            prop_assert_eq!(sanitize_number(value, 1.0, 10.0, 2.0), value);
        }

        #[test]
        fn prop_six_digit_hex_is_kept(hex in "[0-9a-fA-F]{6}") {
            let color = format!("#{hex}");
            prop_assert_eq!(sanitize_color(&color, "red"), color);
        }
    }
}
