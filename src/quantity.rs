//! # Quantity Normalizer
//!
//! Converts the noisy quantity notation found in recipes into decimals, and decimals
//! back into the fraction strings cooks expect to read.
//!
//! ## Supported input formats
//!
//! - Integers and decimals: "2", "1.5", ".5"
//! - Unicode vulgar fractions: "½", "1½", "1 ¾"
//! - Mixed numbers and bare fractions: "1 1/2", "3/4", "3⁄4"
//! - Ranges, collapsed to their lower bound: "2-3", "1–2"
//!
//! ## Usage
//!
//! ```rust
//! use safe_eats::quantity::{format_quantity, parse_quantity};
//!
//! assert_eq!(parse_quantity("1 1/2"), Some(1.5));
//! assert_eq!(format_quantity(0.75), "3/4");
//! ```

use crate::measurement_patterns::UNICODE_FRACTIONS;
use log::trace;
use regex::Regex;
use std::sync::LazyLock;

/// Regex patterns for the quantity formats, tried in order
static QUANTITY_PATTERNS: LazyLock<QuantityPatterns> = LazyLock::new(QuantityPatterns::new);

/// Compiled regex patterns for parsing
struct QuantityPatterns {
    /// Matches mixed numbers: "1 1/2"
    mixed: Regex,
    /// Matches bare fractions: "1/2", "3⁄4"
    fraction: Regex,
    /// Matches a whole number followed by a substituted glyph: "1 0.5"
    whole_and_glyph: Regex,
    /// Matches ranges: "2-3", "1.5 – 2"
    range: Regex,
    /// Matches the numeric prefix of a literal: "2", "2.5", ".5"
    leading_number: Regex,
}

impl QuantityPatterns {
    fn new() -> Self {
        Self {
            mixed: Regex::new(r"^([0-9]+)\s+([0-9]+)[/⁄]([0-9]+)$").unwrap(),
            fraction: Regex::new(r"^([0-9]+)[/⁄]([0-9]+)$").unwrap(),
            whole_and_glyph: Regex::new(r"^([0-9]+)\s+(0\.[0-9]+)$").unwrap(),
            range: Regex::new(r"^([0-9]+(?:\.[0-9]+)?)\s*[-–]\s*[0-9]+(?:\.[0-9]+)?$").unwrap(),
            leading_number: Regex::new(r"^(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)").unwrap(),
        }
    }
}

/// Parse a textual quantity into a decimal
///
/// Returns `None` for empty or unparseable text, zero denominators and values that do
/// not fit in a finite `f64`. Only ASCII digits count as digits.
///
/// A zero denominator makes the whole quantity unreadable: `"1/0"`, `"2 1/0"` and `"0/0"`
/// all give `None` rather than treating the denominator as 1.
pub fn parse_quantity(text: &str) -> Option<f64> {
    let mut normalized = text.trim().to_string();
    if normalized.is_empty() {
        return None;
    }

    for (glyph, value) in UNICODE_FRACTIONS.iter() {
        if normalized.contains(*glyph) {
            normalized = normalized.replace(*glyph, &format!(" {value}"));
        }
    }
    let normalized = normalized.trim();

    let value = parse_normalized(normalized);
    trace!("Parsed quantity '{}' -> {:?}", text, value);
    value.filter(|v| v.is_finite() && *v >= 0.0)
}

fn parse_normalized(text: &str) -> Option<f64> {
    let patterns = &*QUANTITY_PATTERNS;

    if let Some(captures) = patterns.mixed.captures(text) {
        let whole: f64 = captures[1].parse().ok()?;
        return divide(&captures[2], &captures[3]).map(|fraction| whole + fraction);
    }

    if let Some(captures) = patterns.fraction.captures(text) {
        return divide(&captures[1], &captures[2]);
    }

    if let Some(captures) = patterns.whole_and_glyph.captures(text) {
        let whole: f64 = captures[1].parse().ok()?;
        let fraction: f64 = captures[2].parse().ok()?;
        return Some(whole + fraction);
    }

    if let Some(captures) = patterns.range.captures(text) {
        return captures[1].parse().ok();
    }

    // Anything else: the numeric prefix, if there is one ("2%", "350°F")
    patterns
        .leading_number
        .find(text)
        .and_then(|m| m.as_str().parse().ok())
}

fn divide(numerator: &str, denominator: &str) -> Option<f64> {
    let numerator: f64 = numerator.parse().ok()?;
    let denominator: f64 = denominator.parse().ok()?;
    if denominator == 0.0 {
        return None;
    }
    Some(numerator / denominator)
}

/// Format a decimal as a cooking quantity, rounded to the nearest quarter
///
/// # Examples
///
/// ```rust
/// use safe_eats::quantity::format_quantity;
///
/// assert_eq!(format_quantity(0.25), "1/4");
/// assert_eq!(format_quantity(1.0), "1");
/// assert_eq!(format_quantity(1.5), "1 1/2");
/// assert_eq!(format_quantity(2.2), "2 1/4");
/// ```
pub fn format_quantity(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }

    let rounded = (value * 4.0).round() / 4.0;
    if rounded == 0.0 {
        return "0".to_string();
    }

    let whole = rounded.floor();
    let fraction = rounded - whole;
    let approx = (fraction * 100.0).round() / 100.0;

    let glyph = if approx == 0.0 {
        return format!("{whole}");
    } else if approx == 0.25 {
        "1/4"
    } else if approx == 0.5 {
        "1/2"
    } else if approx == 0.75 {
        "3/4"
    } else if (0.32..=0.35).contains(&approx) {
        "1/3"
    } else if (0.65..=0.68).contains(&approx) {
        "2/3"
    } else {
        return format_decimal(rounded);
    };

    if whole == 0.0 {
        glyph.to_string()
    } else {
        format!("{whole} {glyph}")
    }
}

/// At most two fractional digits, no trailing zeros
fn format_decimal(value: f64) -> String {
    let text = format!("{value:.2}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_numbers() {
        assert_eq!(parse_quantity("2"), Some(2.0));
        assert_eq!(parse_quantity("2.5"), Some(2.5));
        assert_eq!(parse_quantity(".5"), Some(0.5));
        assert_eq!(parse_quantity("  3  "), Some(3.0));
    }

    #[test]
    fn test_parse_fractions() {
        assert_eq!(parse_quantity("1 1/2"), Some(1.5));
        assert_eq!(parse_quantity("1/2"), Some(0.5));
        assert_eq!(parse_quantity("3⁄4"), Some(0.75));
        assert_eq!(parse_quantity("2 1/4"), Some(2.25));
    }

    #[test]
    fn test_parse_unicode_fractions() {
        assert_eq!(parse_quantity("¾"), Some(0.75));
        assert_eq!(parse_quantity("½"), Some(0.5));
        assert_eq!(parse_quantity("1½"), Some(1.5));
        assert_eq!(parse_quantity("2 ¼"), Some(2.25));

        let third = parse_quantity("⅓").unwrap();
        assert!((third - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_parse_ranges_use_lower_bound() {
        assert_eq!(parse_quantity("2-3"), Some(2.0));
        assert_eq!(parse_quantity("1–2"), Some(1.0));
        assert_eq!(parse_quantity("1.5 - 2"), Some(1.5));
    }

    #[test]
    fn test_parse_numeric_prefix() {
        assert_eq!(parse_quantity("2%"), Some(2.0));
        assert_eq!(parse_quantity("350°F"), Some(350.0));
        assert_eq!(parse_quantity("2 3"), Some(2.0));
    }

    #[test]
    fn test_parse_unparseable() {
        assert_eq!(parse_quantity("banana"), None);
        assert_eq!(parse_quantity(""), None);
        assert_eq!(parse_quantity("   "), None);
        assert_eq!(parse_quantity("1/0"), None);
        assert_eq!(parse_quantity("2 1/0"), None);
        assert_eq!(parse_quantity("0/0"), None);
        assert_eq!(parse_quantity("(2"), None);
    }

    #[test]
    fn test_parse_ignores_non_ascii_digits() {
        assert_eq!(parse_quantity("٣/٤"), None);
        assert_eq!(parse_quantity("٣"), None);
        assert_eq!(parse_quantity("١ 1/2"), None);
    }

    #[test]
    fn test_parse_rejects_non_finite() {
        let huge = "9".repeat(400);
        assert_eq!(parse_quantity(&huge), None);
    }

    #[test]
    fn test_format_quarters() {
        assert_eq!(format_quantity(0.0), "0");
        assert_eq!(format_quantity(0.25), "1/4");
        assert_eq!(format_quantity(0.5), "1/2");
        assert_eq!(format_quantity(0.75), "3/4");
        assert_eq!(format_quantity(1.0), "1");
        assert_eq!(format_quantity(1.5), "1 1/2");
        assert_eq!(format_quantity(12.0), "12");
    }

    #[test]
    fn test_format_rounds_to_nearest_quarter() {
        assert_eq!(format_quantity(1.0 / 3.0), "1/4");
        assert_eq!(format_quantity(2.0 / 3.0), "3/4");
        assert_eq!(format_quantity(0.1), "0");
        assert_eq!(format_quantity(1.13), "1 1/4");
        assert_eq!(format_quantity(0.375), "1/2");
        assert_eq!(format_quantity(2.0 * 0.75), "1 1/2");
    }

    #[test]
    fn test_format_non_finite() {
        assert_eq!(format_quantity(f64::NAN), "");
        assert_eq!(format_quantity(f64::INFINITY), "");
    }

    #[test]
    fn test_format_decimal_fallback() {
        assert_eq!(format_decimal(1.1), "1.1");
        assert_eq!(format_decimal(2.0), "2");
        assert_eq!(format_decimal(1.257), "1.26");
    }

    #[test]
    fn test_round_trip_is_stable() {
        for step in 0..=40 {
            let value = step as f64 * 0.25;
            let formatted = format_quantity(value);
            let reparsed = parse_quantity(&formatted).unwrap();
            assert_eq!(format_quantity(reparsed), formatted, "value {}", value);
        }
    }
}
