//! # Measurement Patterns Module
//!
//! This module contains the regex patterns and constants shared by the quantity
//! normalizer and the ingredient line parser.

use lazy_static::lazy_static;
use regex::Regex;

/// Unicode vulgar fractions and their decimal values
pub const UNICODE_FRACTIONS: [(char, f64); 9] = [
    ('¼', 0.25),
    ('½', 0.5),
    ('¾', 0.75),
    ('⅓', 1.0 / 3.0),
    ('⅔', 2.0 / 3.0),
    ('⅛', 0.125),
    ('⅜', 0.375),
    ('⅝', 0.625),
    ('⅞', 0.875),
];

/// Recognized measurement units (English only, matched case-insensitively on whole tokens)
pub const UNIT_VOCABULARY: &[&str] = &[
    "teaspoon", "teaspoons", "tsp", "tablespoon", "tablespoons", "tbsp",
    "cup", "cups", "ml", "milliliter", "milliliters", "l", "liter", "liters",
    "g", "gram", "grams", "kg", "kilogram", "kilograms",
    "oz", "ounce", "ounces", "lb", "pound", "pounds",
    "clove", "cloves", "slice", "slices", "can", "cans",
    "stick", "sticks", "package", "packages", "pinch", "pinches",
];

lazy_static! {
    /// Leading list marker: hyphen, bullet, asterisk or plus
    pub static ref LIST_MARKER_REGEX: Regex =
        Regex::new(r"^[-\u{2022}*+]\s*").expect("List marker pattern should be valid");

    /// A bare fraction token: "1/2", "3⁄4"
    pub static ref FRACTION_TOKEN_REGEX: Regex =
        Regex::new(r"^[0-9]+[/⁄][0-9]+$").expect("Fraction token pattern should be valid");

    /// A range token: "2-3", "1.5–2"
    pub static ref RANGE_TOKEN_REGEX: Regex =
        Regex::new(r"^[0-9]+(?:\.[0-9]+)?\s*[-–]\s*[0-9]+(?:\.[0-9]+)?$").expect("Range token pattern should be valid");
}

/// Check whether a token contains one of the unicode fraction glyphs
pub fn contains_unicode_fraction(token: &str) -> bool {
    token
        .chars()
        .any(|c| UNICODE_FRACTIONS.iter().any(|(glyph, _)| *glyph == c))
}

/// Look up a token in the unit vocabulary, ignoring case
pub fn is_unit(token: &str) -> bool {
    UNIT_VOCABULARY
        .iter()
        .any(|unit| unit.eq_ignore_ascii_case(token))
}
