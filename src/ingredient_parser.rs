//! # Ingredient Parser
//!
//! This module splits a raw ingredient line into quantity, unit, name and note.
//! It never fails: garbage or empty input still yields a complete record.
//!
//! ## Features
//!
//! - Strip a leading list marker ("-", "•", "*", "+")
//! - Handle fractions (1/2, 2 1/4, ½, 1½) and ranges (2-3, 1–2)
//! - Recognize a unit from a fixed English vocabulary
//! - Split a trailing note off the name at the first comma
//!
//! ## Usage
//!
//! ```rust
//! use safe_eats::ingredient_parser::parse_line;
//!
//! let parsed = parse_line("- 1 1/2 cups butter, softened");
//!
//! assert_eq!(parsed.quantity, Some(1.5));
//! assert_eq!(parsed.unit, "cups");
//! assert_eq!(parsed.name, "butter");
//! assert_eq!(parsed.note, "softened");
//! ```

use crate::ingredient_model::ParsedIngredientLine;
use crate::measurement_patterns::{
    contains_unicode_fraction, is_unit, FRACTION_TOKEN_REGEX, LIST_MARKER_REGEX, RANGE_TOKEN_REGEX,
};
use crate::quantity::parse_quantity;
use crate::text_processing::normalize_whitespace;
use log::{debug, trace};

/// Parse every non-blank line of a multi-line text
pub fn parse_ingredient_list(text: &str) -> Vec<ParsedIngredientLine> {
    let lines: Vec<ParsedIngredientLine> = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(parse_line)
        .collect();

    debug!("Parsed {} ingredient lines", lines.len());
    lines
}

/// Parse a single ingredient line
pub fn parse_line(raw: &str) -> ParsedIngredientLine {
    let without_marker = LIST_MARKER_REGEX.replace(raw.trim_start(), "");
    let cleaned = normalize_whitespace(&without_marker);
    let tokens: Vec<&str> = cleaned.split(' ').filter(|t| !t.is_empty()).collect();

    let quantity_len = tokens.iter().take_while(|t| is_quantity_token(t)).count();

    let (quantity, unit, rest) = if quantity_len > 0 {
        let span = tokens[..quantity_len].join(" ");
        let quantity = parse_quantity(&span);
        let rest = &tokens[quantity_len..];

        match rest.first() {
            Some(next) if is_unit(next) => (quantity, *next, &rest[1..]),
            _ => (quantity, "", rest),
        }
    } else {
        (None, "", &tokens[..])
    };

    let remainder = rest.join(" ");
    let (name, note) = split_note(remainder.trim());

    trace!(
        "Parsed line '{}' -> quantity={:?}, unit='{}', name='{}', note='{}'",
        raw,
        quantity,
        unit,
        name,
        note
    );

    let line = ParsedIngredientLine::new(raw)
        .with_unit(unit)
        .with_name(name)
        .with_note(note);

    match quantity {
        Some(quantity) => line.with_quantity(quantity),
        None => line,
    }
}

/// Whether a token belongs to the leading quantity span
fn is_quantity_token(token: &str) -> bool {
    token.chars().any(|c| c.is_ascii_digit())
        || contains_unicode_fraction(token)
        || FRACTION_TOKEN_REGEX.is_match(token)
        || RANGE_TOKEN_REGEX.is_match(token)
}

/// Split "name, note, more" into ("name", "note, more")
fn split_note(remainder: &str) -> (&str, &str) {
    match remainder.split_once(',') {
        Some((name, note)) => (name.trim(), note.trim()),
        None => (remainder, ""),
    }
}
