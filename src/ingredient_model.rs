//! # Ingredient Line and Substitution Data Model
//!
//! This module defines the records exchanged between the parser, the substitution
//! resolver and the presentation layer.
//!
//! ## Core Concepts
//!
//! - **ParsedIngredientLine**: one raw ingredient line split into quantity, unit, name and note
//! - **SubstitutionResult**: the allergen-safe replacement computed for a matched line
//!
//! ## Usage
//!
//! ```rust
//! use safe_eats::ingredient_model::ParsedIngredientLine;
//!
//! let line = ParsedIngredientLine::new("2 cups flour, sifted")
//!     .with_quantity(2.0)
//!     .with_unit("cups")
//!     .with_name("flour")
//!     .with_note("sifted");
//!
//! assert!(line.has_quantity());
//! assert_eq!(line.to_string(), "2 cups flour");
//! ```

use crate::quantity::format_quantity;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Structured decomposition of one raw ingredient line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedIngredientLine {
    /// The raw line, verbatim
    pub original: String,

    /// Leading quantity, if one could be read
    pub quantity: Option<f64>,

    /// Measurement unit as written (e.g., "cups", "Tbsp"), empty if none
    pub unit: String,

    /// Ingredient name (text before the first comma), possibly empty
    pub name: String,

    /// Preparation note (text after the first comma), possibly empty
    pub note: String,
}

/// The replacement computed for a line that matched an allergen rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubstitutionResult {
    /// Key of the allergen category whose rule matched
    pub allergen: String,

    /// Id of the matching rule
    pub rule_id: String,

    /// Name of the substitute ingredient
    pub replacement_name: String,

    /// Guidance attached to the rule
    pub replacement_note: Option<String>,

    /// Scaled quantity; `None` exactly when the parsed line had no quantity
    pub new_quantity: Option<f64>,

    /// Fully formatted replacement line
    pub safe_text: String,
}

impl ParsedIngredientLine {
    /// Create a record for a raw line with nothing extracted yet
    pub fn new(original: &str) -> Self {
        Self {
            original: original.to_string(),
            quantity: None,
            unit: String::new(),
            name: String::new(),
            note: String::new(),
        }
    }

    /// Set the quantity
    pub fn with_quantity(mut self, quantity: f64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// Set the unit
    pub fn with_unit(mut self, unit: &str) -> Self {
        self.unit = unit.to_string();
        self
    }

    /// Set the ingredient name
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Set the note
    pub fn with_note(mut self, note: &str) -> Self {
        self.note = note.to_string();
        self
    }

    /// Check if a quantity was extracted
    pub fn has_quantity(&self) -> bool {
        self.quantity.is_some()
    }

    /// Quantity rendered as a cooking fraction, if present
    pub fn formatted_quantity(&self) -> Option<String> {
        self.quantity.map(format_quantity)
    }
}

impl fmt::Display for ParsedIngredientLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = [
            self.formatted_quantity(),
            Some(self.unit.clone()),
            Some(self.name.clone()),
        ]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect();

        write!(f, "{}", parts.join(" "))
    }
}

impl fmt::Display for SubstitutionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.safe_text)
    }
}
