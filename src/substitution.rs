//! # Substitution Resolver
//!
//! Decides whether an ingredient line triggers one of the declared allergens and, if so,
//! builds the quantity-scaled replacement text.
//!
//! Resolution walks the declared allergen keys in the caller's order and, inside each
//! category, the rules in catalog order. The first rule whose pattern matches the raw line
//! wins outright; there is no scoring and no backtracking.
//!
//! ## Usage
//!
//! ```rust
//! use safe_eats::allergen_catalog::RuleCatalog;
//! use safe_eats::ingredient_parser::parse_line;
//! use safe_eats::substitution::SubstitutionResolver;
//!
//! let catalog = RuleCatalog::standard()?;
//! let resolver = SubstitutionResolver::new(&catalog);
//!
//! let raw = "1 cup butter, softened";
//! let result = resolver.resolve(&parse_line(raw), raw, &["dairy"]).unwrap();
//!
//! assert_eq!(result.rule_id, "butter");
//! assert_eq!(
//!     result.safe_text,
//!     "3/4 cup neutral vegetable oil, softened; Use ~3/4 as much oil as butter."
//! );
//! # Ok::<(), safe_eats::errors::SafeEatsError>(())
//! ```

use crate::allergen_catalog::{RuleCatalog, RuleDefinition};
use crate::ingredient_model::{ParsedIngredientLine, SubstitutionResult};
use crate::quantity::format_quantity;
use crate::text_processing::normalize_whitespace;
use log::{debug, trace};

/// Resolves ingredient lines against a borrowed rule catalog
#[derive(Debug, Clone, Copy)]
pub struct SubstitutionResolver<'c> {
    catalog: &'c RuleCatalog,
}

impl<'c> SubstitutionResolver<'c> {
    pub fn new(catalog: &'c RuleCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &'c RuleCatalog {
        self.catalog
    }

    /// Find the first matching rule across the declared allergens
    ///
    /// # Arguments
    ///
    /// * `parsed` - The parsed form of `original_text`
    /// * `original_text` - The raw line the rule patterns are matched against
    /// * `declared` - Allergen category keys in priority order; unknown keys are skipped
    ///
    /// # Returns
    ///
    /// `None` when no rule of any declared category matches, which is the common case.
    pub fn resolve<S: AsRef<str>>(
        &self,
        parsed: &ParsedIngredientLine,
        original_text: &str,
        declared: &[S],
    ) -> Option<SubstitutionResult> {
        for allergen in declared {
            let allergen = allergen.as_ref();
            for rule in self.catalog.rules_for(allergen) {
                if rule.matches(original_text) {
                    debug!(
                        "Line '{}' matched rule '{}' of allergen '{}'",
                        original_text, rule.id, allergen
                    );
                    return Some(build_result(parsed, allergen, rule));
                }
            }
        }

        trace!("No substitution for line '{}'", original_text);
        None
    }
}

/// Resolve with a one-off resolver over `catalog`
pub fn resolve<S: AsRef<str>>(
    catalog: &RuleCatalog,
    parsed: &ParsedIngredientLine,
    original_text: &str,
    declared: &[S],
) -> Option<SubstitutionResult> {
    SubstitutionResolver::new(catalog).resolve(parsed, original_text, declared)
}

fn build_result(
    parsed: &ParsedIngredientLine,
    allergen: &str,
    rule: &RuleDefinition,
) -> SubstitutionResult {
    let new_quantity = parsed.quantity.map(|quantity| quantity * rule.ratio);

    let formatted_quantity = new_quantity
        .map(format_quantity)
        .filter(|q| !q.is_empty())
        .or_else(|| parsed.formatted_quantity());

    let mut parts: Vec<&str> = Vec::with_capacity(3);
    if let Some(quantity) = formatted_quantity.as_deref() {
        parts.push(quantity);
    }
    if !parsed.unit.is_empty() {
        parts.push(&parsed.unit);
    }
    parts.push(&rule.replacement_name);
    let core = parts.join(" ");

    let safe_text = match merge_notes(&parsed.note, rule.note.as_deref()) {
        Some(note) => format!("{core}, {note}"),
        None => core,
    };

    SubstitutionResult {
        allergen: allergen.to_string(),
        rule_id: rule.id.clone(),
        replacement_name: rule.replacement_name.clone(),
        replacement_note: rule.note.clone(),
        new_quantity,
        safe_text,
    }
}

/// Join the line's own note and the rule's note with "; "
fn merge_notes(line_note: &str, rule_note: Option<&str>) -> Option<String> {
    let rule_note = rule_note.unwrap_or("");
    match (line_note.is_empty(), rule_note.is_empty()) {
        (true, true) => None,
        (false, true) => Some(line_note.to_string()),
        (true, false) => Some(rule_note.to_string()),
        (false, false) => Some(format!("{line_note}; {rule_note}")),
    }
}

/// Short "quantity unit name" form of a parsed line for side-by-side display
///
/// Falls back to the whitespace-normalized original when nothing was extracted.
pub fn format_original_short(parsed: &ParsedIngredientLine) -> String {
    let combined = parsed.to_string();
    if combined.trim().is_empty() {
        normalize_whitespace(&parsed.original)
    } else {
        combined
    }
}

/// Short "quantity unit replacement" form of a substitution for side-by-side display
pub fn format_swap_short(parsed: &ParsedIngredientLine, result: &SubstitutionResult) -> String {
    let quantity = result
        .new_quantity
        .map(format_quantity)
        .or_else(|| parsed.formatted_quantity())
        .unwrap_or_default();

    let combined = normalize_whitespace(&format!(
        "{} {} {}",
        quantity, parsed.unit, result.replacement_name
    ));

    if !combined.is_empty() {
        combined
    } else if !result.replacement_name.is_empty() {
        result.replacement_name.clone()
    } else {
        "Swap".to_string()
    }
}
