//! # Text Processing Module
//!
//! This module turns the candidate lines supplied by a text extraction step into a
//! per-line substitution report.
//!
//! ## Features
//!
//! - Whitespace normalization of candidate lines
//! - Length filtering to drop navigation text and paragraphs
//! - Recipe detection: too few candidate lines means the page is not a recipe
//! - Line-by-line parsing and substitution against the declared allergens

use crate::allergen_catalog::RuleCatalog;
use crate::config::ScanConfig;
use crate::ingredient_model::{ParsedIngredientLine, SubstitutionResult};
use crate::ingredient_parser::parse_line;
use crate::preferences::Preferences;
use crate::substitution::SubstitutionResolver;
use log::{debug, info, trace, warn};
use serde::{Deserialize, Serialize};

/// Collapse every whitespace run to a single space and trim
///
/// # Examples
///
/// ```rust
/// use safe_eats::text_processing::normalize_whitespace;
///
/// assert_eq!(normalize_whitespace("  2\tcups \n flour "), "2 cups flour");
/// ```
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<&str>>().join(" ")
}

/// Outcome of scanning a batch of candidate lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanStatus {
    /// Substitution is switched off in the preferences
    Disabled,
    /// Too few candidate lines to be an ingredient list
    NotARecipe,
    /// Lines were parsed and resolved
    Recipe,
}

/// One candidate line with its parse and optional substitution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineOutcome {
    pub parsed: ParsedIngredientLine,
    pub substitution: Option<SubstitutionResult>,
}

impl LineOutcome {
    pub fn is_flagged(&self) -> bool {
        self.substitution.is_some()
    }
}

/// Per-line results for one scanned page or text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeReport {
    pub status: ScanStatus,
    /// Allergen keys the lines were resolved against, in priority order
    pub allergies: Vec<String>,
    pub outcomes: Vec<LineOutcome>,
}

impl RecipeReport {
    fn empty(status: ScanStatus, allergies: &[String]) -> Self {
        Self {
            status,
            allergies: allergies.to_vec(),
            outcomes: Vec::new(),
        }
    }

    pub fn is_recipe(&self) -> bool {
        self.status == ScanStatus::Recipe
    }

    /// Number of ingredient lines that were analysed
    pub fn ingredient_count(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of lines with a substitution
    pub fn flagged_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_flagged()).count()
    }

    /// Lines with a substitution, in input order
    pub fn substitutions(&self) -> impl Iterator<Item = (&ParsedIngredientLine, &SubstitutionResult)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.substitution.as_ref().map(|s| (&o.parsed, s)))
    }
}

/// Scans candidate ingredient lines against a rule catalog
pub struct RecipeScanner<'c> {
    resolver: SubstitutionResolver<'c>,
    config: ScanConfig,
}

impl<'c> RecipeScanner<'c> {
    /// Create a scanner with the default line limits
    ///
    /// # Examples
    ///
    /// ```rust
    /// use safe_eats::allergen_catalog::RuleCatalog;
    /// use safe_eats::preferences::Preferences;
    /// use safe_eats::text_processing::RecipeScanner;
    ///
    /// let catalog = RuleCatalog::standard()?;
    /// let scanner = RecipeScanner::new(&catalog);
    /// let prefs = Preferences::with_allergies(["eggs"]);
    ///
    /// let report = scanner.scan_text("2 cups flour\n3 large eggs\n1 tsp salt", &prefs);
    /// assert!(report.is_recipe());
    /// assert_eq!(report.flagged_count(), 1);
    /// # Ok::<(), safe_eats::errors::SafeEatsError>(())
    /// ```
    pub fn new(catalog: &'c RuleCatalog) -> Self {
        Self::with_config(catalog, ScanConfig::default())
    }

    /// Create a scanner with custom line limits
    pub fn with_config(catalog: &'c RuleCatalog, config: ScanConfig) -> Self {
        info!(
            "Creating RecipeScanner: line length {}..={}, min recipe lines {}",
            config.min_line_length, config.max_line_length, config.min_recipe_lines
        );
        Self {
            resolver: SubstitutionResolver::new(catalog),
            config,
        }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Normalize lines and keep those within the configured length bounds
    pub fn candidate_lines<I, S>(&self, lines: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        lines
            .into_iter()
            .map(|line| normalize_whitespace(line.as_ref()))
            .filter(|line| {
                let length = line.chars().count();
                let keep = !line.is_empty()
                    && length >= self.config.min_line_length
                    && length <= self.config.max_line_length;
                if !keep {
                    trace!("Dropping candidate line ({} chars): '{}'", length, line);
                }
                keep
            })
            .collect()
    }

    /// Parse and resolve every candidate line
    pub fn scan<I, S>(&self, lines: I, preferences: &Preferences) -> RecipeReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if !preferences.is_enabled {
            debug!("Substitution disabled, skipping scan");
            return RecipeReport::empty(ScanStatus::Disabled, &preferences.allergies);
        }

        for key in &preferences.allergies {
            if self.resolver.catalog().definition(key).is_none() {
                warn!("Unknown allergen key '{}' contributes no rules", key);
            }
        }

        let candidates = self.candidate_lines(lines);
        if candidates.len() < self.config.min_recipe_lines {
            debug!(
                "Only {} candidate lines (need {}), not a recipe",
                candidates.len(),
                self.config.min_recipe_lines
            );
            return RecipeReport::empty(ScanStatus::NotARecipe, &preferences.allergies);
        }

        let outcomes: Vec<LineOutcome> = candidates
            .iter()
            .map(|line| {
                let parsed = parse_line(line);
                let substitution = self.resolver.resolve(&parsed, line, &preferences.allergies);
                LineOutcome {
                    parsed,
                    substitution,
                }
            })
            .collect();

        let report = RecipeReport {
            status: ScanStatus::Recipe,
            allergies: preferences.allergies.clone(),
            outcomes,
        };

        info!(
            "Scanned {} ingredient lines, {} flagged",
            report.ingredient_count(),
            report.flagged_count()
        );
        report
    }

    /// Scan every line of a multi-line text
    pub fn scan_text(&self, text: &str, preferences: &Preferences) -> RecipeReport {
        self.scan(text.lines(), preferences)
    }
}
