//! # SafeEats
//!
//! An allergen-aware ingredient substitution engine. Candidate ingredient lines are
//! parsed into quantity, unit, name and note, matched against an ordered catalog of
//! allergen rules, and rewritten with a quantity-scaled safe replacement.
//!
//! ```rust
//! use safe_eats::allergen_catalog::RuleCatalog;
//! use safe_eats::preferences::Preferences;
//! use safe_eats::text_processing::RecipeScanner;
//!
//! let catalog = RuleCatalog::standard()?;
//! let scanner = RecipeScanner::new(&catalog);
//! let prefs = Preferences::with_allergies(["dairy"]);
//!
//! let report = scanner.scan_text("2 cups whole milk\n1 cup sugar\n2 cups flour", &prefs);
//! let (_, swap) = report.substitutions().next().unwrap();
//! assert_eq!(swap.safe_text, "2 cups unsweetened oat milk, Use equal amount of oat milk.");
//! # Ok::<(), safe_eats::errors::SafeEatsError>(())
//! ```

pub mod allergen_catalog;
pub mod config;
pub mod errors;
pub mod history;
pub mod ingredient_model;
pub mod ingredient_parser;
pub mod input;
pub mod localization;
pub mod measurement_patterns;
pub mod preferences;
pub mod quantity;
pub mod substitution;
pub mod text_processing;
