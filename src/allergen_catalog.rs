//! # Allergen Rule Catalog
//!
//! Read-only table from allergen category key to an ordered list of substitution rules.
//! The catalog is built once at startup and shared by reference; it holds no interior
//! mutability, so any number of threads may read it at the same time.
//!
//! Rule patterns are compiled case-insensitively and always use whole-word boundaries.
//! They are matched against the full raw ingredient line, because allergen cues often live
//! in text the parser moves into the quantity or unit fields ("2% milk").
//!
//! ## Usage
//!
//! ```rust
//! use safe_eats::allergen_catalog::RuleCatalog;
//!
//! let catalog = RuleCatalog::standard()?;
//! let dairy = catalog.rules_for("dairy");
//!
//! assert_eq!(dairy[0].id, "milk");
//! assert!(catalog.rules_for("unknown").is_empty());
//! # Ok::<(), safe_eats::errors::SafeEatsError>(())
//! ```

use crate::errors::SafeEatsError;
use log::{debug, info};
use regex::{Regex, RegexBuilder};
use std::collections::HashSet;

/// One pattern-to-replacement mapping within a category
#[derive(Debug, Clone)]
pub struct RuleDefinition {
    /// Identifier, unique within its category
    pub id: String,
    /// Case-insensitive predicate over the raw line
    pub pattern: Regex,
    /// Name of the substitute ingredient
    pub replacement_name: String,
    /// Multiplicative quantity scale, always finite and > 0
    pub ratio: f64,
    /// Optional guidance shown alongside the replacement
    pub note: Option<String>,
}

/// Display metadata for an allergen category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllergenDefinition {
    /// Stable identifier (e.g., "dairy")
    pub key: String,
    /// Human-readable name (e.g., "Tree Nuts")
    pub name: String,
    /// Short description of what the category covers
    pub description: String,
}

/// A named class of allergen-triggering ingredients and its ordered rules
#[derive(Debug, Clone)]
pub struct AllergenCategory {
    pub definition: AllergenDefinition,
    pub rules: Vec<RuleDefinition>,
}

/// Immutable catalog of allergen categories
#[derive(Debug, Clone)]
pub struct RuleCatalog {
    categories: Vec<AllergenCategory>,
}

/// Static description of a rule: (id, pattern, replacement, ratio, note)
type RuleSpec = (&'static str, &'static str, &'static str, f64, &'static str);

/// Static description of a category: (key, name, description, rules)
type CategorySpec = (&'static str, &'static str, &'static str, &'static [RuleSpec]);

const STANDARD_CATEGORIES: &[CategorySpec] = &[
    (
        "dairy",
        "Dairy",
        "Milk, butter, cream, cheese, yogurt, etc.",
        &[
            ("milk", r"\b(whole|skim|2%|1%|cow's|cow’s)?\s*(milk)\b", "unsweetened oat milk", 1.0, "Use equal amount of oat milk."),
            ("butter", r"\bbutter\b", "neutral vegetable oil", 0.75, "Use ~3/4 as much oil as butter."),
            ("cream", r"\b(heavy|whipping)?\s*cream\b", "full-fat coconut milk", 1.0, "Use equal amount of coconut milk (flavor will differ)."),
            ("cheese", r"\b(cheddar|mozzarella|parmesan|cheese)\b", "dairy-free cheese shreds", 1.0, "Use a similar volume of dairy-free cheese."),
            ("yogurt", r"\byogurt\b", "plant-based yogurt", 1.0, "Use equal amount of plant-based yogurt."),
        ],
    ),
    (
        "eggs",
        "Eggs",
        "Whole eggs and egg-based binders.",
        &[
            ("egg", r"\begg(s)?\b", "ground flax + water “egg”", 1.0, "Per egg: 1 tbsp ground flax + 3 tbsp water."),
        ],
    ),
    (
        "gluten",
        "Gluten / Wheat",
        "Wheat flour, bread crumbs, most pastas.",
        &[
            ("all-purpose-flour", r"\b(all[-\s]?purpose|plain|wheat)\s+flour\b", "gluten-free all-purpose flour blend", 1.0, "Use 1:1 gluten-free flour blend."),
            ("breadcrumbs", r"\b(bread\s*crumbs|breadcrumbs)\b", "gluten-free bread crumbs or crushed GF crackers", 1.0, "Use a similar volume of gluten-free crumbs."),
            ("pasta", r"\bpasta\b", "gluten-free pasta", 1.0, "Use equal cooked weight of gluten-free pasta."),
        ],
    ),
    (
        "nuts",
        "Tree Nuts",
        "Almonds, walnuts, pecans, cashews, etc.",
        &[
            ("almonds", r"\balmond(s)?\b", "toasted pumpkin seeds (pepitas)", 1.0, "Use a similar volume of pumpkin seeds."),
            ("walnuts", r"\bwalnut(s)?\b", "sunflower seeds", 1.0, "Use equal volume of sunflower seeds."),
            ("nut-butter", r"\b(almond|cashew|hazelnut)\s+butter\b", "sunflower seed butter", 1.0, "Use equal amount of sunflower seed butter."),
        ],
    ),
    (
        "peanuts",
        "Peanuts",
        "Peanuts and peanut butter.",
        &[
            ("peanut-butter", r"\bpeanut\s+butter\b", "sunflower seed butter", 1.0, "Use equal amount of sunflower seed butter."),
            ("peanuts", r"\bpeanut(s)?\b", "roasted chickpeas or seeds", 1.0, "Use similar volume of roasted chickpeas or seeds."),
        ],
    ),
    (
        "soy",
        "Soy",
        "Soy milk, tofu, soy sauce, edamame.",
        &[
            ("soy-milk", r"\bsoy\s+milk\b", "oat milk", 1.0, "Use equal amount of oat milk."),
            ("soy-sauce", r"\bsoy\s+sauce\b", "coconut aminos (or tamari if gluten-free only)", 1.0, "Use equal amount of coconut aminos."),
            ("tofu", r"\btofu\b", "chickpeas or white beans", 1.0, "Use a similar cooked weight of beans."),
        ],
    ),
    (
        "shellfish",
        "Shellfish",
        "Shrimp, crab, lobster, etc.",
        &[
            ("shrimp", r"\bshrimp\b", "firm tofu cubes", 1.0, "Use similar cooked weight of tofu."),
            ("crab", r"\bcrab\b", "hearts of palm", 1.0, "Use similar volume of chopped hearts of palm."),
        ],
    ),
    (
        "fish",
        "Fish",
        "Salmon, tuna, cod, anchovies, etc.",
        &[
            ("fish", r"\b(salmon|cod|tuna|white\s+fish|fish)\b", "marinated chickpeas or tofu", 1.0, "Use similar volume of plant-based protein."),
        ],
    ),
    (
        "sesame",
        "Sesame",
        "Sesame seeds, tahini, sesame oil.",
        &[
            ("tahini", r"\btahini\b", "sunflower seed butter", 1.0, "Use equal amount of sunflower seed butter."),
            ("sesame-seeds", r"\bsesame\s+seed(s)?\b", "hemp seeds or finely chopped pumpkin seeds", 1.0, "Use similar volume of seeds."),
        ],
    ),
];

impl RuleDefinition {
    /// Create a rule, compiling its pattern case-insensitively
    ///
    /// # Errors
    ///
    /// Returns `SafeEatsError::InvalidPattern` if the pattern does not compile and
    /// `SafeEatsError::InvalidRule` if the ratio is not a positive finite number.
    pub fn new(
        id: &str,
        pattern: &str,
        replacement_name: &str,
        ratio: f64,
        note: Option<&str>,
    ) -> Result<Self, SafeEatsError> {
        if id.trim().is_empty() {
            return Err(SafeEatsError::InvalidRule("rule id must not be empty".to_string()));
        }
        if !ratio.is_finite() || ratio <= 0.0 {
            return Err(SafeEatsError::InvalidRule(format!(
                "rule '{id}' has ratio {ratio}, expected a positive number"
            )));
        }

        let pattern = RegexBuilder::new(pattern).case_insensitive(true).build()?;

        Ok(Self {
            id: id.to_string(),
            pattern,
            replacement_name: replacement_name.to_string(),
            ratio,
            note: note.filter(|n| !n.is_empty()).map(str::to_string),
        })
    }

    /// Check whether this rule applies to a raw ingredient line
    pub fn matches(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

impl AllergenDefinition {
    pub fn new(key: &str, name: &str, description: &str) -> Self {
        Self {
            key: key.to_string(),
            name: name.to_string(),
            description: description.to_string(),
        }
    }
}

impl AllergenCategory {
    /// Create a category, rejecting duplicate rule ids
    pub fn new(
        definition: AllergenDefinition,
        rules: Vec<RuleDefinition>,
    ) -> Result<Self, SafeEatsError> {
        let mut seen = HashSet::new();
        for rule in &rules {
            if !seen.insert(rule.id.as_str()) {
                return Err(SafeEatsError::InvalidRule(format!(
                    "duplicate rule id '{}' in category '{}'",
                    rule.id, definition.key
                )));
            }
        }

        Ok(Self { definition, rules })
    }

    pub fn key(&self) -> &str {
        &self.definition.key
    }
}

impl RuleCatalog {
    /// Build a catalog from categories, rejecting duplicate keys
    pub fn new(categories: Vec<AllergenCategory>) -> Result<Self, SafeEatsError> {
        let mut seen = HashSet::new();
        for category in &categories {
            if !seen.insert(category.key()) {
                return Err(SafeEatsError::DuplicateCategory(category.key().to_string()));
            }
        }

        info!(
            "Created RuleCatalog with {} categories and {} rules",
            categories.len(),
            categories.iter().map(|c| c.rules.len()).sum::<usize>()
        );

        Ok(Self { categories })
    }

    /// Build the standard catalog (dairy, eggs, gluten, nuts, peanuts, soy, shellfish,
    /// fish, sesame)
    pub fn standard() -> Result<Self, SafeEatsError> {
        let categories = STANDARD_CATEGORIES
            .iter()
            .map(|(key, name, description, rules)| {
                let rules = rules
                    .iter()
                    .map(|(id, pattern, replacement, ratio, note)| {
                        RuleDefinition::new(id, pattern, replacement, *ratio, Some(*note))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                AllergenCategory::new(AllergenDefinition::new(key, name, description), rules)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(categories)
    }

    /// Ordered rules for a category; empty for unknown keys
    pub fn rules_for(&self, key: &str) -> &[RuleDefinition] {
        match self.category(key) {
            Some(category) => &category.rules,
            None => {
                debug!("No rules for allergen key '{}'", key);
                &[]
            }
        }
    }

    /// Display metadata for a category
    pub fn definition(&self, key: &str) -> Option<&AllergenDefinition> {
        self.category(key).map(|c| &c.definition)
    }

    /// Category keys in definition order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(AllergenCategory::key)
    }

    pub fn categories(&self) -> &[AllergenCategory] {
        &self.categories
    }

    fn category(&self, key: &str) -> Option<&AllergenCategory> {
        self.categories.iter().find(|c| c.key() == key)
    }
}

impl Default for RuleCatalog {
    fn default() -> Self {
        Self::standard().expect("Standard allergen rules should be valid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_catalog() -> RuleCatalog {
        RuleCatalog::standard().unwrap()
    }

    #[test]
    fn test_standard_catalog_keys() {
        let catalog = create_catalog();
        let keys: Vec<&str> = catalog.keys().collect();
        assert_eq!(
            keys,
            vec!["dairy", "eggs", "gluten", "nuts", "peanuts", "soy", "shellfish", "fish", "sesame"]
        );
    }

    #[test]
    fn test_rule_order_is_preserved() {
        let catalog = create_catalog();
        let ids: Vec<&str> = catalog.rules_for("dairy").iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["milk", "butter", "cream", "cheese", "yogurt"]);
    }

    #[test]
    fn test_unknown_key_has_no_rules() {
        let catalog = create_catalog();
        assert!(catalog.rules_for("kryptonite").is_empty());
        assert!(catalog.rules_for("").is_empty());
        assert!(catalog.definition("kryptonite").is_none());
    }

    #[test]
    fn test_all_ratios_positive() {
        let catalog = create_catalog();
        for category in catalog.categories() {
            for rule in &category.rules {
                assert!(rule.ratio > 0.0, "rule {} has ratio {}", rule.id, rule.ratio);
                assert!(rule.note.is_some());
            }
        }
        assert_eq!(catalog.rules_for("dairy")[1].ratio, 0.75);
    }

    #[test]
    fn test_definitions() {
        let catalog = create_catalog();
        let nuts = catalog.definition("nuts").unwrap();
        assert_eq!(nuts.name, "Tree Nuts");
        assert!(nuts.description.contains("Almonds"));
    }

    #[test]
    fn test_patterns_case_insensitive_and_word_bounded() {
        let catalog = create_catalog();
        let milk = &catalog.rules_for("dairy")[0];
        assert!(milk.matches("2 cups WHOLE MILK"));
        assert!(milk.matches("1 cup 2% milk"));
        assert!(!milk.matches("1 tbsp buttermilky flavor"));

        let butter = &catalog.rules_for("dairy")[1];
        assert!(butter.matches("1/2 cup Butter, softened"));
        assert!(!butter.matches("1 cup butternut squash"));

        let egg = &catalog.rules_for("eggs")[0];
        assert!(egg.matches("2 large eggs"));
        assert!(!egg.matches("1 eggplant"));
    }

    #[test]
    fn test_invalid_ratio_rejected() {
        let err = RuleDefinition::new("bad", r"\bbad\b", "good", 0.0, None).unwrap_err();
        assert!(matches!(err, SafeEatsError::InvalidRule(_)));

        let err = RuleDefinition::new("bad", r"\bbad\b", "good", f64::NAN, None).unwrap_err();
        assert!(matches!(err, SafeEatsError::InvalidRule(_)));
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let err = RuleDefinition::new("bad", r"(unclosed", "good", 1.0, None).unwrap_err();
        assert!(matches!(err, SafeEatsError::InvalidPattern(_)));
    }

    #[test]
    fn test_duplicate_rule_ids_rejected() {
        let rule = RuleDefinition::new("dup", r"\bx\b", "y", 1.0, None).unwrap();
        let err = AllergenCategory::new(
            AllergenDefinition::new("test", "Test", "Test category"),
            vec![rule.clone(), rule],
        )
        .unwrap_err();
        assert!(matches!(err, SafeEatsError::InvalidRule(_)));
    }

    #[test]
    fn test_duplicate_category_keys_rejected() {
        let category = AllergenCategory::new(
            AllergenDefinition::new("test", "Test", "Test category"),
            Vec::new(),
        )
        .unwrap();
        let err = RuleCatalog::new(vec![category.clone(), category]).unwrap_err();
        assert_eq!(err, SafeEatsError::DuplicateCategory("test".to_string()));
    }

    #[test]
    fn test_catalog_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RuleCatalog>();

        let catalog = create_catalog();
        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    assert_eq!(catalog.rules_for("soy").len(), 3);
                });
            }
        });
    }
}
