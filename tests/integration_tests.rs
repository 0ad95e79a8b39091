//! # Integration Tests
//!
//! End-to-end checks of the public API: quantity normalization, line parsing and
//! substitution resolution against the standard catalog.

use safe_eats::allergen_catalog::RuleCatalog;
use safe_eats::ingredient_parser::{parse_ingredient_list, parse_line};
use safe_eats::quantity::{format_quantity, parse_quantity};
use safe_eats::substitution::{resolve, SubstitutionResolver};

fn resolve_line(catalog: &RuleCatalog, raw: &str, declared: &[&str]) -> Option<String> {
    SubstitutionResolver::new(catalog)
        .resolve(&parse_line(raw), raw, declared)
        .map(|result| result.safe_text)
}

#[test]
fn test_parse_line_never_fails() {
    let inputs = [
        "",
        "   ",
        "-",
        "•",
        "1/0 cup milk",
        "99999999999999999999999999999999999999 eggs",
        "½½½",
        "cups",
        ", , ,",
        "🍳 2 eggs 🍳",
        "1e400 g flour",
    ];

    for raw in inputs {
        let parsed = parse_line(raw);
        assert_eq!(parsed.original, raw);
        if let Some(quantity) = parsed.quantity {
            assert!(quantity.is_finite() && quantity >= 0.0, "{raw}: {quantity}");
        }
    }
}

#[test]
fn test_quantity_examples() {
    assert_eq!(parse_quantity("1 1/2"), Some(1.5));
    assert_eq!(parse_quantity("¾"), Some(0.75));
    assert_eq!(parse_quantity("2-3"), Some(2.0));
    assert_eq!(parse_quantity("banana"), None);

    assert_eq!(format_quantity(0.25), "1/4");
    assert_eq!(format_quantity(1.0), "1");
    assert_eq!(format_quantity(1.5), "1 1/2");
    assert_eq!(format_quantity(0.0), "0");
}

#[test]
fn test_quarter_quantities_are_stable() {
    for quarters in 0..=48 {
        let formatted = format_quantity(quarters as f64 / 4.0);
        let reparsed = parse_quantity(&formatted).unwrap();
        assert_eq!(format_quantity(reparsed), formatted);
    }
}

#[test]
fn test_empty_declarations_never_match() {
    let catalog = RuleCatalog::standard().unwrap();
    for raw in ["2 cups whole milk", "3 eggs", "1 cup walnuts", "anything at all"] {
        assert_eq!(resolve_line(&catalog, raw, &[]), None);
    }
}

#[test]
fn test_whole_milk_example() {
    let catalog = RuleCatalog::standard().unwrap();
    let raw = "2 cups whole milk";
    let result = resolve(&catalog, &parse_line(raw), raw, &["dairy"]).unwrap();

    assert_eq!(result.rule_id, "milk");
    assert_eq!(result.new_quantity, Some(2.0));
    assert!(result.safe_text.starts_with("2 cups unsweetened oat milk"));
}

#[test]
fn test_water_has_no_match() {
    let catalog = RuleCatalog::standard().unwrap();
    assert_eq!(resolve_line(&catalog, "3 cups water", &["dairy", "nuts"]), None);
}

#[test]
fn test_declaration_order_decides() {
    let catalog = RuleCatalog::standard().unwrap();
    let raw = "1 cup soy milk";

    let resolver = SubstitutionResolver::new(&catalog);
    let parsed = parse_line(raw);

    let dairy_first = resolver.resolve(&parsed, raw, &["dairy", "soy"]).unwrap();
    assert_eq!((dairy_first.allergen.as_str(), dairy_first.rule_id.as_str()), ("dairy", "milk"));

    let soy_first = resolver.resolve(&parsed, raw, &["soy", "dairy"]).unwrap();
    assert_eq!((soy_first.allergen.as_str(), soy_first.rule_id.as_str()), ("soy", "soy-milk"));
}

#[test]
fn test_full_ingredient_list() {
    let catalog = RuleCatalog::standard().unwrap();
    let recipe = "\
- 2 1/4 cups all-purpose flour
- 1 cup (2 sticks) butter, softened
- ¾ cup granulated sugar
- 2 large eggs
- 2 cups semisweet chocolate chips
- 1 cup chopped walnuts, optional";

    let declared = ["dairy", "eggs", "gluten", "nuts"];
    let resolver = SubstitutionResolver::new(&catalog);

    let swaps: Vec<(String, Option<String>)> = recipe
        .lines()
        .zip(parse_ingredient_list(recipe))
        .map(|(raw, parsed)| {
            let result = resolver.resolve(&parsed, raw, &declared);
            (parsed.name, result.map(|r| r.rule_id))
        })
        .collect();

    assert_eq!(
        swaps,
        vec![
            ("all-purpose flour".to_string(), Some("all-purpose-flour".to_string())),
            ("(2 sticks) butter".to_string(), Some("butter".to_string())),
            ("granulated sugar".to_string(), None),
            ("large eggs".to_string(), Some("egg".to_string())),
            ("semisweet chocolate chips".to_string(), None),
            ("chopped walnuts".to_string(), Some("walnuts".to_string())),
        ]
    );
}

#[test]
fn test_scaled_safe_text() {
    let catalog = RuleCatalog::standard().unwrap();
    assert_eq!(
        resolve_line(&catalog, "1 1/3 cups butter, melted", &["dairy"]).as_deref(),
        Some("1 cup neutral vegetable oil, melted; Use ~3/4 as much oil as butter.")
    );
    assert_eq!(
        resolve_line(&catalog, "• 2 Tbsp tahini", &["sesame"]).as_deref(),
        Some("2 Tbsp sunflower seed butter, Use equal amount of sunflower seed butter.")
    );
}
