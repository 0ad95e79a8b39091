//! # Recipe Parser Example
//!
//! Parses a cookie recipe, resolves it against two different allergy profiles and
//! prints the localized summary with each substitution.

use safe_eats::allergen_catalog::RuleCatalog;
use safe_eats::ingredient_parser::parse_ingredient_list;
use safe_eats::localization::Localizer;
use safe_eats::preferences::Preferences;
use safe_eats::text_processing::RecipeScanner;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🍳 Recipe Substitution Example");
    println!("==============================\n");

    let recipe = r#"
    Classic Chocolate Chip Cookies

    Ingredients:
    2 1/4 cups all-purpose flour
    1 teaspoon baking soda
    1 teaspoon salt
    1 cup unsalted butter, softened
    3/4 cup granulated sugar
    3/4 cup brown sugar
    2 large eggs
    2 teaspoons vanilla extract
    2 cups chocolate chips
    1 cup chopped walnuts
    "#;

    // Example 1: the parsed structure of each line
    println!("📖 Example 1: Parsed Lines");
    println!("--------------------------");
    for (i, line) in parse_ingredient_list(recipe).iter().enumerate() {
        println!(
            "  {}. quantity={:?} unit=\"{}\" name=\"{}\" note=\"{}\"",
            i + 1,
            line.formatted_quantity(),
            line.unit,
            line.name,
            line.note
        );
    }

    let catalog = RuleCatalog::standard()?;
    let scanner = RecipeScanner::new(&catalog);
    let localizer = Localizer::new()?;

    // Example 2 and 3: the same recipe for different profiles
    let profiles = [
        ("Dairy and eggs", Preferences::with_allergies(["dairy", "eggs"])),
        ("Gluten and tree nuts", Preferences::with_allergies(["gluten", "nuts"])),
    ];

    for (i, (label, prefs)) in profiles.iter().enumerate() {
        println!("\n🥗 Example {}: {}", i + 2, label);
        println!("--------------------------");

        let report = scanner.scan_text(recipe, prefs);
        println!("{}", localizer.summarize(&report));
        for (parsed, substitution) in report.substitutions() {
            println!(
                "  [{}] {} → {}",
                localizer.allergen_name(&substitution.allergen),
                parsed.original,
                substitution.safe_text
            );
        }
    }

    Ok(())
}
