use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use safe_eats::allergen_catalog::RuleCatalog;
use safe_eats::config::SafeEatsConfig;
use safe_eats::input::{read_lines, read_lines_from_path};
use safe_eats::localization::Localizer;
use safe_eats::text_processing::RecipeScanner;
use std::io;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "safe-eats",
    about = "Suggest allergen-safe substitutions for recipe ingredient lines",
    version
)]
struct Args {
    /// Print the full scan report as JSON
    #[arg(long)]
    json: bool,

    /// Ingredient lines to scan; reads stdin when omitted or "-"
    file: Option<PathBuf>,
}

impl Args {
    fn input_path(&self) -> Option<&PathBuf> {
        self.file.as_ref().filter(|path| path.as_os_str() != "-")
    }
}

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let args = Args::parse();
    let config = SafeEatsConfig::from_env().context("failed to load configuration")?;

    info!(
        "Starting SafeEats with allergies {:?} (enabled: {})",
        config.preferences.allergies, config.preferences.is_enabled
    );

    let lines = match args.input_path() {
        Some(path) => read_lines_from_path(path)?,
        None => read_lines(io::stdin().lock())?,
    };

    let catalog = RuleCatalog::standard()?;
    let scanner = RecipeScanner::with_config(&catalog, config.scan.clone());
    let report = scanner.scan(&lines, &config.preferences);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let localizer = Localizer::new()?;
    println!("{}", localizer.summarize(&report));
    for (parsed, substitution) in report.substitutions() {
        println!("{} => {}", parsed.original, substitution.safe_text);
    }

    Ok(())
}
