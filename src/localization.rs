use crate::errors::SafeEatsError;
use crate::text_processing::{RecipeReport, ScanStatus};
use fluent_bundle::{FluentArgs, FluentBundle, FluentResource, FluentValue};
use log::{debug, warn};
use unic_langid::LanguageIdentifier;

const EN_RESOURCE: &str = include_str!("../locales/en/main.ftl");

/// Localized messages for allergen names and scan summaries
pub struct Localizer {
    bundle: FluentBundle<FluentResource>,
}

impl Localizer {
    /// Create a localizer backed by the embedded English messages
    pub fn new() -> Result<Self, SafeEatsError> {
        let locale: LanguageIdentifier = "en"
            .parse()
            .map_err(|e| SafeEatsError::Localization(format!("invalid locale: {e}")))?;
        let bundle = Self::create_bundle(locale, EN_RESOURCE)?;
        debug!("Loaded English message bundle");
        Ok(Self { bundle })
    }

    fn create_bundle(
        locale: LanguageIdentifier,
        source: &str,
    ) -> Result<FluentBundle<FluentResource>, SafeEatsError> {
        let mut bundle = FluentBundle::new(vec![locale]);
        // Plain text output, no bidi isolation marks around arguments
        bundle.set_use_isolating(false);

        let resource = FluentResource::try_new(source.to_string()).map_err(|(_, errors)| {
            SafeEatsError::Localization(format!("{} parse errors in message resource", errors.len()))
        })?;
        bundle.add_resource(resource).map_err(|errors| {
            SafeEatsError::Localization(format!("{} conflicting messages", errors.len()))
        })?;

        Ok(bundle)
    }

    /// Get a localized message
    pub fn get_message(&self, key: &str, args: Option<&FluentArgs>) -> String {
        let msg = match self.bundle.get_message(key) {
            Some(msg) => msg,
            None => return format!("Missing translation: {}", key),
        };

        let pattern = match msg.value() {
            Some(pattern) => pattern,
            None => return format!("Missing value for key: {}", key),
        };

        let mut errors = vec![];
        let value = self.bundle.format_pattern(pattern, args, &mut errors);
        if !errors.is_empty() {
            warn!("Formatting '{}' reported {} errors", key, errors.len());
        }
        value.into_owned()
    }

    /// Get a localized message with simple string arguments
    pub fn get_message_with_args(&self, key: &str, args: &[(&str, &str)]) -> String {
        let mut fluent_args = FluentArgs::new();
        for (name, value) in args {
            fluent_args.set(*name, FluentValue::from(*value));
        }
        self.get_message(key, Some(&fluent_args))
    }

    pub fn allergen_name(&self, key: &str) -> String {
        self.get_message(&format!("allergen-{key}-name"), None)
    }

    pub fn allergen_description(&self, key: &str) -> String {
        self.get_message(&format!("allergen-{key}-description"), None)
    }

    /// Human-readable summary of a scan, one line per statement
    pub fn summarize(&self, report: &RecipeReport) -> String {
        let lines = match report.status {
            ScanStatus::Disabled => vec![self.get_message("summary-disabled", None)],
            ScanStatus::NotARecipe => vec![
                self.get_message("summary-not-a-recipe", None),
                self.get_message("summary-not-a-recipe-hint", None),
            ],
            ScanStatus::Recipe if report.allergies.is_empty() => vec![
                self.get_message("summary-recipe-detected", None),
                self.get_message("summary-no-allergies", None),
            ],
            ScanStatus::Recipe => {
                let flagged = report.flagged_count();

                let mut metrics = FluentArgs::new();
                metrics.set("ingredients", FluentValue::from(report.ingredient_count()));
                metrics.set("flagged", FluentValue::from(flagged));

                let outcome = if flagged > 0 {
                    let mut count = FluentArgs::new();
                    count.set("count", FluentValue::from(flagged));
                    self.get_message("summary-substituted", Some(&count))
                } else {
                    self.get_message("summary-no-matches", None)
                };

                vec![
                    self.get_message("summary-recipe-detected", None),
                    self.get_message("summary-metrics", Some(&metrics)),
                    outcome,
                ]
            }
        };
        lines.join("\n")
    }
}
