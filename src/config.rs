//! # Configuration Module
//!
//! This module defines configuration structures for scanning candidate lines and keeping
//! swap history, plus the default allergy profile. Values can be overridden from the
//! environment.

use crate::errors::SafeEatsError;
use crate::preferences::Preferences;
use log::debug;
use std::str::FromStr;

// Constants for scanning and history
pub const DEFAULT_MIN_LINE_LENGTH: usize = 3;
pub const DEFAULT_MAX_LINE_LENGTH: usize = 200;
pub const DEFAULT_MIN_RECIPE_LINES: usize = 3;
pub const DEFAULT_HISTORY_MAX_ENTRIES: usize = 20;
pub const DEFAULT_HISTORY_MAX_SWAPS: usize = 15;

/// Environment variable names
pub const ENV_ENABLED: &str = "SAFE_EATS_ENABLED";
pub const ENV_ALLERGIES: &str = "SAFE_EATS_ALLERGIES";
pub const ENV_MIN_LINE_LENGTH: &str = "SAFE_EATS_MIN_LINE_LENGTH";
pub const ENV_MAX_LINE_LENGTH: &str = "SAFE_EATS_MAX_LINE_LENGTH";
pub const ENV_MIN_RECIPE_LINES: &str = "SAFE_EATS_MIN_RECIPE_LINES";
pub const ENV_HISTORY_MAX_ENTRIES: &str = "SAFE_EATS_HISTORY_MAX_ENTRIES";
pub const ENV_HISTORY_MAX_SWAPS: &str = "SAFE_EATS_HISTORY_MAX_SWAPS";

/// Limits applied to candidate ingredient lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// Shortest candidate line kept, in characters
    pub min_line_length: usize,
    /// Longest candidate line kept, in characters
    pub max_line_length: usize,
    /// Fewer candidates than this and the text is not treated as a recipe
    pub min_recipe_lines: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            min_line_length: DEFAULT_MIN_LINE_LENGTH,
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            min_recipe_lines: DEFAULT_MIN_RECIPE_LINES,
        }
    }
}

/// Limits for the swap history handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryConfig {
    /// Entries kept, newest first
    pub max_entries: usize,
    /// Swaps kept per entry
    pub max_swaps_per_entry: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_HISTORY_MAX_ENTRIES,
            max_swaps_per_entry: DEFAULT_HISTORY_MAX_SWAPS,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SafeEatsConfig {
    pub scan: ScanConfig,
    pub history: HistoryConfig,
    /// Allergy profile used when none is supplied by the caller
    pub preferences: Preferences,
}

impl SafeEatsConfig {
    /// Build a configuration from the process environment
    pub fn from_env() -> Result<Self, SafeEatsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from defaults overlaid with values from `lookup`
    ///
    /// # Errors
    ///
    /// Returns `SafeEatsError::Config` when a value is present but malformed, or when
    /// the resulting line length bounds are inverted.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SafeEatsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(enabled) = lookup(ENV_ENABLED) {
            config.preferences.is_enabled = parse_bool(ENV_ENABLED, &enabled)?;
        }
        if let Some(allergies) = lookup(ENV_ALLERGIES) {
            config.preferences.allergies = allergies
                .split(',')
                .map(str::trim)
                .filter(|key| !key.is_empty())
                .map(str::to_string)
                .collect();
        }

        override_value(&lookup, ENV_MIN_LINE_LENGTH, &mut config.scan.min_line_length)?;
        override_value(&lookup, ENV_MAX_LINE_LENGTH, &mut config.scan.max_line_length)?;
        override_value(&lookup, ENV_MIN_RECIPE_LINES, &mut config.scan.min_recipe_lines)?;
        override_value(&lookup, ENV_HISTORY_MAX_ENTRIES, &mut config.history.max_entries)?;
        override_value(
            &lookup,
            ENV_HISTORY_MAX_SWAPS,
            &mut config.history.max_swaps_per_entry,
        )?;

        if config.scan.min_line_length > config.scan.max_line_length {
            return Err(SafeEatsError::Config(format!(
                "min line length {} exceeds max line length {}",
                config.scan.min_line_length, config.scan.max_line_length
            )));
        }

        debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }
}

fn override_value<F, T>(lookup: &F, key: &str, target: &mut T) -> Result<(), SafeEatsError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    if let Some(raw) = lookup(key) {
        *target = raw
            .trim()
            .parse()
            .map_err(|_| SafeEatsError::Config(format!("{key} has invalid value '{raw}'")))?;
    }
    Ok(())
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, SafeEatsError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(SafeEatsError::Config(format!(
            "{key} has invalid value '{raw}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = SafeEatsConfig::default();
        assert_eq!(config.scan.min_line_length, 3);
        assert_eq!(config.scan.max_line_length, 200);
        assert_eq!(config.scan.min_recipe_lines, 3);
        assert_eq!(config.history.max_entries, 20);
        assert_eq!(config.history.max_swaps_per_entry, 15);
        assert!(config.preferences.is_enabled);
    }

    #[test]
    fn test_empty_lookup_gives_defaults() {
        let config = SafeEatsConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, SafeEatsConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = SafeEatsConfig::from_lookup(lookup_from(&[
            (ENV_ENABLED, "off"),
            (ENV_ALLERGIES, " dairy, nuts ,,eggs"),
            (ENV_MAX_LINE_LENGTH, "120"),
            (ENV_HISTORY_MAX_SWAPS, "5"),
        ]))
        .unwrap();

        assert!(!config.preferences.is_enabled);
        assert_eq!(config.preferences.allergies, vec!["dairy", "nuts", "eggs"]);
        assert_eq!(config.scan.max_line_length, 120);
        assert_eq!(config.history.max_swaps_per_entry, 5);
    }

    #[test]
    fn test_malformed_values() {
        let err = SafeEatsConfig::from_lookup(lookup_from(&[(ENV_MIN_RECIPE_LINES, "many")]))
            .unwrap_err();
        assert!(matches!(err, SafeEatsError::Config(_)));

        let err = SafeEatsConfig::from_lookup(lookup_from(&[(ENV_ENABLED, "maybe")])).unwrap_err();
        assert!(matches!(err, SafeEatsError::Config(_)));
    }

    #[test]
    fn test_inverted_line_bounds() {
        let err = SafeEatsConfig::from_lookup(lookup_from(&[
            (ENV_MIN_LINE_LENGTH, "50"),
            (ENV_MAX_LINE_LENGTH, "10"),
        ]))
        .unwrap_err();
        assert!(matches!(err, SafeEatsError::Config(_)));
    }
}
