//! # Preferences Module
//!
//! The user's allergy profile as supplied by the preference store: whether substitution
//! is enabled and which allergen categories are declared, in order. Keys are never
//! validated here; keys the catalog does not know simply contribute no rules.

use crate::errors::SafeEatsError;
use log::debug;
use serde::{Deserialize, Serialize};

/// Declared allergens and the enabled flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    /// Whether substitutions should be computed at all
    pub is_enabled: bool,
    /// Declared allergen category keys; order decides which rule wins
    pub allergies: Vec<String>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            is_enabled: true,
            allergies: Vec::new(),
        }
    }
}

impl Preferences {
    /// Enabled preferences declaring the given allergens in order
    pub fn with_allergies<I, S>(allergies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            is_enabled: true,
            allergies: allergies.into_iter().map(Into::into).collect(),
        }
    }

    /// Read preferences from their stored JSON form; missing fields take their defaults
    ///
    /// ```rust
    /// use safe_eats::preferences::Preferences;
    ///
    /// let prefs = Preferences::from_json(r#"{"isEnabled": true, "allergies": ["dairy"]}"#)?;
    /// assert_eq!(prefs.allergies, vec!["dairy".to_string()]);
    /// # Ok::<(), safe_eats::errors::SafeEatsError>(())
    /// ```
    pub fn from_json(json: &str) -> Result<Self, SafeEatsError> {
        let prefs: Preferences = serde_json::from_str(json)?;
        debug!(
            "Loaded preferences: enabled={}, allergies={:?}",
            prefs.is_enabled, prefs.allergies
        );
        Ok(prefs)
    }

    pub fn to_json(&self) -> Result<String, SafeEatsError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Select or deselect one allergen
    ///
    /// Selecting appends the key if it is not declared yet; deselecting removes it.
    pub fn with_allergen(mut self, key: &str, selected: bool) -> Self {
        if selected {
            if !self.allergies.iter().any(|k| k == key) {
                self.allergies.push(key.to_string());
            }
        } else {
            self.allergies.retain(|k| k != key);
        }
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.is_enabled = enabled;
        self
    }

    /// Enabled with at least one declared allergen
    pub fn is_active(&self) -> bool {
        self.is_enabled && !self.allergies.is_empty()
    }
}
